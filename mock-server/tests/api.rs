use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{
    app, Board, Card, CheckList, CustomFieldItem, List, APPLICATION_KEY, MEMBER_TOKEN,
};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(path: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}key={APPLICATION_KEY}&token={MEMBER_TOKEN}")
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- credentials ---

#[tokio::test]
async fn missing_token_is_401() {
    let resp = app()
        .oneshot(get(&format!("/members/me/boards?key={APPLICATION_KEY}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_bytes(resp).await, "invalid token");
}

#[tokio::test]
async fn missing_key_is_401() {
    let resp = app()
        .oneshot(get(&format!("/members/me/boards?token={MEMBER_TOKEN}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_bytes(resp).await, "invalid key");
}

// --- reads ---

#[tokio::test]
async fn boards_of_me() {
    let resp = app().oneshot(get(&authed("/members/me/boards"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let boards: Vec<Board> = body_json(resp).await;
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "Roadmap");
}

#[tokio::test]
async fn lists_of_board() {
    let resp = app()
        .oneshot(get(&authed("/boards/b-roadmap/lists")))
        .await
        .unwrap();
    let lists: Vec<List> = body_json(resp).await;
    let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Todo", "Done"]);
}

#[tokio::test]
async fn unknown_board_is_404() {
    let resp = app().oneshot(get(&authed("/boards/nope"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cards_of_list_carry_custom_field_items() {
    let resp = app()
        .oneshot(get(&authed(
            "/list/l-todo/cards?customFieldItems=true&checklists=all",
        )))
        .await
        .unwrap();
    let cards: Vec<Card> = body_json(resp).await;
    assert_eq!(cards[0].custom_field_items.len(), 2);
}

// --- writes ---

#[tokio::test]
async fn create_card_in_list() {
    let resp = app()
        .oneshot(form_request(
            &authed("/cards"),
            "name=Task+A&idList=l-todo&due=2024.03.01&desc=x",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let card: Card = body_json(resp).await;
    assert_eq!(card.name, "Task A");
    assert_eq!(card.id_board, "b-roadmap");
    assert_eq!(card.due.as_deref(), Some("2024-03-01T00:00:00.000Z"));
}

#[tokio::test]
async fn create_card_in_unknown_list_is_400() {
    let resp = app()
        .oneshot(form_request(&authed("/cards"), "name=Task&idList=nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn custom_field_put_reads_credentials_from_body() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/cards/c-docs/customField/cf-pld/item",
            &format!(
                r#"{{"value":{{"number":"42"}},"key":"{}","token":"{}"}}"#,
                APPLICATION_KEY, MEMBER_TOKEN
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let item: CustomFieldItem = body_json(resp).await;
    assert_eq!(item.value["number"], "42");
}

#[tokio::test]
async fn custom_field_put_without_body_token_is_401() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            &authed("/cards/c-docs/customField/cf-pld/item"),
            &format!(r#"{{"value":{{"number":"42"}},"key":"{APPLICATION_KEY}"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn url_attachment_from_form() {
    let resp = app()
        .oneshot(form_request(
            &authed("/cards/c-docs/attachments"),
            "name=Spec&url=https%3A%2F%2Fexample.com%2Fspec",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let attachment: mock_server::Attachment = body_json(resp).await;
    assert_eq!(attachment.url, "https://example.com/spec");
    assert_eq!(attachment.bytes, None);
}

#[tokio::test]
async fn multipart_attachment_counts_bytes() {
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nnotes.txt\r\n\
         --{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
         Content-Type: application/octet-stream\r\n\r\nhello\r\n--{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri(authed("/cards/c-docs/attachments"))
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(body)
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let attachment: mock_server::Attachment = body_json(resp).await;
    assert_eq!(attachment.name, "notes.txt");
    assert_eq!(attachment.bytes, Some(5));
}

#[tokio::test]
async fn checklist_then_item() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(form_request(&authed("/checklists"), "idCard=c-docs&name=QA"))
        .await
        .unwrap();
    let checklist: CheckList = body_json(resp).await;
    assert_eq!(checklist.name, "QA");

    let resp = app
        .clone()
        .oneshot(form_request(
            &authed(&format!("/checklists/{}/checkItems", checklist.id)),
            "name=Smoke+test&checked=true",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(get(&authed("/cards/c-docs/checklists")))
        .await
        .unwrap();
    let checklists: Vec<CheckList> = body_json(resp).await;
    assert_eq!(checklists[0].check_items[0].state, "complete");
}
