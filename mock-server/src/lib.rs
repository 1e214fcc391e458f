//! In-memory stand-in for the subset of the Trello REST API the client uses.
//!
//! Every route demands `key` and `token` query parameters matching
//! `APPLICATION_KEY` / `MEMBER_TOKEN` and answers 401 otherwise; the
//! custom-field PUT checks the copies inside its JSON body instead. Unknown
//! ids answer 404.

use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use axum::{
    extract::{FromRequest, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const APPLICATION_KEY: &str = "mock-key";
pub const MEMBER_TOKEN: &str = "mock-token";
/// Member answered for `me`.
pub const ME_ID: &str = "m-ada";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub initials: String,
    pub bio: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub desc: String,
    #[serde(skip)]
    pub member_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub closed: bool,
    pub id_organization: Option<String>,
    pub url: String,
    pub label_names: BTreeMap<String, String>,
    #[serde(skip)]
    pub member_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    pub id_board: String,
    pub closed: bool,
    pub pos: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldItem {
    pub id: String,
    pub id_custom_field: String,
    pub value: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub closed: bool,
    pub id_list: String,
    pub id_board: String,
    pub id_members: Vec<String>,
    pub id_labels: Vec<String>,
    pub due: Option<String>,
    pub custom_field_items: Vec<CustomFieldItem>,
    pub url: String,
    pub short_url: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub id: String,
    pub id_model: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub id_board: String,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub id_member: String,
    pub name: String,
    pub url: String,
    pub bytes: Option<usize>,
    #[serde(skip)]
    pub id_card: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    pub id: String,
    pub name: String,
    pub pos: f64,
    pub state: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckList {
    pub id: String,
    pub name: String,
    pub id_card: String,
    pub pos: f64,
    pub check_items: Vec<CheckItem>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct Store {
    pub members: Vec<Member>,
    pub organizations: Vec<Organization>,
    pub boards: Vec<Board>,
    pub lists: Vec<List>,
    pub cards: Vec<Card>,
    pub custom_fields: Vec<CustomField>,
    pub labels: Vec<Label>,
    pub attachments: Vec<Attachment>,
    pub checklists: Vec<CheckList>,
}

impl Store {
    /// One organization, one board with two lists, one card carrying both
    /// custom fields, and two members.
    pub fn seeded() -> Self {
        let members = vec![
            Member {
                id: ME_ID.to_string(),
                username: "ada".to_string(),
                full_name: "Ada Lovelace".to_string(),
                initials: "AL".to_string(),
                bio: "Notes on the engine".to_string(),
            },
            Member {
                id: "m-grace".to_string(),
                username: "grace".to_string(),
                full_name: "Grace Hopper".to_string(),
                initials: "GH".to_string(),
                bio: String::new(),
            },
        ];
        let member_ids: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
        Self {
            organizations: vec![Organization {
                id: "o-engines".to_string(),
                name: "engines".to_string(),
                display_name: "Analytical Engines".to_string(),
                desc: "Difference and analytical".to_string(),
                member_ids: member_ids.clone(),
            }],
            boards: vec![Board {
                id: "b-roadmap".to_string(),
                name: "Roadmap".to_string(),
                desc: "What ships when".to_string(),
                closed: false,
                id_organization: Some("o-engines".to_string()),
                url: "https://trello.com/b/roadmap".to_string(),
                label_names: BTreeMap::from([
                    ("green".to_string(), "Done".to_string()),
                    ("red".to_string(), "Urgent".to_string()),
                    ("blue".to_string(), String::new()),
                ]),
                member_ids: member_ids.clone(),
            }],
            lists: vec![
                List {
                    id: "l-todo".to_string(),
                    name: "Todo".to_string(),
                    id_board: "b-roadmap".to_string(),
                    closed: false,
                    pos: 1024.0,
                },
                List {
                    id: "l-done".to_string(),
                    name: "Done".to_string(),
                    id_board: "b-roadmap".to_string(),
                    closed: false,
                    pos: 2048.0,
                },
            ],
            cards: vec![Card {
                id: "c-docs".to_string(),
                name: "Write docs".to_string(),
                desc: "User guide".to_string(),
                id_list: "l-todo".to_string(),
                id_board: "b-roadmap".to_string(),
                id_members: vec![ME_ID.to_string()],
                id_labels: vec!["lb-urgent".to_string()],
                custom_field_items: vec![
                    CustomFieldItem {
                        id: "cfi-1".to_string(),
                        id_custom_field: "cf-pld".to_string(),
                        value: BTreeMap::from([("number".to_string(), "7".to_string())]),
                    },
                    CustomFieldItem {
                        id: "cfi-2".to_string(),
                        id_custom_field: "cf-project".to_string(),
                        value: BTreeMap::from([("text".to_string(), "Apollo".to_string())]),
                    },
                ],
                url: "https://trello.com/c/docs/1-write-docs".to_string(),
                short_url: "https://trello.com/c/docs".to_string(),
                ..Card::default()
            }],
            custom_fields: vec![
                CustomField {
                    id: "cf-pld".to_string(),
                    id_model: "b-roadmap".to_string(),
                    name: "PLD".to_string(),
                    field_type: "number".to_string(),
                },
                CustomField {
                    id: "cf-project".to_string(),
                    id_model: "b-roadmap".to_string(),
                    name: "Project".to_string(),
                    field_type: "text".to_string(),
                },
            ],
            labels: vec![Label {
                id: "lb-urgent".to_string(),
                id_board: "b-roadmap".to_string(),
                name: "Urgent".to_string(),
                color: Some("red".to_string()),
            }],
            members,
            attachments: Vec::new(),
            checklists: Vec::new(),
        }
    }

    fn member(&self, id_or_username: &str) -> Option<&Member> {
        let id = if id_or_username == "me" { ME_ID } else { id_or_username };
        self.members
            .iter()
            .find(|m| m.id == id || m.username == id)
    }

    fn organization(&self, id_or_name: &str) -> Option<&Organization> {
        self.organizations
            .iter()
            .find(|o| o.id == id_or_name || o.name == id_or_name)
    }

    fn board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    fn members_by_id(&self, ids: &[String]) -> Vec<Member> {
        self.members
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

type Failure = (StatusCode, String);
type Reply<T> = Result<Json<T>, Failure>;
type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/members/{id}", get(get_member))
        .route("/members/{id}/boards", get(member_boards))
        .route("/members/{id}/organizations", get(member_organizations))
        .route("/organization/{id}/members", get(organization_members))
        .route("/organization/{id}/boards", get(organization_boards))
        .route("/boards/{id}", get(get_board))
        .route("/boards/{id}/lists", get(board_lists))
        .route("/boards/{id}/customFields", get(board_custom_fields))
        .route("/boards/{id}/labels", get(board_labels))
        .route("/boards/{id}/members", get(board_members))
        .route("/list/{id}/cards", get(list_cards))
        .route("/cards", post(create_card))
        .route("/cards/{id}/members", get(card_members))
        .route("/cards/{id}/labels", get(card_labels).post(add_card_label))
        .route(
            "/cards/{id}/attachments",
            get(card_attachments).post(add_card_attachment),
        )
        .route("/cards/{id}/checklists", get(card_checklists))
        .route(
            "/cards/{id}/customField/{field_id}/item",
            put(set_custom_field_item),
        )
        .route("/checklists", post(create_checklist))
        .route("/checklists/{id}/checkItems", post(create_check_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn check_credentials(key: Option<&str>, token: Option<&str>) -> Result<(), Failure> {
    if key != Some(APPLICATION_KEY) {
        return Err((StatusCode::UNAUTHORIZED, "invalid key".to_string()));
    }
    if token != Some(MEMBER_TOKEN) {
        return Err((StatusCode::UNAUTHORIZED, "invalid token".to_string()));
    }
    Ok(())
}

fn authorize(params: &HashMap<String, String>) -> Result<(), Failure> {
    check_credentials(
        params.get("key").map(String::as_str),
        params.get("token").map(String::as_str),
    )
}

fn not_found(what: &str) -> Failure {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

fn bad_request(reason: &str) -> Failure {
    (StatusCode::BAD_REQUEST, reason.to_string())
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// Members & organizations
// ---------------------------------------------------------------------------

async fn get_member(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Member> {
    authorize(&params)?;
    let store = db.read().await;
    store.member(&id).cloned().map(Json).ok_or_else(|| not_found("member"))
}

async fn member_boards(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Board>> {
    authorize(&params)?;
    let store = db.read().await;
    let member = store.member(&id).ok_or_else(|| not_found("member"))?;
    Ok(Json(
        store
            .boards
            .iter()
            .filter(|b| b.member_ids.contains(&member.id))
            .cloned()
            .collect(),
    ))
}

async fn member_organizations(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Organization>> {
    authorize(&params)?;
    let store = db.read().await;
    let member = store.member(&id).ok_or_else(|| not_found("member"))?;
    Ok(Json(
        store
            .organizations
            .iter()
            .filter(|o| o.member_ids.contains(&member.id))
            .cloned()
            .collect(),
    ))
}

async fn organization_members(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Member>> {
    authorize(&params)?;
    let store = db.read().await;
    let org = store.organization(&id).ok_or_else(|| not_found("organization"))?;
    Ok(Json(store.members_by_id(&org.member_ids)))
}

async fn organization_boards(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Board>> {
    authorize(&params)?;
    let store = db.read().await;
    let org = store.organization(&id).ok_or_else(|| not_found("organization"))?;
    Ok(Json(
        store
            .boards
            .iter()
            .filter(|b| b.id_organization.as_deref() == Some(org.id.as_str()))
            .cloned()
            .collect(),
    ))
}

// ---------------------------------------------------------------------------
// Boards & lists
// ---------------------------------------------------------------------------

async fn get_board(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Board> {
    authorize(&params)?;
    let store = db.read().await;
    store.board(&id).cloned().map(Json).ok_or_else(|| not_found("board"))
}

async fn board_lists(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<List>> {
    authorize(&params)?;
    let store = db.read().await;
    store.board(&id).ok_or_else(|| not_found("board"))?;
    Ok(Json(store.lists.iter().filter(|l| l.id_board == id).cloned().collect()))
}

async fn board_custom_fields(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<CustomField>> {
    authorize(&params)?;
    let store = db.read().await;
    store.board(&id).ok_or_else(|| not_found("board"))?;
    Ok(Json(
        store
            .custom_fields
            .iter()
            .filter(|f| f.id_model == id)
            .cloned()
            .collect(),
    ))
}

async fn board_labels(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Label>> {
    authorize(&params)?;
    let store = db.read().await;
    store.board(&id).ok_or_else(|| not_found("board"))?;
    Ok(Json(store.labels.iter().filter(|l| l.id_board == id).cloned().collect()))
}

async fn board_members(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Member>> {
    authorize(&params)?;
    let store = db.read().await;
    let board = store.board(&id).ok_or_else(|| not_found("board"))?;
    Ok(Json(store.members_by_id(&board.member_ids)))
}

async fn list_cards(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Card>> {
    authorize(&params)?;
    let store = db.read().await;
    if !store.lists.iter().any(|l| l.id == id) {
        return Err(not_found("list"));
    }
    Ok(Json(store.cards.iter().filter(|c| c.id_list == id).cloned().collect()))
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateCard {
    pub name: String,
    #[serde(rename = "idList")]
    pub id_list: String,
    pub due: Option<String>,
    pub desc: Option<String>,
}

async fn create_card(
    State(db): State<Db>,
    Query(params): Params,
    Form(input): Form<CreateCard>,
) -> Reply<Card> {
    authorize(&params)?;
    let mut store = db.write().await;
    let list = store
        .lists
        .iter()
        .find(|l| l.id == input.id_list)
        .ok_or_else(|| bad_request("invalid value for idList"))?;
    let due = input.due.as_deref().map(iso_due).transpose()?;
    let id = new_id("c");
    let card = Card {
        name: input.name,
        desc: input.desc.unwrap_or_default(),
        id_list: list.id.clone(),
        id_board: list.id_board.clone(),
        due,
        url: format!("https://trello.com/c/{id}"),
        short_url: format!("https://trello.com/c/{id}"),
        id,
        ..Card::default()
    };
    store.cards.push(card.clone());
    Ok(Json(card))
}

/// `yyyy.MM.dd` as sent by the client to the ISO timestamp the API answers with.
fn iso_due(raw: &str) -> Result<String, Failure> {
    let parts: Vec<&str> = raw.split('.').collect();
    match parts.as_slice() {
        [y, m, d] if y.len() == 4 && m.len() == 2 && d.len() == 2 => {
            Ok(format!("{y}-{m}-{d}T00:00:00.000Z"))
        }
        _ => Err(bad_request("invalid value for due")),
    }
}

async fn card_members(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Member>> {
    authorize(&params)?;
    let store = db.read().await;
    let card = store
        .cards
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("card"))?;
    Ok(Json(store.members_by_id(&card.id_members)))
}

async fn card_labels(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Label>> {
    authorize(&params)?;
    let store = db.read().await;
    let card = store
        .cards
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("card"))?;
    Ok(Json(
        store
            .labels
            .iter()
            .filter(|l| card.id_labels.contains(&l.id))
            .cloned()
            .collect(),
    ))
}

#[derive(Deserialize)]
pub struct AddLabel {
    pub value: String,
}

/// Attaches the board label whose lower-cased name matches `value`,
/// creating a colorless one when the board has none.
async fn add_card_label(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
    Form(input): Form<AddLabel>,
) -> Reply<Vec<String>> {
    authorize(&params)?;
    let mut store = db.write().await;
    let board_id = store
        .cards
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.id_board.clone())
        .ok_or_else(|| not_found("card"))?;
    let existing = store
        .labels
        .iter()
        .find(|l| l.id_board == board_id && l.name.to_lowercase() == input.value)
        .map(|l| l.id.clone());
    let label_id = match existing {
        Some(label_id) => label_id,
        None => {
            let label = Label {
                id: new_id("lb"),
                id_board: board_id,
                name: input.value,
                color: None,
            };
            let label_id = label.id.clone();
            store.labels.push(label);
            label_id
        }
    };
    let card = store.card_mut(&id).ok_or_else(|| not_found("card"))?;
    if !card.id_labels.contains(&label_id) {
        card.id_labels.push(label_id);
    }
    Ok(Json(card.id_labels.clone()))
}

async fn card_attachments(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<Attachment>> {
    authorize(&params)?;
    let store = db.read().await;
    if !store.cards.iter().any(|c| c.id == id) {
        return Err(not_found("card"));
    }
    Ok(Json(
        store
            .attachments
            .iter()
            .filter(|a| a.id_card == id)
            .cloned()
            .collect(),
    ))
}

/// Accepts either a multipart upload (`name` + `file`) or a form with
/// `name` + `url`.
async fn add_card_attachment(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
    request: axum::extract::Request,
) -> Reply<Attachment> {
    authorize(&params)?;
    let content_type = request
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut name = String::new();
    let mut url = None;
    let mut bytes = None;
    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| bad_request(&e.to_string()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| bad_request(&e.to_string()))?
        {
            match field.name().unwrap_or_default() {
                "name" => name = field.text().await.map_err(|e| bad_request(&e.to_string()))?,
                "file" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let data = field.bytes().await.map_err(|e| bad_request(&e.to_string()))?;
                    url = Some(format!("https://trello.com/attachments/{file_name}"));
                    bytes = Some(data.len());
                }
                _ => {}
            }
        }
    } else {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .map_err(|e| bad_request(&e.to_string()))?;
        name = fields.get("name").cloned().unwrap_or_default();
        url = fields.get("url").cloned();
    }
    let url = url.ok_or_else(|| bad_request("either url or file is required"))?;

    let mut store = db.write().await;
    if !store.cards.iter().any(|c| c.id == id) {
        return Err(not_found("card"));
    }
    let attachment = Attachment {
        id: new_id("a"),
        id_member: ME_ID.to_string(),
        name,
        url,
        bytes,
        id_card: id,
    };
    store.attachments.push(attachment.clone());
    Ok(Json(attachment))
}

async fn card_checklists(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
) -> Reply<Vec<CheckList>> {
    authorize(&params)?;
    let store = db.read().await;
    if !store.cards.iter().any(|c| c.id == id) {
        return Err(not_found("card"));
    }
    Ok(Json(
        store
            .checklists
            .iter()
            .filter(|c| c.id_card == id)
            .cloned()
            .collect(),
    ))
}

/// Credentials travel inside the JSON body on this route.
#[derive(Deserialize)]
pub struct SetCustomFieldItem {
    pub value: BTreeMap<String, String>,
    pub key: Option<String>,
    pub token: Option<String>,
}

async fn set_custom_field_item(
    State(db): State<Db>,
    Path((card_id, field_id)): Path<(String, String)>,
    Json(input): Json<SetCustomFieldItem>,
) -> Reply<CustomFieldItem> {
    check_credentials(input.key.as_deref(), input.token.as_deref())?;
    let mut store = db.write().await;
    if !store.custom_fields.iter().any(|f| f.id == field_id) {
        return Err(not_found("custom field"));
    }
    let card = store.card_mut(&card_id).ok_or_else(|| not_found("card"))?;
    let item = match card
        .custom_field_items
        .iter_mut()
        .find(|i| i.id_custom_field == field_id)
    {
        Some(item) => {
            item.value = input.value;
            item.clone()
        }
        None => {
            let item = CustomFieldItem {
                id: new_id("cfi"),
                id_custom_field: field_id,
                value: input.value,
            };
            card.custom_field_items.push(item.clone());
            item
        }
    };
    Ok(Json(item))
}

// ---------------------------------------------------------------------------
// Checklists
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateChecklist {
    #[serde(rename = "idCard")]
    pub id_card: String,
    pub name: String,
}

async fn create_checklist(
    State(db): State<Db>,
    Query(params): Params,
    Form(input): Form<CreateChecklist>,
) -> Reply<CheckList> {
    authorize(&params)?;
    let mut store = db.write().await;
    if !store.cards.iter().any(|c| c.id == input.id_card) {
        return Err(bad_request("invalid value for idCard"));
    }
    let existing = store
        .checklists
        .iter()
        .filter(|c| c.id_card == input.id_card)
        .count();
    let pos = 16384.0 * (existing + 1) as f64;
    let checklist = CheckList {
        id: new_id("cl"),
        name: input.name,
        id_card: input.id_card,
        pos,
        check_items: Vec::new(),
    };
    store.checklists.push(checklist.clone());
    Ok(Json(checklist))
}

#[derive(Deserialize)]
pub struct CreateCheckItem {
    pub name: String,
    #[serde(default)]
    pub checked: Option<String>,
}

async fn create_check_item(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(params): Params,
    Form(input): Form<CreateCheckItem>,
) -> Reply<CheckItem> {
    authorize(&params)?;
    let mut store = db.write().await;
    let checklist = store
        .checklists
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| not_found("checklist"))?;
    let state = match input.checked.as_deref() {
        Some("true") => "complete",
        _ => "incomplete",
    };
    let item = CheckItem {
        id: new_id("ci"),
        name: input.name,
        pos: 16384.0 * (checklist.check_items.len() + 1) as f64,
        state: state.to_string(),
    };
    checklist.check_items.push(item.clone());
    Ok(Json(item))
}
