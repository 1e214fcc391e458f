//! One builder per remote endpoint.
//!
//! # Design
//! An `ApiRequest` is a verb, a URL template with `{name}` placeholders, the
//! values for those placeholders, the request parameters and an optional
//! body. Endpoint builders are layered: a base builder fixes the resource
//! family (`boards/{boardId}/...`, `cards/{cardId}/...`), and the specific
//! builders pass the sub-resource and add their own parameters.
//!
//! Parameters travel in the query string on GET and in a form body on
//! POST/PUT. `ApiBody::PutJson` marks the single request shape whose JSON
//! body also has to carry the application key and token.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::custom_field::CustomFieldValue;
use crate::http::HttpMethod;
use crate::types::{AttachmentPayload, Label, NewAttachment, NewCard, NewCheckItem};

/// Where the bytes of an uploaded file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Read at dispatch time.
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// File attached to a request as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub field: String,
    pub file_name: String,
    pub source: FileSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    /// Parameters only.
    None,
    /// JSON object that receives `key` and `token` right before dispatch.
    PutJson(Map<String, Value>),
    /// Parameters plus one file, sent as multipart.
    File(FileUpload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub template: String,
    pub segments: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub body: ApiBody,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, template: impl Into<String>) -> Self {
        Self {
            method,
            template: template.into(),
            segments: Vec::new(),
            params: Vec::new(),
            body: ApiBody::None,
        }
    }

    pub fn get(template: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, template)
    }

    pub fn segment(mut self, name: &str, value: &str) -> Self {
        self.segments.push((name.to_string(), value.to_string()));
        self
    }

    pub fn param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: ApiBody) -> Self {
        self.body = body;
        self
    }

    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Template with every `{name}` replaced by its percent-encoded value.
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .fold(self.template.clone(), |path, (name, value)| {
                path.replace(&format!("{{{name}}}"), &urlencoding::encode(value))
            })
    }
}

/// `base/{placeholder}` or `base/{placeholder}/resource`.
fn resource_template(base: &str, placeholder: &str, resource: &str) -> String {
    if resource.is_empty() {
        format!("{base}/{{{placeholder}}}")
    } else {
        format!("{base}/{{{placeholder}}}/{resource}")
    }
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

pub fn boards(board_id: &str, resource: &str, method: HttpMethod) -> ApiRequest {
    ApiRequest::new(method, resource_template("boards", "boardId", resource))
        .segment("boardId", board_id)
}

pub fn board(board_id: &str) -> ApiRequest {
    boards(board_id, "", HttpMethod::Get)
}

pub fn lists_for_board(board_id: &str) -> ApiRequest {
    boards(board_id, "lists", HttpMethod::Get)
}

pub fn custom_fields_for_board(board_id: &str) -> ApiRequest {
    boards(board_id, "customFields", HttpMethod::Get)
}

pub fn labels_for_board(board_id: &str) -> ApiRequest {
    boards(board_id, "labels", HttpMethod::Get)
}

pub fn members_of_board(board_id: &str) -> ApiRequest {
    boards(board_id, "members", HttpMethod::Get)
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

pub fn lists(list_id: &str, resource: &str, method: HttpMethod) -> ApiRequest {
    ApiRequest::new(method, resource_template("list", "listId", resource))
        .segment("listId", list_id)
}

/// Cards of a list, expanded so one round trip returns fully populated cards.
pub fn cards_for_list(list_id: &str) -> ApiRequest {
    lists(list_id, "cards", HttpMethod::Get)
        .param("labels", "true")
        .param("badges", "true")
        .param("checkItemStates", "true")
        .param("attachments", "true")
        .param("checklists", "all")
        .param("customFieldItems", "true")
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

pub fn cards(card_id: &str, resource: &str, method: HttpMethod) -> ApiRequest {
    ApiRequest::new(method, resource_template("cards", "cardId", resource))
        .segment("cardId", card_id)
        .param("badges", "true")
}

/// `None` when the card has no name or no list; nothing should be sent.
pub fn add_card(card: &NewCard) -> Option<ApiRequest> {
    if card.name.is_empty() || card.list_id.is_empty() {
        return None;
    }
    let mut request = ApiRequest::new(HttpMethod::Post, "cards")
        .param("name", card.name.as_str())
        .param("idList", card.list_id.as_str());
    if let Some(due) = card.due {
        request = request.param("due", due.format("%Y.%m.%d").to_string());
    }
    if let Some(description) = card.description.as_deref().filter(|d| !d.is_empty()) {
        request = request.param("desc", description);
    }
    Some(request)
}

pub fn members_of_card(card_id: &str) -> ApiRequest {
    cards(card_id, "members", HttpMethod::Get)
}

pub fn set_custom_field_item(
    card_id: &str,
    field_id: &str,
    value: &CustomFieldValue,
) -> ApiRequest {
    let mut body = Map::new();
    body.insert("value".to_string(), value.to_wire());
    ApiRequest::new(HttpMethod::Put, "cards/{cardId}/customField/{fieldId}/item")
        .segment("cardId", card_id)
        .segment("fieldId", field_id)
        .body(ApiBody::PutJson(body))
}

pub fn labels_of_card(card_id: &str) -> ApiRequest {
    cards(card_id, "labels", HttpMethod::Get)
}

pub fn add_label(card_id: &str, label: &Label) -> ApiRequest {
    cards(card_id, "labels", HttpMethod::Post).param("value", label.name.to_lowercase())
}

pub fn attachments_of_card(card_id: &str) -> ApiRequest {
    cards(card_id, "attachments", HttpMethod::Get)
}

pub fn add_attachment(card_id: &str, attachment: &NewAttachment) -> ApiRequest {
    let request =
        cards(card_id, "attachments", HttpMethod::Post).param("name", attachment.name.as_str());
    match &attachment.payload {
        AttachmentPayload::FilePath(path) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| attachment.name.clone());
            request.body(ApiBody::File(FileUpload {
                field: "file".to_string(),
                file_name,
                source: FileSource::Path(path.clone()),
            }))
        }
        AttachmentPayload::Url(url) => request.param("url", url.as_str()),
        AttachmentPayload::Bytes(contents) => request.body(ApiBody::File(FileUpload {
            field: "file".to_string(),
            file_name: attachment.name.clone(),
            source: FileSource::Bytes(contents.clone()),
        })),
    }
}

pub fn checklists_of_card(card_id: &str) -> ApiRequest {
    cards(card_id, "checklists", HttpMethod::Get)
}

pub fn add_checklist(card_id: &str, name: &str) -> ApiRequest {
    ApiRequest::new(HttpMethod::Post, "checklists")
        .param("idCard", card_id)
        .param("name", name)
}

pub fn add_check_item(checklist_id: &str, item: &NewCheckItem) -> ApiRequest {
    ApiRequest::new(HttpMethod::Post, "checklists/{checklistId}/checkItems")
        .segment("checklistId", checklist_id)
        .param("name", item.name.as_str())
        .param("checked", item.checked.to_string())
}

// ---------------------------------------------------------------------------
// Members & organizations
// ---------------------------------------------------------------------------

pub fn members(member: &str, resource: &str) -> ApiRequest {
    ApiRequest::get(resource_template("members", "memberIdOrUsername", resource))
        .segment("memberIdOrUsername", member)
}

pub fn member(member: &str) -> ApiRequest {
    members(member, "")
}

pub fn boards_for_member(member: &str) -> ApiRequest {
    members(member, "boards")
}

pub fn organizations_for_member(member: &str) -> ApiRequest {
    members(member, "organizations")
}

pub fn organization(org: &str, resource: &str) -> ApiRequest {
    ApiRequest::get(resource_template("organization", "orgId", resource)).segment("orgId", org)
}

pub fn members_of_organization(org: &str) -> ApiRequest {
    organization(org, "members")
}

pub fn boards_of_organization(org: &str) -> ApiRequest {
    organization(org, "boards")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::types::LabelColor;

    #[test]
    fn cards_for_list_requests_expansions() {
        let req = cards_for_list("L1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path(), "list/L1/cards");
        for (name, value) in [
            ("labels", "true"),
            ("badges", "true"),
            ("checkItemStates", "true"),
            ("attachments", "true"),
            ("checklists", "all"),
            ("customFieldItems", "true"),
        ] {
            assert_eq!(req.param_value(name), Some(value), "{name}");
        }
    }

    #[test]
    fn card_resources_always_ask_for_badges() {
        let req = labels_of_card("c1");
        assert_eq!(req.path(), "cards/c1/labels");
        assert_eq!(req.param_value("badges"), Some("true"));
    }

    #[test]
    fn empty_resource_has_no_trailing_slash() {
        assert_eq!(board("B1").path(), "boards/B1");
        assert_eq!(member("me").path(), "members/me");
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(
            boards_of_organization("acme corp/x").path(),
            "organization/acme%20corp%2Fx/boards"
        );
    }

    #[test]
    fn add_card_minimal_params() {
        let req = add_card(&NewCard::new("Task A").in_list("L1")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path(), "cards");
        assert_eq!(
            req.params,
            vec![
                ("name".to_string(), "Task A".to_string()),
                ("idList".to_string(), "L1".to_string()),
            ]
        );
    }

    #[test]
    fn add_card_with_due_and_description() {
        let card = NewCard::new("Task A")
            .in_list("L1")
            .with_due(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_description("x");
        let req = add_card(&card).unwrap();
        assert_eq!(req.param_value("due"), Some("2024.03.01"));
        assert_eq!(req.param_value("desc"), Some("x"));
    }

    #[test]
    fn add_card_without_name_or_list_is_none() {
        assert!(add_card(&NewCard::new("").in_list("L1")).is_none());
        assert!(add_card(&NewCard::new("Task")).is_none());
    }

    #[test]
    fn custom_field_item_is_put_json() {
        let req = set_custom_field_item("c1", "f1", &CustomFieldValue::from(42));
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path(), "cards/c1/customField/f1/item");
        let ApiBody::PutJson(body) = &req.body else {
            panic!("expected PutJson body");
        };
        assert_eq!(Value::Object(body.clone()), json!({"value": {"number": "42"}}));
    }

    #[test]
    fn add_label_lowercases_name() {
        let req = add_label("c1", &Label::new("Urgent", LabelColor::Red));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.param_value("value"), Some("urgent"));
    }

    #[test]
    fn add_attachment_dispatches_on_payload() {
        let url = add_attachment("c1", &NewAttachment::url("Spec", "https://example.com/s"));
        assert_eq!(url.param_value("name"), Some("Spec"));
        assert_eq!(url.param_value("url"), Some("https://example.com/s"));
        assert_eq!(url.body, ApiBody::None);

        let bytes = add_attachment("c1", &NewAttachment::bytes("notes.txt", b"hi".to_vec()));
        assert_eq!(
            bytes.body,
            ApiBody::File(FileUpload {
                field: "file".to_string(),
                file_name: "notes.txt".to_string(),
                source: FileSource::Bytes(b"hi".to_vec()),
            })
        );

        let file = add_attachment("c1", &NewAttachment::file("Report", "/tmp/out/report.pdf"));
        let ApiBody::File(upload) = &file.body else {
            panic!("expected file body");
        };
        assert_eq!(upload.file_name, "report.pdf");
        assert_eq!(upload.source, FileSource::Path(PathBuf::from("/tmp/out/report.pdf")));
        assert!(file.param_value("url").is_none());
    }

    #[test]
    fn checklist_builders() {
        let req = add_checklist("c1", "QA");
        assert_eq!(req.path(), "checklists");
        assert_eq!(req.param_value("idCard"), Some("c1"));
        assert_eq!(req.param_value("name"), Some("QA"));

        let req = add_check_item("cl1", &NewCheckItem::new("Write tests", true));
        assert_eq!(req.path(), "checklists/cl1/checkItems");
        assert_eq!(req.param_value("checked"), Some("true"));
    }
}
