//! Domain entities as the API returns them, plus the input types used to
//! create new ones.
//!
//! # Design
//! Entities are plain data. They never hold the client; pairing with a
//! client happens in `Bound` after decoding. Every struct is
//! `#[serde(default)]` so responses that omit fields (the API trims fields
//! per endpoint) still decode.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub closed: bool,
    pub id_organization: Option<String>,
    pub url: String,
    /// Label color key (`"green"`, ...) to the name the board gives it.
    pub label_names: BTreeMap<String, String>,
}

impl Board {
    /// Named labels of the board keyed by label name. Colors with an empty
    /// name or a key outside the ten known colors are skipped.
    pub fn on_board_labels(&self) -> BTreeMap<String, Label> {
        self.label_names
            .iter()
            .filter(|(_, name)| !name.is_empty())
            .filter_map(|(color, name)| {
                LabelColor::from_name(color).map(|color| (name.clone(), Label::new(name, color)))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(rename = "idBoard")]
    pub board_id: String,
    pub closed: bool,
    /// Ordering key within the board.
    pub pos: f64,
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub closed: bool,
    #[serde(rename = "idList")]
    pub list_id: String,
    #[serde(rename = "idBoard")]
    pub board_id: String,
    #[serde(rename = "idMembers")]
    pub member_ids: Vec<String>,
    pub due: Option<DateTime<Utc>>,
    pub custom_field_items: Vec<CustomFieldItem>,
    pub url: String,
    pub short_url: String,
    pub date_last_activity: Option<DateTime<Utc>>,
}

/// A card that does not exist yet, passed to `Cards::add`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCard {
    pub name: String,
    pub list_id: String,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
}

impl NewCard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_list(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = list_id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }
}

// ---------------------------------------------------------------------------
// Custom fields
// ---------------------------------------------------------------------------

/// Declared type of a custom field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldType {
    #[default]
    Text,
    Number,
    #[serde(alias = "checked")]
    Checkbox,
    Date,
    List,
}

impl CustomFieldType {
    /// Key under which a `CustomFieldItem` stores a value of this type.
    pub fn value_key(&self) -> &'static str {
        match self {
            CustomFieldType::Text => "text",
            CustomFieldType::Number => "number",
            CustomFieldType::Checkbox => "checked",
            CustomFieldType::Date => "date",
            CustomFieldType::List => "list",
        }
    }
}

/// Board-level definition of a custom field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomField {
    pub id: String,
    pub id_model: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
}

/// A card's value for one custom field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomFieldItem {
    pub id: String,
    /// Exactly one key is populated, matching the field's type.
    #[serde(deserialize_with = "null_as_default")]
    pub value: BTreeMap<String, String>,
    pub id_custom_field: String,
}

impl CustomFieldItem {
    pub fn value_for(&self, field_type: CustomFieldType) -> Option<&str> {
        self.value.get(field_type.value_key()).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// The ten label colors the API knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Blue,
    Sky,
    Lime,
    Pink,
    Black,
}

impl LabelColor {
    pub const ALL: [LabelColor; 10] = [
        LabelColor::Green,
        LabelColor::Yellow,
        LabelColor::Orange,
        LabelColor::Red,
        LabelColor::Purple,
        LabelColor::Blue,
        LabelColor::Sky,
        LabelColor::Lime,
        LabelColor::Pink,
        LabelColor::Black,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelColor::Green => "green",
            LabelColor::Yellow => "yellow",
            LabelColor::Orange => "orange",
            LabelColor::Red => "red",
            LabelColor::Purple => "purple",
            LabelColor::Blue => "blue",
            LabelColor::Sky => "sky",
            LabelColor::Lime => "lime",
            LabelColor::Pink => "pink",
            LabelColor::Black => "black",
        }
    }

    /// Display color as RGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            LabelColor::Green => (0, 128, 0),
            LabelColor::Yellow => (255, 255, 0),
            LabelColor::Orange => (255, 165, 0),
            LabelColor::Red => (255, 0, 0),
            LabelColor::Purple => (128, 0, 128),
            LabelColor::Blue => (0, 0, 255),
            LabelColor::Sky => (135, 206, 235),
            LabelColor::Lime => (0, 255, 0),
            LabelColor::Pink => (255, 192, 203),
            LabelColor::Black => (0, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub name: String,
    /// `None` for colorless labels and colors outside `LabelColor`.
    #[serde(deserialize_with = "lenient_color")]
    pub color: Option<LabelColor>,
}

impl Label {
    pub fn new(name: impl Into<String>, color: LabelColor) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            color: Some(color),
        }
    }
}

fn lenient_color<'de, D: Deserializer<'de>>(d: D) -> Result<Option<LabelColor>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().and_then(LabelColor::from_name))
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "idMember")]
    pub member_id: String,
    pub name: String,
    pub url: String,
    pub date: Option<DateTime<Utc>>,
}

/// Content of an attachment that is about to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentPayload {
    /// Upload the file at this path.
    FilePath(PathBuf),
    /// Link to a URL instead of uploading.
    Url(String),
    /// Upload these bytes under the attachment's name.
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub name: String,
    pub payload: AttachmentPayload,
}

impl NewAttachment {
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            payload: AttachmentPayload::FilePath(path.into()),
        }
    }

    pub fn url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: AttachmentPayload::Url(url.into()),
        }
    }

    pub fn bytes(name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            payload: AttachmentPayload::Bytes(contents),
        }
    }
}

// ---------------------------------------------------------------------------
// Checklists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckItemState {
    Complete,
    #[default]
    Incomplete,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckItem {
    pub id: String,
    pub name: String,
    pub pos: f64,
    pub state: CheckItemState,
}

impl CheckItem {
    pub fn is_checked(&self) -> bool {
        self.state == CheckItemState::Complete
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCheckItem {
    pub name: String,
    pub checked: bool,
}

impl NewCheckItem {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
        }
    }
}

/// A checklist and its items, in position order as returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckList {
    pub id: String,
    pub name: String,
    #[serde(rename = "idCard")]
    pub card_id: String,
    pub pos: f64,
    pub check_items: Vec<CheckItem>,
}

impl CheckList {
    /// Item at `index` in the checklist's order.
    pub fn item_at(&self, index: usize) -> Option<&CheckItem> {
        self.check_items.get(index)
    }

    pub fn item(&self, name: &str) -> Option<&CheckItem> {
        self.check_items.iter().find(|item| item.name == name)
    }
}

// ---------------------------------------------------------------------------
// Organizations & members
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub display_name: String,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub url: String,
    pub website: Option<String>,
    pub logo_hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub url: String,
    pub avatar_hash: Option<String>,
    pub initials: String,
}
