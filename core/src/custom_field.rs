//! Custom-field values and the card accessors that read and write them.
//!
//! # Design
//! The wire shape of a custom-field update depends on the kind of value:
//! `{"number": ..}`, `{"checked": ..}`, `{"text": ..}`, `{"list": ..}` or
//! `{"date": ..}`, always with the value stringified. `CustomFieldValue`
//! fixes the kind when the value is constructed; the `From` impls pick the
//! kind from the Rust type, and `Other` is the explicit catch-all that
//! encodes as text.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::bound::Bound;
use crate::error::Result;
use crate::requests;
use crate::types::{Card, CustomField};

/// Name of the integer "task id" custom field.
pub const TASK_ID_FIELD: &str = "PLD";
/// Name of the text "project" custom field.
pub const PROJECT_FIELD: &str = "Project";

/// A value to store in a card's custom field.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomFieldValue {
    /// Integer or decimal, already stringified.
    Number(String),
    /// Stringified as `"true"` / `"false"`.
    Checked(bool),
    Text(String),
    /// Stringified by joining the elements with `,`.
    List(Vec<String>),
    /// Stringified as RFC 3339 with millisecond precision in UTC.
    Date(DateTime<Utc>),
    /// Anything else; sent as text.
    Other(String),
}

impl CustomFieldValue {
    pub fn wire_key(&self) -> &'static str {
        match self {
            CustomFieldValue::Number(_) => "number",
            CustomFieldValue::Checked(_) => "checked",
            CustomFieldValue::Text(_) | CustomFieldValue::Other(_) => "text",
            CustomFieldValue::List(_) => "list",
            CustomFieldValue::Date(_) => "date",
        }
    }

    pub fn stringify(&self) -> String {
        match self {
            CustomFieldValue::Number(n) => n.clone(),
            CustomFieldValue::Checked(b) => b.to_string(),
            CustomFieldValue::Text(s) | CustomFieldValue::Other(s) => s.clone(),
            CustomFieldValue::List(items) => items.join(","),
            CustomFieldValue::Date(d) => d.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// The `value` object of a custom-field update body.
    pub fn to_wire(&self) -> Value {
        let mut wire = Map::new();
        wire.insert(self.wire_key().to_string(), Value::String(self.stringify()));
        Value::Object(wire)
    }
}

impl From<i32> for CustomFieldValue {
    fn from(n: i32) -> Self {
        CustomFieldValue::Number(n.to_string())
    }
}

impl From<i64> for CustomFieldValue {
    fn from(n: i64) -> Self {
        CustomFieldValue::Number(n.to_string())
    }
}

impl From<u32> for CustomFieldValue {
    fn from(n: u32) -> Self {
        CustomFieldValue::Number(n.to_string())
    }
}

impl From<u64> for CustomFieldValue {
    fn from(n: u64) -> Self {
        CustomFieldValue::Number(n.to_string())
    }
}

impl From<f64> for CustomFieldValue {
    fn from(n: f64) -> Self {
        CustomFieldValue::Number(n.to_string())
    }
}

impl From<bool> for CustomFieldValue {
    fn from(b: bool) -> Self {
        CustomFieldValue::Checked(b)
    }
}

impl From<&str> for CustomFieldValue {
    fn from(s: &str) -> Self {
        CustomFieldValue::Text(s.to_string())
    }
}

impl From<String> for CustomFieldValue {
    fn from(s: String) -> Self {
        CustomFieldValue::Text(s)
    }
}

impl From<Vec<String>> for CustomFieldValue {
    fn from(items: Vec<String>) -> Self {
        CustomFieldValue::List(items)
    }
}

impl From<&[&str]> for CustomFieldValue {
    fn from(items: &[&str]) -> Self {
        CustomFieldValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<DateTime<Utc>> for CustomFieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        CustomFieldValue::Date(d)
    }
}

impl From<NaiveDate> for CustomFieldValue {
    fn from(d: NaiveDate) -> Self {
        CustomFieldValue::Date(d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
    }
}

// ---------------------------------------------------------------------------
// Card accessors
// ---------------------------------------------------------------------------

// Each accessor re-fetches the owning board and its field definitions on
// every call. Nothing is cached, so two reads cost four round trips.
impl<'c> Bound<'c, Card> {
    /// Definition of the board custom field called `name`, fetched fresh.
    pub fn custom_field_definition(&self, name: &str) -> Result<Option<CustomField>> {
        let Some(board) = self.board()? else {
            return Ok(None);
        };
        let fields = board.custom_fields()?;
        Ok(fields.into_iter().find(|field| field.name == name))
    }

    /// Raw value this card holds for the board field called `name`.
    ///
    /// Returns `None` without any request when the card has no custom-field
    /// items at all.
    pub fn custom_field_value(&self, name: &str) -> Result<Option<String>> {
        if self.custom_field_items.is_empty() {
            return Ok(None);
        }
        let Some(field) = self.custom_field_definition(name)? else {
            return Ok(None);
        };
        let value = self
            .custom_field_items
            .iter()
            .find(|item| item.id_custom_field == field.id)
            .and_then(|item| item.value_for(field.field_type))
            .map(str::to_string);
        Ok(value)
    }

    /// Store `value` in the board field called `name`.
    ///
    /// Returns `false` without writing when the board has no such field.
    pub fn set_custom_field(&self, name: &str, value: impl Into<CustomFieldValue>) -> Result<bool> {
        let Some(field) = self.custom_field_definition(name)? else {
            debug!(card = %self.id, field = name, "custom field not defined on board");
            return Ok(false);
        };
        let request = requests::set_custom_field_item(&self.id, &field.id, &value.into());
        self.client().request(&request)?;
        Ok(true)
    }

    /// Integer task id from the "PLD" field, 0 when unset.
    pub fn inner_system_task_id(&self) -> Result<i64> {
        let Some(raw) = self.custom_field_value(TASK_ID_FIELD)? else {
            return Ok(0);
        };
        match raw.trim().parse::<i64>() {
            Ok(id) => Ok(id),
            Err(_) => {
                warn!(card = %self.id, value = %raw, "task id is not an integer");
                Ok(0)
            }
        }
    }

    pub fn set_inner_system_task_id(&self, id: i64) -> Result<bool> {
        self.set_custom_field(TASK_ID_FIELD, id)
    }

    /// Text of the "Project" field, empty when unset.
    pub fn customer_project(&self) -> Result<String> {
        Ok(self.custom_field_value(PROJECT_FIELD)?.unwrap_or_default())
    }

    pub fn set_customer_project(&self, project: &str) -> Result<bool> {
        self.set_custom_field(PROJECT_FIELD, project)
    }
}
