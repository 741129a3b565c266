//! Request options and response types for the Skrybe API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recipients of a transactional email.
///
/// A single address is sent verbatim; a list is sent as a JSON array and
/// each entry is format-checked before sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Recipients {
    fn from(value: &str) -> Self {
        Recipients::One(value.to_string())
    }
}

impl From<String> for Recipients {
    fn from(value: String) -> Self {
        Recipients::One(value)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(value: Vec<String>) -> Self {
        Recipients::Many(value)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(value: Vec<&str>) -> Self {
        Recipients::Many(value.into_iter().map(str::to_string).collect())
    }
}

/// Options for [`Client::send_email`](crate::Client::send_email).
///
/// `from_name`, `from_email`, `subject` and `html_text` are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendEmailOptions {
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub reply_to: Option<String>,
    pub subject: Option<String>,
    pub html_text: Option<String>,
    pub plain_text: Option<String>,
    pub to: Option<Recipients>,
    /// Per-recipient substitution variables, sent as a JSON object.
    pub recipient_variables: Option<Map<String, Value>>,
    /// Sent comma-joined, e.g. `1,2,3`.
    pub list_ids: Option<Vec<String>>,
    pub query_string: Option<String>,
    pub track_opens: Option<bool>,
    pub track_clicks: Option<bool>,
    pub schedule_date_time: Option<String>,
    pub schedule_timezone: Option<String>,
}

/// Options for [`Client::create_campaign`](crate::Client::create_campaign).
///
/// `from_name`, `from_email`, `title`, `subject` and `html_text` are required.
/// ID lists are sent as JSON arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignOptions {
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub reply_to: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub html_text: Option<String>,
    pub plain_text: Option<String>,
    pub list_ids: Option<Vec<String>>,
    pub segment_ids: Option<Vec<String>>,
    pub exclude_list_ids: Option<Vec<String>>,
    pub exclude_segment_ids: Option<Vec<String>>,
    pub query_string: Option<String>,
    pub track_opens: Option<bool>,
    pub track_clicks: Option<bool>,
    /// Send immediately instead of saving as a draft.
    pub send_campaign: Option<bool>,
    pub schedule_date_time: Option<String>,
    pub schedule_timezone: Option<String>,
}

/// Paging and filtering for campaign and subscriber listings.
///
/// Unset `page` and `limit` default to 1 and 10.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageOptions {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
}

impl PageOptions {
    pub(crate) const DEFAULT_PAGE: u32 = 1;
    pub(crate) const DEFAULT_LIMIT: u32 = 10;

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A subscriber to add to a list.
///
/// Custom fields are sent under their own names; strings and scalars as
/// text, arrays and objects as JSON, nulls omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscriber {
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Subscriber {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a custom field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Body of a Skrybe API response.
///
/// The service does not promise a schema, so the body is kept as parsed
/// JSON when it is an object and as text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    /// Empty body.
    Empty,
    /// JSON object body.
    Structured(Map<String, Value>),
    /// Any other body, verbatim.
    Raw(String),
}

impl ApiResponse {
    /// Interpret a response body.
    pub(crate) fn from_body(body: String) -> Self {
        if body.is_empty() {
            return ApiResponse::Empty;
        }
        match serde_json::from_str::<Map<String, Value>>(&body) {
            Ok(map) => ApiResponse::Structured(map),
            Err(_) => ApiResponse::Raw(body),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ApiResponse::Empty)
    }

    /// Look up a top-level key of a structured body.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_structured().and_then(|map| map.get(key))
    }

    pub fn as_structured(&self) -> Option<&Map<String, Value>> {
        match self {
            ApiResponse::Structured(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ApiResponse::Raw(text) => Some(text),
            _ => None,
        }
    }

    /// The `status` key of a structured body, when it is a string.
    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ApiResponse::Empty => "empty",
            ApiResponse::Structured(_) => "structured",
            ApiResponse::Raw(_) => "raw",
        }
    }
}
