//! Mapping from typed options to the service's form fields.

use crate::models::{CampaignOptions, PageOptions, Recipients, SendEmailOptions, Subscriber};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;

pub(crate) const API_KEY: &str = "api_key";
const LIST_ID: &str = "list_id";

/// Ordered form body. A key may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a text value; `None` is omitted.
    fn text(&mut self, key: &str, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            self.fields.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Append a list or map value as compact JSON; `None` is omitted.
    fn json<T: Serialize + ?Sized>(&mut self, key: &str, value: Option<&T>) -> Result<&mut Self> {
        if let Some(value) = value {
            let encoded = serde_json::to_string(value).map_err(|source| Error::Serialization {
                field: key.to_string(),
                source,
            })?;
            self.fields.push((key.to_string(), encoded));
        }
        Ok(self)
    }

    /// Append an arbitrary JSON value: null omitted, strings verbatim,
    /// scalars as text, arrays and objects as JSON.
    fn value(&mut self, key: &str, value: &Value) -> Result<&mut Self> {
        match value {
            Value::Null => Ok(self),
            Value::String(s) => Ok(self.text(key, Some(s))),
            Value::Bool(b) => Ok(self.text(key, Some(b))),
            Value::Number(n) => Ok(self.text(key, Some(n))),
            Value::Array(_) | Value::Object(_) => self.json(key, Some(value)),
        }
    }

    /// Like [`value`](Self::value), but drops earlier entries for `key` first.
    fn set_value(&mut self, key: &str, value: &Value) -> Result<&mut Self> {
        self.fields.retain(|(k, _)| k != key);
        self.value(key, value)
    }

    /// Replace every entry for `key` with a single value.
    fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.fields.retain(|(k, _)| k != key);
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    /// Put the API key first, discarding any caller-supplied one.
    pub(crate) fn with_api_key(mut self, api_key: &str) -> Self {
        self.fields.retain(|(k, _)| k != API_KEY);
        self.fields.insert(0, (API_KEY.to_string(), api_key.to_string()));
        self
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    pub(crate) fn as_pairs(&self) -> &[(String, String)] {
        &self.fields
    }
}

pub(crate) fn send_email(options: &SendEmailOptions) -> Result<FormPayload> {
    let mut form = FormPayload::new();
    form.text("from_name", options.from_name.as_ref())
        .text("from_email", options.from_email.as_ref())
        .text("reply_to", options.reply_to.as_ref())
        .text("subject", options.subject.as_ref())
        .text("html_text", options.html_text.as_ref())
        .text("plain_text", options.plain_text.as_ref());

    match &options.to {
        Some(Recipients::One(address)) => {
            form.text("to", Some(address));
        }
        Some(Recipients::Many(addresses)) => {
            form.json("to", Some(addresses))?;
        }
        None => {}
    }

    form.json("recipient-variables", options.recipient_variables.as_ref())?
        .text("list_ids", options.list_ids.as_ref().map(|ids| ids.join(",")))
        .text("query_string", options.query_string.as_ref())
        .text("track_opens", options.track_opens)
        .text("track_clicks", options.track_clicks)
        .text("schedule_date_time", options.schedule_date_time.as_ref())
        .text("schedule_timezone", options.schedule_timezone.as_ref());
    Ok(form)
}

pub(crate) fn create_campaign(options: &CampaignOptions) -> Result<FormPayload> {
    let mut form = FormPayload::new();
    form.text("from_name", options.from_name.as_ref())
        .text("from_email", options.from_email.as_ref())
        .text("reply_to", options.reply_to.as_ref())
        .text("title", options.title.as_ref())
        .text("subject", options.subject.as_ref())
        .text("html_text", options.html_text.as_ref())
        .text("plain_text", options.plain_text.as_ref())
        .json("list_ids", options.list_ids.as_ref())?
        .json("segment_ids", options.segment_ids.as_ref())?
        .json("exclude_list_ids", options.exclude_list_ids.as_ref())?
        // The service spells this one with "segments".
        .json("exclude_segments_ids", options.exclude_segment_ids.as_ref())?
        .text("query_string", options.query_string.as_ref())
        .text("track_opens", options.track_opens)
        .text("track_clicks", options.track_clicks)
        .text("send_campaign", options.send_campaign)
        .text("schedule_date_time", options.schedule_date_time.as_ref())
        .text("schedule_timezone", options.schedule_timezone.as_ref());
    Ok(form)
}

pub(crate) fn get_lists(include_hidden: bool) -> FormPayload {
    let mut form = FormPayload::new();
    form.text("include_hidden", Some(if include_hidden { "yes" } else { "no" }));
    form
}

fn paging(form: &mut FormPayload, options: Option<&PageOptions>) {
    let options = options.cloned().unwrap_or_default();
    form.text("page", Some(options.page.unwrap_or(PageOptions::DEFAULT_PAGE)))
        .text("limit", Some(options.limit.unwrap_or(PageOptions::DEFAULT_LIMIT)))
        .text("status", options.status.as_ref());
}

pub(crate) fn get_campaigns(options: Option<&PageOptions>) -> FormPayload {
    let mut form = FormPayload::new();
    paging(&mut form, options);
    form
}

pub(crate) fn get_subscribers(list_id: &str, options: Option<&PageOptions>) -> FormPayload {
    let mut form = FormPayload::new();
    form.text(LIST_ID, Some(list_id));
    paging(&mut form, options);
    form
}

pub(crate) fn add_subscriber(list_id: &str, subscriber: &Subscriber) -> Result<FormPayload> {
    let mut form = FormPayload::new();
    form.text("email", subscriber.email.as_ref())
        .text("name", subscriber.name.as_ref());
    // Custom fields win over the typed ones, one entry per key.
    for (key, value) in &subscriber.fields {
        form.set_value(key, value)?;
    }
    form.set(LIST_ID, list_id);
    Ok(form)
}
