//! Error types for Skrybe operations.

use std::fmt;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Option key the message refers to, e.g. `fromEmail`.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        Self::new(field, format!("Field '{field}' is required"))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn single(field: &str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub(crate) fn from_vec(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    /// The individual field errors, in the order they were detected.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Names of the offending fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Errors returned by the Skrybe client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller input was rejected before any request was sent.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A list or map option could not be encoded for the form body.
    #[error("failed to serialize field: {field}")]
    Serialization {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP call failed: connection, timeout, or non-2xx status.
    ///
    /// `message` is the text of `source`; `Display` leaves it to the
    /// source chain.
    #[error("request failed")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The client could not be constructed.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for input validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns `true` for HTTP-level failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Field errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Transport {
            message: source.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn required_message_names_field() {
        let err = FieldError::required("htmlText");
        assert_eq!(err.field, "htmlText");
        assert_eq!(err.message, "Field 'htmlText' is required");
    }

    #[test]
    fn validation_display_joins_fields() {
        let errors = ValidationErrors::from_vec(vec![
            FieldError::required("fromName"),
            FieldError::required("subject"),
        ]);
        let err = Error::from(errors);
        assert!(err.is_validation());
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "validation failed: fromName: Field 'fromName' is required; \
             subject: Field 'subject' is required"
        );
        let fields: Vec<_> = err.validation_errors().unwrap().fields().collect();
        assert_eq!(fields, ["fromName", "subject"]);
    }

    #[tokio::test]
    async fn transport_error_text_appears_once_in_chain() {
        let source = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let text = source.to_string();
        let err = Error::from(source);
        assert!(err.is_transport());

        let mut chain = vec![err.to_string()];
        let mut next = err.source();
        while let Some(e) = next {
            chain.push(e.to_string());
            next = e.source();
        }
        assert_eq!(chain[0], "request failed");
        assert_eq!(chain.iter().filter(|c| **c == text).count(), 1);
        match err {
            Error::Transport { message, .. } => assert_eq!(message, text),
            other => panic!("unexpected {other:?}"),
        }
    }
}
