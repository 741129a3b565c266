//! Input checks run before a request leaves the client.

use crate::error::{FieldError, ValidationErrors};
use crate::models::{CampaignOptions, Recipients, SendEmailOptions};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"));

const INVALID_EMAIL: &str = "Invalid email format";

/// Basic `local@domain.tld` shape check.
pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn missing(fields: &[(&str, Option<&str>)]) -> Vec<FieldError> {
    fields
        .iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| FieldError::required(name))
        .collect()
}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::from_vec(errors))
    }
}

pub(crate) fn send_email(options: &SendEmailOptions) -> Result<(), ValidationErrors> {
    let errors = missing(&[
        ("fromName", options.from_name.as_deref()),
        ("fromEmail", options.from_email.as_deref()),
        ("subject", options.subject.as_deref()),
        ("htmlText", options.html_text.as_deref()),
    ]);

    if let Some(from) = options.from_email.as_deref()
        && !is_valid_email(from)
    {
        return Err(ValidationErrors::single("fromEmail", INVALID_EMAIL));
    }

    if let Some(Recipients::Many(addresses)) = &options.to
        && let Some(bad) = addresses.iter().find(|a| !is_valid_email(a))
    {
        return Err(ValidationErrors::single(
            "to",
            format!("{INVALID_EMAIL}: {bad}"),
        ));
    }

    finish(errors)
}

/// Unlike [`send_email`], an absent `fromEmail` is reported as a format
/// error rather than a missing field.
pub(crate) fn create_campaign(options: &CampaignOptions) -> Result<(), ValidationErrors> {
    let errors = missing(&[
        ("fromName", options.from_name.as_deref()),
        ("fromEmail", options.from_email.as_deref()),
        ("title", options.title.as_deref()),
        ("subject", options.subject.as_deref()),
        ("htmlText", options.html_text.as_deref()),
    ]);

    if !options.from_email.as_deref().is_some_and(is_valid_email) {
        return Err(ValidationErrors::single("fromEmail", INVALID_EMAIL));
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> SendEmailOptions {
        SendEmailOptions {
            from_name: Some("Acme".into()),
            from_email: Some("news@acme.io".into()),
            subject: Some("Hello".into()),
            html_text: Some("<p>Hello</p>".into()),
            ..Default::default()
        }
    }

    fn campaign() -> CampaignOptions {
        CampaignOptions {
            from_name: Some("Acme".into()),
            from_email: Some("news@acme.io".into()),
            title: Some("October".into()),
            subject: Some("Hello".into()),
            html_text: Some("<p>Hello</p>".into()),
            ..Default::default()
        }
    }

    fn fields(errors: &ValidationErrors) -> Vec<&str> {
        errors.fields().collect()
    }

    #[test]
    fn email_pattern() {
        for ok in ["a@b.co", "first.last+tag@mail.example.org", "x@y.z"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "plain", "a@b", "@b.co", "a@.co", "a@b.", "a b@c.de", "a@@b.co"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn complete_email_passes() {
        assert!(send_email(&email()).is_ok());
    }

    #[test]
    fn missing_email_fields_are_aggregated() {
        let options = SendEmailOptions {
            subject: Some("   ".into()),
            html_text: Some("<p/>".into()),
            ..Default::default()
        };
        let errors = send_email(&options).unwrap_err();
        assert_eq!(fields(&errors), ["fromName", "fromEmail", "subject"]);
        assert_eq!(errors.errors()[2].message, "Field 'subject' is required");
    }

    #[test]
    fn bad_from_email_short_circuits() {
        let options = SendEmailOptions {
            from_email: Some("not-an-email".into()),
            ..Default::default()
        };
        let errors = send_email(&options).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0], FieldError::new("fromEmail", "Invalid email format"));
    }

    #[test]
    fn blank_from_email_is_a_format_error() {
        let options = SendEmailOptions {
            from_email: Some(" ".into()),
            ..email()
        };
        let errors = send_email(&options).unwrap_err();
        assert_eq!(fields(&errors), ["fromEmail"]);
        assert_eq!(errors.errors()[0].message, "Invalid email format");
    }

    #[test]
    fn recipients_list_is_checked() {
        let options = SendEmailOptions {
            to: Some(vec!["ok@a.io", "broken@", "also@b.io"].into()),
            ..email()
        };
        let errors = send_email(&options).unwrap_err();
        assert_eq!(
            errors.errors()[0],
            FieldError::new("to", "Invalid email format: broken@")
        );

        let options = SendEmailOptions {
            to: Some(vec!["ok@a.io", "also@b.io"].into()),
            ..email()
        };
        assert!(send_email(&options).is_ok());
    }

    #[test]
    fn single_recipient_is_not_checked() {
        let options = SendEmailOptions {
            to: Some("whatever".into()),
            ..email()
        };
        assert!(send_email(&options).is_ok());
    }

    #[test]
    fn complete_campaign_passes() {
        assert!(create_campaign(&campaign()).is_ok());
    }

    #[test]
    fn campaign_without_from_email_is_a_format_error() {
        let options = CampaignOptions {
            from_email: None,
            title: None,
            ..campaign()
        };
        let errors = create_campaign(&options).unwrap_err();
        assert_eq!(fields(&errors), ["fromEmail"]);
        assert_eq!(errors.errors()[0].message, "Invalid email format");
    }

    #[test]
    fn missing_campaign_fields_are_aggregated() {
        let options = CampaignOptions {
            from_email: Some("news@acme.io".into()),
            subject: Some("".into()),
            ..Default::default()
        };
        let errors = create_campaign(&options).unwrap_err();
        assert_eq!(fields(&errors), ["fromName", "title", "subject", "htmlText"]);
    }
}
