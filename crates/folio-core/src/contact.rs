//! Contact form payload, validation and response handling.
//!
//! The form posts `{name, email, message}` as JSON. The transport itself
//! lives in the web crate; this module decides what goes on the wire, how
//! server errors are turned into something readable, and how the offline
//! outbox and saved drafts are encoded.

use crate::constants::{CONTACT_MESSAGE_MAX, CONTACT_NAME_MAX};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a message")]
    MissingMessage,
    #[error("Message must be at most {max} characters")]
    MessageTooLong { max: usize },
    #[error("{0}")]
    Server(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Saved submissions could not be read: {0}")]
    CorruptStorage(String),
    #[error("Local storage is unavailable")]
    StorageUnavailable,
}

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.email.trim(), self.message.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.email.trim().is_empty() && self.message.trim().is_empty()
    }

    /// Check the same limits the contact endpoint enforces. Lengths count
    /// characters, not bytes.
    pub fn validate(&self) -> Result<(), ContactError> {
        let d = self.trimmed();
        if d.name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if d.name.chars().count() > CONTACT_NAME_MAX {
            return Err(ContactError::NameTooLong {
                max: CONTACT_NAME_MAX,
            });
        }
        if !looks_like_email(&d.email) {
            return Err(ContactError::InvalidEmail);
        }
        if d.message.is_empty() {
            return Err(ContactError::MissingMessage);
        }
        if d.message.chars().count() > CONTACT_MESSAGE_MAX {
            return Err(ContactError::MessageTooLong {
                max: CONTACT_MESSAGE_MAX,
            });
        }
        Ok(())
    }

    /// Validated, trimmed JSON request body.
    pub fn to_request_body(&self) -> Result<String, ContactError> {
        self.validate()?;
        serde_json::to_string(&self.trimmed()).map_err(|e| ContactError::Network(e.to_string()))
    }
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Stored contact as returned by the endpoint on success.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

/// Pull a readable message out of an error response body.
///
/// Understands `{"detail": "..."}`, validation lists of the form
/// `{"detail": [{"msg": "..."}, ...]}` and `{"message": "..."}`.
pub fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<String> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .map(str::to_owned)
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => parsed.message.filter(|m| !m.trim().is_empty()),
    }
}

/// Message to show for a failed submission.
pub fn failure_message(body: &str) -> String {
    error_detail(body).unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient, dismissible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn sent() -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Message sent".into(),
            description: "Thanks for reaching out! I'll get back to you soon.".into(),
        }
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Couldn't send message".into(),
            description: description.into(),
        }
    }

    /// Transport failures carry nothing worth showing; everything else
    /// already reads as a sentence.
    pub fn from_error(err: &ContactError) -> Self {
        match err {
            ContactError::Network(_) => Self::failed(GENERIC_FAILURE),
            other => Self::failed(other.to_string()),
        }
    }
}

/// Submission kept in the local outbox when no endpoint is configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at_ms: u64,
}

/// Append a validated draft to the outbox JSON held in storage and return
/// the new JSON. A missing value starts a fresh outbox; a corrupt one is
/// reported rather than overwritten.
pub fn append_to_outbox(
    stored: Option<&str>,
    draft: &ContactDraft,
    submitted_at_ms: u64,
) -> Result<String, ContactError> {
    draft.validate()?;
    let mut entries: Vec<OutboxEntry> = match stored {
        None => Vec::new(),
        Some(raw) if raw.trim().is_empty() => Vec::new(),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| ContactError::CorruptStorage(e.to_string()))?,
    };
    let d = draft.trimmed();
    entries.push(OutboxEntry {
        name: d.name,
        email: d.email,
        message: d.message,
        submitted_at_ms,
    });
    serde_json::to_string(&entries).map_err(|e| ContactError::CorruptStorage(e.to_string()))
}

pub fn encode_draft(draft: &ContactDraft) -> String {
    // a struct of three strings always serializes
    serde_json::to_string(draft).unwrap_or_default()
}

pub fn decode_draft(raw: &str) -> Result<ContactDraft, ContactError> {
    serde_json::from_str(raw).map_err(|e| ContactError::CorruptStorage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("ada@example.com"));
        assert!(!looks_like_email("ada@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ada@@example.com"));
        assert!(!looks_like_email("ada @example.com"));
        assert!(!looks_like_email("ada@example.com."));
    }

    #[test]
    fn detail_list_is_joined() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"},{"msg":"field required"}]}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn unreadable_bodies_fall_back_to_generic() {
        assert_eq!(failure_message("<html>502</html>"), GENERIC_FAILURE);
        assert_eq!(failure_message(r#"{"detail":""}"#), GENERIC_FAILURE);
        assert_eq!(failure_message(r#"{"message":"Rate limited"}"#), "Rate limited");
    }

    #[test]
    fn draft_roundtrip_tolerates_missing_fields() {
        let d = decode_draft(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(d.name, "Ada");
        assert!(d.message.is_empty());
        assert!(decode_draft("{not json").is_err());
    }
}
