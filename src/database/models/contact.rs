use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::{require, DocumentModel, IndexDirection, IndexSpec, ModelError, Timestamps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Unread,
    Read,
    Replied,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Contact-form submission, scoped by sender email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: String,
    pub contact_id: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub priority: ContactPriority,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn default_country_code() -> String {
    "+91".to_string()
}

/// Inbound contact-form payload, before ids and defaults are applied
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub priority: Option<ContactPriority>,
}

impl Contact {
    /// Build a stored contact from a submission. Email is trimmed and lower-cased,
    /// text fields are trimmed; `contact_id` doubles as the document id.
    pub fn from_submission(contact_id: impl Into<String>, submission: ContactSubmission) -> Self {
        let contact_id = contact_id.into();
        Self {
            id: contact_id.clone(),
            contact_id,
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_lowercase(),
            country_code: submission.country_code.unwrap_or_else(default_country_code),
            whatsapp: submission.whatsapp.map(|w| w.trim().to_string()).filter(|w| !w.is_empty()),
            subject: submission.subject.trim().to_string(),
            message: submission.message,
            status: ContactStatus::default(),
            priority: submission.priority.unwrap_or_default(),
            assigned_to: None,
            response: String::new(),
            responded_at: None,
            attachments: Vec::new(),
            tags: Vec::new(),
            timestamps: Timestamps::default(),
        }
    }
}

impl DocumentModel for Contact {
    const COLLECTION: &'static str = "contacts";
    const MODEL: &'static str = "Contact";
    const SCOPE_KEY: &'static str = "email";

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::unique("contactId"),
            IndexSpec::on(&[("email", IndexDirection::Asc), ("createdAt", IndexDirection::Desc)]),
            IndexSpec::on(&[("status", IndexDirection::Asc), ("priority", IndexDirection::Asc)]),
            IndexSpec::asc("assignedTo"),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("subject", &self.subject)?;
        require("message", &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "  Asha ".to_string(),
            email: " Asha@Example.COM ".to_string(),
            subject: "Workshop dates".to_string(),
            message: "When is the next batch?".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn normalizes_submission() {
        let contact = Contact::from_submission("msg_1", submission());
        assert_eq!(contact.email, "asha@example.com");
        assert_eq!(contact.name, "Asha");
        assert_eq!(contact.country_code, "+91");
        assert_eq!(contact.status, ContactStatus::Unread);
        assert_eq!(contact.id, contact.contact_id);
        assert!(contact.validate().is_ok());
    }

    #[test]
    fn missing_message_fails_validation() {
        let mut sub = submission();
        sub.message = String::new();
        let contact = Contact::from_submission("msg_2", sub);
        assert_eq!(contact.validate(), Err(ModelError::MissingField("message")));
    }

    #[test]
    fn serializes_null_assignee() {
        let doc = Contact::from_submission("msg_3", submission()).to_document().unwrap();
        assert!(doc["assignedTo"].is_null());
        assert_eq!(doc["status"], "unread");
        assert_eq!(doc["contactId"], "msg_3");
    }
}
