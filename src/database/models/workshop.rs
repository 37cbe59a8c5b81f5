//! Workshop platform documents. These hang off a workshop id, which is what
//! scopes them (enrollments are scoped by the enrolled user).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::{
    new_id, require, within, DocumentModel, IndexDirection, IndexSpec, ModelError, Timestamps,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pdf,
    Document,
    Link,
    Image,
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRules {
    #[serde(default = "yes")]
    pub requires_previous_completion: bool,
    #[serde(default = "day")]
    pub time_gap_after_previous_hours: u32,
    #[serde(default)]
    pub requires_assignment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
    #[serde(default)]
    pub requires_rating: bool,
    #[serde(default)]
    pub requires_testimony: bool,
}

impl Default for UnlockRules {
    fn default() -> Self {
        Self {
            requires_previous_completion: true,
            time_gap_after_previous_hours: 24,
            requires_assignment: false,
            assignment_id: None,
            requires_rating: false,
            requires_testimony: false,
        }
    }
}

fn yes() -> bool {
    true
}

fn day() -> u32 {
    24
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub workshop_id: String,
    pub session_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Minutes
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub unlock_rules: UnlockRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default)]
    pub resources: Vec<Attachment>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "yes")]
    pub is_active: bool,
    pub created_by: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for Session {
    const COLLECTION: &'static str = "sessions";
    const MODEL: &'static str = "Session";
    const SCOPE_KEY: &'static str = "workshopId";

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::on(&[("workshopId", IndexDirection::Asc), ("sessionNumber", IndexDirection::Asc)]),
            IndexSpec::asc("isPublished"),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("workshopId", &self.workshop_id)?;
        require("title", &self.title)?;
        require("createdBy", &self.created_by)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopMode {
    Online,
    Offline,
    Residential,
    Recorded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopLanguage {
    Hindi,
    Marathi,
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub workshop_id: String,
    pub batch_id: String,
    pub user_id: String,
    #[serde(default = "Utc::now")]
    pub enrollment_date: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub selected_mode: WorkshopMode,
    pub selected_language: WorkshopLanguage,
    #[serde(default)]
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub progress_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_reason: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for Enrollment {
    const COLLECTION: &'static str = "enrollments";
    const MODEL: &'static str = "Enrollment";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::on(&[("userId", IndexDirection::Asc), ("workshopId", IndexDirection::Asc)]),
            IndexSpec::asc("status"),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("workshopId", &self.workshop_id)?;
        require("batchId", &self.batch_id)?;
        require("userId", &self.user_id)?;
        require("phone", &self.phone)?;
        require("email", &self.email)?;
        within("progressPercentage", self.progress_percentage, 0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub workshop_id: String,
    pub session_id: u32,
    pub title: String,
    pub description: String,
    pub instructions: String,
    #[serde(default = "week")]
    pub submission_deadline_days: u32,
    #[serde(default = "yes")]
    pub allow_late_submission: bool,
    #[serde(default)]
    pub late_penalty_percentage: f64,
    #[serde(default = "hundred")]
    pub total_points: f64,
    #[serde(default = "sixty")]
    pub passing_percentage: f64,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default = "yes")]
    pub is_active: bool,
    #[serde(default)]
    pub is_published: bool,
    pub created_by: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn week() -> u32 {
    7
}

fn hundred() -> f64 {
    100.0
}

fn sixty() -> f64 {
    60.0
}

impl DocumentModel for Assignment {
    const COLLECTION: &'static str = "assignments";
    const MODEL: &'static str = "Assignment";
    const SCOPE_KEY: &'static str = "workshopId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::asc("workshopId"), IndexSpec::asc("isActive")]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("workshopId", &self.workshop_id)?;
        require("title", &self.title)?;
        require("instructions", &self.instructions)?;
        within("passingPercentage", self.passing_percentage, 0.0, 100.0)?;
        within("latePenaltyPercentage", self.late_penalty_percentage, 0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Student,
    Instructor,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    System,
    Poll,
    Announcement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub emoji: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub workshop_id: String,
    pub enrollment_id: String,
    pub sender_id: String,
    pub sender_role: SenderRole,
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for ChatMessage {
    const COLLECTION: &'static str = "chatmessages";
    const MODEL: &'static str = "ChatMessage";
    const SCOPE_KEY: &'static str = "workshopId";

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::on(&[
                ("workshopId", IndexDirection::Asc),
                ("enrollmentId", IndexDirection::Asc),
                ("createdAt", IndexDirection::Desc),
            ]),
            IndexSpec::asc("isRead"),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("workshopId", &self.workshop_id)?;
        require("enrollmentId", &self.enrollment_id)?;
        require("senderId", &self.sender_id)?;
        require("message", &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_unlock_rules_default() {
        let session = Session::from_document(json!({
            "workshopId": "w1",
            "sessionNumber": 1,
            "title": "Breath basics",
            "duration": 45,
            "createdBy": "u9"
        }))
        .unwrap();
        assert!(session.unlock_rules.requires_previous_completion);
        assert_eq!(session.unlock_rules.time_gap_after_previous_hours, 24);
        assert!(session.is_active);
        assert!(!session.is_published);
    }

    #[test]
    fn enrollment_progress_is_bounded() {
        let mut enrollment = Enrollment::from_document(json!({
            "workshopId": "w1",
            "batchId": "b1",
            "userId": "u1",
            "startDate": "2025-01-01T00:00:00Z",
            "endDate": "2025-02-01T00:00:00Z",
            "selectedMode": "online",
            "selectedLanguage": "english",
            "phone": "123",
            "email": "u@example.com"
        }))
        .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert!(enrollment.validate().is_ok());
        enrollment.progress_percentage = 150.0;
        assert!(enrollment.validate().is_err());
    }

    #[test]
    fn chat_message_requires_known_role() {
        let bad = ChatMessage::from_document(json!({
            "workshopId": "w1",
            "enrollmentId": "e1",
            "senderId": "u1",
            "senderRole": "guest",
            "message": "hi"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn assignment_defaults() {
        let assignment = Assignment::from_document(json!({
            "workshopId": "w1",
            "sessionId": 2,
            "title": "Journal",
            "description": "Daily log",
            "instructions": "Write one page",
            "createdBy": "u9"
        }))
        .unwrap();
        assert_eq!(assignment.submission_deadline_days, 7);
        assert_eq!(assignment.total_points, 100.0);
        assert_eq!(assignment.passing_percentage, 60.0);
        assert!(assignment.validate().is_ok());
    }
}
