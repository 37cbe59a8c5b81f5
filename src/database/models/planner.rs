//! Per-user planning documents: visions down to daily plans.
//!
//! All of these are scoped by `userId`. Parent references (`linkedVisionId`,
//! `goalId`, `milestoneId`, ...) are plain strings with no referential
//! integrity, deleting a goal leaves its milestones in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::{
    new_id, require, within, DocumentModel, IndexDirection, IndexSpec, ModelError, Timestamps,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisionStatus {
    #[default]
    Active,
    Paused,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vision {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    pub vision_statement: String,
    #[serde(default)]
    pub time_frame: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub visual_image_url: String,
    #[serde(default)]
    pub affirmations: Vec<String>,
    #[serde(default)]
    pub status: VisionStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Vision {
    pub fn new(user_id: impl Into<String>, vision_statement: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            vision_statement: vision_statement.into(),
            time_frame: String::new(),
            description: String::new(),
            category: String::new(),
            visual_image_url: String::new(),
            affirmations: Vec::new(),
            status: VisionStatus::default(),
            priority: Priority::default(),
            timestamps: Timestamps::default(),
        }
    }
}

impl DocumentModel for Vision {
    const COLLECTION: &'static str = "visions";
    const MODEL: &'static str = "Vision";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("createdAt", IndexDirection::Desc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("visionStatement", &self.vision_statement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalStatus {
    #[default]
    Active,
    Paused,
    Archived,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    pub goal_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_vision_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time_frame: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default)]
    pub progress: f64,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Goal {
    pub fn new(user_id: impl Into<String>, goal_title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            goal_title: goal_title.into(),
            linked_vision_id: None,
            description: String::new(),
            time_frame: String::new(),
            category: String::new(),
            priority: Priority::default(),
            status: GoalStatus::default(),
            target_date: None,
            milestones: Vec::new(),
            progress: 0.0,
            timestamps: Timestamps::default(),
        }
    }
}

impl DocumentModel for Goal {
    const COLLECTION: &'static str = "goals";
    const MODEL: &'static str = "Goal";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("linkedVisionId", IndexDirection::Asc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("goalTitle", &self.goal_title)?;
        within("progress", self.progress, 0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MilestoneStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    /// Either parent may be set, both are optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: MilestoneStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub rewards: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for Milestone {
    const COLLECTION: &'static str = "milestones";
    const MODEL: &'static str = "Milestone";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("goalId", IndexDirection::Asc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("title", &self.title)?;
        within("progress", self.progress, 0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub particulars: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub linked_goal_id: String,
    #[serde(default)]
    pub linked_goal_title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default = "one")]
    pub custom_recurrence_days: u32,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default)]
    pub reminder_time: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn one() -> u32 {
    1
}

impl DocumentModel for Task {
    const COLLECTION: &'static str = "tasks";
    const MODEL: &'static str = "Task";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::on(&[("userId", IndexDirection::Asc), ("createdAt", IndexDirection::Desc)]),
            IndexSpec::asc("linkedGoalId"),
            IndexSpec::asc("status"),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("title", &self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    pub todo_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Todo {
    pub fn new(user_id: impl Into<String>, todo_text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            todo_text: todo_text.into(),
            description: String::new(),
            completed: false,
            due_date: None,
            priority: Priority::default(),
            category: String::new(),
            tags: Vec::new(),
            timestamps: Timestamps::default(),
        }
    }
}

impl DocumentModel for Todo {
    const COLLECTION: &'static str = "todos";
    const MODEL: &'static str = "Todo";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("completed", IndexDirection::Asc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("todoText", &self.todo_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReminderType {
    Email,
    #[serde(rename = "SMS")]
    Sms,
    Push,
    #[default]
    #[serde(rename = "In-App")]
    InApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReminderStatus {
    #[default]
    Active,
    Sent,
    Dismissed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub status: ReminderStatus,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for Reminder {
    const COLLECTION: &'static str = "reminders";
    const MODEL: &'static str = "Reminder";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("reminderDate", IndexDirection::Asc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("title", &self.title)
    }
}

/// One scheduled activity. (userId, date) is indexed but deliberately not unique,
/// a day holds many entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub time: String,
    pub activity: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for DailyPlan {
    const COLLECTION: &'static str = "dailyplans";
    const MODEL: &'static str = "DailyPlan";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("date", IndexDirection::Asc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("date", &self.date)?;
        require("time", &self.time)?;
        require("activity", &self.activity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTracker {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    pub date: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub sleep_hours: f64,
    #[serde(default)]
    pub water: f64,
    #[serde(default)]
    pub exercise: f64,
    #[serde(default)]
    pub diet_quality: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for HealthTracker {
    const COLLECTION: &'static str = "healthtrackers";
    const MODEL: &'static str = "HealthTracker";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("date", IndexDirection::Desc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("date", &self.date)?;
        within("energy", self.energy, 0.0, 10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyWord {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub user_id: String,
    pub word_text: String,
    #[serde(default)]
    pub affirmation_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_recited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recitation_count: u32,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for MyWord {
    const COLLECTION: &'static str = "mywords";
    const MODEL: &'static str = "MyWord";
    const SCOPE_KEY: &'static str = "userId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("userId", IndexDirection::Asc), ("createdAt", IndexDirection::Desc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("userId", &self.user_id)?;
        require("wordText", &self.word_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn goal_progress_is_bounded() {
        let mut goal = Goal::new("u1", "Run a marathon");
        goal.progress = 100.0;
        assert!(goal.validate().is_ok());
        goal.progress = 120.0;
        assert!(matches!(goal.validate(), Err(ModelError::OutOfRange { field: "progress", .. })));
    }

    #[test]
    fn milestone_accepts_either_parent() {
        let doc = json!({
            "_id": "m1",
            "userId": "u1",
            "visionId": "v1",
            "title": "First 10k",
            "status": "In Progress"
        });
        let milestone = Milestone::from_document(doc).unwrap();
        assert_eq!(milestone.goal_id, None);
        assert_eq!(milestone.vision_id.as_deref(), Some("v1"));
        assert_eq!(milestone.status, MilestoneStatus::InProgress);
        assert!(milestone.validate().is_ok());
    }

    #[test]
    fn vision_defaults_match_schema() {
        let vision = Vision::from_document(json!({"userId": "u1", "visionStatement": "Calm mind"})).unwrap();
        assert_eq!(vision.status, VisionStatus::Active);
        assert_eq!(vision.priority, Priority::Medium);
        assert!(!vision.id.is_empty());
        assert!(vision.affirmations.is_empty());
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let err = Todo::from_document(json!({
            "userId": "u1",
            "todoText": "x",
            "priority": "Urgent"
        }))
        .unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn todo_serializes_camel_case() {
        let todo = Todo::new("u1", "buy milk");
        let doc = todo.to_document().unwrap();
        assert_eq!(doc["todoText"], "buy milk");
        assert_eq!(doc["userId"], "u1");
        assert_eq!(doc["priority"], "Medium");
        assert!(doc.get("_id").is_some());
        assert!(doc.get("createdAt").is_none());
    }

    #[test]
    fn health_energy_is_bounded() {
        let entry = HealthTracker::from_document(json!({"userId": "u1", "date": "2025-01-01", "energy": 11}))
            .unwrap();
        assert!(matches!(entry.validate(), Err(ModelError::OutOfRange { field: "energy", .. })));
    }

    #[test]
    fn reminder_type_uses_wire_names() {
        let reminder = Reminder::from_document(json!({
            "userId": "u1",
            "title": "Stretch",
            "reminderType": "SMS"
        }))
        .unwrap();
        assert_eq!(reminder.reminder_type, ReminderType::Sms);
        assert_eq!(reminder.to_document().unwrap()["reminderType"], "SMS");
    }
}
