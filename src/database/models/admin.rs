use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::{new_id, require, DocumentModel, IndexDirection, IndexSpec, ModelError, Timestamps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    #[default]
    Admin,
    Moderator,
    Support,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ManageWorkshops,
    ManageOrders,
    ManageContacts,
    ManageAdmins,
    ViewAnalytics,
    ViewReports,
    ManageSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    #[default]
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginHistory {
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default)]
    pub status: AttemptStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_password_change: Option<DateTime<Utc>>,
    #[serde(default)]
    pub two_factor_enabled: bool,
}

/// Administrator account. `adminId` and `email` are unique at the storage layer only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub admin_id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub account_status: AccountStatus,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub login_count: u32,
    #[serde(default = "system")]
    pub created_by: String,
    #[serde(default)]
    pub login_history: Vec<LoginHistory>,
    #[serde(default)]
    pub metadata: AdminMetadata,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn system() -> String {
    "system".to_string()
}

impl Admin {
    /// Record a login attempt; successful ones bump the counter and `lastLogin`
    pub fn record_login(&mut self, entry: LoginHistory) {
        if entry.status == AttemptStatus::Success {
            self.login_count += 1;
            self.last_login = Some(entry.date);
        }
        self.login_history.push(entry);
    }
}

impl DocumentModel for Admin {
    const COLLECTION: &'static str = "admins";
    const MODEL: &'static str = "Admin";
    const SCOPE_KEY: &'static str = "adminId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::unique("adminId"), IndexSpec::unique("email")]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("adminId", &self.admin_id)?;
        require("email", &self.email)?;
        require("name", &self.name)?;
        require("passwordHash", &self.password_hash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupStatus {
    #[default]
    Active,
    Inactive,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Registration record kept for the admin signup listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default = "Utc::now")]
    pub registration_date: DateTime<Utc>,
    #[serde(default)]
    pub status: SignupStatus,
    #[serde(default = "default_signup_source")]
    pub source: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn default_country_code() -> String {
    "+91".to_string()
}

fn default_signup_source() -> String {
    "signup".to_string()
}

impl DocumentModel for SignupData {
    const COLLECTION: &'static str = "signupdatas";
    const MODEL: &'static str = "SignupData";
    const SCOPE_KEY: &'static str = "email";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("email", IndexDirection::Asc), ("registrationDate", IndexDirection::Desc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("name", &self.name)?;
        require("email", &self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninData {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Attempts are recorded as failed until proven otherwise
    #[serde(default = "failed")]
    pub status: AttemptStatus,
    #[serde(default = "unknown")]
    pub ip: String,
    #[serde(default = "unknown")]
    pub device: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn failed() -> AttemptStatus {
    AttemptStatus::Failed
}

fn unknown() -> String {
    "unknown".to_string()
}

impl DocumentModel for SigninData {
    const COLLECTION: &'static str = "signindatas";
    const MODEL: &'static str = "SigninData";
    const SCOPE_KEY: &'static str = "email";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("email", IndexDirection::Asc), ("timestamp", IndexDirection::Desc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("email", &self.email)
    }
}
