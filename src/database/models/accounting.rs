use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schema::{new_id, require, DocumentModel, IndexDirection, IndexSpec, ModelError, Timestamps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    Bank,
    Other,
}

/// Admin bookkeeping entry. Amounts are decimals stored as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub admin_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl DocumentModel for Transaction {
    const COLLECTION: &'static str = "transactions";
    const MODEL: &'static str = "Transaction";
    const SCOPE_KEY: &'static str = "adminId";

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::on(&[("adminId", IndexDirection::Asc), ("date", IndexDirection::Desc)]),
            IndexSpec::on(&[("adminId", IndexDirection::Asc), ("type", IndexDirection::Asc)]),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("adminId", &self.admin_id)?;
        require("category", &self.category)?;
        if self.amount.is_sign_negative() {
            return Err(ModelError::Invalid("amount must not be negative".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", default = "new_id")]
    pub id: String,
    pub admin_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn default_color() -> String {
    "#6366f1".to_string()
}

impl DocumentModel for Category {
    const COLLECTION: &'static str = "categories";
    const MODEL: &'static str = "Category";
    const SCOPE_KEY: &'static str = "adminId";

    fn indexes() -> Vec<IndexSpec> {
        vec![IndexSpec::on(&[("adminId", IndexDirection::Asc), ("type", IndexDirection::Asc)])]
    }

    fn validate(&self) -> Result<(), ModelError> {
        require("adminId", &self.admin_id)?;
        require("name", &self.name)
    }
}
