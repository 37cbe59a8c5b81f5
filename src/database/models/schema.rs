use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Validation failures for typed documents
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field '{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid document: {0}")]
    Invalid(String),
}

impl ModelError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ModelError::MissingField(field) => Some(field),
            ModelError::OutOfRange { field, .. } => Some(field),
            ModelError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexDirection {
    Asc,
    Desc,
}

/// Declared secondary index, built by the Postgres store as an expression index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub fields: Vec<(&'static str, IndexDirection)>,
    pub unique: bool,
}

impl IndexSpec {
    pub fn on(fields: &[(&'static str, IndexDirection)]) -> Self {
        Self { fields: fields.to_vec(), unique: false }
    }

    pub fn asc(field: &'static str) -> Self {
        Self::on(&[(field, IndexDirection::Asc)])
    }

    pub fn unique(field: &'static str) -> Self {
        Self { fields: vec![(field, IndexDirection::Asc)], unique: true }
    }

    /// Stable index name, e.g. `todos_userId_completed_idx`
    pub fn name(&self, collection: &str) -> String {
        let fields: Vec<&str> = self.fields.iter().map(|(f, _)| *f).collect();
        let suffix = if self.unique { "key" } else { "idx" };
        format!("{}_{}_{}", collection, fields.join("_"), suffix)
    }
}

/// Shape and indexing intent of one collection
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSchema {
    pub collection: &'static str,
    pub model: &'static str,
    pub scope_key: &'static str,
    pub indexes: Vec<IndexSpec>,
}

/// Creation/update stamps every document carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A typed document stored in a named collection
pub trait DocumentModel: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;
    const MODEL: &'static str;
    /// Field that partitions documents by owner
    const SCOPE_KEY: &'static str;

    fn indexes() -> Vec<IndexSpec>;

    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }

    fn schema() -> CollectionSchema {
        CollectionSchema {
            collection: Self::COLLECTION,
            model: Self::MODEL,
            scope_key: Self::SCOPE_KEY,
            indexes: Self::indexes(),
        }
    }

    fn to_document(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(|e| ModelError::Invalid(e.to_string()))
    }

    fn from_document(doc: Value) -> Result<Self, ModelError> {
        serde_json::from_value(doc).map_err(|e| ModelError::Invalid(e.to_string()))
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ModelError> {
    if value < min || value > max {
        return Err(ModelError::OutOfRange { field, min, max, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_names_are_stable() {
        let idx = IndexSpec::on(&[("userId", IndexDirection::Asc), ("createdAt", IndexDirection::Desc)]);
        assert_eq!(idx.name("visions"), "visions_userId_createdAt_idx");
        assert_eq!(IndexSpec::unique("adminId").name("admins"), "admins_adminId_key");
    }

    #[test]
    fn range_check_is_inclusive() {
        assert!(within("progress", 0.0, 0.0, 100.0).is_ok());
        assert!(within("progress", 100.0, 0.0, 100.0).is_ok());
        let err = within("progress", 101.0, 0.0, 100.0).unwrap_err();
        assert_eq!(err.field(), Some("progress"));
    }

    #[test]
    fn blank_required_field_is_missing() {
        assert_eq!(require("title", "   "), Err(ModelError::MissingField("title")));
        assert!(require("title", "Run").is_ok());
    }
}
