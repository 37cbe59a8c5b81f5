use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterData, FilterOp, FilterWhereInfo, SortDirection};

/// Builder for document queries. Every handler query starts from an owner scope.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    data: FilterData,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope to one owner. `None` selects documents that carry no owner at all.
    pub fn scoped(field: &str, owner: Option<&str>) -> Result<Self, FilterError> {
        let filter = Self::new();
        match owner {
            Some(value) => filter.where_eq(field, value),
            None => filter.where_null(field),
        }
    }

    pub fn where_eq(mut self, field: &str, value: impl Into<String>) -> Result<Self, FilterError> {
        Self::validate_field(field)?;
        self.data.where_clause.push(FilterWhereInfo {
            field: field.to_string(),
            operator: FilterOp::Eq,
            data: Some(value.into()),
        });
        Ok(self)
    }

    pub fn where_null(mut self, field: &str) -> Result<Self, FilterError> {
        Self::validate_field(field)?;
        self.data.where_clause.push(FilterWhereInfo {
            field: field.to_string(),
            operator: FilterOp::Null,
            data: None,
        });
        Ok(self)
    }

    pub fn newest_first(mut self) -> Self {
        self.data.order = SortDirection::Desc;
        self
    }

    pub fn oldest_first(mut self) -> Self {
        self.data.order = SortDirection::Asc;
        self
    }

    pub fn limit(mut self, limit: i64, offset: Option<i64>) -> Result<Self, FilterError> {
        if limit < 0 { return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string())); }
        if let Some(off) = offset { if off < 0 { return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string())); } }
        self.data.limit = Some(limit);
        self.data.offset = offset;
        Ok(self)
    }

    pub fn data(&self) -> &FilterData {
        &self.data
    }

    pub fn into_data(self) -> FilterData {
        self.data
    }

    /// In-process evaluation of the where clause, mirroring `doc->>'field'` semantics.
    pub fn matches(&self, doc: &Value) -> bool {
        self.data.where_clause.iter().all(|info| {
            let text = field_text(doc, &info.field);
            match info.operator {
                FilterOp::Eq => text.as_deref() == info.data.as_deref(),
                FilterOp::Null => text.is_none(),
            }
        })
    }

    /// Field names are interpolated into SQL as JSON keys, so keep them to identifiers.
    pub fn validate_field(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidField(format!("Invalid field name format: {}", name)));
        }
        Ok(())
    }
}

/// Text rendering of a top-level field; JSON null and absent fields both yield `None`.
pub fn field_text(doc: &Value, field: &str) -> Option<String> {
    match doc.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scoped_filter_matches_owner_only() {
        let filter = Filter::scoped("userId", Some("u1")).unwrap();
        assert!(filter.matches(&json!({"userId": "u1", "todoText": "a"})));
        assert!(!filter.matches(&json!({"userId": "u2"})));
        assert!(!filter.matches(&json!({"todoText": "no owner"})));
    }

    #[test]
    fn unscoped_filter_matches_missing_or_null_owner() {
        let filter = Filter::scoped("userId", None).unwrap();
        assert!(filter.matches(&json!({"todoText": "x"})));
        assert!(filter.matches(&json!({"userId": null})));
        assert!(!filter.matches(&json!({"userId": "u1"})));
    }

    #[test]
    fn non_string_fields_compare_on_text() {
        let filter = Filter::new().where_eq("completed", "true").unwrap();
        assert!(filter.matches(&json!({"completed": true})));
        assert!(!filter.matches(&json!({"completed": false})));
    }

    #[test]
    fn rejects_unsafe_field_names() {
        assert!(Filter::new().where_eq("user'Id", "x").is_err());
        assert!(Filter::new().where_null("1abc").is_err());
        assert!(Filter::new().where_eq("", "x").is_err());
        assert!(Filter::new().where_eq("linked_goal_2", "x").is_ok());
    }

    #[test]
    fn rejects_negative_paging() {
        assert!(Filter::new().limit(-1, None).is_err());
        assert!(Filter::new().limit(10, Some(-5)).is_err());
        let data = Filter::new().limit(10, Some(20)).unwrap().into_data();
        assert_eq!(data.limit, Some(10));
        assert_eq!(data.offset, Some(20));
    }
}
