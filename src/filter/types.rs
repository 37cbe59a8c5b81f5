use serde::{Deserialize, Serialize};

/// Operators the document stores understand. Documents are matched on their
/// text rendering of a top-level field, the same thing `doc->>'field'` yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "$eq")] Eq,
    #[serde(rename = "$null")] Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterWhereInfo {
    pub field: String,
    pub operator: FilterOp,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Everything a store needs to answer a find: conditions, creation-time order, paging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterData {
    pub where_clause: Vec<FilterWhereInfo>,
    pub order: SortDirection,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
