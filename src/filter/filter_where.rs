use sqlx::{Postgres, QueryBuilder};

use super::types::{FilterData, FilterOp, FilterWhereInfo, SortDirection};

/// Renders a `FilterData` into the document tables' SQL (`doc` JSONB + `created_at`).
pub struct FilterWhere;

impl FilterWhere {
    /// Appends ` WHERE ...` for the given conditions. Field names were validated
    /// when the filter was built, values are always bound.
    pub fn push_where(builder: &mut QueryBuilder<'_, Postgres>, conditions: &[FilterWhereInfo]) {
        if conditions.is_empty() {
            return;
        }
        builder.push(" WHERE ");
        let mut first = true;
        for condition in conditions {
            if !first {
                builder.push(" AND ");
            }
            first = false;
            match condition.operator {
                FilterOp::Eq => {
                    builder.push(format!("doc->>'{}' = ", condition.field));
                    builder.push_bind(condition.data.clone().unwrap_or_default());
                }
                FilterOp::Null => {
                    builder.push(format!("doc->>'{}' IS NULL", condition.field));
                }
            }
        }
    }

    pub fn push_order_and_paging(builder: &mut QueryBuilder<'_, Postgres>, data: &FilterData) {
        match data.order {
            SortDirection::Desc => builder.push(" ORDER BY created_at DESC, id DESC"),
            SortDirection::Asc => builder.push(" ORDER BY created_at ASC, id ASC"),
        };
        if let Some(limit) = data.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }
        if let Some(offset) = data.offset {
            builder.push(" OFFSET ");
            builder.push_bind(offset);
        }
    }
}
