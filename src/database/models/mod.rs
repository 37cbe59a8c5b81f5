pub mod accounting;
pub mod admin;
pub mod contact;
pub mod planner;
pub mod schema;
pub mod workshop;

pub use accounting::{Category, Transaction, TransactionType};
pub use admin::{Admin, LoginHistory, SigninData, SignupData};
pub use contact::{Contact, ContactSubmission};
pub use planner::{DailyPlan, Goal, HealthTracker, Milestone, MyWord, Reminder, Task, Todo, Vision};
pub use schema::{CollectionSchema, DocumentModel, IndexDirection, IndexSpec, ModelError, Timestamps};
pub use workshop::{Assignment, ChatMessage, Enrollment, Session};

/// Every typed collection, in the order `planner init` provisions them
pub fn all_schemas() -> Vec<CollectionSchema> {
    vec![
        Vision::schema(),
        Goal::schema(),
        Milestone::schema(),
        Task::schema(),
        Todo::schema(),
        Reminder::schema(),
        DailyPlan::schema(),
        HealthTracker::schema(),
        MyWord::schema(),
        SignupData::schema(),
        SigninData::schema(),
        Contact::schema(),
        Admin::schema(),
        Session::schema(),
        Enrollment::schema(),
        Assignment::schema(),
        ChatMessage::schema(),
        Transaction::schema(),
        Category::schema(),
    ]
}

pub fn find_schema(collection: &str) -> Option<CollectionSchema> {
    all_schemas().into_iter().find(|s| s.collection == collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn collection_names_are_unique() {
        let schemas = all_schemas();
        let names: HashSet<_> = schemas.iter().map(|s| s.collection).collect();
        assert_eq!(names.len(), schemas.len());
    }

    #[test]
    fn index_names_do_not_collide() {
        let mut seen = HashSet::new();
        for schema in all_schemas() {
            for idx in &schema.indexes {
                assert!(seen.insert(idx.name(schema.collection)), "duplicate index on {}", schema.collection);
            }
        }
    }

    #[test]
    fn lookup_by_collection() {
        assert_eq!(find_schema("todos").map(|s| s.model), Some("Todo"));
        assert!(find_schema("carts").is_none());
    }
}
