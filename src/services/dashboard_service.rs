use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::database::{DocumentStore, StoreError};
use crate::filter::Filter;

/// Body of `GET /api/admin`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_users: u64,
    pub total_visions: u64,
    pub total_goals: u64,
    pub total_tasks: u64,
    pub recent_activity: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_signups: u64,
    pub total_signins: u64,
    pub total_contacts: u64,
    pub total_carts: u64,
    pub total_users: u64,
    pub total_workshops: u64,
    pub total_visions: u64,
    pub total_goals: u64,
    pub total_tasks: u64,
    pub total_todos: u64,
    pub total_checkouts: u64,
    pub total_transactions: u64,
    pub total_health_records: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopStats {
    pub total_enrolled: u64,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub summary: DashboardSummary,
    pub recent_signups: Vec<Value>,
    pub recent_contacts: Vec<Value>,
    pub workshop_stats: WorkshopStats,
    pub financial_stats: FinancialStats,
}

const RECENT_LIMIT: i64 = 10;

async fn total(store: &dyn DocumentStore, collection: &str) -> Result<u64, StoreError> {
    store.count(collection, &Filter::new()).await
}

pub async fn overview(store: &dyn DocumentStore) -> Result<AdminOverview, StoreError> {
    let (total_users, total_visions, total_goals, total_tasks) = futures::try_join!(
        total(store, "users"),
        total(store, "visions"),
        total(store, "goals"),
        total(store, "tasks"),
    )?;
    Ok(AdminOverview {
        total_users,
        total_visions,
        total_goals,
        total_tasks,
        recent_activity: Vec::new(),
    })
}

/// Aggregate counters across every user; no owner scoping applies here
pub async fn dashboard_stats(store: &dyn DocumentStore) -> Result<DashboardStats, StoreError> {
    let names = [
        "signupdatas",
        "signindatas",
        "contacts",
        "carts",
        "users",
        "workshops",
        "visions",
        "goals",
        "tasks",
        "todos",
        "checkouts",
        "transactions",
        "healthtrackers",
    ];
    let counts = futures::future::try_join_all(names.iter().map(|name| total(store, name))).await?;
    let summary = DashboardSummary {
        total_signups: counts[0],
        total_signins: counts[1],
        total_contacts: counts[2],
        total_carts: counts[3],
        total_users: counts[4],
        total_workshops: counts[5],
        total_visions: counts[6],
        total_goals: counts[7],
        total_tasks: counts[8],
        total_todos: counts[9],
        total_checkouts: counts[10],
        total_transactions: counts[11],
        total_health_records: counts[12],
    };

    let recent = Filter::new().newest_first().limit(RECENT_LIMIT, None)?;
    let everything = Filter::new();
    let (recent_signups, recent_contacts, workshops, transactions) = futures::try_join!(
        store.find("signupdatas", &recent),
        store.find("contacts", &recent),
        store.find("workshops", &everything),
        store.find("transactions", &everything),
    )?;

    Ok(DashboardStats {
        summary,
        recent_signups,
        recent_contacts,
        workshop_stats: workshop_stats(&workshops),
        financial_stats: financial_stats(&transactions),
    })
}

fn number(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Income and expense sums; documents with a missing or unreadable amount count as 0
pub fn financial_stats(transactions: &[Value]) -> FinancialStats {
    let mut stats = FinancialStats::default();
    for tx in transactions {
        let amount = number(tx.get("amount")).unwrap_or_default();
        match tx.get("type").and_then(Value::as_str) {
            Some("income") => stats.total_revenue += amount,
            Some("expense") => stats.total_expense += amount,
            _ => {}
        }
    }
    stats.net_balance = stats.total_revenue - stats.total_expense;
    stats
}

pub fn workshop_stats(workshops: &[Value]) -> WorkshopStats {
    let total_enrolled = workshops
        .iter()
        .filter_map(|w| w.get("enrolledCount").and_then(Value::as_u64))
        .sum();
    let ratings: Vec<f64> = workshops
        .iter()
        .filter_map(|w| w.get("rating").and_then(Value::as_f64))
        .collect();
    let avg_rating = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };
    WorkshopStats { total_enrolled, avg_rating }
}
