pub mod app;
pub mod cli;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod ids;
pub mod middleware;
pub mod services;

pub use app::router;
pub use context::AppContext;
