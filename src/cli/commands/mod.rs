pub mod health;
pub mod init;
pub mod schema;
pub mod wipe;
