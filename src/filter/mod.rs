pub mod types;
pub mod filter;
pub mod filter_where;
pub mod error;

pub use types::*;
pub use filter::{field_text, Filter};
pub use error::FilterError;
