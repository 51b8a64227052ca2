//! Core module containing fundamental types for the framework

pub mod condition;
pub mod content_type;
pub mod context;
pub mod criteria;
pub mod error;
pub mod request;

pub use condition::Condition;
pub use content_type::{ContentType, TypeProvider};
pub use context::Context;
pub use criteria::{Criteria, SortClause, SortDirection};
pub use error::{ConfigError, SiftError, SiftResult, StorageError, TypeError};
pub use request::SearchRequest;
