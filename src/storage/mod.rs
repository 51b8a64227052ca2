//! Storage backends
//!
//! Only the in-memory backend ships with the framework; real deployments
//! implement [`Repository`](crate::repository::Repository) and
//! [`OptionGroupSource`](crate::handlers::OptionGroupSource) against their
//! own data store.

pub mod in_memory;

pub use in_memory::{InMemoryOptionGroups, InMemoryRepository, InMemoryTypeProvider};
