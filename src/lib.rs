//! # Sift
//!
//! A criteria-assembly framework: composable query criteria built
//! incrementally by independent handlers and resolved against typed
//! repositories.
//!
//! ## Features
//!
//! - **Composable Criteria**: filters, sort order, pagination and hydration
//!   flags, mutated only through append operations so any number of handlers
//!   can contribute without clobbering each other
//! - **Pluggable Handlers**: block resolvers and request-parameter handlers
//!   behind object-safe traits, dispatched by capability (`supports`)
//! - **Typed Conditions**: a closed condition set with structural equality
//!   for deduplication
//! - **Repository Registry**: content-type identifier to repository mapping
//!   with named resolution errors
//! - **Strict Build/Execute Split**: handlers assemble criteria, only
//!   repositories execute them
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sift::prelude::*;
//!
//! let mut registry = RepositoryRegistry::new();
//! registry.register("recipes", Arc::new(repository));
//!
//! let resolver = ContentBlockResolver::new(Arc::new(registry), provider);
//! let context = Context::default();
//!
//! let prepared = resolver.prepare(&block, &context).await?;
//! resolver.handle(&mut block, prepared.as_ref(), &context).await?;
//!
//! // block.data now holds "sItems" and "sType"
//! ```

pub mod block;
pub mod core;
pub mod handlers;
pub mod repository;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        condition::Condition,
        content_type::{ContentType, TypeProvider},
        context::Context,
        criteria::{Criteria, SortClause, SortDirection},
        error::{ConfigError, SiftError, SiftResult, StorageError, TypeError},
        request::SearchRequest,
    };

    // === Blocks ===
    pub use crate::block::{Block, BlockConfig, BlockData, ConfigValue};

    // === Handlers ===
    pub use crate::handlers::{
        ComponentHandler, ContentBlockResolver, CriteriaRequestHandler, FetchMode,
        OptionGroupSource, SortSpec, VariantParamHandler,
    };

    // === Repository ===
    pub use crate::repository::{ContentItem, QueryResult, Repository, RepositoryRegistry};

    // === Storage ===
    pub use crate::storage::{InMemoryOptionGroups, InMemoryRepository, InMemoryTypeProvider};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
