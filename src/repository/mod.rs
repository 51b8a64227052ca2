//! Repository abstraction and registry
//!
//! A [`Repository`] executes a fully assembled [`Criteria`] against one
//! content type's data source. Building criteria and executing them are
//! strictly separated: handlers never talk to a data source except through
//! this seam (and the grouping lookup, which has its own seam).

use crate::core::criteria::Criteria;
use crate::core::error::{ConfigError, SiftResult};
use crate::core::ContentType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// One content row returned by a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,

    /// Arbitrary per-type fields
    #[serde(default)]
    pub fields: Map<String, Value>,

    /// Configurator option ids this item carries, for variant matching
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option_ids: Vec<i64>,
}

impl ContentItem {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fields: Map::new(),
            option_ids: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_options(mut self, option_ids: Vec<i64>) -> Self {
        self.option_ids = option_ids;
        self
    }

    /// Read a property by name; `"id"` resolves to the id column
    pub fn property(&self, name: &str) -> Option<Value> {
        if name == "id" {
            return Some(Value::from(self.id));
        }
        self.fields.get(name).cloned()
    }
}

/// Result of executing a criteria against one repository
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Matched items in result order
    pub items: Vec<ContentItem>,

    /// Metadata of the content type the items belong to
    pub content_type: ContentType,
}

/// Executes criteria against a concrete data source for one content type
#[async_trait]
pub trait Repository: Send + Sync {
    /// Execute the criteria and return matched items with type metadata
    ///
    /// Execution contract: conditions combine with logical AND; within one
    /// `Variant` condition the option ids are alternatives (OR). Sort clauses
    /// apply in order; `limit` truncates after sorting.
    async fn find_all(&self, criteria: &Criteria) -> SiftResult<QueryResult>;
}

/// Registry mapping content-type identifiers to repositories
///
/// Replaces dynamic string-keyed container lookup: resolution failure is the
/// named [`ConfigError::RepositoryNotRegistered`] rather than a generic
/// "service not found".
#[derive(Default)]
pub struct RepositoryRegistry {
    repositories: HashMap<String, Arc<dyn Repository>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            repositories: HashMap::new(),
        }
    }

    /// Register a repository under a content-type identifier
    ///
    /// Registering the same identifier twice replaces the earlier entry.
    pub fn register(&mut self, content_type: impl Into<String>, repository: Arc<dyn Repository>) {
        self.repositories.insert(content_type.into(), repository);
    }

    /// Resolve the repository bound to a content type
    pub fn get(&self, content_type: &str) -> SiftResult<Arc<dyn Repository>> {
        self.repositories
            .get(content_type)
            .cloned()
            .ok_or_else(|| {
                ConfigError::RepositoryNotRegistered {
                    content_type: content_type.to_string(),
                }
                .into()
            })
    }

    /// Get all registered content-type identifiers
    pub fn content_types(&self) -> Vec<&str> {
        self.repositories.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::criteria::SortDirection;
    use crate::core::SiftError;
    use serde_json::json;

    struct EmptyRepository;

    #[async_trait]
    impl Repository for EmptyRepository {
        async fn find_all(&self, _criteria: &Criteria) -> SiftResult<QueryResult> {
            Ok(QueryResult {
                items: vec![],
                content_type: ContentType::new("empty", "id", SortDirection::Ascending),
            })
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = RepositoryRegistry::new();
        assert!(registry.content_types().is_empty());
    }

    #[test]
    fn test_get_unregistered_is_named_error() {
        let registry = RepositoryRegistry::new();
        let err = registry.get("recipes").err().unwrap();
        assert!(matches!(
            err,
            SiftError::Config(ConfigError::RepositoryNotRegistered { .. })
        ));
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = RepositoryRegistry::new();
        registry.register("recipes", Arc::new(EmptyRepository));
        assert!(registry.get("recipes").is_ok());
        assert_eq!(registry.content_types(), vec!["recipes"]);
    }

    #[test]
    fn test_item_property_id_special_case() {
        let item = ContentItem::new(7).with_field("name", json!("Tiramisu"));
        assert_eq!(item.property("id"), Some(json!(7)));
        assert_eq!(item.property("name"), Some(json!("Tiramisu")));
        assert_eq!(item.property("missing"), None);
    }
}
