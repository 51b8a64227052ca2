//! Content-type metadata and the provider seam

use crate::core::criteria::SortDirection;
use crate::core::error::SiftResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata describing one content type
///
/// Carries the default sort specification a content-type-driven block uses
/// when no explicit mode overrides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    /// Type identifier, e.g. "recipes"
    pub name: String,

    /// Property the type sorts by when rendered as a block
    pub sort_field: String,

    pub sort_direction: SortDirection,
}

impl ContentType {
    pub fn new(
        name: impl Into<String>,
        sort_field: impl Into<String>,
        sort_direction: SortDirection,
    ) -> Self {
        Self {
            name: name.into(),
            sort_field: sort_field.into(),
            sort_direction,
        }
    }

    /// Convert to a plain attribute map
    ///
    /// Round-trips through serde, erasing everything but field data. Output
    /// sinks only accept plain structured values, so this is what gets stored
    /// next to rendered items.
    pub fn as_attributes(&self) -> SiftResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Resolves content-type metadata by identifier
///
/// Fails with [`TypeError::NotFound`](crate::core::error::TypeError) for
/// unknown identifiers; there is no fallback type.
#[async_trait]
pub trait TypeProvider: Send + Sync {
    async fn get_type(&self, type_id: &str) -> SiftResult<ContentType>;
}
