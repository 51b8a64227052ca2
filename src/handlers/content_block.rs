//! Content-block resolver
//!
//! Decides, from a block's stored mode, how to fetch the items it displays:
//! newest first, random order, an explicitly selected id list, or the
//! content type's own default sort.

use crate::block::Block;
use crate::core::condition::Condition;
use crate::core::criteria::{Criteria, SortClause, SortDirection};
use crate::core::{Context, SiftResult, TypeProvider};
use crate::handlers::{ComponentHandler, SortSpec};
use crate::repository::RepositoryRegistry;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Component-type name this resolver registers under
pub const COMPONENT_NAME: &str = "content-type-block";

/// Items fetched per block
const BLOCK_ITEM_LIMIT: u32 = 5;

const KEY_MODE: &str = "mode";
const KEY_CONTENT_TYPE: &str = "content_type";
const KEY_IDS: &str = "ids";

const DATA_KEY_ITEMS: &str = "sItems";
const DATA_KEY_TYPE: &str = "sType";

/// How a content block selects its items
///
/// Stored in block config as an integer under `"mode"`. A value outside the
/// known range maps to no mode at all: the resulting criteria carries neither
/// sort nor filter, which is valid, documented behavior rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Newest,
    Random,
    Selected,
    ContentType,
}

impl FetchMode {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(FetchMode::Newest),
            1 => Some(FetchMode::Random),
            2 => Some(FetchMode::Selected),
            3 => Some(FetchMode::ContentType),
            _ => None,
        }
    }
}

/// Split a pipe-delimited id list, dropping falsy tokens
///
/// Replicates the classic falsy-filter contract: empty segments, zero and
/// non-numeric tokens are all dropped. Dropping `0` means a legitimate zero
/// id is not filterable through this path; that quirk is preserved
/// deliberately, not fixed. Order and duplicates are preserved.
pub(crate) fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split('|')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .filter(|id| *id != 0)
        .collect()
}

/// Resolves content blocks whose component type is [`COMPONENT_NAME`]
pub struct ContentBlockResolver {
    registry: Arc<RepositoryRegistry>,
    type_provider: Arc<dyn TypeProvider>,
}

impl ContentBlockResolver {
    pub fn new(registry: Arc<RepositoryRegistry>, type_provider: Arc<dyn TypeProvider>) -> Self {
        Self {
            registry,
            type_provider,
        }
    }

    fn mode(block: &Block) -> Option<FetchMode> {
        block
            .config
            .get_int(KEY_MODE)
            .and_then(FetchMode::from_i64)
    }

    fn build_criteria(block: &Block, prepared: Option<&SortSpec>) -> Criteria {
        let mut criteria = Criteria::new();
        criteria.limit = Some(BLOCK_ITEM_LIMIT);
        criteria.load_translations = true;
        criteria.load_associations = true;

        match Self::mode(block) {
            Some(FetchMode::Newest) => {
                criteria.add_sort(SortClause::new("id", SortDirection::Descending));
            }
            Some(FetchMode::Random) => {
                criteria.add_sort(SortClause::random());
            }
            Some(FetchMode::Selected) => {
                let ids = parse_id_list(block.config.get_str(KEY_IDS).unwrap_or(""));
                let values = ids.into_iter().map(Value::from).collect();
                criteria.add_condition(Condition::property("id", values));
            }
            Some(FetchMode::ContentType) => {
                // No prepared sort spec means prepare was skipped; the block
                // then renders in storage order rather than failing.
                if let Some(spec) = prepared {
                    criteria.add_sort(SortClause::new(spec.field.clone(), spec.direction));
                }
            }
            None => {}
        }

        criteria
    }
}

#[async_trait]
impl ComponentHandler for ContentBlockResolver {
    fn supports(&self, block: &Block) -> bool {
        block.component_type == COMPONENT_NAME
    }

    async fn prepare(&self, block: &Block, _context: &Context) -> SiftResult<Option<SortSpec>> {
        if Self::mode(block) != Some(FetchMode::ContentType) {
            return Ok(None);
        }

        let type_id = block.config.get_str(KEY_CONTENT_TYPE).unwrap_or("");
        let content_type = self.type_provider.get_type(type_id).await?;

        Ok(Some(SortSpec {
            field: content_type.sort_field,
            direction: content_type.sort_direction,
        }))
    }

    async fn handle(
        &self,
        block: &mut Block,
        prepared: Option<&SortSpec>,
        _context: &Context,
    ) -> SiftResult<()> {
        let type_id = block.config.get_str(KEY_CONTENT_TYPE).unwrap_or("");
        let repository = self.registry.get(type_id)?;

        let criteria = Self::build_criteria(block, prepared);

        tracing::debug!(
            content_type = type_id,
            conditions = criteria.conditions().len(),
            sort_clauses = criteria.sort().len(),
            "Resolving content block"
        );

        let result = repository.find_all(&criteria).await?;

        block
            .data
            .set(DATA_KEY_ITEMS, serde_json::to_value(&result.items)?);
        block
            .data
            .set(DATA_KEY_TYPE, result.content_type.as_attributes()?);

        Ok(())
    }
}
