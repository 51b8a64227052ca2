//! Variant option request handler
//!
//! Translates the `options` request parameter into per-group variant
//! conditions. The grouping lookup is the source of truth for which ids are
//! valid: ids with no matching configurator row are silently dropped.

use crate::core::condition::Condition;
use crate::core::criteria::Criteria;
use crate::core::{Context, SearchRequest, SiftResult};
use crate::handlers::CriteriaRequestHandler;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

const PARAM_OPTIONS: &str = "options";

/// Batched lookup grouping configurator option ids by their owning group
///
/// Given a set of candidate ids, returns one entry per distinct group among
/// the matched ids, mapping group id to that group's member ids. Member
/// order follows the lookup source's row order, not request order; unmatched
/// ids produce no entry.
#[async_trait]
pub trait OptionGroupSource: Send + Sync {
    async fn grouped_options(&self, option_ids: &[i64]) -> SiftResult<IndexMap<i64, Vec<i64>>>;
}

/// Appends one variant condition per configurator group named in the request
///
/// Conditions combine with AND across groups and OR within a group when the
/// repository executes the final criteria; this handler only contributes
/// them.
pub struct VariantParamHandler {
    groups: Arc<dyn OptionGroupSource>,
}

impl VariantParamHandler {
    pub fn new(groups: Arc<dyn OptionGroupSource>) -> Self {
        Self { groups }
    }
}

#[async_trait]
impl CriteriaRequestHandler for VariantParamHandler {
    async fn handle_request(
        &self,
        request: &SearchRequest,
        criteria: &mut Criteria,
        _context: &Context,
    ) -> SiftResult<()> {
        let raw = request.param(PARAM_OPTIONS).unwrap_or("");
        if raw.is_empty() {
            return Ok(());
        }

        // Unparsable tokens cannot match a configurator row anyway.
        let candidates: Vec<i64> = raw
            .split('|')
            .filter_map(|token| token.trim().parse().ok())
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }

        let grouped = self.groups.grouped_options(&candidates).await?;
        if grouped.is_empty() {
            tracing::debug!(raw, "No valid variant options in request");
            return Ok(());
        }

        for (group_id, option_ids) in grouped {
            criteria.add_condition(Condition::variant(group_id, option_ids));
        }

        Ok(())
    }
}
