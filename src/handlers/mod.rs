//! Handler seams for criteria assembly
//!
//! Two kinds of handlers contribute to a query:
//!
//! - [`ComponentHandler`]: processes one content block, building a criteria
//!   from the block's stored configuration and writing results into the
//!   block's data sink.
//! - [`CriteriaRequestHandler`]: translates one request parameter into
//!   conditions appended to a shared criteria.
//!
//! Both are object-safe so a dispatcher can hold boxed collections and pick
//! handlers by capability (`supports`), not by inheritance. Handlers are
//! stateless between calls and only append to shared collections, so
//! invocation order across handlers never loses data.

pub mod content_block;
pub mod variant;

use crate::block::Block;
use crate::core::criteria::{Criteria, SortDirection};
use crate::core::{Context, SearchRequest, SiftResult};
use async_trait::async_trait;

pub use content_block::{ContentBlockResolver, FetchMode};
pub use variant::{OptionGroupSource, VariantParamHandler};

/// Sort specification derived during block preparation
///
/// `prepare` returns this instead of writing sort keys back into shared block
/// config; the caller threads it into `handle` explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Processes one content block
#[async_trait]
pub trait ComponentHandler: Send + Sync {
    /// Whether this handler is responsible for the block
    ///
    /// True iff the block's component-type string exactly equals the
    /// handler's registered name. Case-variant strings do not match.
    fn supports(&self, block: &Block) -> bool;

    /// Pre-resolution pass executed before querying
    ///
    /// Returns a derived sort specification when the block's mode needs type
    /// metadata that would otherwise require a second lookup at handle time;
    /// `None` when nothing had to be resolved.
    async fn prepare(&self, block: &Block, context: &Context) -> SiftResult<Option<SortSpec>>;

    /// Fetch items for the block and write them into its data sink
    ///
    /// `prepared` is whatever the preceding `prepare` call returned. Passing
    /// `None` for a block whose mode depends on it is valid; the handler
    /// degrades as documented instead of failing.
    async fn handle(
        &self,
        block: &mut Block,
        prepared: Option<&SortSpec>,
        context: &Context,
    ) -> SiftResult<()>;
}

/// Translates one request parameter into criteria conditions
#[async_trait]
pub trait CriteriaRequestHandler: Send + Sync {
    /// Inspect the request and append any resulting conditions
    ///
    /// Must be a true no-op when the request carries nothing for this
    /// handler: the criteria is left untouched, not extended with an empty
    /// condition.
    async fn handle_request(
        &self,
        request: &SearchRequest,
        criteria: &mut Criteria,
        context: &Context,
    ) -> SiftResult<()>;
}
