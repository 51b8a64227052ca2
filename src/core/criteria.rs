//! Composable query criteria
//!
//! A [`Criteria`] is built incrementally by independent handlers: each handler
//! inspects one input source (request parameters, stored block configuration)
//! and appends conditions or sort clauses. Handlers only ever append, never
//! replace or clear, so any number of handlers can contribute to the same
//! Criteria without clobbering each other.

use crate::core::condition::Condition;
use serde::{Deserialize, Serialize};

/// Sort direction for a single sort clause
///
/// `Random` has no seed or tie-break: repeated execution of the same criteria
/// is intentionally non-deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
    Random,
}

/// One sort clause within a criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortClause {
    /// Property to sort by; ignored by repositories when direction is Random
    pub property: String,
    pub direction: SortDirection,
}

impl SortClause {
    pub fn new(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    /// Shorthand for a random-order clause
    pub fn random() -> Self {
        Self::new("", SortDirection::Random)
    }
}

/// Composable query specification
///
/// Holds filters, sort order, pagination and hydration flags. Condition and
/// sort collections are mutated only through [`add_condition`](Self::add_condition)
/// and [`add_sort`](Self::add_sort); insertion order is preserved and affects
/// generated query order, not semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    conditions: Vec<Condition>,
    sort: Vec<SortClause>,

    /// Maximum number of items to return; `None` = unbounded
    pub limit: Option<u32>,

    /// Whether results should be hydrated with translated field values
    pub load_translations: bool,

    /// Whether results should be hydrated with associated records
    pub load_associations: bool,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition
    ///
    /// A condition structurally equal to one already present is skipped, so
    /// overlapping handlers cannot duplicate a filter.
    pub fn add_condition(&mut self, condition: Condition) {
        if self.conditions.contains(&condition) {
            return;
        }
        self.conditions.push(condition);
    }

    /// Append a sort clause
    pub fn add_sort(&mut self, clause: SortClause) {
        self.sort.push(clause);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn sort(&self) -> &[SortClause] {
        &self.sort
    }

    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}
