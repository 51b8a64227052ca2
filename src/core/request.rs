//! Incoming search request parameters

use std::collections::HashMap;

/// String-typed parameter bag for one incoming search request
///
/// Criteria request handlers read individual parameters from this bag; a
/// missing parameter and an empty-string parameter are treated alike by
/// handlers (both mean "nothing requested").
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    params: HashMap<String, String>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Get a parameter value, if present
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }
}
