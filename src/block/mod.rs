//! Content-block model
//!
//! A [`Block`] is one rendering block on a content page: a component-type
//! name deciding which handler processes it, a typed configuration read
//! during processing, and an output data sink the handler writes results
//! into. Handlers append to config and data, they never replace the
//! collections wholesale, so several handlers can touch the same block.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed configuration value
///
/// Replaces the string-typed get/set of classic element configs: each key has
/// an explicit accessor contract (string vs integer) instead of late
/// string-to-number coercion at every read site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

/// Typed per-block configuration
///
/// Loaded before a block is prepared; read-only during handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockConfig {
    values: IndexMap<String, ConfigValue>,
}

impl BlockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a string value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get an integer value
    ///
    /// Stored strings holding an integer parse; anything else is `None`.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::Str(s) => s.trim().parse().ok(),
            ConfigValue::Bool(_) => None,
        }
    }
}

/// Output data sink for one block
///
/// Insertion-ordered map of plain JSON values. Only plain structured data
/// goes in here; anything with identity has to be converted to attributes
/// first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockData {
    values: IndexMap<String, Value>,
}

impl BlockData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One rendering block on a content page
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Component-type name used by the dispatcher to pick a handler
    pub component_type: String,
    pub config: BlockConfig,
    pub data: BlockData,
}

impl Block {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            config: BlockConfig::new(),
            data: BlockData::new(),
        }
    }

    pub fn with_config(mut self, config: BlockConfig) -> Self {
        self.config = config;
        self
    }
}
