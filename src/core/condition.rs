//! Filter condition variants
//!
//! A [`Condition`] is one filter predicate inside a criteria. The set of
//! variants is closed; conditions are immutable after construction and
//! equality is structural so that overlapping handlers can be deduplicated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One filter predicate within a [`Criteria`](crate::core::Criteria)
///
/// Repositories combine conditions with logical AND. Within a single
/// `Variant` condition the listed option ids are alternatives (logical OR),
/// so a set of variant conditions reads "the item carries at least one option
/// from every group".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Matches rows whose named property value is one of `values`
    Property { property: String, values: Vec<Value> },

    /// Matches rows carrying at least one configurator option of the group
    Variant { group_id: i64, option_ids: Vec<i64> },
}

impl Condition {
    pub fn property(property: impl Into<String>, values: Vec<Value>) -> Self {
        Condition::Property {
            property: property.into(),
            values,
        }
    }

    pub fn variant(group_id: i64, option_ids: Vec<i64>) -> Self {
        Condition::Variant {
            group_id,
            option_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structural_equality_same_fields() {
        let a = Condition::property("id", vec![json!(1), json!(2)]);
        let b = Condition::property("id", vec![json!(1), json!(2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_structural_equality_value_order_matters() {
        let a = Condition::property("id", vec![json!(1), json!(2)]);
        let b = Condition::property("id", vec![json!(2), json!(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_variants_never_equal_across_kinds() {
        let a = Condition::property("id", vec![json!(5)]);
        let b = Condition::variant(5, vec![5]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_condition_serializes_tagged() {
        let c = Condition::variant(3, vec![9, 10]);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["type"], json!("variant"));
        assert_eq!(v["group_id"], json!(3));
    }
}
