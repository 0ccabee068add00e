//! Deep merge of configuration trees.
//!
//! Semantics:
//! - Mappings merge recursively: keys only in `incoming` are added, keys in both
//!   are merged if both sides are mappings
//! - Any other combination replaces the accumulator value with `incoming`
//! - Sequences are replaced wholesale, never concatenated
//! - `null` in `incoming` is an ordinary value and replaces, it does not delete

use serde_json::Value;

/// Merge `incoming` into `accumulator` in place; `incoming` wins at the leaves.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use cascade_config::merge::merge;
///
/// let mut acc = json!({"root": {"prop1": "foo", "prop2": 100}});
/// merge(&mut acc, json!({"root": {"prop2": 200}}));
/// assert_eq!(acc, json!({"root": {"prop1": "foo", "prop2": 200}}));
/// ```
pub fn merge(accumulator: &mut Value, incoming: Value) {
    match (accumulator, incoming) {
        (Value::Object(acc_map), Value::Object(incoming_map)) => {
            for (key, incoming_value) in incoming_map {
                match acc_map.get_mut(&key) {
                    Some(existing) => merge(existing, incoming_value),
                    None => {
                        acc_map.insert(key, incoming_value);
                    }
                }
            }
        }
        (slot, incoming) => *slot = incoming,
    }
}

/// Fold a sequence of trees, in order, into one.
pub fn merge_all<I>(trees: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut acc = Value::Object(serde_json::Map::new());
    for tree in trees {
        merge(&mut acc, tree);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn merged(mut target: Value, incoming: Value) -> Value {
        merge(&mut target, incoming);
        target
    }

    #[test]
    fn test_merge_disjoint_objects() {
        assert_eq!(merged(json!({"a": 1}), json!({"b": 2})), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_merge_overlapping_objects() {
        assert_eq!(
            merged(json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4})),
            json!({"a": 1, "b": 3, "c": 4})
        );
    }

    #[test]
    fn test_merge_nested_objects() {
        assert_eq!(
            merged(json!({"a": {"x": 1, "y": 2}}), json!({"a": {"y": 3, "z": 4}})),
            json!({"a": {"x": 1, "y": 3, "z": 4}})
        );
    }

    #[test]
    fn test_null_replaces_instead_of_deleting() {
        assert_eq!(
            merged(json!({"a": 1, "b": 2}), json!({"b": null})),
            json!({"a": 1, "b": null})
        );
    }

    #[test]
    fn test_sequence_replaces_not_concatenates() {
        assert_eq!(
            merged(json!({"a": [1, 2, 3]}), json!({"a": [4, 5]})),
            json!({"a": [4, 5]})
        );
    }

    #[test]
    fn test_falsy_values_still_override() {
        assert_eq!(
            merged(
                json!({"flag": true, "count": 7, "name": "x"}),
                json!({"flag": false, "count": 0, "name": ""})
            ),
            json!({"flag": false, "count": 0, "name": ""})
        );
    }

    #[test]
    fn test_scalar_replaces_object() {
        assert_eq!(
            merged(json!({"a": {"nested": true}}), json!({"a": 42})),
            json!({"a": 42})
        );
    }

    #[test]
    fn test_object_replaces_scalar() {
        assert_eq!(
            merged(json!({"a": 42}), json!({"a": {"nested": true}})),
            json!({"a": {"nested": true}})
        );
    }

    #[test]
    fn test_merge_all_later_wins() {
        let result = merge_all([
            json!({"p1": "default", "p2": "default", "p3": "default"}),
            json!({"p2": "production", "p3": "production"}),
            json!({"p3": "production-inst1"}),
        ]);
        assert_eq!(
            result,
            json!({"p1": "default", "p2": "production", "p3": "production-inst1"})
        );
    }

    proptest! {
        /// Merging a single tree into an empty accumulator yields that tree.
        #[test]
        fn prop_single_source_is_unchanged(tree in arb_json_object()) {
            prop_assert_eq!(merge_all([tree.clone()]), tree);
        }

        /// Merging the same tree twice equals merging it once.
        #[test]
        fn prop_idempotent_merge(target in arb_json_object(), patch in arb_json_object()) {
            let once = merged(target, patch.clone());
            let twice = merged(once.clone(), patch);
            prop_assert_eq!(once, twice);
        }

        /// Every leaf of the incoming tree is present in the result.
        #[test]
        fn prop_incoming_keys_win(target in arb_json_object(), patch in arb_json_object()) {
            let result = merged(target, patch.clone());
            if let (Value::Object(result), Value::Object(patch)) = (&result, &patch) {
                for (key, value) in patch {
                    if !value.is_object() {
                        prop_assert_eq!(result.get(key), Some(value));
                    }
                }
            }
        }
    }

    fn arb_json_object() -> impl Strategy<Value = Value> {
        prop::collection::hash_map("[a-z]{1,3}", arb_json_value(), 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    fn arb_json_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,10}".prop_map(Value::String),
            prop::collection::vec(any::<i64>().prop_map(Value::from), 0..3).prop_map(Value::Array),
            prop::collection::hash_map("[a-z]{1,2}", arb_leaf_value(), 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    }

    fn arb_leaf_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,10}".prop_map(Value::String),
        ]
    }
}
