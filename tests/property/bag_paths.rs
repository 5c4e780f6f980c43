use fieldbag::path::{flatten, get, has, set};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Strategy for arbitrary JSON values nested up to `depth` levels.
fn arb_json(depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| json!(i)),
        "[a-z]{1,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z][a-z0-9]{0,5}", inner), 1..5).prop_map(|pairs| {
                let map: Map<String, Value> = pairs.into_iter().collect();
                Value::Object(map)
            }),
        ]
    })
}

/// Strategy for concrete dot-paths with non-numeric segments.
fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9_]{0,6}", 1..5).prop_map(|segments| segments.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn set_then_get_round_trips_on_a_fresh_bag(
        path in arb_path(),
        value in arb_json(2),
    ) {
        let mut bag = Value::Object(Map::new());
        set(&mut bag, &path, value.clone(), false);

        prop_assert!(has(&bag, &path), "has({:?}) is false after set", path);
        prop_assert_eq!(get(&bag, &path), Some(&value));
    }

    #[test]
    fn every_flattened_key_resolves_to_its_leaf(bag in arb_json(3)) {
        for (key, leaf) in flatten(&bag) {
            prop_assert_eq!(
                get(&bag, &key),
                Some(&leaf),
                "flattened key {:?} does not resolve", key
            );
        }
    }

    #[test]
    fn get_never_panics(
        path in "\\PC{0,30}",
        bag in arb_json(2),
    ) {
        let _ = get(&bag, &path);
        let _ = has(&bag, &path);
    }

    #[test]
    fn set_never_panics(
        path in "\\PC{0,30}",
        value in arb_json(1),
        bag in arb_json(2),
    ) {
        let mut bag = bag;
        set(&mut bag, &path, value, true);
    }
}
