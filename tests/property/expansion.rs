use fieldbag::path::expand_wildcard_path;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_json(depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
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

/// Dot-paths where any segment may be the wildcard marker.
fn arb_wildcard_path() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![Just("*".to_string()), "[a-z][a-z0-9]{0,5}".prop_map(String::from)],
        1..5,
    )
    .prop_map(|segments| segments.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn expansion_never_panics(
        path in "\\PC{0,30}",
        bag in arb_json(2),
    ) {
        let _ = expand_wildcard_path(&bag, &path);
    }

    #[test]
    fn expansion_is_deterministic(
        path in arb_wildcard_path(),
        bag in arb_json(3),
    ) {
        let first = expand_wildcard_path(&bag, &path);
        let second = expand_wildcard_path(&bag, &path);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn expanded_paths_are_concrete_and_unique(
        path in arb_wildcard_path(),
        bag in arb_json(3),
    ) {
        let paths = expand_wildcard_path(&bag, &path);

        for concrete in &paths {
            // Data keys never contain the marker, so neither may results.
            prop_assert!(!concrete.contains('*'), "non-concrete path {:?}", concrete);
        }

        let mut deduped = paths.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), paths.len(), "duplicate paths in expansion");
    }

    #[test]
    fn concrete_paths_expand_to_themselves(
        path in prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..5)
            .prop_map(|segments| segments.join(".")),
        bag in arb_json(2),
    ) {
        prop_assert_eq!(expand_wildcard_path(&bag, &path), vec![path]);
    }

    #[test]
    fn expansion_matches_segment_counts(
        bag in arb_json(3),
        path in arb_wildcard_path(),
    ) {
        let expected = path.split('.').count();
        for concrete in expand_wildcard_path(&bag, &path) {
            prop_assert_eq!(
                concrete.split('.').count(),
                expected,
                "{:?} has a different segment count than {:?}", concrete, path
            );
        }
    }
}
