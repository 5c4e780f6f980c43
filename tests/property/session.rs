use fieldbag::Validator;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_flat_bag() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| json!(i)),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    prop::collection::vec(("[a-z][a-z0-9]{0,5}", scalar), 0..6).prop_map(|pairs| {
        let map: Map<String, Value> = pairs.into_iter().collect();
        Value::Object(map)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn validate_twice_yields_identical_error_bags(bag in arb_flat_bag()) {
        let rules = json!({
            "email": "required|email",
            "name": "min:3",
            "age": "numeric",
        });
        let mut validation = Validator::default()
            .make(bag, &rules)
            .expect("rules should resolve");

        validation.validate();
        let first = validation.errors().clone();
        validation.validate();

        prop_assert_eq!(&first, validation.errors());
    }

    #[test]
    fn attribute_without_failing_rules_records_nothing(
        name in "[a-z]{3,8}",
        bag in arb_flat_bag(),
    ) {
        let mut bag = bag;
        if let Some(map) = bag.as_object_mut() {
            map.insert("field".to_string(), Value::String(name));
        }
        let validation = Validator::default()
            .validate(bag, &json!({"field": "required|alpha|min:3"}))
            .expect("rules should resolve");

        prop_assert!(validation.errors().all("field").is_empty());
        prop_assert!(validation.passes());
    }

    #[test]
    fn wildcard_sessions_never_panic(values in prop::collection::vec(any::<i64>(), 0..6)) {
        let items: Vec<Value> = values.iter().map(|v| json!({"qty": v})).collect();
        let validation = Validator::default()
            .validate(json!({"items": items}), &json!({"items.*.qty": "required|numeric"}))
            .expect("rules should resolve");

        // Every element is present and numeric.
        prop_assert!(validation.passes());
    }
}
