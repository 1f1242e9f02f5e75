// Property-based tests using proptest
use memquery_core::{matches_filter, Database, Document};
use proptest::prelude::*;
use serde_json::{json, Value};

// ========== PROPERTY 1: Empty query matches every document ==========

proptest! {
    #[test]
    fn prop_empty_query_matches_all(name in "[a-z]{1,20}", age in 0i64..150, active in any::<bool>()) {
        let doc = Document::from_value(&json!({"name": name, "age": age, "active": active})).unwrap();
        let empty_query = json!({});
        prop_assert!(matches_filter(&doc, &empty_query).unwrap());
    }
}

// ========== PROPERTY 2: find({}) returns every insert, in order ==========

proptest! {
    #[test]
    fn prop_find_all_preserves_insertion_order(ages in prop::collection::vec(0i64..1000, 1..20)) {
        let db = Database::new();
        db.create_collection("props").unwrap();
        for (i, age) in ages.iter().enumerate() {
            db.insert("props", &json!({"seq": i, "age": age})).unwrap();
        }

        let docs = db.find("props", &json!({})).unwrap();
        prop_assert_eq!(docs.len(), ages.len());
        for (i, doc) in docs.iter().enumerate() {
            prop_assert_eq!(doc["seq"].as_u64().unwrap() as usize, i);
        }
    }
}

// ========== PROPERTY 3: delete-then-find is empty ==========

proptest! {
    #[test]
    fn prop_delete_then_find_is_empty(ages in prop::collection::vec(0i64..100, 0..20), cutoff in 0i64..100) {
        let db = Database::new();
        db.create_collection("props").unwrap();
        for age in &ages {
            db.insert("props", &json!({"age": age})).unwrap();
        }

        let query = json!({"age": {"$lt": cutoff}});
        let removed = db.find_and_delete("props", &query).unwrap();
        let expected = ages.iter().filter(|a| **a < cutoff).count();
        prop_assert_eq!(removed.len(), expected);

        prop_assert!(db.find("props", &query).unwrap().is_empty());
        let remaining = db.find("props", &json!({})).unwrap();
        prop_assert_eq!(remaining.len(), ages.len() - expected);
    }
}

// ========== PROPERTY 4: $inc is additive ==========

proptest! {
    #[test]
    fn prop_inc_is_additive(start in -1000i64..1000, a in -1000i64..1000, b in -1000i64..1000) {
        let db = Database::new();
        db.create_collection("props").unwrap();
        db.insert("props", &json!({"x": start})).unwrap();

        db.find_and_update("props", &json!({}), &json!({"$inc": {"x": a}})).unwrap();
        db.find_and_update("props", &json!({}), &json!({"$inc": {"x": b}})).unwrap();

        let docs = db.find("props", &json!({})).unwrap();
        prop_assert_eq!(docs[0]["x"].as_f64().unwrap(), (start + a + b) as f64);
    }
}

// ========== PROPERTY 5: replacement update merges ==========

proptest! {
    #[test]
    fn prop_replacement_update_merges(age in 0i64..150, nickname in "[a-z]{1,10}") {
        let db = Database::new();
        db.create_collection("props").unwrap();
        db.insert("props", &json!({"name": "Bob", "age": age})).unwrap();

        let updated = db
            .find_and_update("props", &json!({"name": "Bob"}), &json!({"nickname": nickname.clone()}))
            .unwrap();
        prop_assert_eq!(updated, 1);

        let docs = db.find("props", &json!({"name": "Bob"})).unwrap();
        prop_assert_eq!(docs[0]["nickname"].as_str().unwrap(), nickname);
        prop_assert_eq!(docs[0]["age"].as_i64().unwrap(), age);
    }
}

// ========== PROPERTY 6: query key order does not matter ==========

proptest! {
    #[test]
    fn prop_query_key_order_irrelevant(age in 0i64..100, city_match in any::<bool>()) {
        let city = if city_match { "NYC" } else { "LA" };
        let doc = Document::from_value(&json!({"age": age, "city": city})).unwrap();

        let forward = json!({"age": {"$gte": 50}, "city": "NYC"});
        let reversed = json!({"city": "NYC", "age": {"$gte": 50}});

        prop_assert_eq!(
            matches_filter(&doc, &forward).unwrap(),
            matches_filter(&doc, &reversed).unwrap()
        );
    }
}

// ========== PROPERTY 7: equality is reflexive and symmetric ==========

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000i64..1000).prop_map(Value::from),
        (-100.0f64..100.0).prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_values_equal_reflexive(value in arb_value()) {
        prop_assert!(memquery_core::value_utils::values_equal(&value, &value));
    }

    #[test]
    fn prop_values_equal_symmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(
            memquery_core::value_utils::values_equal(&a, &b),
            memquery_core::value_utils::values_equal(&b, &a)
        );
    }
}

// ========== PROPERTY 8: matched count equals matching finds ==========

proptest! {
    #[test]
    fn prop_update_count_equals_find_count(ages in prop::collection::vec(0i64..100, 0..20), cutoff in 0i64..100) {
        let db = Database::new();
        db.create_collection("props").unwrap();
        for age in &ages {
            db.insert("props", &json!({"age": age})).unwrap();
        }

        let query = json!({"age": {"$gte": cutoff}});
        let found = db.find("props", &query).unwrap().len() as u64;
        let updated = db
            .find_and_update("props", &query, &json!({"$set": {"seen": true}}))
            .unwrap();
        prop_assert_eq!(updated, found);
    }
}
