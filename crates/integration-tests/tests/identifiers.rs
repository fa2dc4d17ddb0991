//! Integration tests for ids and id collections as they travel through
//! documents and queries.

#![allow(clippy::unwrap_used)]

use communibase_core::{CommunibaseId, CommunibaseIdCollection, IdError};
use communibase_integration_tests::{PERSON_FIXTURE, VALID_ID_STRING, VALID_ID_STRING_2, fixture, init_tracing};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// RFC 3339 creation time of `id`, or `""` for the empty id.
fn created_at_string(id: &CommunibaseId) -> String {
    id.created_at()
        .unwrap()
        .map(|at| at.to_rfc3339())
        .unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Group {
    #[serde(rename = "_id")]
    id: CommunibaseId,
    member_ids: CommunibaseIdCollection,
}

#[test]
fn test_ids_in_typed_documents() {
    let group: Group = serde_json::from_value(json!({
        "_id": VALID_ID_STRING,
        "memberIds": [VALID_ID_STRING_2, VALID_ID_STRING_2, ""]
    }))
    .unwrap();

    assert_eq!(group.id.as_str(), VALID_ID_STRING);
    assert_eq!(group.member_ids.to_strings(), vec![VALID_ID_STRING_2]);
    assert_eq!(
        serde_json::to_value(&group).unwrap(),
        json!({"_id": VALID_ID_STRING, "memberIds": [VALID_ID_STRING_2]})
    );
}

#[test]
fn test_invalid_ids_in_typed_documents_are_rejected() {
    let result = serde_json::from_value::<Group>(json!({"_id": "foo", "memberIds": []}));
    assert!(result.is_err());

    let result = serde_json::from_value::<Group>(json!({"_id": "", "memberIds": ["bar"]}));
    assert!(result.is_err());
}

#[test]
fn test_ids_from_fixture() {
    let person = fixture(PERSON_FIXTURE);
    let id = CommunibaseId::from_value(&person["_id"]).unwrap();
    assert_eq!(id.as_str(), VALID_ID_STRING_2);

    let nested: Vec<Value> = person["addresses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|address| address["_id"].clone())
        .collect();
    let ids = CommunibaseIdCollection::from_values(&nested).unwrap();
    assert_eq!(ids.len(), 1);
}

#[test]
fn test_object_query() {
    let ids = CommunibaseIdCollection::from_valid_strings([VALID_ID_STRING, "foo", VALID_ID_STRING_2]);
    let query = json!({"_id": {"$in": ids.to_object_query()}});
    assert_eq!(
        query,
        json!({"_id": {"$in": [
            {"$ObjectId": VALID_ID_STRING},
            {"$ObjectId": VALID_ID_STRING_2}
        ]}})
    );
}

#[test]
fn test_lenient_parsing_logs_and_continues() {
    init_tracing();
    assert!(CommunibaseId::parse_lenient("5c3e042ea3eeb2010324a8e").is_empty());
    assert_eq!(CommunibaseId::parse_lenient(VALID_ID_STRING).as_str(), VALID_ID_STRING);
}

#[test]
fn test_creation_time() {
    let id = CommunibaseId::parse(VALID_ID_STRING).unwrap();
    assert_eq!(created_at_string(&id), "2019-01-15T16:02:54+00:00");
    assert_eq!(created_at_string(&CommunibaseId::empty()), "");
}

#[test]
fn test_errors_name_the_input() {
    assert_eq!(
        CommunibaseId::parse("foo").unwrap_err(),
        IdError::Invalid("foo".to_string())
    );
    assert_eq!(CommunibaseId::parse("foo").unwrap_err().to_string(), "Invalid ID (foo)");
}

proptest! {
    #[test]
    fn collections_keep_first_occurrence_order(ids in prop::collection::vec("[a-f0-9]{24}", 0..16)) {
        let collection = CommunibaseIdCollection::from_strings(&ids).unwrap();

        let mut expected: Vec<String> = Vec::new();
        for id in ids {
            if !expected.contains(&id) {
                expected.push(id);
            }
        }
        prop_assert_eq!(collection.to_strings(), expected);
    }
}
