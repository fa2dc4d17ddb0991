//! Integration tests for references between documents.

#![allow(clippy::unwrap_used)]

use communibase_core::{
    Address, CommunibaseId, DocumentReference, Email, PhoneNumber, ReferenceError, ReferenceField,
};
use communibase_integration_tests::{PERSON_FIXTURE, VALID_ID_STRING, VALID_ID_STRING_2, fixture};
use serde_json::{Value, json};

fn person_reference() -> DocumentReference {
    let person = fixture(PERSON_FIXTURE);
    let id = CommunibaseId::from_value(&person["_id"]).unwrap();
    DocumentReference::create("Person", id).unwrap()
}

fn path_to(field: &str) -> Value {
    json!({
        "documentReference": {
            "rootDocumentId": VALID_ID_STRING_2,
            "rootDocumentEntityType": "Person"
        },
        "path": [{"field": field, "objectId": VALID_ID_STRING}]
    })
}

#[test]
fn test_references_to_sub_documents() {
    let person = fixture(PERSON_FIXTURE);
    let reference = person_reference();

    let email = Email::from_document(person["emailAddresses"][0].clone()).unwrap();
    let address = Address::from_document(person["addresses"][0].clone()).unwrap();
    let phone = PhoneNumber::from_document(person["phoneNumbers"][0].clone()).unwrap();

    assert_eq!(Value::Object(reference.to_email(&email)), path_to("emailAddresses"));
    assert_eq!(Value::Object(reference.to_address(&address)), path_to("addresses"));
    assert_eq!(Value::Object(reference.to_phone_number(&phone)), path_to("phoneNumbers"));
}

#[test]
fn test_reference_to_full_entity() {
    assert_eq!(
        Value::Object(person_reference().to_entity()),
        json!({
            "documentReference": {
                "rootDocumentId": VALID_ID_STRING_2,
                "rootDocumentEntityType": "Person"
            }
        })
    );
}

#[test]
fn test_reference_to_field_by_id() {
    let id = CommunibaseId::parse(VALID_ID_STRING).unwrap();
    let result = person_reference().to_field(ReferenceField::Addresses, &id);
    assert_eq!(Value::Object(result), path_to("addresses"));
}

#[test]
fn test_duplicated_entity_references_root_only() {
    let person = fixture(PERSON_FIXTURE);
    let email = Email::from_document(person["emailAddresses"][0].clone()).unwrap();

    let result = person_reference().to_email(&email.duplicate());
    assert!(result.contains_key("documentReference"));
    assert!(!result.contains_key("path"));
}

#[test]
fn test_incomplete_references_are_empty() {
    let unsaved = DocumentReference::create("Person", CommunibaseId::empty()).unwrap();
    assert!(unsaved.to_entity().is_empty());
    assert!(unsaved.to_email(&Email::from_email_address("a@b.nl")).is_empty());

    let untyped =
        DocumentReference::create("", CommunibaseId::parse(VALID_ID_STRING).unwrap()).unwrap();
    assert!(untyped.to_entity().is_empty());
}

#[test]
fn test_entity_type_casing() {
    assert_eq!(
        DocumentReference::create("person", CommunibaseId::empty()),
        Err(ReferenceError::InvalidEntityType("person".to_string()))
    );
    assert!(DocumentReference::create("Person", CommunibaseId::empty()).is_ok());
    assert!(DocumentReference::create("_Person", CommunibaseId::empty()).is_ok());
}
