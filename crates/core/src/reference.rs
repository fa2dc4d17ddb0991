//! References from one document to another, or to one of its sub-documents.

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::entity::{Address, Email, PhoneNumber};
use crate::types::CommunibaseId;

/// Errors raised when building a [`DocumentReference`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The entity type starts with a lowercase letter.
    #[error("Non well formatted EntityType given ({0})")]
    InvalidEntityType(String),
}

/// Sub-document collections a reference can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    /// `emailAddresses`, holding [`Email`]s.
    EmailAddresses,
    /// `addresses`, holding [`Address`]es.
    Addresses,
    /// `phoneNumbers`, holding [`PhoneNumber`]s.
    PhoneNumbers,
}

impl ReferenceField {
    /// Field name on the root document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmailAddresses => "emailAddresses",
            Self::Addresses => "addresses",
            Self::PhoneNumbers => "phoneNumbers",
        }
    }
}

/// Points at a root document of a given entity type.
///
/// ## Examples
///
/// ```
/// use communibase_core::{CommunibaseId, DocumentReference};
/// use serde_json::{Value, json};
///
/// let id = CommunibaseId::parse("5c3e042951f0be010443a1d2").unwrap();
/// let reference = DocumentReference::create("Person", id).unwrap();
///
/// assert_eq!(
///     Value::Object(reference.to_entity()),
///     json!({"documentReference": {
///         "rootDocumentId": "5c3e042951f0be010443a1d2",
///         "rootDocumentEntityType": "Person"
///     }})
/// );
///
/// assert!(DocumentReference::create("person", CommunibaseId::empty()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    entity_type: String,
    root_id: CommunibaseId,
}

impl DocumentReference {
    /// Create a reference to the `entity_type` document with id `root_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::InvalidEntityType`] if `entity_type` starts
    /// with a lowercase letter; entity types are `PascalCase`.
    pub fn create(entity_type: impl Into<String>, root_id: CommunibaseId) -> Result<Self, ReferenceError> {
        let entity_type = entity_type.into();
        if entity_type.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(ReferenceError::InvalidEntityType(entity_type));
        }
        Ok(Self { entity_type, root_id })
    }

    /// Entity type of the root document, e.g. `Person`.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Id of the root document.
    #[must_use]
    pub const fn root_id(&self) -> &CommunibaseId {
        &self.root_id
    }

    /// Reference to the root document itself.
    #[must_use]
    pub fn to_entity(&self) -> Map<String, Value> {
        self.to_document(None)
    }

    /// Reference to `email` within the root's `emailAddresses`.
    #[must_use]
    pub fn to_email(&self, email: &Email) -> Map<String, Value> {
        self.to_field(ReferenceField::EmailAddresses, &email.id())
    }

    /// Reference to `address` within the root's `addresses`.
    #[must_use]
    pub fn to_address(&self, address: &Address) -> Map<String, Value> {
        self.to_field(ReferenceField::Addresses, &address.id())
    }

    /// Reference to `phone_number` within the root's `phoneNumbers`.
    #[must_use]
    pub fn to_phone_number(&self, phone_number: &PhoneNumber) -> Map<String, Value> {
        self.to_field(ReferenceField::PhoneNumbers, &phone_number.id())
    }

    /// Reference to the sub-document `object_id` within `field`.
    ///
    /// An empty `object_id` yields a reference to the root document.
    #[must_use]
    pub fn to_field(&self, field: ReferenceField, object_id: &CommunibaseId) -> Map<String, Value> {
        self.to_document(Some((field, object_id)))
    }

    /// Builds the reference document; `{}` if the reference is incomplete.
    fn to_document(&self, target: Option<(ReferenceField, &CommunibaseId)>) -> Map<String, Value> {
        let mut document = Map::new();
        if self.entity_type.is_empty() || self.root_id.is_empty() {
            return document;
        }

        document.insert(
            "documentReference".to_owned(),
            json!({
                "rootDocumentId": self.root_id.as_str(),
                "rootDocumentEntityType": self.entity_type,
            }),
        );
        if let Some((field, object_id)) = target.filter(|(_, id)| !id.is_empty()) {
            document.insert(
                "path".to_owned(),
                json!([{ "field": field.as_str(), "objectId": object_id.as_str() }]),
            );
        }
        document
    }
}
