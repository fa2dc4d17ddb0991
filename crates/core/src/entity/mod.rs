//! Entity façades over a [`PathStore`].
//!
//! Each entity owns one store seeded with its root key (`address`, `email`,
//! `phone`) and exposes typed accessors for the fields the server knows.
//! Entities are built from typed `*Data` records, or from raw documents
//! through [`serde`].

pub mod address;
pub mod email;
pub mod phone_number;

pub use address::{Address, AddressData, GeoLocation, GeoLocationError, GeoPoint};
pub use email::{Email, EmailData};
pub use phone_number::{PhoneNumber, PhoneNumberData};

use serde_json::{Map, Value};

use crate::store::PathStore;
use crate::types::{CommunibaseId, IdError};

/// Type given to emails and phone numbers that do not specify one.
pub const DEFAULT_TYPE: &str = "private";

/// Key of the identifier field inside every entity root.
pub(crate) const ID_FIELD: &str = "_id";

/// Builds the store for an entity from its data map.
///
/// # Errors
///
/// Returns [`IdError::Invalid`] if the data carries a malformed `_id`.
pub(crate) fn load_store(root: &str, data: Map<String, Value>) -> Result<PathStore, IdError> {
    if let Some(id) = data.get(ID_FIELD) {
        CommunibaseId::from_value(id)?;
    }
    let mut store = PathStore::with_root(root);
    store.add_entity_data(root, data);
    Ok(store)
}

/// Reads the id of the entity rooted at `root`.
pub(crate) fn id_of(store: &PathStore, root: &str) -> CommunibaseId {
    CommunibaseId::parse_lenient(&store.get_string(&format!("{root}.{ID_FIELD}")))
}

/// Deep-copies `store` without the entity id, so it describes a new record.
pub(crate) fn duplicate_store(store: &PathStore, root: &str) -> PathStore {
    let mut copy = store.clone();
    copy.remove(&format!("{root}.{ID_FIELD}"));
    copy
}

/// Inserts `value` under `key` if it is set.
pub(crate) fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        map.insert(key.to_owned(), Value::String(value));
    }
}

/// Deserializers for the loosely typed scalars the server sends.
pub(crate) mod scalar {
    use serde::de::{self, Deserialize, Deserializer};
    use serde_json::Value;

    /// A string field that may arrive as a string, a number or `null`.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(de::Error::custom(format!(
                "expected a string or number, found {other}"
            ))),
        }
    }

    /// A float field that may arrive as a number, a numeric string or `null`.
    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => super::number_like(&value)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected a number, found {value}"))),
        }
    }
}

/// Reads a number from a value that may hold it as text.
pub(crate) fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
