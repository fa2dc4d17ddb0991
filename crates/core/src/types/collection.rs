//! Ordered sets of [`CommunibaseId`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::{CommunibaseId, IdError};

/// An ordered, de-duplicated list of non-empty ids.
///
/// ## Examples
///
/// ```
/// use communibase_core::{CommunibaseId, CommunibaseIdCollection};
///
/// let ids = CommunibaseIdCollection::from_strings([
///     "5c3e042ea3eeb2010324a8e8",
///     "5c3e042ea3eeb2010324a8e8",
///     "",
/// ])
/// .unwrap();
///
/// assert_eq!(ids.len(), 1);
/// assert!(ids.contains(&CommunibaseId::parse("5c3e042ea3eeb2010324a8e8").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CommunibaseIdCollection {
    ids: Vec<CommunibaseId>,
}

impl CommunibaseIdCollection {
    /// Build a collection from strings.
    ///
    /// Empty strings are skipped and duplicates keep their first position.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Invalid`] if any non-empty string is not a valid id.
    pub fn from_strings<I, S>(strings: I) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collection = Self::default();
        for s in strings {
            let id = CommunibaseId::parse(s.as_ref())?;
            collection.push(id);
        }
        Ok(collection)
    }

    /// Build a collection from strings, skipping every invalid one.
    #[must_use]
    pub fn from_valid_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collection = Self::default();
        let mut skipped = 0_usize;
        for s in strings {
            match CommunibaseId::parse(s.as_ref()) {
                Ok(id) => collection.push(id),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "Ignored invalid ids");
        }
        collection
    }

    /// Build a collection from untyped document values.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::NotAnIdentifier`] for a member that is not a string
    /// or `null`, and [`IdError::Invalid`] for a malformed string.
    pub fn from_values(values: &[Value]) -> Result<Self, IdError> {
        let mut collection = Self::default();
        for value in values {
            collection.push(CommunibaseId::from_value(value)?);
        }
        Ok(collection)
    }

    /// Returns `true` if `needle` is part of this collection.
    #[must_use]
    pub fn contains(&self, needle: &CommunibaseId) -> bool {
        needle.is_in(&self.ids)
    }

    /// Number of ids in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the collection holds no ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over the ids in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CommunibaseId> {
        self.ids.iter()
    }

    /// Returns the ids as slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CommunibaseId] {
        &self.ids
    }

    /// Returns the ids as strings.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        CommunibaseId::to_strings(&self.ids)
    }

    /// Builds the `$ObjectId` query items for all ids.
    #[must_use]
    pub fn to_object_query(&self) -> Vec<Value> {
        CommunibaseId::to_object_query(&self.ids)
    }

    fn push(&mut self, id: CommunibaseId) {
        if !id.is_empty() && !self.contains(&id) {
            self.ids.push(id);
        }
    }
}

impl TryFrom<Vec<String>> for CommunibaseIdCollection {
    type Error = IdError;

    fn try_from(strings: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_strings(strings)
    }
}

impl From<CommunibaseIdCollection> for Vec<String> {
    fn from(collection: CommunibaseIdCollection) -> Self {
        collection.to_strings()
    }
}

impl FromIterator<CommunibaseId> for CommunibaseIdCollection {
    fn from_iter<T: IntoIterator<Item = CommunibaseId>>(iter: T) -> Self {
        let mut collection = Self::default();
        for id in iter {
            collection.push(id);
        }
        collection
    }
}

impl IntoIterator for CommunibaseIdCollection {
    type Item = CommunibaseId;
    type IntoIter = std::vec::IntoIter<CommunibaseId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommunibaseIdCollection {
    type Item = &'a CommunibaseId;
    type IntoIter = std::slice::Iter<'a, CommunibaseId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    const VALID_ID_STRING: &str = "5c3e042ea3eeb2010324a8e8";
    const VALID_ID_STRING_2: &str = "5c3e042951f0be010443a1d2";

    #[test]
    fn test_from_strings_rejects_invalid() {
        assert!(matches!(
            CommunibaseIdCollection::from_strings([VALID_ID_STRING, "foo"]),
            Err(IdError::Invalid(_))
        ));
    }

    #[test]
    fn test_len() {
        let ids = CommunibaseIdCollection::from_strings([VALID_ID_STRING, VALID_ID_STRING_2]).unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids = CommunibaseIdCollection::from_strings([VALID_ID_STRING, VALID_ID_STRING]).unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_contains() {
        let ids = CommunibaseIdCollection::from_strings([VALID_ID_STRING]).unwrap();
        assert!(ids.contains(&CommunibaseId::parse(VALID_ID_STRING).unwrap()));
        assert!(!ids.contains(&CommunibaseId::parse(VALID_ID_STRING_2).unwrap()));
    }

    #[test]
    fn test_is_empty() {
        let ids = CommunibaseIdCollection::from_strings([VALID_ID_STRING]).unwrap();
        assert!(!ids.is_empty());
        assert!(CommunibaseIdCollection::from_strings(Vec::<String>::new()).unwrap().is_empty());
        assert!(CommunibaseIdCollection::from_strings([""]).unwrap().is_empty());
    }

    #[test]
    fn test_from_valid_strings_skips_invalid() {
        let ids = CommunibaseIdCollection::from_valid_strings(["foo", VALID_ID_STRING, "", "bar"]);
        assert_eq!(ids.to_strings(), vec![VALID_ID_STRING]);
    }

    #[test]
    fn test_from_values() {
        let ids = CommunibaseIdCollection::from_values(&[json!(VALID_ID_STRING), Value::Null]).unwrap();
        assert_eq!(ids.len(), 1);

        assert!(matches!(
            CommunibaseIdCollection::from_values(&[json!(VALID_ID_STRING), json!(42)]),
            Err(IdError::NotAnIdentifier(_))
        ));
    }

    #[test]
    fn test_to_object_query() {
        let ids = CommunibaseIdCollection::from_strings([VALID_ID_STRING, VALID_ID_STRING_2]).unwrap();
        assert_eq!(
            ids.to_object_query(),
            vec![
                json!({"$ObjectId": VALID_ID_STRING}),
                json!({"$ObjectId": VALID_ID_STRING_2}),
            ]
        );
    }

    #[test]
    fn test_to_strings() {
        let strings = vec![VALID_ID_STRING, VALID_ID_STRING_2];
        let ids = CommunibaseIdCollection::from_strings(&strings).unwrap();
        assert_eq!(ids.to_strings(), strings);
    }

    #[test]
    fn test_serde() {
        let ids = CommunibaseIdCollection::from_strings([VALID_ID_STRING]).unwrap();
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, format!("[\"{VALID_ID_STRING}\"]"));

        let parsed: CommunibaseIdCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ids);
        assert!(serde_json::from_str::<CommunibaseIdCollection>("[\"foo\"]").is_err());
    }

    #[test]
    fn test_iteration_order() {
        let ids = CommunibaseIdCollection::from_strings([VALID_ID_STRING, VALID_ID_STRING_2]).unwrap();
        let results: Vec<&str> = ids.iter().map(CommunibaseId::as_str).collect();
        assert_eq!(results, vec![VALID_ID_STRING, VALID_ID_STRING_2]);

        let owned: Vec<CommunibaseId> = ids.into_iter().collect();
        assert_eq!(owned.len(), 2);
    }
}
