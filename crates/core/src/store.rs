//! Path-addressed document storage.
//!
//! Communibase stores every entity as a loosely typed nested document. A
//! [`PathStore`] holds that document in memory and addresses its leaves with
//! dot-delimited paths whose first segment is a root key, e.g.
//! `address.street` or `phone.areaCode`.
//!
//! Reads never fail: a missing segment, or a segment that is not an object
//! where traversal has to continue, yields `None` (or the caller's default).
//! Writes create intermediate objects as needed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// A nested, path-addressed document.
///
/// Each entity owns exactly one store; stores are never shared. Cloning a
/// store deep-copies the whole document.
///
/// ## Examples
///
/// ```
/// use communibase_core::PathStore;
/// use serde_json::json;
///
/// let mut store = PathStore::with_root("address");
/// store.set("address.street", "Zandvoortselaan");
///
/// assert_eq!(store.get("address.street"), Some(&json!("Zandvoortselaan")));
/// assert_eq!(store.get("address.city"), None);
/// assert_eq!(store.get_string("address.city"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathStore(Map<String, Value>);

impl PathStore {
    /// Create an empty store without any root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with an empty object under `root`.
    #[must_use]
    pub fn with_root(root: &str) -> Self {
        let mut store = Self::new();
        store.0.insert(root.to_owned(), Value::Object(Map::new()));
        store
    }

    /// Returns the value at `path`, if every segment resolves.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(PATH_SEPARATOR);
        let root = segments.next()?;
        segments.try_fold(self.0.get(root)?, |node, segment| {
            node.as_object()?.get(segment)
        })
    }

    /// Returns the value at `path`, or `default` when it does not resolve.
    #[must_use]
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Returns the value at `path` coerced to a string.
    ///
    /// Coercion follows the server's loosely typed conventions: `null` and
    /// missing values become `""`, numbers their decimal text, `true` becomes
    /// `"1"` and `false` `""`. Arrays and objects have no string form and
    /// also yield `""`.
    #[must_use]
    pub fn get_string(&self, path: &str) -> String {
        self.get(path).map(scalar_to_string).unwrap_or_default()
    }

    /// Assigns `value` at `path`, creating intermediate objects as needed.
    ///
    /// An intermediate segment holding a non-object value is replaced by an
    /// empty object. An empty path is ignored.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let mut segments = path.split(PATH_SEPARATOR);
        let Some(first) = segments.next() else {
            return;
        };

        let mut key = first;
        let mut node = &mut self.0;
        for segment in segments {
            let child = node
                .entry(key.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(map) = child else {
                return;
            };
            node = map;
            key = segment;
        }
        node.insert(key.to_owned(), value.into());
    }

    /// Removes and returns the value at `path`.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        match path.rsplit_once(PATH_SEPARATOR) {
            None => self.0.remove(path),
            Some((parent, leaf)) => self.get_object_mut(parent)?.remove(leaf),
        }
    }

    /// Merges `data` into the object under `root`.
    ///
    /// Keys present in `data` overwrite existing leaves; nested objects are
    /// merged recursively; keys absent from `data` keep their prior values.
    /// This is what makes partial updates from the server safe to apply.
    pub fn add_entity_data(&mut self, root: &str, data: Map<String, Value>) {
        let target = self
            .0
            .entry(root.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !target.is_object() {
            *target = Value::Object(Map::new());
        }
        if let Value::Object(existing) = target {
            merge_into(existing, data);
        }
    }

    /// Returns a copy of the object under `root`.
    ///
    /// Returns `None` when the root is missing or is not an object. Whether
    /// the state counts as "empty" is up to the entity owning the store.
    #[must_use]
    pub fn state(&self, root: &str) -> Option<Map<String, Value>> {
        self.0.get(root)?.as_object().cloned()
    }

    /// Returns `true` if `path` resolves to a non-null value.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some_and(|value| !value.is_null())
    }

    /// Consumes the store and returns the underlying document.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn get_object_mut(&mut self, path: &str) -> Option<&mut Map<String, Value>> {
        let mut segments = path.split(PATH_SEPARATOR);
        let root = segments.next()?;
        let mut node = self.0.get_mut(root)?.as_object_mut()?;
        for segment in segments {
            node = node.get_mut(segment)?.as_object_mut()?;
        }
        Some(node)
    }
}

impl From<Map<String, Value>> for PathStore {
    fn from(document: Map<String, Value>) -> Self {
        Self(document)
    }
}

/// Coerces a scalar document value to its string form.
#[must_use]
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_owned(),
        Value::Null | Value::Bool(false) | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Returns `true` for values the server treats as "not set".
///
/// `null`, `""`, `"0"`, `0` and `false` are blank, as are empty containers.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => is_blank_str(s),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// String counterpart of [`is_blank`].
#[must_use]
pub fn is_blank_str(s: &str) -> bool {
    s.is_empty() || s == "0"
}

fn merge_into(target: &mut Map<String, Value>, data: Map<String, Value>) {
    for (key, value) in data {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = target.get_mut(&key) {
                merge_into(existing, incoming);
                continue;
            }
            target.insert(key, Value::Object(incoming));
        } else {
            target.insert(key, value);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_get_missing_path_returns_none() {
        let store = PathStore::with_root("address");
        assert_eq!(store.get("address.street"), None);
        assert_eq!(store.get("email.emailAddress"), None);
        assert_eq!(store.get(""), None);
    }

    #[test]
    fn test_get_or_returns_default() {
        let store = PathStore::with_root("address");
        let default = json!("NL");
        assert_eq!(store.get_or("address.countryCode", &default), &json!("NL"));
    }

    #[test]
    fn test_get_through_scalar_returns_none() {
        let mut store = PathStore::with_root("address");
        store.set("address.point", "not an object");
        assert_eq!(store.get("address.point.coordinates"), None);
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut store = PathStore::new();
        store.set("address.point.coordinates", json!([4.5, 52.3]));
        assert_eq!(
            store.state("address"),
            Some(object(json!({"point": {"coordinates": [4.5, 52.3]}})))
        );
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut store = PathStore::with_root("address");
        store.set("address.point", 12);
        store.set("address.point.coordinates", json!([1.0, 2.0]));
        assert_eq!(
            store.get("address.point.coordinates"),
            Some(&json!([1.0, 2.0]))
        );
    }

    #[test]
    fn test_get_string_coercion() {
        let mut store = PathStore::with_root("phone");
        store.set("phone.areaCode", 12);
        store.set("phone.subscriberNumber", "1234");
        store.set("phone.flag", true);
        store.set("phone.off", false);
        store.set("phone.nothing", Value::Null);

        assert_eq!(store.get_string("phone.areaCode"), "12");
        assert_eq!(store.get_string("phone.subscriberNumber"), "1234");
        assert_eq!(store.get_string("phone.flag"), "1");
        assert_eq!(store.get_string("phone.off"), "");
        assert_eq!(store.get_string("phone.nothing"), "");
        assert_eq!(store.get_string("phone.missing"), "");
    }

    #[test]
    fn test_add_entity_data_merges_partial_updates() {
        let mut store = PathStore::with_root("address");
        store.add_entity_data(
            "address",
            object(json!({"street": "Dam", "city": "Amsterdam", "point": {"type": "Point"}})),
        );
        store.add_entity_data(
            "address",
            object(json!({"city": "Zandvoort", "point": {"coordinates": [4.5, 52.3]}})),
        );

        assert_eq!(
            store.state("address"),
            Some(object(json!({
                "street": "Dam",
                "city": "Zandvoort",
                "point": {"type": "Point", "coordinates": [4.5, 52.3]}
            })))
        );
    }

    #[test]
    fn test_add_entity_data_creates_root() {
        let mut store = PathStore::new();
        store.add_entity_data("email", object(json!({"emailAddress": "a@b.nl"})));
        assert_eq!(store.get_string("email.emailAddress"), "a@b.nl");
    }

    #[test]
    fn test_remove() {
        let mut store = PathStore::with_root("email");
        store.set("email._id", "5c3e042ea3eeb2010324a8e8");
        assert_eq!(
            store.remove("email._id"),
            Some(json!("5c3e042ea3eeb2010324a8e8"))
        );
        assert_eq!(store.remove("email._id"), None);
        assert_eq!(store.remove("missing.path"), None);
        assert_eq!(store.state("email"), Some(Map::new()));
    }

    #[test]
    fn test_state_of_missing_root() {
        let store = PathStore::new();
        assert_eq!(store.state("phone"), None);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = PathStore::with_root("email");
        original.set("email.emailAddress", "info@kingsquare.nl");
        let mut copy = original.clone();
        copy.set("email.emailAddress", "other@kingsquare.nl");
        assert_eq!(original.get_string("email.emailAddress"), "info@kingsquare.nl");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!("0")));
        assert!(is_blank(&json!(0)));
        assert!(!is_blank(&json!("06")));
        assert!(!is_blank(&json!(6)));
    }

    #[test]
    fn test_serializes_as_plain_document() {
        let mut store = PathStore::with_root("email");
        store.set("email.type", "work");
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"email":{"type":"work"}}"#);
    }
}
