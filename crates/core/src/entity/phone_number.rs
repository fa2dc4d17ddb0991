//! Phone number entity.

use core::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{DEFAULT_TYPE, duplicate_store, id_of, insert_opt, load_store, scalar};
use crate::error::Result;
use crate::phone::{PhoneNumberCodec, PhoneNumberParts};
use crate::store::{PathStore, is_blank_str};
use crate::types::CommunibaseId;

const ROOT: &str = "phone";

/// Construction record for a [`PhoneNumber`].
///
/// The server stores the parts as strings but older documents hold them as
/// numbers; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberData {
    /// Sub-document id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub id: Option<String>,
    /// Phone type, e.g. `private` or `mobile`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub kind: Option<String>,
    /// Country code without `+`.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub country_code: Option<String>,
    /// Area code.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub area_code: Option<String>,
    /// Subscriber number.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub subscriber_number: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PhoneNumberData {
    fn into_map(self) -> Map<String, Value> {
        let mut map = self.extra;
        insert_opt(&mut map, "_id", self.id);
        let kind = self.kind.filter(|kind| !is_blank_str(kind));
        insert_opt(&mut map, "type", Some(kind.unwrap_or_else(|| DEFAULT_TYPE.to_owned())));
        insert_opt(&mut map, "countryCode", self.country_code);
        insert_opt(&mut map, "areaCode", self.area_code);
        insert_opt(&mut map, "subscriberNumber", self.subscriber_number);
        map
    }
}

/// A phone number sub-document stored as country code, area code and
/// subscriber number.
///
/// Free-form input goes through a [`PhoneNumberCodec`]; the plain setters
/// and constructors use [`PhoneNumberCodec::shared`]. Input the codec cannot
/// read leaves all parts empty, which makes the entity empty.
///
/// ## Examples
///
/// ```
/// use communibase_core::PhoneNumber;
///
/// let phone = PhoneNumber::from_string("+31 (0)6-123 456 78");
/// assert_eq!(phone.to_string(), "+31 (6) 12345678");
/// assert_eq!(phone.to_string_with(Some("a-s")), "06-12345678");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumber {
    store: PathStore,
}

impl Default for PhoneNumber {
    fn default() -> Self {
        Self::create()
    }
}

impl PhoneNumber {
    /// Create an empty phone number of type `private`.
    #[must_use]
    pub fn create() -> Self {
        let mut store = PathStore::with_root(ROOT);
        store.set("phone.type", DEFAULT_TYPE);
        Self { store }
    }

    /// Create a phone number from its data record.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` carries a malformed `_id`.
    pub fn from_data(data: PhoneNumberData) -> Result<Self> {
        let store = load_store(ROOT, data.into_map())?;
        Ok(Self { store })
    }

    /// Create a phone number from a raw document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a phone object or carries a
    /// malformed `_id`.
    pub fn from_document(document: Value) -> Result<Self> {
        Self::from_data(serde_json::from_value(document)?)
    }

    /// Create a phone number by parsing free-form `input`.
    #[must_use]
    pub fn from_string(input: &str) -> Self {
        let mut phone = Self::create();
        phone.set_phone_number(input);
        phone
    }

    /// Replace all parts by parsing `input` with the shared codec.
    pub fn set_phone_number(&mut self, input: &str) {
        self.set_phone_number_with(PhoneNumberCodec::shared(), input);
    }

    /// Replace all parts by parsing `input` with `codec`.
    pub fn set_phone_number_with(&mut self, codec: &PhoneNumberCodec, input: &str) {
        self.set_parts(codec.parse(input));
    }

    /// Replace all parts.
    pub fn set_parts(&mut self, parts: PhoneNumberParts) {
        self.store.set("phone.countryCode", parts.country_code);
        self.store.set("phone.areaCode", parts.area_code);
        self.store.set("phone.subscriberNumber", parts.subscriber_number);
    }

    /// Returns the stored parts.
    #[must_use]
    pub fn parts(&self) -> PhoneNumberParts {
        PhoneNumberParts::new(
            self.store.get_string("phone.countryCode"),
            self.store.get_string("phone.areaCode"),
            self.store.get_string("phone.subscriberNumber"),
        )
    }

    /// Format with the shared codec; `None` uses the default template.
    #[must_use]
    pub fn to_string_with(&self, template: Option<&str>) -> String {
        self.format_with(PhoneNumberCodec::shared(), template)
    }

    /// Format with `codec`; `None` uses the codec's default template.
    #[must_use]
    pub fn format_with(&self, codec: &PhoneNumberCodec, template: Option<&str>) -> String {
        codec.format(&self.parts(), template)
    }

    /// Returns the phone type (stored as `type`).
    #[must_use]
    pub fn kind(&self) -> String {
        self.store.get_string("phone.type")
    }

    /// Sets the phone type.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.store.set("phone.type", kind.into());
    }

    /// Returns the sub-document id; empty if the number was never saved.
    #[must_use]
    pub fn id(&self) -> CommunibaseId {
        id_of(&self.store, ROOT)
    }

    /// Returns `true` if both area code and subscriber number are blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts().is_empty()
    }

    /// Returns the document to send to the server, or `None` when empty.
    #[must_use]
    pub fn state(&self) -> Option<Map<String, Value>> {
        if self.is_empty() {
            return None;
        }
        self.store.state(ROOT)
    }

    /// Copy of this number without its id, to be saved as a new record.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            store: duplicate_store(&self.store, ROOT),
        }
    }

    /// The backing document.
    #[must_use]
    pub const fn document(&self) -> &PathStore {
        &self.store
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(None))
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}
