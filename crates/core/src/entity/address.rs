//! Postal address entity with optional geo location.

use core::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value, json};
use thiserror::Error;

use super::{duplicate_store, id_of, insert_opt, load_store, number_like, scalar};
use crate::error::Result;
use crate::store::{PathStore, is_blank, is_blank_str};
use crate::types::CommunibaseId;

const ROOT: &str = "address";

/// Country assumed for addresses without a country code.
pub const DEFAULT_COUNTRY_CODE: &str = "NL";

/// Errors raised when setting a geo location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoLocationError {
    /// Latitude outside `-90..=90` or longitude outside `-180..=180`.
    #[error("Invalid latitude/longitude: {latitude}, {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// `GeoJSON` point as stored by the server.
///
/// Coordinates are ordered `[longitude, latitude]`. Points are read as-is:
/// a point without usable coordinates loads fine and has no location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<Value>>,
    /// Fields this crate does not model, e.g. `crs`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeoPoint {
    /// A `Point` at `lat`/`lng`.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            kind: Some("Point".to_owned()),
            coordinates: Some(vec![json!(lng), json!(lat)]),
            extra: Map::new(),
        }
    }

    fn into_value(self) -> Value {
        let mut map = self.extra;
        insert_opt(&mut map, "type", self.kind);
        if let Some(coordinates) = self.coordinates {
            map.insert("coordinates".to_owned(), Value::Array(coordinates));
        }
        Value::Object(map)
    }
}

/// Construction record for an [`Address`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub street_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub street_number_addition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub country_code: Option<String>,
    /// Address type, e.g. `private` or `visit`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<GeoPoint>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AddressData {
    fn into_map(self) -> Map<String, Value> {
        let mut map = self.extra;
        insert_opt(&mut map, "_id", self.id);
        insert_opt(&mut map, "property", self.property);
        insert_opt(&mut map, "street", self.street);
        insert_opt(&mut map, "streetNumber", self.street_number);
        insert_opt(&mut map, "streetNumberAddition", self.street_number_addition);
        insert_opt(&mut map, "zipcode", self.zipcode);
        insert_opt(&mut map, "city", self.city);
        insert_opt(&mut map, "countryCode", self.country_code);
        insert_opt(&mut map, "type", self.kind);
        if let Some(latitude) = self.latitude {
            map.insert("latitude".to_owned(), json!(latitude));
        }
        if let Some(longitude) = self.longitude {
            map.insert("longitude".to_owned(), json!(longitude));
        }
        if let Some(point) = self.point {
            map.insert("point".to_owned(), point.into_value());
        }
        map
    }
}

/// A postal address sub-document.
///
/// An address counts as empty when street, street number, zipcode and city
/// are all blank; empty addresses have no state.
///
/// ## Examples
///
/// ```
/// use communibase_core::{Address, AddressData};
///
/// let address = Address::from_data(AddressData {
///     street: Some("Kingsweg".to_string()),
///     street_number: Some("1".to_string()),
///     zipcode: Some("1234AB".to_string()),
///     city: Some("Haarlem".to_string()),
///     ..AddressData::default()
/// })
/// .unwrap();
///
/// assert_eq!(address.to_string(), "Kingsweg 1, 1234AB, Haarlem");
/// assert_eq!(address.to_multi_line(), "Kingsweg 1\n1234AB Haarlem");
/// assert_eq!(address.country_code(), "NL");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    store: PathStore,
}

impl Default for Address {
    fn default() -> Self {
        Self::create()
    }
}

impl Address {
    /// Create an empty address.
    #[must_use]
    pub fn create() -> Self {
        Self {
            store: PathStore::with_root(ROOT),
        }
    }

    /// Create an address from its data record.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` carries a malformed `_id`.
    pub fn from_data(data: AddressData) -> Result<Self> {
        let store = load_store(ROOT, data.into_map())?;
        Ok(Self { store })
    }

    /// Create an address from a raw document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an address object or carries
    /// a malformed `_id`.
    pub fn from_document(document: Value) -> Result<Self> {
        Self::from_data(serde_json::from_value(document)?)
    }

    /// Returns the property (building) name.
    #[must_use]
    pub fn property(&self) -> String {
        self.store.get_string("address.property")
    }

    /// Sets the property (building) name.
    pub fn set_property(&mut self, property: impl Into<String>) {
        self.store.set("address.property", property.into());
    }

    /// Returns the trimmed street name.
    #[must_use]
    pub fn street(&self) -> String {
        self.trimmed("address.street")
    }

    /// Sets the street name.
    pub fn set_street(&mut self, street: impl Into<String>) {
        self.store.set("address.street", street.into());
    }

    /// Returns the street number.
    #[must_use]
    pub fn street_number(&self) -> String {
        self.store.get_string("address.streetNumber")
    }

    /// Sets the street number.
    pub fn set_street_number(&mut self, street_number: impl Into<String>) {
        self.store.set("address.streetNumber", street_number.into());
    }

    /// Returns the addition to the street number.
    #[must_use]
    pub fn street_number_addition(&self) -> String {
        self.store.get_string("address.streetNumberAddition")
    }

    /// Sets the addition to the street number, e.g. `a` or `bis`.
    pub fn set_street_number_addition(&mut self, addition: impl Into<String>) {
        self.store.set("address.streetNumberAddition", addition.into());
    }

    /// Returns the trimmed zipcode.
    #[must_use]
    pub fn zipcode(&self) -> String {
        self.trimmed("address.zipcode")
    }

    /// Sets the zipcode.
    pub fn set_zipcode(&mut self, zipcode: impl Into<String>) {
        self.store.set("address.zipcode", zipcode.into());
    }

    /// Returns the trimmed city.
    #[must_use]
    pub fn city(&self) -> String {
        self.trimmed("address.city")
    }

    /// Sets the city.
    pub fn set_city(&mut self, city: impl Into<String>) {
        self.store.set("address.city", city.into());
    }

    /// Returns the country code, or `NL` when none is stored.
    #[must_use]
    pub fn country_code(&self) -> String {
        self.country_code_or(DEFAULT_COUNTRY_CODE)
    }

    /// Returns the trimmed country code, or `default` when none is stored.
    #[must_use]
    pub fn country_code_or(&self, default: &str) -> String {
        match self.store.get("address.countryCode") {
            None | Some(Value::Null) => default.to_owned(),
            Some(_) => self.trimmed("address.countryCode"),
        }
    }

    /// Sets the ISO 3166 country code.
    pub fn set_country_code(&mut self, country_code: impl Into<String>) {
        self.store.set("address.countryCode", country_code.into());
    }

    /// Returns the trimmed address type (stored as `type`).
    #[must_use]
    pub fn kind(&self) -> String {
        self.trimmed("address.type")
    }

    /// Sets the address type.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.store.set("address.type", kind.into());
    }

    /// Returns the geo location, if both coordinates are known.
    ///
    /// A stored `point` takes precedence over the `latitude`/`longitude`
    /// fields.
    #[must_use]
    pub fn geo_location(&self) -> Option<GeoLocation> {
        if self.uses_point() {
            let coordinates = self.store.get("address.point.coordinates")?.as_array()?;
            let lng = number_like(coordinates.first()?)?;
            let lat = number_like(coordinates.get(1)?)?;
            return Some(GeoLocation { lat, lng });
        }
        let lat = number_like(self.store.get("address.latitude")?)?;
        let lng = number_like(self.store.get("address.longitude")?)?;
        Some(GeoLocation { lat, lng })
    }

    /// Store a geo location.
    ///
    /// Addresses that already hold a `point` get their coordinates updated;
    /// others store separate `latitude` and `longitude` fields.
    ///
    /// # Errors
    ///
    /// Returns [`GeoLocationError::OutOfRange`] if `latitude` is outside
    /// `-90..=90`, `longitude` is outside `-180..=180`, or either is NaN.
    pub fn set_geo_location(&mut self, latitude: f64, longitude: f64) -> Result<(), GeoLocationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoLocationError::OutOfRange { latitude, longitude });
        }
        if self.uses_point() {
            self.store.set("address.point.coordinates", json!([longitude, latitude]));
        } else {
            self.store.set("address.latitude", latitude);
            self.store.set("address.longitude", longitude);
        }
        Ok(())
    }

    /// Returns the sub-document id; empty if the address was never saved.
    #[must_use]
    pub fn id(&self) -> CommunibaseId {
        id_of(&self.store, ROOT)
    }

    /// Returns `true` if street, street number, zipcode and city are blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [self.street(), self.street_number(), self.zipcode(), self.city()]
            .iter()
            .all(|part| is_blank_str(part))
    }

    /// Returns the document to send to the server, or `None` when empty.
    #[must_use]
    pub fn state(&self) -> Option<Map<String, Value>> {
        if self.is_empty() {
            return None;
        }
        self.store.state(ROOT)
    }

    /// Copy of this address without its id, to be saved as a new record.
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

    /// Renders the address on one line: `street number addition, zipcode, city`.
    #[must_use]
    pub fn to_single_line(&self) -> String {
        self.render(", ", ", ")
    }

    /// Renders the address on two lines: street line, then `zipcode city`.
    #[must_use]
    pub fn to_multi_line(&self) -> String {
        self.render(" ", "\n")
    }

    fn render(&self, locality_separator: &str, line_separator: &str) -> String {
        if self.is_empty() {
            return String::new();
        }
        let street_line = join_filled(
            &[self.street(), self.street_number(), self.street_number_addition()],
            " ",
        );
        let locality = join_filled(&[self.zipcode(), self.city()], locality_separator);
        join_filled(&[street_line, locality], line_separator)
    }

    fn trimmed(&self, path: &str) -> String {
        self.store.get_string(path).trim().to_owned()
    }

    fn uses_point(&self) -> bool {
        self.store.get("address.point").is_some_and(|point| !is_blank(point))
    }
}

fn join_filled(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !is_blank_str(part))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_single_line())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}
