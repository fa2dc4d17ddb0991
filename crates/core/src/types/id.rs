//! Communibase record identifiers.
//!
//! A [`CommunibaseId`] is the 24 character lowercase hexadecimal key the
//! server assigns to every document and sub-document, or the empty string for
//! a record that has not been persisted yet.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Errors that can occur when handling a [`CommunibaseId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is neither empty nor 24 lowercase hex characters.
    #[error("Invalid ID ({0})")]
    Invalid(String),
    /// An untyped value that cannot hold an id was found where ids were expected.
    #[error("Non CommunibaseId value found: {0}")]
    NotAnIdentifier(String),
    /// The creation timestamp embedded in the id cannot be represented.
    #[error("Invalid timestamp in ID ({0})")]
    InvalidDateTime(String),
}

/// A Communibase record identifier.
///
/// ## Constraints
///
/// - Either empty (the record has no id yet), or
/// - exactly 24 characters from `[a-f0-9]`
///
/// The first 8 hex characters encode the creation time in seconds since the
/// Unix epoch.
///
/// ## Examples
///
/// ```
/// use communibase_core::CommunibaseId;
///
/// assert!(CommunibaseId::parse("5c3e042ea3eeb2010324a8e8").is_ok());
/// assert!(CommunibaseId::parse("").unwrap().is_empty());
///
/// assert!(CommunibaseId::parse("foo").is_err());
/// assert!(CommunibaseId::parse("5C3E042EA3EEB2010324A8E8").is_err()); // uppercase
/// assert!(CommunibaseId::parse_lenient("foo").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommunibaseId(String);

impl CommunibaseId {
    /// Length of a non-empty id.
    pub const LENGTH: usize = 24;

    /// Number of leading hex characters holding the creation timestamp.
    const TIMESTAMP_LENGTH: usize = 8;

    /// Create an empty id, marking a record that has not been persisted.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Parse a `CommunibaseId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Invalid`] if the input is not empty and is not
    /// exactly 24 lowercase hexadecimal characters.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() || is_valid_id(s) {
            return Ok(Self(s.to_owned()));
        }
        Err(IdError::Invalid(s.to_owned()))
    }

    /// Parse a `CommunibaseId`, falling back to the empty id on invalid input.
    ///
    /// Used where malformed upstream data must not abort processing.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Discarding invalid id");
            Self::empty()
        })
    }

    /// Parse every string, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Invalid`] for the first string that is not a valid id.
    pub fn parse_all<I, S>(strings: I) -> Result<Vec<Self>, IdError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        strings
            .into_iter()
            .map(|s| Self::parse(s.as_ref()))
            .collect()
    }

    /// Convert an untyped document value into an id.
    ///
    /// `null` is the empty id and strings are parsed.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::NotAnIdentifier`] for numbers, booleans, arrays and
    /// objects, and [`IdError::Invalid`] for malformed strings.
    pub fn from_value(value: &Value) -> Result<Self, IdError> {
        match value {
            Value::Null => Ok(Self::empty()),
            Value::String(s) => Self::parse(s),
            other => Err(IdError::NotAnIdentifier(other.to_string())),
        }
    }

    /// Returns `true` if this id is empty (record not yet persisted).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns `true` if an equal id is present in `ids`.
    #[must_use]
    pub fn is_in(&self, ids: &[Self]) -> bool {
        ids.contains(self)
    }

    /// Returns the creation time encoded in the id.
    ///
    /// The empty id has no creation time and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidDateTime`] if the embedded timestamp cannot
    /// be represented as a date.
    pub fn created_at(&self) -> Result<Option<DateTime<Utc>>, IdError> {
        let Some(prefix) = self.0.get(..Self::TIMESTAMP_LENGTH) else {
            return Ok(None);
        };
        let seconds = u32::from_str_radix(prefix, 16)
            .map_err(|_| IdError::InvalidDateTime(self.0.clone()))?;
        DateTime::<Utc>::from_timestamp(i64::from(seconds), 0)
            .map(Some)
            .ok_or_else(|| IdError::InvalidDateTime(self.0.clone()))
    }

    /// Returns the non-empty ids as strings.
    #[must_use]
    pub fn to_strings(ids: &[Self]) -> Vec<String> {
        ids.iter()
            .filter(|id| !id.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Builds the `$ObjectId` query items the server expects for id lookups.
    #[must_use]
    pub fn to_object_query(ids: &[Self]) -> Vec<Value> {
        ids.iter().map(|id| json!({ "$ObjectId": id.as_str() })).collect()
    }
}

fn is_valid_id(s: &str) -> bool {
    s.len() == CommunibaseId::LENGTH
        && s.bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

impl fmt::Display for CommunibaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CommunibaseId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CommunibaseId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.is_empty() || is_valid_id(&s) {
            return Ok(Self(s));
        }
        Err(IdError::Invalid(s))
    }
}

impl From<CommunibaseId> for String {
    fn from(id: CommunibaseId) -> Self {
        id.0
    }
}

impl AsRef<str> for CommunibaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
