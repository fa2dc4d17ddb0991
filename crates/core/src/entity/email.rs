//! Email address entity.

use core::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{DEFAULT_TYPE, duplicate_store, id_of, insert_opt, load_store, scalar};
use crate::error::Result;
use crate::store::{PathStore, is_blank_str};
use crate::types::CommunibaseId;

const ROOT: &str = "email";

/// Construction record for an [`Email`], as found in Communibase documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailData {
    /// Sub-document id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub id: Option<String>,
    /// Email type, e.g. `private` or `work`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub kind: Option<String>,
    /// The address itself.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "scalar::opt_string")]
    pub email_address: Option<String>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmailData {
    fn into_map(self) -> Map<String, Value> {
        let mut map = self.extra;
        insert_opt(&mut map, "_id", self.id);
        let kind = self.kind.filter(|kind| !is_blank_str(kind));
        insert_opt(&mut map, "type", Some(kind.unwrap_or_else(|| DEFAULT_TYPE.to_owned())));
        insert_opt(&mut map, "emailAddress", self.email_address);
        map
    }
}

/// An email address sub-document.
///
/// The address itself is not validated: the server accepts whatever was
/// entered. An email without address has no state.
///
/// ## Examples
///
/// ```
/// use communibase_core::Email;
///
/// let email = Email::from_email_address("info@kingsquare.nl");
/// assert_eq!(email.email_address(), "info@kingsquare.nl");
/// assert_eq!(email.kind(), "private");
///
/// assert!(Email::create().state().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    store: PathStore,
}

impl Default for Email {
    fn default() -> Self {
        Self::create()
    }
}

impl Email {
    /// Create an empty email of type `private`.
    #[must_use]
    pub fn create() -> Self {
        let mut store = PathStore::with_root(ROOT);
        store.set("email.type", DEFAULT_TYPE);
        Self { store }
    }

    /// Create an email from its data record.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` carries a malformed `_id`.
    pub fn from_data(data: EmailData) -> Result<Self> {
        let store = load_store(ROOT, data.into_map())?;
        Ok(Self { store })
    }

    /// Create an email from a raw document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an email object or carries a
    /// malformed `_id`.
    pub fn from_document(document: Value) -> Result<Self> {
        Self::from_data(serde_json::from_value(document)?)
    }

    /// Create an email holding just `email_address`.
    #[must_use]
    pub fn from_email_address(email_address: impl Into<String>) -> Self {
        let mut email = Self::create();
        email.set_email_address(email_address);
        email
    }

    /// Returns the email address, or `""`.
    #[must_use]
    pub fn email_address(&self) -> String {
        self.store.get_string("email.emailAddress")
    }

    /// Sets the email address.
    pub fn set_email_address(&mut self, email_address: impl Into<String>) {
        self.store.set("email.emailAddress", email_address.into());
    }

    /// Returns the email type (stored as `type`).
    #[must_use]
    pub fn kind(&self) -> String {
        self.store.get_string("email.type")
    }

    /// Sets the email type.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.store.set("email.type", kind.into());
    }

    /// Returns the sub-document id; empty if the email was never saved.
    #[must_use]
    pub fn id(&self) -> CommunibaseId {
        id_of(&self.store, ROOT)
    }

    /// Returns `true` if no email address is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank_str(&self.email_address())
    }

    /// Returns the document to send to the server, or `None` when empty.
    #[must_use]
    pub fn state(&self) -> Option<Map<String, Value>> {
        if self.is_empty() {
            return None;
        }
        self.store.state(ROOT)
    }

    /// Copy of this email without its id, to be saved as a new record.
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

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email_address())
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}
