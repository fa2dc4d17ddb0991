//! Integration tests for the Communibase data types.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p communibase-integration-tests
//! ```
//!
//! Set `RUST_LOG=communibase_core=debug` to see the events emitted while
//! parsing phone numbers and ids.
//!
//! # Test Categories
//!
//! - `documents` - Entities loaded from and written back to raw documents
//! - `phone_numbers` - Phone number parsing and formatting
//! - `references` - Document references between entities
//! - `identifiers` - Id and id collection behavior

use std::sync::Once;

use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// A valid id, created 2019-01-15T16:02:54Z.
pub const VALID_ID_STRING: &str = "5c3e042ea3eeb2010324a8e8";

/// A second valid id.
pub const VALID_ID_STRING_2: &str = "5c3e042951f0be010443a1d2";

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Output is captured by the test harness and honours `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Parse a JSON fixture.
///
/// # Panics
///
/// Panics if `json` is not valid JSON; fixtures are compile-time strings.
#[must_use]
#[allow(clippy::expect_used)]
pub fn fixture(json: &str) -> Value {
    serde_json::from_str(json).expect("Invalid fixture")
}

/// A person document as returned by the Communibase API.
pub const PERSON_FIXTURE: &str = r#"{
    "_id": "5c3e042951f0be010443a1d2",
    "firstName": "Henk",
    "emailAddresses": [
        {"_id": "5c3e042ea3eeb2010324a8e8", "emailAddress": "henk@kingsquare.nl", "type": "work"}
    ],
    "addresses": [
        {
            "_id": "5c3e042ea3eeb2010324a8e8",
            "street": "Kingsweg",
            "streetNumber": 12,
            "streetNumberAddition": "",
            "zipcode": "1234AB",
            "city": "Haarlem",
            "countryCode": "NL",
            "type": "private",
            "point": {"type": "Point", "coordinates": [4.6462, 52.3874]}
        }
    ],
    "phoneNumbers": [
        {"_id": "5c3e042ea3eeb2010324a8e8", "countryCode": "31", "areaCode": 23, "subscriberNumber": "1234567", "type": "work"}
    ]
}"#;
