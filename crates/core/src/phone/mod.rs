//! Phone number decomposition and formatting.
//!
//! - [`PhoneNumberCodec`] - parses free-form numbers and formats them from
//!   `c`/`a`/`s` templates
//! - [`NumberPlan`] - numbering plan metadata injected into the codec
//!   ([`DutchNumberPlan`] is the only supported region)

pub mod codec;
pub mod metadata;

pub use codec::{DEFAULT_FORMAT, PhoneNumberCodec, PhoneNumberParts};
pub use metadata::{DutchNumberPlan, NumberPlan, plan_for_region};
