//! Identifier types.
//!
//! Communibase identifies documents by 24-character lowercase hex ids.

pub mod collection;
pub mod id;

pub use collection::CommunibaseIdCollection;
pub use id::{CommunibaseId, IdError};
