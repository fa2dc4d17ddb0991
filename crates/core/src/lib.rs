//! Communibase Core - data types for Communibase documents.
//!
//! This crate models the pieces of Communibase documents that clients build
//! and edit locally before sending them to the server:
//! - identifiers and identifier collections
//! - address, email and phone number sub-documents
//! - references from one document to another
//!
//! # Architecture
//!
//! The crate contains types only - no I/O, no HTTP client. Entities are thin
//! façades over a [`PathStore`], a nested JSON map addressed by dotted paths.
//! Their [`state`](Email::state) is what gets sent to the server.
//!
//! # Modules
//!
//! - [`types`] - Validated ids and id collections
//! - [`store`] - The dotted-path document store
//! - [`entity`] - Address, email and phone number entities
//! - [`phone`] - Phone number parsing and formatting
//! - [`reference`] - Document references
//! - [`config`] - Environment configuration for the phone codec
//! - [`error`] - The crate-wide error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod entity;
pub mod error;
pub mod phone;
pub mod reference;
pub mod store;
pub mod types;

pub use config::{CodecConfig, ConfigError};
pub use entity::{Address, AddressData, Email, EmailData, GeoLocation, GeoLocationError, PhoneNumber, PhoneNumberData};
pub use error::{Error, Result};
pub use phone::{PhoneNumberCodec, PhoneNumberParts};
pub use reference::{DocumentReference, ReferenceError, ReferenceField};
pub use store::PathStore;
pub use types::*;
