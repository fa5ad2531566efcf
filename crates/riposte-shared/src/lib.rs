//! # riposte-shared
//!
//! Domain types and the error taxonomy shared by the Riposte crates.
//!
//! The types here are the currency of the whole application: the store
//! crate persists them, the client crate keeps them in its state
//! collections and hands them to the UI layer as-is.

pub mod error;
pub mod types;

pub use error::{
    AuthError, BillingError, ExtractionError, GenerationError, RegistrationError, RiposteError,
};
pub use types::{ChatMessage, MessageIdGen, MessageOrigin, User};
