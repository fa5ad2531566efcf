//! # riposte-store
//!
//! Local persistence for the Riposte application: a small string
//! key-value store backed by SQLite, playing the role the platform
//! key-value facility plays on device.  The crate exposes a synchronous
//! [`Database`] handle that wraps a `rusqlite::Connection`, plus typed
//! helpers for the two session records (current user, chat history).
//!
//! Persistence is a best-effort cache: callers are expected to log and
//! swallow [`StoreError`] rather than fail the primary operation.

pub mod database;
pub mod kv;
pub mod migrations;
pub mod session;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use session::{KEY_CHAT_HISTORY, KEY_USER};
