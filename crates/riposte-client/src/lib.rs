//! # riposte-client
//!
//! The application core of Riposte: a single reducer-driven state store
//! plus the asynchronous action API the presentation layer calls into.
//!
//! The store is an explicit, constructed object ([`AppContext`]), created
//! once per app run and shared behind an `Arc`.  Screens read state via
//! [`AppContext::state`] or the [`AppContext::subscribe`] watch channel
//! and request transitions exclusively through the action methods; they
//! never mutate state directly.
//!
//! External intelligence (authentication, OCR, witty-reply generation,
//! billing) is consumed through the narrow traits in [`api`], with
//! simulated implementations in [`mock`].

pub mod api;
pub mod context;
pub mod mock;
pub mod state;

mod actions;

use tracing_subscriber::{fmt, EnvFilter};

pub use api::{AuthApi, BillingApi, OcrApi, ReplyApi};
pub use context::AppContext;
pub use state::{reduce, AppAction, AppState, ChatMessagePatch, PersistedData};

/// Initialise the global tracing subscriber.
///
/// The embedding shell calls this once at startup.  `RUST_LOG` overrides
/// the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("riposte_client=debug,riposte_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
