//! Core domain types.
//!
//! Every struct derives `Serialize` and `Deserialize` (camelCase field
//! names) so it can be persisted as JSON and handed directly to the UI
//! layer without a separate DTO step.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The authenticated account.
///
/// Created on successful login/signup, mutated only by premium-flag
/// changes, cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque account identifier assigned by the auth collaborator.
    pub id: String,
    pub email: String,
    /// Display name; defaults to the email local part when the auth
    /// collaborator supplies nothing better.
    pub name: String,
    pub is_premium: bool,
    /// Optional avatar image URL.
    pub avatar: Option<String>,
}

// ---------------------------------------------------------------------------
// Chat messages
// ---------------------------------------------------------------------------

/// How a chat message's text was obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageOrigin {
    /// Text pasted by the user.
    Paste,
    /// Text extracted from an uploaded screenshot.
    Screenshot,
}

impl MessageOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paste => "paste",
            Self::Screenshot => "screenshot",
        }
    }
}

impl std::fmt::Display for MessageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the chat history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique identifier, monotonically derived from creation time.
    /// See [`MessageIdGen`].
    pub id: String,
    /// The source text the user wants a comeback for.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub origin: MessageOrigin,
    /// Set only for [`MessageOrigin::Screenshot`] messages.
    pub image_uri: Option<String>,
    /// The generated reply; absent until generation completes.
    pub witty_reply: Option<String>,
    /// True while a reply-generation request is outstanding.
    #[serde(default)]
    pub is_processing: bool,
}

impl ChatMessage {
    /// Build a fresh message with the current timestamp, no reply and the
    /// in-flight flag cleared.
    pub fn new(
        id: String,
        text: impl Into<String>,
        origin: MessageOrigin,
        image_uri: Option<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            timestamp: Utc::now(),
            origin,
            image_uri,
            witty_reply: None,
            is_processing: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Message id generation
// ---------------------------------------------------------------------------

/// Mints chat-message identifiers: the millisecond timestamp at creation,
/// bumped past the last issued value so ids stay unique and strictly
/// increasing even when several messages are created inside one
/// millisecond.
#[derive(Debug, Default)]
pub struct MessageIdGen {
    last: AtomicI64,
}

impl MessageIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next identifier as an opaque decimal string.
    pub fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(observed) => prev = observed,
            }
        }
    }
}
