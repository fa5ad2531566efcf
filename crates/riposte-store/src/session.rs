//! Typed helpers for the two session records.
//!
//! The current user and the chat history are serialized as JSON under
//! fixed keys.  Timestamps travel as RFC-3339 strings and come back as
//! proper instants through the types' serde definitions.

use riposte_shared::{ChatMessage, User};

use crate::database::Database;
use crate::error::Result;

/// Key holding the serialized current [`User`].
pub const KEY_USER: &str = "user";

/// Key holding the serialized chat history (JSON array, newest first).
pub const KEY_CHAT_HISTORY: &str = "chat_history";

impl Database {
    // ------------------------------------------------------------------
    // User
    // ------------------------------------------------------------------

    /// Persist the current user, overwriting any prior record.
    pub fn save_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.set(KEY_USER, &json)
    }

    /// Load the persisted user, or `None` when nothing was saved.
    pub fn load_user(&self) -> Result<Option<User>> {
        match self.get(KEY_USER)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Chat history
    // ------------------------------------------------------------------

    /// Persist the full chat history, overwriting any prior record.
    pub fn save_chat_history(&self, history: &[ChatMessage]) -> Result<()> {
        let json = serde_json::to_string(history)?;
        self.set(KEY_CHAT_HISTORY, &json)
    }

    /// Load the persisted chat history, or `None` when nothing was saved.
    pub fn load_chat_history(&self) -> Result<Option<Vec<ChatMessage>>> {
        match self.get(KEY_CHAT_HISTORY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Logout
    // ------------------------------------------------------------------

    /// Remove both session records.  Absent keys are fine.
    pub fn clear_session(&self) -> Result<()> {
        self.remove(KEY_USER)?;
        self.remove(KEY_CHAT_HISTORY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_shared::{MessageIdGen, MessageOrigin};

    fn sample_user(premium: bool) -> User {
        User {
            id: "1".into(),
            email: "demo@x.com".into(),
            name: "demo".into(),
            is_premium: premium,
            avatar: None,
        }
    }

    #[test]
    fn user_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let user = sample_user(true);

        db.save_user(&user).unwrap();
        assert_eq!(db.load_user().unwrap(), Some(user));
    }

    #[test]
    fn chat_history_round_trip_preserves_fields() {
        let db = Database::open_in_memory().unwrap();
        let ids = MessageIdGen::new();

        let mut replied = ChatMessage::new(
            ids.next_id(),
            "You seem like such an interesting person.",
            MessageOrigin::Screenshot,
            Some("file:///shots/1.png".into()),
        );
        replied.witty_reply = Some("Smooth operator detected!".into());
        let pending = ChatMessage::new(ids.next_id(), "hi", MessageOrigin::Paste, None);

        let history = vec![pending.clone(), replied.clone()];
        db.save_chat_history(&history).unwrap();

        let loaded = db.load_chat_history().unwrap().expect("saved history");
        assert_eq!(loaded, history);
        assert_eq!(loaded[1].witty_reply.as_deref(), Some("Smooth operator detected!"));
        assert_eq!(loaded[1].origin, MessageOrigin::Screenshot);
        assert_eq!(loaded[0].timestamp, pending.timestamp);
    }

    #[test]
    fn load_on_empty_database_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.load_user().unwrap(), None);
        assert_eq!(db.load_chat_history().unwrap(), None);
    }

    #[test]
    fn corrupt_record_is_an_error_not_a_panic() {
        let db = Database::open_in_memory().unwrap();
        db.set(KEY_USER, "{not json").unwrap();
        assert!(db.load_user().is_err());
    }

    #[test]
    fn clear_session_removes_both_keys() {
        let db = Database::open_in_memory().unwrap();
        db.save_user(&sample_user(false)).unwrap();
        db.save_chat_history(&[]).unwrap();

        db.clear_session().unwrap();
        assert_eq!(db.get(KEY_USER).unwrap(), None);
        assert_eq!(db.get(KEY_CHAT_HISTORY).unwrap(), None);

        // Clearing an already-empty session must also succeed.
        db.clear_session().unwrap();
    }

    #[test]
    fn survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.save_user(&sample_user(true)).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load_user().unwrap(), Some(sample_user(true)));
    }
}
