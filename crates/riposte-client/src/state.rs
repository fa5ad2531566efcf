//! Application state and the reducer that advances it.
//!
//! [`reduce`] is a pure, total function: every [`AppAction`] variant is
//! handled, no variant touches anything outside the state it is given,
//! and no transition can be observed half-applied (the caller holds the
//! state lock for the duration of the call).

use riposte_shared::{ChatMessage, User};

/// The whole of the session-scoped application state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// The authenticated account, if any.
    pub user: Option<User>,
    /// Always equal to `user.is_some()`; kept in lockstep by the reducer.
    pub is_authenticated: bool,
    /// Chat history, newest first.
    pub chat_history: Vec<ChatMessage>,
    /// Free-text scratch buffer for the chat screen.
    pub current_chat: String,
    /// True while an authentication action is outstanding.
    pub is_loading: bool,
    /// True unless the current user holds a premium subscription.
    pub show_ads: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            chat_history: Vec::new(),
            current_chat: String::new(),
            is_loading: false,
            show_ads: true,
        }
    }
}

/// Partial update applied to a single chat message.
///
/// Absent fields leave the message untouched; there is deliberately no
/// way to clear an already-generated reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatMessagePatch {
    pub witty_reply: Option<String>,
    pub is_processing: Option<bool>,
}

impl ChatMessagePatch {
    fn apply(self, message: &mut ChatMessage) {
        if let Some(reply) = self.witty_reply {
            message.witty_reply = Some(reply);
        }
        if let Some(processing) = self.is_processing {
            message.is_processing = processing;
        }
    }
}

/// Partial state restored from the local store at startup.
#[derive(Debug, Clone, Default)]
pub struct PersistedData {
    pub user: Option<User>,
    pub chat_history: Option<Vec<ChatMessage>>,
}

/// Every transition the store supports.
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Install the authenticated user and derive the auth/ads flags.
    SetUser(User),
    /// Reset to the initial, unauthenticated state.
    Logout,
    SetLoading(bool),
    /// Prepend a fully-formed message to the history.
    AddChatMessage(ChatMessage),
    /// Merge a patch into the message with the given id; no-op if absent.
    UpdateChatMessage { id: String, patch: ChatMessagePatch },
    /// Remove the message with the given id; no-op if absent.
    DeleteChatMessage(String),
    SetCurrentChat(String),
    ClearChatHistory,
    /// Flip the current user's premium flag; no-op without a user.
    SetPremium(bool),
    /// Shallow-merge persisted data; startup hydration only.
    LoadPersistedData(PersistedData),
}

/// Advance `state` by one transition.
pub fn reduce(state: &mut AppState, action: AppAction) {
    match action {
        AppAction::SetUser(user) => {
            state.show_ads = !user.is_premium;
            state.user = Some(user);
            state.is_authenticated = true;
        }
        AppAction::Logout => {
            *state = AppState::default();
        }
        AppAction::SetLoading(loading) => {
            state.is_loading = loading;
        }
        AppAction::AddChatMessage(message) => {
            state.chat_history.insert(0, message);
        }
        AppAction::UpdateChatMessage { id, patch } => {
            if let Some(message) = state.chat_history.iter_mut().find(|m| m.id == id) {
                patch.apply(message);
            }
        }
        AppAction::DeleteChatMessage(id) => {
            state.chat_history.retain(|m| m.id != id);
        }
        AppAction::SetCurrentChat(text) => {
            state.current_chat = text;
        }
        AppAction::ClearChatHistory => {
            state.chat_history.clear();
        }
        AppAction::SetPremium(premium) => {
            if let Some(user) = state.user.as_mut() {
                user.is_premium = premium;
                state.show_ads = !premium;
            }
        }
        AppAction::LoadPersistedData(data) => {
            // A restored user re-derives the auth/ads flags so the state
            // invariants hold after the hydration dispatch too.
            if let Some(user) = data.user {
                state.show_ads = !user.is_premium;
                state.user = Some(user);
                state.is_authenticated = true;
            }
            if let Some(history) = data.chat_history {
                state.chat_history = history;
            }
        }
    }
}
