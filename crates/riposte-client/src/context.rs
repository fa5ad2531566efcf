//! The store object itself.
//!
//! [`AppContext`] owns the state, the persistence handle and the
//! collaborator trait objects.  It is created once at startup, shared
//! behind an `Arc`, and outlives every screen.  All mutation funnels
//! through [`AppContext::dispatch`]; reads go through
//! [`AppContext::state`] snapshots or the [`AppContext::subscribe`]
//! watch channel.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use riposte_shared::MessageIdGen;
use riposte_store::Database;

use crate::api::{AuthApi, BillingApi, OcrApi, ReplyApi};
use crate::mock::SimulatedApi;
use crate::state::{reduce, AppAction, AppState, PersistedData};

/// Central application state store.
pub struct AppContext {
    state: Mutex<AppState>,
    watch_tx: watch::Sender<AppState>,
    // rusqlite connections are Send but not Sync, hence the mutex.
    pub(crate) db: Mutex<Database>,
    pub(crate) auth: Arc<dyn AuthApi>,
    pub(crate) ocr: Arc<dyn OcrApi>,
    pub(crate) replies: Arc<dyn ReplyApi>,
    pub(crate) billing: Arc<dyn BillingApi>,
    pub(crate) ids: MessageIdGen,
}

impl AppContext {
    /// Build a store with explicitly injected collaborators.
    pub fn new(
        db: Database,
        auth: Arc<dyn AuthApi>,
        ocr: Arc<dyn OcrApi>,
        replies: Arc<dyn ReplyApi>,
        billing: Arc<dyn BillingApi>,
    ) -> Self {
        let (watch_tx, _) = watch::channel(AppState::default());
        Self {
            state: Mutex::new(AppState::default()),
            watch_tx,
            db: Mutex::new(db),
            auth,
            ocr,
            replies,
            billing,
            ids: MessageIdGen::new(),
        }
    }

    /// Build a store wired to the canned demo collaborators.
    pub fn with_simulated(db: Database) -> Self {
        let api = Arc::new(SimulatedApi::new());
        Self::new(db, api.clone(), api.clone(), api.clone(), api)
    }

    /// Apply one synchronous transition and notify subscribers.
    ///
    /// The state lock is held only for the reducer step, never across an
    /// await, so transitions are atomic and apply in issue order.
    pub fn dispatch(&self, action: AppAction) {
        let persist = touches_persisted(&action);

        let snapshot = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            reduce(&mut state, action);
            state.clone()
        };

        self.watch_tx.send_replace(snapshot.clone());

        if persist && snapshot.is_authenticated {
            self.persist(&snapshot);
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe to state snapshots; one value per dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.watch_tx.subscribe()
    }

    /// Restore the persisted session, once, at startup.
    ///
    /// Absent or unreadable records mean "nothing to hydrate" -- they are
    /// logged and skipped, never surfaced.
    pub fn hydrate(&self) {
        let (user, chat_history) = {
            let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);

            let user = db.load_user().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable persisted user");
                None
            });
            let chat_history = db.load_chat_history().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable persisted chat history");
                None
            });
            (user, chat_history)
        };

        if user.is_none() && chat_history.is_none() {
            tracing::debug!("no persisted session to restore");
            return;
        }

        tracing::info!(
            restored_user = user.is_some(),
            restored_messages = chat_history.as_ref().map_or(0, Vec::len),
            "restoring persisted session"
        );

        self.dispatch(AppAction::LoadPersistedData(PersistedData {
            user,
            chat_history,
        }));
    }

    /// Best-effort write-through of the session records.
    fn persist(&self, state: &AppState) {
        let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(user) = &state.user {
            if let Err(e) = db.save_user(user) {
                tracing::warn!(error = %e, "failed to persist user");
            }
        }
        if let Err(e) = db.save_chat_history(&state.chat_history) {
            tracing::warn!(error = %e, "failed to persist chat history");
        }
    }
}

/// Whether a transition can change the persisted user / chat history.
fn touches_persisted(action: &AppAction) -> bool {
    match action {
        AppAction::SetUser(_)
        | AppAction::AddChatMessage(_)
        | AppAction::UpdateChatMessage { .. }
        | AppAction::DeleteChatMessage(_)
        | AppAction::ClearChatHistory
        | AppAction::SetPremium(_)
        | AppAction::LoadPersistedData(_) => true,
        AppAction::Logout | AppAction::SetLoading(_) | AppAction::SetCurrentChat(_) => false,
    }
}
