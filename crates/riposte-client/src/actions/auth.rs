//! Login, signup and logout.

use std::sync::PoisonError;

use tracing::{info, warn};

use riposte_shared::{AuthError, RegistrationError};

use crate::context::AppContext;
use crate::state::AppAction;

impl AppContext {
    /// Authenticate and install the returned user.
    ///
    /// The loading flag is cleared on every path, success or failure, so
    /// the UI is never stuck in a processing state; collaborator errors
    /// propagate to the caller unmodified.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.dispatch(AppAction::SetLoading(true));

        let result = self.auth.authenticate(email, password).await;
        match &result {
            Ok(user) => {
                info!(user_id = %user.id, premium = user.is_premium, "login succeeded");
                self.dispatch(AppAction::SetUser(user.clone()));
            }
            Err(e) => warn!(error = %e, "login failed"),
        }
        self.dispatch(AppAction::SetLoading(false));

        result.map(|_| ())
    }

    /// Register a fresh account and sign it in.  Same loading and error
    /// guarantees as [`login`](Self::login).
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), RegistrationError> {
        self.dispatch(AppAction::SetLoading(true));

        let result = self.auth.register(email, password, name).await;
        match &result {
            Ok(user) => {
                info!(user_id = %user.id, "signup succeeded");
                self.dispatch(AppAction::SetUser(user.clone()));
            }
            Err(e) => warn!(error = %e, "signup failed"),
        }
        self.dispatch(AppAction::SetLoading(false));

        result.map(|_| ())
    }

    /// Drop the persisted session and reset to the initial state.
    ///
    /// Never fails: absent persistence keys are fine and write errors are
    /// swallowed after logging.
    pub fn logout(&self) {
        {
            let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = db.clear_session() {
                warn!(error = %e, "failed to clear persisted session");
            }
        }

        self.dispatch(AppAction::Logout);
        info!("logged out");
    }
}
