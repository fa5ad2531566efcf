//! Premium subscription.

use tracing::info;

use riposte_shared::BillingError;

use crate::context::AppContext;
use crate::state::AppAction;

impl AppContext {
    /// Purchase premium and flip the user's flag.
    ///
    /// On billing failure nothing is dispatched, so there is no partial
    /// state to roll back; the error propagates to the caller.
    pub async fn upgrade_to_premium(&self) -> Result<(), BillingError> {
        self.billing.purchase_premium().await?;

        self.dispatch(AppAction::SetPremium(true));
        info!("premium upgrade completed");
        Ok(())
    }
}
