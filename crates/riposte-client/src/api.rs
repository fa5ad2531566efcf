//! Collaborator seams.
//!
//! Everything the store cannot compute locally arrives through one of
//! these traits: authentication, OCR, witty-reply generation and premium
//! billing.  Implementations are injected into
//! [`AppContext::new`](crate::AppContext::new); the store never
//! hard-codes collaborator behaviour.  [`crate::mock`] provides the
//! simulated implementations the demo app ships with.

use async_trait::async_trait;

use riposte_shared::{
    AuthError, BillingError, ExtractionError, GenerationError, RegistrationError, User,
};

/// Account authentication and registration.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a [`User`].
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Create a fresh, non-premium account.
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, RegistrationError>;
}

/// Screenshot text extraction.
#[async_trait]
pub trait OcrApi: Send + Sync {
    async fn extract_text(&self, image_uri: &str) -> Result<String, ExtractionError>;
}

/// Witty-reply generation.
#[async_trait]
pub trait ReplyApi: Send + Sync {
    async fn generate_reply(&self, source_text: &str) -> Result<String, GenerationError>;
}

/// Premium subscription purchase.
#[async_trait]
pub trait BillingApi: Send + Sync {
    async fn purchase_premium(&self) -> Result<(), BillingError>;
}
