//! Simulated collaborators.
//!
//! [`SimulatedApi`] implements every collaborator trait with canned data
//! behind an artificial delay: good enough to drive the whole app without
//! a backend.  [`SimulatedApi::deterministic`] drops the delays and seeds
//! the RNG for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use riposte_shared::{
    AuthError, BillingError, ExtractionError, GenerationError, RegistrationError, User,
};

use crate::api::{AuthApi, BillingApi, OcrApi, ReplyApi};

/// Stock avatar handed to every logged-in demo user.
const STOCK_AVATAR: &str =
    "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=100";

/// Texts "recognised" in uploaded screenshots.
const EXTRACTED_TEXTS: &[&str] = &[
    "Hey! Loved your profile. Would love to get to know you better 😊",
    "Your photos are amazing! Would love to take you out for coffee ☕",
    "That movie was incredible! We should definitely watch the sequel together",
    "You seem like such an interesting person. Tell me more about yourself!",
    "I had such a great time today. Can't wait to see you again 💕",
];

/// Canned comeback pool.
const WITTY_REPLIES: &[&str] = &[
    "Yeh toh full rizz mode on hai 😎",
    "Smooth operator detected! 🔥",
    "Kya baat hai, charm level 💯",
    "Arre waah, flirting game strong! 💪",
    "Yeh toh next level charm hai bhai 🚀",
    "Rizz master in the house! 👑",
    "Smooth like butter, hot like fire 🔥",
    "Yeh toh professional flirter lag raha hai 😏",
    "Charm overload detected! ⚡",
    "Flirting level: Expert mode activated 🎯",
];

/// Per-operation artificial latency.
#[derive(Debug, Clone)]
pub struct SimulatedDelays {
    pub login: Duration,
    pub signup: Duration,
    pub extract: Duration,
    pub generate: Duration,
    pub purchase: Duration,
}

impl Default for SimulatedDelays {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            signup: Duration::from_millis(1200),
            extract: Duration::from_millis(2000),
            generate: Duration::from_millis(1500),
            purchase: Duration::from_millis(1000),
        }
    }
}

impl SimulatedDelays {
    /// No artificial latency at all.
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            signup: Duration::ZERO,
            extract: Duration::ZERO,
            generate: Duration::ZERO,
            purchase: Duration::ZERO,
        }
    }
}

/// One object standing in for every external service.
pub struct SimulatedApi {
    delays: SimulatedDelays,
    rng: Mutex<StdRng>,
}

impl SimulatedApi {
    /// Production-shaped simulation: real delays, entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            delays: SimulatedDelays::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Test-shaped simulation: zero delays, fixed seed.
    pub fn deterministic(seed: u64) -> Self {
        Self {
            delays: SimulatedDelays::none(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Real-shaped delays with a custom profile.
    pub fn with_delays(delays: SimulatedDelays) -> Self {
        Self {
            delays,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    fn pick(&self, pool: &[&str]) -> String {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pool[rng.gen_range(0..pool.len())].to_string()
    }
}

impl Default for SimulatedApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthApi for SimulatedApi {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.delays.login).await;

        if !email.contains('@') || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        // Demo heuristics: premium status from the email, display name
        // from the local part.
        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(User {
            id: "1".into(),
            email: email.to_string(),
            name,
            is_premium: email.contains("premium"),
            avatar: Some(STOCK_AVATAR.to_string()),
        })
    }

    async fn register(
        &self,
        email: &str,
        _password: &str,
        name: &str,
    ) -> Result<User, RegistrationError> {
        tokio::time::sleep(self.delays.signup).await;

        if !email.contains('@') {
            return Err(RegistrationError::InvalidEmail);
        }

        Ok(User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            is_premium: false,
            avatar: None,
        })
    }
}

#[async_trait]
impl OcrApi for SimulatedApi {
    async fn extract_text(&self, _image_uri: &str) -> Result<String, ExtractionError> {
        tokio::time::sleep(self.delays.extract).await;
        Ok(self.pick(EXTRACTED_TEXTS))
    }
}

#[async_trait]
impl ReplyApi for SimulatedApi {
    async fn generate_reply(&self, _source_text: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delays.generate).await;
        Ok(self.pick(WITTY_REPLIES))
    }
}

#[async_trait]
impl BillingApi for SimulatedApi {
    async fn purchase_premium(&self) -> Result<(), BillingError> {
        tokio::time::sleep(self.delays.purchase).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn authenticate_derives_demo_fields() {
        let api = SimulatedApi::deterministic(7);

        let user = api.authenticate("premium@x.com", "anypw").await.unwrap();
        assert!(user.is_premium);
        assert_eq!(user.name, "premium");
        assert!(user.avatar.is_some());

        let user = api.authenticate("demo@x.com", "anypw").await.unwrap();
        assert!(!user.is_premium);
        assert_eq!(user.name, "demo");
    }

    #[tokio::test]
    async fn authenticate_rejects_bad_credentials() {
        let api = SimulatedApi::deterministic(7);

        assert!(matches!(
            api.authenticate("demo@x.com", "").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            api.authenticate("not-an-email", "pw").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn register_yields_fresh_non_premium_users() {
        let api = SimulatedApi::deterministic(7);

        let a = api.register("a@x.com", "pw", "Ana").await.unwrap();
        let b = api.register("b@x.com", "pw", "Ben").await.unwrap();
        assert!(!a.is_premium);
        assert_ne!(a.id, b.id);

        assert!(matches!(
            api.register("nope", "pw", "X").await,
            Err(RegistrationError::InvalidEmail)
        ));
    }

    #[tokio::test]
    async fn canned_pools_are_the_only_outputs() {
        let api = SimulatedApi::deterministic(42);

        for _ in 0..20 {
            let text = api.extract_text("file:///shot.png").await.unwrap();
            assert!(EXTRACTED_TEXTS.contains(&text.as_str()));

            let reply = api.generate_reply("hi").await.unwrap();
            assert!(WITTY_REPLIES.contains(&reply.as_str()));
        }
    }

    #[tokio::test]
    async fn same_seed_same_sequence() {
        let a = SimulatedApi::deterministic(99);
        let b = SimulatedApi::deterministic(99);

        for _ in 0..10 {
            assert_eq!(
                a.generate_reply("x").await.unwrap(),
                b.generate_reply("x").await.unwrap()
            );
        }
    }
}
