//! Chat history: adding messages, generating replies, OCR passthrough.

use tracing::{debug, info, warn};

use riposte_shared::{ChatMessage, ExtractionError, GenerationError, MessageOrigin};

use crate::context::AppContext;
use crate::state::{AppAction, ChatMessagePatch};

impl AppContext {
    /// Create a chat message and prepend it to the history.
    ///
    /// Returns the new message id so the caller can immediately request a
    /// reply for it.
    pub fn add_chat_message(
        &self,
        text: impl Into<String>,
        origin: MessageOrigin,
        image_uri: Option<String>,
    ) -> String {
        let id = self.ids.next_id();
        let message = ChatMessage::new(id.clone(), text, origin, image_uri);

        debug!(message_id = %id, origin = %message.origin, "adding chat message");
        self.dispatch(AppAction::AddChatMessage(message));
        id
    }

    /// Generate a witty reply for the message with the given id.
    ///
    /// An unknown id is a benign no-op: a delete racing a pending
    /// generation simply wins, there is nothing useful to report.  On
    /// collaborator failure the in-flight flag is cleared, the reply is
    /// left absent and the error propagates.
    pub async fn generate_witty_reply(&self, message_id: &str) -> Result<(), GenerationError> {
        let Some(text) = self
            .state()
            .chat_history
            .iter()
            .find(|m| m.id == message_id)
            .map(|m| m.text.clone())
        else {
            debug!(message_id, "reply requested for unknown message, ignoring");
            return Ok(());
        };

        self.dispatch(AppAction::UpdateChatMessage {
            id: message_id.to_string(),
            patch: ChatMessagePatch {
                is_processing: Some(true),
                ..Default::default()
            },
        });

        match self.replies.generate_reply(&text).await {
            Ok(reply) => {
                info!(message_id, "reply generated");
                self.dispatch(AppAction::UpdateChatMessage {
                    id: message_id.to_string(),
                    patch: ChatMessagePatch {
                        witty_reply: Some(reply),
                        is_processing: Some(false),
                    },
                });
                Ok(())
            }
            Err(e) => {
                warn!(message_id, error = %e, "reply generation failed");
                self.dispatch(AppAction::UpdateChatMessage {
                    id: message_id.to_string(),
                    patch: ChatMessagePatch {
                        is_processing: Some(false),
                        ..Default::default()
                    },
                });
                Err(e)
            }
        }
    }

    /// Run OCR over a screenshot.  Pure passthrough; no state mutation.
    pub async fn extract_text_from_image(
        &self,
        image_uri: &str,
    ) -> Result<String, ExtractionError> {
        self.ocr.extract_text(image_uri).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use riposte_shared::{GenerationError, MessageOrigin};
    use riposte_store::Database;

    use crate::api::ReplyApi;
    use crate::mock::SimulatedApi;
    use crate::AppContext;

    fn context() -> AppContext {
        let db = Database::open_in_memory().unwrap();
        let api = Arc::new(SimulatedApi::deterministic(5));
        AppContext::new(db, api.clone(), api.clone(), api.clone(), api)
    }

    fn context_with_replies(replies: Arc<dyn ReplyApi>) -> AppContext {
        let db = Database::open_in_memory().unwrap();
        let api = Arc::new(SimulatedApi::deterministic(5));
        AppContext::new(db, api.clone(), api.clone(), replies, api)
    }

    /// Reply double that parks until released, so tests can observe the
    /// in-flight window.
    struct GatedReply {
        entered: Notify,
        release: Notify,
    }

    impl GatedReply {
        fn new() -> Self {
            Self {
                entered: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl ReplyApi for GatedReply {
        async fn generate_reply(&self, _source_text: &str) -> Result<String, GenerationError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("took a while, but worth it".into())
        }
    }

    /// Reply double that always fails.
    struct BrokenReply;

    #[async_trait]
    impl ReplyApi for BrokenReply {
        async fn generate_reply(&self, _source_text: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Unavailable("model offline".into()))
        }
    }

    #[tokio::test]
    async fn added_messages_are_newest_first_with_distinct_ids() {
        let ctx = context();

        let ids: Vec<String> = (0..5)
            .map(|i| ctx.add_chat_message(format!("msg {i}"), MessageOrigin::Paste, None))
            .collect();

        let state = ctx.state();
        assert_eq!(state.chat_history.len(), 5);

        // Newest first: history order is the reverse of insertion order.
        let history_ids: Vec<&str> = state.chat_history.iter().map(|m| m.id.as_str()).collect();
        let mut expected: Vec<&str> = ids.iter().map(String::as_str).collect();
        expected.reverse();
        assert_eq!(history_ids, expected);

        let message = &state.chat_history[0];
        assert!(!message.is_processing);
        assert!(message.witty_reply.is_none());
    }

    #[tokio::test]
    async fn screenshot_messages_keep_their_image() {
        let ctx = context();
        let id = ctx.add_chat_message(
            "extracted text",
            MessageOrigin::Screenshot,
            Some("file:///shots/a.png".into()),
        );

        let state = ctx.state();
        let message = state.chat_history.iter().find(|m| m.id == id).unwrap();
        assert_eq!(message.origin, MessageOrigin::Screenshot);
        assert_eq!(message.image_uri.as_deref(), Some("file:///shots/a.png"));
    }

    #[tokio::test]
    async fn reply_generation_fills_the_message() {
        let ctx = context();
        let id = ctx.add_chat_message("hi", MessageOrigin::Paste, None);

        ctx.generate_witty_reply(&id).await.unwrap();

        let state = ctx.state();
        let message = state.chat_history.iter().find(|m| m.id == id).unwrap();
        assert!(!message.is_processing);
        let reply = message.witty_reply.as_deref().unwrap();
        assert!(!reply.is_empty());
    }

    #[tokio::test]
    async fn reply_generation_is_visible_in_flight() {
        let gate = Arc::new(GatedReply::new());
        let ctx = Arc::new(context_with_replies(gate.clone()));
        let id = ctx.add_chat_message("hi", MessageOrigin::Paste, None);

        let task = {
            let ctx = ctx.clone();
            let id = id.clone();
            tokio::spawn(async move { ctx.generate_witty_reply(&id).await })
        };

        gate.entered.notified().await;
        {
            let state = ctx.state();
            let message = state.chat_history.iter().find(|m| m.id == id).unwrap();
            assert!(message.is_processing);
            assert!(message.witty_reply.is_none());
        }

        gate.release.notify_one();
        task.await.unwrap().unwrap();

        let state = ctx.state();
        let message = state.chat_history.iter().find(|m| m.id == id).unwrap();
        assert!(!message.is_processing);
        assert_eq!(
            message.witty_reply.as_deref(),
            Some("took a while, but worth it")
        );
    }

    #[tokio::test]
    async fn failed_generation_clears_the_flag_and_keeps_reply_absent() {
        let ctx = context_with_replies(Arc::new(BrokenReply));
        let id = ctx.add_chat_message("hi", MessageOrigin::Paste, None);

        let err = ctx.generate_witty_reply(&id).await.unwrap_err();
        assert!(matches!(err, GenerationError::Unavailable(_)));

        let state = ctx.state();
        let message = state.chat_history.iter().find(|m| m.id == id).unwrap();
        assert!(!message.is_processing);
        assert!(message.witty_reply.is_none());
    }

    #[tokio::test]
    async fn generating_for_an_unknown_id_is_a_noop() {
        let ctx = context();
        ctx.add_chat_message("hi", MessageOrigin::Paste, None);
        let before = ctx.state();

        ctx.generate_witty_reply("does-not-exist").await.unwrap();

        assert_eq!(ctx.state(), before);
    }

    #[tokio::test]
    async fn extraction_is_a_pure_passthrough() {
        let ctx = context();
        let before = ctx.state();

        let text = ctx
            .extract_text_from_image("file:///shots/a.png")
            .await
            .unwrap();

        assert!(!text.is_empty());
        assert_eq!(ctx.state(), before);
    }
}
