//! Stylist conversation session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::generator::{GenerationRequest, TextGenerator};
use super::message::ConversationMessage;
use super::prompt::PromptBuilder;
use crate::catalog::Catalog;
use crate::error::{LuminaError, Result};
use crate::wishlist::Wishlist;

/// Reply used when the service answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm having a brief moment of reflection. How else can I assist your style journey?";

/// Reply used when the service call fails.
pub const SERVICE_FAILURE_FALLBACK: &str =
    "I'm offline for a quick wardrobe change! Feel free to browse our New Arrivals in the meantime.";

/// Opening assistant turn of every session.
pub fn greeting(brand_name: &str) -> String {
    format!(
        "Hi there! I'm your {brand_name} Personal Stylist. I've synced with your preferences. How can I help you style your day?"
    )
}

/// Clears the in-flight flag when dropped. Owned, so it can travel with the
/// reply task.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// An append-only conversation between the shopper and the stylist.
///
/// At most one `send` is in flight per session; a second call made while
/// the first is awaiting the service is rejected with [`LuminaError::Busy`]
/// and leaves the log untouched. Service failures never reach the caller:
/// they are logged and answered with [`SERVICE_FAILURE_FALLBACK`].
///
/// The service call runs on a task owned by the session, so `send` must be
/// called inside a Tokio runtime.
pub struct ConversationSession {
    id: String,
    catalog: Arc<Catalog>,
    generator: Arc<dyn TextGenerator>,
    prompt: PromptBuilder,
    /// Blank lets the generator choose its default model.
    model: String,
    turns: Arc<RwLock<Vec<ConversationMessage>>>,
    in_flight: Arc<AtomicBool>,
}

impl ConversationSession {
    pub fn new(
        catalog: Arc<Catalog>,
        generator: Arc<dyn TextGenerator>,
        prompt: PromptBuilder,
        model: impl Into<String>,
    ) -> Self {
        let opening = ConversationMessage::assistant(greeting(prompt.brand_name()));
        Self {
            id: Uuid::new_v4().to_string(),
            catalog,
            generator,
            prompt,
            model: model.into(),
            turns: Arc::new(RwLock::new(vec![opening])),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Snapshot of the conversation log.
    pub async fn turns(&self) -> Vec<ConversationMessage> {
        self.turns.read().await.clone()
    }

    /// The most recent assistant turn.
    pub async fn last_reply(&self) -> Option<ConversationMessage> {
        self.turns
            .read()
            .await
            .iter()
            .rev()
            .find(|turn| turn.is_assistant())
            .cloned()
    }

    /// Sends a shopper message and returns the assistant's reply text.
    ///
    /// The reply is always appended to the log, even if the caller has moved
    /// on or dropped this future by the time it arrives.
    pub async fn send(&self, user_text: &str, wishlist: &Wishlist) -> Result<String> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(LuminaError::EmptyMessage);
        }

        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Session {} rejected a send while in flight", self.id);
            return Err(LuminaError::Busy);
        };

        self.turns
            .write()
            .await
            .push(ConversationMessage::user(user_text));

        let request = self.request(user_text, wishlist);
        let generator = self.generator.clone();
        let turns = self.turns.clone();
        let session_id = self.id.clone();

        let reply_task = tokio::spawn(async move {
            let _guard = guard;
            let outcome = match request {
                Ok(request) => generator.generate(request).await,
                Err(e) => Err(e),
            };

            let reply = match outcome {
                Ok(text) if text.trim().is_empty() => {
                    tracing::warn!("Generation service returned an empty reply");
                    EMPTY_REPLY_FALLBACK.to_string()
                }
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Stylist reply failed in session {}: {}", session_id, e);
                    SERVICE_FAILURE_FALLBACK.to_string()
                }
            };

            turns
                .write()
                .await
                .push(ConversationMessage::assistant(reply.clone()));
            reply
        });

        reply_task
            .await
            .map_err(|e| LuminaError::internal(format!("Stylist reply task failed: {e}")))
    }

    fn request(&self, user_text: &str, wishlist: &Wishlist) -> Result<GenerationRequest> {
        let favorites = wishlist.resolve(&self.catalog);
        let system_instruction = self.prompt.system_instruction(&self.catalog, &favorites)?;

        tracing::info!(
            "Requesting stylist reply (model: {}, favorites: {})",
            if self.model.is_empty() { "default" } else { self.model.as_str() },
            favorites.len()
        );
        Ok(GenerationRequest {
            model: self.model.clone(),
            user_text: user_text.to_string(),
            system_instruction,
        })
    }
}
