//! Conversation session module.
//!
//! # Module Structure
//!
//! - `message`: conversation turn types (`MessageRole`, `ConversationMessage`)
//! - `generator`: the `TextGenerator` port for the external generative-text service
//! - `prompt`: system instruction assembly from catalog and wishlist context
//! - `conversation`: `ConversationSession`, the turn log with its in-flight guard

mod conversation;
mod generator;
mod message;
mod prompt;

pub use conversation::{
    ConversationSession, EMPTY_REPLY_FALLBACK, SERVICE_FAILURE_FALLBACK, greeting,
};
pub use generator::{GenerationRequest, TextGenerator};
pub use message::{ConversationMessage, MessageRole};
pub use prompt::{PromptBuilder, favorites_hint};
