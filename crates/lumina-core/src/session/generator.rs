//! Port to the external generative-text service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single generation call: model, the shopper's text, and the system
/// instruction carrying catalog and personalization context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub user_text: String,
    pub system_instruction: String,
}

/// Black-box text generation.
///
/// An implementation makes exactly one attempt per call. An empty string is
/// a valid success value; the session substitutes its own fallback for it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}
