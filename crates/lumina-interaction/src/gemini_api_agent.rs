//! GeminiApiAgent - REST implementation of the stylist's text generator.
//!
//! Calls the Gemini `generateContent` endpoint with the shopper's message
//! and the system instruction. Credentials come from `secret.json` or the
//! `GEMINI_API_KEY` environment variable.

use async_trait::async_trait;
use lumina_core::config::DEFAULT_MODEL;
use lumina_core::error::{LuminaError, Result};
use lumina_core::secret::SecretService;
use lumina_core::session::{GenerationRequest, TextGenerator};
use lumina_infrastructure::{LuminaPaths, SecretServiceImpl};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Text generator backed by the Gemini HTTP API.
///
/// The model named in each [`GenerationRequest`] wins; `default_model` is
/// used only when the request leaves it blank, which is the case unless
/// `config.toml` or `--model` pins one. No retries are attempted.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    default_model: String,
    base_url: String,
}

impl GeminiApiAgent {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            default_model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Builds an agent from the loaded secrets.
    ///
    /// Fails with a configuration error when no Gemini key is available.
    pub async fn try_from_secrets(service: &dyn SecretService) -> Result<Self> {
        let secrets = service.load_secrets().await?;
        let gemini = secrets.gemini.ok_or_else(|| {
            LuminaError::config("Gemini configuration not found in secret.json")
        })?;

        if gemini.api_key.trim().is_empty() {
            return Err(LuminaError::config(
                "Gemini API key is empty; set it in secret.json or GEMINI_API_KEY",
            ));
        }

        let mut agent = Self::new(gemini.api_key);
        if let Some(model) = gemini.model.filter(|m| !m.trim().is_empty()) {
            agent = agent.with_default_model(model);
        }
        Ok(agent)
    }

    /// Loads credentials via [`SecretServiceImpl`] for the given config
    /// directory, honouring `GEMINI_API_KEY`.
    pub async fn try_from_paths(paths: &LuminaPaths) -> Result<Self> {
        let service = SecretServiceImpl::new(paths.clone());
        Self::try_from_secrets(&service).await
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Points the agent at another endpoint root (proxies, local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model)
    }

    async fn send_request(&self, model: &str, body: &GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| LuminaError::generation(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            LuminaError::generation(format!("Failed to parse Gemini response: {err}"))
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let model = if request.model.trim().is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        let body = GenerateContentRequest::from_request(request);
        tracing::debug!("Calling Gemini model {}", model);
        self.send_request(&model, &body).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

impl GenerateContentRequest {
    fn from_request(request: GenerationRequest) -> Self {
        let system_instruction = (!request.system_instruction.trim().is_empty()).then(|| Content {
            role: None,
            parts: vec![Part {
                text: request.system_instruction,
            }],
        });

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.user_text,
                }],
            }],
            system_instruction,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Text of the first candidate; empty when the service sent none.
fn extract_text_response(response: GenerateContentResponse) -> String {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn map_http_error(status: StatusCode, body: &str) -> LuminaError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    LuminaError::generation(format!("Gemini API returned {}: {}", status.as_u16(), message))
}
