//! Storefront configuration models.
//!
//! `StorefrontConfig` lives in `config.toml`; every field has a default so a
//! missing or partial file is valid. API keys live separately in
//! `secret.json` (`SecretConfig`).

use serde::{Deserialize, Serialize};

use crate::catalog::{BRAND_NAME, GOOGLE_FORM_URL, ORDER_GREETING_NAME, WHATSAPP_NUMBER};
use crate::recommend::AdmissionPolicy;
use crate::wishlist::WISHLIST_STORAGE_KEY;

/// Default Gemini model for the stylist.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default = "default_brand_name")]
    pub brand_name: String,
    /// Key the wishlist is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub order: OrderConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            brand_name: default_brand_name(),
            storage_key: default_storage_key(),
            assistant: AssistantConfig::default(),
            recommendation: RecommendationConfig::default(),
            order: OrderConfig::default(),
        }
    }
}

fn default_brand_name() -> String {
    BRAND_NAME.to_string()
}

fn default_storage_key() -> String {
    WISHLIST_STORAGE_KEY.to_string()
}

/// Stylist assistant settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model pinned for every request. When unset the generator picks its
    /// own default (`gemini.model` in `secret.json`, else [`DEFAULT_MODEL`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Upper bound on reply length given to the model.
    #[serde(default = "default_max_sentences")]
    pub max_sentences: u32,
}

impl AssistantConfig {
    /// The pinned model, ignoring blank values.
    pub fn pinned_model(&self) -> Option<&str> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_sentences: default_max_sentences(),
        }
    }
}

fn default_max_sentences() -> u32 {
    3
}

/// Cross-sell settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// `"deterministic"` (same category first) or `"random"`.
    #[serde(default)]
    pub policy: RecommendationMode,
    /// Admission probability for other categories under `"random"`.
    #[serde(default = "default_cross_category_probability")]
    pub cross_category_probability: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            policy: RecommendationMode::default(),
            cross_category_probability: default_cross_category_probability(),
        }
    }
}

fn default_cross_category_probability() -> f64 {
    0.5
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    #[default]
    Deterministic,
    Random,
}

impl RecommendationConfig {
    pub fn admission_policy(&self) -> AdmissionPolicy {
        match self.policy {
            RecommendationMode::Deterministic => AdmissionPolicy::SameCategoryFirst,
            RecommendationMode::Random => AdmissionPolicy::RandomCrossCategory {
                probability: self.cross_category_probability,
            },
        }
    }
}

/// Where order inquiries are handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Name greeted at the start of the order message.
    #[serde(default = "default_greeting_name")]
    pub greeting_name: String,
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
    #[serde(default = "default_form_url")]
    pub form_url: String,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            greeting_name: default_greeting_name(),
            whatsapp_number: default_whatsapp_number(),
            form_url: default_form_url(),
        }
    }
}

fn default_greeting_name() -> String {
    ORDER_GREETING_NAME.to_string()
}

fn default_whatsapp_number() -> String {
    WHATSAPP_NUMBER.to_string()
}

fn default_form_url() -> String {
    GOOGLE_FORM_URL.to_string()
}

/// Contents of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.storage_key, "lumina_wishlist");
        assert_eq!(config.assistant.pinned_model(), None);
        assert_eq!(config.assistant.max_sentences, 3);
        assert_eq!(
            config.recommendation.admission_policy(),
            AdmissionPolicy::SameCategoryFirst
        );
        assert_eq!(config.order.greeting_name, "Lumina Style");
        assert_eq!(config.order.whatsapp_number, "1234567890");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            brand_name = "ACME"

            [assistant]
            model = "gemini-2.0-flash"

            [recommendation]
            policy = "random"
            cross_category_probability = 0.25

            [order]
            whatsapp_number = "+44 20 7946 0958"
            "#,
        )
        .unwrap();
        assert_eq!(config.brand_name, "ACME");
        assert_eq!(config.storage_key, "lumina_wishlist");
        assert_eq!(config.assistant.pinned_model(), Some("gemini-2.0-flash"));
        assert_eq!(config.assistant.max_sentences, 3);
        assert_eq!(
            config.recommendation.admission_policy(),
            AdmissionPolicy::RandomCrossCategory { probability: 0.25 }
        );
        assert_eq!(config.order.whatsapp_number, "+44 20 7946 0958");
        assert_eq!(config.order.form_url, GOOGLE_FORM_URL);
    }

    #[test]
    fn test_blank_model_is_not_pinned() {
        let config: StorefrontConfig = toml::from_str("[assistant]\nmodel = \"  \"\n").unwrap();
        assert_eq!(config.assistant.pinned_model(), None);
    }

    #[test]
    fn test_secret_config_parses_without_gemini() {
        let secrets: SecretConfig = serde_json::from_str("{}").unwrap();
        assert!(secrets.gemini.is_none());

        let secrets: SecretConfig =
            serde_json::from_str(r#"{"gemini":{"api_key":"k"}}"#).unwrap();
        let gemini = secrets.gemini.unwrap();
        assert_eq!(gemini.api_key, "k");
        assert!(gemini.model.is_none());
    }
}
