//! System instruction assembly.

use minijinja::{Environment, context};

use crate::catalog::{BRAND_NAME, Catalog, Product};
use crate::error::Result;

const SYSTEM_INSTRUCTION_TEMPLATE: &str = "\
You are a world-class personal fashion stylist for the luxury brand {{ brand }}.
Your style is sophisticated, encouraging, and highly personalized.

CONTEXT:
- Full Catalog:{% for p in products %}
- {{ p.name }} ({{ p.price }}): {{ p.description }}{% endfor %}

- User Personalization:
{{ favorites }}

GOAL:
Provide styling advice. If the user has items in their wishlist, use that information to make better recommendations (e.g., \"Since you liked the [Product], you might also love the [Another Product]\").

RULES:
1. Keep responses under {{ max_sentences }} sentences.
2. Always mention exact product names from the catalog.
3. Be helpful and concierge-like.";

/// Personalization line describing the shopper's saved favorites.
pub fn favorites_hint(favorites: &[&Product]) -> String {
    if favorites.is_empty() {
        "The user hasn't saved any favorites yet.".to_string()
    } else {
        let names: Vec<&str> = favorites.iter().map(|p| p.name.as_str()).collect();
        format!(
            "The user currently has these favorites saved: {}.",
            names.join(", ")
        )
    }
}

/// Renders the stylist's system instruction.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    brand_name: String,
    max_sentences: u32,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(BRAND_NAME, 3)
    }
}

impl PromptBuilder {
    pub fn new(brand_name: impl Into<String>, max_sentences: u32) -> Self {
        Self {
            brand_name: brand_name.into(),
            max_sentences,
        }
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    /// Catalog listing, favorites hint, persona, and reply rules.
    pub fn system_instruction(&self, catalog: &Catalog, favorites: &[&Product]) -> Result<String> {
        let env = Environment::new();
        let rendered = env.render_str(
            SYSTEM_INSTRUCTION_TEMPLATE,
            context! {
                brand => &self.brand_name,
                products => catalog.products(),
                favorites => favorites_hint(favorites),
                max_sentences => self.max_sentences,
            },
        )?;
        Ok(rendered)
    }
}
