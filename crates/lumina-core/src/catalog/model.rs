//! Product domain model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

use crate::error::LuminaError;

/// Stable product identifier.
pub type ProductId = String;

/// Closed set of product categories.
///
/// Used both as a filter facet value and as the semantic grouping for
/// cross-sell recommendations. Iteration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WomenFashion,
    Activewear,
    Dresses,
    TopsBottoms,
    GymWear,
    YogaFitness,
    Lingerie,
    Jumpsuits,
}

impl Category {
    /// Fixed display label of the category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::WomenFashion => "Women's Fashion",
            Category::Activewear => "Fitness / Activewear",
            Category::Dresses => "Dresses",
            Category::TopsBottoms => "Tops & Bottoms",
            Category::GymWear => "Gym Wear",
            Category::YogaFitness => "Yoga & Fitness Sets",
            Category::Lingerie => "Lingerie & Intimates",
            Category::Jumpsuits => "Jumpsuits & Rompers",
        }
    }

    /// Looks a category up by its display label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Category::iter().find(|category| category.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LuminaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s).ok_or_else(|| LuminaError::not_found("category", s))
    }
}

/// A catalog product. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier
    pub id: ProductId,
    /// Display name, unique per catalog; the entity linker matches on it
    pub name: String,
    /// Formatted price, opaque to the engine
    pub price: String,
    pub category: Category,
    /// Image reference (URL)
    pub image: String,
    pub description: String,
    pub fabric: String,
    pub care: String,
    /// Ordered, non-empty list of color names
    pub colors: Vec<String>,
}

impl Product {
    /// Returns true if the product is offered in any of the given colors.
    pub fn has_any_color<'a, I>(&self, colors: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        colors
            .into_iter()
            .any(|wanted| self.colors.iter().any(|color| color == wanted))
    }

    /// First listed color, used as the default selection in the product view.
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }
}
