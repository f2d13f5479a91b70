//! Cross-sell recommendations for the product view.
//!
//! Two admission policies are supported. `SameCategoryFirst` is deterministic
//! and is the default. `RandomCrossCategory` keeps the storefront's original
//! behavior, where out-of-category products are admitted by a coin flip, so
//! repeated calls with the same focal product may differ; its random source
//! is injectable for reproducible tests.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};

/// Upper bound on the number of recommendations shown.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// How candidates outside the focal product's category are admitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// Same-category products in catalog order, then the rest in catalog order.
    SameCategoryFirst,
    /// Same-category products always pass; any other product passes with the
    /// given probability. Catalog order is kept.
    RandomCrossCategory { probability: f64 },
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        AdmissionPolicy::SameCategoryFirst
    }
}

/// Selects related products for a focal product.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    policy: AdmissionPolicy,
}

impl Recommender {
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Recommendations using the thread-local random source.
    pub fn recommend<'a>(&self, catalog: &'a Catalog, focal: &Product) -> Vec<&'a Product> {
        self.recommend_with_rng(catalog, focal, &mut rand::thread_rng())
    }

    /// Recommendations drawing from the given random source. The rng is only
    /// consulted under `RandomCrossCategory`.
    pub fn recommend_with_rng<'a, R>(
        &self,
        catalog: &'a Catalog,
        focal: &Product,
        rng: &mut R,
    ) -> Vec<&'a Product>
    where
        R: Rng,
    {
        let candidates = catalog
            .products()
            .iter()
            .filter(|product| product.id != focal.id);

        let picked: Vec<&Product> = match self.policy {
            AdmissionPolicy::SameCategoryFirst => {
                let (same, other): (Vec<&Product>, Vec<&Product>) =
                    candidates.partition(|product| product.category == focal.category);
                same.into_iter()
                    .chain(other)
                    .take(MAX_RECOMMENDATIONS)
                    .collect()
            }
            AdmissionPolicy::RandomCrossCategory { probability } => {
                let probability = if probability.is_nan() {
                    0.0
                } else {
                    probability.clamp(0.0, 1.0)
                };
                candidates
                    .filter(|product| {
                        product.category == focal.category || rng.gen_bool(probability)
                    })
                    .take(MAX_RECOMMENDATIONS)
                    .collect()
            }
        };

        tracing::debug!(
            "Recommended {} products for '{}' ({:?})",
            picked.len(),
            focal.id,
            self.policy
        );
        picked
    }
}
