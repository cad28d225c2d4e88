//! Catalog product types.

use serde::{Deserialize, Serialize};

use shopsphere_core::{Price, ProductId};

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog ID.
    pub id: ProductId,
    /// Product title; searched by the catalog.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Unit price.
    pub price: Price,
    /// Catalog category, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Customer rating, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Whether the title contains `query`, ignoring case.
    #[must_use]
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Average customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score out of 5.
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}
