//! Listing Data Structures
//!
//! Types for ads, categories, ad images, and search parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A listing category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID
    pub id: Uuid,
    /// Display name (unique)
    pub name: String,
}

/// A classified ad
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Ad {
    /// Unique ad ID
    pub id: Uuid,
    /// Owning user ID
    pub user_id: Uuid,
    /// Category ID
    pub category_id: Uuid,
    /// Listing title
    pub title: String,
    /// Listing description
    pub description: String,
    /// Asking price in minor currency units (e.g. cents)
    pub price: i64,
    /// Free-form location text
    pub location: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// An image attached to an ad
///
/// Only the URL is stored here; the image bytes live with the file storage
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct AdImage {
    /// Unique image ID
    pub id: Uuid,
    /// Owning ad ID
    pub ad_id: Uuid,
    /// Image URL
    pub url: String,
}

/// An ad together with its images, as returned by detail endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdDetail {
    #[serde(flatten)]
    pub ad: Ad,
    pub images: Vec<AdImage>,
}

/// Sort order for listing search results
///
/// Only the keys in this whitelist are accepted; anything else falls back
/// to the default (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdSort {
    /// Newest first (default)
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Cheapest first
    PriceAscending,
    /// Most expensive first
    PriceDescending,
}

impl AdSort {
    /// Parse a sort key from its query-string form
    ///
    /// Accepts `created_at`, `-created_at`, `price`, `-price`. Unknown keys
    /// map to the default ordering.
    pub fn from_key(key: &str) -> Self {
        match key {
            "created_at" => Self::Oldest,
            "-created_at" => Self::Newest,
            "price" => Self::PriceAscending,
            "-price" => Self::PriceDescending,
            _ => Self::default(),
        }
    }

    /// The ORDER BY fragment for this sort order
    pub fn order_by_sql(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC",
            Self::Oldest => "created_at ASC",
            Self::PriceAscending => "price ASC",
            Self::PriceDescending => "price DESC",
        }
    }
}

/// Search parameters for browsing listings
///
/// All filters are optional and combine conjunctively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive substring match on title or description
    pub query: Option<String>,
    /// Restrict to a category
    pub category: Option<Uuid>,
    /// Minimum price (inclusive), minor currency units
    pub min_price: Option<i64>,
    /// Maximum price (inclusive), minor currency units
    pub max_price: Option<i64>,
    /// Case-insensitive substring match on location
    pub location: Option<String>,
    /// Sort key (`created_at`, `-created_at`, `price`, `-price`)
    pub sort: Option<String>,
}

impl SearchParams {
    /// Resolve the requested sort order, falling back to the default for
    /// missing or unknown keys
    pub fn sort_order(&self) -> AdSort {
        self.sort
            .as_deref()
            .map(AdSort::from_key)
            .unwrap_or_default()
    }
}

/// Request to create a new ad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdRequest {
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub location: String,
    /// URLs of already-uploaded images
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Response for listing searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAdsResponse {
    pub ads: Vec<Ad>,
}

/// Response for listing categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<Category>,
}
