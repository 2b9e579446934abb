//! Data models for bestseller listings and API payloads.

use serde::{Deserialize, Serialize};

/// Envelope of one bestseller API response.
///
/// The `data` field is required: a payload without it is malformed, not empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage {
    /// Raw listings carried by this response.
    pub data: Vec<Listing>,
}

/// A single bestseller listing as returned by the API.
///
/// Placeholder columns the API carries alongside these fields (`rank_change_label`,
/// always null, and any exported index column) are not modeled, so they are dropped
/// at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Bestseller rank within the country segment (1-100)
    pub rank: u32,
    /// Amazon Standard Identification Number
    pub asin: String,
    /// Product title
    pub product_title: String,
    /// Display price, currency-symbol-prefixed, passed through unparsed
    #[serde(default)]
    pub product_price: Option<String>,
    /// Star rating (1.0-5.0)
    #[serde(default)]
    pub product_star_rating: Option<f32>,
    /// Number of ratings
    #[serde(default)]
    pub product_num_ratings: Option<f64>,
    /// Full product URL
    pub product_url: String,
    /// Product image URL
    pub product_photo: String,
    /// Two-letter country code of the segment
    pub country: String,
    /// Page the listing was fetched from, annotated client-side after the fetch
    #[serde(skip)]
    pub page: u32,
}

/// A cleaned output row: every `Listing` field except the pagination origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub rank: u32,
    pub asin: String,
    pub product_title: String,
    pub product_price: Option<String>,
    pub product_star_rating: Option<f32>,
    pub product_num_ratings: Option<f64>,
    pub product_url: String,
    pub product_photo: String,
    pub country: String,
}

impl ExportRecord {
    /// Header row of the output file, in column order.
    pub const HEADER: [&'static str; 9] = [
        "rank",
        "asin",
        "product_title",
        "product_price",
        "product_star_rating",
        "product_num_ratings",
        "product_url",
        "product_photo",
        "country",
    ];

    /// Serializes the row into CSV fields. Missing optional values become empty
    /// fields rather than a sentinel.
    pub fn to_record(&self) -> [String; 9] {
        [
            self.rank.to_string(),
            self.asin.clone(),
            self.product_title.clone(),
            self.product_price.clone().unwrap_or_default(),
            self.product_star_rating.map(|v| v.to_string()).unwrap_or_default(),
            self.product_num_ratings.map(|v| v.to_string()).unwrap_or_default(),
            self.product_url.clone(),
            self.product_photo.clone(),
            self.country.clone(),
        ]
    }
}

impl From<Listing> for ExportRecord {
    fn from(listing: Listing) -> Self {
        Self {
            rank: listing.rank,
            asin: listing.asin,
            product_title: listing.product_title,
            product_price: listing.product_price,
            product_star_rating: listing.product_star_rating,
            product_num_ratings: listing.product_num_ratings,
            product_url: listing.product_url,
            product_photo: listing.product_photo,
            country: listing.country,
        }
    }
}
