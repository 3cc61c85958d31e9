//! Barcode product lookup.
//!
//! Resolution order: an inventory item already carrying the barcode, then the
//! Open Food Facts product API, then a generic placeholder. Lookup failures
//! past validation never surface as errors; they fall through to the next
//! source.

use crate::{
    core::inventory,
    entities::StoreSection,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Open Food Facts product endpoint; `/{barcode}.json` is appended
pub const OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org/api/v0/product";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Open Food Facts category tag stems and the store section they map to,
/// checked in order against each tag ("en:dair" matches "en:dairies").
const CATEGORY_MAP: &[(&str, StoreSection)] = &[
    ("en:dair", StoreSection::Dairy),
    ("en:meat", StoreSection::Meat),
    ("en:fish", StoreSection::Fish),
    ("en:fruit", StoreSection::Produce),
    ("en:vegetable", StoreSection::Produce),
    ("en:cereal", StoreSection::Pantry),
    ("en:frozen", StoreSection::Frozen),
];

/// Where a product description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSource {
    /// An inventory item with the same barcode
    Inventory,
    /// The Open Food Facts database
    OpenFoodFacts,
    /// Nothing found; placeholder values
    Fallback,
}

/// What is known about a scanned product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Product name
    pub name: String,
    /// Brand, if known
    pub brand: Option<String>,
    /// Inventory category
    pub category: String,
    /// Suggested unit
    pub unit: String,
    /// The validated barcode
    pub barcode: String,
    /// Source of the description
    pub source: ProductSource,
}

#[derive(Debug, Deserialize)]
struct OffResponse {
    #[serde(default)]
    status: i64,
    product: Option<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    product_name: Option<String>,
    brands: Option<String>,
    #[serde(default)]
    categories_tags: Vec<String>,
}

/// Checks a barcode is 8 to 14 ASCII digits, returning it trimmed.
pub fn validate_barcode(barcode: &str) -> Result<String> {
    let trimmed = barcode.trim();
    if (8..=14).contains(&trimmed.len()) && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(Error::InvalidBarcode {
            barcode: barcode.to_string(),
        })
    }
}

/// Maps Open Food Facts category tags onto a store section.
///
/// The first tag that mentions a known category decides; anything else is
/// `general`.
#[must_use]
pub fn map_category(tags: &[String]) -> StoreSection {
    tags.iter()
        .find_map(|tag| {
            let tag = tag.to_lowercase();
            CATEGORY_MAP
                .iter()
                .find(|(key, _)| tag.contains(key))
                .map(|(_, section)| *section)
        })
        .unwrap_or(StoreSection::General)
}

fn suggest_unit(tags: &[String]) -> &'static str {
    if tags.iter().any(|t| t.contains("beverages")) {
        "bottle"
    } else if tags.iter().any(|t| t.contains("frozen")) {
        "package"
    } else {
        "each"
    }
}

/// Parses an Open Food Facts response body. `Ok(None)` means the product is
/// unknown to the database.
pub fn parse_product(barcode: &str, body: &str) -> Result<Option<ProductInfo>> {
    let response: OffResponse = serde_json::from_str(body)?;
    Ok(product_from_response(barcode, response))
}

fn product_from_response(barcode: &str, response: OffResponse) -> Option<ProductInfo> {
    let product = response.product.filter(|_| response.status == 1)?;

    let name = product
        .product_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown Product".to_string());
    let brand = product
        .brands
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());

    Some(ProductInfo {
        name,
        brand,
        category: map_category(&product.categories_tags).to_string(),
        unit: suggest_unit(&product.categories_tags).to_string(),
        barcode: barcode.to_string(),
        source: ProductSource::OpenFoodFacts,
    })
}

/// Placeholder used when no source knows the barcode.
#[must_use]
pub fn fallback_product(barcode: &str) -> ProductInfo {
    ProductInfo {
        name: format!("Product {barcode}"),
        brand: None,
        category: StoreSection::General.to_string(),
        unit: "each".to_string(),
        barcode: barcode.to_string(),
        source: ProductSource::Fallback,
    }
}

/// HTTP client for the product database.
#[derive(Debug, Clone)]
pub struct BarcodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl BarcodeClient {
    /// Client for the public Open Food Facts API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(OPEN_FOOD_FACTS_URL, REQUEST_TIMEOUT)
    }

    /// Client for an alternative endpoint with the same response shape.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("family-fork/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Queries the product database for an already validated barcode.
    pub async fn fetch(&self, barcode: &str) -> Result<Option<ProductInfo>> {
        let url = format!("{}/{barcode}.json", self.base_url);
        debug!("Fetching {url}");
        let response: OffResponse = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(product_from_response(barcode, response))
    }
}

/// Describes the product behind a barcode.
///
/// Only an invalid barcode or a database failure is an error; an unreachable
/// or unhelpful product API yields the placeholder.
pub async fn lookup_barcode(
    db: &DatabaseConnection,
    client: &BarcodeClient,
    barcode: &str,
) -> Result<ProductInfo> {
    let barcode = validate_barcode(barcode)?;

    if let Some(item) = inventory::find_by_barcode(db, &barcode).await? {
        return Ok(ProductInfo {
            name: item.name,
            brand: item.brand,
            category: item.category,
            unit: item.unit,
            barcode,
            source: ProductSource::Inventory,
        });
    }

    match client.fetch(&barcode).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => {
            debug!("Barcode {barcode} unknown to the product database");
            Ok(fallback_product(&barcode))
        }
        Err(e) => {
            warn!("Product lookup for {barcode} failed: {e}");
            Ok(fallback_product(&barcode))
        }
    }
}
