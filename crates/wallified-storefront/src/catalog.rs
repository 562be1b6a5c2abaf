//! Poster catalog queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use wallified_core::{Query, RecordStore, Rupees, SortOrder};
use wallified_studio::{paper, CartLineItem, PaperSizeId};

use crate::error::StorefrontError;

pub const PRODUCTS: &str = "products";
pub const CATEGORIES: &str = "categories";
pub const COLLECTIONS: &str = "collections";

/// Category slugs that list the whole catalog
pub const ALL_PRODUCTS_SLUGS: [&str; 2] = ["all-posters", "shop"];

fn default_sizes() -> Vec<String> {
    paper::catalog()
        .iter()
        .map(|size| size.id.to_string())
        .collect()
}

/// A catalog poster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Rupees,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default = "default_sizes")]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn offers_size(&self, size: PaperSizeId) -> bool {
        let size = size.to_string();
        self.sizes.iter().any(|offered| *offered == size)
    }

    /// Cart line for `quantity` prints of this poster in `size`
    pub fn to_cart_item(
        &self,
        size: PaperSizeId,
        quantity: u32,
    ) -> Result<CartLineItem, StorefrontError> {
        if !self.offers_size(size) {
            return Err(StorefrontError::validation(format!(
                "{} is not available in {}",
                self.name, size
            )));
        }
        Ok(CartLineItem {
            id: format!("{}-{}", self.id, size),
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            quantity: quantity.max(1),
            size: size.to_string(),
            is_custom: false,
            design_id: None,
            is_borderless: false,
        })
    }
}

/// A set of posters sold together at one price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Rupees,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub product_ids: Vec<String>,
    /// Preview images, one per poster
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

pub(crate) fn parse_rows<T: serde::de::DeserializeOwned>(
    rows: Vec<Value>,
) -> Result<Vec<T>, StorefrontError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(StorefrontError::from))
        .collect()
}

fn visible(products: Vec<Product>) -> impl Iterator<Item = Product> {
    products.into_iter().filter(|product| !product.is_hidden)
}

/// Wrap a search term for `ilike`, treating its wildcards literally
pub(crate) fn contains_pattern(term: &str) -> String {
    let cleaned: String = term
        .trim()
        .chars()
        .filter(|c| *c != '%' && *c != '_')
        .collect();
    format!("%{}%", cleaned)
}

/// Read-only view of the catalog for shoppers
#[derive(Clone)]
pub struct Catalog {
    records: Arc<dyn RecordStore>,
}

impl Catalog {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    async fn products(&self, query: Query) -> Result<Vec<Product>, StorefrontError> {
        let rows = self
            .records
            .select(&query.order_by("created_at", SortOrder::Descending))
            .await?;
        parse_rows(rows)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, StorefrontError> {
        let rows = self
            .records
            .select(&Query::new(CATEGORIES).order_by("name", SortOrder::Ascending))
            .await?;
        parse_rows(rows)
    }

    pub async fn category(&self, slug: &str) -> Result<Option<Category>, StorefrontError> {
        let rows = self
            .records
            .select(&Query::new(CATEGORIES).eq("slug", slug).limit(1))
            .await?;
        Ok(parse_rows(rows)?.into_iter().next())
    }

    /// Visible posters in a category, newest first.
    ///
    /// The all-products slugs and slugs with no category list everything.
    pub async fn products_in_category(&self, slug: &str) -> Result<Vec<Product>, StorefrontError> {
        let mut query = Query::new(PRODUCTS);
        if !ALL_PRODUCTS_SLUGS.contains(&slug) {
            match self.category(slug).await? {
                Some(category) => query = query.eq("category_id", category.id),
                None => tracing::debug!("No category '{}', listing all products", slug),
            }
        }
        Ok(visible(self.products(query).await?).collect())
    }

    /// Home page best sellers
    pub async fn best_sellers(&self, limit: usize) -> Result<Vec<Product>, StorefrontError> {
        let products = self
            .products(Query::new(PRODUCTS).eq("is_best_seller", true))
            .await?;
        Ok(visible(products).take(limit).collect())
    }

    /// Home page trending row
    pub async fn trending(&self, limit: usize) -> Result<Vec<Product>, StorefrontError> {
        let products = self
            .products(Query::new(PRODUCTS).eq("is_trending", true))
            .await?;
        Ok(visible(products).take(limit).collect())
    }

    /// Visible posters whose name contains `term`, newest first
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, StorefrontError> {
        let products = self
            .products(Query::new(PRODUCTS).ilike("name", contains_pattern(term)))
            .await?;
        Ok(visible(products).collect())
    }

    /// Every collection, newest first
    pub async fn collections(&self) -> Result<Vec<Collection>, StorefrontError> {
        let rows = self
            .records
            .select(&Query::new(COLLECTIONS).order_by("created_at", SortOrder::Descending))
            .await?;
        parse_rows(rows)
    }

    /// Home page collections: featured ones first, topped up with the rest
    /// when fewer than `limit` are featured
    pub async fn featured_collections(
        &self,
        limit: usize,
    ) -> Result<Vec<Collection>, StorefrontError> {
        let (featured, rest): (Vec<_>, Vec<_>) = self
            .collections()
            .await?
            .into_iter()
            .partition(|collection| collection.is_featured);
        Ok(featured.into_iter().chain(rest).take(limit).collect())
    }

    pub async fn product(&self, id: &str) -> Result<Product, StorefrontError> {
        let rows = self
            .records
            .select(&Query::new(PRODUCTS).eq("id", id).limit(1))
            .await?;
        parse_rows(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| StorefrontError::not_found("product", id))
    }
}
