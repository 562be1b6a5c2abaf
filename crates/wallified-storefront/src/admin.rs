//! Back office.
//!
//! Access is an allow-list: an email is an administrator when it appears in
//! the `admins` collection. Everything else hangs off the resulting
//! [`AdminSession`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use wallified_core::{Query, RecordStore, Rupees, SortOrder};

use crate::catalog::{contains_pattern, parse_rows, Collection, Product, COLLECTIONS, PRODUCTS};
use crate::checkout::{Order, OrderStatus, ORDERS};
use crate::error::StorefrontError;

pub const ADMINS: &str = "admins";

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub products: usize,
    pub collections: usize,
    /// Sum of all order totals
    pub revenue: Rupees,
    pub pending_orders: usize,
}

/// Product form as submitted from the back office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Rupees,
    pub category_id: Option<String>,
    pub is_best_seller: bool,
    pub is_trending: bool,
    pub sizes: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: String,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.name.trim().chars().count() < 3 {
            return Err(StorefrontError::validation(
                "Name must be at least 3 characters",
            ));
        }
        if self.description.trim().chars().count() < 10 {
            return Err(StorefrontError::validation(
                "Description must be at least 10 characters",
            ));
        }
        if self.price < Rupees(1) {
            return Err(StorefrontError::validation("Price must be at least ₹1"));
        }
        Ok(())
    }
}

/// Least number of posters in a collection
pub const MIN_COLLECTION_POSTERS: usize = 3;

/// Collection form as submitted from the back office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionForm {
    pub name: String,
    pub description: String,
    pub price: Rupees,
    pub is_featured: bool,
    /// Chosen posters in selection order
    pub product_ids: Vec<String>,
}

impl CollectionForm {
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.name.trim().chars().count() < 3 {
            return Err(StorefrontError::validation(
                "Name must be at least 3 characters",
            ));
        }
        if self.description.trim().chars().count() < 10 {
            return Err(StorefrontError::validation(
                "Description must be at least 10 characters",
            ));
        }
        if self.price < Rupees(1) {
            return Err(StorefrontError::validation("Price must be at least ₹1"));
        }
        let mut distinct: Vec<&str> = self.product_ids.iter().map(String::as_str).collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < MIN_COLLECTION_POSTERS {
            return Err(StorefrontError::validation(format!(
                "A collection must have at least {} posters",
                MIN_COLLECTION_POSTERS
            )));
        }
        Ok(())
    }
}

/// Collection row as written to the record store
#[derive(Debug, Serialize)]
struct CollectionRecord<'a> {
    #[serde(flatten)]
    form: &'a CollectionForm,
    image_urls: Vec<String>,
}

/// Entry point for back-office sign-in
pub struct Admin {
    records: Arc<dyn RecordStore>,
}

impl Admin {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// Open a session for `email` if it is on the allow-list
    pub async fn authorize(&self, email: &str) -> Result<AdminSession, StorefrontError> {
        let email = email.trim();
        let matches = self
            .records
            .count(&Query::new(ADMINS).eq("email", email))
            .await?;
        if email.is_empty() || matches == 0 {
            tracing::warn!("Refused back-office access for {}", email);
            return Err(StorefrontError::NotAuthorized(email.to_string()));
        }

        tracing::info!("Back-office session opened for {}", email);
        Ok(AdminSession {
            email: email.to_string(),
            records: Arc::clone(&self.records),
        })
    }
}

/// An authorised back-office session
pub struct AdminSession {
    email: String,
    records: Arc<dyn RecordStore>,
}

impl AdminSession {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, StorefrontError> {
        let products = self.records.count(&Query::new(PRODUCTS)).await?;
        let collections = self.records.count(&Query::new(COLLECTIONS)).await?;
        let pending_orders = self
            .records
            .count(&Query::new(ORDERS).eq("status", OrderStatus::Pending.as_str()))
            .await?;
        let revenue: Rupees = self
            .records
            .select(&Query::new(ORDERS))
            .await?
            .iter()
            .filter_map(|order| order.get("total").and_then(Value::as_u64))
            .map(|total| Rupees(u32::try_from(total).unwrap_or(u32::MAX)))
            .sum();

        Ok(DashboardStats {
            products,
            collections,
            revenue,
            pending_orders,
        })
    }

    /// Every order, newest first
    pub async fn orders(&self) -> Result<Vec<Order>, StorefrontError> {
        let rows = self
            .records
            .select(&Query::new(ORDERS).order_by("created_at", SortOrder::Descending))
            .await?;
        parse_rows(rows)
    }

    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, StorefrontError> {
        let updated = self
            .records
            .update(
                &Query::new(ORDERS).eq("id", order_id),
                json!({ "status": status }),
            )
            .await?;
        let order = parse_rows::<Order>(updated)?
            .into_iter()
            .next()
            .ok_or_else(|| StorefrontError::not_found("order", order_id))?;

        tracing::info!("{} marked order {} as {}", self.email, order.id, status);
        Ok(order)
    }

    /// All products including hidden ones, newest first, optionally
    /// filtered by name
    pub async fn products(&self, search: Option<&str>) -> Result<Vec<Product>, StorefrontError> {
        let mut query = Query::new(PRODUCTS);
        if let Some(term) = search.filter(|term| !term.trim().is_empty()) {
            query = query.ilike("name", contains_pattern(term));
        }
        let rows = self
            .records
            .select(&query.order_by("created_at", SortOrder::Descending))
            .await?;
        parse_rows(rows)
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, StorefrontError> {
        product.validate()?;

        let mut record = serde_json::to_value(&product)?;
        if let Value::Object(fields) = &mut record {
            fields.insert("is_hidden".to_string(), Value::Bool(false));
        }
        let stored = self.records.insert(PRODUCTS, record).await?;
        let product: Product = serde_json::from_value(stored)?;

        tracing::info!("{} created product {}", self.email, product.id);
        Ok(product)
    }

    /// Hide a product from shoppers, or show it again
    pub async fn set_hidden(&self, product_id: &str, hidden: bool) -> Result<Product, StorefrontError> {
        let updated = self
            .records
            .update(
                &Query::new(PRODUCTS).eq("id", product_id),
                json!({ "is_hidden": hidden }),
            )
            .await?;
        parse_rows(updated)?
            .into_iter()
            .next()
            .ok_or_else(|| StorefrontError::not_found("product", product_id))
    }

    /// Replace a product's details; its hidden flag is left alone
    pub async fn update_product(
        &self,
        product_id: &str,
        product: NewProduct,
    ) -> Result<Product, StorefrontError> {
        product.validate()?;

        let updated = self
            .records
            .update(
                &Query::new(PRODUCTS).eq("id", product_id),
                serde_json::to_value(&product)?,
            )
            .await?;
        let product = parse_rows::<Product>(updated)?
            .into_iter()
            .next()
            .ok_or_else(|| StorefrontError::not_found("product", product_id))?;

        tracing::info!("{} updated product {}", self.email, product.id);
        Ok(product)
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), StorefrontError> {
        let removed = self
            .records
            .delete(&Query::new(PRODUCTS).eq("id", product_id))
            .await?;
        if removed == 0 {
            return Err(StorefrontError::not_found("product", product_id));
        }
        tracing::info!("{} deleted product {}", self.email, product_id);
        Ok(())
    }

    /// Every collection, newest first
    pub async fn collections(&self) -> Result<Vec<Collection>, StorefrontError> {
        let rows = self
            .records
            .select(&Query::new(COLLECTIONS).order_by("created_at", SortOrder::Descending))
            .await?;
        parse_rows(rows)
    }

    /// Validated record for `form`, with a preview image per chosen poster
    async fn collection_record(&self, form: &CollectionForm) -> Result<Value, StorefrontError> {
        form.validate()?;

        let mut image_urls = Vec::with_capacity(form.product_ids.len());
        for product_id in &form.product_ids {
            let rows = self
                .records
                .select(&Query::new(PRODUCTS).eq("id", product_id.as_str()).limit(1))
                .await?;
            let product = parse_rows::<Product>(rows)?
                .into_iter()
                .next()
                .ok_or_else(|| StorefrontError::not_found("product", product_id.as_str()))?;
            image_urls.push(product.image_url);
        }

        Ok(serde_json::to_value(CollectionRecord { form, image_urls })?)
    }

    pub async fn create_collection(
        &self,
        form: CollectionForm,
    ) -> Result<Collection, StorefrontError> {
        let record = self.collection_record(&form).await?;
        let stored = self.records.insert(COLLECTIONS, record).await?;
        let collection: Collection = serde_json::from_value(stored)?;

        tracing::info!("{} created collection {}", self.email, collection.id);
        Ok(collection)
    }

    pub async fn update_collection(
        &self,
        collection_id: &str,
        form: CollectionForm,
    ) -> Result<Collection, StorefrontError> {
        let record = self.collection_record(&form).await?;
        let updated = self
            .records
            .update(&Query::new(COLLECTIONS).eq("id", collection_id), record)
            .await?;
        let collection = parse_rows::<Collection>(updated)?
            .into_iter()
            .next()
            .ok_or_else(|| StorefrontError::not_found("collection", collection_id))?;

        tracing::info!("{} updated collection {}", self.email, collection.id);
        Ok(collection)
    }
}
