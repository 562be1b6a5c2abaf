//! Persistence adapter.
//!
//! Turns a [`DesignSpecification`] into a stored `custom_designs` record and
//! a cart line item: upload the first photo as the preview, insert the
//! record, then hand the line item to the cart. A failure at any step leaves
//! the cart untouched so the whole submission can simply be retried.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wallified_core::{ObjectStorage, RecordStore, Rupees};

use crate::design::DesignSpecification;
use crate::error::StudioError;
use crate::model::{ImageLayer, ImageSource};

/// Collection holding submitted designs
pub const CUSTOM_DESIGNS: &str = "custom_designs";

/// One line of the shopping cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    /// Unit price
    pub price: Rupees,
    pub image_url: String,
    pub quantity: u32,
    pub size: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub design_id: Option<String>,
    #[serde(default)]
    pub is_borderless: bool,
}

impl CartLineItem {
    pub fn line_total(&self) -> Rupees {
        self.price.times(self.quantity)
    }
}

/// Receives finished designs
pub trait CartSink: Send + Sync {
    fn add_to_cart(&self, item: CartLineItem);
}

/// Split a base64 data URL into its mime type and bytes
pub fn decode_data_url(source: &ImageSource) -> Option<(String, Vec<u8>)> {
    let rest = source.as_str().strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}

fn preview_name(image: &ImageLayer, mime: &str) -> String {
    let extension = ImageFormat::from_mime_type(mime)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("img");
    format!("preview-{}.{}", image.id, extension)
}

fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Clears the in-flight flag however the submission ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Submits designs to storage, the record store and the cart
pub struct DesignSubmitter {
    storage: Arc<dyn ObjectStorage>,
    records: Arc<dyn RecordStore>,
    cart: Arc<dyn CartSink>,
    in_flight: AtomicBool,
}

impl DesignSubmitter {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        records: Arc<dyn RecordStore>,
        cart: Arc<dyn CartSink>,
    ) -> Self {
        Self {
            storage,
            records,
            cart,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is running (the submit control is disabled)
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Persist `design` and add it to the cart.
    ///
    /// A second call while one is running fails with `SubmissionInFlight`.
    pub async fn submit(&self, design: &DesignSpecification) -> Result<CartLineItem, StudioError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(StudioError::SubmissionInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        tracing::info!(
            "Submitting {} design with {} image(s)",
            design.state.paper_size,
            design.state.images.len()
        );
        match self.persist(design).await {
            Ok(item) => {
                tracing::info!("Design saved as {}", item.id);
                Ok(item)
            }
            Err(err) => {
                tracing::error!("Design submission failed: {}", err);
                Err(err)
            }
        }
    }

    async fn persist(&self, design: &DesignSpecification) -> Result<CartLineItem, StudioError> {
        let first = design
            .state
            .images
            .first()
            .ok_or(StudioError::EmptyDesign)?;

        let preview_url = match decode_data_url(&first.source) {
            Some((mime, bytes)) => self.storage.put(bytes, &preview_name(first, &mime)).await?,
            None => first.source.to_string(),
        };

        let size = design.state.paper_size.to_string();
        let record = json!({
            "design_data": design.to_json()?,
            "preview_url": preview_url,
            "size": size,
        });
        let stored = self.records.insert(CUSTOM_DESIGNS, record).await?;
        let design_id = record_id(&stored)
            .ok_or_else(|| StudioError::Persistence("stored design has no id".to_string()))?;

        let item = CartLineItem {
            id: format!("custom-{}", design_id),
            name: design.display_name(),
            price: design.total_price,
            image_url: preview_url,
            quantity: 1,
            size,
            is_custom: true,
            design_id: Some(design_id),
            is_borderless: design.state.borderless,
        };
        self.cart.add_to_cart(item.clone());
        Ok(item)
    }
}
