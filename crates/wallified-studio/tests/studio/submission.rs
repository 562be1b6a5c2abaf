use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wallified_core::{
    InMemoryObjectStorage, InMemoryRecordStore, ObjectStorage, Query, RecordStore, Rupees,
    StorageError,
};
use wallified_studio::{
    CartLineItem, CartSink, DesignSubmitter, LayoutMode, Studio, StudioError, CUSTOM_DESIGNS,
};

use crate::support::{decoded, remote_source, studio_with};

#[derive(Default)]
struct RecordingCart {
    items: Mutex<Vec<CartLineItem>>,
}

impl RecordingCart {
    fn items(&self) -> Vec<CartLineItem> {
        self.items.lock().unwrap().clone()
    }
}

impl CartSink for RecordingCart {
    fn add_to_cart(&self, item: CartLineItem) {
        self.items.lock().unwrap().push(item);
    }
}

/// Storage that takes a while to answer
struct SlowStorage(InMemoryObjectStorage);

#[async_trait]
impl ObjectStorage for SlowStorage {
    async fn put(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<String, StorageError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.0.put(bytes, suggested_name).await
    }
}

struct Backend {
    storage: Arc<InMemoryObjectStorage>,
    records: Arc<InMemoryRecordStore>,
    cart: Arc<RecordingCart>,
    submitter: DesignSubmitter,
}

fn backend() -> Backend {
    let storage = Arc::new(InMemoryObjectStorage::new("memory://images"));
    let records = Arc::new(InMemoryRecordStore::new());
    let cart = Arc::new(RecordingCart::default());
    let submitter = DesignSubmitter::new(storage.clone(), records.clone(), cart.clone());
    Backend {
        storage,
        records,
        cart,
        submitter,
    }
}

#[tokio::test]
async fn test_empty_design_never_reaches_persistence() {
    let backend = backend();
    let studio = Studio::default();

    let result = studio.submit(&backend.submitter).await;
    assert_eq!(result, Err(StudioError::EmptyDesign));
    assert!(backend.storage.is_empty());
    assert_eq!(backend.records.len(CUSTOM_DESIGNS), 0);
    assert!(backend.cart.items().is_empty());
}

#[tokio::test]
async fn test_submit_stores_design_and_fills_cart() {
    let backend = backend();
    let (mut studio, _) = studio_with(&[(3000, 2000), (2400, 3600)]);
    studio.set_borderless(true);
    studio.set_layout_mode(LayoutMode::Separate);

    let item = studio.submit(&backend.submitter).await.unwrap();

    assert_eq!(backend.storage.len(), 1);
    assert!(item.image_url.starts_with("memory://images/"));
    assert!(backend.storage.get(&item.image_url).is_some());

    let rows = backend
        .records
        .select(&Query::new(CUSTOM_DESIGNS))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["size"], "A4");
    assert_eq!(row["preview_url"], Value::String(item.image_url.clone()));
    assert_eq!(row["design_data"]["total_price"], 616);
    assert_eq!(row["design_data"]["print_specs"]["margin"], "0mm");
    assert_eq!(row["design_data"]["layout_mode"], "separate");
    assert_eq!(
        row["design_data"]["images"].as_array().map(Vec::len),
        Some(2)
    );

    let design_id = row["id"].as_str().unwrap();
    assert_eq!(item.id, format!("custom-{}", design_id));
    assert_eq!(item.design_id.as_deref(), Some(design_id));
    assert_eq!(item.name, "Wallified Custom A4");
    assert_eq!(item.price, Rupees(616));
    assert_eq!(item.quantity, 1);
    assert!(item.is_custom);
    assert!(item.is_borderless);
    assert_eq!(backend.cart.items(), vec![item]);
}

#[tokio::test]
async fn test_failed_upload_keeps_state_and_allows_retry() {
    let backend = backend();
    let (studio, _) = studio_with(&[(3000, 2000)]);
    let before = studio.state().clone();

    backend.storage.set_available(false);
    let err = studio.submit(&backend.submitter).await.unwrap_err();
    assert!(matches!(err, StudioError::Persistence(_)));
    assert!(err.is_retryable());
    assert!(backend.cart.items().is_empty());
    assert_eq!(studio.state(), &before);
    assert!(!backend.submitter.is_submitting());

    backend.storage.set_available(true);
    let item = studio.submit(&backend.submitter).await.unwrap();
    assert_eq!(item.price, Rupees(299));
    assert_eq!(backend.cart.items().len(), 1);
}

#[tokio::test]
async fn test_failed_insert_leaves_cart_empty() {
    let backend = backend();
    let (studio, _) = studio_with(&[(3000, 2000)]);

    backend.records.set_available(false);
    let result = studio.submit(&backend.submitter).await;
    assert!(matches!(result, Err(StudioError::Persistence(_))));
    assert!(backend.cart.items().is_empty());
}

#[tokio::test]
async fn test_remote_preview_is_not_reuploaded() {
    let backend = backend();
    let mut image = decoded(3000, 2000);
    image.source = remote_source();
    let mut studio = Studio::default();
    studio.add_images(vec![image]).unwrap();

    let item = studio.submit(&backend.submitter).await.unwrap();
    assert_eq!(item.image_url, remote_source().as_str());
    assert!(backend.storage.is_empty());
}

#[tokio::test]
async fn test_double_submit_is_refused() {
    let records = Arc::new(InMemoryRecordStore::new());
    let cart = Arc::new(RecordingCart::default());
    let storage = Arc::new(SlowStorage(InMemoryObjectStorage::new("memory://slow")));
    let submitter = DesignSubmitter::new(storage, records.clone(), cart.clone());
    let (studio, _) = studio_with(&[(3000, 2000)]);

    let (first, second) = tokio::join!(studio.submit(&submitter), studio.submit(&submitter));

    assert!(first.is_ok());
    assert_eq!(second, Err(StudioError::SubmissionInFlight));
    assert_eq!(records.len(CUSTOM_DESIGNS), 1);
    assert_eq!(cart.items().len(), 1);
    assert!(!submitter.is_submitting());
}
