//! # Wallified
//!
//! Poster storefront core. The workspace is split into:
//!
//! 1. **wallified-core** - money, collaborator contracts (object storage,
//!    record store, payment processor) and their in-memory implementations
//! 2. **wallified-settings** - pricing, studio limits, print and checkout
//!    configuration
//! 3. **wallified-studio** - the custom poster design studio
//! 4. **wallified-storefront** - cart, checkout, catalog and back office
//! 5. **wallified** - this crate, which wires them together
//!
//! [`Wallified`] holds one shop: a shared cart plus the services that read
//! and write through the collaborators. Each visit to the design studio
//! gets its own [`Studio`] session from [`Wallified::studio`].

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

pub use wallified_core::{
    InMemoryObjectStorage, InMemoryPaymentProcessor, InMemoryRecordStore, ObjectStorage,
    PaymentProcessor, RecordStore, Rupees,
};
pub use wallified_settings::{CheckoutSettings, Config, PriceSheet, PrintSettings, StudioLimits};
pub use wallified_storefront::{
    Admin, AdminSession, Cart, Catalog, Checkout, Collection, CollectionForm, Order, OrderStatus,
    PaymentMethod, Product, SharedCart, ShippingAddress, StorefrontError,
};
pub use wallified_studio::{
    CartLineItem, DesignSpecification, DesignSubmitter, EditorState, LayoutMode, PaperSizeId,
    PreviewMode, Studio, StudioError, UploadedFile,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with `RUST_LOG` support, INFO and above by default.
/// Calling it again is harmless.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialised");
    }
    Ok(())
}

/// Load configuration from `path`, or from the default location when none
/// is given. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path().context("Could not locate the config directory")?,
    };
    Config::load_or_default(&path)
        .with_context(|| format!("Could not load configuration from {}", path.display()))
}

/// Remote services the shop talks to
#[derive(Clone)]
pub struct Backend {
    pub storage: Arc<dyn ObjectStorage>,
    pub records: Arc<dyn RecordStore>,
    pub payments: Arc<dyn PaymentProcessor>,
}

impl Backend {
    /// Everything in memory, for tests and local previews
    pub fn in_memory() -> Self {
        Self {
            storage: Arc::new(InMemoryObjectStorage::new("memory://wallified")),
            records: Arc::new(InMemoryRecordStore::new()),
            payments: Arc::new(InMemoryPaymentProcessor::new()),
        }
    }
}

/// One shop: configuration, the shared cart and the services around it
pub struct Wallified {
    config: Config,
    cart: SharedCart,
    submitter: DesignSubmitter,
    checkout: Checkout,
    catalog: Catalog,
    admin: Admin,
}

impl Wallified {
    pub fn new(config: Config, backend: Backend) -> Self {
        let cart = SharedCart::new();
        let submitter = DesignSubmitter::new(
            Arc::clone(&backend.storage),
            Arc::clone(&backend.records),
            Arc::new(cart.clone()),
        );
        let checkout = Checkout::new(
            Arc::clone(&backend.records),
            Arc::clone(&backend.payments),
            config.checkout.clone(),
        );
        let catalog = Catalog::new(Arc::clone(&backend.records));
        let admin = Admin::new(backend.records);

        tracing::info!("Wallified {} ready", VERSION);
        Self {
            config,
            cart,
            submitter,
            checkout,
            catalog,
            admin,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A fresh design studio session using the shop's limits and prices
    pub fn studio(&self) -> Studio {
        Studio::new(&self.config)
    }

    pub fn cart(&self) -> &SharedCart {
        &self.cart
    }

    /// Submits studio designs into this shop's cart
    pub fn submitter(&self) -> &DesignSubmitter {
        &self.submitter
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn admin(&self) -> &Admin {
        &self.admin
    }
}
