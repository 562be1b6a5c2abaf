//! # Wallified Core
//!
//! Core types and collaborator contracts shared by the studio and the
//! storefront crates. Provides the unified error type, the money newtype,
//! and the abstract interfaces of the hosted services the application
//! delegates to:
//!
//! - **Object storage**: binary uploads returning a durable public URL
//! - **Record store**: generic row/document queries (`eq`/`ilike` filters,
//!   ordering, counts)
//! - **Payment processor**: payment intent creation and confirmation
//!
//! Each contract ships with an in-memory backend used in development and
//! tests.

pub mod error;
pub mod money;
pub mod payment;
pub mod records;
pub mod storage;

pub use error::{Error, PaymentError, RecordError, Result, StorageError};
pub use money::Rupees;
pub use payment::{InMemoryPaymentProcessor, PaymentIntent, PaymentProcessor, PaymentStatus};
pub use records::{Filter, InMemoryRecordStore, Query, RecordStore, SortOrder};
pub use storage::{InMemoryObjectStorage, ObjectStorage, StoredObject};
