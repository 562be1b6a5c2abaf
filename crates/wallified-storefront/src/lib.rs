//! # Wallified Storefront
//!
//! Everything around the studio that turns posters into orders: the shared
//! cart, checkout with prepaid or cash-on-delivery payment, catalog queries
//! and the back office.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;

pub use admin::{
    Admin, AdminSession, CollectionForm, DashboardStats, NewProduct, ADMINS,
    MIN_COLLECTION_POSTERS,
};
pub use cart::{Cart, SharedCart};
pub use catalog::{Catalog, Category, Collection, Product, CATEGORIES, COLLECTIONS, PRODUCTS};
pub use checkout::{
    Checkout, Order, OrderStatus, OrderTotals, PaymentMethod, ShippingAddress, ORDERS,
};
pub use error::{StorefrontError, StorefrontResult};
