//! Checkout and order placement.
//!
//! Prepaid orders are charged through the payment processor before they are
//! recorded; cash-on-delivery orders are recorded straight away with a COD
//! surcharge. Ordered lines leave the cart only once the order row exists;
//! anything added to the cart meanwhile stays for the next order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use wallified_core::{PaymentError, PaymentProcessor, PaymentStatus, RecordStore, Rupees};
use wallified_settings::CheckoutSettings;
use wallified_studio::CartLineItem;

use crate::cart::SharedCart;
use crate::error::StorefrontError;

/// Collection holding placed orders
pub const ORDERS: &str = "orders";

/// Delivery details entered at checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl ShippingAddress {
    /// Checks fields in form order and reports the first problem
    pub fn validate(&self) -> Result<(), StorefrontError> {
        let blank = |value: &str| value.trim().is_empty();

        if blank(&self.name) {
            return Err(StorefrontError::validation("Name is required"));
        }
        if blank(&self.email) || !self.email.contains('@') {
            return Err(StorefrontError::validation("Valid email is required"));
        }
        if self.phone.trim().len() < 10 {
            return Err(StorefrontError::validation(
                "Valid phone number is required",
            ));
        }
        if blank(&self.address) {
            return Err(StorefrontError::validation("Address is required"));
        }
        if blank(&self.city) {
            return Err(StorefrontError::validation("City is required"));
        }
        if blank(&self.state) {
            return Err(StorefrontError::validation("State is required"));
        }
        let pincode = self.pincode.trim();
        if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
            return Err(StorefrontError::validation(
                "Valid 6-digit pincode is required",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card/UPI through the payment processor
    #[default]
    Prepaid,
    /// Cash on delivery
    Cod,
}

/// Fulfilment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Printed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Printed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Printed => "printed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| StorefrontError::validation(format!("Unknown order status '{}'", s)))
    }
}

/// Money breakdown of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Rupees,
    pub shipping_fee: Rupees,
    pub cod_fee: Rupees,
    pub total: Rupees,
}

impl OrderTotals {
    /// Shipping is free at checkout; COD adds its fee
    pub fn compute(subtotal: Rupees, method: PaymentMethod, settings: &CheckoutSettings) -> Self {
        let shipping_fee = Rupees::ZERO;
        let cod_fee = match method {
            PaymentMethod::Cod => settings.cod_fee,
            PaymentMethod::Prepaid => Rupees::ZERO,
        };
        Self {
            subtotal,
            shipping_fee,
            cod_fee,
            total: subtotal + shipping_fee + cod_fee,
        }
    }
}

/// Order row as written to the record store
#[derive(Debug, Clone, Serialize)]
struct NewOrder<'a> {
    payment_intent_id: Option<&'a str>,
    status: OrderStatus,
    payment_method: PaymentMethod,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
    shipping_address: &'a str,
    shipping_city: &'a str,
    shipping_state: &'a str,
    shipping_pincode: &'a str,
    #[serde(flatten)]
    totals: OrderTotals,
    items: &'a [CartLineItem],
}

/// A stored order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_pincode: String,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub items: Vec<CartLineItem>,
    pub created_at: DateTime<Utc>,
}

/// Places orders for the shared cart
pub struct Checkout {
    records: Arc<dyn RecordStore>,
    payments: Arc<dyn PaymentProcessor>,
    settings: CheckoutSettings,
}

impl Checkout {
    pub fn new(
        records: Arc<dyn RecordStore>,
        payments: Arc<dyn PaymentProcessor>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            records,
            payments,
            settings,
        }
    }

    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Totals shown on the checkout summary
    pub fn totals(&self, cart: &SharedCart, method: PaymentMethod) -> OrderTotals {
        OrderTotals::compute(cart.subtotal(), method, &self.settings)
    }

    fn check_minimum(&self, subtotal: Rupees) -> Result<(), StorefrontError> {
        if subtotal < self.settings.min_order_value {
            return Err(StorefrontError::MinimumOrder {
                subtotal,
                minimum: self.settings.min_order_value,
            });
        }
        Ok(())
    }

    async fn charge(
        &self,
        totals: &OrderTotals,
        address: &ShippingAddress,
        item_count: u32,
    ) -> Result<String, StorefrontError> {
        let metadata = BTreeMap::from([
            ("customer_email".to_string(), address.email.clone()),
            ("item_count".to_string(), item_count.to_string()),
        ]);
        let intent = self.payments.create_intent(totals.total, metadata).await?;
        match self.payments.confirm(&intent.id).await? {
            PaymentStatus::Succeeded => Ok(intent.id),
            status => Err(PaymentError::Declined {
                reason: format!("payment ended as {:?}", status),
            }
            .into()),
        }
    }

    /// Validate, charge when prepaid, record the order and take the ordered
    /// lines out of the cart
    pub async fn place_order(
        &self,
        cart: &SharedCart,
        address: &ShippingAddress,
        method: PaymentMethod,
    ) -> Result<Order, StorefrontError> {
        address.validate()?;

        let snapshot = cart.snapshot();
        if snapshot.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        let totals = OrderTotals::compute(snapshot.subtotal(), method, &self.settings);
        self.check_minimum(totals.subtotal)?;

        let (status, payment_intent_id) = match method {
            PaymentMethod::Prepaid => {
                let intent_id = self
                    .charge(&totals, address, snapshot.item_count())
                    .await?;
                (OrderStatus::Paid, Some(intent_id))
            }
            PaymentMethod::Cod => (OrderStatus::Pending, None),
        };

        let row = NewOrder {
            payment_intent_id: payment_intent_id.as_deref(),
            status,
            payment_method: method,
            customer_name: address.name.trim(),
            customer_email: address.email.trim(),
            customer_phone: address.phone.trim(),
            shipping_address: address.address.trim(),
            shipping_city: address.city.trim(),
            shipping_state: address.state.trim(),
            shipping_pincode: address.pincode.trim(),
            totals,
            items: snapshot.items(),
        };
        let stored = match self.records.insert(ORDERS, serde_json::to_value(&row)?).await {
            Ok(stored) => stored,
            Err(err) => {
                if let Some(intent_id) = &payment_intent_id {
                    tracing::error!("Order insert failed after payment {}: {}", intent_id, err);
                }
                return Err(err.into());
            }
        };
        let order: Order = serde_json::from_value(stored)?;

        cart.remove_ordered(&snapshot);
        tracing::info!(
            "Placed {:?} order {} for {} ({})",
            method,
            order.id,
            order.totals.total,
            order.status
        );
        Ok(order)
    }
}
