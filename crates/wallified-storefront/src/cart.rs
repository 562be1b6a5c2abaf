//! Shopping cart.
//!
//! Lines are keyed by their id. Custom designs carry a unique
//! `custom-<design id>` id; catalog posters use `<product id>-<size>` so the
//! same poster in two sizes stays on two lines.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wallified_core::Rupees;
use wallified_settings::CheckoutSettings;
use wallified_studio::{CartLineItem, CartSink};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line, or raise the quantity of the line with the same id
    pub fn add(&mut self, item: CartLineItem) {
        let quantity = item.quantity.max(1);
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartLineItem { quantity, ..item }),
        }
    }

    /// Set a line's quantity (at least 1). Returns false for unknown ids.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> bool {
        match self.items.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<CartLineItem> {
        let index = self.items.iter().position(|line| line.id == id)?;
        Some(self.items.remove(index))
    }

    /// Take the lines of `ordered` out of the cart. Quantities added to a
    /// line since the snapshot stay behind, as do lines added since.
    pub fn remove_ordered(&mut self, ordered: &Cart) {
        for placed in &ordered.items {
            if let Some(line) = self.items.iter_mut().find(|line| line.id == placed.id) {
                line.quantity = line.quantity.saturating_sub(placed.quantity);
            }
        }
        self.items.retain(|line| line.quantity > 0);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> Rupees {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Number of posters, counting quantities
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Shipping shown on the cart page: free from the threshold up
    pub fn shipping_estimate(&self, settings: &CheckoutSettings) -> Rupees {
        if self.subtotal() >= settings.free_shipping_threshold {
            Rupees::ZERO
        } else {
            settings.shipping_fee
        }
    }
}

/// Cart shared between the studio, product pages and checkout
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<Cart>>,
}

impl SharedCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cart(cart: Cart) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cart)),
        }
    }

    /// Copy of the current cart
    pub fn snapshot(&self) -> Cart {
        self.inner.lock().clone()
    }

    pub fn add(&self, item: CartLineItem) {
        self.inner.lock().add(item);
    }

    pub fn update_quantity(&self, id: &str, quantity: u32) -> bool {
        self.inner.lock().update_quantity(id, quantity)
    }

    pub fn remove(&self, id: &str) -> Option<CartLineItem> {
        self.inner.lock().remove(id)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn remove_ordered(&self, ordered: &Cart) {
        self.inner.lock().remove_ordered(ordered);
    }

    pub fn subtotal(&self) -> Rupees {
        self.inner.lock().subtotal()
    }

    pub fn item_count(&self) -> u32 {
        self.inner.lock().item_count()
    }
}

impl CartSink for SharedCart {
    fn add_to_cart(&self, item: CartLineItem) {
        tracing::debug!("Cart: adding {}", item.id);
        self.add(item);
    }
}
