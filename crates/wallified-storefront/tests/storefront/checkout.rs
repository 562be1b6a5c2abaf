use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use wallified_core::{
    InMemoryPaymentProcessor, InMemoryRecordStore, PaymentError, PaymentIntent, PaymentProcessor,
    PaymentStatus, Query, RecordStore, Rupees,
};
use wallified_settings::CheckoutSettings;
use wallified_storefront::{
    Checkout, OrderStatus, PaymentMethod, SharedCart, StorefrontError, ORDERS,
};

use crate::support::{address, poster, shop};

/// Approves payments, but a design lands in the cart while confirmation
/// is in flight
struct AddsLineOnConfirm {
    inner: InMemoryPaymentProcessor,
    cart: SharedCart,
}

#[async_trait]
impl PaymentProcessor for AddsLineOnConfirm {
    async fn create_intent(
        &self,
        amount: Rupees,
        metadata: BTreeMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError> {
        self.inner.create_intent(amount, metadata).await
    }

    async fn confirm(&self, intent_id: &str) -> Result<PaymentStatus, PaymentError> {
        self.cart.add(poster("custom-late", 308, 1));
        self.cart.add(poster("p1-A4", 299, 1));
        self.inner.confirm(intent_id).await
    }
}

#[tokio::test]
async fn test_prepaid_order_is_charged_and_recorded() {
    let shop = shop();
    shop.cart.add(poster("p1-A4", 299, 2));

    let order = shop
        .checkout
        .place_order(&shop.cart, &address(), PaymentMethod::Prepaid)
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.totals.subtotal, Rupees(598));
    assert_eq!(order.totals.cod_fee, Rupees::ZERO);
    assert_eq!(order.totals.total, Rupees(598));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.customer_email, "asha@example.com");

    let intent_id = order.payment_intent_id.clone().unwrap();
    let intent = shop.payments.intent(&intent_id).unwrap();
    assert_eq!(intent.amount, Rupees(598));
    assert_eq!(shop.records.len(ORDERS), 1);
    assert!(shop.cart.snapshot().is_empty());
}

#[tokio::test]
async fn test_cod_order_adds_fee_and_stays_pending() {
    let shop = shop();
    shop.cart.add(poster("p1-A4", 299, 1));

    let order = shop
        .checkout
        .place_order(&shop.cart, &address(), PaymentMethod::Cod)
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_intent_id, None);
    assert_eq!(order.totals.cod_fee, Rupees(50));
    assert_eq!(order.totals.total, Rupees(349));

    let stored = shop
        .records
        .select(&Query::new(ORDERS).eq("status", "pending"))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["payment_method"], "cod");
}

#[tokio::test]
async fn test_empty_cart_and_minimum_order() {
    let shop = shop();
    let result = shop
        .checkout
        .place_order(&shop.cart, &address(), PaymentMethod::Cod)
        .await;
    assert_eq!(result, Err(StorefrontError::EmptyCart));

    shop.cart.add(poster("sticker", 149, 1));
    let result = shop
        .checkout
        .place_order(&shop.cart, &address(), PaymentMethod::Cod)
        .await;
    assert_eq!(
        result,
        Err(StorefrontError::MinimumOrder {
            subtotal: Rupees(149),
            minimum: Rupees(200),
        })
    );
    assert_eq!(shop.records.len(ORDERS), 0);
    assert_eq!(shop.cart.item_count(), 1);
}

#[tokio::test]
async fn test_invalid_address_is_refused_before_payment() {
    let shop = shop();
    shop.cart.add(poster("p1-A4", 299, 1));
    let mut bad = address();
    bad.pincode = "4110".to_string();

    let result = shop
        .checkout
        .place_order(&shop.cart, &bad, PaymentMethod::Prepaid)
        .await;
    assert!(matches!(result, Err(StorefrontError::Validation(_))));
    assert_eq!(shop.records.len(ORDERS), 0);
}

#[tokio::test]
async fn test_declined_payment_keeps_cart() {
    let shop = shop();
    shop.cart.add(poster("p1-A4", 299, 1));
    shop.payments.set_declining(true);

    let result = shop
        .checkout
        .place_order(&shop.cart, &address(), PaymentMethod::Prepaid)
        .await;
    assert!(matches!(
        result,
        Err(StorefrontError::Payment(PaymentError::Declined { .. }))
    ));
    assert_eq!(shop.records.len(ORDERS), 0);
    assert_eq!(shop.cart.item_count(), 1);
}

#[tokio::test]
async fn test_store_outage_keeps_cart() {
    let shop = shop();
    shop.cart.add(poster("p1-A4", 299, 1));
    shop.records.set_available(false);

    let result = shop
        .checkout
        .place_order(&shop.cart, &address(), PaymentMethod::Cod)
        .await;
    assert!(matches!(result, Err(StorefrontError::Persistence(_))));
    assert_eq!(shop.cart.item_count(), 1);
}

#[tokio::test]
async fn test_lines_added_during_payment_stay_in_cart() {
    let records = Arc::new(InMemoryRecordStore::new());
    let cart = SharedCart::new();
    let payments = Arc::new(AddsLineOnConfirm {
        inner: InMemoryPaymentProcessor::new(),
        cart: cart.clone(),
    });
    let checkout = Checkout::new(records.clone(), payments, CheckoutSettings::default());
    cart.add(poster("p1-A4", 299, 2));

    let order = checkout
        .place_order(&cart, &address(), PaymentMethod::Prepaid)
        .await
        .unwrap();

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.totals.subtotal, Rupees(598));

    let left = cart.snapshot();
    let lines: Vec<(&str, u32)> = left
        .items()
        .iter()
        .map(|line| (line.id.as_str(), line.quantity))
        .collect();
    assert_eq!(lines, vec![("p1-A4", 1), ("custom-late", 1)]);
}

#[test]
fn test_checkout_summary_totals() {
    let shop = shop();
    shop.cart.add(poster("p1-A4", 299, 1));
    assert_eq!(
        shop.checkout.totals(&shop.cart, PaymentMethod::Cod).total,
        Rupees(349)
    );
    assert_eq!(
        shop.checkout.totals(&shop.cart, PaymentMethod::Prepaid).total,
        Rupees(299)
    );
}
