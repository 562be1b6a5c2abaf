//! Payment processor contract.
//!
//! Card/UPI payments go through a hosted processor: the checkout first
//! creates an intent for the order total, the customer confirms it, and the
//! order is recorded only once the intent has succeeded.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::error::PaymentError;
use crate::money::Rupees;

/// Lifecycle of a payment intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    RequiresPayment,
    Succeeded,
    Failed,
}

/// A payment intent issued by the processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Handed to the client-side payment element
    pub client_secret: String,
    pub amount: Rupees,
    pub status: PaymentStatus,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Hosted card/UPI payment processor
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create an intent to collect `amount`
    async fn create_intent(
        &self,
        amount: Rupees,
        metadata: BTreeMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Confirm a previously created intent
    async fn confirm(&self, intent_id: &str) -> Result<PaymentStatus, PaymentError>;
}

/// In-memory processor that approves every payment unless told to decline
pub struct InMemoryPaymentProcessor {
    intents: RwLock<HashMap<String, PaymentIntent>>,
    decline: AtomicBool,
}

impl InMemoryPaymentProcessor {
    pub fn new() -> Self {
        Self {
            intents: RwLock::new(HashMap::new()),
            decline: AtomicBool::new(false),
        }
    }

    /// Make subsequent confirmations fail
    pub fn set_declining(&self, decline: bool) {
        self.decline.store(decline, Ordering::SeqCst);
    }

    /// Look up an intent by id
    pub fn intent(&self, intent_id: &str) -> Option<PaymentIntent> {
        self.intents.read().get(intent_id).cloned()
    }
}

impl Default for InMemoryPaymentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProcessor for InMemoryPaymentProcessor {
    async fn create_intent(
        &self,
        amount: Rupees,
        metadata: BTreeMap<String, String>,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount == Rupees::ZERO {
            return Err(PaymentError::InvalidAmount {
                amount: amount.amount(),
            });
        }

        let id = format!("pi_{}", Uuid::new_v4().simple());
        let intent = PaymentIntent {
            client_secret: format!("{}_secret_{}", id, Uuid::new_v4().simple()),
            id: id.clone(),
            amount,
            status: PaymentStatus::RequiresPayment,
            metadata,
        };
        self.intents.write().insert(id, intent.clone());
        Ok(intent)
    }

    async fn confirm(&self, intent_id: &str) -> Result<PaymentStatus, PaymentError> {
        let mut intents = self.intents.write();
        let intent = intents
            .get_mut(intent_id)
            .ok_or_else(|| PaymentError::UnknownIntent(intent_id.to_string()))?;

        if self.decline.load(Ordering::SeqCst) {
            intent.status = PaymentStatus::Failed;
            return Err(PaymentError::Declined {
                reason: "card declined".to_string(),
            });
        }

        intent.status = PaymentStatus::Succeeded;
        Ok(intent.status)
    }
}
