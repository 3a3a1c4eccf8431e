// --- File: crates/commerce_common/src/memory.rs ---
//! In-process [`PaymentProcessor`] used by the standalone backend and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use crate::error::{internal_error, not_found, CommerceError};
use crate::models::{Order, Payment};
use crate::services::{BoxFuture, PaymentProcessor};

#[derive(Debug, Default)]
struct Store {
    orders: HashMap<i64, Order>,
    payments: HashMap<i64, Payment>,
    last_payment_id: i64,
}

/// Keeps orders and payments in memory behind a mutex.
#[derive(Debug, Default)]
pub struct InMemoryProcessor {
    store: Mutex<Store>,
}

impl InMemoryProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let processor = Self::new();
        for order in orders {
            processor.insert_order(order);
        }
        processor
    }

    pub fn insert_order(&self, order: Order) {
        if let Ok(mut store) = self.store.lock() {
            store.orders.insert(order.id, order);
        }
    }

    /// Stores a payment as-is, keeping the id counter ahead of it.
    pub fn insert_payment(&self, payment: Payment) {
        if let Ok(mut store) = self.store.lock() {
            store.last_payment_id = store.last_payment_id.max(payment.id);
            store.payments.insert(payment.id, payment);
        }
    }

    /// Snapshot of a stored payment.
    pub fn payment(&self, payment_id: i64) -> Option<Payment> {
        self.store
            .lock()
            .ok()
            .and_then(|store| store.payments.get(&payment_id).cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, CommerceError> {
        self.store
            .lock()
            .map_err(|_| internal_error("payment store lock poisoned"))
    }
}

impl PaymentProcessor for InMemoryProcessor {
    fn load_order(&self, order_id: i64) -> BoxFuture<'_, Option<Order>, CommerceError> {
        Box::pin(async move { Ok(self.lock()?.orders.get(&order_id).cloned()) })
    }

    fn create_payment(&self, order_id: i64, amount: i64) -> BoxFuture<'_, Payment, CommerceError> {
        Box::pin(async move {
            let mut store = self.lock()?;
            if !store.orders.contains_key(&order_id) {
                return Err(not_found(format!("order {}", order_id)));
            }
            store.last_payment_id += 1;
            let payment = Payment::new(store.last_payment_id, order_id, amount);
            store.payments.insert(payment.id, payment.clone());
            debug!("Created payment {} for order {}", payment.id, order_id);
            Ok(payment)
        })
    }

    fn load_payment(&self, payment_id: i64) -> BoxFuture<'_, Option<Payment>, CommerceError> {
        Box::pin(async move { Ok(self.lock()?.payments.get(&payment_id).cloned()) })
    }

    fn process_payment(&self, payment_id: i64, amount: i64) -> BoxFuture<'_, bool, CommerceError> {
        Box::pin(async move {
            let mut store = self.lock()?;
            let payment = store
                .payments
                .get_mut(&payment_id)
                .ok_or_else(|| not_found(format!("payment {}", payment_id)))?;
            if payment.amount != amount {
                return Ok(false);
            }
            payment.paid = true;
            info!("Payment {} for order {} marked as paid", payment.id, payment.order_id);
            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64) -> Order {
        Order {
            id,
            amount: 4200,
            currency: "EUR".to_string(),
            payment_method: Some("usegateway".to_string()),
        }
    }

    #[tokio::test]
    async fn payments_get_sequential_ids() {
        let processor = InMemoryProcessor::with_orders([order(1), order(2)]);
        let first = processor.create_payment(1, 4200).await.unwrap();
        let second = processor.create_payment(2, 4200).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(second.order_id, 2);
    }

    #[tokio::test]
    async fn payment_for_unknown_order_is_rejected() {
        let processor = InMemoryProcessor::new();
        let err = processor.create_payment(9, 100).await.unwrap_err();
        assert!(matches!(err, CommerceError::NotFoundError(_)));
    }

    #[tokio::test]
    async fn processing_marks_payment_paid() {
        let processor = InMemoryProcessor::with_orders([order(1)]);
        let payment = processor.create_payment(1, 4200).await.unwrap();
        assert!(processor.process_payment(payment.id, 4200).await.unwrap());
        assert!(processor.payment(payment.id).unwrap().paid);
    }

    #[tokio::test]
    async fn amount_mismatch_is_declined() {
        let processor = InMemoryProcessor::with_orders([order(1)]);
        let payment = processor.create_payment(1, 4200).await.unwrap();
        assert!(!processor.process_payment(payment.id, 1).await.unwrap());
        assert!(!processor.payment(payment.id).unwrap().paid);
    }
}
