// Shared fixtures for the Usegateway integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, HeaderValue};
use commerce_common::{
    BoxFuture, CommerceError, CommerceHost, EventLevel, InMemoryProcessor, Lexicon, Order,
    Payment, PaymentProcessor,
};
use commerce_usegateway::lang::builtin_lexicon;
use commerce_usegateway::UsegatewayPayment;

/// Host with fixed settings that records every event-log entry.
#[derive(Default)]
pub struct RecordingHost {
    settings: HashMap<String, String>,
    pub events: Mutex<Vec<(EventLevel, String, String)>>,
}

impl RecordingHost {
    pub fn new(settings: &[(&str, &str)]) -> Self {
        Self {
            settings: settings
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events_from(&self, source: &str) -> Vec<(EventLevel, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, s, _)| s == source)
            .map(|(level, _, message)| (*level, message.clone()))
            .collect()
    }
}

impl CommerceHost for RecordingHost {
    fn setting(&self, key: &str) -> Option<String> {
        self.settings.get(key).cloned()
    }

    fn log_event(&self, level: EventLevel, source: &str, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((level, source.to_string(), message.to_string()));
    }

    fn user_language(&self, _pack: &str) -> Lexicon {
        builtin_lexicon("english")
    }
}

/// Wraps the in-memory processor and counts storage lookups.
pub struct CountingProcessor {
    pub inner: InMemoryProcessor,
    pub payment_lookups: AtomicUsize,
    pub processed: AtomicUsize,
    /// Forces `process_payment` to answer this instead of delegating.
    pub verdict: Option<bool>,
}

impl CountingProcessor {
    pub fn new(inner: InMemoryProcessor) -> Self {
        Self {
            inner,
            payment_lookups: AtomicUsize::new(0),
            processed: AtomicUsize::new(0),
            verdict: None,
        }
    }

    pub fn declining(inner: InMemoryProcessor) -> Self {
        Self {
            verdict: Some(false),
            ..Self::new(inner)
        }
    }

    pub fn lookups(&self) -> usize {
        self.payment_lookups.load(Ordering::SeqCst)
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }
}

impl PaymentProcessor for CountingProcessor {
    fn load_order(&self, order_id: i64) -> BoxFuture<'_, Option<Order>, CommerceError> {
        self.inner.load_order(order_id)
    }

    fn create_payment(&self, order_id: i64, amount: i64) -> BoxFuture<'_, Payment, CommerceError> {
        self.inner.create_payment(order_id, amount)
    }

    fn load_payment(&self, payment_id: i64) -> BoxFuture<'_, Option<Payment>, CommerceError> {
        self.payment_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.load_payment(payment_id)
    }

    fn process_payment(&self, payment_id: i64, amount: i64) -> BoxFuture<'_, bool, CommerceError> {
        self.processed.fetch_add(1, Ordering::SeqCst);
        match self.verdict {
            Some(verdict) => Box::pin(async move { Ok(verdict) }),
            None => self.inner.process_payment(payment_id, amount),
        }
    }
}

pub fn order(id: i64, payment_method: &str) -> Order {
    Order {
        id,
        amount: 1250,
        currency: "USD".to_string(),
        payment_method: Some(payment_method.to_string()),
    }
}

/// Processor holding order 17 with a pending payment 3 of 12.50.
pub fn seeded_processor() -> InMemoryProcessor {
    let processor = InMemoryProcessor::with_orders([order(17, "usegateway")]);
    processor.insert_payment(Payment::new(3, 17, 1250));
    processor
}

pub fn svix_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Svix-Id", HeaderValue::from_static("msg_2Kd1"));
    headers.insert("Svix-Timestamp", HeaderValue::from_static("1700000000"));
    headers.insert("Svix-Signature", HeaderValue::from_static("v1,c2lnbmF0dXJl"));
    headers
}

pub fn completed_body(order_id: &str, payment_id: &str) -> Vec<u8> {
    format!(
        r#"{{"event":"payment.completed","metadata":{{"order_id":{},"payment_id":{}}}}}"#,
        order_id, payment_id
    )
    .into_bytes()
}

pub fn adapter(
    host: Arc<dyn CommerceHost>,
    processor: Arc<dyn PaymentProcessor>,
) -> UsegatewayPayment {
    UsegatewayPayment::new(host, processor).expect("http client")
}
