// --- File: crates/commerce_common/src/services.rs ---
//! Host capability traits.
//!
//! A payment method never reaches into the host through globals. It receives
//! these capabilities at construction time, which keeps the adapters testable
//! against fakes.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::http::HeaderMap;

use crate::error::CommerceError;
use crate::lang::Lexicon;
use crate::models::{Order, Payment};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Severity of a host event-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventLevel::Info => "info",
            EventLevel::Warning => "warning",
            EventLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Settings, event log and language packs provided by the CMS.
pub trait CommerceHost: Send + Sync {
    /// Per-installation plugin setting, `None` when unset.
    fn setting(&self, key: &str) -> Option<String>;

    /// Appends an entry to the host's event log.
    fn log_event(&self, level: EventLevel, source: &str, message: &str);

    /// Language pack for the current user.
    fn user_language(&self, pack: &str) -> Lexicon;
}

/// Order and payment persistence owned by the commerce module.
pub trait PaymentProcessor: Send + Sync {
    /// Load an order by id.
    fn load_order(&self, order_id: i64) -> BoxFuture<'_, Option<Order>, CommerceError>;

    /// Create a pending payment for an order.
    fn create_payment(&self, order_id: i64, amount: i64) -> BoxFuture<'_, Payment, CommerceError>;

    /// Load a payment by id.
    fn load_payment(&self, payment_id: i64) -> BoxFuture<'_, Option<Payment>, CommerceError>;

    /// Mark a payment as received. Returns the processor's verdict.
    fn process_payment(&self, payment_id: i64, amount: i64) -> BoxFuture<'_, bool, CommerceError>;
}

/// A payment method as the host registry sees it.
pub trait PaymentMethod: Send + Sync {
    /// Inline HTML shown next to the method in checkout, e.g. configuration errors.
    fn markup(&self) -> Option<String>;

    /// Builds the hosted payment link for an order.
    fn payment_link<'a>(&'a self, order: &'a Order) -> BoxFuture<'a, String, CommerceError>;

    /// Handles a gateway callback. `Ok(false)` means the processor declined it.
    fn handle_callback<'a>(
        &'a self,
        body: &'a [u8],
        headers: &'a HeaderMap,
    ) -> BoxFuture<'a, bool, CommerceError>;
}

/// A method registered with the host, with its display title.
#[derive(Clone)]
pub struct RegisteredPayment {
    pub title: String,
    pub method: Arc<dyn PaymentMethod>,
}

impl fmt::Debug for RegisteredPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredPayment")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Host registry of available payment methods, keyed by method key.
#[derive(Debug, Clone, Default)]
pub struct PaymentRegistry {
    methods: BTreeMap<String, RegisteredPayment>,
}

impl PaymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a method; a later registration under the same key replaces the earlier one.
    pub fn register_payment(&mut self, key: &str, title: &str, method: Arc<dyn PaymentMethod>) {
        self.methods.insert(
            key.to_string(),
            RegisteredPayment {
                title: title.to_string(),
                method,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&RegisteredPayment> {
        self.methods.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
