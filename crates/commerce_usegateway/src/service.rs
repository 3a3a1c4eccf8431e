// --- File: crates/commerce_usegateway/src/service.rs ---
use std::sync::Arc;

use axum::http::HeaderMap;
use commerce_common::{
    default_client, BoxFuture, CommerceError, CommerceHost, EventLevel, Lexicon, Order, Payment,
    PaymentMethod, PaymentProcessor,
};
use reqwest::Client;
use tracing::{info, warn};

use crate::error::{UsegatewayError, WebhookRejection};
use crate::lang::{ERROR_EMPTY_PARAMS, LEXICON_PACK};
use crate::logic::{
    build_checkout_request, create_checkout_session, parse_webhook_payload, validate_webhook,
    DEFAULT_API_URL,
};

/// Event-log source for checkout link failures.
pub const PAYMENT_LOG_SOURCE: &str = "Commerce Usegateway Payment";
/// Event-log source for callback handling.
pub const CALLBACK_LOG_SOURCE: &str = "Commerce Usegateway Payment Callback";

/// The Usegateway payment method.
///
/// Holds no per-request state: every call reads settings from the host and
/// talks to the processor for orders and payments.
pub struct UsegatewayPayment {
    host: Arc<dyn CommerceHost>,
    processor: Arc<dyn PaymentProcessor>,
    lexicon: Lexicon,
    debug: bool,
    client: Client,
}

impl UsegatewayPayment {
    /// Create the payment method with the default gateway HTTP client.
    pub fn new(
        host: Arc<dyn CommerceHost>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Result<Self, UsegatewayError> {
        let client = default_client()?;
        Ok(Self::with_client(host, processor, client))
    }

    pub fn with_client(
        host: Arc<dyn CommerceHost>,
        processor: Arc<dyn PaymentProcessor>,
        client: Client,
    ) -> Self {
        let lexicon = host.user_language(LEXICON_PACK);
        let debug = host.setting("debug").as_deref() == Some("1");
        Self {
            host,
            processor,
            lexicon,
            debug,
            client,
        }
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn host(&self) -> &Arc<dyn CommerceHost> {
        &self.host
    }

    fn non_empty_setting(&self, key: &str) -> Option<String> {
        self.host
            .setting(key)
            .filter(|value| !value.trim().is_empty())
    }

    fn secret_key(&self) -> Result<String, UsegatewayError> {
        self.non_empty_setting("secret_key")
            .ok_or(UsegatewayError::MissingConfiguration)
    }

    /// Inline error shown in checkout while the secret key is missing.
    pub fn markup(&self) -> Option<String> {
        match self.secret_key() {
            Ok(_) => None,
            Err(_) => Some(format!(
                r#"<span class="error" style="color: red;">{}</span>"#,
                self.lexicon.get(ERROR_EMPTY_PARAMS)
            )),
        }
    }

    /// Requests a hosted checkout page for `payment` and returns its URL.
    ///
    /// Fails with [`UsegatewayError::MissingConfiguration`] before any network
    /// traffic when no secret key is set.
    pub async fn checkout_link(
        &self,
        order: &Order,
        payment: &Payment,
    ) -> Result<String, UsegatewayError> {
        let secret_key = self.secret_key()?;
        let api_url = self
            .non_empty_setting("api_url")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let site_url = self
            .non_empty_setting("site_url")
            .unwrap_or_else(|| "/".to_string());

        let request = build_checkout_request(order, payment, &self.lexicon, &site_url);

        match create_checkout_session(&self.client, &api_url, &secret_key, &request).await {
            Ok(session) => Ok(session.hosted_url),
            Err(err) => {
                warn!("Checkout link for order {} failed: {}", order.id, err);
                if self.debug {
                    let payload = serde_json::to_string_pretty(&request).unwrap_or_default();
                    self.host.log_event(
                        EventLevel::Error,
                        PAYMENT_LOG_SOURCE,
                        &format!("Request failed: {}\n{}", payload, err),
                    );
                }
                Err(err)
            }
        }
    }

    /// Creates a payment for the order through the processor, then a checkout link for it.
    pub async fn payment_link(&self, order: &Order) -> Result<String, UsegatewayError> {
        // Checked here as well so no payment record is created for nothing.
        self.secret_key()?;
        let payment = self
            .processor
            .create_payment(order.id, order.amount)
            .await?;
        self.checkout_link(order, &payment).await
    }

    /// Handles a gateway callback and returns the processor's verdict.
    ///
    /// Header, event and metadata checks run before payment storage is touched.
    pub async fn handle_webhook(
        &self,
        body: &[u8],
        headers: &HeaderMap,
    ) -> Result<bool, UsegatewayError> {
        if self.debug {
            self.host.log_event(
                EventLevel::Info,
                CALLBACK_LOG_SOURCE,
                &format!("Callback start: {}", String::from_utf8_lossy(body)),
            );
        }

        let result = self.process_webhook(body, headers).await;

        match &result {
            Ok(processed) => info!("Usegateway callback processed: {}", processed),
            Err(err) => {
                warn!("Usegateway callback rejected: {}", err);
                if self.debug {
                    self.host.log_event(
                        EventLevel::Error,
                        CALLBACK_LOG_SOURCE,
                        &format!("Payment process failed: {}", err),
                    );
                }
            }
        }
        result
    }

    async fn process_webhook(
        &self,
        body: &[u8],
        headers: &HeaderMap,
    ) -> Result<bool, UsegatewayError> {
        let payload = parse_webhook_payload(body);
        let completed = validate_webhook(&payload, headers)?;

        let stored = match completed.payment_id.as_i64() {
            Some(payment_id) => self.processor.load_payment(payment_id).await?,
            None => None,
        };
        let payment = stored
            .ok_or_else(|| WebhookRejection::PaymentNotFound(completed.payment_id.to_string()))?;

        if completed.order_id.as_i64() != Some(payment.order_id) {
            return Err(WebhookRejection::OrderMismatch {
                payment_id: payment.id,
                expected: payment.order_id,
                received: completed.order_id.to_string(),
            }
            .into());
        }

        Ok(self
            .processor
            .process_payment(payment.id, payment.amount)
            .await?)
    }
}

impl PaymentMethod for UsegatewayPayment {
    fn markup(&self) -> Option<String> {
        UsegatewayPayment::markup(self)
    }

    fn payment_link<'a>(&'a self, order: &'a Order) -> BoxFuture<'a, String, CommerceError> {
        Box::pin(async move {
            UsegatewayPayment::payment_link(self, order)
                .await
                .map_err(CommerceError::from)
        })
    }

    fn handle_callback<'a>(
        &'a self,
        body: &'a [u8],
        headers: &'a HeaderMap,
    ) -> BoxFuture<'a, bool, CommerceError> {
        Box::pin(async move {
            self.handle_webhook(body, headers)
                .await
                .map_err(CommerceError::from)
        })
    }
}
