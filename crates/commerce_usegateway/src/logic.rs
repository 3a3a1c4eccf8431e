// --- File: crates/commerce_usegateway/src/logic.rs ---

use axum::http::HeaderMap;
use commerce_common::{Lexicon, Order, Payment};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{UsegatewayError, WebhookRejection};
use crate::lang::ORDER_DESCRIPTION;

// Conditionally import ToSchema if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Key the payment method is registered under and selected by.
pub const METHOD_KEY: &str = "usegateway";

pub const DEFAULT_API_URL: &str = "https://api.usegateway.net/v1";

/// The only webhook event that completes a payment.
pub const COMPLETED_EVENT: &str = "payment.completed";

/// Headers every callback must carry. Their values are not verified.
pub const SIGNATURE_HEADERS: [&str; 3] = ["Svix-Id", "Svix-Timestamp", "Svix-Signature"];

pub const SUCCESS_PATH: &str = "commerce/usegateway/payment-success";
pub const FAILED_PATH: &str = "commerce/usegateway/payment-failed";

// --- Checkout Session Payload ---

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LocalPrice {
    /// Decimal string, e.g. "12.50".
    pub amount: String,
    pub currency: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CheckoutMetadata {
    pub order_id: i64,
    pub payment_id: i64,
}

/// Body of `POST /payments/`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CheckoutSessionRequest {
    pub name: String,
    pub description: String,
    pub pricing_type: String,
    pub local_price: LocalPrice,
    pub metadata: CheckoutMetadata,
    pub cancel_url: String,
    pub redirect_url: String,
}

/// The part of the session-creation answer we use.
#[derive(Deserialize, Debug, Clone)]
pub struct CheckoutSessionResponse {
    pub hosted_url: String,
    #[serde(default)]
    pub id: Option<String>,
}

// --- Webhook Payload ---

/// Order and payment ids arrive as JSON numbers or strings depending on how
/// they were echoed back by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataId {
    Number(i64),
    Text(String),
}

impl MetadataId {
    /// Reads an id from any JSON value; `null` counts as absent.
    ///
    /// Integral floats such as `17.0` become numbers. Anything else that is
    /// not an integer is kept as text and will not match a stored id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(
                n.as_i64()
                    .or_else(|| {
                        n.as_f64()
                            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                            .map(|f| f as i64)
                    })
                    .map_or_else(|| MetadataId::Text(n.to_string()), MetadataId::Number),
            ),
            Value::String(s) => Some(MetadataId::Text(s.clone())),
            other => Some(MetadataId::Text(other.to_string())),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataId::Number(n) => Some(*n),
            MetadataId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for MetadataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataId::Number(n) => write!(f, "{}", n),
            MetadataId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WebhookMetadata {
    pub order_id: Option<MetadataId>,
    pub payment_id: Option<MetadataId>,
}

#[derive(Debug, Clone, Default)]
pub struct WebhookPayload {
    pub event: Option<String>,
    pub metadata: Option<WebhookMetadata>,
}

impl WebhookPayload {
    /// Reads each field on its own so one malformed field does not hide the others.
    pub fn from_value(value: &Value) -> Self {
        let event = value.get("event").and_then(|event| match event {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });
        let metadata = value
            .get("metadata")
            .filter(|metadata| metadata.is_object())
            .map(|metadata| WebhookMetadata {
                order_id: metadata.get("order_id").and_then(MetadataId::from_value),
                payment_id: metadata.get("payment_id").and_then(MetadataId::from_value),
            });
        Self { event, metadata }
    }
}

/// A callback that passed every check that does not need storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPayment {
    pub order_id: MetadataId,
    pub payment_id: MetadataId,
}

// --- Core Logic Functions ---

/// Renders minor units as a two-decimal string: `1250` becomes `"12.50"`.
pub fn format_amount(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Joins the site root and a site-relative path with exactly one slash.
pub fn site_url_for(site_url: &str, path: &str) -> String {
    format!("{}/{}", site_url.trim_end_matches('/'), path)
}

/// Builds the checkout session payload for one payment of an order.
pub fn build_checkout_request(
    order: &Order,
    payment: &Payment,
    lexicon: &Lexicon,
    site_url: &str,
) -> CheckoutSessionRequest {
    let title = format!("{} {}", lexicon.get(ORDER_DESCRIPTION), order.id);

    CheckoutSessionRequest {
        name: title.clone(),
        description: title,
        pricing_type: "fixed_price".to_string(),
        local_price: LocalPrice {
            amount: format_amount(payment.amount),
            currency: order.currency.clone(),
        },
        metadata: CheckoutMetadata {
            order_id: order.id,
            payment_id: payment.id,
        },
        cancel_url: site_url_for(site_url, FAILED_PATH),
        redirect_url: site_url_for(site_url, SUCCESS_PATH),
    }
}

/// Creates a checkout session. Anything but `201 Created` with a non-empty
/// JSON body carrying `hosted_url` is a [`UsegatewayError::RequestFailed`].
pub async fn create_checkout_session(
    client: &Client,
    api_url: &str,
    secret_key: &str,
    request: &CheckoutSessionRequest,
) -> Result<CheckoutSessionResponse, UsegatewayError> {
    let url = format!("{}/payments/", api_url.trim_end_matches('/'));
    debug!(
        "Sending checkout session request for order {} to {}",
        request.metadata.order_id, url
    );

    let response = client
        .post(&url)
        .header(header::ACCEPT, "application/json")
        .header("x-api-key", secret_key)
        .json(request)
        .send()
        .await?;

    let status = response.status();
    let body_text = response
        .text()
        .await
        .map_err(|err| body_read_failed(status, err))?;

    if status != StatusCode::CREATED {
        warn!("Usegateway API answered {}: {}", status, body_text);
        return Err(UsegatewayError::RequestFailed {
            status: Some(status.as_u16()),
            message: body_text,
        });
    }

    let failed = |message: &str| UsegatewayError::RequestFailed {
        status: Some(status.as_u16()),
        message: message.to_string(),
    };

    let body: serde_json::Value =
        serde_json::from_str(&body_text).map_err(|_| failed("response body is not JSON"))?;
    let is_empty = match &body {
        serde_json::Value::Object(map) => map.is_empty(),
        _ => true,
    };
    if is_empty {
        return Err(failed("response body is empty"));
    }

    let session: CheckoutSessionResponse =
        serde_json::from_value(body).map_err(|_| failed("response has no hosted_url"))?;
    if session.hosted_url.is_empty() {
        return Err(failed("response has an empty hosted_url"));
    }

    info!(
        "Usegateway checkout session created for order {}: {:?}",
        request.metadata.order_id, session.id
    );
    Ok(session)
}

/// A response whose body could not be read still reports the status it came with.
pub fn body_read_failed(status: StatusCode, err: impl fmt::Display) -> UsegatewayError {
    UsegatewayError::RequestFailed {
        status: Some(status.as_u16()),
        message: format!("failed to read response body: {}", err),
    }
}

/// Decodes a callback body. Undecodable input yields an empty payload, which
/// then fails validation like any other incomplete callback.
pub fn parse_webhook_payload(body: &[u8]) -> WebhookPayload {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => WebhookPayload::from_value(&value),
        Err(err) => {
            debug!("Webhook body is not JSON: {}", err);
            WebhookPayload::default()
        }
    }
}

/// Checks that the Svix headers are present. Presence only.
pub fn check_signature_headers(headers: &HeaderMap) -> Result<(), WebhookRejection> {
    match SIGNATURE_HEADERS
        .iter()
        .find(|name| !headers.contains_key(**name))
    {
        Some(missing) => Err(WebhookRejection::MissingHeader(*missing)),
        None => Ok(()),
    }
}

/// Runs every callback check that does not touch payment storage.
pub fn validate_webhook(
    payload: &WebhookPayload,
    headers: &HeaderMap,
) -> Result<CompletedPayment, WebhookRejection> {
    check_signature_headers(headers)?;

    if payload.event.as_deref() != Some(COMPLETED_EVENT) {
        return Err(WebhookRejection::UnexpectedEvent(payload.event.clone()));
    }

    let metadata = payload
        .metadata
        .as_ref()
        .ok_or(WebhookRejection::MissingMetadata("order_id"))?;
    let order_id = metadata
        .order_id
        .clone()
        .ok_or(WebhookRejection::MissingMetadata("order_id"))?;
    let payment_id = metadata
        .payment_id
        .clone()
        .ok_or(WebhookRejection::MissingMetadata("payment_id"))?;

    Ok(CompletedPayment {
        order_id,
        payment_id,
    })
}
