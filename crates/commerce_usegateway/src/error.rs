// --- File: crates/commerce_usegateway/src/error.rs ---
use commerce_common::{external_service_error, CommerceError, HttpStatusCode};
use std::fmt;
use thiserror::Error;

/// Why an inbound callback was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookRejection {
    /// One of the Svix headers is absent.
    MissingHeader(&'static str),
    /// `event` missing or not `payment.completed`.
    UnexpectedEvent(Option<String>),
    /// `metadata.order_id` or `metadata.payment_id` missing.
    MissingMetadata(&'static str),
    PaymentNotFound(String),
    OrderMismatch {
        payment_id: i64,
        expected: i64,
        received: String,
    },
}

impl fmt::Display for WebhookRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookRejection::MissingHeader(name) => write!(f, "missing header {}", name),
            WebhookRejection::UnexpectedEvent(Some(event)) => {
                write!(f, "unexpected event \"{}\"", event)
            }
            WebhookRejection::UnexpectedEvent(None) => f.write_str("event missing"),
            WebhookRejection::MissingMetadata(field) => write!(f, "metadata.{} missing", field),
            WebhookRejection::PaymentNotFound(id) => write!(f, "payment \"{}\" not found", id),
            WebhookRejection::OrderMismatch {
                payment_id,
                expected,
                received,
            } => write!(
                f,
                "payment {} belongs to order {}, callback names order \"{}\"",
                payment_id, expected, received
            ),
        }
    }
}

/// Usegateway-specific error types.
#[derive(Error, Debug)]
pub enum UsegatewayError {
    /// No secret key configured; shown inline to the customer.
    #[error("Usegateway configuration missing: secret_key is empty")]
    MissingConfiguration,

    /// Non-201 answer, empty or non-JSON body, or transport failure.
    #[error("Usegateway request failed with {}: {message}", status_label(.status))]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    #[error("Usegateway webhook rejected: {0}")]
    WebhookValidationFailed(WebhookRejection),

    /// The host processor failed while loading or processing a payment.
    #[error("Payment processor error: {0}")]
    Processor(#[from] CommerceError),
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "no response".to_string(), |s| s.to_string())
}

impl From<reqwest::Error> for UsegatewayError {
    fn from(err: reqwest::Error) -> Self {
        UsegatewayError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<WebhookRejection> for UsegatewayError {
    fn from(rejection: WebhookRejection) -> Self {
        UsegatewayError::WebhookValidationFailed(rejection)
    }
}

/// Convert UsegatewayError to CommerceError
impl From<UsegatewayError> for CommerceError {
    fn from(err: UsegatewayError) -> Self {
        match err {
            UsegatewayError::MissingConfiguration => {
                CommerceError::ConfigError("Usegateway secret_key is not set".to_string())
            }
            UsegatewayError::RequestFailed { status, message } => external_service_error(
                "Usegateway API",
                format!("Status: {}, Message: {}", status_label(&status), message),
            ),
            UsegatewayError::WebhookValidationFailed(rejection) => match rejection {
                WebhookRejection::PaymentNotFound(_) => {
                    CommerceError::NotFoundError(rejection.to_string())
                }
                other => CommerceError::ValidationError(other.to_string()),
            },
            UsegatewayError::Processor(inner) => inner,
        }
    }
}

impl HttpStatusCode for UsegatewayError {
    fn status_code(&self) -> u16 {
        match self {
            UsegatewayError::MissingConfiguration => 500,
            UsegatewayError::RequestFailed { .. } => 502,
            UsegatewayError::WebhookValidationFailed(_) => 400,
            UsegatewayError::Processor(inner) => inner.status_code(),
        }
    }
}
