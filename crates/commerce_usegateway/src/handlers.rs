// --- File: crates/commerce_usegateway/src/handlers.rs ---
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use commerce_common::{map_json_error, not_found, CommerceError, PaymentProcessor};
use commerce_config::AppConfig;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::service::UsegatewayPayment;

// --- State for Usegateway Handlers ---
#[derive(Clone)]
pub struct UsegatewayState {
    pub config: Arc<AppConfig>,
    pub payment: Arc<UsegatewayPayment>,
    pub processor: Arc<dyn PaymentProcessor>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaymentLinkResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://pay.usegateway.net/checkout/3f6c...")
    )]
    pub url: String,
}

fn disabled() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "Usegateway service is disabled.",
    )
        .into_response()
}

/// Creates a payment and hosted checkout link for an existing order.
#[axum::debug_handler]
pub async fn create_payment_link_handler(
    State(state): State<Arc<UsegatewayState>>,
    Path(order_id): Path<i64>,
) -> Result<Json<PaymentLinkResponse>, Response> {
    if !state.config.use_usegateway {
        return Err(disabled());
    }

    let order = state
        .processor
        .load_order(order_id)
        .await
        .map_err(IntoResponse::into_response)?
        .ok_or_else(|| not_found(format!("order {}", order_id)).into_response())?;

    map_json_error(
        state
            .payment
            .payment_link(&order)
            .await
            .map(|url| PaymentLinkResponse { url }),
        CommerceError::from,
    )
}

/// Gateway server-to-server notification.
#[axum::debug_handler]
pub async fn usegateway_webhook_handler(
    State(state): State<Arc<UsegatewayState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !state.config.use_usegateway {
        return disabled();
    }

    match state.payment.handle_webhook(&body, &headers).await {
        Ok(true) => (StatusCode::OK, "OK").into_response(),
        Ok(false) => {
            CommerceError::ConflictError("Payment was not accepted by the processor.".to_string())
                .into_response()
        }
        Err(e) => CommerceError::from(e).into_response(),
    }
}

// --- Redirect Handlers (Client-Side) ---

#[axum::debug_handler]
pub async fn payment_success_handler() -> Html<&'static str> {
    info!("Customer returned from Usegateway checkout (success).");
    Html("<h1>Payment Successful!</h1><p>Thank you for your payment. Your order is being processed.</p><a href='/'>Back to Home</a>")
}

#[axum::debug_handler]
pub async fn payment_failed_handler() -> Html<&'static str> {
    warn!("Customer returned from Usegateway checkout (cancelled or failed).");
    Html("<h1>Payment Failed</h1><p>The payment was cancelled or could not be completed. You have not been charged.</p><a href='/'>Back to Home</a>")
}
