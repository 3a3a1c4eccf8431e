// --- File: crates/commerce_usegateway/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    create_payment_link_handler, payment_failed_handler, payment_success_handler,
    usegateway_webhook_handler, UsegatewayState,
};

/// Creates a router containing all routes for the Usegateway payment method.
pub fn routes(state: UsegatewayState) -> Router {
    Router::new()
        // Called by our frontend to obtain the hosted checkout link
        .route(
            "/commerce/usegateway/orders/{order_id}/payment-link",
            post(create_payment_link_handler),
        )
        // Called by the gateway for payment notifications
        .route(
            "/commerce/usegateway/payment-process",
            post(usegateway_webhook_handler),
        )
        // Customer browser redirects
        .route(
            "/commerce/usegateway/payment-success",
            get(payment_success_handler),
        )
        .route(
            "/commerce/usegateway/payment-failed",
            get(payment_failed_handler),
        )
        .with_state(Arc::new(state))
}
