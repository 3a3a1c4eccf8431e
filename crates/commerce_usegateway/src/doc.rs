// File: crates/commerce_usegateway/src/doc.rs
#![allow(dead_code)] // Allow dead code for doc functions

#[cfg(feature = "openapi")]
use crate::handlers::PaymentLinkResponse;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/commerce/usegateway/orders/{order_id}/payment-link",
    params(("order_id" = i64, Path, description = "Order to pay")),
    responses(
        (status = 200, description = "Checkout link created", body = PaymentLinkResponse),
        (status = 404, description = "Unknown order"),
        (status = 500, description = "Usegateway secret key not configured"),
        (status = 502, description = "Usegateway API error")
    ),
    tag = "Usegateway"
)]
fn doc_create_payment_link_handler() {}

#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/commerce/usegateway/payment-process",
    request_body(content = String, description = "Raw webhook JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Payment processed"),
        (status = 400, description = "Missing Svix headers, unexpected event or metadata, order mismatch"),
        (status = 404, description = "Unknown payment"),
        (status = 409, description = "Processor declined the payment")
    ),
    tag = "Usegateway Webhooks"
)]
fn doc_usegateway_webhook_handler() {}

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(doc_create_payment_link_handler, doc_usegateway_webhook_handler),
    components(schemas(PaymentLinkResponse)),
    tags(
        (name = "Usegateway", description = "Usegateway hosted checkout"),
        (name = "Usegateway Webhooks", description = "Gateway notifications")
    )
)]
pub struct UsegatewayApiDoc;
