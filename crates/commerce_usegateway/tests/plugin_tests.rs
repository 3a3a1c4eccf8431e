mod common;

use std::sync::Arc;

use commerce_common::{InMemoryProcessor, OrderRenderGroups, PaymentRegistry, Placeholders};
use commerce_usegateway::plugin::{
    EXTRA_PLACEHOLDER, PAYMENT_DELIVERY_GROUP, PAYMENT_LINK_FIELD, PAYMENT_LINK_SORT,
};
use commerce_usegateway::{HookContext, UsegatewayPlugin, METHOD_KEY};
use common::{adapter, order, CountingProcessor, RecordingHost};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOSTED_URL: &str = "https://pay.usegateway.net/checkout/pay_1?lang=en&ref=mail";

async fn gateway() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "hosted_url": HOSTED_URL })),
        )
        .mount(&server)
        .await;
    server
}

fn plugin_with(settings: &[(&str, &str)]) -> (UsegatewayPlugin, Arc<CountingProcessor>) {
    let processor = Arc::new(CountingProcessor::new(InMemoryProcessor::with_orders([
        order(17, "usegateway"),
        order(18, "bank_transfer"),
    ])));
    let payment = adapter(Arc::new(RecordingHost::new(settings)), processor.clone());
    (UsegatewayPlugin::new(Arc::new(payment)), processor)
}

fn gateway_settings(server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("secret_key", "sk_test".to_string()),
        ("api_url", format!("{}/v1", server.uri())),
        ("site_url", "https://shop.example/".to_string()),
    ]
}

fn as_refs<'a>(settings: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    settings.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[tokio::test]
async fn registers_with_lexicon_caption_when_no_title() {
    let (plugin, _) = plugin_with(&[("secret_key", "sk_test")]);
    let mut registry = PaymentRegistry::new();

    plugin
        .dispatch(HookContext::RegisterPayments {
            registry: &mut registry,
        })
        .await;

    let registered = registry.get(METHOD_KEY).expect("registered");
    assert_eq!(registered.title, "Pay with crypto via Usegateway");
    assert!(registered.method.markup().is_none());
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn registers_with_configured_title() {
    let (plugin, _) = plugin_with(&[("title", "Crypto checkout")]);
    let mut registry = PaymentRegistry::new();

    plugin
        .dispatch(HookContext::RegisterPayments {
            registry: &mut registry,
        })
        .await;

    let registered = registry.get(METHOD_KEY).unwrap();
    assert_eq!(registered.title, "Crypto checkout");
    // No secret key: the method still registers but shows the inline error.
    assert!(registered.method.markup().unwrap().contains("class=\"error\""));
}

#[tokio::test]
async fn order_mail_gets_link_appended() {
    let server = gateway().await;
    let settings = gateway_settings(&server);
    let (plugin, processor) = plugin_with(&as_refs(&settings));
    let mut placeholders = Placeholders::new();
    placeholders.set_placeholder(EXTRA_PLACEHOLDER, "<p>Thanks!</p>");

    plugin
        .dispatch(HookContext::BeforeOrderSending {
            order: &order(17, "usegateway"),
            placeholders: &mut placeholders,
        })
        .await;

    assert_eq!(
        placeholders.get_placeholder(EXTRA_PLACEHOLDER, ""),
        "<p>Thanks!</p><a href=\"https://pay.usegateway.net/checkout/pay_1?lang=en&amp;ref=mail\">https://pay.usegateway.net/checkout/pay_1?lang=en&amp;ref=mail</a>"
    );
    assert!(processor.inner.payment(1).is_some());
}

#[tokio::test]
async fn other_payment_methods_are_left_alone() {
    let server = gateway().await;
    let settings = gateway_settings(&server);
    let (plugin, processor) = plugin_with(&as_refs(&settings));
    let mut placeholders = Placeholders::new();
    let mut groups = OrderRenderGroups::default().with_group(PAYMENT_DELIVERY_GROUP, "Payment");

    plugin
        .dispatch(HookContext::BeforeOrderSending {
            order: &order(18, "bank_transfer"),
            placeholders: &mut placeholders,
        })
        .await;
    plugin
        .dispatch(HookContext::ManagerBeforeOrderRender {
            order: &order(18, "bank_transfer"),
            groups: &mut groups,
        })
        .await;

    assert_eq!(placeholders.get_placeholder(EXTRA_PLACEHOLDER, "unset"), "unset");
    assert!(groups.sorted_fields(PAYMENT_DELIVERY_GROUP).is_empty());
    assert!(processor.inner.payment(1).is_none());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn failed_link_leaves_mail_unchanged() {
    let (plugin, _) = plugin_with(&[]);
    let mut placeholders = Placeholders::new();
    placeholders.set_placeholder(EXTRA_PLACEHOLDER, "<p>Thanks!</p>");

    plugin
        .dispatch(HookContext::BeforeOrderSending {
            order: &order(17, "usegateway"),
            placeholders: &mut placeholders,
        })
        .await;

    assert_eq!(
        placeholders.get_placeholder(EXTRA_PLACEHOLDER, ""),
        "<p>Thanks!</p>"
    );
}

#[tokio::test]
async fn manager_view_gets_payment_link_field() {
    let server = gateway().await;
    let settings = gateway_settings(&server);
    let (plugin, _) = plugin_with(&as_refs(&settings));
    let mut groups = OrderRenderGroups::default().with_group(PAYMENT_DELIVERY_GROUP, "Payment");

    plugin
        .dispatch(HookContext::ManagerBeforeOrderRender {
            order: &order(17, "usegateway"),
            groups: &mut groups,
        })
        .await;

    let fields = groups.sorted_fields(PAYMENT_DELIVERY_GROUP);
    assert_eq!(fields.len(), 1);
    let (key, field) = fields[0];
    assert_eq!(key, PAYMENT_LINK_FIELD);
    assert_eq!(field.title, "Payment link");
    assert_eq!(field.sort, PAYMENT_LINK_SORT);
    assert!(field.content.contains("target=\"_blank\""));
    assert!(field.content.contains("pay_1?lang=en&amp;ref=mail"));
}

#[tokio::test]
async fn manager_view_without_payment_group_is_untouched() {
    let server = gateway().await;
    let settings = gateway_settings(&server);
    let (plugin, processor) = plugin_with(&as_refs(&settings));
    let mut groups = OrderRenderGroups::default().with_group("customer", "Customer");

    plugin
        .dispatch(HookContext::ManagerBeforeOrderRender {
            order: &order(17, "usegateway"),
            groups: &mut groups,
        })
        .await;

    assert_eq!(groups.groups.len(), 1);
    assert!(groups.sorted_fields("customer").is_empty());
    assert!(processor.inner.payment(1).is_none());
}
