// --- File: crates/commerce_usegateway/src/plugin.rs ---
//! Wires the payment method into the host's order lifecycle.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use commerce_common::{
    CommerceHost, Order, OrderRenderGroups, PaymentMethod, PaymentRegistry, Placeholders,
    RenderField,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::lang::{CAPTION, LINK_CAPTION};
use crate::logic::METHOD_KEY;
use crate::service::UsegatewayPayment;

/// Placeholder the order mail appends payment instructions to.
pub const EXTRA_PLACEHOLDER: &str = "extra";
/// Manager view group the payment link field is added to.
pub const PAYMENT_DELIVERY_GROUP: &str = "payment_delivery";
pub const PAYMENT_LINK_FIELD: &str = "payment_link";
pub const PAYMENT_LINK_SORT: i32 = 50;

/// Link markup appended to the order mail.
pub const ORDER_LINK_TEMPLATE: &str = r#"<a href="[+link+]">[+link+]</a>"#;
/// Link markup for the manager order view.
pub const MANAGER_LINK_TEMPLATE: &str = r#"<a href="[+link+]" target="_blank">[+link+]</a>"#;

/// Host lifecycle events this plugin reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginEvent {
    RegisterPayments,
    BeforeOrderSending,
    ManagerBeforeOrderRender,
}

impl PluginEvent {
    /// Every event the plugin subscribes to.
    pub const SUBSCRIBED: [PluginEvent; 3] = [
        PluginEvent::RegisterPayments,
        PluginEvent::BeforeOrderSending,
        PluginEvent::ManagerBeforeOrderRender,
    ];

    /// Event name as emitted by the host.
    pub fn name(self) -> &'static str {
        match self {
            PluginEvent::RegisterPayments => "OnRegisterPayments",
            PluginEvent::BeforeOrderSending => "OnBeforeOrderSending",
            PluginEvent::ManagerBeforeOrderRender => "OnManagerBeforeOrderRender",
        }
    }
}

impl fmt::Display for PluginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown plugin event: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for PluginEvent {
    type Err = UnknownEvent;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        PluginEvent::SUBSCRIBED
            .into_iter()
            .find(|event| event.name() == name)
            .ok_or_else(|| UnknownEvent(name.to_string()))
    }
}

/// Mutable host context handed over with each event.
pub enum HookContext<'a> {
    RegisterPayments {
        registry: &'a mut PaymentRegistry,
    },
    BeforeOrderSending {
        order: &'a Order,
        placeholders: &'a mut Placeholders,
    },
    ManagerBeforeOrderRender {
        order: &'a Order,
        groups: &'a mut OrderRenderGroups,
    },
}

impl HookContext<'_> {
    pub fn event(&self) -> PluginEvent {
        match self {
            HookContext::RegisterPayments { .. } => PluginEvent::RegisterPayments,
            HookContext::BeforeOrderSending { .. } => PluginEvent::BeforeOrderSending,
            HookContext::ManagerBeforeOrderRender { .. } => PluginEvent::ManagerBeforeOrderRender,
        }
    }
}

/// Substitutes `[+link+]` in a template with the HTML-escaped link.
pub fn render_link(template: &str, link: &str) -> String {
    let escaped = link
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    template.replace("[+link+]", &escaped)
}

pub struct UsegatewayPlugin {
    payment: Arc<UsegatewayPayment>,
}

impl UsegatewayPlugin {
    pub fn new(payment: Arc<UsegatewayPayment>) -> Self {
        Self { payment }
    }

    /// True when the host event `name` is one this plugin subscribes to.
    pub fn handles(name: &str) -> bool {
        name.parse::<PluginEvent>().is_ok()
    }

    /// Title shown to customers: the `title` setting, else the lexicon caption.
    pub fn title(&self) -> String {
        self.payment
            .host()
            .setting("title")
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| self.payment.lexicon().get(CAPTION).to_string())
    }

    pub async fn dispatch(&self, context: HookContext<'_>) {
        debug!("Usegateway plugin handling {}", context.event());

        match context {
            HookContext::RegisterPayments { registry } => {
                let method: Arc<dyn PaymentMethod> = self.payment.clone();
                registry.register_payment(METHOD_KEY, &self.title(), method);
            }
            HookContext::BeforeOrderSending {
                order,
                placeholders,
            } => {
                if !order.uses_payment_method(METHOD_KEY) {
                    return;
                }
                let link = self.rendered_link(order, ORDER_LINK_TEMPLATE).await;
                let extra = placeholders.get_placeholder(EXTRA_PLACEHOLDER, "");
                placeholders.set_placeholder(EXTRA_PLACEHOLDER, extra + &link);
            }
            HookContext::ManagerBeforeOrderRender { order, groups } => {
                if !order.uses_payment_method(METHOD_KEY)
                    || !groups.groups.contains_key(PAYMENT_DELIVERY_GROUP)
                {
                    return;
                }
                let content = self.rendered_link(order, MANAGER_LINK_TEMPLATE).await;
                if let Some(group) = groups.groups.get_mut(PAYMENT_DELIVERY_GROUP) {
                    group.fields.insert(
                        PAYMENT_LINK_FIELD.to_string(),
                        RenderField {
                            title: self.payment.lexicon().get(LINK_CAPTION).to_string(),
                            content,
                            sort: PAYMENT_LINK_SORT,
                        },
                    );
                }
            }
        }
    }

    /// A failed link renders as nothing; the adapter has already logged why.
    async fn rendered_link(&self, order: &Order, template: &str) -> String {
        match self.payment.payment_link(order).await {
            Ok(link) => render_link(template, &link),
            Err(err) => {
                warn!("No payment link for order {}: {}", order.id, err);
                String::new()
            }
        }
    }
}
