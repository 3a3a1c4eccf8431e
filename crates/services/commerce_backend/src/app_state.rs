// --- File: crates/services/commerce_backend/src/app_state.rs ---
use std::sync::Arc;

use axum::{extract::State, Json};
use commerce_common::{CommerceHost, InMemoryProcessor, Order, PaymentProcessor, PaymentRegistry};
use commerce_config::AppConfig;
use commerce_usegateway::{
    ConfigHost, HookContext, UsegatewayError, UsegatewayPayment, UsegatewayPlugin, UsegatewayState,
};
use serde::Serialize;
use tracing::{info, warn};

/// Application state shared by the backend's own routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<PaymentRegistry>,
}

/// Everything the backend builds at startup.
pub struct Services {
    pub app: AppState,
    /// Present when the Usegateway section is configured.
    pub usegateway: Option<UsegatewayState>,
}

impl Services {
    /// Wires the processor, the payment method and the plugin hooks.
    pub async fn build(
        config: Arc<AppConfig>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Result<Self, UsegatewayError> {
        let mut registry = PaymentRegistry::new();

        let usegateway = match config.usegateway.clone() {
            Some(usegateway_config) => {
                let host: Arc<dyn CommerceHost> = Arc::new(ConfigHost::new(usegateway_config));
                let payment = Arc::new(UsegatewayPayment::new(host, processor.clone())?);

                if config.use_usegateway {
                    UsegatewayPlugin::new(payment.clone())
                        .dispatch(HookContext::RegisterPayments {
                            registry: &mut registry,
                        })
                        .await;
                }

                Some(UsegatewayState {
                    config: config.clone(),
                    payment,
                    processor,
                })
            }
            None => {
                warn!("Usegateway configuration missing; payment routes are not mounted.");
                None
            }
        };

        info!("Registered payment methods: {:?}", registry.keys().collect::<Vec<_>>());

        Ok(Self {
            app: AppState {
                config,
                registry: Arc::new(registry),
            },
            usegateway,
        })
    }
}

/// Processor with one open order, for trying the checkout flow locally.
pub fn demo_processor() -> InMemoryProcessor {
    InMemoryProcessor::with_orders([Order {
        id: 1,
        amount: 1990,
        currency: "USD".to_string(),
        payment_method: Some(commerce_usegateway::METHOD_KEY.to_string()),
    }])
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaymentMethodInfo {
    pub key: String,
    pub title: String,
    /// Inline checkout markup, e.g. a configuration error.
    pub markup: Option<String>,
}

#[axum::debug_handler]
pub async fn list_payment_methods(State(state): State<AppState>) -> Json<Vec<PaymentMethodInfo>> {
    let methods = state
        .registry
        .keys()
        .filter_map(|key| {
            state.registry.get(key).map(|registered| PaymentMethodInfo {
                key: key.to_string(),
                title: registered.title.clone(),
                markup: registered.method.markup(),
            })
        })
        .collect();
    Json(methods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commerce_config::{ServerConfig, UsegatewayConfig};

    fn config(use_usegateway: bool, secret_key: Option<&str>) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            use_usegateway,
            usegateway: Some(UsegatewayConfig {
                secret_key: secret_key.map(str::to_string),
                debug: false,
                title: None,
                api_url: "https://api.usegateway.net/v1".to_string(),
                site_url: "https://shop.example/".to_string(),
                language: "english".to_string(),
            }),
        })
    }

    #[tokio::test]
    async fn enabled_method_is_registered() {
        let services = Services::build(config(true, Some("sk_test")), Arc::new(demo_processor()))
            .await
            .unwrap();

        let Json(methods) = list_payment_methods(State(services.app)).await;
        assert_eq!(
            methods,
            vec![PaymentMethodInfo {
                key: "usegateway".to_string(),
                title: "Pay with crypto via Usegateway".to_string(),
                markup: None,
            }]
        );
        assert!(services.usegateway.is_some());
    }

    #[tokio::test]
    async fn disabled_method_is_not_registered() {
        let services = Services::build(config(false, None), Arc::new(demo_processor()))
            .await
            .unwrap();

        assert!(services.app.registry.is_empty());
        // Routes stay mounted and answer 503 themselves.
        assert!(services.usegateway.is_some());
    }

    #[tokio::test]
    async fn missing_secret_shows_inline_error() {
        let services = Services::build(config(true, None), Arc::new(demo_processor()))
            .await
            .unwrap();

        let Json(methods) = list_payment_methods(State(services.app)).await;
        assert!(methods[0].markup.as_deref().unwrap_or_default().contains("secret key"));
    }
}
