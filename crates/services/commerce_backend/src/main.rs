// File: services/commerce_backend/src/main.rs
use axum::{routing::get, Router};
use commerce_common::{log_error, log_result, logging, PaymentProcessor};
use commerce_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod app_state;

use app_state::{demo_processor, list_payment_methods, Services};

#[tokio::main]
async fn main() {
    logging::init();

    let config = match log_result(load_config(), "Configuration loaded", "Failed to load config")
    {
        Ok(config) => Arc::new(config),
        Err(_) => std::process::exit(1),
    };

    let processor: Arc<dyn PaymentProcessor> = Arc::new(demo_processor());
    let services = match Services::build(config.clone(), processor).await {
        Ok(services) => services,
        Err(e) => {
            log_error(e, "Failed to initialise payment services");
            std::process::exit(1);
        }
    };

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Commerce payment API!" }))
        .route("/payment-methods", get(list_payment_methods))
        .with_state(services.app);

    let mut app = Router::new().nest("/api", api_router);

    if let Some(usegateway_state) = services.usegateway {
        // Gateway callbacks and redirect targets live at the site root.
        app = app.merge(commerce_usegateway::routes(usegateway_state));
    }

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use commerce_usegateway::doc::UsegatewayApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Commerce Payment API",
                version = "0.1.0",
                description = "Usegateway payment method endpoints",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(schemas(app_state::PaymentMethodInfo)),
            tags((name = "Commerce", description = "Core service endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(UsegatewayApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Starting server at http://{}", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
    }
}
