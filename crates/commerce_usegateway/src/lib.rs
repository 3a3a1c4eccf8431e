// --- File: crates/commerce_usegateway/src/lib.rs ---

pub mod doc;
pub mod error;
pub mod handlers;
pub mod host;
pub mod lang;
pub mod logic;
pub mod plugin;
pub mod routes;
pub mod service;

pub use error::{UsegatewayError, WebhookRejection};
pub use handlers::UsegatewayState;
pub use host::ConfigHost;
pub use logic::METHOD_KEY;
pub use plugin::{HookContext, PluginEvent, UsegatewayPlugin};
pub use routes::routes;
pub use service::UsegatewayPayment;
