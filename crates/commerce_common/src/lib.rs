// --- File: crates/commerce_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod lang; // Language packs
pub mod logging; // Logging utilities
pub mod memory; // In-memory processor
pub mod models; // Host records and context objects
pub mod services; // Host capability traits

pub use error::{
    config_error, external_service_error, internal_error, not_found, validation_error,
    CommerceError, HttpStatusCode,
};

pub use http::{
    client::{create_client, default_client, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS},
    map_json_error, IntoHttpResponse,
};

pub use lang::Lexicon;

pub use logging::{init, init_with_level, log_error, log_result};

pub use memory::InMemoryProcessor;

pub use models::{Order, OrderRenderGroups, Payment, Placeholders, RenderField, RenderGroup};

pub use services::{
    BoxFuture, CommerceHost, EventLevel, PaymentMethod, PaymentProcessor, PaymentRegistry,
    RegisteredPayment,
};
