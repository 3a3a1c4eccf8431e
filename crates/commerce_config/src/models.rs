// --- File: crates/commerce_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Usegateway Config ---
// Mirrors the per-installation plugin settings. The secret key is usually
// written as "secret_from_env" and resolved from USEGATEWAY_SECRET_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UsegatewayConfig {
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub debug: bool,
    /// Custom payment method title; the lexicon caption is used when absent.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Public site root, with trailing slash. Redirect URLs are built from it.
    pub site_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_api_url() -> String {
    "https://api.usegateway.net/v1".to_string()
}

fn default_language() -> String {
    "english".to_string()
}

impl UsegatewayConfig {
    /// Settings view in the shape the plugin host hands them out.
    pub fn setting(&self, key: &str) -> Option<String> {
        match key {
            "secret_key" => self.secret_key.clone(),
            "debug" => Some(if self.debug { "1" } else { "0" }.to_string()),
            "title" => self.title.clone(),
            "api_url" => Some(self.api_url.clone()),
            "site_url" => Some(self.site_url.clone()),
            "language" => Some(self.language.clone()),
            _ => None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_usegateway: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub usegateway: Option<UsegatewayConfig>,
}
