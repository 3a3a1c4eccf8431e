// --- File: crates/commerce_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
use tracing::warn;

pub mod models;
pub use models::*;

/// Marker value replaced by an environment variable named after the key path.
pub const SECRET_FROM_ENV: &str = "secret_from_env";

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. `config/default.{toml,yaml,json}` under `CONFIG_DIR` (defaults to `./config`)
/// 2. `config/{RUN_ENV}` (RUN_ENV defaults to `debug`)
/// 3. Environment variables with prefix `PREFIX` (defaults to `COMMERCE`), separator `__`
///
/// String values equal to `"secret_from_env"` are replaced by the environment
/// variable named after their key path, e.g. `usegateway.secret_key` reads
/// `USEGATEWAY_SECRET_KEY`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "COMMERCE".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_FROM_ENV => {
                let env_key = path.join("_").to_uppercase();
                match env::var(&env_key) {
                    Ok(env_val) => *obj = Value::String(env_val),
                    Err(_) => {
                        warn!("env var {} not found for secret_from_env", env_key);
                        // An unresolved marker must not leak out as a real secret.
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file once per process.
///
/// `DOTENV_OVERRIDE` wins, then a first CLI argument starting with `.env`,
/// then plain `.env`. Returns the path that was tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
