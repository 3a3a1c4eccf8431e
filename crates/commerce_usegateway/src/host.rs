// --- File: crates/commerce_usegateway/src/host.rs ---
//! [`CommerceHost`] backed by the application configuration, for running the
//! payment method outside the CMS.

use commerce_common::{CommerceHost, EventLevel, Lexicon};
use commerce_config::UsegatewayConfig;
use tracing::{error, info, warn};

use crate::lang::{builtin_lexicon, LEXICON_PACK};

pub struct ConfigHost {
    config: UsegatewayConfig,
}

impl ConfigHost {
    pub fn new(config: UsegatewayConfig) -> Self {
        Self { config }
    }
}

impl CommerceHost for ConfigHost {
    fn setting(&self, key: &str) -> Option<String> {
        self.config.setting(key)
    }

    fn log_event(&self, level: EventLevel, source: &str, message: &str) {
        match level {
            EventLevel::Info => info!(source, "{}", message),
            EventLevel::Warning => warn!(source, "{}", message),
            EventLevel::Error => error!(source, "{}", message),
        }
    }

    fn user_language(&self, pack: &str) -> Lexicon {
        if pack == LEXICON_PACK {
            builtin_lexicon(&self.config.language)
        } else {
            Lexicon::new()
        }
    }
}
