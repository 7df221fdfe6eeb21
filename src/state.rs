use std::sync::Arc;

use crate::auth::SessionKeys;
use crate::config::AppConfig;
use crate::database::Store;
use crate::services::PaymentProcessor;

/// Shared handles every request sees. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: SessionKeys,
    pub payments: Arc<dyn PaymentProcessor>,
    pub currency: String,
    /// Browser origins allowed by CORS. `*` allows any.
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn Store>,
        payments: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            store,
            keys: SessionKeys::from_config(&config.security),
            payments,
            currency: config.payment.currency.clone(),
            cors_origins: config.security.cors_origins.clone(),
        }
    }
}
