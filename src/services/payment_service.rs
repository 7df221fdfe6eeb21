use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::PaymentConfig;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid payment amount: {0}")]
    InvalidAmount(f64),

    #[error("Payment processor is not configured")]
    NotConfigured,

    #[error("Payment processor rejected the request: {0}")]
    Rejected(String),

    #[error("Payment processor unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Convert a major-unit price to minor units, dropping fractions of a cent.
/// The epsilon keeps values like 19.99 from landing on 1998.
pub fn to_minor_units(amount: f64) -> Result<i64, PaymentError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentError::InvalidAmount(amount));
    }
    Ok((amount * 100.0 + 1e-6).trunc() as i64)
}

/// Opaque client secret the browser uses to confirm the card payment
#[derive(Debug, Clone, serde::Serialize)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

/// External card processor
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<String, PaymentError>;
}

/// Stripe PaymentIntents over the REST API
pub struct StripeProcessor {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct StripeIntent {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeProcessor {
    pub fn new(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.into(),
            api_base: api_base.into(),
        }
    }

    pub fn from_config(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let key = config
            .stripe_secret_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PaymentError::NotConfigured)?;
        Ok(Self::new(key, config.stripe_api_base.trim_end_matches('/')))
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<String, PaymentError> {
        let amount = amount_minor.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            error!("Stripe rejected payment intent: {}", message);
            return Err(PaymentError::Rejected(message));
        }

        let intent = response.json::<StripeIntent>().await?;
        info!("Created payment intent for {} {}", amount_minor, currency);
        Ok(intent.client_secret)
    }
}

/// Processor that never leaves the process. Used when no Stripe key is
/// configured outside production, and in tests.
pub struct OfflineProcessor;

#[async_trait]
impl PaymentProcessor for OfflineProcessor {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<String, PaymentError> {
        Ok(format!("pi_offline_{}_{}_secret", amount_minor, currency))
    }
}

/// Create an intent for a major-unit amount
pub async fn create_intent(
    processor: &dyn PaymentProcessor,
    amount: f64,
    currency: &str,
) -> Result<PaymentIntent, PaymentError> {
    let amount_minor = to_minor_units(amount)?;
    let client_secret = processor.create_intent(amount_minor, currency).await?;
    Ok(PaymentIntent {
        client_secret,
        amount: amount_minor,
        currency: currency.to_string(),
    })
}
