//! # Application State
//!
//! Configuration is read from the environment once at startup and shared
//! read-only with every handler through axum state. Handlers never touch
//! the environment themselves.

use crate::response::CorsPolicy;
use jebs_core::{BoxedEmailSender, BoxedPaymentStrategy};
use jebs_resend::{ResendConfig, ResendEmailSender};
use jebs_stripe::{StripeCheckoutStrategy, StripeConfig};
use std::sync::Arc;
use tracing::{info, warn};

/// Name reported by the health check
pub const SERVICE_NAME: &str = "jebs-api";

/// Where applications go when `JEB_APPLICATION_EMAIL` is unset
pub const DEFAULT_APPLICATION_EMAIL: &str = "jebs@marziale.tech";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, production)
    pub environment: String,
    /// Value of `Access-Control-Allow-Origin`
    pub cors_origin: String,
    /// Recipient of application emails
    pub application_email: String,
    /// Payments credential; checkout answers 500 without it
    pub stripe: Option<StripeConfig>,
    /// Email credential; applications are only logged without it
    pub resend: Option<ResendConfig>,
}

impl AppConfig {
    /// Load from environment variables. Empty values count as unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            host: env_var("HOST").unwrap_or(defaults.host),
            port: env_var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: env_var("ENVIRONMENT").unwrap_or(defaults.environment),
            cors_origin: env_var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            application_email: env_var("JEB_APPLICATION_EMAIL")
                .unwrap_or(defaults.application_email),
            stripe: StripeConfig::from_env().ok(),
            resend: ResendConfig::from_env().ok(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            environment: "development".to_string(),
            cors_origin: "*".to_string(),
            application_email: DEFAULT_APPLICATION_EMAIL.to_string(),
            stripe: None,
            resend: None,
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: Arc<AppConfig>,
    /// Cross-origin headers attached to every response
    pub cors: CorsPolicy,
    /// Hosted-checkout provider, if a key is configured
    pub payments: Option<BoxedPaymentStrategy>,
    /// Email provider, if a key is configured
    pub mailer: Option<BoxedEmailSender>,
}

impl AppState {
    /// State with no collaborators wired
    pub fn new(config: AppConfig) -> Self {
        Self {
            cors: CorsPolicy::new(&config.cors_origin),
            config: Arc::new(config),
            payments: None,
            mailer: None,
        }
    }

    /// Wire the real Stripe and Resend clients for whichever keys are configured
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let payments = match &config.stripe {
            Some(stripe) => {
                if !stripe.is_test_mode() {
                    info!("Stripe running with a live key");
                }
                let strategy = StripeCheckoutStrategy::new(stripe.clone())
                    .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
                Some(Arc::new(strategy) as BoxedPaymentStrategy)
            }
            None => {
                warn!("STRIPE_SECRET_KEY not set, checkout will answer 500");
                None
            }
        };

        let mailer = match &config.resend {
            Some(resend) => {
                let sender = ResendEmailSender::new(resend.clone())
                    .map_err(|e| anyhow::anyhow!("Failed to initialize Resend: {}", e))?;
                Some(Arc::new(sender) as BoxedEmailSender)
            }
            None => {
                warn!("RESEND_API_KEY not set, applications will only be logged");
                None
            }
        };

        let mut state = Self::new(config);
        state.payments = payments;
        state.mailer = mailer;
        Ok(state)
    }

    /// Builder: set the payment strategy
    pub fn with_payments(mut self, payments: BoxedPaymentStrategy) -> Self {
        self.payments = Some(payments);
        self
    }

    /// Builder: set the email sender
    pub fn with_mailer(mut self, mailer: BoxedEmailSender) -> Self {
        self.mailer = Some(mailer);
        self
    }
}
