//! # Collaborator Traits
//!
//! The two external services the API talks to, behind traits so the router
//! can be driven with in-memory fakes in tests.
//!
//! ```text
//! ┌──────────────────────────┐     ┌──────────────────────────┐
//! │ PaymentStrategy (trait)  │     │   EmailSender (trait)    │
//! │  └── create_checkout()   │     │    └── send()            │
//! └────────────▲─────────────┘     └────────────▲─────────────┘
//!              │                                │
//!   ┌──────────┴──────────┐          ┌──────────┴──────────┐
//!   │StripeCheckoutStrategy│          │ ResendEmailSender   │
//!   └─────────────────────┘          └─────────────────────┘
//! ```

use crate::application::EmailMessage;
use crate::checkout::{Cart, CheckoutSession};
use crate::error::ApiResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Hosted-checkout provider.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Create a single-use, payment-mode checkout session for `cart`.
    ///
    /// Called at most once per request. Not retried: session creation is not
    /// idempotent without an idempotency key.
    async fn create_checkout(&self, cart: &Cart) -> ApiResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Transactional email provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one message. A non-success answer from the provider is an error
    /// carrying the provider's response text.
    async fn send(&self, message: &EmailMessage) -> ApiResult<()>;

    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

/// Type alias for a shared email sender
pub type BoxedEmailSender = Arc<dyn EmailSender>;
