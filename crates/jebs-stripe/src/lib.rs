//! # jebs-stripe
//!
//! Stripe payment strategy for jebs-api.
//!
//! **StripeCheckoutStrategy** creates hosted Checkout Sessions from a
//! validated cart: dynamic `price_data` line items in USD, payment mode,
//! caller-supplied redirect URLs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jebs_stripe::{StripeCheckoutStrategy, StripeConfig};
//! use jebs_core::PaymentStrategy;
//!
//! let strategy = StripeCheckoutStrategy::new(StripeConfig::from_env()?)?;
//! let session = strategy.create_checkout(&cart).await?;
//!
//! // Redirect the shopper to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
