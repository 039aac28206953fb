//! # jebs-core
//!
//! Core types and traits for the jebs-api website backend.
//!
//! This crate provides:
//! - `CheckoutRequest` → `Cart` validation for hosted checkout
//! - `ApplicationSubmission` and its plain-text transcript
//! - `PaymentStrategy` and `EmailSender` traits for the external providers
//! - `ApiError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use jebs_core::{CheckoutRequest, PaymentStrategy};
//!
//! let cart = CheckoutRequest::from_json(&body)?.validate()?;
//! let session = strategy.create_checkout(&cart).await?;
//!
//! // Redirect the shopper to session.checkout_url
//! ```

pub mod application;
pub mod checkout;
pub mod error;
pub mod strategy;

// Re-exports for convenience
pub use application::{
    ApplicationSubmission, EmailMessage, FieldValue, APPLICATION_BANNER, APPLICATION_SENDER,
};
pub use checkout::{Cart, CheckoutRequest, CheckoutSession, Currency, LineItem, Price};
pub use error::{ApiError, ApiResult};
pub use strategy::{BoxedEmailSender, BoxedPaymentStrategy, EmailSender, PaymentStrategy};
