//! # jebs-resend
//!
//! Email delivery through the Resend HTTP API.
//!
//! ```rust,ignore
//! use jebs_resend::{ResendConfig, ResendEmailSender};
//! use jebs_core::{EmailMessage, EmailSender};
//!
//! let sender = ResendEmailSender::new(ResendConfig::from_env()?)?;
//! sender.send(&EmailMessage::application(&submission, "jobs@example.com")).await?;
//! ```

pub mod config;
pub mod email;

pub use config::ResendConfig;
pub use email::ResendEmailSender;
