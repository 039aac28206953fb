//! # jebs-api
//!
//! HTTP API for Jeb's website.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Stripe hosted checkout for the online menu
//! - Employment application relay over Resend
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/`, `/api/health` | Health check |
//! | POST | `/api/create-checkout-session` | Create checkout session |
//! | POST | `/api/submit-application` | Email an employment application |
//! | OPTIONS | any | CORS pre-flight (204) |

pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use response::CorsPolicy;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
