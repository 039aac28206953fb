//! # Routes
//!
//! Axum router for the website API.

use crate::handlers;
use crate::response::cors_middleware;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - GET  / and /api/health - Health check
/// - POST /api/create-checkout-session - Stripe hosted checkout
/// - POST /api/submit-application - Employment application relay
///
/// `OPTIONS` on any path is answered with 204 by the CORS middleware before
/// routing. Every other method/path pair, including a wrong method on a known
/// path, gets 404 `{"error":"Not found"}`.
pub fn create_router(state: AppState) -> Router {
    let cors = state.cors.clone();

    Router::new()
        // Health check (axum would otherwise answer HEAD with the GET handler)
        .route(
            "/",
            get(handlers::health)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/health",
            get(handlers::health)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
        // Checkout
        .route(
            "/api/create-checkout-session",
            post(handlers::create_checkout_session).fallback(handlers::not_found),
        )
        // Applications
        .route(
            "/api/submit-application",
            post(handlers::submit_application).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        // Middleware
        .layer(middleware::from_fn_with_state(cors, cors_middleware))
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
