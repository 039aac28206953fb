//! # Request Handlers
//!
//! Each handler awaits at most one collaborator call and contains its own
//! failures: every error is logged and turned into a JSON `{error}` reply.

use crate::response::{api_error_response, error_response, ErrorReply};
use crate::state::{AppState, SERVICE_NAME};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use jebs_core::{
    ApiError, ApiResult, ApplicationSubmission, CheckoutRequest, CheckoutSession, EmailMessage,
    PaymentStrategy,
};
use serde::Serialize;
use tracing::{error, info, instrument};

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Hosted checkout page (redirect the shopper here)
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitApplicationResponse {
    pub success: bool,
}

fn read_body(body: Result<Bytes, BytesRejection>) -> ApiResult<Bytes> {
    body.map_err(|rejection| ApiError::Serialization(rejection.body_text()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// Anything that is not one of the routes above
pub async fn not_found() -> ErrorReply {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Create a hosted checkout session and return its redirect URL
#[instrument(skip(state, body))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CreateCheckoutResponse>, ErrorReply> {
    // Credential check comes before the body is even read
    let Some(strategy) = state.payments.as_deref() else {
        error!("Stripe error: STRIPE_SECRET_KEY not configured");
        return Err(api_error_response(&ApiError::Configuration(
            "Stripe not configured".to_string(),
        )));
    };

    let session = checkout(strategy, body).await.map_err(|e| {
        error!("Stripe error: {}", e);
        api_error_response(&e)
    })?;

    Ok(Json(CreateCheckoutResponse {
        url: session.checkout_url,
    }))
}

async fn checkout(
    strategy: &dyn PaymentStrategy,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<CheckoutSession> {
    let body = read_body(body)?;
    let cart = CheckoutRequest::from_json(&body)?.validate()?;

    info!(
        "Creating checkout: provider={}, {} items, total={}",
        strategy.provider_name(),
        cart.item_count(),
        cart.total().display()
    );

    let session = strategy.create_checkout(&cart).await?;
    info!("Created checkout session: {}", session.session_id);
    Ok(session)
}

/// Relay an employment application by email, or log it when no email
/// credential is configured
#[instrument(skip(state, body))]
pub async fn submit_application(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubmitApplicationResponse>, ErrorReply> {
    relay_application(&state, body).await.map_err(|e| {
        error!("Application submit error: {}", e);
        api_error_response(&e)
    })?;

    Ok(Json(SubmitApplicationResponse { success: true }))
}

async fn relay_application(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<()> {
    let body = read_body(body)?;
    let submission = ApplicationSubmission::from_json(&body)?;

    match state.mailer.as_deref() {
        Some(mailer) => {
            let message = EmailMessage::application(&submission, &state.config.application_email);
            mailer.send(&message).await?;
            info!(
                "Application relayed via {}: {}",
                mailer.provider_name(),
                message.subject
            );
        }
        None => {
            info!(
                "Application received (no RESEND_API_KEY):\n{}",
                submission.transcript()
            );
        }
    }

    Ok(())
}
