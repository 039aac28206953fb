//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Carts are sent as ad-hoc `price_data`, so no products need to exist in the
//! Stripe dashboard.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::DateTime;
use jebs_core::{ApiError, ApiResult, Cart, CheckoutSession, PaymentStrategy};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session strategy
///
/// Uses Stripe's hosted checkout page; card data never touches this service.
pub struct StripeCheckoutStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutStrategy {
    /// Create a new Stripe checkout strategy
    pub fn new(config: StripeConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(config, client))
    }

    /// Create with a caller-supplied HTTP client
    pub fn with_client(config: StripeConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Flatten a cart into Stripe's bracketed form parameters
    fn form_params(cart: &Cart) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), cart.success_url.clone()),
            ("cancel_url".to_string(), cart.cancel_url.clone()),
        ];

        for (i, item) in cart.line_items.iter().enumerate() {
            params.push((
                format!("line_items[{i}][price_data][currency]"),
                item.unit_price.currency.as_str().to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                item.name.clone(),
            ));
            params.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                item.unit_price.amount.to_string(),
            ));
            params.push((
                format!("line_items[{i}][quantity]"),
                item.quantity.to_string(),
            ));
        }

        params
    }
}

#[async_trait]
impl PaymentStrategy for StripeCheckoutStrategy {
    #[instrument(skip(self, cart), fields(items = cart.line_items.len()))]
    async fn create_checkout(&self, cart: &Cart) -> ApiResult<CheckoutSession> {
        if cart.line_items.is_empty() {
            return Err(ApiError::Validation("lineItems required".to_string()));
        }

        let form_params = Self::form_params(cart);
        debug!(
            "Creating Stripe checkout session: {} line items, total={}",
            cart.line_items.len(),
            cart.total().display()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ApiError::provider(PROVIDER, error_response.error.message));
            }

            return Err(ApiError::provider(
                PROVIDER,
                format!("HTTP {status}: {body}"),
            ));
        }

        let session: StripeCheckoutSessionResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::Serialization(format!("Failed to parse Stripe response: {e}"))
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={:?}",
            session.id, session.url
        );

        Ok(CheckoutSession {
            session_id: session.id,
            provider: PROVIDER.to_string(),
            checkout_url: session.url,
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jebs_core::{Currency, LineItem};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cart() -> Cart {
        Cart {
            line_items: vec![
                LineItem::new("Large Pepperoni", 2199, 2),
                LineItem::new("Cannoli", 499, 1),
            ],
            currency: Currency::USD,
            success_url: "https://jebs.example/thanks".to_string(),
            cancel_url: "https://jebs.example/cart".to_string(),
        }
    }

    fn strategy(server: &MockServer) -> StripeCheckoutStrategy {
        let config = StripeConfig::new("sk_test_123").with_api_base_url(server.uri());
        StripeCheckoutStrategy::new(config).unwrap()
    }

    #[test]
    fn test_form_params() {
        let params = StripeCheckoutStrategy::form_params(&cart());
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("success_url"), Some("https://jebs.example/thanks"));
        assert_eq!(get("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Large Pepperoni")
        );
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("2199"));
        assert_eq!(get("line_items[0][quantity]"), Some("2"));
        assert_eq!(get("line_items[1][price_data][unit_amount]"), Some("499"));
        assert_eq!(params.len(), 3 + 2 * 4);
    }

    #[tokio::test]
    async fn test_create_checkout_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("authorization", "Bearer sk_test_123"))
            .and(header("stripe-version", "2024-06-20"))
            .and(body_string_contains("mode=payment"))
            .and(body_string_contains(
                "line_items%5B1%5D%5Bprice_data%5D%5Bunit_amount%5D=499",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_abc",
                "url": "https://checkout.stripe.com/c/pay/cs_test_abc",
                "expires_at": 1_900_000_000_i64
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = strategy(&server).create_checkout(&cart()).await.unwrap();

        assert_eq!(session.session_id, "cs_test_abc");
        assert_eq!(session.provider, "stripe");
        assert_eq!(
            session.checkout_url.as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_test_abc")
        );
        assert!(session.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_checkout_stripe_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Not a valid URL",
                    "param": "success_url"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = strategy(&server).create_checkout(&cart()).await.unwrap_err();

        assert_eq!(err.public_message(), "Not a valid URL");
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_create_checkout_non_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = strategy(&server).create_checkout(&cart()).await.unwrap_err();

        assert!(matches!(err, ApiError::Provider { .. }));
        assert_eq!(err.public_message(), "HTTP 502 Bad Gateway: upstream down");
    }

    #[tokio::test]
    async fn test_empty_cart_never_calls_stripe() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut empty = cart();
        empty.line_items.clear();
        let err = strategy(&server).create_checkout(&empty).await.unwrap_err();

        assert_eq!(err.public_message(), "lineItems required");
    }
}
