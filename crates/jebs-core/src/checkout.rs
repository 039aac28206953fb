//! # Checkout Types
//!
//! Cart and checkout session types for the hosted-checkout flow.
//!
//! The incoming body is parsed loosely first (`CheckoutRequest`) and then
//! validated into a `Cart`, so that missing fields are reported in a fixed
//! order: line items first, then redirect URLs, then per-item numbers.

use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Returns the lowercase ISO 4217 code Stripe expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Largest `unit_amount` Stripe accepts, in cents
pub const MAX_UNIT_AMOUNT: i64 = 99_999_999;

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,
    pub currency: Currency,
}

impl Price {
    /// Create a price from smallest unit (cents)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(&self) -> String {
        match self.currency {
            Currency::USD => format!("${}.{:02}", self.amount / 100, self.amount % 100),
        }
    }
}

/// Raw checkout body as posted by the storefront.
///
/// Fields are kept as untyped JSON so that a wrong type is reported as a
/// missing field rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub line_items: Option<Value>,
    #[serde(default)]
    pub success_url: Option<Value>,
    #[serde(default)]
    pub cancel_url: Option<Value>,
}

/// One entry of `lineItems` before numeric validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItemInput {
    #[serde(default)]
    id: Option<Value>,
    name: String,
    price_cents: i64,
    quantity: i64,
}

impl CheckoutRequest {
    /// Parse a request body. Valid JSON that is not an object has no fields,
    /// so it fails validation rather than parsing.
    pub fn from_json(body: &[u8]) -> ApiResult<Self> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => Ok(Self {
                line_items: map.get("lineItems").cloned(),
                success_url: map.get("successUrl").cloned(),
                cancel_url: map.get("cancelUrl").cloned(),
            }),
            _ => Ok(Self::default()),
        }
    }

    /// Validate into a `Cart`. First failure wins.
    pub fn validate(self) -> ApiResult<Cart> {
        let items = match self.line_items {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(ApiError::Validation("lineItems required".to_string())),
        };

        let (success_url, cancel_url) =
            match (non_empty_str(self.success_url), non_empty_str(self.cancel_url)) {
                (Some(success), Some(cancel)) => (success, cancel),
                _ => {
                    return Err(ApiError::Validation(
                        "successUrl and cancelUrl required".to_string(),
                    ))
                }
            };

        let line_items = items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| LineItem::from_input(index, raw))
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(Cart {
            line_items,
            currency: Currency::USD,
            success_url,
            cancel_url,
        })
    }
}

fn non_empty_str(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// A validated line item
#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    /// Storefront item id, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Product display name
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl LineItem {
    /// Create a USD line item
    pub fn new(name: impl Into<String>, price_cents: i64, quantity: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            unit_price: Price::from_cents(price_cents, Currency::USD),
            quantity,
        }
    }

    fn from_input(index: usize, raw: Value) -> ApiResult<Self> {
        let input: LineItemInput = serde_json::from_value(raw)
            .map_err(|e| ApiError::Validation(format!("lineItems[{index}] is invalid: {e}")))?;

        if input.name.is_empty() {
            return Err(ApiError::Validation(format!(
                "lineItems[{index}].name required"
            )));
        }
        if input.price_cents < 0 {
            return Err(ApiError::Validation(format!(
                "lineItems[{index}].priceCents must be a non-negative integer"
            )));
        }
        if input.price_cents > MAX_UNIT_AMOUNT {
            return Err(ApiError::Validation(format!(
                "lineItems[{index}].priceCents must be at most {MAX_UNIT_AMOUNT}"
            )));
        }
        let quantity = u32::try_from(input.quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                ApiError::Validation(format!(
                    "lineItems[{index}].quantity must be a positive integer"
                ))
            })?;

        let id = match input.id {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Ok(Self {
            id,
            name: input.name,
            unit_price: Price::from_cents(input.price_cents, Currency::USD),
            quantity,
        })
    }

    /// Calculate the total price for this line item (saturating)
    pub fn total(&self) -> Price {
        Price {
            amount: self
                .unit_price
                .amount
                .saturating_mul(i64::from(self.quantity)),
            currency: self.unit_price.currency,
        }
    }
}

/// A validated cart, ready to hand to a payment strategy
#[derive(Debug, Clone)]
pub struct Cart {
    pub line_items: Vec<LineItem>,
    pub currency: Currency,
    pub success_url: String,
    pub cancel_url: String,
}

impl Cart {
    /// Calculate cart total
    pub fn total(&self) -> Price {
        let amount = self
            .line_items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.total().amount));
        Price::from_cents(amount, self.currency)
    }

    /// Get item count
    pub fn item_count(&self) -> u32 {
        self.line_items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }
}

/// A checkout session created by a payment provider.
///
/// Only `checkout_url` is returned to the caller; the rest is kept for logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,

    /// URL to redirect customer to for payment
    pub checkout_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CheckoutSession {
    pub fn new(
        session_id: impl Into<String>,
        provider: impl Into<String>,
        checkout_url: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            provider: provider.into(),
            checkout_url: Some(checkout_url.into()),
            expires_at: None,
        }
    }
}
