//! Order server client.
//!
//! Posts the cart to `POST {base_url}/place_order` and interprets the
//! `{success, order_id}` reply. Requests are sent once and never retried.

use std::future::Future;

use canteen_core::{Cart, ItemId, LineItem, OrderId, Price};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Path of the order endpoint, relative to the configured base URL.
const PLACE_ORDER_PATH: &str = "place_order";

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Server answered `success: false`.
    #[error("Order was declined by the server")]
    Declined,

    /// Server answered `success: true` without an order id.
    #[error("Order response did not include an order id")]
    MissingOrderId,

    /// Base URL could not be joined with the endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl OrderError {
    /// Generic message for the page. Declines and errors read differently,
    /// but neither carries details.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Declined => "Failed to place order. Please try again.",
            _ => "An error occurred. Please try again.",
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// One line of the order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    /// `price × quantity`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<&LineItem> for OrderItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: item.quantity,
            total: item.line_total(),
        }
    }
}

/// Body of `POST /place_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    /// Omitted entirely when the page has no name field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    /// CGST + SGST.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl OrderPayload {
    /// Build the request body for `cart`.
    #[must_use]
    pub fn from_cart(cart: &Cart, customer_name: Option<String>) -> Self {
        let totals = cart.totals();
        Self {
            customer_name,
            items: cart.items().iter().map(OrderItem::from).collect(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
        }
    }
}

/// Reply from `POST /place_order`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(default)]
    pub order_id: Option<OrderId>,
}

impl OrderResponse {
    /// Interpret the reply.
    ///
    /// # Errors
    ///
    /// Returns `Declined` for `success: false` and `MissingOrderId` for a
    /// success without an id.
    pub fn into_order_id(self) -> Result<OrderId, OrderError> {
        if !self.success {
            return Err(OrderError::Declined);
        }
        self.order_id.ok_or(OrderError::MissingOrderId)
    }
}

/// Path of the confirmation page for an order.
#[must_use]
pub fn bill_path(order_id: &OrderId) -> String {
    format!("/bill/{}", urlencoding::encode(order_id.as_str()))
}

// =============================================================================
// Gateway
// =============================================================================

/// Anything that can place an order.
pub trait OrderGateway {
    /// Submit `payload` once.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` for transport failures, non-success statuses,
    /// undecodable replies, and declined orders.
    fn place_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = Result<OrderId, OrderError>>;
}

/// HTTP order gateway backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpOrderGateway {
    /// Create a gateway posting to `{base_url}/place_order`.
    ///
    /// The endpoint always nests under the full base path, whether or not
    /// `base_url` ends in `/`.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: &Url) -> Result<Self, OrderError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(PLACE_ORDER_PATH)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl OrderGateway for HttpOrderGateway {
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint, items = payload.items.len()))]
    async fn place_order(&self, payload: &OrderPayload) -> Result<OrderId, OrderError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: OrderResponse = response
            .json()
            .await
            .map_err(|e| OrderError::Parse(e.to_string()))?;

        reply.into_order_id()
    }
}
