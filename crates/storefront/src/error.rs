//! Unified error handling with Sentry integration.
//!
//! Provides a unified `CartError` type for every fallible cart operation.
//! Error details are for logs and Sentry only; pages show
//! [`CartError::user_message`].

use canteen_core::{CartOverflow, PriceError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::services::orders::OrderError;
use crate::storage::StorageError;

/// Application-level error type for the cart widget.
#[derive(Debug, Error)]
pub enum CartError {
    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Placing the order failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// An item price was rejected.
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    /// A quantity or amount is too large for the cart.
    #[error("Cart error: {0}")]
    Overflow(#[from] CartOverflow),

    /// Cart contents could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CartError {
    /// Message safe to show on the page.
    ///
    /// Internal details are never exposed.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Order(err) => err.user_message(),
            Self::Price(_) => "That item has an invalid price.",
            Self::Overflow(_) => "That quantity is too large.",
            Self::Storage(_) | Self::Render(_) | Self::Config(_) | Self::Serialization(_) => {
                "An error occurred. Please try again."
            }
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of cart
/// actions leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("item_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
