//! CLI subcommands.

use canteen_storefront::config::StorefrontConfig;
use canteen_storefront::store::CartStore;
use canteen_storefront::{CartError, FileStorage};
use thiserror::Error;

use crate::terminal::TerminalPage;

pub mod cart;
pub mod checkout;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The order was not placed.
    #[error("Order was not placed")]
    OrderNotPlaced,
}

impl CommandError {
    /// Message for the terminal, free of internal details.
    ///
    /// `None` when the page already told the user what went wrong.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Cart(CartError::Config(_)) => {
                Some("The order server is not configured. Set CART_API_BASE_URL.")
            }
            Self::Cart(err) => Some(err.user_message()),
            Self::OrderNotPlaced => None,
        }
    }
}

/// Open the file-backed cart bound to the terminal.
fn open_store(
    config: &StorefrontConfig,
    name_field: Option<String>,
) -> CartStore<FileStorage, TerminalPage> {
    CartStore::new(
        FileStorage::new(&config.storage_dir),
        TerminalPage::new(config.api_base_url.clone(), name_field),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use canteen_core::CartOverflow;
    use canteen_storefront::config::ConfigError;

    use super::*;

    #[test]
    fn test_user_message() {
        let err = CommandError::from(CartError::from(CartOverflow));
        assert_eq!(err.user_message(), Some("That quantity is too large."));

        let err = CommandError::from(CartError::from(ConfigError::MissingEnvVar(
            "CART_API_BASE_URL".to_string(),
        )));
        assert!(err.user_message().unwrap().contains("CART_API_BASE_URL"));

        assert_eq!(CommandError::OrderNotPlaced.user_message(), None);
    }
}
