//! Order placement command.
//!
//! # Usage
//!
//! ```bash
//! # With a name (the default page has a name field)
//! canteen-cart checkout --name "Asha"
//!
//! # As a page without a name field
//! canteen-cart checkout --no-name-field
//! ```

use canteen_storefront::config::StorefrontConfig;
use canteen_storefront::{CartError, Checkout, HttpOrderGateway, OrderOutcome};

use super::{CommandError, open_store};

/// Place the order for the current cart.
///
/// `name_field` is `None` when ordering without a name field, otherwise the
/// raw name as typed. Requires `CART_API_BASE_URL`.
pub async fn place_order(
    config: &StorefrontConfig,
    name_field: Option<String>,
) -> Result<(), CommandError> {
    let base_url = config.require_api_base_url().map_err(CartError::from)?;
    let gateway = HttpOrderGateway::new(base_url).map_err(CartError::from)?;
    let checkout = Checkout::new(gateway);
    let store = open_store(config, name_field);

    tracing::info!(endpoint = %checkout.gateway().endpoint(), "Placing order");
    match checkout.place_order(&store).await {
        OrderOutcome::Placed(order_id) => {
            tracing::info!(%order_id, "Order confirmed");
            Ok(())
        }
        outcome => {
            tracing::debug!(?outcome, "Order not placed");
            Err(CommandError::OrderNotPlaced)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use canteen_storefront::config::ConfigError;

    use super::*;

    #[tokio::test]
    async fn test_checkout_without_order_server_is_a_config_error() {
        let config = StorefrontConfig {
            api_base_url: None,
            storage_dir: PathBuf::from("canteen-cli-test-unused"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        };

        let err = place_order(&config, Some("Asha".to_string())).await.unwrap_err();

        assert!(matches!(
            err,
            CommandError::Cart(CartError::Config(ConfigError::MissingEnvVar(ref var)))
                if var == "CART_API_BASE_URL"
        ));
    }
}
