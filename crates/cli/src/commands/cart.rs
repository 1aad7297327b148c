//! Cart editing commands.
//!
//! # Usage
//!
//! ```bash
//! canteen-cart add --id 4 --name "Idli" --price 30
//! canteen-cart set 4 0        # removes item 4
//! canteen-cart show --html
//! canteen-cart show --html --fragment summary
//! canteen-cart count
//! ```

use std::io::{self, Write};

use canteen_core::{Cart, ItemId, LineItem, Price};
use canteen_storefront::config::StorefrontConfig;
use canteen_storefront::{Badge, CartDisplay, CartError, render};
use clap::ValueEnum;

use super::{CommandError, open_store};

/// Which piece of HTML `show --html` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Fragment {
    /// The whole cart section.
    #[default]
    Page,
    /// Rows of the `cart-items` container.
    Items,
    /// The `.cart-summary` block.
    Summary,
    /// The `cart-count` badge.
    Badge,
}

/// Add an item to the cart.
pub fn add(
    config: &StorefrontConfig,
    id: &str,
    name: &str,
    price: &str,
    quantity: u32,
    image: Option<String>,
) -> Result<(), CommandError> {
    let price: Price = price.parse().map_err(CartError::from)?;

    let mut item = LineItem::new(id, name, price).with_quantity(quantity);
    if let Some(image) = image {
        item = item.with_image(image);
    }

    let store = open_store(config, None);
    store.add(item)?;
    tracing::info!(item_id = id, "Item added");
    Ok(())
}

/// Remove an item from the cart.
pub fn remove(config: &StorefrontConfig, id: &str) -> Result<(), CommandError> {
    open_store(config, None).remove(&ItemId::new(id))?;
    Ok(())
}

/// Set an item's quantity.
pub fn set_quantity(config: &StorefrontConfig, id: &str, quantity: i64) -> Result<(), CommandError> {
    let store = open_store(config, None);
    let item_id = ItemId::new(id);
    if store.load().get(&item_id).is_none() {
        tracing::warn!(item_id = id, "Item is not in the cart");
    }
    store.set_quantity(&item_id, quantity)?;
    Ok(())
}

/// Print the cart, as a table or as one of the HTML fragments.
pub fn show(config: &StorefrontConfig, html: Option<Fragment>) -> Result<(), CommandError> {
    let store = open_store(config, None);
    let Some(fragment) = html else {
        store.render()?;
        return Ok(());
    };

    let html = render_fragment(&store.load(), fragment)?;
    if let Err(e) = writeln!(io::stdout().lock(), "{html}") {
        tracing::warn!(error = %e, "Failed to print HTML");
    }
    Ok(())
}

fn render_fragment(cart: &Cart, fragment: Fragment) -> Result<String, CartError> {
    let html = match fragment {
        Fragment::Page => render::render_page(cart, true)?,
        Fragment::Items => match render::display_for(cart)? {
            CartDisplay::Filled { items_html, .. } => items_html,
            CartDisplay::Empty => String::new(),
        },
        Fragment::Summary => render::render_summary(cart)?,
        Fragment::Badge => render::render_badge(Badge::new(cart.item_count()))?,
    };
    Ok(html)
}

/// Print the number of units in the cart.
pub fn count(config: &StorefrontConfig) {
    open_store(config, None).update_badge();
}

/// Print the totals.
pub fn totals(config: &StorefrontConfig) {
    let totals = open_store(config, None).totals();
    let mut out = io::stdout().lock();
    let printed = writeln!(out, "Subtotal:    {}", totals.subtotal_display())
        .and_then(|()| writeln!(out, "CGST (2.5%): {}", totals.cgst_display()))
        .and_then(|()| writeln!(out, "SGST (2.5%): {}", totals.sgst_display()))
        .and_then(|()| writeln!(out, "Total:       {}", totals.total_display()));
    if let Err(e) = printed {
        tracing::warn!(error = %e, "Failed to print totals");
    }
}

/// Empty the cart.
pub fn clear(config: &StorefrontConfig) -> Result<(), CommandError> {
    open_store(config, None).clear()?;
    tracing::info!("Cart cleared");
    Ok(())
}
