//! View-binding layer between the cart and the page hosting it.
//!
//! The cart store and checkout never touch page elements directly. They call
//! into a [`CartPage`], which the host implements against its own element
//! tree (browser DOM, terminal, test recorder). Elements the host page does
//! not have are simply ignored by the implementation.
//!
//! The rendered fragments bind to these element ids: `cart-count` (badge),
//! `cart-items` (row container), `empty-cart`, `customer-name`,
//! `place-order-btn`, and `subtotal` / `cgst` / `sgst` / `total` inside the
//! `.cart-summary` block.

use crate::render::CartView;

/// Cart count badge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Badge {
    pub count: u64,
}

impl Badge {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }

    /// The badge is hidden while the cart is empty.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.count > 0
    }
}

/// What the cart section of the page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartDisplay {
    /// Show the empty-state block, hide the list and the summary.
    Empty,
    /// Show the list and the summary.
    Filled {
        view: CartView,
        /// Rendered rows for the `cart-items` container.
        items_html: String,
    },
}

impl CartDisplay {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The page hosting the cart widget.
///
/// Methods take `&self`: page handles are shared, and implementations use
/// interior mutability where they need it.
pub trait CartPage {
    /// Update the `cart-count` badge. Pages without a badge ignore this.
    fn update_badge(&self, badge: Badge);

    /// Update the cart list, empty state, and summary block.
    fn show_cart(&self, display: &CartDisplay);

    /// Current value of the customer name field, untrimmed.
    ///
    /// `None` means the page has no name field at all, which makes the name
    /// optional for checkout.
    fn customer_name(&self) -> Option<String> {
        None
    }

    /// Move focus to the customer name field.
    fn focus_customer_name(&self) {}

    /// Show a blocking user-visible notice.
    fn alert(&self, message: &str);

    /// Leave the cart page for `path`.
    fn navigate(&self, path: &str);

    /// Enable or disable the place-order button.
    fn set_place_order_enabled(&self, _enabled: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_visibility() {
        assert!(!Badge::new(0).is_visible());
        assert!(Badge::new(1).is_visible());
        assert!(!Badge::default().is_visible());
    }
}
