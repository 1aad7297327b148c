//! Cart rendering.
//!
//! Turns a [`Cart`] into display data ([`CartView`]) and HTML fragments. All
//! amounts are formatted here; templates only place strings.

use askama::Template;
use canteen_core::{Cart, LineItem, Totals, format_amount};

use crate::page::{Badge, CartDisplay};

/// Image shown for items that have none. The item name is appended.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/100?text=";

/// One row of the cart list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// Unit price, e.g. "₹40.00".
    pub unit_price: String,
    /// `price × quantity`, e.g. "₹80.00".
    pub line_total: String,
    pub quantity: u32,
    /// Quantity the decrement control sets; 0 removes the item.
    pub decrement_to: i64,
    /// Quantity the increment control sets.
    pub increment_to: i64,
}

/// Summary block amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub subtotal: String,
    pub cgst: String,
    pub sgst: String,
    pub total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub rows: Vec<CartRowView>,
    pub summary: SummaryView,
    pub item_count: u64,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Image URL for an item, falling back to a placeholder showing its name.
#[must_use]
pub fn image_url(item: &LineItem) -> String {
    item.image.clone().unwrap_or_else(|| {
        format!(
            "{PLACEHOLDER_IMAGE_BASE}{}",
            urlencoding::encode(&item.name)
        )
    })
}

impl From<&LineItem> for CartRowView {
    fn from(item: &LineItem) -> Self {
        let quantity = i64::from(item.quantity);
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image_url: image_url(item),
            unit_price: item.price.display(),
            line_total: item.line_total_display(),
            quantity: item.quantity,
            decrement_to: quantity - 1,
            increment_to: quantity + 1,
        }
    }
}

impl From<&Totals> for SummaryView {
    fn from(totals: &Totals) -> Self {
        Self {
            subtotal: totals.subtotal_display(),
            cgst: totals.cgst_display(),
            sgst: totals.sgst_display(),
            total: totals.total_display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            rows: cart.items().iter().map(CartRowView::from).collect(),
            summary: SummaryView::from(&cart.totals()),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart items fragment (`cart-items` container contents).
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Summary block fragment (`.cart-summary`).
#[derive(Template)]
#[template(path = "partials/cart_summary.html")]
pub struct CartSummaryTemplate<'a> {
    pub cart: &'a CartView,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Full cart section, used for the first paint of the cart page.
#[derive(Template)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate<'a> {
    pub cart: &'a CartView,
    pub count: u64,
    pub has_name_field: bool,
}

/// Build what the cart section should show for `cart`.
///
/// # Errors
///
/// Returns an error if the items template fails to render.
pub fn display_for(cart: &Cart) -> Result<CartDisplay, askama::Error> {
    if cart.is_empty() {
        return Ok(CartDisplay::Empty);
    }

    let view = CartView::from(cart);
    let items_html = CartItemsTemplate { cart: &view }.render()?;
    Ok(CartDisplay::Filled { view, items_html })
}

/// Render the badge fragment.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_badge(badge: Badge) -> Result<String, askama::Error> {
    CartCountTemplate { count: badge.count }.render()
}

/// Render the summary fragment for `cart`.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_summary(cart: &Cart) -> Result<String, askama::Error> {
    let view = CartView::from(cart);
    CartSummaryTemplate { cart: &view }.render()
}

/// Render the full cart section.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_page(cart: &Cart, has_name_field: bool) -> Result<String, askama::Error> {
    let view = CartView::from(cart);
    CartShowTemplate {
        cart: &view,
        count: view.item_count,
        has_name_field,
    }
    .render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use canteen_core::Price;
    use rust_decimal::Decimal;

    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            LineItem::new("1", "Masala Dosa", Price::new(Decimal::from(100)).unwrap())
                .with_quantity(2)
                .with_image("/static/dosa.jpg"),
        )
        .unwrap();
        cart.add(LineItem::new("2", "Filter Coffee", Price::new(Decimal::from(50)).unwrap()))
            .unwrap();
        cart
    }

    #[test]
    fn test_view_rows() {
        let view = CartView::from(&sample_cart());

        assert_eq!(view.rows.len(), 2);
        let dosa = view.rows.first().unwrap();
        assert_eq!(dosa.unit_price, "₹100.00");
        assert_eq!(dosa.line_total, "₹200.00");
        assert_eq!(dosa.decrement_to, 1);
        assert_eq!(dosa.increment_to, 3);
        assert_eq!(dosa.image_url, "/static/dosa.jpg");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_view_summary() {
        let view = CartView::from(&sample_cart());
        assert_eq!(
            view.summary,
            SummaryView {
                subtotal: "₹250.00".to_string(),
                cgst: "₹6.25".to_string(),
                sgst: "₹6.25".to_string(),
                total: "₹262.50".to_string(),
            }
        );
    }

    #[test]
    fn test_placeholder_image() {
        let item = LineItem::new("2", "Filter Coffee", Price::zero());
        assert_eq!(
            image_url(&item),
            "https://via.placeholder.com/100?text=Filter%20Coffee"
        );
    }

    #[test]
    fn test_display_for_empty_cart() {
        assert_eq!(display_for(&Cart::new()).unwrap(), CartDisplay::Empty);
    }

    #[test]
    fn test_display_for_filled_cart() {
        let CartDisplay::Filled { view, items_html } = display_for(&sample_cart()).unwrap() else {
            panic!("expected a filled display");
        };
        assert_eq!(view.rows.len(), 2);
        assert_eq!(items_html.matches("class=\"cart-item\"").count(), 2);
        assert!(items_html.contains("Masala Dosa"));
        assert!(items_html.contains("₹200.00"));
        assert!(items_html.contains("data-quantity=\"1\""));
        assert!(items_html.contains("data-quantity=\"3\""));
    }

    #[test]
    fn test_item_names_are_escaped() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("x", "<script>alert(1)</script>", Price::zero()))
            .unwrap();

        let CartDisplay::Filled { items_html, .. } = display_for(&cart).unwrap() else {
            panic!("expected a filled display");
        };
        assert!(!items_html.contains("<script>"));
        assert!(items_html.contains("alert(1)"));
    }

    #[test]
    fn test_render_badge() {
        let hidden = render_badge(Badge::new(0)).unwrap();
        assert!(hidden.contains("id=\"cart-count\""));
        assert!(hidden.contains("display: none"));

        let shown = render_badge(Badge::new(4)).unwrap();
        assert!(!shown.contains("display: none"));
        assert!(shown.contains(">4<"));
    }

    #[test]
    fn test_render_summary() {
        let html = render_summary(&sample_cart()).unwrap();
        assert!(html.contains("id=\"subtotal\">₹250.00<"));
        assert!(html.contains("id=\"cgst\">₹6.25<"));
        assert!(html.contains("id=\"sgst\">₹6.25<"));
        assert!(html.contains("id=\"total\">₹262.50<"));
    }

    #[test]
    fn test_render_page_empty_state() {
        let html = render_page(&Cart::new(), true).unwrap();
        assert!(html.contains("id=\"empty-cart\" class=\"empty-cart\">"));
        assert!(html.contains("id=\"cart-items\" class=\"cart-items\" style=\"display: none\""));
        assert!(html.contains("class=\"cart-summary\" style=\"display: none\""));
        assert!(html.contains("id=\"customer-name\""));
    }

    #[test]
    fn test_render_page_without_name_field() {
        let html = render_page(&sample_cart(), false).unwrap();
        assert!(!html.contains("id=\"customer-name\""));
        assert!(html.contains("id=\"place-order-btn\""));
        assert!(html.contains("id=\"empty-cart\" class=\"empty-cart\" style=\"display: none\""));
    }
}
