//! Terminal rendition of the cart page.

use std::io::{self, Write};

use canteen_storefront::page::{Badge, CartDisplay, CartPage};
use url::Url;

/// Cart page printed to the terminal.
///
/// The customer name "field" is whatever was passed on the command line.
pub struct TerminalPage {
    base_url: Option<Url>,
    name_field: Option<String>,
}

impl TerminalPage {
    pub const fn new(base_url: Option<Url>, name_field: Option<String>) -> Self {
        Self {
            base_url,
            name_field,
        }
    }

    /// Absolute bill URL when the order server is known, else the bare path.
    fn bill_url(&self, path: &str) -> String {
        self.base_url
            .as_ref()
            .and_then(|base| base.join(path).ok())
            .map_or_else(|| path.to_string(), String::from)
    }
}

/// Print the cart as a table.
fn write_cart(out: &mut impl Write, display: &CartDisplay) -> io::Result<()> {
    let CartDisplay::Filled { view, .. } = display else {
        return writeln!(out, "Your cart is empty.");
    };

    for row in &view.rows {
        writeln!(
            out,
            "{:<8} {:<28} {:>10} x {:<4} {:>12}",
            row.id, row.name, row.unit_price, row.quantity, row.line_total
        )?;
    }
    writeln!(out, "{}", "-".repeat(68))?;
    writeln!(out, "{:<56}{:>12}", "Subtotal", view.summary.subtotal)?;
    writeln!(out, "{:<56}{:>12}", "CGST (2.5%)", view.summary.cgst)?;
    writeln!(out, "{:<56}{:>12}", "SGST (2.5%)", view.summary.sgst)?;
    writeln!(out, "{:<56}{:>12}", "Total", view.summary.total)
}

fn write_badge(out: &mut impl Write, badge: Badge) -> io::Result<()> {
    match badge.count {
        1 => writeln!(out, "Cart: 1 item"),
        n => writeln!(out, "Cart: {n} items"),
    }
}

impl CartPage for TerminalPage {
    fn update_badge(&self, badge: Badge) {
        if let Err(e) = write_badge(&mut io::stdout().lock(), badge) {
            tracing::warn!(error = %e, "Failed to print cart count");
        }
    }

    fn show_cart(&self, display: &CartDisplay) {
        if let Err(e) = write_cart(&mut io::stdout().lock(), display) {
            tracing::warn!(error = %e, "Failed to print cart");
        }
    }

    fn customer_name(&self) -> Option<String> {
        self.name_field.clone()
    }

    fn alert(&self, message: &str) {
        if let Err(e) = writeln!(io::stderr().lock(), "{message}") {
            tracing::warn!(error = %e, "Failed to print notice");
        }
    }

    fn navigate(&self, path: &str) {
        let target = self.bill_url(path);
        if let Err(e) = writeln!(io::stdout().lock(), "Order placed! Your bill: {target}") {
            tracing::warn!(error = %e, "Failed to print bill link");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use canteen_core::{Cart, LineItem};
    use canteen_storefront::render;

    use super::*;

    fn printed(display: &CartDisplay) -> String {
        let mut out = Vec::new();
        write_cart(&mut out, display).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_empty_cart() {
        assert_eq!(printed(&CartDisplay::Empty), "Your cart is empty.\n");
    }

    #[test]
    fn test_write_filled_cart() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("4", "Idli", "30".parse().unwrap()).with_quantity(2))
            .unwrap();

        let text = printed(&render::display_for(&cart).unwrap());

        assert!(text.contains("Idli"));
        assert!(text.contains("₹60.00"));
        assert!(text.lines().last().unwrap().ends_with("₹63.00"));
    }

    #[test]
    fn test_write_badge() {
        let mut out = Vec::new();
        write_badge(&mut out, Badge::new(1)).unwrap();
        write_badge(&mut out, Badge::new(3)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Cart: 1 item\nCart: 3 items\n");
    }

    #[test]
    fn test_bill_url() {
        let page = TerminalPage::new(Some(Url::parse("http://canteen.local/shop/").unwrap()), None);
        assert_eq!(page.bill_url("/bill/A17"), "http://canteen.local/bill/A17");

        let offline = TerminalPage::new(None, None);
        assert_eq!(offline.bill_url("/bill/A17"), "/bill/A17");
    }
}
