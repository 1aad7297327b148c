//! Derived cart totals.

use rust_decimal::Decimal;

use super::price::format_amount;

/// Central GST rate (2.5%).
pub const CGST_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// State GST rate (2.5%).
pub const SGST_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// Subtotal, the two GST components, and the grand total of a cart.
///
/// Never persisted; always recomputed from the line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    /// `cgst + sgst`.
    pub tax: Decimal,
    /// `subtotal + tax`.
    pub total: Decimal,
}

impl Totals {
    /// Totals of an empty cart.
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        cgst: Decimal::ZERO,
        sgst: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Compute totals from a subtotal.
    ///
    /// Returns `None` if the grand total does not fit in a [`Decimal`].
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Option<Self> {
        let cgst = subtotal.checked_mul(CGST_RATE)?;
        let sgst = subtotal.checked_mul(SGST_RATE)?;
        let tax = cgst.checked_add(sgst)?;
        Some(Self {
            subtotal,
            cgst,
            sgst,
            tax,
            total: subtotal.checked_add(tax)?,
        })
    }

    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format_amount(self.subtotal)
    }

    #[must_use]
    pub fn cgst_display(&self) -> String {
        format_amount(self.cgst)
    }

    #[must_use]
    pub fn sgst_display(&self) -> String {
        format_amount(self.sgst)
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        format_amount(self.total)
    }
}
