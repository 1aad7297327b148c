//! Cart and line item types with their state transitions.
//!
//! [`Cart`] is pure data: every operation here is synchronous and free of
//! I/O. Persistence and re-rendering live in the storefront crate's
//! `CartStore`, which loads a `Cart`, applies one of these transitions, and
//! saves it back.
//!
//! A cart always has totals that fit in a [`Decimal`]. Transitions that would
//! break this fail with [`CartOverflow`] and leave the cart unchanged, and
//! rows that would break it are dropped when a cart is built from raw items.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::id::ItemId;
use super::price::{Price, format_amount};
use super::totals::Totals;

const fn default_quantity() -> u32 {
    1
}

/// A quantity or amount too large for the cart to total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart amount out of range")]
pub struct CartOverflow;

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    /// Always at least 1 while the item is in a cart.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// Create a line item with quantity 1 and no image.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
            image: None,
        }
    }

    /// Set the initial quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// `price × quantity`, or `None` if that overflows.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_times(self.quantity)
    }

    /// `price × quantity`.
    ///
    /// Exact for every item held by a [`Cart`]. A free-standing item whose
    /// total overflows saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    /// Row total formatted for display.
    #[must_use]
    pub fn line_total_display(&self) -> String {
        format_amount(self.line_total())
    }
}

/// Ordered sequence of line items, unique by id.
///
/// Serializes as a plain JSON array of items. Deserializing goes through
/// [`Cart::from_items`], so stored data always comes back in a valid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
    totals: Totals,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            totals: Totals::ZERO,
        }
    }

    /// Build a cart from raw items, restoring the cart invariants.
    ///
    /// Items with quantity 0 are dropped and, if an id appears more than once,
    /// only its first occurrence is kept. An item that would push the totals
    /// out of range is dropped as well.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut seen = HashSet::new();
        let mut cart = Self::new();

        for item in items {
            if item.quantity == 0 || !seen.insert(item.id.clone()) {
                continue;
            }
            let Some(totals) = item
                .checked_line_total()
                .and_then(|line| cart.totals.subtotal.checked_add(line))
                .and_then(Totals::from_subtotal)
            else {
                continue;
            };
            cart.items.push(item);
            cart.totals = totals;
        }
        cart
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add an item.
    ///
    /// If an item with the same id is already present its quantity goes up by
    /// exactly one, regardless of the quantity on `item`. Otherwise `item` is
    /// appended with its own quantity (at least 1).
    ///
    /// # Errors
    ///
    /// Returns `CartOverflow`, leaving the cart unchanged, if the new quantity
    /// or the resulting totals are out of range.
    pub fn add(&mut self, item: LineItem) -> Result<(), CartOverflow> {
        let mut items = self.items.clone();

        if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.checked_add(1).ok_or(CartOverflow)?;
        } else {
            let quantity = item.quantity.max(1);
            items.push(LineItem { quantity, ..item });
        }
        self.replace_items(items)
    }

    /// Remove the item with `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let Some(pos) = self.items.iter().position(|item| &item.id == id) else {
            return false;
        };
        let removed = self.items.remove(pos);

        // Dropping a row only lowers the subtotal, so the new totals fit.
        let subtotal = self.totals.subtotal - removed.line_total();
        if let Some(totals) = Totals::from_subtotal(subtotal) {
            self.totals = totals;
        }
        true
    }

    /// Set the quantity of the item with `id`.
    ///
    /// A quantity of zero or less removes the item. Returns `Ok(false)` and
    /// leaves the cart untouched if the item is not present.
    ///
    /// # Errors
    ///
    /// Returns `CartOverflow`, leaving the cart unchanged, if `quantity` does
    /// not fit a `u32` or the resulting totals are out of range.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) -> Result<bool, CartOverflow> {
        if quantity <= 0 {
            return Ok(self.remove(id));
        }
        if self.get(id).is_none() {
            return Ok(false);
        }

        let quantity = u32::try_from(quantity).map_err(|_| CartOverflow)?;
        let mut items = self.items.clone();
        for item in items.iter_mut().filter(|i| &i.id == id) {
            item.quantity = quantity;
        }
        self.replace_items(items)?;
        Ok(true)
    }

    /// Total number of units across all items (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ price × quantity.
    #[must_use]
    pub const fn subtotal(&self) -> Decimal {
        self.totals.subtotal
    }

    /// Subtotal, taxes, and grand total.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        self.totals
    }

    /// Swap in `items` if their totals are in range.
    fn replace_items(&mut self, items: Vec<LineItem>) -> Result<(), CartOverflow> {
        let subtotal = items.iter().try_fold(Decimal::ZERO, |sum, item| {
            item.checked_line_total()
                .and_then(|line| sum.checked_add(line))
        });
        let totals = subtotal
            .and_then(Totals::from_subtotal)
            .ok_or(CartOverflow)?;

        self.items = items;
        self.totals = totals;
        Ok(())
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LineItem>::deserialize(deserializer).map(Self::from_items)
    }
}
