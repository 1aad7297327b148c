//! The cart store.
//!
//! `CartStore` is the single writer of the persisted cart. Every mutation is a
//! synchronous read-modify-write through the store: load the cart, apply a
//! [`Cart`] transition, save it back, and refresh the page.

use canteen_core::{Cart, ItemId, LineItem, Totals};
use tracing::{debug, warn};

use crate::error::{Result, add_breadcrumb};
use crate::page::{Badge, CartPage};
use crate::render;
use crate::storage::CartStorage;

/// Storage key holding the JSON array of line items.
pub const CART_STORAGE_KEY: &str = "cart";

/// Storage-backed cart bound to a page.
#[derive(Debug)]
pub struct CartStore<S, P> {
    storage: S,
    page: P,
}

impl<S: CartStorage, P: CartPage> CartStore<S, P> {
    pub const fn new(storage: S, page: P) -> Self {
        Self { storage, page }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Read the persisted cart.
    ///
    /// Missing or unreadable data yields an empty cart; nothing is surfaced
    /// to the caller. Rows a valid cart cannot hold (zero quantity, repeated
    /// ids, amounts too large to total) are dropped.
    pub fn load(&self) -> Cart {
        let Some(raw) = self.storage.get_item(CART_STORAGE_KEY) else {
            return Cart::new();
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted cart");
                Cart::new()
            }
        }
    }

    /// Persist `cart` and refresh the badge.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or written.
    pub fn save(&self, cart: &Cart) -> Result<()> {
        let json = serde_json::to_string(cart)?;
        self.storage.set_item(CART_STORAGE_KEY, &json)?;
        debug!(items = cart.len(), "Cart saved");
        self.page.update_badge(Badge::new(cart.item_count()));
        Ok(())
    }

    /// Add an item, or bump its quantity by one if already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity or totals would overflow, or if the
    /// cart cannot be persisted. Nothing is saved on overflow.
    pub fn add(&self, item: LineItem) -> Result<()> {
        add_breadcrumb("cart", "Added item", Some(&[("item_id", item.id.as_str())]));
        let mut cart = self.load();
        cart.add(item)?;
        self.save(&cart)
    }

    /// Remove an item. Removing an absent item changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted or re-rendered.
    pub fn remove(&self, item_id: &ItemId) -> Result<()> {
        add_breadcrumb("cart", "Removed item", Some(&[("item_id", item_id.as_str())]));
        let mut cart = self.load();
        cart.remove(item_id);
        self.save(&cart)?;
        self.show(&cart)
    }

    /// Set an item's quantity; zero or less removes it.
    ///
    /// Does nothing, not even a re-render, if the item is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity or totals would overflow, or if the
    /// cart cannot be persisted or re-rendered. Nothing is saved on overflow.
    pub fn set_quantity(&self, item_id: &ItemId, quantity: i64) -> Result<()> {
        let mut cart = self.load();
        if cart.get(item_id).is_none() {
            return Ok(());
        }
        if quantity <= 0 {
            return self.remove(item_id);
        }

        cart.set_quantity(item_id, quantity)?;
        self.save(&cart)?;
        self.show(&cart)
    }

    /// Totals of the persisted cart.
    pub fn totals(&self) -> Totals {
        self.load().totals()
    }

    /// Drop the persisted cart and zero the badge.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage key cannot be removed.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(CART_STORAGE_KEY)?;
        self.page.update_badge(Badge::default());
        Ok(())
    }

    /// Recompute the badge from the persisted cart.
    pub fn update_badge(&self) {
        self.page
            .update_badge(Badge::new(self.load().item_count()));
    }

    /// Re-render the cart section from the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(&self) -> Result<()> {
        self.show(&self.load())
    }

    /// Page-load entry point: paint the cart section and the badge.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn refresh(&self) -> Result<()> {
        let cart = self.load();
        self.show(&cart)?;
        self.page.update_badge(Badge::new(cart.item_count()));
        Ok(())
    }

    fn show(&self, cart: &Cart) -> Result<()> {
        let display = render::display_for(cart)?;
        self.page.show_cart(&display);
        Ok(())
    }
}
