//! Canteen Storefront - client-side cart widget.
//!
//! Keeps the shopper's cart in client-local storage, renders the cart page,
//! and submits orders to the canteen order server.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the persisted cart; every mutation goes through it
//! - [`render`] turns a cart into display data and Askama HTML fragments
//! - [`page::CartPage`] is the seam to whatever hosts the widget
//! - [`checkout::Checkout`] submits orders through a [`services::orders::OrderGateway`]
//! - [`storage`] provides the local-storage backends
//!
//! # Example
//!
//! ```rust,ignore
//! let store = CartStore::new(FileStorage::new(&config.storage_dir), page);
//! store.add(LineItem::new("12", "Masala Dosa", price))?;
//!
//! let checkout = Checkout::new(HttpOrderGateway::new(&config.api_base_url)?);
//! match checkout.place_order(&store).await {
//!     OrderOutcome::Placed(order_id) => { /* page navigated to /bill/{order_id} */ }
//!     _ => { /* page already showed a notice */ }
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod page;
pub mod render;
pub mod services;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test_support;

pub use checkout::{Checkout, OrderOutcome, Rejection};
pub use error::{CartError, Result};
pub use page::{Badge, CartDisplay, CartPage};
pub use services::orders::{HttpOrderGateway, OrderError, OrderGateway, OrderPayload};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
