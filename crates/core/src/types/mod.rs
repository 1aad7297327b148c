//! Core types for the Canteen cart.
//!
//! This module provides type-safe wrappers for the cart domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod status;
pub mod totals;

pub use cart::{Cart, CartOverflow, LineItem};
pub use id::{ItemId, OrderId};
pub use price::{CURRENCY_SYMBOL, Price, PriceError, format_amount};
pub use status::SubmissionState;
pub use totals::{CGST_RATE, SGST_RATE, Totals};
