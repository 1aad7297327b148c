//! Canteen Core - Shared cart types.
//!
//! This crate provides the types used by every Canteen cart component:
//! - `storefront` - Cart store, renderer, and order checkout
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! storage access, no HTTP clients. Everything here can be tested without a
//! page or a network.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, line items, carts, totals, and submission state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
