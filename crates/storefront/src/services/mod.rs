//! External services used by the cart.
//!
//! # Services
//!
//! - `orders` - Order server client (`POST /place_order`)

pub mod orders;
