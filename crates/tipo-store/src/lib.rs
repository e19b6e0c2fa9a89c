//! # tipo-store: Storefront Collaborators
//!
//! Configuration, catalog files and the cart. Everything here talks to the
//! outside world on behalf of the pure pricing engine in `tipo-core`.
//!
//! ## Modules
//!
//! - [`config`] - Layered `StoreConfig` (defaults, `store.toml`, `TIPO_*` env)
//! - [`cart`] - `CartStore` trait, in-memory `Cart`, `add_quoted_item`
//! - [`error`] - `StoreError`
//!
//! ## Example Usage
//!
//! ```rust
//! use tipo_core::{Money, ProductConfig};
//! use tipo_store::cart::{add_quoted_item, Cart};
//! use tipo_store::config::StoreConfig;
//!
//! let config = StoreConfig::default();
//! let catalog = config.catalog().unwrap();
//! let mut cart = Cart::with_max_lines(config.cart.max_lines);
//!
//! let banner = ProductConfig::from_json(
//!     r#"{ "product": "banner", "widthCm": 300, "heightCm": 100 }"#,
//! ).unwrap();
//! add_quoted_item(&mut cart, &banner, &catalog).unwrap();
//!
//! assert_eq!(config.format_price(cart.subtotal()), "135.00 lei");
//! ```

pub mod cart;
pub mod config;
pub mod error;

pub use cart::{add_quoted_item, Cart, CartLine, CartStore, CartTotals, SharedCart};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
