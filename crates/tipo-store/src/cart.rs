//! # Cart
//!
//! The cart is a collaborator of the pricing engine: it stores what a quote
//! produced and never prices anything itself.
//!
//! ## Add-to-Cart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        add_quoted_item                                  │
//! │                                                                         │
//! │  ProductConfig ──► validate_for_order() ──► Err(Validation)            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  quote(&catalog) ──► final_price == 0 ──► Err(NotOrderable)            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  CartLine { unit_price = final_price / quantity, metadata = summary }  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  CartStore::add_line                                                    │
//! │     same (product, dimensions, metadata) ──► quantities merged         │
//! │     otherwise                             ──► new line (max_lines)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! A line keeps the unit price it was added with. Merging adds quantity to
//! the existing line and keeps its unit price.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tipo_core::validation::validate_quantity;
use tipo_core::{Catalog, Money, ProductConfig, Quote};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Default line limit when no configuration is supplied.
pub const DEFAULT_MAX_LINES: usize = 50;

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line id (UUID v4)
    pub id: String,

    /// Product identifier, e.g. `"banner"`
    pub product_id: String,

    pub title: String,

    /// Frozen at the time of adding: `final_price / quantity` of the quote
    pub unit_price: Money,

    pub quantity: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_cm: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<Decimal>,

    /// Human-readable option labels from the quote summary
    pub metadata: Vec<String>,

    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Builds a line from a configuration and the quote it produced.
    pub fn from_quote(config: &ProductConfig, quote: &Quote) -> Self {
        let (width_cm, height_cm) = config.dimensions().unwrap_or((None, None));
        CartLine {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: quote.product.id().to_string(),
            title: quote.product.title().to_string(),
            unit_price: quote.breakdown.unit_price(),
            quantity: quote.breakdown.quantity,
            width_cm: width_cm.map(|w| w.normalize()),
            height_cm: height_cm.map(|h| h.normalize()),
            metadata: quote.summary.clone(),
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Identity used for merging: product, dimensions and option labels.
    pub fn fingerprint(&self) -> String {
        let dim = |d: Option<Decimal>| d.map(|d| d.normalize().to_string()).unwrap_or_default();
        format!(
            "{}|{}x{}|{}",
            self.product_id,
            dim(self.width_cm),
            dim(self.height_cm),
            self.metadata.join(";")
        )
    }
}

// =============================================================================
// Store Interface
// =============================================================================

/// Cart storage injected into the storefront.
///
/// Implementations decide where lines live; the pricing engine never sees
/// this trait.
pub trait CartStore {
    /// Adds a line, merging it into an identical one. Returns the id of the
    /// line that holds the item.
    fn add_line(&mut self, line: CartLine) -> StoreResult<String>;

    /// Sets a line's quantity; 0 removes the line.
    fn update_quantity(&mut self, line_id: &str, quantity: u32) -> StoreResult<()>;

    fn remove_line(&mut self, line_id: &str) -> StoreResult<()>;

    fn clear(&mut self);

    fn lines(&self) -> Vec<CartLine>;
}

// =============================================================================
// In-Memory Cart
// =============================================================================

/// In-memory cart.
///
/// ## Invariants
/// - Lines are unique by fingerprint
/// - Every line has quantity in `1..=MAX_ORDER_QUANTITY`
/// - At most `max_lines` lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub max_lines: usize,
    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Self::with_max_lines(DEFAULT_MAX_LINES)
    }

    pub fn with_max_lines(max_lines: usize) -> Self {
        Cart {
            lines: Vec::new(),
            max_lines,
            created_at: Utc::now(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn find_mut(&mut self, line_id: &str) -> StoreResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| StoreError::LineNotFound(line_id.to_string()))
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore for Cart {
    fn add_line(&mut self, line: CartLine) -> StoreResult<String> {
        validate_quantity(line.quantity)?;

        let fingerprint = line.fingerprint();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.fingerprint() == fingerprint) {
            let merged = existing.quantity.saturating_add(line.quantity);
            validate_quantity(merged)?;
            existing.quantity = merged;
            debug!(line_id = %existing.id, quantity = merged, "Merged cart line");
            return Ok(existing.id.clone());
        }

        if self.lines.len() >= self.max_lines {
            return Err(StoreError::CartFull(self.max_lines));
        }

        let id = line.id.clone();
        debug!(
            line_id = %id,
            product_id = %line.product_id,
            unit_price = %line.unit_price,
            quantity = line.quantity,
            "Added cart line"
        );
        self.lines.push(line);
        Ok(id)
    }

    fn update_quantity(&mut self, line_id: &str, quantity: u32) -> StoreResult<()> {
        if quantity == 0 {
            return self.remove_line(line_id);
        }
        validate_quantity(quantity)?;

        let line = self.find_mut(line_id)?;
        line.quantity = quantity;
        debug!(line_id, quantity, "Updated cart line quantity");
        Ok(())
    }

    fn remove_line(&mut self, line_id: &str) -> StoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != line_id);

        if self.lines.len() == initial_len {
            return Err(StoreError::LineNotFound(line_id.to_string()));
        }
        debug!(line_id, "Removed cart line");
        Ok(())
    }

    fn clear(&mut self) {
        debug!(lines = self.lines.len(), "Cleared cart");
        self.lines.clear();
        self.created_at = Utc::now();
    }

    fn lines(&self) -> Vec<CartLine> {
        self.lines.clone()
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Add to Cart
// =============================================================================

/// Prices a configuration and adds it to a cart store.
///
/// ## Errors
/// - `Validation` when quantity or dimensions are outside production limits
/// - `NotOrderable` when the quote carries the zero sentinel price
/// - whatever the store returns (`CartFull`, ...)
pub fn add_quoted_item<S>(store: &mut S, config: &ProductConfig, catalog: &Catalog) -> StoreResult<String>
where
    S: CartStore + ?Sized,
{
    config.validate_for_order()?;

    let quote = config.quote(catalog);
    if !quote.is_orderable() {
        debug!(product = quote.product.id(), "Rejected sentinel quote");
        return Err(StoreError::NotOrderable(quote.product.title().to_string()));
    }

    store.add_line(CartLine::from_quote(config, &quote))
}

// =============================================================================
// Shared Cart
// =============================================================================

/// Cart shared between concurrent UI handlers.
///
/// ## Thread Safety
/// `Arc<Mutex<Cart>>`: every operation is short and most of them write, so
/// a plain mutex is enough. A poisoned lock still yields the cart; a panic
/// in one handler does not lose the customer's lines.
#[derive(Debug, Clone)]
pub struct SharedCart {
    cart: Arc<Mutex<Cart>>,
}

impl SharedCart {
    pub fn new(max_lines: usize) -> Self {
        SharedCart {
            cart: Arc::new(Mutex::new(Cart::with_max_lines(max_lines))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use tipo_store::cart::{CartTotals, SharedCart};
    ///
    /// let shared = SharedCart::new(10);
    /// let totals = shared.with_cart(|c| CartTotals::from(c));
    /// assert_eq!(totals.line_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for SharedCart {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tipo_core::products::banner::{BannerConfig, BannerFinish};
    use tipo_core::products::CanvasConfig;
    use tipo_core::ValidationError;

    fn banner(width: Decimal, quantity: u32) -> ProductConfig {
        ProductConfig::Banner(BannerConfig {
            width_cm: Some(width),
            height_cm: Some(dec!(100)),
            quantity,
            ..Default::default()
        })
    }

    #[test]
    fn test_add_quoted_item() {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();

        add_quoted_item(&mut cart, &banner(dec!(300), 20), &catalog).unwrap();

        let line = &cart.lines[0];
        assert_eq!(line.product_id, "banner");
        assert_eq!(line.title, "Banner");
        assert_eq!(line.quantity, 20);
        assert_eq!(line.unit_price, Money::from_cents(9000));
        assert_eq!(line.width_cm, Some(dec!(300)));
        assert_eq!(line.metadata.first().map(String::as_str), Some("300 x 100 cm"));
        assert_eq!(cart.subtotal(), Money::from_cents(180000));
    }

    #[test]
    fn test_identical_lines_merge_with_frozen_price() {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();

        let first = add_quoted_item(&mut cart, &banner(dec!(300), 1), &catalog).unwrap();
        let second = add_quoted_item(&mut cart, &banner(dec!(300), 1), &catalog).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].unit_price, Money::from_cents(13500));
    }

    #[test]
    fn test_different_dimensions_or_options_do_not_merge() {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();

        add_quoted_item(&mut cart, &banner(dec!(300), 1), &catalog).unwrap();
        add_quoted_item(&mut cart, &banner(dec!(200), 1), &catalog).unwrap();
        let pockets = ProductConfig::Banner(BannerConfig {
            width_cm: Some(dec!(300)),
            height_cm: Some(dec!(100)),
            finish: BannerFinish::PolePockets,
            ..Default::default()
        });
        add_quoted_item(&mut cart, &pockets, &catalog).unwrap();

        assert_eq!(cart.line_count(), 3);
    }

    #[test]
    fn test_sentinel_quote_is_not_orderable() {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();
        let incomplete = ProductConfig::from_json(r#"{ "product": "sticker", "widthCm": 10 }"#).unwrap();

        let err = add_quoted_item(&mut cart, &incomplete, &catalog).unwrap_err();
        // missing height is caught by order validation first
        assert!(matches!(err, StoreError::Validation(ValidationError::Required { .. })));

        let unsold = ProductConfig::from_json(
            r#"{ "product": "rollup", "model": "premium", "size": "150" }"#,
        )
        .unwrap();
        let err = add_quoted_item(&mut cart, &unsold, &catalog).unwrap_err();
        assert!(matches!(err, StoreError::NotOrderable(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_oversized_item_rejected() {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();
        let oversized = ProductConfig::from_json(
            r#"{ "product": "rigid_panel", "widthCm": 400, "heightCm": 250 }"#,
        )
        .unwrap();

        assert!(oversized.quote(&catalog).is_orderable());
        let err = add_quoted_item(&mut cart, &oversized, &catalog).unwrap_err();
        assert!(err.is_user_facing());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_full() {
        let catalog = Catalog::standard();
        let mut cart = Cart::with_max_lines(2);

        add_quoted_item(&mut cart, &banner(dec!(100), 1), &catalog).unwrap();
        add_quoted_item(&mut cart, &banner(dec!(200), 1), &catalog).unwrap();
        let err = add_quoted_item(&mut cart, &banner(dec!(300), 1), &catalog).unwrap_err();
        assert!(matches!(err, StoreError::CartFull(2)));

        // merging into an existing line still works
        add_quoted_item(&mut cart, &banner(dec!(100), 1), &catalog).unwrap();
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_update_and_remove() {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();
        let canvas = ProductConfig::Canvas(CanvasConfig::default());
        let id = add_quoted_item(&mut cart, &canvas, &catalog).unwrap();

        cart.update_quantity(&id, 3).unwrap();
        assert_eq!(cart.lines[0].quantity, 3);

        assert!(matches!(
            cart.update_quantity(&id, 100_001),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            cart.update_quantity("missing", 2),
            Err(StoreError::LineNotFound(_))
        ));

        cart.update_quantity(&id, 0).unwrap();
        assert!(cart.is_empty());
        assert!(cart.remove_line(&id).is_err());
    }

    #[test]
    fn test_shared_cart_through_trait() {
        let catalog = Catalog::standard();
        let shared = SharedCart::new(10);
        let handle = shared.clone();

        handle
            .with_cart_mut(|cart| add_quoted_item(cart, &banner(dec!(300), 1), &catalog))
            .unwrap();

        let totals = shared.with_cart(|c| CartTotals::from(c));
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.subtotal, Money::from_cents(13500));

        shared.with_cart_mut(|cart| cart.clear());
        assert!(shared.with_cart(|cart| cart.lines().is_empty()));
    }

    #[test]
    fn test_line_json_shape() {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();
        add_quoted_item(&mut cart, &banner(dec!(300), 1), &catalog).unwrap();

        let json = serde_json::to_value(&cart.lines[0]).unwrap();
        assert_eq!(json["productId"], "banner");
        assert_eq!(json["unitPrice"], 13500);
        assert!(json["metadata"].is_array());
    }
}
