//! # Store Configuration
//!
//! Storefront settings and the catalog they select.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIPO_STORE_NAME, TIPO_CURRENCY_SYMBOL                              │
//! │     TIPO_PRO_DESIGN_FEE, TIPO_DIFFERENT_GRAPHIC_FEE                    │
//! │     TIPO_CATALOG_PATH, TIPO_MAX_CART_LINES                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/storefront/store.toml (Linux)                            │
//! │     ~/Library/Application Support/ro.tipo.storefront/store.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     built-in catalog, 50 cart lines                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # store.toml
//! [store]
//! name = "Tipo Print"
//! currency_symbol = "lei"
//!
//! [pricing]
//! pro_design_fee = "50.00"          # lei, overrides the catalog fee
//! different_graphic_fee = "25.00"
//! catalog_path = "/etc/tipo/catalog.toml"   # .toml or .json
//!
//! [cart]
//! max_lines = 50
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tipo_core::{Catalog, Money};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Sections
// =============================================================================

/// Storefront identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Tipo Print".to_string()
}

fn default_currency_symbol() -> String {
    "lei".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Catalog selection and fee overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Pro design fee in lei; `None` keeps the catalog value.
    #[serde(default)]
    pub pro_design_fee: Option<Decimal>,
    /// Different front/back graphic fee in lei; `None` keeps the catalog value.
    #[serde(default)]
    pub different_graphic_fee: Option<Decimal>,
    /// Catalog file replacing the built-in price lists.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_max_lines() -> usize {
    50
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            max_lines: default_max_lines(),
        }
    }
}

// =============================================================================
// Store Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub cart: CartSettings,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (store.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(StoreError::Config("store name must not be empty".into()));
        }
        if self.store.currency_symbol.trim().is_empty() {
            return Err(StoreError::Config("currency symbol must not be empty".into()));
        }

        for (name, fee) in [
            ("pro_design_fee", self.pricing.pro_design_fee),
            ("different_graphic_fee", self.pricing.different_graphic_fee),
        ] {
            if fee.is_some_and(|f| f < Decimal::ZERO) {
                return Err(StoreError::Config(format!("{} must not be negative", name)));
            }
        }

        if self.cart.max_lines == 0 {
            return Err(StoreError::Config("max_lines must be greater than 0".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TIPO_STORE_NAME") {
            debug!(name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(symbol) = lookup("TIPO_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(fee) = lookup("TIPO_PRO_DESIGN_FEE") {
            match fee.trim().parse::<Decimal>() {
                Ok(parsed) => {
                    debug!(fee = %parsed, "Overriding pro design fee from environment");
                    self.pricing.pro_design_fee = Some(parsed);
                }
                Err(_) => warn!(fee = %fee, "Invalid TIPO_PRO_DESIGN_FEE in environment"),
            }
        }

        if let Some(fee) = lookup("TIPO_DIFFERENT_GRAPHIC_FEE") {
            match fee.trim().parse::<Decimal>() {
                Ok(parsed) => self.pricing.different_graphic_fee = Some(parsed),
                Err(_) => warn!(fee = %fee, "Invalid TIPO_DIFFERENT_GRAPHIC_FEE in environment"),
            }
        }

        if let Some(path) = lookup("TIPO_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.pricing.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(lines) = lookup("TIPO_MAX_CART_LINES") {
            match lines.trim().parse::<usize>() {
                Ok(parsed) => self.cart.max_lines = parsed,
                Err(_) => warn!(lines = %lines, "Invalid TIPO_MAX_CART_LINES in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ro", "tipo", "storefront")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Builds the catalog this store prices with.
    ///
    /// ## Steps
    /// 1. Catalog file from `catalog_path`, or the built-in lists
    /// 2. Fee overrides from this config
    /// 3. Validation of the result
    pub fn catalog(&self) -> StoreResult<Catalog> {
        let mut catalog = match &self.pricing.catalog_path {
            Some(path) => load_catalog(path)?,
            None => Catalog::standard(),
        };

        if let Some(fee) = self.pricing.pro_design_fee {
            catalog.fees.pro_design = fee_amount("pro_design_fee", fee)?;
        }
        if let Some(fee) = self.pricing.different_graphic_fee {
            catalog.fees.different_graphic = fee_amount("different_graphic_fee", fee)?;
        }

        catalog.validate()?;
        Ok(catalog)
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Formats money with the configured currency symbol: `"135.00 lei"`.
    pub fn format_price(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}.{:02} {}",
            sign,
            amount.lei().abs(),
            amount.cents_part(),
            self.store.currency_symbol
        )
    }
}

fn fee_amount(name: &str, fee: Decimal) -> StoreResult<Money> {
    Money::try_from_decimal(fee)
        .ok_or_else(|| StoreError::Config(format!("{} is too large", name)))
}

/// Reads a catalog file, chosen by extension (`.toml` or `.json`).
pub fn load_catalog(path: &Path) -> StoreResult<Catalog> {
    let contents = std::fs::read_to_string(path)?;
    let catalog: Catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&contents)?,
        Some("json") => serde_json::from_str(&contents)?,
        _ => return Err(StoreError::UnsupportedFormat(path.to_path_buf())),
    };
    info!(?path, "Loaded catalog from file");
    Ok(catalog)
}
