//! # tipo-quote
//!
//! Prices one product configuration and prints the quote as JSON.
//!
//! ## Usage
//! ```bash
//! # Quote from stdin
//! echo '{ "product": "banner", "widthCm": 300, "heightCm": 100 }' | tipo-quote
//!
//! # Quote from a file, with a custom store config
//! tipo-quote --input banner.json --config ./store.toml
//!
//! # Also run the add-to-cart checks and print the resulting cart line
//! tipo-quote --input banner.json --add-to-cart
//! ```
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  --config ──► StoreConfig::load ──► config.catalog()                   │
//! │                                          │                              │
//! │  --input / stdin ──► ProductConfig ──────┤                              │
//! │                                          ▼                              │
//! │                                   quote(&catalog) ──► stdout (JSON)     │
//! │                                          │                              │
//! │  --add-to-cart ──────────────────► add_quoted_item ──► cart line        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to change the level.

use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;
use tipo_core::{ProductConfig, Quote};
use tipo_store::cart::{add_quoted_item, Cart, CartLine, CartStore};
use tipo_store::StoreConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Parsed command-line options.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    compact: bool,
    add_to_cart: bool,
}

/// What gets printed on stdout.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    quote: Quote,
    /// Human-readable final price, e.g. `"135.00 lei"`
    display_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cart_line: Option<CartLine>,
}

fn main() -> ExitCode {
    init_tracing();

    let options = match parse_args(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let store = StoreConfig::load(options.config.clone())?;
    let catalog = store.catalog()?;
    info!(store = %store.store.name, "Catalog ready");

    let raw = match &options.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let config = ProductConfig::from_json(&raw)?;
    debug!(product = config.kind().id(), quantity = config.quantity(), "Parsed configuration");

    let quote = config.quote(&catalog);
    info!(
        product = quote.product.id(),
        final_price = %quote.breakdown.final_price,
        orderable = quote.is_orderable(),
        "Quoted"
    );

    let cart_line = if options.add_to_cart {
        let mut cart = Cart::with_max_lines(store.cart.max_lines);
        add_quoted_item(&mut cart, &config, &catalog)?;
        cart.lines().into_iter().next()
    } else {
        None
    };

    let output = Output {
        display_price: store.format_price(quote.breakdown.final_price),
        quote,
        cart_line,
    };

    let json = if options.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", json);

    Ok(())
}

/// Parses arguments. `Ok(None)` means help was requested.
fn parse_args<I>(args: I) -> Result<Option<Options>, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = args.next().ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or("--input needs a path (or - for stdin)")?;
                options.input = Some(PathBuf::from(value));
            }
            "--compact" => options.compact = true,
            "--add-to-cart" => options.add_to_cart = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(Some(options))
}

fn print_help() {
    println!("Tipo quote tool");
    println!();
    println!("Usage: tipo-quote [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>   Store config file (default: platform config dir/store.toml)");
    println!("  -i, --input <PATH>    Product configuration JSON (default: stdin)");
    println!("      --compact         Print JSON on one line");
    println!("      --add-to-cart     Run add-to-cart checks and print the cart line");
    println!("  -h, --help            Show this help message");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tipo_store=trace` - Show trace for the store crate only
/// - Default: INFO, DEBUG for tipo crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tipo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["--input", "b.json", "--compact", "-c", "s.toml"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.input, Some(PathBuf::from("b.json")));
        assert_eq!(options.config, Some(PathBuf::from("s.toml")));
        assert!(options.compact);
        assert!(!options.add_to_cart);
    }

    #[test]
    fn test_parse_args_errors_and_help() {
        assert!(parse_args(args(&["--input"])).is_err());
        assert!(parse_args(args(&["--verbose"])).is_err());
        assert!(parse_args(args(&["-h"])).unwrap().is_none());

        let options = parse_args(Vec::new()).unwrap().unwrap();
        assert!(options.input.is_none());
    }
}
