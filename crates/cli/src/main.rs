//! Canteen Cart CLI - drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two plates of idli
//! canteen-cart add --id 4 --name "Idli" --price 30 --quantity 2
//!
//! # Change or remove items
//! canteen-cart set 4 3
//! canteen-cart remove 4
//!
//! # Inspect the cart
//! canteen-cart show
//! canteen-cart show --html
//! canteen-cart show --html --fragment summary
//! canteen-cart count
//! canteen-cart totals
//!
//! # Place the order
//! canteen-cart checkout --name "Asha"
//! ```
//!
//! # Environment Variables
//!
//! - `CART_API_BASE_URL` - Order server base URL (required by `checkout`)
//! - `CART_STORAGE_DIR` - Local cart storage directory (default: `.canteen`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use canteen_storefront::CartError;
use canteen_storefront::config::StorefrontConfig;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "canteen-cart")]
#[command(author, version, about = "Canteen cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item to the cart (adding an existing item bumps its quantity by one)
    Add {
        /// Menu item id
        #[arg(long)]
        id: String,

        /// Item name
        #[arg(short, long)]
        name: String,

        /// Unit price
        #[arg(short, long)]
        price: String,

        /// Initial quantity for a new item
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove an item from the cart
    Remove {
        /// Menu item id
        id: String,
    },
    /// Set an item's quantity (zero or less removes it)
    Set {
        /// Menu item id
        id: String,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Show the cart
    Show {
        /// Print rendered HTML instead of a table
        #[arg(long)]
        html: bool,

        /// HTML fragment to print (default: the whole cart section)
        #[arg(long, value_enum, requires = "html")]
        fragment: Option<commands::cart::Fragment>,
    },
    /// Show the number of units in the cart
    Count,
    /// Show subtotal, taxes, and total
    Totals,
    /// Empty the cart
    Clear,
    /// Place the order
    Checkout {
        /// Customer name
        #[arg(short, long)]
        name: Option<String>,

        /// Place the order without a name field
        #[arg(long, conflicts_with = "name")]
        no_name_field: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env().map_err(CartError::from) {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "canteen_storefront=info,canteen_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        if let Some(message) = e.user_message() {
            let _ = writeln!(std::io::stderr().lock(), "{message}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            quantity,
            image,
        } => commands::cart::add(config, &id, &name, &price, quantity, image)?,
        Commands::Remove { id } => commands::cart::remove(config, &id)?,
        Commands::Set { id, quantity } => commands::cart::set_quantity(config, &id, quantity)?,
        Commands::Show { html, fragment } => {
            commands::cart::show(config, html.then(|| fragment.unwrap_or_default()))?;
        }
        Commands::Count => commands::cart::count(config),
        Commands::Totals => commands::cart::totals(config),
        Commands::Clear => commands::cart::clear(config)?,
        Commands::Checkout {
            name,
            no_name_field,
        } => {
            let name_field = if no_name_field {
                None
            } else {
                Some(name.unwrap_or_default())
            };
            commands::checkout::place_order(config, name_field).await?;
        }
    }
    Ok(())
}
