//! `ShopSphere` CLI - the storefront's command-line views.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog
//! shopsphere products import products.json
//!
//! # Create an account (also logs in)
//! shopsphere register -n shopper -e shopper@example.com -p 'Secret#123' -c 'Secret#123'
//!
//! # Shop
//! shopsphere products list --search shirt
//! shopsphere cart add 2
//! shopsphere cart show
//!
//! # Use a different storage file
//! shopsphere --storage /tmp/shop.json account
//! ```
//!
//! # Commands
//!
//! - `register`, `login`, `logout` - Account session
//! - `account` - Show the logged-in user
//! - `products list|show|import` - Browse and seed the catalog
//! - `cart show|add|increase|decrease|remove|count` - Manage the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shopsphere_core::ProductId;
use shopsphere_storefront::config::StorefrontConfig;
use shopsphere_storefront::forms::{LoginForm, RegisterForm};
use shopsphere_storefront::models::QuantityAdjustment;
use shopsphere_storefront::state::AppState;

mod commands;

use commands::{CliError, CommandResult};

#[derive(Parser)]
#[command(name = "shopsphere")]
#[command(author, version, about = "ShopSphere storefront CLI")]
struct Cli {
    /// Storage file (overrides `SHOPSPHERE_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        /// Display name (at least 5 characters)
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password again
        #[arg(short, long)]
        confirm_password: String,
    },
    /// Log in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show account details
    Account,
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Only show products whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },
    /// Replace the catalog with a JSON list of products
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Add one unit to a cart line
    Increase {
        /// Product ID
        id: ProductId,
    },
    /// Remove one unit from a cart line (never below one)
    Decrease {
        /// Product ID
        id: ProductId,
    },
    /// Remove a line from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Total number of units in the cart
    Count,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopsphere_storefront=info,shopsphere_cli=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::debug!("Command failed: {e}");
            print_error(&e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> CommandResult {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(path) = cli.storage {
        config = config.with_storage_path(path);
    }

    let state = AppState::open(config)?;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => commands::auth::register(
            &state,
            &RegisterForm {
                name,
                email,
                password,
                confirm_password,
            },
        ),
        Commands::Login { email, password } => {
            commands::auth::login(&state, &LoginForm { email, password })
        }
        Commands::Logout => commands::auth::logout(&state),
        Commands::Account => commands::account::show(&state),
        Commands::Products { action } => match action {
            ProductsAction::List { search } => commands::products::list(&state, search.as_deref()),
            ProductsAction::Show { id } => commands::products::show(&state, id),
            ProductsAction::Import { file } => commands::products::import(&state, &file),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id } => commands::cart::add(&state, id),
            CartAction::Increase { id } => {
                commands::cart::adjust(&state, id, QuantityAdjustment::Increase)
            }
            CartAction::Decrease { id } => {
                commands::cart::adjust(&state, id, QuantityAdjustment::Decrease)
            }
            CartAction::Remove { id } => commands::cart::remove(&state, id),
            CartAction::Count => commands::cart::count(&state),
        },
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}

#[allow(clippy::print_stderr)]
fn print_error(err: &CliError) {
    eprintln!("{}", err.user_message());
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_add() {
        let cli = Cli::try_parse_from(["shopsphere", "--storage", "s.json", "cart", "add", "3"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.storage, Some(PathBuf::from("s.json")));
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Add { id }
            } if id == ProductId::new(3)
        ));
    }

    #[test]
    fn test_rejects_bad_product_id() {
        assert!(Cli::try_parse_from(["shopsphere", "products", "show", "abc"]).is_err());
    }
}
