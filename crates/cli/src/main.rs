//! Apteka CLI - browse the catalog, manage the cart, check out, ask.
//!
//! # Usage
//!
//! ```bash
//! # Browse page 1 of the catalog, sorted by price
//! apteka list --sort price --order asc
//!
//! # Filter and search
//! apteka list --category "Vitamins & Supplements" --search vitamin
//!
//! # Cart operations (persisted under APTEKA_DATA_DIR between runs)
//! apteka cart add 1
//! apteka cart qty 1 4
//! apteka cart show
//!
//! # Hand the order off to WhatsApp
//! apteka checkout --name "Ana" --address "Somewhere 5" --selected-only
//!
//! # Ask the assistant
//! apteka ask "do you have aspirin in stock?"
//! ```
//!
//! The CLI owns all presentation concerns: currency formatting, notices for
//! stock-limit outcomes, and the visible error state when the catalog cannot
//! be loaded from any source.

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary's job is writing to stdout/stderr.
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apteka_storefront::config::StorefrontConfig;
use apteka_storefront::{App, AppError};

mod commands;

#[derive(Parser)]
#[command(name = "apteka")]
#[command(author, version, about = "Apteka pharmacy storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the catalog view
    List {
        /// Keep only this category ("all" keeps everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text search
        #[arg(short, long)]
        search: Option<String>,

        /// Sort key: name or price
        #[arg(long)]
        sort: Option<String>,

        /// Sort order: asc or desc
        #[arg(long, default_value = "asc")]
        order: String,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// List the distinct product categories
    Categories,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Hand the order off to WhatsApp
    Checkout {
        /// Customer name (required, non-empty)
        #[arg(short, long)]
        name: String,

        /// Delivery address (required, non-empty)
        #[arg(short, long)]
        address: String,

        /// Order only the selected cart lines
        #[arg(long)]
        selected_only: bool,
    },
    /// Ask the assistant a question
    Ask {
        /// The question text
        question: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product by id
    Add { id: u32 },
    /// Remove a line by product id
    Remove { id: u32 },
    /// Set a line's quantity
    Qty { id: u32, qty: u32 },
    /// Toggle a line's selection flag
    Toggle { id: u32 },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e {
            AppError::Load(_) => {
                eprintln!("Unable to load product data from any source.");
                eprintln!(
                    "Check APTEKA_CATALOG_SOURCE and your connection, then try again."
                );
            }
            other => eprintln!("Error: {other}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    let mut app = App::init(config).await?;

    if app.catalog().used_fallback() {
        eprintln!("Note: primary catalog source unavailable, showing bundled data.");
    }

    match cli.command {
        Commands::List {
            category,
            search,
            sort,
            order,
            page,
        } => commands::browse::list(&mut app, category, search, sort, &order, page),
        Commands::Categories => commands::browse::categories(&app),
        Commands::Cart { action } => commands::cart::run(&mut app, &action),
        Commands::Checkout {
            name,
            address,
            selected_only,
        } => commands::checkout::run(&mut app, &name, &address, selected_only)?,
        Commands::Ask { question } => {
            let question = question.join(" ");
            commands::ask::run(&app, &question).await;
        }
    }

    Ok(())
}
