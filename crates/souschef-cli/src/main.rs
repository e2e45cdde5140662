//! SousChef - browse the recipe catalog from the command line.
//!
//! This binary stands in for the phone and companion front ends: it builds
//! the `RecipeStore` (seeding the shared container on first run), prints
//! catalog snapshots, and triggers refreshes.

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use souschef_core::cache::{ContainerStorage, FileDefaults};
use souschef_core::models::encode_catalog;
use souschef_core::trigger::handle_request;
use souschef_core::utils::{age_display, format_minutes};
use souschef_core::{CatalogClient, Config, IngredientType, Recipe, RecipeStore, RefreshOutcome};

// ============================================================================
// Constants
// ============================================================================

/// Catalog copied into the shared container on first launch
const BUNDLED_RECIPES: &[u8] = include_bytes!("../resources/Recipes.json");

/// Directory for rolling log files, when file logging is wanted
const LOG_DIR_ENV: &str = "SOUSCHEF_LOG_DIR";

#[derive(Parser, Debug)]
#[clap(name = "souschef", about = "Browse the SousChef recipe catalog - works offline", version)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List recipes in the cached catalog (default)
    List,

    /// Show one recipe's ingredients and steps
    Show {
        /// Recipe name, matched exactly first and then ignoring ASCII case
        #[clap(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Fetch the latest catalog and list it
    Refresh,

    /// List all ingredients grouped by category
    Groceries,

    /// Print the cached catalog as JSON
    Export,

    /// Answer a companion refresh request
    HandleRequest {
        /// JSON object sent by the companion device
        message: String,
    },

    /// Print where configuration and cached data live
    Config {
        /// Write the current configuration to the config file
        #[clap(long)]
        write: bool,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// The returned guard must be held for file logs to be flushed.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "souschef.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let container_dir = config.container_dir()?;
    debug!(?container_dir, "Shared container configured");

    let client = CatalogClient::with_url(config.remote_url(), config.request_timeout())
        .context("Failed to create catalog client")?;

    let command = cli.command.unwrap_or(Command::List);
    if let Command::Config { write } = command {
        if write {
            config.save().context("Failed to save config")?;
        }
        println!("Config file:     {}", Config::path()?.display());
        println!("Remote catalog:  {}", client.url());
        println!("Recipe cache:    {}", ContainerStorage::new(&container_dir).path().display());
        println!("Shared defaults: {}", FileDefaults::new(&container_dir).path().display());
        return Ok(());
    }

    let store = Arc::new(RecipeStore::open(
        &container_dir,
        Arc::new(client),
        config.bundle(BUNDLED_RECIPES),
    ));
    info!("SousChef starting");

    match command {
        Command::List => print_list(&store.catalog()),
        Command::Show { name } => show_recipe(&store.catalog(), &name.join(" "))?,
        Command::Refresh => {
            let (tx, mut rx) = tokio::sync::mpsc::channel(1);
            store.refresh_in_background(tx);
            let outcome = rx
                .recv()
                .await
                .ok_or_else(|| anyhow::anyhow!("Refresh task ended without a result"))?;
            print_refresh(&store, &outcome);
        }
        Command::Groceries => print_groceries(&store.catalog()),
        Command::Export => {
            let json = encode_catalog(&store.catalog())?;
            println!("{}", String::from_utf8_lossy(&json));
        }
        Command::HandleRequest { message } => {
            let message: Map<String, Value> =
                serde_json::from_str(&message).context("Companion message must be a JSON object")?;
            if let Some(reply) = handle_request(&store, &message).await {
                println!("{}", Value::Object(reply));
            }
        }
        Command::Config { .. } => {}
    }

    info!("SousChef shutting down");
    Ok(())
}

fn print_list(catalog: &[Recipe]) {
    if catalog.is_empty() {
        println!("No recipes cached yet. Run `souschef refresh`.");
        return;
    }
    for recipe in catalog {
        println!(
            "{:<32} {:>2} ingredients  {:>2} steps  {}",
            recipe.name,
            recipe.ingredient_count(),
            recipe.steps.len(),
            format_minutes(recipe.total_timer_minutes())
        );
    }
}

fn find_recipe<'a>(catalog: &'a [Recipe], name: &str) -> Option<&'a Recipe> {
    catalog
        .iter()
        .find(|r| r.name == name)
        .or_else(|| catalog.iter().find(|r| r.name.eq_ignore_ascii_case(name)))
}

fn show_recipe(catalog: &[Recipe], name: &str) -> Result<()> {
    let recipe = find_recipe(catalog, name).ok_or_else(|| anyhow::anyhow!("No recipe named {:?}", name))?;

    println!("{}", recipe.name);
    if let Some(ref url) = recipe.original_url {
        println!("{}", url);
    }

    println!("\nIngredients");
    for ingredient in &recipe.ingredients {
        println!("  - {} ({})", ingredient.display_line(), ingredient.kind);
    }

    println!("\nSteps");
    for (i, (step, minutes)) in recipe.steps_with_timers().enumerate() {
        if minutes > 0 {
            println!("  {}. {} [{}]", i + 1, step, format_minutes(minutes));
        } else {
            println!("  {}. {}", i + 1, step);
        }
    }
    Ok(())
}

fn grocery_groups(catalog: &[Recipe]) -> BTreeMap<IngredientType, Vec<String>> {
    let mut groups: BTreeMap<IngredientType, Vec<String>> = BTreeMap::new();
    for recipe in catalog {
        for ingredient in &recipe.ingredients {
            groups
                .entry(ingredient.kind)
                .or_default()
                .push(format!("{} ({})", ingredient.display_line(), recipe.name));
        }
    }
    groups
}

fn print_groceries(catalog: &[Recipe]) {
    for (kind, items) in grocery_groups(catalog) {
        println!("{}", kind);
        for item in items {
            println!("  - {}", item);
        }
    }
}

fn print_refresh(store: &RecipeStore, outcome: &RefreshOutcome) {
    if let Some(ref e) = outcome.error {
        eprintln!("Refresh failed: {}. Showing cached recipes.", e);
    }
    if let Some(at) = store.last_refreshed() {
        println!("Updated {}", age_display(at));
    }
    print_list(&outcome.catalog);
}
