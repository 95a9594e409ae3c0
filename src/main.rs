//! Bundle engine demo CLI
//!
//! Exercises the library against a JSON catalog from the command line:
//! render a bundle view for a product, replay an add-all submission
//! against an in-memory cart, or validate a catalog file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fbt::{
    handle_add_all, present, CompanionList, InMemoryCart, InMemoryCatalog, ProductId,
    WidgetSettings,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "fbt")]
#[command(about = "Frequently-bought-together bundle engine demo")]
#[command(version)]
struct Cli {
    /// Log filter, e.g. "debug" or "fbt=trace"
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the bundle view for a main product as JSON
    Render {
        /// Path to a JSON catalog (product array)
        #[arg(short, long)]
        catalog: PathBuf,
        /// Main product id
        #[arg(short, long)]
        product: u64,
        /// Comma-separated companion ids (the persisted metadata field)
        #[arg(long, default_value = "")]
        companions: String,
        /// Optional widget settings JSON file
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
    /// Replay an add-all payload against an empty in-memory cart
    AddAll {
        /// Path to a JSON catalog (product array)
        #[arg(short, long)]
        catalog: PathBuf,
        /// The endpoint payload, e.g. '{"product_data": "[...]"}'
        #[arg(short, long)]
        payload: String,
    },
    /// Validate a catalog file
    Validate {
        /// Path to a JSON catalog (product array)
        catalog: PathBuf,
    },
}

fn init_tracing(filter: &str) {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<WidgetSettings> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings file {}", path.display()))?;
            let settings = serde_json::from_str(&contents)
                .with_context(|| format!("parsing settings file {}", path.display()))?;
            Ok(settings)
        }
        // No settings file: widget enabled so the demo renders something
        None => Ok(WidgetSettings {
            enabled: true,
            ..WidgetSettings::default()
        }),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Render {
            catalog,
            product,
            companions,
            settings,
        } => {
            let catalog = InMemoryCatalog::load_from_file(&catalog)?;
            let settings = load_settings(settings.as_ref())?;
            let companions = CompanionList::parse(&companions);
            debug!(product, "rendering bundle view");

            match present(&catalog, &settings, ProductId(product), &companions) {
                Some(view) => println!("{}", serde_json::to_string_pretty(&view)?),
                None => {
                    info!("nothing to render for product {}", product);
                    println!("null");
                }
            }
        }
        Commands::AddAll { catalog, payload } => {
            let catalog = InMemoryCatalog::load_from_file(&catalog)?;
            let mut cart = InMemoryCart::new();
            let response = handle_add_all(&catalog, &mut cart, &payload);
            println!("{}", serde_json::to_string_pretty(&response)?);
            info!(items = cart.lines().len(), "cart after replay");
        }
        Commands::Validate { catalog } => {
            let loaded = InMemoryCatalog::load_from_file(&catalog)?;
            let variable = loaded
                .products()
                .iter()
                .filter(|p| p.is_variable())
                .count();
            println!(
                "✓ Catalog is valid: {} products ({} variable)",
                loaded.products().len(),
                variable
            );
        }
    }

    Ok(())
}
