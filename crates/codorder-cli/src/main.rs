mod address;
mod catalog;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_CATALOG_PATH: &str = "./config/variants_map.json";

#[derive(Debug, Parser)]
#[command(name = "codorder-cli")]
#[command(about = "COD order backend operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a reverse-geocoding response into form fields
    Normalize {
        /// JSON file: `{"results": [...]}`, a bare result list, or a flat component map
        file: PathBuf,
        /// Place name to use when no house number is present
        #[arg(long)]
        place_name: Option<String>,
    },
    /// Resolve a product/size pair to a Shopify variant id
    Resolve {
        #[arg(long)]
        product: String,
        #[arg(long)]
        size: String,
        #[arg(long, env = "CODORDER_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
        catalog: PathBuf,
    },
    /// Load and validate the variant catalog
    CheckCatalog {
        #[arg(long, env = "CODORDER_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
        catalog: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Normalize { file, place_name } => {
            address::run_normalize(&file, place_name.as_deref())?;
        }
        Commands::Resolve {
            product,
            size,
            catalog,
        } => catalog::run_resolve(&catalog, &product, &size)?,
        Commands::CheckCatalog { catalog } => catalog::run_check(&catalog)?,
    }

    Ok(())
}
