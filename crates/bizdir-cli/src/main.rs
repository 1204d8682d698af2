mod geocode;
mod list;

use std::path::PathBuf;

use bizdir_core::SortOption;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bizdir-cli")]
#[command(about = "Business directory listing client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List businesses, one page at a time
    List {
        /// Case-insensitive text matched against name, address and postcode
        #[arg(long, default_value = "")]
        search: String,
        /// Minimum hygiene rating (values of zero or below are ignored)
        #[arg(long)]
        min_rating: Option<String>,
        /// Sort order: name-asc, name-desc, rating-asc or rating-desc
        #[arg(long, default_value = "name-asc")]
        sort: SortOption,
        /// 1-based page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Viewport width used to size pages (defaults to BIZDIR_VIEWPORT_WIDTH)
        #[arg(long)]
        width: Option<u32>,
    },
    /// Show one business as JSON
    Show {
        /// Business id
        id: String,
    },
    /// Show directory-wide counts from the API
    Stats,
    /// Add lat/lng by postcode lookup to rows of a JSON dataset that lack
    /// coordinates; all other keys and rows are written back unchanged
    Geocode {
        /// JSON array of businesses to read
        #[arg(long)]
        input: PathBuf,
        /// Where to write the geocoded dataset
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = bizdir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List {
            search,
            min_rating,
            sort,
            page,
            width,
        } => {
            let options = list::ListOptions {
                search,
                min_rating: bizdir_listing::parse_min_rating_param(min_rating.as_deref()),
                sort,
                page,
                width: width.unwrap_or(config.viewport_width),
            };
            list::run_list(&config, options).await?;
        }
        Commands::Show { id } => list::run_show(&config, &id).await?,
        Commands::Stats => list::run_stats(&config).await?,
        Commands::Geocode { input, output } => {
            geocode::run_geocode(&config, &input, &output).await?;
        }
    }

    Ok(())
}
