//! PhotoSpot CLI
//!
//! Operator tooling around the PhotoSpot core: draw blurred points, measure
//! distances, check listing queries and look up photos and profiles through
//! the same service the API uses.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use photospot_core::config::Config;
use photospot_policy::UserRole;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod demo;

use commands::{geo, photos, query};

/// Location-privacy and photo query tooling for PhotoSpot
#[derive(Parser)]
#[command(name = "photospot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Configuration file (defaults to ./photospot.toml when present)
    #[arg(short, long, global = true, env = "PHOTOSPOT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Colored, human-readable
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a public point for an exact location
    Blur {
        /// Exact longitude
        #[arg(allow_hyphen_values = true)]
        lon: f64,

        /// Exact latitude
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        /// Blur radius in meters (100-500)
        #[arg(short, long, default_value_t = photospot_geo::DEFAULT_BLUR_RADIUS_M)]
        radius: u32,

        /// Seed for a reproducible draw
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of points to draw
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Great-circle distance between two points
    Distance {
        /// First longitude
        #[arg(allow_hyphen_values = true)]
        lon1: f64,
        /// First latitude
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        /// Second longitude
        #[arg(allow_hyphen_values = true)]
        lon2: f64,
        /// Second latitude
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
    },

    /// Validate a listing query string and show the parsed filters
    Query {
        /// Query string, e.g. "bbox=-122.5,37.7,-122.3,37.8&limit=20"
        #[arg(default_value = "")]
        query: String,
    },

    /// List approved photos
    List {
        /// Query string with the same keys as `GET /photos`
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        source: Source,
    },

    /// Show one photo as a given requester would see it
    Photo {
        /// Photo id
        id: String,

        #[command(flatten)]
        requester: RequesterArgs,

        #[command(flatten)]
        source: Source,
    },

    /// Show one profile as a given viewer would see it
    Profile {
        /// Profile id
        id: String,

        #[command(flatten)]
        requester: RequesterArgs,

        #[command(flatten)]
        source: Source,
    },
}

/// Where photo and profile rows come from
#[derive(Debug, Clone, clap::Args)]
pub struct Source {
    /// Use a seeded in-memory store instead of Supabase
    #[arg(long)]
    pub memory: bool,
}

/// Identity to evaluate visibility for
#[derive(Debug, Clone, clap::Args)]
pub struct RequesterArgs {
    /// Requester id; anonymous when omitted
    #[arg(long = "as", value_name = "UUID")]
    pub id: Option<uuid::Uuid>,

    /// Requester role
    #[arg(long, default_value = "enthusiast")]
    pub role: UserRole,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut log = config.schema.log.clone();
    if cli.verbose {
        log.level = "photospot=debug,info".to_string();
    }
    let _guard = match photospot_telemetry::init(&log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Blur {
            lon,
            lat,
            radius,
            seed,
            count,
        } => geo::blur(lon, lat, radius, seed, count, cli.format),

        Commands::Distance { lon1, lat1, lon2, lat2 } => geo::distance(lon1, lat1, lon2, lat2, cli.format),

        Commands::Query { query } => query::run(&query, cli.format),

        Commands::List { query, source } => photos::list(&config, &source, &query, cli.format).await,

        Commands::Photo { id, requester, source } => {
            photos::photo(&config, &source, &id, &requester, cli.format).await
        }

        Commands::Profile { id, requester, source } => {
            photos::profile(&config, &source, &id, &requester, cli.format).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
