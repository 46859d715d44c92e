use clap::{Parser, Subcommand};
use spice::{
    commands::{
        compute,
        config::{self, ConfigAction},
        export::{self, ExportFormat},
        features, submit,
    },
    logger, GlobalOpts,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "NYC taxi feature manifest",
    long_about = "Spice declares the NYC taxi pickup-time features and submits them to the feature registry."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure credentials and paths
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List registered features
    Features {
        /// Optional feature name to show in detail (e.g., pickup_hour)
        name: Option<String>,
    },
    /// Print or write the feature manifest
    Export {
        /// Output format (defaults to the output file extension, else toml)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Submit the feature manifest to the registry
    Submit {
        /// Directory to record the submission in (default: configured manifest-dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Compute all features for one trip record
    Compute {
        /// Pickup timestamp, e.g. "2016-01-15 08:23:00"
        #[arg(long)]
        pickup_datetime: Option<String>,
        /// Print results as a JSON object
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logger::verbosity_to_filter(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.global.verbosity_level();

    if let Err(e) = logger::init_with_verbosity(verbosity) {
        logger::warn(&format!("Failed to initialize logger: {}", e));
    }
    init_tracing(verbosity);

    let result = match cli.command {
        Commands::Config { action } => config::handle_config(action, &cli.global),
        Commands::Features { name } => features::list_features(&cli.global, name),
        Commands::Export { format, output } => export::handle_export(format, output),
        Commands::Submit { dir } => submit::handle_submit(dir),
        Commands::Compute {
            pickup_datetime,
            json,
        } => compute::handle_compute(pickup_datetime, json),
    };

    if let Err(e) = result {
        logger::error(&e.to_string());
        if let Some(path) = logger::get_log_path() {
            logger::info(&format!("Log file: {}", path.display()));
        }
        std::process::exit(1);
    }
}
