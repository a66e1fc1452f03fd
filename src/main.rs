use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use schemacraft::commands;
use schemacraft::config::{self, ConfigBuilder, ConfigInput};
use schemacraft::constants::CONFIG_FILENAME;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct RenderArgs {
    /// Migration files to render (defaults to every file in the migrations directory)
    files: Vec<PathBuf>,

    #[command(flatten)]
    dialect_args: config::DialectArgs,

    #[command(flatten)]
    directory_args: config::DirectoryArgs,
}

#[derive(Parser)]
struct ApplyArgs {
    /// Migration files to apply (defaults to every file in the migrations directory)
    files: Vec<PathBuf>,

    #[command(flatten)]
    database_args: config::DatabaseArgs,

    #[command(flatten)]
    directory_args: config::DirectoryArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the DDL statements migration files would run
    Render(RenderArgs),

    /// Run migration files against a PostgreSQL database
    Apply(ApplyArgs),
}

fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    initialize_logging(&cli);

    run_main(cli)
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_main(cli: Cli) -> Result<()> {
    let (file_config, root_dir) = config::load_config(&cli.config_file)?;

    match cli.command {
        Commands::Render(args) => {
            let cli_config = ConfigInput {
                dialect: args.dialect_args.dialect,
                directories: Some(args.directory_args.into()),
                ..ConfigInput::default()
            };
            let config = ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_config)
                .resolve();

            info!("Rendering migrations");
            commands::cmd_render(&config, &root_dir, &args.files)
        }
        Commands::Apply(args) => {
            let cli_config = ConfigInput {
                database: Some(args.database_args.into()),
                directories: Some(args.directory_args.into()),
                ..ConfigInput::default()
            };
            let config = ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_config)
                .resolve();

            info!("Applying migrations");
            commands::cmd_apply(&config, &root_dir, &args.files)
        }
    }
}
