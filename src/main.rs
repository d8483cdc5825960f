//! `synoptic-sidecar` - write the metadata sidecar for the synoptic chart.

#![deny(unsafe_code)]

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use synoptic_sidecar::clock::SystemClock;
use synoptic_sidecar::config::Overrides;
use synoptic_sidecar::constants;

#[derive(Parser)]
#[command(name = "synoptic-sidecar", version, about, long_about = None)]
struct Cli {
    /// Optional TOML config file ([publish] owner/repo, [output] path/atomic)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log output format (logs go to stderr; filter with RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sidecar and write it to disk
    Generate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Destination file [default: synoptic/atlantic_focus.png.json]
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Write to a temp file and rename it over the destination
        #[arg(long)]
        atomic: bool,
    },
    /// Build the sidecar and print it to stdout
    Show {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Per-run inputs. Each flag overrides its environment variable.
#[derive(Args)]
struct InputArgs {
    /// Revision for raw-content URLs (env: COMMIT_SHA)
    #[arg(long)]
    commit: Option<String>,

    /// Upstream product time, passed through unchanged (env: PRODUCT_TIME)
    #[arg(long)]
    product_time: Option<String>,

    /// Generation time; defaults to now in UTC (env: GENERATED_UTC)
    #[arg(long)]
    generated_utc: Option<String>,

    /// Repository owner (env: GH_OWNER)
    #[arg(long)]
    owner: Option<String>,

    /// Repository name (env: GH_REPO)
    #[arg(long)]
    repo: Option<String>,
}

impl InputArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            commit: self.commit,
            product_time: self.product_time,
            generated_utc: self.generated_utc,
            owner: self.owner,
            repo: self.repo,
            ..Overrides::default()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Initialize stderr logging. Stdout is reserved for command output.
fn init_logging(format: LogFormat) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match cli.command {
        Commands::Generate {
            inputs,
            output,
            atomic,
        } => {
            let overrides = Overrides {
                output,
                atomic,
                ..inputs.into_overrides()
            };
            let settings = commands::load_settings(cli.config.as_deref(), &overrides)?;
            commands::generate::execute(&settings, &SystemClock)
        },
        Commands::Show { inputs } => {
            let settings =
                commands::load_settings(cli.config.as_deref(), &inputs.into_overrides())?;
            commands::show::execute(&settings, &SystemClock)
        },
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "synoptic-sidecar",
                &mut std::io::stdout(),
            );
            Ok(())
        },
    }
}
