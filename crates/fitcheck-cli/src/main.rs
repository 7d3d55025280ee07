//! fitcheck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fitcheck", version, about = "Career fit self-assessment and scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the assessment interactively
    Take {
        /// Catalog TOML file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Response store directory
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a stored or supplied run
    Score {
        /// JSON file of responses (default: the response store)
        #[arg(long, conflicts_with = "store")]
        responses: Option<PathBuf>,

        /// Response store directory
        #[arg(long)]
        store: Option<PathBuf>,

        /// Catalog TOML file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Score malformed answers neutrally instead of failing
        #[arg(long)]
        lenient: bool,

        /// Output directory for json and html
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, html, all (comma-separated)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Discard the stored responses so the next run starts fresh
    Reset {
        /// Response store directory
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List catalog questions
    Questions {
        /// Catalog TOML file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only show one category: trait, aptitude, readiness
        #[arg(long)]
        category: Option<String>,
    },

    /// Compare two assessment reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example catalog
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "fitcheck=info"
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::Directive::from(
                        tracing::Level::INFO,
                    )),
            ),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            catalog,
            store,
            config,
        } => commands::take::execute(catalog, store, config),
        Commands::Score {
            responses,
            store,
            catalog,
            config,
            lenient,
            output,
            format,
        } => commands::score::execute(responses, store, catalog, config, lenient, output, format),
        Commands::Reset { store, config } => commands::reset::execute(store, config),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Questions { catalog, category } => {
            commands::questions::execute(catalog, category)
        }
        Commands::Compare {
            baseline,
            current,
            format,
        } => commands::compare::execute(baseline, current, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
