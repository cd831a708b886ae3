//! # siteproof CLI
//!
//! Command-line interface for the siteproof documentation link checker.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use siteproof_core::OnBrokenLinks;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "siteproof")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "siteproof.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new siteproof project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Check collected links against the route table
    Check {
        /// Route manifest (defaults to <manifests>/routes.json)
        #[arg(long)]
        routes: Option<PathBuf>,

        /// Link manifest (defaults to <manifests>/links.json)
        #[arg(long)]
        links: Option<PathBuf>,

        /// Override the configured output directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Override the configured failure policy
        #[arg(long, value_enum)]
        policy: Option<CheckPolicy>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the leaf routes eligible for matching
    Routes {
        /// Route manifest (defaults to <manifests>/routes.json)
        #[arg(long)]
        routes: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so --json output stays clean
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Check {
            routes,
            links,
            out_dir,
            policy,
            json,
        } => {
            let opts = commands::CheckOptions {
                routes_manifest: routes,
                links_manifest: links,
                out_dir,
                policy: policy.map(Into::into),
                json,
            };
            commands::check_links(&cli.config, opts).await
        }
        Commands::Routes { routes, json } => {
            commands::list_routes(&cli.config, routes.as_deref(), json)
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum CheckPolicy {
    Ignore,
    Log,
    Warn,
    Error,
    Throw,
}

impl From<CheckPolicy> for OnBrokenLinks {
    fn from(policy: CheckPolicy) -> Self {
        match policy {
            CheckPolicy::Ignore => OnBrokenLinks::Ignore,
            CheckPolicy::Log => OnBrokenLinks::Log,
            CheckPolicy::Warn | CheckPolicy::Error => OnBrokenLinks::Warn,
            CheckPolicy::Throw => OnBrokenLinks::Throw,
        }
    }
}
