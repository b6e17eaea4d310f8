//! Fleet - hosted-site fleet operations
//!
//! Usage:
//!   fleet upstream apply <site>.<env>   # apply updates to one environment
//!   fleet upstream apply <site>         # ...to a site's dev environments
//!   fleet upstream apply --all          # ...across the whole fleet
//!   fleet env list <site>               # list a site's environments
//!   fleet multidev create <site> <id>   # create a multidev environment

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleet_core::commands::{
    ApplyCommand, ApplyOptions, EnvListCommand, EnvListOptions, MultidevCreateCommand,
    MultidevCreateOptions,
};
use fleet_core::config::ConfigStore;
use fleet_core::session::HttpSession;

#[derive(Parser)]
#[command(name = "fleet")]
#[command(about = "Hosted-site fleet operations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upstream update operations
    Upstream {
        #[command(subcommand)]
        command: UpstreamCommands,
    },

    /// Environment operations
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },

    /// Multidev environment operations
    Multidev {
        #[command(subcommand)]
        command: MultidevCommands,
    },
}

#[derive(Subcommand)]
enum UpstreamCommands {
    /// Apply pending upstream updates
    ///
    /// With <SITE>.<ENV>, applies to that environment (must be a development
    /// environment). With <SITE>, applies to all of the site's development
    /// environments that have updates. With --all and no selector, applies
    /// across every accessible site.
    Apply {
        /// Site or site.env selector
        selector: Option<String>,

        /// Target all development environments of all sites. Does not
        /// override the selector.
        #[arg(short, long)]
        all: bool,

        /// Run the framework's database update step after applying
        #[arg(long)]
        updatedb: bool,

        /// Resolve conflicts in favor of the upstream
        #[arg(long)]
        accept_upstream: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum EnvCommands {
    /// List a site's environments
    List {
        /// Site name
        site: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum MultidevCommands {
    /// Create a multidev environment by cloning an existing one
    Create {
        /// Site name
        site: String,

        /// Id of the environment to create
        new_id: String,

        /// Environment to clone database and files from
        #[arg(long, default_value = "dev")]
        from_env: String,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ConfigStore::from_default_location()?.load()?;
    let session = HttpSession::new(&config)?;
    let poll_interval = config.poll_interval();

    match cli.command {
        Commands::Upstream { command } => match command {
            UpstreamCommands::Apply {
                selector,
                all,
                updatedb,
                accept_upstream,
                format,
            } => {
                let options = ApplyOptions {
                    selector,
                    all,
                    updatedb,
                    accept_upstream,
                };
                let report = ApplyCommand::new(&session, poll_interval)
                    .execute(&options)
                    .await?;
                if report.nothing_to_do() {
                    println!("None of the targeted environments have updates to apply.");
                    return Ok(());
                }
                match format {
                    OutputFormat::Table => {
                        for (owner, status) in &report.statuses {
                            println!("{}: {}", owner, status.as_str().unwrap_or_default());
                        }
                    }
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&report.statuses)?);
                    }
                }
            }
        },
        Commands::Env { command } => match command {
            EnvCommands::List { site, format } => {
                let listing = EnvListCommand::new(&session)
                    .execute(&EnvListOptions { site })
                    .await?;
                match format {
                    OutputFormat::Table => {
                        for (id, env) in &listing {
                            let updates = env
                                .get("upstream_updates")
                                .and_then(|v| v.as_bool())
                                .unwrap_or(false);
                            println!("{id}{}", if updates { " (updates pending)" } else { "" });
                        }
                    }
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&listing)?);
                    }
                }
            }
        },
        Commands::Multidev { command } => match command {
            MultidevCommands::Create {
                site,
                new_id,
                from_env,
            } => {
                let options = MultidevCreateOptions {
                    site,
                    new_id,
                    from_env,
                };
                let report = MultidevCreateCommand::new(&session, poll_interval)
                    .execute(&options)
                    .await?;
                println!("{}: {}", report.environment, report.status);
            }
        },
    }

    Ok(())
}
