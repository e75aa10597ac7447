//! Complaint Dash CLI
//!
//! Fetches the complaint feed once and renders the dashboard:
//! - Full page (cards, charts, table)
//! - Overview cards only
//! - One table page
//! - Default config generation

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use complaint_dash::config::{generate_default_config, Config};
use complaint_dash::dashboard::{Dashboard, DashboardOptions, Section};
use complaint_dash::feed::{FeedClient, FeedSource, FeedState, FileFeed};
use complaint_dash::logging::{init_tracing, with_bootstrap_logging};

#[derive(Parser)]
#[command(name = "complaint-dash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Restaurant complaint dashboard for the terminal")]
#[command(long_about = "Fetches the restaurant complaint feed once and renders summary cards,\nseverity, meal-type and timing charts, and a paginated complaint table.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Complaint endpoint, overriding the configured one
    #[arg(long, global = true)]
    pub feed_url: Option<String>,

    /// Read a saved feed payload instead of calling the endpoint
    #[arg(short, long, global = true, conflicts_with = "feed_url")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the full dashboard (default)
    Show {
        /// Table page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Complaint ids to mark as selected
        #[arg(short, long)]
        select: Vec<String>,
    },

    /// Show the overview cards only
    Summary,

    /// Show one page of the complaint table
    Table {
        /// Table page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Complaint ids to mark as selected
        #[arg(short, long)]
        select: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show {
        page: 1,
        select: Vec::new(),
    });

    let (page, selected, sections) = match command {
        Commands::Config { output } => return write_default_config(output.as_deref()),
        Commands::Show { page, select } => (page, select, None),
        Commands::Summary => (1, Vec::new(), Some(vec![Section::Overview])),
        Commands::Table { page, select } => (page, select, Some(vec![Section::Table])),
    };

    let mut config = with_bootstrap_logging(|| Config::resolve(cli.config.as_deref()))?;
    if let Some(url) = cli.feed_url {
        config.feed.url = url;
    }

    init_tracing(&config.logging);
    tracing::debug!("Complaint Dash v{}", env!("CARGO_PKG_VERSION"));

    if page == 0 {
        anyhow::bail!("page numbers start at 1");
    }

    let source: Box<dyn FeedSource> = match cli.input {
        Some(path) => Box::new(FileFeed::new(path)),
        None => Box::new(
            FeedClient::new(config.feed.client_config()).context("Failed to create HTTP client")?,
        ),
    };

    let mut dashboard = Dashboard::new(DashboardOptions {
        zone: config.dashboard.timezone,
        page_size: config.dashboard.page_size,
        page: page - 1,
        selected,
    });
    dashboard.initialize(source.as_ref()).await;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&dashboard.to_json())?);
        }
        OutputFormat::Text => match (&sections, dashboard.state()) {
            (Some(sections), FeedState::Loaded(_)) => {
                for section in sections {
                    print!("{}", dashboard.render_section(*section));
                }
            }
            _ => print!("{}", dashboard.render()),
        },
    }

    if let FeedState::Failed(message) = dashboard.state() {
        anyhow::bail!("complaint feed unavailable: {}", message);
    }

    Ok(())
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}
