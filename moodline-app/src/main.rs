use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use moodline_common::observability::{LogConfig, init_logging};
use moodline_config::{MoodlineConfig, MoodlineConfigLoader};
use moodline_pipeline::TimelineAnalyzer;
use moodline_sentiment::VaderScorer;
use moodline_social::TwitterTimelineApi;

use render::OutputFormat;
mod render;

/// Tabulate recent-post sentiment for a set of Twitter accounts.
#[derive(Debug, Parser)]
#[command(name = "moodline", version, about)]
struct Cli {
    /// Path to the YAML config file. Optional when the environment
    /// provides everything, e.g. MOODLINE_TWITTER__BEARER_TOKEN.
    #[arg(long, env = "MOODLINE_CONFIG", default_value = "moodline.yaml")]
    config: PathBuf,

    /// Comma-separated account handles; overrides the config file.
    #[arg(long, value_delimiter = ',')]
    accounts: Vec<String>,

    /// Timeline pages to pull per account; overrides the config file.
    #[arg(long)]
    cycles: Option<u32>,

    /// Posts requested per page; overrides the config file.
    #[arg(long)]
    page_size: Option<u32>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig::default())?;

    let mut loader = MoodlineConfigLoader::new();
    if cli.config.exists() {
        loader = loader.with_file(&cli.config);
    }
    let cfg: MoodlineConfig = loader.load().context("loading configuration")?;

    let accounts = if cli.accounts.is_empty() {
        cfg.accounts
    } else {
        cli.accounts
    };
    let cycles = cli.cycles.unwrap_or(cfg.cycles);
    let page_size = cli.page_size.unwrap_or(cfg.page_size);

    tracing::info!(
        accounts = accounts.len(),
        cycles,
        page_size,
        "starting tabulation"
    );

    let fetcher = Arc::new(TwitterTimelineApi::new(cfg.twitter.bearer_token));
    let scorer = Arc::new(VaderScorer::new());
    let analyzer = TimelineAnalyzer::new(fetcher, scorer).with_page_size(page_size);

    let table = analyzer.run(&accounts, cycles).await?;
    render::render(&table, cli.format)
}
