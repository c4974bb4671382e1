//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ads_archive` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (the token file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use ads_archive::app::{log_search_summary, write_details, write_preview};
use ads_archive::config::{
    ads_archive_url, DEFAULT_API_VERSION, DEFAULT_PREVIEW_LIMIT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_FILE, DEFAULT_USER_AGENT,
};
use ads_archive::credentials::{mask_token, resolve_token};
use ads_archive::criteria::{parse_delivery_date, AD_DELIVERY_DATE_MAX, AD_DELIVERY_DATE_MIN};
use ads_archive::initialization::init_logger_with;
use ads_archive::{
    check_token, run_search, ActiveStatus, AdType, Config, CriteriaError, ExportFormat,
    LogFormat, LogLevel, Platform, RetrySettings, SearchCriteria, TokenStore,
};

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Save a token once
/// ads_archive token set EAAB...
///
/// # Search and export a workbook
/// ads_archive search --search-terms climate --countries US,CA --export
///
/// # First two pages only, as CSV
/// ads_archive search --search-terms housing --max-pages 2 --format csv --output ads.csv
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ads_archive",
    about = "Searches the Meta Ads Library and exports the results."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// File holding META_ADS_API_TOKEN
    #[arg(long, global = true, value_parser, default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search the ads archive
    Search(SearchArgs),
    /// Manage the stored API token
    #[command(subcommand)]
    Token(TokenCommand),
    /// Check that the API token is accepted
    ValidateToken(ApiArgs),
}

#[derive(Debug, Subcommand)]
enum TokenCommand {
    /// Save a token to the token file, replacing any previous one
    Set {
        /// The access token
        token: String,
    },
    /// Show the token that would be used (masked)
    Show {
        /// Token given on the command line
        #[arg(long)]
        token: Option<String>,
    },
}

/// Connection settings shared by commands that call the API.
#[derive(Debug, Args)]
struct ApiArgs {
    /// Access token (overrides META_ADS_API_TOKEN and the token file)
    #[arg(long)]
    token: Option<String>,

    /// Graph API version
    #[arg(long, default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Full endpoint URL (overrides --api-version)
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[command(flatten)]
    api: ApiArgs,

    /// Keywords to search for
    #[arg(long, short = 'q')]
    search_terms: Option<String>,

    /// Category of ads
    #[arg(long, value_enum)]
    ad_type: Option<AdType>,

    /// ISO country codes the ads reached, comma-separated
    #[arg(long, value_delimiter = ',')]
    countries: Option<Vec<String>>,

    /// Delivery status
    #[arg(long, value_enum)]
    active_status: Option<ActiveStatus>,

    /// Publisher platforms, comma-separated
    #[arg(long, value_enum, value_delimiter = ',')]
    platforms: Option<Vec<Platform>>,

    /// Earliest delivery date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_start_date)]
    start_date: Option<NaiveDate>,

    /// Latest delivery date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_end_date)]
    end_date: Option<NaiveDate>,

    /// Fields to request, comma-separated
    #[arg(long)]
    fields: Option<String>,

    /// Ads per page requested from the API
    #[arg(long)]
    limit: Option<u32>,

    /// Stop after this many pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Export to this file
    #[arg(long, short = 'o', value_parser)]
    output: Option<PathBuf>,

    /// Export to a timestamped file in the current directory
    #[arg(long, conflicts_with = "output")]
    export: bool,

    /// Export format: xlsx|csv|jsonl
    #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
    format: ExportFormat,

    /// Rows shown in the results preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
    preview: usize,

    /// Print full details for each previewed ad
    #[arg(long)]
    details: bool,

    /// Assumed seconds until the API quota resets after a usage report
    #[arg(long)]
    rate_limit_reset_secs: Option<u64>,
}

fn parse_start_date(value: &str) -> Result<NaiveDate, CriteriaError> {
    parse_delivery_date(AD_DELIVERY_DATE_MIN, value)
}

fn parse_end_date(value: &str) -> Result<NaiveDate, CriteriaError> {
    parse_delivery_date(AD_DELIVERY_DATE_MAX, value)
}

impl ApiArgs {
    fn config(&self, cli: &Cli) -> Config {
        Config {
            token: self.token.clone(),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| ads_archive_url(&self.api_version)),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent.clone(),
            token_file: cli.token_file.clone(),
            ..Default::default()
        }
    }
}

impl SearchArgs {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            search_terms: self.search_terms.clone(),
            ad_type: self.ad_type,
            ad_reached_countries: self.countries.clone(),
            ad_active_status: self.active_status,
            publisher_platforms: self.platforms.clone(),
            ad_delivery_date_min: self.start_date,
            ad_delivery_date_max: self.end_date,
            fields: self.fields.clone(),
            limit: self.limit,
        }
    }

    fn config(&self, cli: &Cli) -> Config {
        let mut retry = RetrySettings::default();
        if let Some(secs) = self.rate_limit_reset_secs {
            retry.reset_window = Duration::from_secs(secs);
        }
        let output = match (&self.output, self.export) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(self.format.default_filename()),
            (None, false) => None,
        };
        Config {
            max_pages: self.max_pages,
            retry,
            output,
            export_format: self.format,
            preview_limit: self.preview,
            ..self.api.config(cli)
        }
    }
}

async fn search(cli: &Cli, args: &SearchArgs) -> Result<()> {
    let config = args.config(cli);
    let report = run_search(&config, &args.criteria()).await?;
    log_search_summary(&report);

    let shown = report.records.preview(config.preview_limit);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_preview(&mut out, shown, report.records.len())?;
    if args.details {
        for record in shown {
            writeln!(out)?;
            write_details(&mut out, record)?;
        }
    }

    if let Some(e) = &report.error {
        eprintln!("Search stopped early: {e}");
    }
    if let Some(export) = &report.export {
        println!("Exported {} ads to {}", export.rows, export.path.display());
    }
    Ok(())
}

fn token(cli: &Cli, command: &TokenCommand) -> Result<()> {
    let store = TokenStore::new(&cli.token_file);
    match command {
        TokenCommand::Set { token } => {
            if token.trim().is_empty() {
                anyhow::bail!("Please enter an API token");
            }
            store.save(token)?;
            println!("API token saved to {}", store.path().display());
        }
        TokenCommand::Show { token } => match resolve_token(token.as_deref(), &store)? {
            Some(token) => println!("{}", mask_token(&token)),
            None => println!("No API token configured"),
        },
    }
    Ok(())
}

async fn validate(cli: &Cli, args: &ApiArgs) -> Result<()> {
    if check_token(&args.config(cli)).await? {
        println!("API token is valid");
        Ok(())
    } else {
        anyhow::bail!("API token is missing, invalid or has expired")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Only the selected token file is loaded; a stray ./.env must not
    // shadow it through the process environment
    let _ = dotenvy::from_path(&cli.token_file);

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let result = match &cli.command {
        Command::Search(args) => search(&cli, args).await,
        Command::Token(command) => token(&cli, command),
        Command::ValidateToken(args) => validate(&cli, args).await,
    };

    if let Err(e) = result {
        eprintln!("ads_archive error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
