//! penndining - Penn dining venue directory CLI.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use penndining_api::directory::{VenueCategory, find_venue, venues_in};
use penndining_api::feed::{FeedClient, FeedLoader, Venue};
use penndining_api::schedule::{
    format_date_label, format_day, format_hours_on, status_label, status_label_on,
};
use tokio::sync::mpsc;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, FeedConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query the venue directory.
    Venues(VenuesCommand),
    /// Browse venues and hours in a terminal UI.
    Browse(BrowseArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `venues` subcommand.
#[derive(clap::Args)]
struct VenuesCommand {
    /// Venues subcommand to run.
    #[command(subcommand)]
    command: VenuesSubcommands,
}

/// Available venues subcommands.
#[derive(Subcommand)]
enum VenuesSubcommands {
    /// List every venue with its status and hours for a day.
    List(ListArgs),
    /// Show one venue's hours for every day in the feed.
    Hours(VenueNameArgs),
    /// Open a venue's detail page in the browser.
    Open(VenueNameArgs),
}

/// Arguments for the `venues list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Day to show (YYYY-MM-DD, default: today).
    #[arg(long)]
    date: Option<NaiveDate>,
}

/// Arguments for subcommands that target one venue.
#[derive(clap::Args)]
struct VenueNameArgs {
    /// Venue name (e.g. "Houston Market"), case-insensitive.
    #[arg(long, required = true)]
    name: String,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Day to show first (YYYY-MM-DD, default: today).
    #[arg(long)]
    date: Option<NaiveDate>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with default values.
    Init(ConfigInitArgs),
    /// Print the effective config.
    Show,
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Loads the config for `dir` (defaults if the file is missing).
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `FeedClient` from the feed config.
///
/// # Errors
///
/// Returns an error if a configured URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_feed_client(config: &FeedConfig) -> Result<FeedClient> {
    let primary_url = Url::parse(&config.primary_url)
        .with_context(|| format!("invalid primary_url: {}", config.primary_url))?;
    let backup_url = Url::parse(&config.backup_url)
        .with_context(|| format!("invalid backup_url: {}", config.backup_url))?;

    FeedClient::builder()
        .primary_url(primary_url)
        .backup_url(backup_url)
        .timeout(config.timeout())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build venue feed client")
}

/// Fetches the venue list with the configured client.
///
/// # Errors
///
/// Returns an error if the config is invalid or both feed sources fail.
async fn fetch_venues(dir: Option<&PathBuf>) -> Result<Vec<Venue>> {
    let config = load_config(dir)?;
    let client = build_feed_client(&config.feed)?;
    client
        .fetch_venues()
        .await
        .context("failed to fetch venue feed")
}

/// Returns today's date in local time.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Runs the `venues list` subcommand.
///
/// # Errors
///
/// Returns an error if the feed cannot be fetched.
#[instrument(skip_all)]
async fn run_venues_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let venues = fetch_venues(dir).await?;
    let date = args.date.unwrap_or_else(today);

    tracing::info!("{}", format_date_label(date));
    for category in VenueCategory::ALL {
        let section = venues_in(&venues, category);
        tracing::info!("{} ({})", category.heading(), section.len());
        for venue in section {
            tracing::info!(
                "  {:<7} {:<28} {}",
                status_label_on(venue, date),
                venue.name,
                format_hours_on(venue, date),
            );
        }
    }
    tracing::info!("Total: {} venues", venues.len());

    Ok(())
}

/// Runs the `venues hours` subcommand.
///
/// # Errors
///
/// Returns an error if the feed cannot be fetched or no venue matches.
#[instrument(skip_all)]
async fn run_venues_hours(args: &VenueNameArgs, dir: Option<&PathBuf>) -> Result<()> {
    let venues = fetch_venues(dir).await?;
    let Some(venue) = find_venue(&venues, &args.name) else {
        bail!("no venue named {:?}", args.name);
    };

    tracing::info!("{} ({})", venue.name, venue.category().heading());
    if !venue.address.is_empty() {
        tracing::info!("{}", venue.address);
    }
    for day in &venue.schedule {
        let label = day
            .calendar_date()
            .map_or_else(|| day.date.clone(), format_date_label);
        tracing::info!(
            "  {:<24} {:<7} {}",
            label,
            status_label(Some(day)),
            format_day(day),
        );
    }
    if venue.schedule.is_empty() {
        tracing::info!("  No schedule published");
    }

    Ok(())
}

/// Runs the `venues open` subcommand.
///
/// # Errors
///
/// Returns an error if the feed cannot be fetched, no venue matches,
/// or the browser cannot be launched.
#[instrument(skip_all)]
async fn run_venues_open(args: &VenueNameArgs, dir: Option<&PathBuf>) -> Result<()> {
    let venues = fetch_venues(dir).await?;
    let Some(venue) = find_venue(&venues, &args.name) else {
        bail!("no venue named {:?}", args.name);
    };

    let url = venue.detail_page_url();
    tracing::info!("Opening {url}");
    open::that(url).with_context(|| format!("failed to open {url}"))?;

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// Starts the first load in the background and hands the feed state
/// channel to the TUI; `r` in the TUI requests another load.
///
/// # Errors
///
/// Returns an error if the config is invalid or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_feed_client(&config.feed)?;
    let loader = Arc::new(FeedLoader::new(client));
    let receiver = loader.subscribe();

    let (reload_tx, mut reload_rx) = mpsc::unbounded_channel::<()>();
    let worker = {
        let loader = Arc::clone(&loader);
        tokio::spawn(async move {
            while reload_rx.recv().await.is_some() {
                let loader = Arc::clone(&loader);
                tokio::spawn(async move {
                    if let Err(e) = loader.load().await {
                        tracing::debug!(error = %e, "Venue reload failed");
                    }
                });
            }
        })
    };
    reload_tx
        .send(())
        .context("failed to request initial venue load")?;

    let today = today();
    let date = args.date.unwrap_or(today);
    let result = tokio::task::spawn_blocking(move || {
        tui::run_directory_viewer(receiver, reload_tx, date, today)
    })
    .await
    .context("directory viewer task failed")?;

    worker.abort();
    result.context("directory viewer TUI failed")
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
#[instrument(skip_all)]
fn run_config_init(args: &ConfigInitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    AppConfig::default()
        .save(&config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote default config to {}", config_path.display());

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!("primary_url  = {}", config.feed.primary_url);
    tracing::info!("backup_url   = {}", config.feed.backup_url);
    tracing::info!("timeout_secs = {}", config.feed.timeout_secs);

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal; log lines would draw over it.
    let default_filter = if matches!(cli.command, Commands::Browse(_)) {
        "off"
    } else {
        "info"
    };

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    match cli.command {
        Commands::Venues(cmd) => match cmd.command {
            VenuesSubcommands::List(args) => run_venues_list(&args, cli.dir.as_ref()).await,
            VenuesSubcommands::Hours(args) => run_venues_hours(&args, cli.dir.as_ref()).await,
            VenuesSubcommands::Open(args) => run_venues_open(&args, cli.dir.as_ref()).await,
        },
        Commands::Browse(args) => run_browse(&args, cli.dir.as_ref()).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init(args) => run_config_init(&args, cli.dir.as_ref()),
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
        },
    }
}
