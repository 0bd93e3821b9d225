//! moviecrawl - TMDB discover/movie harvesting CLI.

/// Application configuration (TOML + environment).
mod config;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TOKEN_ENV_VAR, TmdbConfig, resolve_config_path};
use moviecrawl_api::tmdb::{
    DiscoverMovieParams, FetchOptions, TmdbClient, fetch_all_movies, total_results,
};
use moviecrawl_store::{resolve_output_path, write_movies};

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
    /// Print the total number of movies matching the query.
    Count(CountArgs),
    /// Fetch every page of the query and save the movies as JSON.
    Fetch(FetchArgs),
}

/// Query overrides shared by all subcommands.
#[derive(clap::Args)]
struct QueryArgs {
    /// Release year (default: config or 2024).
    #[arg(long)]
    year: Option<u32>,
    /// Response language (default: config or "en-US").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `count` subcommand.
#[derive(clap::Args)]
struct CountArgs {
    /// Query overrides.
    #[command(flatten)]
    query: QueryArgs,
}

/// Arguments for the `fetch` subcommand.
#[derive(clap::Args)]
struct FetchArgs {
    /// Query overrides.
    #[command(flatten)]
    query: QueryArgs,
    /// Output JSON file (default: config or "data/all_{year}_movies.json").
    #[arg(long)]
    output: Option<PathBuf>,
    /// Concurrent page requests (default: config or 10).
    #[arg(long)]
    workers: Option<usize>,
    /// Page cap, never above 500 (default: config or 500).
    #[arg(long)]
    max_pages: Option<u32>,
    /// Extra passes over failed pages (default: config or 0).
    #[arg(long)]
    retry_passes: Option<u32>,
    /// Global request ceiling, 0 disables throttling (default: config or 50).
    #[arg(long)]
    requests_per_second: Option<u32>,
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds the discover query from config and CLI overrides.
fn discover_params(tmdb: &TmdbConfig, query: &QueryArgs) -> DiscoverMovieParams {
    let language = query
        .language
        .clone()
        .unwrap_or_else(|| tmdb.language.clone());
    DiscoverMovieParams::new(query.year.unwrap_or(tmdb.year))
        .language(language)
        .sort_by(&tmdb.sort_by)
        .include_adult(tmdb.include_adult)
        .include_video(tmdb.include_video)
}

/// Builds a `TmdbClient` from config and the environment token.
///
/// A missing token is not an error: requests go out unauthenticated
/// and fail upstream.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client
/// fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(tmdb: &TmdbConfig, requests_per_second: Option<u32>) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .maybe_api_token(config::bearer_token())
        .requests_per_second(requests_per_second.unwrap_or(tmdb.requests_per_second));
    if let Some(base_url) = &tmdb.base_url {
        let url =
            Url::parse(base_url).with_context(|| format!("invalid TMDB base URL: {base_url}"))?;
        builder = builder.base_url(url);
    }

    let client = builder.build().context("failed to build TMDB API client")?;
    if !client.is_authenticated() {
        tracing::warn!("{TOKEN_ENV_VAR} is not set; requests will be unauthenticated");
    }
    Ok(client)
}

/// Runs the `count` subcommand.
///
/// Always reports a number; request failures are logged and count as 0.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
async fn run_count(args: &CountArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb, None)?;
    let params = discover_params(&config.tmdb, &args.query);

    let count = total_results(&client, &params).await;
    tracing::info!("Total number of {} movies: {count}", params.year);

    Ok(())
}

/// Runs the `fetch` subcommand.
///
/// Fetches all pages, logs failed pages, and writes the aggregate to the
/// output file.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the client fails to
/// build, or the output file cannot be written.
#[instrument(skip_all)]
async fn run_fetch(args: &FetchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let start = Instant::now();

    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb, args.requests_per_second)?;
    let params = discover_params(&config.tmdb, &args.query);
    let options = FetchOptions {
        workers: args.workers.unwrap_or(config.fetch.workers),
        max_pages: args.max_pages.unwrap_or(config.fetch.max_pages),
        retry_passes: args.retry_passes.unwrap_or(config.fetch.retry_passes),
    };
    let output = resolve_output_path(
        args.output.as_deref().or(config.fetch.output.as_deref()),
        params.year,
    );

    let report = fetch_all_movies(&client, &params, &options).await;
    if report.is_complete() {
        tracing::info!("All {} pages fetched", report.pages);
    } else {
        report.log_failures();
    }

    write_movies(&output, &report.movies)
        .with_context(|| format!("failed to save movies to {}", output.display()))?;
    tracing::info!(
        "Successfully saved {} movies to {}",
        report.movies.len(),
        output.display()
    );
    tracing::info!("Total time taken: {:.2} seconds", start.elapsed().as_secs_f64());

    Ok(())
}

/// Installs the global tracing subscriber.
fn init_tracing() {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
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
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Before tracing: .env may set RUST_LOG and OTEL_EXPORTER_OTLP_ENDPOINT.
    let dotenv = config::load_dotenv();
    init_tracing();
    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Ok(None) => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env: {e}"),
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Count(args) => run_count(&args, cli.dir.as_ref()).await,
        Commands::Fetch(args) => run_fetch(&args, cli.dir.as_ref()).await,
    }
}
