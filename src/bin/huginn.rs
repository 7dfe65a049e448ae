//! huginn: fetch a URL through the resilient cache.
//!
//! Mostly a way to watch the fetch policy work: `--repeat` sends the same
//! request several times through one session cache, so fresh hits, retries
//! and stale fallbacks show up in the printed results and in the logs
//! (`RUST_LOG=huginn=debug`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use huginn::config::Config;
use huginn::{Fetcher, RequestOptions, ResponseFormat, SessionCache};
use tracing::info;

/// Huginn CLI
#[derive(Parser)]
#[command(name = "huginn")]
#[command(version = huginn::PKG_VERSION)]
#[command(about = "Resilient cached HTTP fetching")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "HUGINN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a URL and print the result as JSON
    Fetch {
        /// URL to fetch (also the cache key)
        url: String,
        /// Keep the body as text instead of decoding JSON
        #[arg(long)]
        text: bool,
        /// Default freshness window in milliseconds
        #[arg(long)]
        ttl_ms: Option<u64>,
        /// Per-attempt timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Retries after the first attempt
        #[arg(long)]
        max_retries: Option<u32>,
        /// Extra request header, `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Fetch this many times through the same session cache
        #[arg(long, default_value_t = 1)]
        repeat: u32,
        /// Pause between repeated fetches in milliseconds
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Config => {
            print!("{}", toml::to_string(&config)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Fetch {
            url,
            text,
            ttl_ms,
            timeout_ms,
            max_retries,
            headers,
            repeat,
            interval_ms,
        } => {
            let mut options = config.fetch_options();
            if text {
                options = options.response_format(ResponseFormat::Text);
            }
            if let Some(ms) = ttl_ms {
                options = options.ttl(Duration::from_millis(ms));
            }
            if let Some(ms) = timeout_ms {
                options = options.timeout(Duration::from_millis(ms));
            }
            if let Some(n) = max_retries {
                options = options.max_retries(n);
            }
            options = options.request(parse_headers(&headers)?);
            options.validate()?;

            let cache = Arc::new(SessionCache::with_config(&config.cache_config()));
            let fetcher = Fetcher::new(cache.clone());

            let mut got_data = false;
            for round in 0..repeat.max(1) {
                if round > 0 && interval_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
                let result = fetcher.fetch(&url, &options).await;
                got_data = result.data().is_some();
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            info!(entries = cache.len(), bytes = cache.size_bytes(), "session cache");

            Ok(if got_data {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Parse repeated `Name: value` arguments into request options.
fn parse_headers(raw: &[String]) -> huginn::Result<RequestOptions> {
    raw.iter().try_fold(RequestOptions::default(), |request, header| {
        let (name, value) = header.split_once(':').ok_or_else(|| {
            huginn::HuginnError::InvalidInput(format!(
                "header {header:?} must look like `Name: value`"
            ))
        })?;
        request.header(name.trim(), value.trim())
    })
}
