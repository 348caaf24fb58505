use clap::Parser;
use follow_overlap::config::Settings;
use follow_overlap::core::Comparer;
use follow_overlap::models::{CompareRequest, ErrorResponse};
use follow_overlap::services::{BackendClient, NetworkCache, SearchClient};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// Compare the follower and following networks of two accounts
#[derive(Debug, Parser)]
#[command(name = "follow-overlap", version, about)]
struct Cli {
    /// First account handle
    #[arg(short = 'a', long = "a")]
    a: Option<String>,

    /// Second account handle
    #[arg(short = 'b', long = "b")]
    b: Option<String>,

    /// Filters for the first account (following, followed-by)
    #[arg(long, value_delimiter = ',')]
    a_filters: Vec<String>,

    /// Filters for the second account (following, followed-by)
    #[arg(long, value_delimiter = ',')]
    b_filters: Vec<String>,

    /// Diagram sets to intersect (user1-followers, user2-followers, user1-following, user2-following)
    #[arg(long, value_delimiter = ',')]
    selected_sets: Vec<String>,

    /// Full query string, e.g. "a=alice&b=bob&aFilters=following"; overrides the flags above
    #[arg(long)]
    query: Option<String>,

    /// Search for actors instead of comparing
    #[arg(long)]
    search: Option<String>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn compare_request(&self) -> CompareRequest {
        if let Some(query) = &self.query {
            return CompareRequest::from_query(query);
        }

        CompareRequest {
            a: self.a.clone().unwrap_or_default(),
            b: self.b.clone().unwrap_or_default(),
            a_filters: self.a_filters.clone(),
            b_filters: self.b_filters.clone(),
            selected_sets: self.selected_sets.clone(),
        }
    }
}

fn failure(error: &str, message: impl ToString) -> std::io::Error {
    let response = ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
    };
    if let Ok(json) = serde_json::to_string_pretty(&response) {
        eprintln!("{}", json);
    }
    std::io::Error::new(std::io::ErrorKind::Other, response.message)
}

fn print_json<T: serde::Serialize>(value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| failure("serialization", e))?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .map_err(|e| failure("config", format!("Failed to load configuration: {}", e)))?;

    // Initialize logging, LOG_LEVEL and LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Configuration loaded successfully");

    let cache = NetworkCache::new(
        settings.cache.l1_cache_size,
        settings.cache.ttl_secs,
        settings.cache.search_ttl_secs,
    );

    if let Some(query) = &cli.search {
        let search = SearchClient::new(
            settings.search.service_url.clone(),
            settings.search.limit,
            settings.search.min_query_len,
            Duration::from_secs(settings.search.timeout_secs),
        )
        .map_err(|e| failure("search", e))?;

        let actors = cache.search_or_fetch(query, &search).await.map_err(|e| {
            error!("Actor search failed: {}", e);
            failure("search", e)
        })?;

        info!("Found {} actors for {:?}", actors.len(), query);
        return print_json(&*actors);
    }

    let request = cli.compare_request();
    if let Err(errors) = request.validate() {
        return Err(failure("validation", errors));
    }

    let backend = BackendClient::new(
        settings.backend.url.clone(),
        Duration::from_secs(settings.backend.timeout_secs),
    )
    .map_err(|e| failure("backend", e))?;

    info!("Comparing {} and {}", request.a, request.b);

    let (user_a, user_b) = tokio::join!(
        cache.get_or_fetch(&request.a, &backend),
        cache.get_or_fetch(&request.b, &backend),
    );

    let user_a = user_a.map_err(|e| {
        error!("Failed to fetch network for {}: {}", request.a, e);
        failure("backend", e)
    })?;
    let user_b = user_b.map_err(|e| {
        error!("Failed to fetch network for {}: {}", request.b, e);
        failure("backend", e)
    })?;

    let comparer = Comparer::new(settings.filters.combine_policy);
    let report = comparer
        .compare(&user_a, &user_b, &request.selection(), &request.set_keys())
        .into_report(request.a.clone(), request.b.clone());

    info!(
        "Similarity {} for {} and {} ({} filtered, {} in selected sets)",
        report.similarity_score,
        request.a,
        request.b,
        report.filtered_accounts.len(),
        report.selected_set_accounts.len()
    );

    print_json(&report)
}
