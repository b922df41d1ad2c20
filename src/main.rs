use clap::Parser;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

use wikistats::cli::{self, Cli};
use wikistats::config::Config;
use wikistats::error::WikiStatsError;
use wikistats::report;
use wikistats::wikipedia;

/// Initialize structured logging on stderr, keeping stdout for the report
fn init_logging(config: &Config, cli: &Cli) -> Result<(), WikiStatsError> {
    // Determine log level from CLI args, config, or default
    let configured = config.logging().level;
    let log_level = if cli.verbose {
        "debug"
    } else if let Some(ref level) = cli.log_level {
        level.as_str()
    } else {
        configured.as_deref().unwrap_or("warn")
    };

    // Validate log level
    let _level = match log_level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => {
            return Err(WikiStatsError::InvalidData(format!(
                "Invalid log level: {log_level}. Valid levels are: error, warn, info, debug, trace"
            )));
        }
    };

    // Create environment filter with fallback, RUST_LOG wins when set
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.to_lowercase()))
        .map_err(|e| WikiStatsError::InvalidData(format!("Failed to create log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    debug!("Logging initialized with level: {}", log_level);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), WikiStatsError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = cli::exit_code(&e);
            e.print().ok();
            std::process::exit(code);
        }
    };

    // Load configuration before logging so the configured level applies
    let mut config = Config::load(cli.config_path())?;

    // CLI timeout overrides both file and environment
    if let Some(timeout) = cli.timeout {
        config.wikipedia.timeout_secs = timeout;
        config.validate()?;
    }

    init_logging(&config, &cli)?;

    info!("Starting wikistats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Endpoint template: {}", config.wikipedia.api_url);
    debug!("Request timeout: {}s", config.wikipedia.timeout_secs);

    print!("{}", report::fetching_notice(&cli.language_code));
    println!();

    let outcome = wikipedia::fetch_site_statistics(&config.wikipedia, &cli.language_code).await;
    match &outcome {
        Ok(stats) => info!("Fetched statistics for '{}'", stats.language_code),
        Err(e) => warn!("Fetch for '{}' failed: {}", cli.language_code, e),
    }

    // Fetch failures are part of the report, not the exit status
    print!("{}", report::render(&outcome));

    Ok(())
}
