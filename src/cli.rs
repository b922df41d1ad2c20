use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Exit status for usage errors and help requests
pub const USAGE_EXIT_CODE: i32 = 2;

const EXAMPLES: &str = "\
Examples:
  wikistats en          # English Wikipedia
  wikistats es          # Spanish Wikipedia
  wikistats fr          # French Wikipedia
  wikistats de          # German Wikipedia

Common language codes:
  en=English, es=Spanish, fr=French, de=German,
  zh=Chinese, ja=Japanese, ru=Russian, pt=Portuguese";

#[derive(Parser, Debug)]
#[command(name = "wikistats")]
#[command(about = "Count Wikipedia pages for a specific language")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Wikipedia language code (e.g., en, es, fr, de)
    pub language_code: String,

    /// Path to configuration file (can also be set via WIKISTATS_CONFIG env var)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Enable verbose logging (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Get config path from CLI arg or WIKISTATS_CONFIG environment variable
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var("WIKISTATS_CONFIG").ok().map(PathBuf::from))
    }
}

/// Exit status for an argument parsing outcome.
///
/// Help counts as a usage request and exits non-zero; only `--version` exits 0.
pub fn exit_code(error: &clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}
