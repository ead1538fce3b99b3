//! Command line argument parsing

use crate::config::AppConfig;
use crate::core::RunRequest;
use crate::error::LinksError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const LONG_ABOUT: &str = "Gets direct links for DMAX and Discovery series.

You need the showId of the show you want to get the links for. Check the
show's HTML source code (search for 'showId') to find it.";

/// Resolve DMAX, HGTV and TLC shows into direct playback links
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Args {
    /// showId of the series (check HTML page code)
    #[arg(value_name = "SHOW_ID")]
    pub show_id: u64,

    /// Site to fetch from: dmaxde, hgtv or tlcde (default: dmaxde)
    #[arg(short, long, value_name = "REALM")]
    pub realm: Option<String>,

    /// Season to get (0 = all)
    #[arg(short, long, default_value = "0")]
    pub season: u32,

    /// Episode of season to get (0 = all), season must be set
    #[arg(short, long, default_value = "0")]
    pub episode: u32,

    /// Directory the spreadsheet is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Program used in the generated download commands
    #[arg(long, value_name = "PROGRAM", default_value = "youtube-dl")]
    pub downloader: String,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Override the API host for all requests
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Layer the flags over the default configuration
    pub fn to_config(&self) -> AppConfig {
        let mut config = AppConfig::new()
            .with_timeout(self.timeout_duration())
            .with_downloader(&self.downloader)
            .with_output_dir(&self.output_dir);

        if let Some(base) = &self.api_base {
            config = config.with_base_url(base);
        }

        config
    }

    /// Validate show, realm and selection against `config`
    pub fn to_request(&self, config: &AppConfig) -> Result<RunRequest, LinksError> {
        let realm = match &self.realm {
            Some(realm) => realm.as_str(),
            None => config.default_realm().ok_or_else(|| {
                LinksError::InvalidArgument("no realms configured".to_string())
            })?,
        };

        RunRequest::new(self.show_id, realm, self.season, self.episode, config)
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal, with progress bar
    Normal,
    /// Verbose (debug logs, no progress bar)
    Verbose,
}

impl VerbosityLevel {
    /// Log filter used when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

// Implement Default for Args to make tests work
impl Default for Args {
    fn default() -> Self {
        Self {
            show_id: 0,
            realm: None,
            season: 0,
            episode: 0,
            output_dir: PathBuf::from("."),
            downloader: "youtube-dl".to_string(),
            timeout: humantime::Duration::from(Duration::from_secs(30)),
            api_base: None,
            verbose: false,
            quiet: false,
        }
    }
}
