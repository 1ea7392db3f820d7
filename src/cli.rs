use clap::{ArgAction, Parser};

use crate::config::Overrides;
use crate::session::Tab;

/// Look up Wikipedia summaries, images, and videos.
///
/// Text searches try Simple English Wikipedia first, then English Wikipedia,
/// then English Wikipedia with stopwords removed from the query.
#[derive(Parser, Debug)]
#[command(name = "wikiseek", version)]
pub struct Cli {
    /// Query to run once. Omit to start an interactive session.
    pub query: Option<String>,

    /// Result tab to show.
    #[arg(short, long, value_enum, default_value_t = Tab::Text)]
    pub tab: Tab,

    /// Print the raw result as JSON instead of rendered Markdown.
    #[arg(long)]
    pub json: bool,

    /// Simple English API endpoint [env: WIKISEEK_SIMPLE_ENDPOINT]
    #[arg(long, value_name = "URL")]
    pub simple_endpoint: Option<String>,

    /// English API endpoint [env: WIKISEEK_FULL_ENDPOINT]
    #[arg(long, value_name = "URL")]
    pub full_endpoint: Option<String>,

    /// Whole-request HTTP timeout in seconds [env: WIKISEEK_TIMEOUT_SECS]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            simple_endpoint: self.simple_endpoint.clone(),
            full_endpoint: self.full_endpoint.clone(),
            timeout_secs: self.timeout,
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
