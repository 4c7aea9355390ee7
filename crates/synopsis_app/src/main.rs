mod platform;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use platform::app::{run_app, AppOptions};
use platform::logging::LogDestination;

/// Summarize a blog post and translate the summary to Urdu.
///
/// Sends the URL to the summary service and shows the three pipeline steps
/// (scraping, summarizing, translating) as they settle.
///
/// Examples:
///   synopsis https://example.com/post
///   synopsis --translation https://example.com/post
///   synopsis --endpoint http://localhost:8000/api/summarize
///   synopsis            (interactive prompt)
#[derive(Parser)]
#[command(name = "synopsis", version, about, long_about = None)]
struct Cli {
    /// Blog post URL. Starts an interactive prompt when omitted.
    url: Option<String>,

    /// Summary service endpoint. Overrides the config file.
    #[arg(long, env = "SYNOPSIS_ENDPOINT")]
    endpoint: Option<String>,

    /// Config file (RON). Defaults to ./synopsis.ron when present.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Show the Urdu translation along with the summary.
    #[arg(long, short = 't')]
    translation: bool,

    /// Where log output goes.
    #[arg(long, value_enum)]
    log: Option<LogDestination>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match platform::config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(2);
        }
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(destination) = cli.log {
        config.log.destination = destination;
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }

    platform::logging::initialize(&config.log);

    let options = AppOptions {
        url: cli.url,
        show_translation: cli.translation,
        settings: config.client_settings(),
    };

    match run_app(options) {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}
