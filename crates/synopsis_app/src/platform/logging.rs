//! Platform logging initialization for the synopsis binary.
//!
//! Terminal output goes to stderr so it never interleaves with the rendered
//! pipeline on stdout.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use super::config::LogConfig;

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum LogDestination {
    /// Write to stderr.
    #[default]
    Terminal,
    /// Write to the configured log file.
    File,
    /// Write to both file and stderr.
    Both,
}

/// Initialize the global logger from the `log` section of the config.
pub fn initialize(config: &LogConfig) {
    let level = match synopsis_logging::parse_level(&config.level) {
        Some(level) => level,
        None => {
            eprintln!(
                "Warning: unknown log level {:?}, using warn",
                config.level
            );
            LevelFilter::Warn
        }
    };

    let logger_config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match config.destination {
        LogDestination::File => match create_file_logger(level, logger_config, &config.file) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![create_term_logger(level, logger_config)],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> =
                vec![create_term_logger(level, logger_config.clone())];
            if let Some(file_logger) = create_file_logger(level, logger_config, &config.file) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_term_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
