//! Demographic column classifier CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use demog_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_classify, run_explain, run_keywords};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Classify(args) => run_classify(args),
        Command::Keywords(args) => run_keywords(args),
        Command::Explain(args) => run_explain(args),
    };
    if let Err(error) = outcome {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_timestamps = cli.log_timestamps || cli.log_file.is_some();
    config.with_target = config.level_filter >= LevelFilter::DEBUG;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_follow_flag_or_log_file() {
        let cli = Cli::parse_from(["demog-classify", "keywords"]);
        assert!(!log_config_from_cli(&cli).with_timestamps);

        let cli = Cli::parse_from(["demog-classify", "keywords", "--log-timestamps"]);
        assert!(log_config_from_cli(&cli).with_timestamps);

        let cli = Cli::parse_from(["demog-classify", "--log-file", "run.log", "keywords"]);
        let config = log_config_from_cli(&cli);
        assert!(config.with_timestamps);
        assert!(!config.with_ansi);
    }

    #[test]
    fn explicit_log_level_disables_env_filter() {
        let cli = Cli::parse_from(["demog-classify", "--log-level", "debug", "keywords"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
        assert!(config.with_target);

        let cli = Cli::parse_from(["demog-classify", "keywords"]);
        assert!(!log_config_from_cli(&cli).with_target);
    }
}
