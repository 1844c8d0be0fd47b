//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Tidewatch - watch the Statstidende gazette for tracked entities.
#[derive(Debug, Parser)]
#[command(name = "tidewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

/// Process-level settings, all overridable from the environment.
#[derive(Debug, Parser)]
pub struct Settings {
    /// Entities to track, comma-separated (names, CPR/CVR numbers, addresses)
    #[arg(long, env = "TIDEWATCH_ENTITIES", value_delimiter = ',')]
    pub entities: Vec<String>,

    /// Use the canned stub extractor instead of a live provider
    #[arg(
        long,
        env = "TIDEWATCH_STUB_MODE",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub stub_mode: bool,

    /// Directory incoming .eml messages are delivered to
    #[arg(long, env = "TIDEWATCH_SPOOL_DIR", default_value = "spool")]
    pub spool_dir: PathBuf,

    /// Directory rendered report mails are written to
    #[arg(long, env = "TIDEWATCH_OUTBOX_DIR", default_value = "outbox")]
    pub outbox_dir: PathBuf,

    /// OpenAI API key (required unless stub mode is on)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Model to request from the provider
    #[arg(long, env = "TIDEWATCH_MODEL")]
    pub model: Option<String>,

    /// Outer attempts for a processing run
    #[arg(long, env = "TIDEWATCH_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: u32,

    /// Delay between outer attempts, in seconds
    #[arg(long, env = "TIDEWATCH_ATTEMPT_DELAY_SECS", default_value_t = 300)]
    pub attempt_delay_secs: u64,

    /// Mailbox scan interval for watch mode, in seconds
    #[arg(long, env = "TIDEWATCH_SCAN_INTERVAL_SECS", default_value_t = 3600)]
    pub scan_interval_secs: u64,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process the mailbox once and send the report
    Run,

    /// Scan the mailbox on a schedule until interrupted
    Watch,

    /// Analyze a local PDF file and print the findings
    Analyze(AnalyzeArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Path to the PDF file
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_mode_defaults_on() {
        let cli = Cli::parse_from(["tidewatch", "--entities", "Danske Bank", "run"]);
        assert!(cli.settings.stub_mode);
    }

    #[test]
    fn test_entities_are_comma_separated() {
        let cli = Cli::parse_from([
            "tidewatch",
            "--entities",
            "Danske Bank,060541-0146",
            "run",
        ]);
        assert_eq!(
            cli.settings.entities,
            vec!["Danske Bank".to_string(), "060541-0146".to_string()]
        );
    }

    #[test]
    fn test_stub_mode_can_be_disabled() {
        let cli = Cli::parse_from([
            "tidewatch",
            "--entities",
            "Danske Bank",
            "--stub-mode",
            "false",
            "run",
        ]);
        assert!(!cli.settings.stub_mode);
    }

    #[test]
    fn test_analyze_takes_a_file() {
        let cli = Cli::parse_from(["tidewatch", "analyze", "notice.pdf"]);
        match cli.command {
            Command::Analyze(args) => assert_eq!(args.file, PathBuf::from("notice.pdf")),
            other => panic!("expected analyze, got {other:?}"),
        }
    }
}
