//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use clarity_core::{AcademicLevel, ExportFormat, SummaryMode, Theme};

/// Turn readable page text into study summaries.
///
/// Clarity extracts the main text of a web page, PDF, or piped document and
/// renders a quick summary, key concepts, a study guide, or exam prep at a
/// chosen academic level.
#[derive(Parser, Debug)]
#[command(name = "clarity")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize a URL, file, or stdin (AI first when configured, local fallback)
    Summarize(SummarizeArgs),

    /// Run the local summarizer over stdin; never uses the network
    Local(ModeLevelArgs),

    /// Browse, search, export, or clear saved summaries
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Show or change the display theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Mode and level selection shared by summarizing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ModeLevelArgs {
    /// Summary style: quick, study, concepts, exam
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<SummaryMode>,

    /// Audience: high-school, undergraduate, graduate
    #[arg(short, long, value_parser = parse_level)]
    pub level: Option<AcademicLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Page to summarize (http, https, or file URL)
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Local HTML, PDF, or text file to summarize
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub selection: ModeLevelArgs,

    /// Skip the AI provider even if one is configured
    #[arg(long)]
    pub local_only: bool,

    /// Save the result to history
    #[arg(long)]
    pub save: bool,

    /// Also write an export file in this format
    #[arg(long, value_name = "FORMAT", value_parser = parse_export_format)]
    pub export: Option<ExportFormat>,

    /// Export destination (defaults to clarity-study-<millis>.<ext>)
    #[arg(short, long, value_name = "PATH", requires = "export")]
    pub output: Option<PathBuf>,

    /// Print the summary as HTML instead of markdown
    #[arg(long)]
    pub html: bool,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved summaries, newest first
    List,
    /// Print one saved summary
    Show {
        /// History entry id
        id: i64,
    },
    /// Search titles and summaries
    Search {
        /// Search text (exact, substring, or fuzzy match)
        query: String,
    },
    /// Delete all saved summaries
    Clear,
    /// Export one saved summary to a file
    Export {
        /// History entry id
        id: i64,

        /// Export format: html, json, text
        #[arg(long, default_value = "html", value_parser = parse_export_format)]
        format: ExportFormat,

        /// Destination (defaults to clarity-study-<millis>.<ext>)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeCommand {
    /// Print the current theme
    Show,
    /// Set the theme
    Set {
        /// dark or light
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
    /// Switch between dark and light
    Toggle,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Print effective configuration values
    Show,
}

fn parse_mode(value: &str) -> Result<SummaryMode, String> {
    value.parse()
}

fn parse_level(value: &str) -> Result<AcademicLevel, String> {
    value.parse()
}

fn parse_export_format(value: &str) -> Result<ExportFormat, String> {
    value.parse()
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_summarize_defaults() {
        let cli = Cli::try_parse_from(["clarity", "summarize"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        let Command::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert!(args.url.is_none());
        assert!(args.file.is_none());
        assert!(args.selection.mode.is_none());
        assert!(!args.local_only);
        assert!(!args.save);
        assert!(args.export.is_none());
    }

    #[test]
    fn test_cli_summarize_mode_and_level() {
        let cli = Cli::try_parse_from([
            "clarity",
            "summarize",
            "--url",
            "https://example.com",
            "--mode",
            "exam",
            "--level",
            "graduate",
        ])
        .unwrap();
        let Command::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.url.as_deref(), Some("https://example.com"));
        assert_eq!(args.selection.mode, Some(SummaryMode::Exam));
        assert_eq!(args.selection.level, Some(AcademicLevel::Graduate));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["clarity", "local", "--mode", "poem"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_url_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "clarity",
            "summarize",
            "--url",
            "https://example.com",
            "--file",
            "page.html",
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_cli_output_requires_export() {
        let result = Cli::try_parse_from(["clarity", "summarize", "--output", "out.html"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["clarity", "local", "-vv", "--config", "c.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_cli_history_export_default_format() {
        let cli = Cli::try_parse_from(["clarity", "history", "export", "7"]).unwrap();
        let Command::History {
            command: HistoryCommand::Export { id, format, output },
        } = cli.command
        else {
            panic!("expected history export");
        };
        assert_eq!(id, 7);
        assert_eq!(format, ExportFormat::Html);
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_theme_without_subcommand() {
        let cli = Cli::try_parse_from(["clarity", "theme"]).unwrap();
        assert!(matches!(cli.command, Command::Theme { command: None }));
    }

    #[test]
    fn test_cli_theme_set_parses_value() {
        let cli = Cli::try_parse_from(["clarity", "theme", "set", "light"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme {
                command: Some(ThemeCommand::Set { theme: Theme::Light })
            }
        ));
    }
}
