//! CLI argument definitions for the examination generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use examgen_report::Notation;

#[derive(Parser)]
#[command(
    name = "examgen",
    version,
    about = "Generate randomized examinations from a specification file",
    long_about = "Generate one randomized examination per course section.\n\n\
                  Every examination is written twice: a learner-facing copy and a\n\
                  solutions copy. Supports LaTeX (exam class) and Moodle XML outputs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow question and answer text to appear in logs.
    ///
    /// Examination content is redacted by default so that log files can be
    /// shared before the examination is sat.
    #[arg(long = "log-content", global = true)]
    pub log_content: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate examinations and solutions from a specification file.
    Generate(GenerateArgs),

    /// List the supported output notations.
    Notations,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Specification file (.json or .toml).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT stem>-output next to the input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output notation; repeat to render several.
    #[arg(
        long = "notation",
        value_name = "NOTATION",
        default_value = "latex-midterm"
    )]
    pub notations: Vec<Notation>,

    /// Seed for question selection and scrambling (random when omitted).
    #[arg(long = "seed", allow_hyphen_values = true)]
    pub seed: Option<i64>,

    /// Questions per examination (default: every question).
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Run pdflatex over the generated LaTeX files.
    #[arg(long = "typeset")]
    pub typeset: bool,

    /// Render everything without writing files.
    #[arg(long = "dry-run", conflicts_with = "typeset")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn notations_repeat_and_default() {
        let cli = Cli::parse_from(["examgen", "generate", "exam.toml"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.notations, vec![Notation::LatexMidterm]);
        assert!(args.seed.is_none());

        let cli = Cli::parse_from([
            "examgen",
            "generate",
            "exam.toml",
            "--notation",
            "latex-quiz",
            "--notation",
            "moodle-xml",
            "--seed",
            "-7",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.notations, vec![Notation::LatexQuiz, Notation::MoodleXml]);
        assert_eq!(args.seed, Some(-7));
    }
}
