//! CLI argument definitions for the configuration editor.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use swerve_cli::logging::{LogConfig, LogFormat};
use swerve_model::DocumentName;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "swerve-config",
    version,
    about = "Swerve drive configuration editor - convert forms to JSON and back",
    long_about = "Encode swerve drive configuration forms into JSON documents,\n\
                  package them as a zip archive, and import archives back into forms.\n\n\
                  Forms are read from a JSON forms file mapping each form name to its fields."
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
}

impl Cli {
    /// Logging setup implied by the global flags.
    ///
    /// `RUST_LOG` only applies when neither `--log-level` nor `-v`/`-q` is
    /// given. Log files get timestamps and never get colors.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let level = explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter());
        let to_file = self.log_file.is_some();
        let ansi = !to_file
            && match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => io::stderr().is_terminal(),
            };
        LogConfig::default()
            .with_level_filter(level)
            .with_env_filter(explicit.is_none() && !self.verbosity.is_present())
            .with_format(self.log_format.into())
            .with_timestamps(to_file)
            .with_ansi(ansi)
            .with_log_file(self.log_file.clone())
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the JSON text encoded from the forms.
    Encode(EncodeArgs),

    /// Package all documents into a zip archive.
    Export(ExportArgs),

    /// Import a zip archive into the forms.
    Import(ImportArgs),

    /// Decode reference documents into the forms and check every field.
    Verify(VerifyArgs),

    /// List the configuration documents and their archive paths.
    Documents,
}

#[derive(Parser)]
pub struct EncodeArgs {
    /// Forms file (JSON object of form name to field list).
    #[arg(value_name = "FORMS")]
    pub forms: PathBuf,

    /// Only print this document.
    #[arg(long = "document", value_name = "NAME")]
    pub document: Option<DocumentName>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Forms file (JSON object of form name to field list).
    #[arg(value_name = "FORMS")]
    pub forms: PathBuf,

    /// Archive to write (default: "YAGSL Config.zip" in the current directory).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Store entries without compression.
    #[arg(long = "no-compress")]
    pub no_compress: bool,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Forms file to update.
    #[arg(value_name = "FORMS")]
    pub forms: PathBuf,

    /// Zip archive to import.
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Write the updated forms here instead of overwriting FORMS.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VerifyArgs {
    /// Forms file describing the form fields.
    #[arg(value_name = "FORMS")]
    pub forms: PathBuf,

    /// Directory holding an extracted `swerve/` configuration.
    #[arg(value_name = "DIR")]
    pub reference_dir: PathBuf,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
