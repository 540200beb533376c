//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::format::FormatMode;

/// A template argument that is either a filesystem path or the stdin
/// sentinel `"-"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

impl PathOrStdin {
    /// Label used in error messages: the path, or `-` for stdin.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` writes plain text to stdout and colored diagnostics to stderr.
/// `Json` writes JSON to stdout and NDJSON diagnostics to stderr.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

impl OutputFormat {
    /// The formatter mode for diagnostics.
    pub fn mode(self) -> FormatMode {
        match self {
            Self::Human => FormatMode::Human,
            Self::Json => FormatMode::Json,
        }
    }
}

/// Arguments of `quotegen export`.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Path to the template workbook, or `-` for stdin.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathOrStdin,
    /// Company name as listed in the `Data Base` sheet.
    #[arg(long)]
    pub company: String,
    /// Job file identifier, e.g. `HCMBKK0425` (upper-cased).
    #[arg(long)]
    pub job: String,
    /// Commodity description.
    #[arg(long, default_value = "")]
    pub commodity: String,
    /// Estimated volume, e.g. `1x40HC`.
    #[arg(long, default_value = "")]
    pub volume: String,
    /// Estimated time of departure, `YYYY-MM-DD` or `DD/MM/YYYY` (default: --date).
    #[arg(long, value_name = "DATE")]
    pub etd: Option<String>,
    /// Contact person.
    #[arg(long, default_value = "")]
    pub attn: String,
    /// Contact telephone.
    #[arg(long, default_value = "")]
    pub tel: String,
    /// Reference (SOP) number.
    #[arg(long, default_value = "")]
    pub sop: String,
    /// Quotation creation date, `YYYY-MM-DD` or `DD/MM/YYYY` (default: today).
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
    /// Edited route-sheet grid (JSON array of rows) written over the route-key sheet.
    #[arg(long, value_name = "FILE")]
    pub grid: Option<PathBuf>,
    /// Keep every sheet when the job has no route-key sheet.
    #[arg(long)]
    pub keep_reference_sheets: bool,
    /// Directory the workbook is written to.
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// All top-level subcommands exposed by the `quotegen` binary.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the companies in the template directory.
    Companies {
        /// Path to the template workbook, or `-` for stdin.
        #[arg(value_name = "TEMPLATE")]
        template: PathOrStdin,
    },

    /// Show the line items a company and job map to.
    Map {
        /// Path to the template workbook, or `-` for stdin.
        #[arg(value_name = "TEMPLATE")]
        template: PathOrStdin,
        /// Company name as listed in the `Data Base` sheet.
        #[arg(long)]
        company: String,
        /// Job file identifier, e.g. `HCMBKK0425`.
        #[arg(long)]
        job: String,
    },

    /// Dump the route-key sheet for a job as an editable JSON grid.
    Preview {
        /// Path to the template workbook, or `-` for stdin.
        #[arg(value_name = "TEMPLATE")]
        template: PathOrStdin,
        /// Job file identifier, e.g. `HCMBKK0425`.
        #[arg(long)]
        job: String,
        /// Write the grid to this file instead of stdout.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate the quotation workbook.
    Export(ExportArgs),
}

/// Root CLI struct for the `quotegen` binary.
///
/// All global flags are marked `global = true` so that clap propagates them
/// to every subcommand.
#[derive(Parser, Debug)]
#[command(
    name = "quotegen",
    version,
    about = "Freight quotation generator",
    long_about = "Fills a freight quotation form from an Excel template.\n\
                  Looks companies up in the template directory, maps routes\n\
                  onto line items, and exports the finished quotation."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Add timing lines to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum template size in bytes.
    ///
    /// Can also be set via the `QUOTEGEN_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 67108864 (64 MB).
    #[arg(
        long,
        global = true,
        env = "QUOTEGEN_MAX_FILE_SIZE",
        default_value = "67108864"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// The `NO_COLOR` environment variable (any value, per
    /// <https://no-color.org>) is honored by the formatter as well.
    #[arg(long, global = true)]
    pub no_color: bool,
}
