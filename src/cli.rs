use crate::config::{CliOverrides, Config};
use crate::dispatch::OperationRequest;
use crate::error::Result;
use crate::fetch::validate_locator;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskmate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Automate small chores: move files, extract emails, scrape page titles")]
#[command(
    long_about = "TaskMate bundles three small utilities: relocate files by extension, \
                  collect every unique email address from a text file, and save the \
                  title of a web page. Run without a command for the interactive menu."
)]
#[command(before_help = "🧰 TaskMate - Task Automation Tool")]
#[command(after_help = "EXAMPLES:\n  \
    taskmate\n  \
    taskmate move ~/Downloads ~/Pictures/jpgs\n  \
    taskmate move ./camera ./raw --ext jpg,jpeg,png --dry-run\n  \
    taskmate emails contacts.txt emails.txt\n  \
    taskmate title https://www.example.com title.txt --timeout 5")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move files with matching extensions from one folder to another
    Move {
        /// Folder to take files from
        source: PathBuf,

        /// Folder to move files into (created when missing)
        destination: PathBuf,

        /// Extensions to move (comma-separated, default: jpg)
        #[arg(short, long)]
        ext: Option<String>,

        /// Replace files that already exist at the destination
        #[arg(long)]
        overwrite: bool,

        /// Show what would be moved without moving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract every unique email address from a text file
    Emails {
        /// Text file to scan
        input: PathBuf,

        /// File to write the sorted addresses to
        output: PathBuf,
    },

    /// Save the title of a web page
    Title {
        /// Page URL (http or https)
        #[arg(value_parser = validate_locator)]
        url: String,

        /// File to write the URL and title to
        output: PathBuf,

        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Interactive menu (default)
    Menu,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        match &self.command {
            Some(Command::Move { ext, overwrite, .. }) => CliOverrides::new()
                .with_extensions(ext.clone())
                .with_overwrite(overwrite.then_some(true)),
            Some(Command::Title { timeout, .. }) => CliOverrides::new().with_timeout(*timeout),
            _ => CliOverrides::new(),
        }
    }

    /// One-shot request for the chosen subcommand; `None` means the menu.
    pub fn request(&self) -> Option<OperationRequest> {
        match self.command.clone()? {
            Command::Move {
                source,
                destination,
                dry_run,
                ..
            } => Some(OperationRequest::MoveFiles {
                source,
                destination,
                dry_run,
            }),
            Command::Emails { input, output } => {
                Some(OperationRequest::ExtractEmails { input, output })
            }
            Command::Title { url, output, .. } => Some(OperationRequest::ScrapeTitle { url, output }),
            Command::Menu => None,
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default `env_logger` filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
