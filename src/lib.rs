pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod relocate;
pub mod sink;
pub mod text;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat};
pub use config::{CliOverrides, Config, FetchConfig, OutputConfig, RelocateConfig};
pub use dispatch::{Operation, OperationRequest};
pub use error::{Result, TaskMateError, UserFriendlyError};

// Core functionality re-exports
pub use fetch::{DocumentFetcher, HttpFetcher};
pub use relocate::{DirectoryEnumerator, ExtensionFilter, FileRelocator, RelocationProgress};
pub use sink::{
    EmailReport, OperationReport, RelocationReport, ReportBody, ResultSink, TitleRecord,
    TitleReport,
};
pub use text::{
    collect_emails, extract_field, extract_title, find_tokens, normalize, ExtractedField,
    MatchSet, TextToken,
};
pub use ui::{run_menu, GracefulShutdown, Menu, OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for TaskMate functionality
pub struct TaskMate {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl TaskMate {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// No signal handler and no progress bars.
    #[cfg(test)]
    pub fn new_for_test(config: Config) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(OutputMode::Plain, 0, true),
            progress_manager: ProgressManager::new(false),
            shutdown: GracefulShutdown::new_for_test(),
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
    }

    /// Runs exactly one operation. Holds no state between calls.
    pub async fn dispatch(&self, request: OperationRequest) -> Result<OperationReport> {
        self.shutdown.check_shutdown()?;
        log::debug!("Dispatching {:?}", request.operation());

        let body = match request {
            OperationRequest::MoveFiles {
                source,
                destination,
                dry_run,
            } => ReportBody::Relocation(self.relocate_files(&source, &destination, dry_run)?),
            OperationRequest::ExtractEmails { input, output } => {
                ReportBody::Emails(self.extract_emails(&input, &output)?)
            }
            OperationRequest::ScrapeTitle { url, output } => {
                ReportBody::Title(self.scrape_title(&url, &output).await?)
            }
        };

        Ok(OperationReport::new(body))
    }

    /// Moves files whose names end in a configured extension.
    pub fn relocate_files(
        &self,
        source: &Path,
        destination: &Path,
        dry_run: bool,
    ) -> Result<RelocationReport> {
        let relocator = FileRelocator::new(&self.config.relocate).with_dry_run(dry_run);
        let extensions = relocator.filter().extensions().to_vec();

        self.output_formatter.start_operation(&format!(
            "Moving .{} files from '{}' to '{}'",
            extensions.join(", ."),
            source.display(),
            destination.display()
        ));

        let total = relocator.plan(source)?.len();
        let file_progress = self.progress_manager.create_file_progress(total as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &RelocationProgress| {
                ui::progress::update_relocation_progress(&pb, progress);
            }
        };

        let result = relocator.relocate(
            source,
            destination,
            &self.shutdown,
            Some(&progress_callback),
        );

        let progress = match result {
            Ok(progress) => progress,
            Err(e) => {
                file_progress.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Processed {} files", progress.files_processed),
            progress.elapsed(),
        );

        Ok(RelocationReport::from_progress(
            source,
            destination,
            &extensions,
            &progress,
            dry_run,
        ))
    }

    /// Writes the unique, sorted email tokens of `input` to `output`.
    pub fn extract_emails(&self, input: &Path, output: &Path) -> Result<EmailReport> {
        self.output_formatter
            .start_operation(&format!("Extracting email addresses from '{}'", input.display()));

        if !input.is_file() {
            return Err(TaskMateError::PathNotFound {
                path: input.display().to_string(),
            });
        }

        let text = std::fs::read_to_string(input)?;
        let tokens = find_tokens(&text);
        let total_matches = tokens.len();
        let emails = normalize(tokens);
        log::info!(
            "{} matches, {} unique in {}",
            total_matches,
            emails.len(),
            input.display()
        );

        self.result_sink(output).write_lines(&emails)?;

        Ok(EmailReport {
            input: input.display().to_string(),
            output: output.display().to_string(),
            total_matches,
            emails,
        })
    }

    pub async fn scrape_title(&self, url: &str, output: &Path) -> Result<TitleReport> {
        let fetcher = HttpFetcher::new(&self.config.fetch)?;
        self.scrape_title_with(&fetcher, url, output).await
    }

    /// Fetches `url`, pulls out its `<title>` and writes the two-line record.
    pub async fn scrape_title_with<F: DocumentFetcher>(
        &self,
        fetcher: &F,
        url: &str,
        output: &Path,
    ) -> Result<TitleReport> {
        self.output_formatter
            .start_operation(&format!("Fetching title of {}", url));

        let spinner = self
            .progress_manager
            .create_spinner(&format!("Fetching {}", url));
        let body = match fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                spinner.abandon();
                return Err(e);
            }
        };
        spinner.finish_and_clear();

        let field = extract_title(&body);
        if !field.is_present() {
            log::info!("No <title> in {} bytes from {}", body.len(), url);
        }

        let record = TitleRecord::new(url, &field, &self.config.output.title_fallback);
        self.result_sink(output).write_record(&record)?;

        Ok(TitleReport {
            url: record.url,
            title: record.title,
            found: field.is_present(),
            output: output.display().to_string(),
        })
    }

    fn result_sink(&self, destination: &Path) -> ResultSink {
        ResultSink::new(destination).with_create_parent_dirs(self.config.output.create_parent_dirs)
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    pub fn reset_shutdown(&self) {
        self.shutdown.reset();
    }

    pub fn handle_error(&self, error: &TaskMateError) {
        self.progress_manager
            .suspend(|| self.output_formatter.print_user_friendly_error(error));
    }
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
