use crate::config::RelocateConfig;
use crate::error::{Result, TaskMateError};
use crate::relocate::{DirectoryEnumerator, ExtensionFilter, MoveOutcome};
use crate::ui::GracefulShutdown;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RelocationProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub bytes_moved: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub moved: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
}

impl RelocationProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            bytes_moved: 0,
            current_file: None,
            start_time: Instant::now(),
            moved: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn record_moved(&mut self, filename: &str, bytes: u64) {
        self.files_processed += 1;
        self.bytes_moved += bytes;
        self.current_file = Some(filename.to_string());
        self.moved.push(filename.to_string());
    }

    pub fn record_skipped<S: Into<String>>(&mut self, filename: &str, reason: S) {
        self.files_processed += 1;
        self.current_file = Some(filename.to_string());
        self.skipped.push(format!("{}: {}", filename, reason.into()));
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.files_processed += 1;
        self.errors.push(error.into());
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Moves every file of one directory whose name passes the extension
/// filter into another directory.
pub struct FileRelocator {
    enumerator: DirectoryEnumerator,
    filter: ExtensionFilter,
    create_destination: bool,
    dry_run: bool,
}

impl FileRelocator {
    pub fn new(config: &RelocateConfig) -> Self {
        Self {
            enumerator: DirectoryEnumerator::new().with_overwrite(config.overwrite),
            filter: ExtensionFilter::new(config),
            create_destination: config.create_destination,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    /// Files that would be moved out of `source`.
    pub fn plan(&self, source: &Path) -> Result<Vec<String>> {
        self.enumerator.list_matching(source, &self.filter)
    }

    pub fn relocate(
        &self,
        source: &Path,
        destination: &Path,
        shutdown: &GracefulShutdown,
        progress_callback: Option<&dyn Fn(&RelocationProgress)>,
    ) -> Result<RelocationProgress> {
        let candidates = self.plan(source)?;
        let mut progress = RelocationProgress::new(candidates.len());

        if self.dry_run {
            for name in &candidates {
                if self.enumerator.blocked_at(name, destination) {
                    progress.record_skipped(name, "already exists at destination");
                } else {
                    progress.record_moved(name, 0);
                }
            }
            return Ok(progress);
        }

        if DirectoryEnumerator::ensure_directory(destination, self.create_destination)? {
            log::info!("Destination folder did not exist, created {}", destination.display());
        }

        for name in &candidates {
            shutdown.check_shutdown()?;

            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            match self.enumerator.move_entry(source, name, destination) {
                Ok(MoveOutcome::Moved { bytes }) => progress.record_moved(name, bytes),
                Ok(MoveOutcome::AlreadyMoved) => progress.record_skipped(name, "already moved"),
                Err(TaskMateError::DestinationExists { .. }) => {
                    progress.record_skipped(name, "already exists at destination")
                }
                Err(e) => {
                    log::debug!("Failed to move {}: {}", name, e);
                    progress.add_error(format!("Failed to move {}: {}", name, e));
                }
            }
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        Ok(progress)
    }
}
