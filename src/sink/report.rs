use crate::relocate::RelocationProgress;
use crate::text::MatchSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationReport {
    pub source: String,
    pub destination: String,
    pub extensions: Vec<String>,
    pub moved: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
    pub bytes_moved: u64,
    pub dry_run: bool,
    pub duration: Duration,
}

impl RelocationReport {
    pub fn from_progress(
        source: &Path,
        destination: &Path,
        extensions: &[String],
        progress: &RelocationProgress,
        dry_run: bool,
    ) -> Self {
        Self {
            source: source.display().to_string(),
            destination: destination.display().to_string(),
            extensions: extensions.to_vec(),
            moved: progress.moved.clone(),
            skipped: progress.skipped.clone(),
            errors: progress.errors.clone(),
            bytes_moved: progress.bytes_moved,
            dry_run,
            duration: progress.elapsed(),
        }
    }

    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "Would move" } else { "Moved" };
        format!(
            "{} {} file(s) from '{}' to '{}'.",
            verb,
            self.moved.len(),
            self.source,
            self.destination
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReport {
    pub input: String,
    pub output: String,
    pub total_matches: usize,
    pub emails: MatchSet,
}

impl EmailReport {
    pub fn summary(&self) -> String {
        format!(
            "Found {} unique email(s). Saved to '{}'.",
            self.emails.len(),
            self.output
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleReport {
    pub url: String,
    pub title: String,
    pub found: bool,
    pub output: String,
}

impl TitleReport {
    pub fn summary(&self) -> String {
        format!("Page title saved to '{}'.", self.output)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ReportBody {
    Relocation(RelocationReport),
    Emails(EmailReport),
    Title(TitleReport),
}

/// Result of one dispatched operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationReport {
    #[serde(flatten)]
    pub body: ReportBody,
    pub completed_at: DateTime<Utc>,
}

impl OperationReport {
    pub fn new(body: ReportBody) -> Self {
        Self {
            body,
            completed_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        match &self.body {
            ReportBody::Relocation(report) => report.summary(),
            ReportBody::Emails(report) => report.summary(),
            ReportBody::Title(report) => report.summary(),
        }
    }

    /// Non-fatal problems collected while the operation ran.
    pub fn warnings(&self) -> &[String] {
        match &self.body {
            ReportBody::Relocation(report) => &report.errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    #[test]
    fn test_relocation_summary() {
        let mut progress = RelocationProgress::new(2);
        progress.record_moved("a.jpg", 3);
        progress.record_moved("b.jpg", 4);

        let report = RelocationReport::from_progress(
            Path::new("/src"),
            Path::new("/dst"),
            &["jpg".to_string()],
            &progress,
            false,
        );

        assert_eq!(report.bytes_moved, 7);
        assert_eq!(report.summary(), "Moved 2 file(s) from '/src' to '/dst'.");

        let dry = RelocationReport { dry_run: true, ..report };
        assert!(dry.summary().starts_with("Would move 2"));
    }

    #[test]
    fn test_email_summary() {
        let report = EmailReport {
            input: "in.txt".to_string(),
            output: "out.txt".to_string(),
            total_matches: 3,
            emails: normalize(["a@b.co", "a@b.co", "A@B.CO"]),
        };
        assert_eq!(report.summary(), "Found 2 unique email(s). Saved to 'out.txt'.");
    }

    #[test]
    fn test_report_json_is_tagged() {
        let report = OperationReport::new(ReportBody::Title(TitleReport {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            found: true,
            output: "t.txt".to_string(),
        }));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["operation"], "title");
        assert_eq!(value["title"], "Example");
        assert!(value["completed_at"].is_string());
        assert!(report.warnings().is_empty());
    }
}
