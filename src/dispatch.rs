//! Stateless mapping from a selected operation to the work it performs.
//!
//! Nothing here remembers previous choices; the interactive menu and the
//! one-shot subcommands both build an [`OperationRequest`] and hand it to
//! [`crate::TaskMate::dispatch`].

use crate::error::{Result, TaskMateError};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    MoveFiles,
    ExtractEmails,
    ScrapeTitle,
    Exit,
}

impl Operation {
    /// Menu order.
    pub const ALL: [Operation; 4] = [
        Operation::MoveFiles,
        Operation::ExtractEmails,
        Operation::ScrapeTitle,
        Operation::Exit,
    ];

    pub fn from_choice(choice: &str) -> Result<Self> {
        let trimmed = choice.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.choice() == trimmed)
            .ok_or_else(|| TaskMateError::InvalidChoice {
                choice: trimmed.to_string(),
            })
    }

    pub fn choice(&self) -> &'static str {
        match self {
            Operation::MoveFiles => "1",
            Operation::ExtractEmails => "2",
            Operation::ScrapeTitle => "3",
            Operation::Exit => "4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::MoveFiles => "Move matching files from one folder to another",
            Operation::ExtractEmails => "Extract all email addresses from a text file",
            Operation::ScrapeTitle => "Scrape the title of a webpage and save it",
            Operation::Exit => "Exit",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.choice(), self.label())
    }
}

/// Everything one operation needs, gathered before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    MoveFiles {
        source: PathBuf,
        destination: PathBuf,
        dry_run: bool,
    },
    ExtractEmails {
        input: PathBuf,
        output: PathBuf,
    },
    ScrapeTitle {
        url: String,
        output: PathBuf,
    },
}

impl OperationRequest {
    pub fn operation(&self) -> Operation {
        match self {
            OperationRequest::MoveFiles { .. } => Operation::MoveFiles,
            OperationRequest::ExtractEmails { .. } => Operation::ExtractEmails,
            OperationRequest::ScrapeTitle { .. } => Operation::ScrapeTitle,
        }
    }
}
