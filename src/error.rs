use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskMateError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network error occurred: {message}")]
    NetworkError { message: String },

    #[error("Operation timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: String },

    #[error("Invalid choice: {choice}")]
    InvalidChoice { choice: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

impl TaskMateError {
    /// Process exit code reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskMateError::Cancelled => 130, // Interrupted (SIGINT)
            TaskMateError::InvalidUrl { .. } | TaskMateError::InvalidChoice { .. } => 2,
            TaskMateError::PathNotFound { .. } | TaskMateError::NotADirectory { .. } => 3,
            TaskMateError::NetworkError { .. } => 5,
            TaskMateError::HttpStatus { .. } => 6,
            TaskMateError::DestinationExists { .. } => 8,
            TaskMateError::Timeout { .. } => 9,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for TaskMateError {
    fn user_message(&self) -> String {
        match self {
            TaskMateError::PathNotFound { path } => {
                format!("Path does not exist: {}", path)
            }
            TaskMateError::NotADirectory { path } => {
                format!("Expected a directory but found a file: {}", path)
            }
            TaskMateError::InvalidUrl { url, reason } => {
                format!("Invalid URL '{}': {}", url, reason)
            }
            TaskMateError::NetworkError { message } => {
                format!("Error fetching the page: {}", message)
            }
            TaskMateError::HttpStatus { status, url } => {
                format!("Error fetching the page: HTTP {} from {}", status, url)
            }
            TaskMateError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            TaskMateError::DestinationExists { path } => {
                format!("Destination already exists: {}", path)
            }
            TaskMateError::InvalidChoice { .. } => "Invalid choice. Please enter 1-4.".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            TaskMateError::PathNotFound { .. } => Some(
                "Check the path for typos and make sure it exists before running the task.".to_string()
            ),
            TaskMateError::NotADirectory { .. } => Some(
                "Pass a folder path rather than a file path.".to_string()
            ),
            TaskMateError::InvalidUrl { .. } => Some(
                "Use a full http or https URL (e.g., https://www.example.com).".to_string()
            ),
            TaskMateError::NetworkError { .. } => Some(
                "Check your internet connection and try again.".to_string()
            ),
            TaskMateError::HttpStatus { .. } => Some(
                "The server rejected the request. Verify the URL points to a public page.".to_string()
            ),
            TaskMateError::Timeout { .. } => Some(
                "The server took too long to answer. Try again or raise the limit with --timeout.".to_string()
            ),
            TaskMateError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            TaskMateError::DestinationExists { .. } => Some(
                "Remove the existing file or rerun with --overwrite.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<url::ParseError> for TaskMateError {
    fn from(error: url::ParseError) -> Self {
        TaskMateError::InvalidUrl {
            url: "invalid URL".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for TaskMateError {
    fn from(error: toml::de::Error) -> Self {
        TaskMateError::Config {
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for TaskMateError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return TaskMateError::HttpStatus {
                status: status.as_u16(),
                url: error
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            };
        }

        TaskMateError::NetworkError {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskMateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = TaskMateError::PathNotFound {
            path: "/no/such/dir".to_string(),
        };
        assert!(error.user_message().contains("/no/such/dir"));
        assert!(error.suggestion().is_some());

        let error = TaskMateError::InvalidChoice {
            choice: "7".to_string(),
        };
        assert_eq!(error.user_message(), "Invalid choice. Please enter 1-4.");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(TaskMateError::Cancelled.exit_code(), 130);
        assert_eq!(TaskMateError::Timeout { seconds: 10 }.exit_code(), 9);
        assert_eq!(
            TaskMateError::PathNotFound {
                path: "x".to_string()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            TaskMateError::Config {
                message: "bad".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let parse_error = url::Url::parse("not a url").unwrap_err();
        let error = TaskMateError::from(parse_error);
        assert!(matches!(error, TaskMateError::InvalidUrl { .. }));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = TaskMateError::from(toml_error);
        assert!(matches!(error, TaskMateError::Config { .. }));
    }
}
