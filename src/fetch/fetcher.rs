use crate::config::FetchConfig;
use crate::error::{Result, TaskMateError};
use std::time::Duration;
use url::Url;

/// Source of document bodies for title scraping.
#[allow(async_fn_in_trait)]
pub trait DocumentFetcher {
    async fn fetch(&self, locator: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| TaskMateError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_error(&self, error: reqwest::Error) -> TaskMateError {
        if error.is_timeout() {
            TaskMateError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            TaskMateError::from(error)
        }
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> Result<String> {
        let url = parse_locator(locator)?;
        log::debug!("GET {} (timeout {:?})", url, self.timeout);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?
            .error_for_status()
            .map_err(|e| self.map_error(e))?;

        log::debug!("{} answered {}", locator, response.status());

        response.text().await.map_err(|e| self.map_error(e))
    }
}

/// Checks that `s` is an absolute http(s) URL with a host.
pub fn validate_locator(s: &str) -> std::result::Result<String, String> {
    let url = Url::parse(s.trim())
        .map_err(|_| "Invalid URL format. Please provide a full URL (e.g., https://www.example.com).".to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("Unsupported scheme '{}': only http and https are allowed", other)),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err("URL must include a valid hostname".to_string());
    }

    Ok(s.trim().to_string())
}

pub fn parse_locator(s: &str) -> Result<Url> {
    let checked = validate_locator(s).map_err(|reason| TaskMateError::InvalidUrl {
        url: s.to_string(),
        reason,
    })?;
    Ok(Url::parse(&checked)?)
}
