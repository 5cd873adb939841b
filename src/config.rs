use crate::error::{Result, TaskMateError};
use crate::text::NO_TITLE_FALLBACK;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub relocate: RelocateConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelocateConfig {
    pub extensions: Vec<String>,
    pub create_destination: bool,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout: u64,
    pub user_agent: String,
    pub max_redirects: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub title_fallback: String,
    pub create_parent_dirs: bool,
}

impl Default for RelocateConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string()],
            create_destination: true,
            overwrite: false,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: format!("taskmate/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title_fallback: NO_TITLE_FALLBACK.to_string(),
            create_parent_dirs: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TaskMateError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TaskMateError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| TaskMateError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["taskmate.toml", ".taskmate.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref extensions) = cli_args.extensions {
            self.relocate.extensions = extensions
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(overwrite) = cli_args.overwrite {
            self.relocate.overwrite = overwrite;
        }

        if let Some(timeout) = cli_args.timeout {
            self.fetch.timeout = timeout;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| TaskMateError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| TaskMateError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.relocate.extensions.is_empty() {
            return Err(TaskMateError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        if self.relocate.extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(TaskMateError::Config {
                message: "File extensions cannot be blank".to_string(),
            });
        }

        if self.fetch.timeout == 0 {
            return Err(TaskMateError::Config {
                message: "Fetch timeout must be greater than 0".to_string(),
            });
        }

        if self.output.title_fallback.is_empty() {
            return Err(TaskMateError::Config {
                message: "Title fallback text cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub extensions: Option<String>,
    pub overwrite: Option<bool>,
    pub timeout: Option<u64>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_overwrite(mut self, overwrite: Option<bool>) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }
}
