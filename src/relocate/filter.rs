use crate::config::RelocateConfig;

/// Case-insensitive filename suffix filter (`IMG_01.JPG` matches `jpg`).
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new(config: &RelocateConfig) -> Self {
        let mut filter = Self {
            extensions: Vec::new(),
        };
        for extension in &config.extensions {
            filter.add_extension(extension.as_str());
        }
        filter
    }

    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self {
            extensions: Vec::new(),
        };
        for extension in extensions {
            filter.add_extension(extension);
        }
        filter
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let name_lower = file_name.to_lowercase();
        self.extensions.iter().any(|ext| {
            name_lower
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    pub fn add_extension<S: Into<String>>(&mut self, extension: S) {
        let ext = extension.into().trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !self.extensions.contains(&ext) {
            self.extensions.push(ext);
        }
    }

    pub fn remove_extension(&mut self, extension: &str) {
        let ext_lower = extension.trim_start_matches('.').to_lowercase();
        self.extensions.retain(|e| e != &ext_lower);
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(&RelocateConfig::default())
    }
}
