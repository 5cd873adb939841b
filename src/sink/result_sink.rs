use crate::error::Result;
use crate::text::ExtractedField;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Locator plus the title found there (or the fallback literal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRecord {
    pub url: String,
    pub title: String,
}

impl TitleRecord {
    pub fn new(url: &str, field: &ExtractedField, fallback: &str) -> Self {
        Self {
            url: url.to_string(),
            title: field.or_fallback(fallback),
        }
    }

    pub fn render(&self) -> String {
        format!("URL: {}\nTitle: {}\n", self.url, self.title)
    }
}

/// Writes operation results to a destination file, replacing it.
pub struct ResultSink {
    destination: PathBuf,
    create_parent_dirs: bool,
}

impl ResultSink {
    pub fn new<P: Into<PathBuf>>(destination: P) -> Self {
        Self {
            destination: destination.into(),
            create_parent_dirs: true,
        }
    }

    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// One value per line, each terminated by `\n`. Returns bytes written.
    pub fn write_lines<I, S>(&self, lines: I) -> Result<u64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut writer = BufWriter::new(self.create_file()?);
        let mut written = 0u64;

        for line in lines {
            let line = line.as_ref();
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
            written += line.len() as u64 + 1;
        }

        writer.flush()?;
        log::debug!("Wrote {} bytes to {}", written, self.destination.display());
        Ok(written)
    }

    pub fn write_record(&self, record: &TitleRecord) -> Result<u64> {
        let content = record.render();
        let mut file = self.create_file()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(content.len() as u64)
    }

    fn create_file(&self) -> Result<fs::File> {
        if self.create_parent_dirs {
            if let Some(parent) = self.destination.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
        }

        Ok(fs::File::create(&self.destination)?)
    }
}
