use crate::error::{Result, TaskMateError};
use crate::relocate::ExtensionFilter;
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { bytes: u64 },
    /// The entry is already at the destination and gone from the source.
    AlreadyMoved,
}

/// Lists the files of a single directory and moves them elsewhere.
pub struct DirectoryEnumerator {
    overwrite: bool,
}

impl DirectoryEnumerator {
    pub fn new() -> Self {
        Self { overwrite: false }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// True when `entry` already exists in `dest_dir` and may not be replaced.
    pub fn blocked_at(&self, entry: &str, dest_dir: &Path) -> bool {
        !self.overwrite && dest_dir.join(entry).exists()
    }

    /// Makes sure `path` is a directory, creating it when allowed.
    /// Returns whether it had to be created.
    pub fn ensure_directory(path: &Path, create: bool) -> Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }

        if path.exists() {
            return Err(TaskMateError::NotADirectory {
                path: path.display().to_string(),
            });
        }

        if !create {
            return Err(TaskMateError::PathNotFound {
                path: path.display().to_string(),
            });
        }

        fs::create_dir_all(path)?;
        log::info!("Created directory {}", path.display());
        Ok(true)
    }

    /// Names of the regular files directly inside `dir`, sorted.
    pub fn list(&self, dir: &Path) -> Result<Vec<String>> {
        check_directory(dir)?;

        let mut names = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io_error) => TaskMateError::Io(io_error),
                None => TaskMateError::Io(std::io::Error::other("directory walk failed")),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => log::warn!(
                    "Skipping entry with a non UTF-8 name: {}",
                    entry.path().display()
                ),
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn list_matching(&self, dir: &Path, filter: &ExtensionFilter) -> Result<Vec<String>> {
        Ok(self
            .list(dir)?
            .into_iter()
            .filter(|name| filter.matches(name))
            .collect())
    }

    /// Moves `dir/entry` to `dest_dir/entry`.
    ///
    /// Running it twice for the same entry is harmless: the second call
    /// reports [`MoveOutcome::AlreadyMoved`].
    pub fn move_entry(&self, dir: &Path, entry: &str, dest_dir: &Path) -> Result<MoveOutcome> {
        validate_entry_name(entry)?;

        let source = dir.join(entry);
        let dest = dest_dir.join(entry);

        if !source.is_file() {
            if dest.is_file() {
                return Ok(MoveOutcome::AlreadyMoved);
            }
            return Err(TaskMateError::PathNotFound {
                path: source.display().to_string(),
            });
        }

        if self.blocked_at(entry, dest_dir) {
            return Err(TaskMateError::DestinationExists {
                path: dest.display().to_string(),
            });
        }

        let bytes = fs::metadata(&source)?.len();

        if let Err(e) = fs::rename(&source, &dest) {
            // Typically a cross-device move.
            log::debug!(
                "rename {} -> {} failed ({}), copying instead",
                source.display(),
                dest.display(),
                e
            );
            copy_then_remove(&source, &dest)?;
        }

        log::debug!("Moved {} to {}", source.display(), dest.display());
        Ok(MoveOutcome::Moved { bytes })
    }
}

impl Default for DirectoryEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(TaskMateError::PathNotFound {
            path: dir.display().to_string(),
        });
    }

    if !dir.is_dir() {
        return Err(TaskMateError::NotADirectory {
            path: dir.display().to_string(),
        });
    }

    Ok(())
}

fn validate_entry_name(entry: &str) -> Result<()> {
    let mut components = Path::new(entry).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(TaskMateError::PathNotFound {
            path: format!("Not a plain file name: {}", entry),
        }),
    }
}

fn copy_then_remove(source: &Path, dest: &Path) -> Result<u64> {
    let bytes = fs::copy(source, dest)?;

    if let Ok(modified_time) = fs::metadata(source).and_then(|m| m.modified()) {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(modified_time));
    }

    fs::remove_file(source)?;
    Ok(bytes)
}
