//! Path normalization and canonical-path resolution.

use std::io;
use std::path::{Path, PathBuf};

/// Split `path` on `/`, dropping empty segments.
///
/// Leading, trailing and repeated slashes make no difference, and `""`
/// yields no segments.
pub fn normalize(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Resolves a path to its canonical, symlink-free form.
pub trait PathResolver: Send + Sync {
    fn resolve(&self, path: &str) -> io::Result<String>;
}

/// [`PathResolver`] backed by the host filesystem.
///
/// Relative inputs stay relative: they are resolved against the base
/// directory (the working directory unless set with
/// [`FsResolver::relative_to`]) and the base is stripped again. A relative
/// path whose symlinks lead outside the base resolves to an absolute path.
#[derive(Debug, Clone, Default)]
pub struct FsResolver {
    base: Option<PathBuf>,
}

impl FsResolver {
    /// Resolve relative paths against the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base`.
    pub fn relative_to(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn base_dir(&self) -> io::Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => std::env::current_dir(),
        }
    }
}

impl PathResolver for FsResolver {
    fn resolve(&self, path: &str) -> io::Result<String> {
        let input = Path::new(path);
        let resolved = if input.is_absolute() {
            std::fs::canonicalize(input)?
        } else {
            let base = std::fs::canonicalize(self.base_dir()?)?;
            let full = std::fs::canonicalize(base.join(input))?;
            match full.strip_prefix(&base) {
                Ok(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
                Ok(relative) => relative.to_path_buf(),
                Err(_) => full,
            }
        };

        resolved
            .into_os_string()
            .into_string()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "resolved path is not UTF-8"))
    }
}
