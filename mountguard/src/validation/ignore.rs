//! Prefixes that bypass pool boundary and attachment checks.
//!
//! These are paths other infrastructure already guards (the container
//! runtime refuses `/`) or paths that are meant to be shared.

use mountguard_shared::constants::BUILTIN_IGNORE_PATHS;

/// Built-in ignore prefixes plus caller-supplied additions.
#[derive(Debug, Clone)]
pub struct IgnoreRuleSet {
    prefixes: Vec<String>,
}

impl IgnoreRuleSet {
    /// Built-in prefixes followed by `extra`.
    ///
    /// Empty entries are dropped: `""` is a prefix of every path, so keeping
    /// one would turn off boundary and attachment checks for all paths.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes = BUILTIN_IGNORE_PATHS
            .iter()
            .map(|p| p.to_string())
            .chain(extra.into_iter().map(Into::into))
            .filter(|p| !p.is_empty())
            .collect();
        Self { prefixes }
    }

    /// Only the built-in prefixes.
    pub fn builtin() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Whether `path` is `/`, starts with an ignore prefix, or equals a
    /// prefix with its trailing slashes removed (`/mnt/` matches `/mnt`).
    pub fn should_ignore(&self, path: &str) -> bool {
        if path == "/" {
            return true;
        }

        self.prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()) || path == prefix.trim_end_matches('/'))
    }
}

impl Default for IgnoreRuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}
