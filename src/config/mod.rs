//! Configuration management.
//!
//! The config file names the org files to serve, as literal paths or glob
//! patterns. Patterns are expanded once at startup into a deduplicated,
//! deterministically ordered list of absolute file paths; everything
//! downstream works from that list.

use crate::{Error, Result};
use globset::Glob;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "ORGMCP_CONFIG";

/// Default config file name, looked up in the working directory and the
/// platform config directory.
const CONFIG_FILE_NAME: &str = "orgmcp.toml";

/// Characters that mark a path segment as a glob pattern.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Main configuration for orgmcp.
#[derive(Debug, Clone)]
pub struct OrgConfig {
    /// Org file paths or glob patterns, in config order.
    pub org_files: Vec<String>,
    /// Directory relative patterns resolve against (the config file's
    /// directory, or the working directory for built-in defaults).
    pub base_dir: PathBuf,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Org file paths or glob patterns.
    pub org_files: Option<Vec<String>>,
}

impl OrgConfig {
    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// lists no org file patterns.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let parsed: ConfigFile = toml::from_str(&content).map_err(|e| Error::OperationFailed {
            operation: "parse_config".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let org_files = parsed.org_files.unwrap_or_default();
        if org_files.is_empty() {
            return Err(Error::InvalidInput(
                "at least one org file pattern must be specified".to_string(),
            ));
        }

        let base_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        Ok(Self {
            org_files,
            base_dir,
        })
    }

    /// Loads configuration from the default locations.
    ///
    /// Lookup order: `ORGMCP_CONFIG` environment variable, `orgmcp.toml`
    /// in the working directory, then the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file exists at any location, or the
    /// found file fails to load.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Self::load_from_file(Path::new(&path));
            }
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load_from_file(&local);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "orgmcp") {
            let candidate = dirs.config_dir().join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::load_from_file(&candidate);
            }
        }

        Err(Error::OperationFailed {
            operation: "load_config".to_string(),
            cause: format!(
                "no {CONFIG_FILE_NAME} found (set {CONFIG_PATH_ENV} or pass --config)"
            ),
        })
    }

    /// Expands the configured patterns into absolute file paths.
    ///
    /// `~` expands to the home directory and relative patterns resolve
    /// against [`OrgConfig::base_dir`]. Matches within a pattern are sorted
    /// for determinism; the combined list is deduplicated preserving
    /// first-seen order. Patterns matching nothing log a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not valid glob syntax, or if the
    /// expansion yields no files at all.
    pub fn expand_paths(&self) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();

        for pattern in &self.org_files {
            let expanded = self.expand_pattern(pattern)?;
            if expanded.is_empty() {
                tracing::warn!(pattern = %pattern, "No files found matching pattern");
            }
            for path in expanded {
                if seen.insert(path.clone()) {
                    paths.push(path);
                }
            }
        }

        if paths.is_empty() {
            return Err(Error::InvalidInput(
                "no org files found matching the configured patterns".to_string(),
            ));
        }

        tracing::info!(count = paths.len(), "Expanded org file patterns");
        Ok(paths)
    }

    /// Expands a single pattern to its sorted matches.
    fn expand_pattern(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = expand_tilde(pattern);
        let absolute = if Path::new(&pattern).is_absolute() {
            PathBuf::from(&pattern)
        } else {
            self.base_dir.join(&pattern)
        };

        // Literal paths bypass the glob machinery entirely.
        let pattern_str = absolute.to_string_lossy().into_owned();
        if !pattern_str.contains(GLOB_META) {
            if absolute.is_file() {
                return Ok(vec![absolute]);
            }
            return Ok(Vec::new());
        }

        let matcher = Glob::new(&pattern_str)
            .map_err(|e| Error::InvalidInput(format!("bad glob pattern '{pattern_str}': {e}")))?
            .compile_matcher();

        let root = literal_prefix(&absolute);
        let mut matches: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            // The walk root itself may legitimately be a dot directory.
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()))
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| matcher.is_match(path))
            .collect();

        matches.sort();
        Ok(matches)
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_tilde(pattern: &str) -> String {
    if let Some(rest) = pattern.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest).to_string_lossy().into_owned();
        }
    }
    pattern.to_string()
}

/// Returns the deepest directory prefix of a pattern containing no glob
/// metacharacters, used as the walk root.
fn literal_prefix(pattern: &Path) -> PathBuf {
    let mut root = PathBuf::new();
    for component in pattern.components() {
        let is_meta = matches!(
            component,
            Component::Normal(part) if part.to_string_lossy().contains(GLOB_META)
        );
        if is_meta {
            break;
        }
        root.push(component.as_os_str());
    }

    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}

/// True for dotfile path segments (hidden files are never matched).
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
