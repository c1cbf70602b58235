//! Configuration file parsing for `jig.toml`.
//!
//! Searches current directory then ancestors, falling back to
//! `~/.config/jig/jig.toml` if no project-level file is found. The merged
//! value is handed to the toolchain and shell at construction; nothing here
//! is ambient state.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct JigConfig {
    /// Java compiler executable, resolved via PATH when not absolute.
    pub javac: String,
    /// Java runtime executable.
    pub java: String,
    /// Directory holding generated units: `Jig.java` plus one file per
    /// defined type.
    pub workspace: PathBuf,
    /// Disable ANSI colors.
    pub no_color: bool,
    /// Trace classification and brace depth on stderr.
    pub debug: bool,
}

impl Default for JigConfig {
    fn default() -> Self {
        Self {
            javac: "javac".to_string(),
            java: "java".to_string(),
            workspace: PathBuf::from(".jig"),
            no_color: false,
            debug: false,
        }
    }
}

impl JigConfig {
    /// Load config from `jig.toml`, searching current dir then parents.
    /// Returns `Default` when no file is found.
    pub fn load() -> Self {
        Self::find_and_load()
            .map(|(_path, cfg)| cfg)
            .unwrap_or_default()
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("invalid toml in '{}': {}", path.display(), e))
    }

    fn find_and_load() -> Option<(PathBuf, Self)> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("jig.toml");
            if config_path.exists() {
                let content = std::fs::read_to_string(&config_path).ok()?;
                let cfg: Self = toml::from_str(&content).ok()?;
                return Some((config_path, cfg));
            }
            if !dir.pop() {
                break;
            }
        }
        // Try global config
        let home = std::env::var_os("HOME").map(PathBuf::from)?;
        let global = home.join(".config").join("jig").join("jig.toml");
        if global.exists() {
            let content = std::fs::read_to_string(&global).ok()?;
            let cfg: Self = toml::from_str(&content).ok()?;
            return Some((global, cfg));
        }
        None
    }
}
