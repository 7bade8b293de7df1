//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! We look for a linesplice.toml in the working directory (or the path given on the command
//! line), and if present we load marker counts and backup preferences from there.

use crate::error::SpliceError;
use facet::Facet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "linesplice.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from linesplice.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 2)]
    /// Opening marker lines dropped at the skip start.
    pub open_markers: usize,
    #[facet(default = 1)]
    /// Closing marker lines dropped at the skip end.
    pub close_markers: usize,
    #[facet(default = false)]
    /// Keep a copy of the original file when writing.
    pub backup: bool,
    #[facet(default = ".orig".to_string())]
    /// Suffix appended to the original path for the backup copy.
    pub backup_suffix: String,
}

impl Config {
    /// Load configuration from `path`, or from linesplice.toml when no path is given.
    ///
    /// A missing default file yields the defaults; an explicitly requested file must exist.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, SpliceError> {
        let explicit = path.is_some();
        let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => String::new(),
            Err(e) => {
                return Err(SpliceError::Config {
                    path,
                    message: e.to_string(),
                })
            }
        };
        let config = Self::parse(&contents).map_err(|message| SpliceError::Config {
            path: path.clone(),
            message,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text; empty text gives the defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the text is not a valid configuration.
    pub fn parse(contents: &str) -> Result<Self, String> {
        facet_toml::from_str::<Self>(contents).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
