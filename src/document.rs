//! Reading a source file into lines and writing a transformed one back.
//!
//! The whole file is read eagerly. Each line's terminator is kept next to its text, so lines the
//! splice leaves alone are written back byte for byte.

use crate::error::SpliceError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Terminator style used between lines.
pub enum LineEnding {
    /// Unix `\n`.
    Lf,
    /// Windows `\r\n`.
    CrLf,
}

impl LineEnding {
    #[must_use]
    /// The terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A text document held as an ordered sequence of lines.
pub struct Document {
    /// Lines without their terminators.
    pub lines: Vec<String>,
    /// Each line's own terminator; `None` only for an unterminated final line.
    pub endings: Vec<Option<LineEnding>>,
}

impl Document {
    /// Read the file at `path` in full.
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` if the file cannot be read as UTF-8 text.
    pub fn read(path: &Path) -> Result<Self, SpliceError> {
        let text = fs::read_to_string(path).map_err(|source| SpliceError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_text(&text);
        tracing::debug!(
            path = %path.display(),
            lines = document.lines.len(),
            ending = ?document.primary_ending(),
            "read document"
        );
        Ok(document)
    }

    #[must_use]
    /// Split `text` into lines, remembering the terminator of every line.
    pub fn from_text(text: &str) -> Self {
        let (lines, endings) = text
            .split_inclusive('\n')
            .map(|chunk| {
                if let Some(line) = chunk.strip_suffix("\r\n") {
                    (line.to_string(), Some(LineEnding::CrLf))
                } else if let Some(line) = chunk.strip_suffix('\n') {
                    (line.to_string(), Some(LineEnding::Lf))
                } else {
                    (chunk.to_string(), None)
                }
            })
            .unzip();
        Self { lines, endings }
    }

    #[must_use]
    /// The first terminator in the document, used for lines that gain one.
    pub fn primary_ending(&self) -> LineEnding {
        self.endings
            .iter()
            .flatten()
            .next()
            .copied()
            .unwrap_or(LineEnding::Lf)
    }

    #[must_use]
    /// Build the transformed document from `lines`, where `origin[i]` is the index of the source
    /// line that output line `i` came from.
    ///
    /// Every line keeps its own terminator. A line that had none (the unterminated end of the
    /// source) gets the primary ending when it no longer ends the document.
    pub fn spliced(&self, lines: Vec<String>, origin: &[usize]) -> Self {
        let fill = self.primary_ending();
        let last = origin.len().saturating_sub(1);
        let endings = origin
            .iter()
            .enumerate()
            .map(|(position, &index)| {
                let ending = self.endings.get(index).copied().flatten();
                if position < last {
                    Some(ending.unwrap_or(fill))
                } else {
                    ending
                }
            })
            .collect();
        Self { lines, endings }
    }

    #[must_use]
    /// Join the lines back into text.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for (line, ending) in self.lines.iter().zip(&self.endings) {
            text.push_str(line);
            text.push_str(ending.map_or("", LineEnding::as_str));
        }
        text
    }

    /// Persist the document to `path`, replacing it atomically.
    ///
    /// With a `backup_suffix`, the current file is first copied to `<path><suffix>`.
    ///
    /// # Errors
    ///
    /// Returns `WriteFailed` naming the backup or destination path that could not be written.
    pub fn write(&self, path: &Path, backup_suffix: Option<&str>) -> Result<(), SpliceError> {
        if let Some(suffix) = backup_suffix {
            let backup = backup_path(path, suffix);
            fs::copy(path, &backup).map_err(|source| SpliceError::WriteFailed {
                path: backup.clone(),
                source,
            })?;
            tracing::info!(backup = %backup.display(), "backed up original");
        }

        let failed = |source: io::Error| SpliceError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir).map_err(failed)?;
        if let Ok(metadata) = fs::metadata(path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(failed)?;
        }
        file.write_all(self.render().as_bytes()).map_err(failed)?;
        file.persist(path).map_err(|e| failed(e.error))?;

        tracing::info!(path = %path.display(), lines = self.lines.len(), "wrote document");
        Ok(())
    }
}

#[must_use]
/// Path of the backup copy written alongside `path`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
