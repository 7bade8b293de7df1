//! Human and JSON summaries of a splice run.

use crate::line_filter::Transform;
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
/// Line accounting for one processed document.
pub struct Summary {
    /// Source document.
    pub path: String,
    /// Lines in the source.
    pub input_count: usize,
    /// Lines in the transformed output.
    pub output_count: usize,
    /// Marker lines removed.
    pub dropped: usize,
    /// Lines moved to the anchor.
    pub relocated: usize,
    /// Whether the output was persisted.
    pub written: bool,
}

impl Summary {
    #[must_use]
    /// Summarise `transform` of the document at `path`.
    pub fn new(path: &Path, transform: &Transform, written: bool) -> Self {
        Self {
            path: path.to_string_lossy().to_string(),
            input_count: transform.input_count,
            output_count: transform.output_count,
            dropped: transform.input_count - transform.output_count,
            relocated: transform.relocated,
            written,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed {} lines", self.output_count)?;
        write!(f, "Original had {} lines", self.input_count)
    }
}
