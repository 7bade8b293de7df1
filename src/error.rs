//! Failure conditions for a splice run.
//!
//! Every failure is final: a range that does not fit the document is reported before any line
//! is scanned, so a failed run never produces a partially spliced result.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Names the configured boundary that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// First opening marker line.
    SkipStart,
    /// First closing marker line.
    SkipEnd,
    /// Exclusive end of the relocatable block.
    BlockEnd,
    /// Line after which the relocated block is inserted.
    Anchor,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SkipStart => "skip-start",
            Self::SkipEnd => "skip-end",
            Self::BlockEnd => "block-end",
            Self::Anchor => "anchor",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
/// Everything that can abort reading, splicing or writing a document.
pub enum SpliceError {
    /// A boundary lies past the end of the document or out of order with its neighbours.
    #[error("{boundary} boundary {value} is out of bounds (limit {limit}): {reason}")]
    RangeOutOfBounds {
        /// The offending boundary.
        boundary: Boundary,
        /// Value the boundary resolved to.
        value: usize,
        /// Largest (or smallest) value that would have been accepted.
        limit: usize,
        /// Which constraint was violated.
        reason: &'static str,
    },
    /// A pattern anchor matched no line outside the rewritten window.
    #[error("no line outside the rewritten window contains anchor pattern {pattern:?}")]
    AnchorNotFound {
        /// Text that was searched for.
        pattern: String,
    },
    /// A marker line does not contain its expected text, so the indices are stale.
    #[error("line {index} was expected to contain {expected:?} but reads {found:?}")]
    MarkerMismatch {
        /// Index of the checked line.
        index: usize,
        /// Text the line should contain.
        expected: String,
        /// Actual line content.
        found: String,
    },
    /// The source document could not be read.
    #[error("cannot read {}: {source}", path.display())]
    SourceUnavailable {
        /// Path of the source document.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The transformed document (or its backup) could not be written.
    #[error("cannot write {}: {source}", path.display())]
    WriteFailed {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The configuration file exists but could not be parsed.
    #[error("invalid configuration in {}: {message}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}
