//! linesplice: unwrap a marker-delimited block of lines and relocate what follows it.
//!
//! A document is read as an ordered sequence of lines. A [`RangeSpec`] names the opening and
//! closing marker lines to drop, and optionally a block after them to move so that it sits
//! right after an anchor line. Everything else passes through untouched.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod document;
pub mod error;
pub mod line_filter;
pub mod range_spec;
pub mod report;

pub use document::Document;
pub use error::{Boundary, SpliceError};
pub use line_filter::{transform, Transform};
pub use range_spec::{Anchor, RangeSpec, Relocation};
pub use report::Summary;

/// Read `path`, apply `spec` and report the result, optionally persisting it.
///
/// Nothing is written unless `write` is set, and never when the spec fails to resolve.
///
/// # Errors
///
/// Returns the first read, validation or write failure.
pub fn splice_file(
    path: &std::path::Path,
    spec: &RangeSpec,
    write: bool,
    backup_suffix: Option<&str>,
) -> Result<(Document, Summary), SpliceError> {
    let source = Document::read(path)?;
    let result = transform(&source.lines, spec)?;
    let summary = Summary::new(path, &result, write);
    let output = source.spliced(result.lines, &result.origin);
    if write {
        output.write(path, backup_suffix)?;
    }
    Ok((output, summary))
}
