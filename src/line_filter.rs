//! The splice itself: unwrap a marker-delimited window and relocate the block that follows it.
//!
//! A forward-only cursor cannot put lines back at a position it has already emitted, so the
//! transform runs in two passes. The scan drops marker lines, copies everything else in order,
//! buffers the relocatable block and remembers where the anchor line landed. The splice pass
//! then inserts the buffered block at that remembered position.

use crate::error::SpliceError;
use crate::range_spec::{RangeSpec, Resolved};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Output of a successful transform along with its line accounting.
pub struct Transform {
    /// The transformed document lines.
    pub lines: Vec<String>,
    /// Number of lines in the input.
    pub input_count: usize,
    /// Number of lines in the output.
    pub output_count: usize,
    /// Number of lines moved to the anchor.
    pub relocated: usize,
    /// Input index each output line was taken from.
    pub origin: Vec<usize>,
}

/// Apply `spec` to `lines`, returning the transformed sequence.
///
/// Lines that are neither markers nor part of the relocated block are copied unchanged and in
/// their original order. The relocated block is inserted immediately after the anchor line.
///
/// # Errors
///
/// Fails before producing any output when the spec does not fit `lines`; see
/// [`RangeSpec::resolve`].
pub fn transform(lines: &[String], spec: &RangeSpec) -> Result<Transform, SpliceError> {
    let resolved = spec.resolve(lines)?;
    let Scan {
        mut result,
        mut origin,
        block,
        insert_at,
    } = scan(lines, &resolved);

    let relocated = block.len();
    if let Some(at) = insert_at {
        tracing::debug!(at, relocated, "splicing relocated block");
        result.splice(at..at, block);
        origin.splice(at..at, resolved.block.clone());
    }

    let output_count = result.len();
    tracing::debug!(input_count = lines.len(), output_count, "transform complete");
    Ok(Transform {
        lines: result,
        input_count: lines.len(),
        output_count,
        relocated,
        origin,
    })
}

struct Scan {
    result: Vec<String>,
    origin: Vec<usize>,
    block: Vec<String>,
    insert_at: Option<usize>,
}

fn scan(lines: &[String], resolved: &Resolved) -> Scan {
    let mut result = Vec::with_capacity(lines.len());
    let mut origin = Vec::with_capacity(lines.len());
    let mut block = Vec::with_capacity(resolved.block.len());
    let mut insert_at = None;
    let mut cursor = 0;

    while cursor < lines.len() {
        if resolved.open.contains(&cursor) {
            tracing::trace!(cursor, end = resolved.open.end, "dropping opening markers");
            cursor = resolved.open.end;
        } else if resolved.close.contains(&cursor) {
            tracing::trace!(cursor, end = resolved.close.end, "dropping closing markers");
            cursor = resolved.close.end;
        } else if resolved.block.contains(&cursor) {
            block.extend(
                lines[resolved.block.clone()]
                    .iter()
                    .map(|line| dedent(line, resolved.dedent).to_string()),
            );
            cursor = resolved.block.end;
        } else if resolved.closer == Some(cursor) {
            tracing::trace!(cursor, "dropping outer closer");
            cursor += 1;
        } else {
            result.push(lines[cursor].clone());
            origin.push(cursor);
            if resolved.anchor == Some(cursor) {
                insert_at = Some(result.len());
            }
            cursor += 1;
        }
    }

    Scan {
        result,
        origin,
        block,
        insert_at,
    }
}

fn dedent(line: &str, width: usize) -> &str {
    let strip = line.bytes().take(width).take_while(|b| *b == b' ').count();
    &line[strip..]
}

#[cfg(test)]
#[path = "tests/line_filter.rs"]
mod tests;
