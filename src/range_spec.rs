//! Boundaries describing which lines are dropped, which are copied and which are relocated.
//!
//! A `RangeSpec` is the explicit parameter object for one splice. It is checked against the
//! document with [`RangeSpec::resolve`] before any line is scanned, producing a [`Resolved`]
//! set of concrete index ranges that the line filter walks.

use crate::error::{Boundary, SpliceError};
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where a relocated block is re-inserted.
pub enum Anchor {
    /// Absolute 0-based line index; the block lands immediately after this line.
    Line(usize),
    /// First line containing this text that survives the splice.
    Pattern(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A block following the closing markers that moves to sit after an anchor line.
pub struct Relocation {
    /// Exclusive end of the block, which starts right after the closing markers.
    pub block_end: usize,
    /// Line the block is re-inserted after.
    pub anchor: Anchor,
    /// Also drop the single line at `block_end` (the outer wrapper's closer).
    pub drop_closer: bool,
    /// Strip up to this many leading spaces from each relocated line.
    pub dedent: usize,
}

impl Relocation {
    #[must_use]
    /// Block ending at `block_end` (exclusive), moved verbatim after `anchor`.
    pub fn new(block_end: usize, anchor: Anchor) -> Self {
        Self {
            block_end,
            anchor,
            drop_closer: false,
            dedent: 0,
        }
    }

    #[must_use]
    /// Drop the outer closer at `block_end` as well.
    pub fn drop_closer(mut self, drop_closer: bool) -> Self {
        self.drop_closer = drop_closer;
        self
    }

    #[must_use]
    /// Remove up to `width` leading spaces from relocated lines.
    pub fn dedent(mut self, width: usize) -> Self {
        self.dedent = width;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Index boundaries of one splice, 0-based.
///
/// ```text
/// skip_start ........ open markers (dropped)
/// .. skip_end ....... inclusion window (copied verbatim)
/// skip_end .......... close markers (dropped)
/// .. block_end ...... relocatable block (moved after the anchor)
/// block_end ......... outer closer (dropped when `drop_closer`)
/// ```
pub struct RangeSpec {
    /// Index of the first opening marker line.
    pub skip_start: usize,
    /// Number of opening marker lines dropped at `skip_start`.
    pub open_markers: usize,
    /// Index of the first closing marker line.
    pub skip_end: usize,
    /// Number of closing marker lines dropped at `skip_end`.
    pub close_markers: usize,
    /// Optional block to move elsewhere.
    pub relocation: Option<Relocation>,
    /// Text the line at `skip_start` must contain.
    pub expect_open: Option<String>,
    /// Text the line at `skip_end` must contain.
    pub expect_close: Option<String>,
}

impl RangeSpec {
    /// Opening markers dropped when none are configured: a row wrapper and its inner flex wrapper.
    pub const DEFAULT_OPEN_MARKERS: usize = 2;
    /// Closing markers dropped when none are configured.
    pub const DEFAULT_CLOSE_MARKERS: usize = 1;

    #[must_use]
    /// Unwrap the lines between `skip_start` and `skip_end` using the default marker counts.
    pub fn new(skip_start: usize, skip_end: usize) -> Self {
        Self {
            skip_start,
            open_markers: Self::DEFAULT_OPEN_MARKERS,
            skip_end,
            close_markers: Self::DEFAULT_CLOSE_MARKERS,
            relocation: None,
            expect_open: None,
            expect_close: None,
        }
    }

    #[must_use]
    /// A zero-width window with no relocation, which leaves any document unchanged.
    pub fn noop() -> Self {
        Self::new(0, 0).markers(0, 0)
    }

    #[must_use]
    /// Override how many opening and closing marker lines are dropped.
    pub fn markers(mut self, open: usize, close: usize) -> Self {
        self.open_markers = open;
        self.close_markers = close;
        self
    }

    #[must_use]
    /// Move the block following the closing markers.
    pub fn relocate(mut self, relocation: Relocation) -> Self {
        self.relocation = Some(relocation);
        self
    }

    #[must_use]
    /// Require the marker lines to contain the given text before splicing.
    pub fn guard(mut self, open: Option<String>, close: Option<String>) -> Self {
        self.expect_open = open;
        self.expect_close = close;
        self
    }

    #[must_use]
    /// Number of marker lines removed from the output; relocated lines are not counted.
    pub fn dropped_count(&self) -> usize {
        let closer = self
            .relocation
            .as_ref()
            .is_some_and(|relocation| relocation.drop_closer);
        self.open_markers + self.close_markers + usize::from(closer)
    }

    /// Convert boundaries given as 1-based editor line numbers to 0-based indices.
    ///
    /// Every boundary shifts down by one, so a 1-based `block_end` names the line right after
    /// the block, which is the outer closer's line number.
    ///
    /// # Errors
    ///
    /// Returns `RangeOutOfBounds` naming the first boundary given as line 0.
    pub fn into_zero_based(mut self) -> Result<Self, SpliceError> {
        let shift = |boundary: Boundary, line: usize| {
            line.checked_sub(1).ok_or(SpliceError::RangeOutOfBounds {
                boundary,
                value: line,
                limit: 1,
                reason: "line numbers start at 1",
            })
        };

        self.skip_start = shift(Boundary::SkipStart, self.skip_start)?;
        self.skip_end = shift(Boundary::SkipEnd, self.skip_end)?;
        if let Some(relocation) = &mut self.relocation {
            relocation.block_end = shift(Boundary::BlockEnd, relocation.block_end)?;
            if let Anchor::Line(line) = &mut relocation.anchor {
                *line = shift(Boundary::Anchor, *line)?;
            }
        }
        Ok(self)
    }

    /// Check every boundary against `lines` and resolve the anchor.
    ///
    /// # Errors
    ///
    /// Returns `RangeOutOfBounds` naming the first boundary that does not fit, `AnchorNotFound`
    /// when a pattern anchor matches nothing, or `MarkerMismatch` when a marker guard fails.
    pub fn resolve(&self, lines: &[String]) -> Result<Resolved, SpliceError> {
        let len = lines.len();
        let out_of_bounds =
            |boundary: Boundary, value: usize, limit: usize, reason: &'static str| {
                SpliceError::RangeOutOfBounds {
                    boundary,
                    value,
                    limit,
                    reason,
                }
            };

        if self.skip_start > len {
            return Err(out_of_bounds(
                Boundary::SkipStart,
                self.skip_start,
                len,
                "starts past the end of the document",
            ));
        }
        let body_start = self.skip_start.saturating_add(self.open_markers);
        if body_start > self.skip_end {
            return Err(out_of_bounds(
                Boundary::SkipStart,
                self.skip_start,
                self.skip_end.saturating_sub(self.open_markers),
                "opening markers overrun the closing marker",
            ));
        }
        let close_end = self.skip_end.saturating_add(self.close_markers);
        if close_end > len {
            return Err(out_of_bounds(
                Boundary::SkipEnd,
                self.skip_end,
                len.saturating_sub(self.close_markers),
                "closing markers run past the end of the document",
            ));
        }

        let mut resolved = Resolved {
            open: self.skip_start..body_start,
            body: body_start..self.skip_end,
            close: self.skip_end..close_end,
            block: close_end..close_end,
            closer: None,
            anchor: None,
            dedent: 0,
        };

        if let Some(relocation) = &self.relocation {
            if relocation.block_end < close_end {
                return Err(out_of_bounds(
                    Boundary::BlockEnd,
                    relocation.block_end,
                    close_end,
                    "block ends before the closing markers",
                ));
            }
            if relocation.block_end > len {
                return Err(out_of_bounds(
                    Boundary::BlockEnd,
                    relocation.block_end,
                    len,
                    "block runs past the end of the document",
                ));
            }
            if relocation.drop_closer && relocation.block_end >= len {
                return Err(out_of_bounds(
                    Boundary::BlockEnd,
                    relocation.block_end,
                    len.saturating_sub(1),
                    "there is no outer closer line to drop",
                ));
            }
            resolved.block = close_end..relocation.block_end;
            resolved.closer = relocation.drop_closer.then_some(relocation.block_end);
            resolved.dedent = relocation.dedent;
            resolved.anchor = Some(resolved.resolve_anchor(&relocation.anchor, lines)?);
        }

        check_marker(lines, self.skip_start, self.expect_open.as_deref())?;
        check_marker(lines, self.skip_end, self.expect_close.as_deref())?;

        tracing::debug!(?resolved, "resolved range");
        Ok(resolved)
    }
}

fn check_marker(lines: &[String], index: usize, expected: Option<&str>) -> Result<(), SpliceError> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let found = lines.get(index).map_or("", String::as_str);
    if found.contains(expected) {
        Ok(())
    } else {
        Err(SpliceError::MarkerMismatch {
            index,
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Concrete index ranges of a validated `RangeSpec`.
pub struct Resolved {
    /// Opening marker lines.
    pub open: Range<usize>,
    /// Inclusion window copied verbatim.
    pub body: Range<usize>,
    /// Closing marker lines.
    pub close: Range<usize>,
    /// Relocatable block (empty without a relocation).
    pub block: Range<usize>,
    /// Outer closer dropped after the block.
    pub closer: Option<usize>,
    /// Index of the anchor line, if relocating.
    pub anchor: Option<usize>,
    /// Leading spaces stripped from relocated lines.
    pub dedent: usize,
}

impl Resolved {
    #[must_use]
    /// Whether the line at `index` is absent from its original position in the output.
    pub fn is_removed(&self, index: usize) -> bool {
        self.open.contains(&index)
            || self.close.contains(&index)
            || self.block.contains(&index)
            || self.closer == Some(index)
    }

    fn resolve_anchor(&self, anchor: &Anchor, lines: &[String]) -> Result<usize, SpliceError> {
        match anchor {
            Anchor::Line(index) => {
                if *index >= lines.len() {
                    return Err(SpliceError::RangeOutOfBounds {
                        boundary: Boundary::Anchor,
                        value: *index,
                        limit: lines.len().saturating_sub(1),
                        reason: "anchor is past the end of the document",
                    });
                }
                if self.is_removed(*index) {
                    return Err(SpliceError::RangeOutOfBounds {
                        boundary: Boundary::Anchor,
                        value: *index,
                        limit: self.open.start,
                        reason: "anchor line is itself dropped or relocated",
                    });
                }
                Ok(*index)
            }
            Anchor::Pattern(pattern) => lines
                .iter()
                .enumerate()
                .find(|(index, line)| !self.is_removed(*index) && line.contains(pattern.as_str()))
                .map(|(index, _)| index)
                .ok_or_else(|| SpliceError::AnchorNotFound {
                    pattern: pattern.clone(),
                }),
        }
    }
}

#[cfg(test)]
#[path = "tests/range_spec.rs"]
mod tests;
