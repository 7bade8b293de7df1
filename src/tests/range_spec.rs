use super::{Anchor, RangeSpec, Relocation};
use crate::error::{Boundary, SpliceError};

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("line {i}")).collect()
}

fn boundary_of(err: &SpliceError) -> Option<Boundary> {
    match err {
        SpliceError::RangeOutOfBounds { boundary, .. } => Some(*boundary),
        _ => None,
    }
}

#[test]
fn test_resolve_ranges() {
    let spec =
        RangeSpec::new(2, 7).relocate(Relocation::new(9, Anchor::Line(1)).drop_closer(true));
    let resolved = spec.resolve(&numbered(10)).unwrap();

    assert_eq!(resolved.open, 2..4);
    assert_eq!(resolved.body, 4..7);
    assert_eq!(resolved.close, 7..8);
    assert_eq!(resolved.block, 8..9);
    assert_eq!(resolved.closer, Some(9));
    assert_eq!(resolved.anchor, Some(1));
}

#[test]
fn test_open_markers_overrunning_close() {
    let err = RangeSpec::new(3, 4).resolve(&numbered(10)).unwrap_err();
    assert_eq!(boundary_of(&err), Some(Boundary::SkipStart));
}

#[test]
fn test_close_past_end() {
    let err = RangeSpec::new(0, 5).resolve(&numbered(5)).unwrap_err();
    assert_eq!(boundary_of(&err), Some(Boundary::SkipEnd));
}

#[test]
fn test_block_end_out_of_order() {
    let lines = numbered(10);
    let before = RangeSpec::new(0, 4).relocate(Relocation::new(3, Anchor::Line(8)));
    let past = RangeSpec::new(0, 4).relocate(Relocation::new(11, Anchor::Line(8)));
    let no_closer =
        RangeSpec::new(0, 4).relocate(Relocation::new(10, Anchor::Line(8)).drop_closer(true));

    for spec in [before, past, no_closer] {
        let err = spec.resolve(&lines).unwrap_err();
        assert_eq!(boundary_of(&err), Some(Boundary::BlockEnd), "{spec:?}");
    }
}

#[test]
fn test_anchor_must_survive() {
    let lines = numbered(10);
    for anchor in [2, 3, 7, 8, 12] {
        let spec = RangeSpec::new(2, 7).relocate(Relocation::new(9, Anchor::Line(anchor)));
        let err = spec.resolve(&lines).unwrap_err();
        assert_eq!(boundary_of(&err), Some(Boundary::Anchor), "anchor {anchor}");
    }
}

#[test]
fn test_anchor_inside_body_is_allowed() {
    let spec = RangeSpec::new(2, 7).relocate(Relocation::new(9, Anchor::Line(5)));
    let resolved = spec.resolve(&numbered(10)).unwrap();
    assert_eq!(resolved.anchor, Some(5));
}

#[test]
fn test_pattern_anchor_skips_removed_lines() {
    let mut lines = numbered(10);
    lines[8] = "Date".to_string();
    lines[9] = "Date".to_string();
    let spec =
        RangeSpec::new(2, 7).relocate(Relocation::new(9, Anchor::Pattern("Date".into())));
    assert_eq!(spec.resolve(&lines).unwrap().anchor, Some(9));
}

#[test]
fn test_pattern_anchor_not_found() {
    let spec =
        RangeSpec::new(2, 7).relocate(Relocation::new(9, Anchor::Pattern("missing".into())));
    let err = spec.resolve(&numbered(10)).unwrap_err();
    assert!(matches!(err, SpliceError::AnchorNotFound { pattern } if pattern == "missing"));
}

#[test]
fn test_marker_guards() {
    let mut lines = numbered(10);
    lines[2] = "<View style={{ flexDirection: 'row' }}>".to_string();
    lines[7] = "</View>".to_string();

    let ok = RangeSpec::new(2, 7).guard(Some("flexDirection".into()), Some("</View>".into()));
    assert!(ok.resolve(&lines).is_ok());

    let stale = RangeSpec::new(2, 7).guard(None, Some("</TouchableOpacity>".into()));
    let err = stale.resolve(&lines).unwrap_err();
    match err {
        SpliceError::MarkerMismatch { index, found, .. } => {
            assert_eq!(index, 7);
            assert_eq!(found, "</View>");
        }
        other => panic!("expected MarkerMismatch, got {other:?}"),
    }
}

#[test]
fn test_dropped_count() {
    assert_eq!(RangeSpec::new(0, 2).dropped_count(), 3);
    assert_eq!(RangeSpec::noop().dropped_count(), 0);
    let with_closer =
        RangeSpec::new(0, 2).relocate(Relocation::new(4, Anchor::Line(5)).drop_closer(true));
    assert_eq!(with_closer.dropped_count(), 4);
}

#[test]
fn test_error_message_names_boundary() {
    let err = RangeSpec::new(0, 5).resolve(&numbered(5)).unwrap_err();
    assert!(err.to_string().starts_with("skip-end boundary 5"), "{err}");
}

#[test]
fn test_one_based_shifts_every_boundary() {
    let relocation = Relocation::new(7357, Anchor::Line(7394)).drop_closer(true);
    let spec = RangeSpec::new(7330, 7347).relocate(relocation);
    let spec = spec.into_zero_based().unwrap();

    assert_eq!(spec.skip_start, 7329);
    assert_eq!(spec.skip_end, 7346);
    let relocation = spec.relocation.unwrap();
    assert_eq!(relocation.block_end, 7356);
    assert_eq!(relocation.anchor, Anchor::Line(7393));
}

#[test]
fn test_one_based_block_end_is_outer_closer_line() {
    // 1-based: 1 anchor, 2-3 open, 4 body, 5 close, 6 block, 7 outer closer, 8 tail
    let lines: Vec<String> = (1..=8).map(|i| format!("line {i}")).collect();
    let relocation = Relocation::new(7, Anchor::Line(1)).drop_closer(true);
    let spec = RangeSpec::new(2, 5).relocate(relocation);
    let spec = spec.into_zero_based().unwrap();
    let result = crate::line_filter::transform(&lines, &spec).unwrap();

    assert_eq!(result.lines, vec!["line 1", "line 6", "line 4", "line 8"]);
}

#[test]
fn test_one_based_leaves_pattern_anchor_alone() {
    let relocation = Relocation::new(4, Anchor::Pattern("Date".into()));
    let spec = RangeSpec::new(1, 2).markers(1, 1).relocate(relocation);
    let spec = spec.into_zero_based().unwrap();

    let relocation = spec.relocation.unwrap();
    assert_eq!(relocation.anchor, Anchor::Pattern("Date".into()));
    assert_eq!(relocation.block_end, 3);
}

#[test]
fn test_one_based_rejects_line_zero() {
    let zero_block_end = Relocation::new(0, Anchor::Line(9));
    let zero_anchor = Relocation::new(6, Anchor::Line(0));
    let cases = [
        (RangeSpec::new(0, 4), Boundary::SkipStart),
        (RangeSpec::new(1, 0), Boundary::SkipEnd),
        (RangeSpec::new(1, 4).relocate(zero_block_end), Boundary::BlockEnd),
        (RangeSpec::new(1, 4).relocate(zero_anchor), Boundary::Anchor),
    ];

    for (spec, boundary) in cases {
        let err = spec.into_zero_based().unwrap_err();
        assert_eq!(boundary_of(&err), Some(boundary));
    }
}
