//! Sequence Discovery Test Suite
//!
//! Exercises the public API end to end: listings go in, sequences, gaps,
//! names and range strings come out.

use frameseq::{
    find_all_sequences, find_sequence, parse_frame_list, zip_sequences, FrameRangeSet,
    MatchError, Notation, SequenceName,
};

/// Test the canonical grouping example: two sequences, one with a gap
#[test]
fn test_two_sequences_with_gap() {
    let scan = find_all_sequences(["f.0001.png", "f.0002.png", "f.0005.png", "g.0001.png"]);

    assert_eq!(scan.sequences.len(), 2);
    assert!(scan.unmatched.is_empty());

    let f = &scan.sequences[0];
    assert_eq!(f.frames(), FrameRangeSet::parse("1-2 5").unwrap());
    assert_eq!(f.missing().unwrap(), FrameRangeSet::parse("3-4").unwrap());

    let g = &scan.sequences[1];
    assert_eq!(g.frames().iter().collect::<Vec<_>>(), vec![1]);
    assert!(g.missing().unwrap().is_empty());
}

/// Test that output order does not depend on input order
#[test]
fn test_deterministic_order() {
    let forward = [
        "b/x.1.png",
        "a/y.1.png",
        "a/x.10.png",
        "a/x.1.png",
        "a/x.01.png",
    ];
    let mut reversed = forward;
    reversed.reverse();

    let names = |paths: &[&str]| -> Vec<String> {
        find_all_sequences(paths)
            .sequences
            .iter()
            .map(|s| s.name(Notation::NumberSign))
            .collect()
    };

    let expected = vec!["a/x.#.png", "a/x.##.png", "a/y.#.png", "b/x.#.png"];
    assert_eq!(names(&forward), expected);
    assert_eq!(names(&reversed), expected);
    assert_eq!(names(&forward), names(&forward));
}

/// Test that padding separates otherwise identical names
#[test]
fn test_width_separates_sequences() {
    let scan = find_all_sequences(["a01.png", "a02.png", "a001.png", "a002.png"]);
    let widths: Vec<usize> = scan.sequences.iter().map(|s| s.key().width).collect();
    assert_eq!(widths, vec![2, 3]);
}

/// Test that unrelated files are reported instead of failing the batch
#[test]
fn test_mixed_listing_reports_unmatched() {
    let scan = find_all_sequences([
        "plate.1001.dpx",
        "plate.1002.dpx",
        "README",
        "plate.dpx",
        "clip.mp4",
    ]);

    assert_eq!(scan.sequences.len(), 1);
    let unmatched: Vec<&str> = scan.unmatched.iter().filter_map(MatchError::path).collect();
    assert_eq!(unmatched, vec!["README", "plate.dpx", "clip.mp4"]);
}

/// Test that a discovered sequence renders back to its own paths in every notation
#[test]
fn test_names_render_back_to_paths() {
    let listing = ["out/v2/comp_010.exr", "out/v2/comp_011.exr", "out/v2/comp_013.exr"];
    let seq = find_sequence(listing, "out/v2/comp_010.exr").unwrap();

    for notation in Notation::ALL {
        let template = SequenceName::parse(&seq.name(notation)).unwrap();
        for (frame, path) in seq.iter() {
            assert_eq!(template.render(frame), path);
        }
        assert!(template.matches("out/v2/comp_012.exr"));
    }
}

/// Test user-typed ranges driving lookups on a discovered sequence
#[test]
fn test_range_expression_selects_frames() {
    let listing: Vec<String> = (1..=10).map(|f| format!("r/f.{f:04}.png")).collect();
    let seq = find_sequence(&listing, "r/f.####.png").unwrap();

    let wanted = parse_frame_list("10-1-3, 11").unwrap();
    let found = seq.get_frames(wanted.iter().copied());
    assert_eq!(
        found,
        vec![
            Some("r/f.0010.png"),
            Some("r/f.0007.png"),
            Some("r/f.0004.png"),
            Some("r/f.0001.png"),
            None,
        ]
    );
}

/// Test zipping two passes of the same shot frame by frame
#[test]
fn test_zip_passes() {
    let scan = find_all_sequences([
        "shot/beauty.1001.exr",
        "shot/beauty.1002.exr",
        "shot/depth.1002.exr",
        "shot/depth.1003.exr",
    ]);

    let rows = zip_sequences(&scan.sequences, None).unwrap();
    let frames: Vec<i64> = rows.iter().map(|(frame, _)| *frame).collect();
    assert_eq!(frames, vec![1001, 1002, 1003]);
    assert_eq!(
        rows[1].1,
        vec![Some("shot/beauty.1002.exr"), Some("shot/depth.1002.exr")]
    );
}

/// Test round-tripping a discovered frame set through its range string
#[test]
fn test_range_string_round_trip() {
    let listing = [
        "f.-002.png",
        "f.0001.png",
        "f.0002.png",
        "f.0003.png",
        "f.0008.png",
    ];
    let scan = find_all_sequences(listing);

    // "f.-002.png" has prefix "f.-" and is a separate sequence
    assert_eq!(scan.sequences.len(), 2);
    let seq = scan
        .sequences
        .iter()
        .find(|s| s.key().prefix == "f.")
        .unwrap();

    let text = seq.range_string();
    assert_eq!(text, "1-3, 8");
    assert_eq!(FrameRangeSet::parse(&text).unwrap(), seq.frames());
}

/// Test that timestamp-numbered files stay cheap to query despite huge gaps
#[test]
fn test_timestamp_named_files() {
    let scan = find_all_sequences(["backup_1600000000.tar", "backup_1700000000.tar"]);
    assert_eq!(scan.sequences.len(), 1);

    let seq = &scan.sequences[0];
    assert!(seq.has_gaps());
    assert_eq!(seq.missing_count(), 99_999_999);
    assert_eq!(seq.range_string(), "1600000000, 1700000000");
    assert!(seq.to_string().starts_with("backup_##########.tar 1600000000-1700000000"));
    assert!(seq.missing().is_err());
    assert!(zip_sequences(&scan.sequences, None).is_err());
}
