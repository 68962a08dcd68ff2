use std::collections::BTreeMap;

use crate::core::framecode::sequence_key;
use crate::core::types::{Notation, SequenceKey};
use crate::matching::engine::MatchError;
use crate::parsing::ranges::{FrameRangeSet, ParseError};
use crate::utils::validation::check_frame_limit;
use crate::parsing::template::SequenceName;

/// A group of files that share one naming pattern and differ only in frame number.
///
/// Never empty. Built by the matcher or by [`FrameSequence::from_paths`], and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    key: SequenceKey,
    frames: BTreeMap<i64, String>,
    start: i64,
    end: i64,
}

impl FrameSequence {
    /// Returns `None` for an empty frame map
    pub(crate) fn new(key: SequenceKey, frames: BTreeMap<i64, String>) -> Option<Self> {
        let start = *frames.first_key_value()?.0;
        let end = *frames.last_key_value()?.0;
        Some(Self {
            key,
            frames,
            start,
            end,
        })
    }

    /// Build a sequence from paths that must all share one naming pattern.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::EmptySequence` for no paths, `MatchError::NoFramecode`
    /// or `MatchError::FramecodeOutOfRange` for a path without a usable frame
    /// number, or `MatchError::MixedSequence` if a path belongs to a different
    /// sequence than the first one.
    pub fn from_paths<I, S>(paths: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expected: Option<SequenceKey> = None;
        let mut frames = BTreeMap::new();

        for path in paths {
            let path = path.as_ref();
            let (key, framecode) =
                sequence_key(path).ok_or_else(|| MatchError::NoFramecode(path.to_string()))?;
            let frame = framecode
                .value()
                .ok_or_else(|| MatchError::FramecodeOutOfRange(path.to_string()))?;

            match &expected {
                Some(first) if *first != key => {
                    return Err(MatchError::MixedSequence {
                        expected: SequenceName::from_key(first, Notation::NumberSign).to_string(),
                        path: path.to_string(),
                    });
                }
                Some(_) => {}
                None => expected = Some(key),
            }

            frames.insert(frame, path.to_string());
        }

        let key = expected.ok_or(MatchError::EmptySequence)?;
        Self::new(key, frames).ok_or(MatchError::EmptySequence)
    }

    /// Identity shared by every file of this sequence
    #[must_use]
    pub fn key(&self) -> &SequenceKey {
        &self.key
    }

    /// Frame numbers present
    #[must_use]
    pub fn frames(&self) -> FrameRangeSet {
        self.frames.keys().copied().collect()
    }

    /// Frame numbers between the first and last frame that have no file.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::TooManyFrames` when the gaps hold more frames than
    /// the expansion limit, as with timestamp-numbered files.
    pub fn missing(&self) -> Result<FrameRangeSet, ParseError> {
        self.frames().missing()
    }

    /// Number of frames between the first and last frame that have no file
    #[must_use]
    pub fn missing_count(&self) -> u64 {
        self.start.abs_diff(self.end) - (self.frames.len() as u64 - 1)
    }

    /// Canonical range string of the missing frames, empty when there are none
    #[must_use]
    pub fn missing_range_string(&self) -> String {
        self.frames().missing_string()
    }

    #[must_use]
    pub fn has_gaps(&self) -> bool {
        self.missing_count() > 0
    }

    /// Path of the file holding `frame`
    #[must_use]
    pub fn path_for(&self, frame: i64) -> Option<&str> {
        self.frames.get(&frame).map(String::as_str)
    }

    /// Canonical range string of the frames present, e.g. `1-3, 5, 7-9`
    #[must_use]
    pub fn range_string(&self) -> String {
        self.frames().to_string()
    }

    /// Sequence name in the given notation, e.g. `renders/beauty.####.exr`
    #[must_use]
    pub fn name(&self, notation: Notation) -> String {
        self.template(notation).to_string()
    }

    #[must_use]
    pub fn template(&self, notation: Notation) -> SequenceName {
        SequenceName::from_key(&self.key, notation)
    }

    /// Lowest frame number
    #[must_use]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Highest frame number
    #[must_use]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of files in the sequence
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; a sequence holds at least one file
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `(frame, path)` pairs in ascending frame order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> + '_ {
        self.frames.iter().map(|(frame, path)| (*frame, path.as_str()))
    }

    /// Paths in ascending frame order
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.frames.values().map(String::as_str)
    }

    /// The `index`-th file in ascending frame order
    #[must_use]
    pub fn frame_at(&self, index: usize) -> Option<(i64, &str)> {
        self.iter().nth(index)
    }

    /// Position of `path` in ascending frame order
    #[must_use]
    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.paths().position(|p| p == path)
    }

    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        sequence_key(path)
            .and_then(|(_, framecode)| framecode.value())
            .and_then(|frame| self.path_for(frame))
            .is_some_and(|p| p == path)
    }

    /// Look up several frames at once, in the caller's order.
    ///
    /// Frames without a file yield `None`.
    pub fn get_frames<I>(&self, frames: I) -> Vec<Option<&str>>
    where
        I: IntoIterator<Item = i64>,
    {
        frames
            .into_iter()
            .map(|frame| self.path_for(frame))
            .collect()
    }
}

impl std::fmt::Display for FrameSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name(Notation::NumberSign))?;
        if self.start == self.end {
            return write!(f, " {}", self.start);
        }
        write!(f, " {}-{}", self.start, self.end)?;
        if self.has_gaps() {
            write!(f, " ({})", self.range_string())?;
        }
        Ok(())
    }
}

/// Walk several sequences frame by frame.
///
/// For each frame number, either from `frames` in the given order or every
/// integer from the lowest start to the highest end, yields the path of that
/// frame in each sequence, or `None` where a sequence lacks it.
///
/// # Errors
///
/// Returns `ParseError::TooManyFrames` when `frames` is `None` and the span
/// from the lowest start to the highest end exceeds the expansion limit.
///
/// # Examples
///
/// ```
/// use frameseq::{zip_sequences, FrameSequence};
///
/// let beauty = FrameSequence::from_paths(["b.1.exr", "b.2.exr"]).unwrap();
/// let depth = FrameSequence::from_paths(["d.2.exr", "d.3.exr"]).unwrap();
///
/// let sequences = [beauty, depth];
/// let rows = zip_sequences(&sequences, None).unwrap();
/// assert_eq!(rows[0], (1, vec![Some("b.1.exr"), None]));
/// assert_eq!(rows[2], (3, vec![None, Some("d.3.exr")]));
/// ```
pub fn zip_sequences<'a>(
    sequences: &'a [FrameSequence],
    frames: Option<&[i64]>,
) -> Result<Vec<(i64, Vec<Option<&'a str>>)>, ParseError> {
    let row = |frame: i64| {
        let paths: Vec<Option<&str>> = sequences.iter().map(|seq| seq.path_for(frame)).collect();
        (frame, paths)
    };

    if let Some(frames) = frames {
        return Ok(frames.iter().copied().map(row).collect());
    }

    let start = sequences.iter().map(FrameSequence::start).min();
    let end = sequences.iter().map(FrameSequence::end).max();
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(Vec::new());
    };

    if let Some(msg) = check_frame_limit(0, start.abs_diff(end).saturating_add(1)) {
        return Err(ParseError::TooManyFrames(msg));
    }
    Ok((start..=end).map(row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrameSequence {
        FrameSequence::from_paths([
            "renders/f.0005.png",
            "renders/f.0001.png",
            "renders/f.0002.png",
        ])
        .unwrap()
    }

    #[test]
    fn test_queries() {
        let seq = sample();
        assert_eq!(seq.frames().to_string(), "1-2, 5");
        assert_eq!(seq.missing().unwrap().to_string(), "3-4");
        assert_eq!(seq.missing_count(), 2);
        assert_eq!(seq.missing_range_string(), "3-4");
        assert!(seq.has_gaps());
        assert_eq!(seq.range_string(), "1-2, 5");
        assert_eq!(seq.path_for(2), Some("renders/f.0002.png"));
        assert_eq!(seq.path_for(3), None);
        assert_eq!((seq.start(), seq.end(), seq.len()), (1, 5, 3));
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_names() {
        let seq = sample();
        assert_eq!(seq.name(Notation::NumberSign), "renders/f.####.png");
        assert_eq!(seq.name(Notation::Modulo), "renders/f.%04d.png");
        assert_eq!(seq.name(Notation::FormatCode), "renders/f.{:04d}.png");
    }

    #[test]
    fn test_index_lookups() {
        let seq = sample();
        assert_eq!(seq.frame_at(0), Some((1, "renders/f.0001.png")));
        assert_eq!(seq.frame_at(2), Some((5, "renders/f.0005.png")));
        assert_eq!(seq.frame_at(3), None);
        assert_eq!(seq.index_of("renders/f.0005.png"), Some(2));
        assert_eq!(seq.index_of("renders/f.0003.png"), None);
        assert!(seq.contains_path("renders/f.0001.png"));
        assert!(!seq.contains_path("renders/f.001.png"));
        assert!(!seq.contains_path("other/f.0001.png"));
    }

    #[test]
    fn test_get_frames_caller_order() {
        let seq = sample();
        assert_eq!(
            seq.get_frames([5, 3, 1]),
            vec![Some("renders/f.0005.png"), None, Some("renders/f.0001.png")]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "renders/f.####.png 1-5 (1-2, 5)");

        let full = FrameSequence::from_paths(["a_1.tif", "a_2.tif", "a_3.tif"]).unwrap();
        assert_eq!(full.to_string(), "a_#.tif 1-3");

        let single = FrameSequence::from_paths(["still_010.jpg"]).unwrap();
        assert_eq!(single.to_string(), "still_###.jpg 10");
    }

    #[test]
    fn test_from_paths_errors() {
        assert_eq!(
            FrameSequence::from_paths(Vec::<String>::new()),
            Err(MatchError::EmptySequence)
        );
        assert_eq!(
            FrameSequence::from_paths(["A100.png", "notes.txt"]),
            Err(MatchError::NoFramecode("notes.txt".to_string()))
        );
        for (a, b) in [
            ("A100.png", "B101.png"),
            ("A100.png", "A101.jpg"),
            ("A100.png", "foo/A101.png"),
            ("A100.png", "A0101.png"),
        ] {
            assert_eq!(
                FrameSequence::from_paths([a, b]),
                Err(MatchError::MixedSequence {
                    expected: "A###.png".to_string(),
                    path: b.to_string()
                }),
                "{b}"
            );
        }
    }

    #[test]
    fn test_zip_sequences_explicit_frames() {
        let a = FrameSequence::from_paths(["a.1.png", "a.3.png"]).unwrap();
        let b = FrameSequence::from_paths(["b.3.png"]).unwrap();
        let seqs = [a, b];

        let rows = zip_sequences(&seqs, Some(&[3, 1][..])).unwrap();
        assert_eq!(
            rows,
            vec![
                (3, vec![Some("a.3.png"), Some("b.3.png")]),
                (1, vec![Some("a.1.png"), None]),
            ]
        );
        assert_eq!(zip_sequences(&seqs, None).unwrap().len(), 3);
        assert!(zip_sequences(&[], None).unwrap().is_empty());
    }

    #[test]
    fn test_wide_gap_queries() {
        let seq =
            FrameSequence::from_paths(["backup_1600000000.tar", "backup_1700000000.tar"]).unwrap();

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.missing_count(), 99_999_999);
        assert_eq!(seq.missing_range_string(), "1600000001-1699999999");
        assert!(matches!(seq.missing(), Err(ParseError::TooManyFrames(_))));
        assert_eq!(
            seq.to_string(),
            "backup_##########.tar 1600000000-1700000000 (1600000000, 1700000000)"
        );

        let seqs = [seq];
        assert!(matches!(
            zip_sequences(&seqs, None),
            Err(ParseError::TooManyFrames(_))
        ));
        let rows = zip_sequences(&seqs, Some(&[1_700_000_000][..])).unwrap();
        assert_eq!(rows[0].1, vec![Some("backup_1700000000.tar")]);
    }
}
