//! Frame range expressions.
//!
//! Grammar (items are separated by a comma, whitespace, or both):
//!
//! ```text
//! range_expr := item (separator item)*
//! item       := int | int "-" int | int "-" int "-" int
//! int        := ["-"] digit+
//! ```
//!
//! Inside an item a `-` that follows an integer is always the range separator,
//! and a `-` that starts an integer is its sign. Items never contain
//! whitespace, so `-5--1` is the range -5 to -1, `1 -5` is the two items 1 and
//! -5, and `1 - 5` is malformed.
//!
//! Formatting is the inverse for unit-step runs only: `{1, 2, 3, 5, 7, 8, 9}`
//! formats as `1-3, 5, 7-9`. Strided input such as `1-10-2` is accepted by the
//! parser but never produced by the formatter.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::validation::check_frame_limit;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed frame range at byte {position}: '{token}'")]
    Malformed { position: usize, token: String },

    #[error("Range step of zero at byte {position}: '{token}'")]
    ZeroStep { position: usize, token: String },

    #[error("{0}")]
    TooManyFrames(String),
}

impl ParseError {
    fn malformed(position: usize, token: &str) -> Self {
        Self::Malformed {
            position,
            token: token.to_string(),
        }
    }
}

/// An ordered set of distinct frame numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameRangeSet(BTreeSet<i64>);

impl FrameRangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a range expression into the deduplicated set of its integers.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Malformed` for grammar violations (including an
    /// empty expression), `ParseError::ZeroStep` for an `A-B-0` item, or
    /// `ParseError::TooManyFrames` if the expression expands past the limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use frameseq::FrameRangeSet;
    ///
    /// let set = FrameRangeSet::parse("1-3, 5 7-9").unwrap();
    /// assert_eq!(set.to_string(), "1-3, 5, 7-9");
    /// ```
    pub fn parse(expr: &str) -> Result<Self, ParseError> {
        parse_frame_list(expr).map(|frames| frames.into_iter().collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, frame: i64) -> bool {
        self.0.contains(&frame)
    }

    /// Lowest frame number
    #[must_use]
    pub fn first(&self) -> Option<i64> {
        self.0.first().copied()
    }

    /// Highest frame number
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        self.0.last().copied()
    }

    /// Frame numbers in ascending order
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    /// Integers between the lowest and highest frame that are not in the set.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::TooManyFrames` if the gaps hold more integers than
    /// the expansion limit; use [`missing_count`](Self::missing_count) or
    /// [`missing_runs`](Self::missing_runs) for sets spanning a wide range.
    pub fn missing(&self) -> Result<Self, ParseError> {
        if let Some(msg) = check_frame_limit(0, self.missing_count()) {
            return Err(ParseError::TooManyFrames(msg));
        }
        Ok(self
            .missing_runs()
            .into_iter()
            .flat_map(|(start, end)| start..=end)
            .collect())
    }

    /// Number of integers between the lowest and highest frame that are not in the set
    #[must_use]
    pub fn missing_count(&self) -> u64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first.abs_diff(last) - (self.0.len() as u64 - 1),
            _ => 0,
        }
    }

    /// Gaps between the lowest and highest frame as inclusive `(start, end)` pairs
    #[must_use]
    pub fn missing_runs(&self) -> Vec<(i64, i64)> {
        let mut gaps = Vec::new();
        let mut frames = self.iter();
        if let Some(mut prev) = frames.next() {
            for frame in frames {
                if prev.abs_diff(frame) > 1 {
                    gaps.push((prev + 1, frame - 1));
                }
                prev = frame;
            }
        }
        gaps
    }

    /// Canonical range string of the gaps, e.g. `3-4, 6`, built without
    /// expanding them
    #[must_use]
    pub fn missing_string(&self) -> String {
        format_runs(&self.missing_runs())
    }

    /// Maximal runs of consecutive integers as inclusive `(start, end)` pairs
    #[must_use]
    pub fn runs(&self) -> Vec<(i64, i64)> {
        let mut runs: Vec<(i64, i64)> = Vec::new();
        for frame in self.iter() {
            match runs.last_mut() {
                Some((_, end)) if end.checked_add(1) == Some(frame) => *end = frame,
                _ => runs.push((frame, frame)),
            }
        }
        runs
    }
}

impl FromStr for FrameRangeSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FrameRangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_runs(&self.runs()))
    }
}

/// Join inclusive runs as `1-3, 5, 7-9`
fn format_runs(runs: &[(i64, i64)]) -> String {
    runs.iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromIterator<i64> for FrameRangeSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FrameRangeSet {
    type Item = i64;
    type IntoIter = std::collections::btree_set::IntoIter<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrameRangeSet {
    type Item = i64;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

/// Expand a range expression into its integers in traversal order.
///
/// Descending ranges stay descending and duplicates are kept, so the result
/// can drive frame-by-frame processing in the order the user typed.
///
/// # Errors
///
/// Same conditions as [`FrameRangeSet::parse`].
///
/// # Examples
///
/// ```
/// use frameseq::parsing::ranges::parse_frame_list;
///
/// assert_eq!(parse_frame_list("3-1, 2").unwrap(), vec![3, 2, 1, 2]);
/// ```
pub fn parse_frame_list(expr: &str) -> Result<Vec<i64>, ParseError> {
    let mut frames = Vec::new();
    let mut total: u64 = 0;

    for (position, token) in split_items(expr)? {
        let item = parse_item(position, token)?;
        let count = item.count();
        if let Some(msg) = check_frame_limit(total, count) {
            return Err(ParseError::TooManyFrames(msg));
        }
        total += count;
        item.expand_into(&mut frames);
    }

    Ok(frames)
}

/// One parsed item: `start`, walking towards `end` by `step` (always positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RangeItem {
    start: i64,
    end: i64,
    step: u64,
}

impl RangeItem {
    fn count(self) -> u64 {
        (self.start.abs_diff(self.end) / self.step).saturating_add(1)
    }

    fn expand_into(self, frames: &mut Vec<i64>) {
        let direction: i128 = if self.end < self.start { -1 } else { 1 };
        let step = direction * i128::from(self.step);
        let start = i128::from(self.start);
        for k in 0..self.count() {
            #[allow(clippy::cast_possible_truncation)] // Value lies between start and end
            frames.push((start + i128::from(k) * step) as i64);
        }
    }
}

/// Split an expression into items and the byte offset of each
fn split_items(expr: &str) -> Result<Vec<(usize, &str)>, ParseError> {
    let is_separator = |c: char| c == ',' || c.is_whitespace();

    if expr.trim().is_empty() {
        return Err(ParseError::malformed(0, expr));
    }

    let mut items = Vec::new();
    let mut offset = expr.len() - expr.trim_start().len();
    let mut rest = expr.trim_start();

    loop {
        let token_len = rest.find(is_separator).unwrap_or(rest.len());
        if token_len == 0 {
            // Expression starts with a comma
            return Err(ParseError::malformed(offset, ","));
        }
        items.push((offset, &rest[..token_len]));

        let after = &rest[token_len..];
        let sep_len = after
            .find(|c: char| !is_separator(c))
            .unwrap_or(after.len());
        let separator = &after[..sep_len];
        let sep_offset = offset + token_len;

        let mut commas = separator.match_indices(',').map(|(idx, _)| idx);
        let first_comma = commas.next();
        if let Some(second) = commas.next() {
            return Err(ParseError::malformed(sep_offset + second, ","));
        }

        if sep_len == after.len() {
            if let Some(idx) = first_comma {
                // Dangling comma at the end
                return Err(ParseError::malformed(sep_offset + idx, ","));
            }
            break;
        }

        offset = sep_offset + sep_len;
        rest = &after[sep_len..];
    }

    Ok(items)
}

/// Parse `A`, `A-B` or `A-B-C`
fn parse_item(position: usize, token: &str) -> Result<RangeItem, ParseError> {
    let bytes = token.as_bytes();
    let mut numbers: Vec<i64> = Vec::with_capacity(3);
    let mut i = 0;

    loop {
        let number_start = i;
        if bytes.get(i) == Some(&b'-') {
            i += 1;
        }
        let digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(ParseError::malformed(position, token));
        }
        i += digits;

        let number = token[number_start..i]
            .parse()
            .map_err(|_| ParseError::malformed(position, token))?;
        numbers.push(number);

        if i == bytes.len() {
            break;
        }
        if bytes[i] != b'-' || numbers.len() == 3 {
            return Err(ParseError::malformed(position, token));
        }
        i += 1;
    }

    match numbers[..] {
        [single] => Ok(RangeItem {
            start: single,
            end: single,
            step: 1,
        }),
        [start, end] => Ok(RangeItem {
            start,
            end,
            step: 1,
        }),
        [start, end, step] => {
            if step == 0 {
                return Err(ParseError::ZeroStep {
                    position,
                    token: token.to_string(),
                });
            }
            Ok(RangeItem {
                start,
                end,
                step: step.unsigned_abs(),
            })
        }
        _ => Err(ParseError::malformed(position, token)),
    }
}
