//! Framecode extraction.
//!
//! The framecode of a basename is the last maximal run of ASCII digits in its
//! stem. The extension (text after the last `.`) is never scanned, even when it
//! is fully numeric, so `render.0001` has no framecode while `render.0001.exr`
//! has framecode `0001`.

use serde::{Deserialize, Serialize};

use crate::core::types::SequenceKey;
use crate::utils::validation::{split_extension, split_path};

/// The digits that encode a frame number inside a basename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Framecode {
    /// Literal digit text, leading zeros preserved
    pub digits: String,

    /// Byte offset of the first digit within the basename
    pub start: usize,

    /// Byte offset one past the last digit within the basename
    pub end: usize,
}

impl Framecode {
    /// Digit count, leading zeros included
    #[must_use]
    pub fn width(&self) -> usize {
        self.digits.len()
    }

    /// Numeric value of the digits, or `None` if it does not fit in an `i64`
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        self.digits.parse().ok()
    }

    /// Split `basename` into the text before and after this framecode
    #[must_use]
    pub fn split<'a>(&self, basename: &'a str) -> (&'a str, &'a str) {
        (&basename[..self.start], &basename[self.end..])
    }
}

/// Find the framecode of a basename.
///
/// Scans the stem right to left, skips trailing non-digits and takes the
/// contiguous digit run that follows. Returns `None` when the stem holds no digit.
///
/// # Examples
///
/// ```
/// use frameseq::core::framecode::extract;
///
/// let fc = extract("shot010_frame0200.exr").unwrap();
/// assert_eq!(fc.digits, "0200");
/// assert_eq!(fc.width(), 4);
/// assert_eq!(fc.value(), Some(200));
/// assert!(extract("readme.txt").is_none());
/// ```
#[must_use]
pub fn extract(basename: &str) -> Option<Framecode> {
    let (stem, _) = split_extension(basename);
    let bytes = stem.as_bytes();

    let end = bytes.iter().rposition(u8::is_ascii_digit)? + 1;
    let start = bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |idx| idx + 1);

    Some(Framecode {
        digits: stem[start..end].to_string(),
        start,
        end,
    })
}

/// Check whether the basename of `path` carries a framecode
#[must_use]
pub fn has_framecode(path: &str) -> bool {
    let (_, basename) = split_path(path);
    extract(basename).is_some()
}

/// Frame number encoded in the basename of `path`, if any
#[must_use]
pub fn frame_number(path: &str) -> Option<i64> {
    let (_, basename) = split_path(path);
    extract(basename).and_then(|fc| fc.value())
}

/// Build the sequence identity of a literal path along with its framecode
#[must_use]
pub fn sequence_key(path: &str) -> Option<(SequenceKey, Framecode)> {
    let (directory, basename) = split_path(path);
    let framecode = extract(basename)?;
    let (prefix, suffix) = framecode.split(basename);
    let key = SequenceKey::new(directory, prefix, suffix, framecode.width());
    Some((key, framecode))
}
