use serde::{Deserialize, Serialize};

/// Syntax used to express the numeric slot of a sequence name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    /// Format-string style: `frame.{:04d}.png`
    FormatCode,
    /// printf style: `frame.%04d.png`
    Modulo,
    /// Hash placeholders, one per digit: `frame.####.png`
    #[serde(rename = "numbersign")]
    NumberSign,
}

impl Notation {
    pub const ALL: [Notation; 3] = [Self::FormatCode, Self::Modulo, Self::NumberSign];

    /// The slot text for this notation at the given width
    #[must_use]
    pub fn slot(self, width: usize) -> String {
        match self {
            Self::FormatCode => format!("{{:0{width}d}}"),
            Self::Modulo => format!("%0{width}d"),
            Self::NumberSign => "#".repeat(width),
        }
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FormatCode => write!(f, "format_code"),
            Self::Modulo => write!(f, "modulo"),
            Self::NumberSign => write!(f, "numbersign"),
        }
    }
}

/// How strictly the digit count of a candidate frame number is matched
/// when building a pattern for a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthMatch {
    /// Frame numbers of any width
    #[default]
    Any,
    /// Only frame numbers with exactly the sequence's width
    Exact,
    /// Frame numbers at least as wide as the sequence's width
    Min,
    /// Frame numbers at most as wide as the sequence's width
    Max,
}

/// Identity of a sequence. Two files belong to the same sequence iff their keys are equal.
///
/// Field order defines the ordering used for deterministic output:
/// directory, then prefix, then suffix, then width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceKey {
    /// Directory part of the path, including its trailing separator (empty if none)
    pub directory: String,

    /// Basename text before the framecode
    pub prefix: String,

    /// Basename text after the framecode, extension included
    pub suffix: String,

    /// Digit count of the framecode, leading zeros included
    pub width: usize,
}

impl SequenceKey {
    pub fn new(
        directory: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        width: usize,
    ) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            width,
        }
    }
}

/// Zero-pad the absolute value of `frame` to `width` digits, keeping the sign in front.
///
/// Numbers wider than `width` are emitted in full, never truncated.
#[must_use]
pub fn pad_frame(frame: i64, width: usize) -> String {
    let digits = format!("{:0width$}", frame.unsigned_abs());
    if frame < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}
