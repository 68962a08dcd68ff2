//! Sequence name templates.
//!
//! A template names every file of a sequence by replacing the frame number with
//! a single numeric slot, written in one of three notations:
//!
//! | Notation | Example | Width |
//! |----------|---------|-------|
//! | format code | `beauty.{:04d}.exr` | explicit |
//! | modulo | `beauty.%04d.exr` | explicit |
//! | number sign | `beauty.####.exr` | run length |
//!
//! Only the basename is scanned for a slot; the directory part is carried
//! through untouched.

use std::str::FromStr;

use thiserror::Error;

use crate::core::framecode::sequence_key;
use crate::core::types::{pad_frame, Notation, SequenceKey, WidthMatch};
use crate::utils::validation::{split_extension, split_path, MAX_SLOT_WIDTH};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("No frame number slot found in '{0}'")]
    NoSlotFound(String),

    #[error("Found {count} frame number slots in '{name}', expected exactly one")]
    AmbiguousSlot { name: String, count: usize },

    #[error("Malformed frame number slot at byte {position} of '{name}'")]
    MalformedSlot { name: String, position: usize },

    #[error("Frame number slot at byte {position} of '{name}' lies in the file extension")]
    SlotInExtension { name: String, position: usize },
}

/// A sequence name with exactly one numeric slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceName {
    directory: String,
    prefix: String,
    notation: Notation,
    width: usize,
    suffix: String,
}

/// A slot located inside a basename
struct Slot {
    notation: Notation,
    width: usize,
    start: usize,
    end: usize,
}

impl SequenceName {
    /// Parse a template in any of the three notations.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NoSlotFound` if the basename has no slot,
    /// `TemplateError::AmbiguousSlot` if it has more than one,
    /// `TemplateError::MalformedSlot` for a `{`, `}` or `%` that is not part of
    /// a complete `{:0Nd}` / `%0Nd` slot or for a slot wider than
    /// `MAX_SLOT_WIDTH`, or `TemplateError::SlotInExtension` if the slot sits
    /// after the last `.`, where no file's frame number can be.
    ///
    /// # Examples
    ///
    /// ```
    /// use frameseq::{Notation, SequenceName};
    ///
    /// let name = SequenceName::parse("renders/beauty.%04d.exr").unwrap();
    /// assert_eq!(name.width(), 4);
    /// assert_eq!(name.render(12), "renders/beauty.0012.exr");
    /// assert_eq!(name.to_notation(Notation::NumberSign).to_string(), "renders/beauty.####.exr");
    /// ```
    pub fn parse(name: &str) -> Result<Self, TemplateError> {
        let (directory, basename) = split_path(name);
        let mut slots = find_slots(basename).map_err(|position| TemplateError::MalformedSlot {
            name: name.to_string(),
            position: directory.len() + position,
        })?;

        match slots.len() {
            0 => Err(TemplateError::NoSlotFound(name.to_string())),
            1 => {
                let slot = slots.remove(0);
                let (stem, _) = split_extension(basename);
                if slot.start >= stem.len() {
                    return Err(TemplateError::SlotInExtension {
                        name: name.to_string(),
                        position: directory.len() + slot.start,
                    });
                }
                Ok(Self {
                    directory: directory.to_string(),
                    prefix: basename[..slot.start].to_string(),
                    notation: slot.notation,
                    width: slot.width,
                    suffix: basename[slot.end..].to_string(),
                })
            }
            count => Err(TemplateError::AmbiguousSlot {
                name: name.to_string(),
                count,
            }),
        }
    }

    /// Build the template of a sequence identity in the given notation
    #[must_use]
    pub fn from_key(key: &SequenceKey, notation: Notation) -> Self {
        Self {
            directory: key.directory.clone(),
            prefix: key.prefix.clone(),
            notation,
            width: key.width,
            suffix: key.suffix.clone(),
        }
    }

    /// The sequence identity this template names
    #[must_use]
    pub fn key(&self) -> SequenceKey {
        SequenceKey::new(&self.directory, &self.prefix, &self.suffix, self.width)
    }

    #[must_use]
    pub fn notation(&self) -> Notation {
        self.notation
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Substitute `frame` for the slot.
    ///
    /// The absolute value is zero-padded to the template width; numbers wider
    /// than the width are written in full.
    #[must_use]
    pub fn render(&self, frame: i64) -> String {
        format!(
            "{}{}{}{}",
            self.directory,
            self.prefix,
            pad_frame(frame, self.width),
            self.suffix
        )
    }

    /// Same template with the slot rewritten in another notation
    #[must_use]
    pub fn to_notation(&self, notation: Notation) -> Self {
        Self {
            notation,
            ..self.clone()
        }
    }

    /// Anchored regular expression matching every file of this sequence.
    ///
    /// The digits may carry a leading `-`, as rendered negative frames do.
    ///
    /// # Examples
    ///
    /// ```
    /// use frameseq::{SequenceName, WidthMatch};
    ///
    /// let name = SequenceName::parse("f.##.png").unwrap();
    /// assert_eq!(name.regex(WidthMatch::Exact), r"^f\.-?\d{2}\.png$");
    /// ```
    #[must_use]
    pub fn regex(&self, width: WidthMatch) -> String {
        let digits = match width {
            WidthMatch::Any => r"-?\d+".to_string(),
            WidthMatch::Exact => format!(r"-?\d{{{}}}", self.width),
            WidthMatch::Min => format!(r"-?\d{{{},}}", self.width),
            WidthMatch::Max => format!(r"-?\d{{1,{}}}", self.width),
        };
        format!(
            "^{}{}{}{}$",
            regex::escape(&self.directory),
            regex::escape(&self.prefix),
            digits,
            regex::escape(&self.suffix)
        )
    }

    /// Check whether `candidate` belongs to this sequence.
    ///
    /// A candidate may be a literal path (it matches when its directory, prefix,
    /// suffix and framecode width agree) or another template naming the same
    /// sequence in any notation.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let key = self.key();
        match Self::parse(candidate) {
            Ok(other) => other.key() == key,
            Err(_) => sequence_key(candidate).is_some_and(|(other, _)| other == key),
        }
    }
}

impl FromStr for SequenceName {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SequenceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.directory,
            self.prefix,
            self.notation.slot(self.width),
            self.suffix
        )
    }
}

/// Locate every slot in `basename`, or the byte position of a malformed one
fn find_slots(basename: &str) -> Result<Vec<Slot>, usize> {
    let bytes = basename.as_bytes();
    let mut slots = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                let run = bytes[i..].iter().take_while(|&&b| b == b'#').count();
                if run > MAX_SLOT_WIDTH {
                    return Err(i);
                }
                slots.push(Slot {
                    notation: Notation::NumberSign,
                    width: run,
                    start: i,
                    end: i + run,
                });
                i += run;
            }
            b'{' => {
                if bytes.get(i + 1) != Some(&b':') {
                    return Err(i);
                }
                let (width, len) = padded_width(&bytes[i + 2..], b"d}").ok_or(i)?;
                slots.push(Slot {
                    notation: Notation::FormatCode,
                    width,
                    start: i,
                    end: i + 2 + len,
                });
                i += 2 + len;
            }
            b'%' => {
                let (width, len) = padded_width(&bytes[i + 1..], b"d").ok_or(i)?;
                slots.push(Slot {
                    notation: Notation::Modulo,
                    width,
                    start: i,
                    end: i + 1 + len,
                });
                i += 1 + len;
            }
            b'}' => return Err(i),
            _ => i += 1,
        }
    }

    Ok(slots)
}

/// Parse `0N<terminator>` at the start of `bytes`, returning the width N and
/// the number of bytes consumed. N must be between 1 and `MAX_SLOT_WIDTH`.
fn padded_width(bytes: &[u8], terminator: &[u8]) -> Option<(usize, usize)> {
    let rest = bytes.strip_prefix(b"0")?;
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || !rest[digits..].starts_with(terminator) {
        return None;
    }

    let width: usize = std::str::from_utf8(&rest[..digits]).ok()?.parse().ok()?;
    if width == 0 || width > MAX_SLOT_WIDTH {
        return None;
    }

    Some((width, 1 + digits + terminator.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_notation() {
        let cases = [
            ("beauty.{:04d}.exr", Notation::FormatCode),
            ("beauty.%04d.exr", Notation::Modulo),
            ("beauty.####.exr", Notation::NumberSign),
        ];
        for (input, notation) in cases {
            let name = SequenceName::parse(input).unwrap();
            assert_eq!(name.notation(), notation, "{input}");
            assert_eq!(name.width(), 4);
            assert_eq!(name.prefix(), "beauty.");
            assert_eq!(name.suffix(), ".exr");
            assert_eq!(name.to_string(), input);
        }
    }

    #[test]
    fn test_parse_wide_slots() {
        assert_eq!(SequenceName::parse("f{:012d}").unwrap().width(), 12);
        assert_eq!(SequenceName::parse("f%010d.tif").unwrap().width(), 10);
        assert_eq!(SequenceName::parse("#").unwrap().width(), 1);
    }

    #[test]
    fn test_parse_keeps_directory() {
        let name = SequenceName::parse("shots/sh#10/comp.%03d.png").unwrap();
        assert_eq!(name.directory(), "shots/sh#10/");
        assert_eq!(name.prefix(), "comp.");
        assert_eq!(name.render(5), "shots/sh#10/comp.005.png");
    }

    #[test]
    fn test_parse_no_slot() {
        assert_eq!(
            SequenceName::parse("beauty.0001.exr"),
            Err(TemplateError::NoSlotFound("beauty.0001.exr".to_string()))
        );
        // Braces and percent signs elsewhere in the directory are not scanned
        assert!(matches!(
            SequenceName::parse("50%/{draft}/f.png"),
            Err(TemplateError::NoSlotFound(_))
        ));
    }

    #[test]
    fn test_parse_ambiguous() {
        assert_eq!(
            SequenceName::parse("a##_b##.png"),
            Err(TemplateError::AmbiguousSlot {
                name: "a##_b##.png".to_string(),
                count: 2
            })
        );
        assert!(matches!(
            SequenceName::parse("a%04d_{:04d}.png"),
            Err(TemplateError::AmbiguousSlot { count: 2, .. })
        ));
    }

    #[test]
    fn test_parse_malformed() {
        for (input, position) in [
            ("f.{:4d}.png", 2),
            ("f.{:00d}.png", 2),
            ("f.{:04}.png", 2),
            ("f.%4d.png", 2),
            ("f.%d.png", 2),
            ("dir/f.%00d.png", 6),
            ("50%_f.####.png", 2),
            ("f.{draft}.####.png", 2),
            ("f.}.####.png", 2),
            ("f.%09999999999d.png", 2),
            ("f.{:0256d}.png", 2),
            ("f.%099999999999999999999999d.png", 2),
        ] {
            assert_eq!(
                SequenceName::parse(input),
                Err(TemplateError::MalformedSlot {
                    name: input.to_string(),
                    position
                }),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_width_limit() {
        let widest = format!("f.{{:0{MAX_SLOT_WIDTH}d}}.png");
        let name = SequenceName::parse(&widest).unwrap();
        assert_eq!(name.width(), MAX_SLOT_WIDTH);
        assert_eq!(
            name.to_notation(Notation::NumberSign).to_string().len(),
            MAX_SLOT_WIDTH + "f..png".len()
        );

        let hashes = format!("f.{}.png", "#".repeat(MAX_SLOT_WIDTH + 1));
        assert!(matches!(
            SequenceName::parse(&hashes),
            Err(TemplateError::MalformedSlot { position: 2, .. })
        ));
    }

    #[test]
    fn test_parse_slot_in_extension() {
        for (input, position) in [
            ("render.####", 7),
            ("render.%04d", 7),
            ("shots/render.{:04d}", 13),
        ] {
            assert_eq!(
                SequenceName::parse(input),
                Err(TemplateError::SlotInExtension {
                    name: input.to_string(),
                    position
                }),
                "{input}"
            );
        }
        // No extension at all, or a leading dot only
        assert_eq!(SequenceName::parse("####").unwrap().prefix(), "");
        assert_eq!(SequenceName::parse(".####").unwrap().prefix(), ".");
    }

    #[test]
    fn test_render_padding() {
        let name = SequenceName::parse("f.####.png").unwrap();
        assert_eq!(name.render(1), "f.0001.png");
        assert_eq!(name.render(123_456), "f.123456.png");
        assert_eq!(name.render(-4), "f.-0004.png");
    }

    #[test]
    fn test_notation_conversion_keeps_digits() {
        let name = SequenceName::parse("comp_v2.{:05d}.jpg").unwrap();
        for frame in [0, 7, 1001, -12, 9_999_999] {
            let rendered: Vec<String> = Notation::ALL
                .iter()
                .map(|n| name.to_notation(*n).render(frame))
                .collect();
            assert!(rendered.iter().all(|r| r == &rendered[0]), "{rendered:?}");
        }
        assert_eq!(
            name.to_notation(Notation::Modulo).to_string(),
            "comp_v2.%05d.jpg"
        );
    }

    #[test]
    fn test_regex_compiles_and_matches() {
        let name = SequenceName::parse("out/f(1).###.png").unwrap();

        let exact = regex::Regex::new(&name.regex(WidthMatch::Exact)).unwrap();
        assert!(exact.is_match("out/f(1).012.png"));
        assert!(!exact.is_match("out/f(1).0012.png"));
        assert!(!exact.is_match("xout/f(1).012.png"));

        let min = regex::Regex::new(&name.regex(WidthMatch::Min)).unwrap();
        assert!(min.is_match("out/f(1).0012.png"));
        assert!(!min.is_match("out/f(1).12.png"));

        let max = regex::Regex::new(&name.regex(WidthMatch::Max)).unwrap();
        assert!(max.is_match("out/f(1).12.png"));
        assert!(!max.is_match("out/f(1).0012.png"));

        let any = regex::Regex::new(&name.regex(WidthMatch::Any)).unwrap();
        assert!(any.is_match("out/f(1).1.png"));
        assert!(!any.is_match("out/f(1).x.png"));

        for width in [WidthMatch::Any, WidthMatch::Exact, WidthMatch::Min] {
            let pattern = regex::Regex::new(&name.regex(width)).unwrap();
            assert!(pattern.is_match(&name.render(-4)), "{width:?}");
        }
    }

    #[test]
    fn test_matches_paths_and_templates() {
        let name = SequenceName::parse("renders/f.####.png").unwrap();
        assert!(name.matches("renders/f.0001.png"));
        assert!(name.matches("renders/f.{:04d}.png"));
        assert!(name.matches("renders/f.%04d.png"));
        assert!(!name.matches("renders/f.001.png"));
        assert!(!name.matches("other/f.0001.png"));
        assert!(!name.matches("renders/f.0001.jpg"));
        assert!(!name.matches("renders/notes.txt"));
    }

    #[test]
    fn test_from_key_roundtrip() {
        let key = SequenceKey::new("a/", "b_", ".tif", 3);
        let name = SequenceName::from_key(&key, Notation::Modulo);
        assert_eq!(name.to_string(), "a/b_%03d.tif");
        assert_eq!(name.key(), key);
        assert_eq!("a/b_%03d.tif".parse::<SequenceName>().unwrap(), name);
    }
}
