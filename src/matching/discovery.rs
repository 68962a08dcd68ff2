//! Entry points that turn an already-listed batch of paths into sequences.
//!
//! Listing directories is left to the caller; these functions only see strings.

use tracing::debug;

use crate::core::framecode::sequence_key;
use crate::core::sequence::FrameSequence;
use crate::core::types::SequenceKey;
use crate::matching::engine::{MatchError, MatchingConfig, SequenceMatcher, SequenceScan};
use crate::parsing::template::{SequenceName, TemplateError};

/// Find every sequence among `paths` with the default configuration.
///
/// Sequences come back ordered by directory, prefix, suffix and width, so the
/// same input always yields the same output.
///
/// # Examples
///
/// ```
/// use frameseq::find_all_sequences;
///
/// let scan = find_all_sequences(["f.0001.png", "f.0002.png", "f.0005.png", "g.0001.png"]);
/// assert_eq!(scan.sequences.len(), 2);
/// assert_eq!(scan.sequences[0].missing_range_string(), "3-4");
/// ```
pub fn find_all_sequences<I, S>(paths: I) -> SequenceScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SequenceMatcher::new().sequences(paths)
}

/// Find every sequence among `paths` using a custom grouping policy
pub fn find_all_sequences_with<I, S>(paths: I, config: &MatchingConfig) -> SequenceScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SequenceMatcher::with_config(config.clone()).sequences(paths)
}

/// Find the sequence named by `target` among `paths`.
///
/// `target` is either a template (`renders/f.####.png`, `renders/f.%04d.png`,
/// `renders/f.{:04d}.png`) or a literal path of any frame of the sequence
/// (`renders/f.0001.png`); it does not need to be one of `paths`.
///
/// # Errors
///
/// Returns `MatchError::Template` for an ambiguous or malformed template,
/// `MatchError::NoFramecode` if `target` is neither a template nor a path with
/// a framecode, or `MatchError::NoMatchingSequence` if no path belongs to it.
pub fn find_sequence<I, S>(paths: I, target: &str) -> Result<FrameSequence, MatchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let key = target_key(target)?;
    debug!(
        requested = target,
        directory = %key.directory,
        prefix = %key.prefix,
        suffix = %key.suffix,
        width = key.width,
        "Resolved sequence target"
    );

    let mut result = SequenceMatcher::new().group(paths);
    result
        .groups
        .remove(&key)
        .and_then(|frames| FrameSequence::new(key, frames.into_iter().collect()))
        .ok_or_else(|| MatchError::NoMatchingSequence(target.to_string()))
}

/// Sequence identity named by a template or a literal path
fn target_key(target: &str) -> Result<SequenceKey, MatchError> {
    match SequenceName::parse(target) {
        Ok(name) => Ok(name.key()),
        Err(TemplateError::NoSlotFound(_)) => sequence_key(target)
            .map(|(key, _)| key)
            .ok_or_else(|| MatchError::NoFramecode(target.to_string())),
        Err(e) => Err(e.into()),
    }
}
