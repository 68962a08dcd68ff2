use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::framecode::sequence_key;
use crate::core::sequence::FrameSequence;
use crate::core::types::SequenceKey;
use crate::parsing::template::TemplateError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("No framecode found in '{0}'")]
    NoFramecode(String),

    #[error("Frame number in '{0}' does not fit in a 64-bit integer")]
    FramecodeOutOfRange(String),

    #[error("No sequence matching '{0}' found")]
    NoMatchingSequence(String),

    #[error("'{path}' does not belong to sequence '{expected}'")]
    MixedSequence { expected: String, path: String },

    #[error("Cannot build a sequence from zero paths")]
    EmptySequence,

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl MatchError {
    /// The path this error is about, for per-path errors
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NoFramecode(path)
            | Self::FramecodeOutOfRange(path)
            | Self::MixedSequence { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Default minimum number of frames for a group to be reported as a sequence
pub const DEFAULT_MIN_FRAMES: usize = 1;

/// Configuration for the sequence matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Groups with fewer frames than this are not emitted as sequences
    pub min_frames: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_frames: DEFAULT_MIN_FRAMES,
        }
    }
}

/// Output of [`SequenceMatcher::group`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupResult {
    /// Frames of each sequence, ascending by frame number
    pub groups: BTreeMap<SequenceKey, Vec<(i64, String)>>,

    /// Paths excluded from every sequence, with the reason
    pub unmatched: Vec<MatchError>,
}

/// Sequences found among a batch of paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceScan {
    /// Sequences ordered by key: directory, prefix, suffix, width
    pub sequences: Vec<FrameSequence>,

    /// Paths excluded from every sequence, with the reason
    pub unmatched: Vec<MatchError>,
}

/// Groups path strings into sequences
#[derive(Debug, Clone, Default)]
pub struct SequenceMatcher {
    config: MatchingConfig,
}

impl SequenceMatcher {
    /// Create a matcher with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with custom configuration
    #[must_use]
    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Bucket every path by its sequence identity.
    ///
    /// Paths without a usable framecode are reported in
    /// [`GroupResult::unmatched`]; a path given more than once is kept once.
    pub fn group<I, S>(&self, paths: I) -> GroupResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets: BTreeMap<SequenceKey, BTreeMap<i64, String>> = BTreeMap::new();
        let mut unmatched = Vec::new();

        for path in paths {
            let path = path.as_ref();

            let Some((key, framecode)) = sequence_key(path) else {
                debug!(path, "No framecode, excluded from sequences");
                unmatched.push(MatchError::NoFramecode(path.to_string()));
                continue;
            };

            let Some(frame) = framecode.value() else {
                warn!(path, digits = %framecode.digits, "Frame number too large, excluded");
                unmatched.push(MatchError::FramecodeOutOfRange(path.to_string()));
                continue;
            };

            let bucket = buckets.entry(key).or_default();
            if bucket.insert(frame, path.to_string()).is_some() {
                debug!(path, frame, "Duplicate path ignored");
            }
        }

        let groups = buckets
            .into_iter()
            .map(|(key, frames)| (key, frames.into_iter().collect()))
            .collect();

        GroupResult { groups, unmatched }
    }

    /// Group `paths` and build a [`FrameSequence`] for every group that meets
    /// the configured minimum size
    pub fn sequences<I, S>(&self, paths: I) -> SequenceScan
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let GroupResult { groups, unmatched } = self.group(paths);

        let sequences = groups
            .into_iter()
            .filter(|(key, frames)| {
                let keep = frames.len() >= self.config.min_frames;
                if !keep {
                    debug!(
                        prefix = %key.prefix,
                        suffix = %key.suffix,
                        frames = frames.len(),
                        "Group below minimum size, skipped"
                    );
                }
                keep
            })
            .filter_map(|(key, frames)| FrameSequence::new(key, frames.into_iter().collect()))
            .collect();

        SequenceScan {
            sequences,
            unmatched,
        }
    }
}
