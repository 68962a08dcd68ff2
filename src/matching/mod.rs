//! Sequence matching and discovery.
//!
//! - [`SequenceMatcher`](engine::SequenceMatcher): buckets paths by their
//!   [`SequenceKey`](crate::core::types::SequenceKey)
//! - [`find_all_sequences`](discovery::find_all_sequences) and
//!   [`find_sequence`](discovery::find_sequence): build
//!   [`FrameSequence`](crate::core::sequence::FrameSequence) values from a
//!   listing supplied by the caller
//!
//! ## Matching Algorithm
//!
//! 1. **Split**: each path is split into directory and basename
//! 2. **Extract**: the last digit run of the basename stem is the framecode
//! 3. **Bucket**: directory, prefix, suffix and framecode width form the key
//! 4. **Filter**: buckets smaller than `min_frames` are dropped
//!
//! Paths without a framecode are returned as
//! [`MatchError`](engine::MatchError) values next to the sequences, so a
//! listing mixing frames and unrelated files never fails as a whole.

pub mod discovery;
pub mod engine;
