//! Core data types for image sequence identification.
//!
//! - [`framecode`]: locating the frame number inside a filename
//! - [`types`]: [`Notation`](types::Notation), [`WidthMatch`](types::WidthMatch)
//!   and [`SequenceKey`](types::SequenceKey), the identity of a sequence
//! - [`sequence`]: [`FrameSequence`](sequence::FrameSequence), one matched group
//!   of files and its queries
//!
//! ## Sequence identity
//!
//! Files belong to the same sequence when everything except the frame number
//! agrees, including the padding of the frame number:
//!
//! | Path | Directory | Prefix | Suffix | Width |
//! |------|-----------|--------|--------|-------|
//! | `shot/f.0001.png` | `shot/` | `f.` | `.png` | 4 |
//! | `shot/f.0002.png` | `shot/` | `f.` | `.png` | 4 |
//! | `shot/f.001.png`  | `shot/` | `f.` | `.png` | 3 |
//!
//! The first two form one sequence; the third is a different one.

pub mod framecode;
pub mod sequence;
pub mod types;
