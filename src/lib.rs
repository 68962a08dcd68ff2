//! # frameseq
//!
//! A library for finding numbered image sequences and working with frame ranges.
//!
//! Rendered animation, scanned plates and simulation caches are usually stored as
//! one file per frame: `beauty.1001.exr`, `beauty.1002.exr`, and so on. Tools that
//! consume them need to know which files belong together, which frames exist,
//! which are missing, and how to name the whole set in the notation another
//! application expects.
//!
//! `frameseq` answers these questions from path strings alone. It never touches
//! the filesystem: callers hand it a listing and get structured results back.
//!
//! ## Features
//!
//! - **Framecode extraction**: the last digit run of a filename's stem is its frame number
//! - **Width-aware grouping**: `f.01.png` and `f.001.png` are different sequences
//! - **Three name notations**: `f.{:04d}.png`, `f.%04d.png` and `f.####.png`, convertible
//!   into one another
//! - **Frame range expressions**: `1-20, 23 24`, `10-1`, `1-100-5`, parsed into exact
//!   sets and formatted back into canonical text
//! - **Gap detection**: missing frames between the first and last frame present
//!
//! ## Example
//!
//! ```rust
//! use frameseq::{find_all_sequences, FrameRangeSet, Notation};
//!
//! let listing = ["f.0001.png", "f.0002.png", "f.0005.png", "g.0001.png", "notes.txt"];
//! let scan = find_all_sequences(listing);
//!
//! let f = &scan.sequences[0];
//! assert_eq!(f.name(Notation::Modulo), "f.%04d.png");
//! assert_eq!(f.range_string(), "1-2, 5");
//! assert_eq!(f.missing().unwrap(), FrameRangeSet::parse("3-4").unwrap());
//! assert_eq!(scan.unmatched.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Framecodes, sequence keys and the `FrameSequence` entity
//! - [`parsing`]: Sequence name templates and frame range expressions
//! - [`matching`]: Grouping paths into sequences and discovery entry points
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Path splitting helpers and resource limits

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::framecode::{extract, frame_number, has_framecode, Framecode};
pub use core::sequence::{zip_sequences, FrameSequence};
pub use core::types::*;
pub use matching::discovery::{find_all_sequences, find_all_sequences_with, find_sequence};
pub use matching::engine::{MatchError, MatchingConfig, SequenceMatcher, SequenceScan};
pub use parsing::ranges::{parse_frame_list, FrameRangeSet, ParseError};
pub use parsing::template::{SequenceName, TemplateError};
