//! Parsers for the two kinds of user-typed shorthand.
//!
//! - **Templates** ([`template`]): a sequence name with one numeric slot, in
//!   `{:04d}`, `%04d` or `####` notation
//! - **Frame ranges** ([`ranges`]): expressions such as `1-20, 23 24` or
//!   `1-10-2`, parsed into a [`FrameRangeSet`](ranges::FrameRangeSet) and
//!   formatted back into canonical text
//!
//! ## Example
//!
//! ```rust
//! use frameseq::parsing::ranges::FrameRangeSet;
//! use frameseq::parsing::template::SequenceName;
//!
//! let name = SequenceName::parse("comp.%04d.exr").unwrap();
//! let frames = FrameRangeSet::parse("1-3, 10").unwrap();
//!
//! let paths: Vec<String> = frames.iter().map(|f| name.render(f)).collect();
//! assert_eq!(paths[3], "comp.0010.exr");
//! ```

pub mod ranges;
pub mod template;
