//! Centralized validation and helper functions.

/// Maximum number of integers a range expression or a gap query may expand to (DOS protection)
pub const MAX_EXPANDED_FRAMES: u64 = 1_000_000;

/// Widest frame number slot a sequence name may declare; no filename is longer
pub const MAX_SLOT_WIDTH: usize = 255;

/// Check whether expanding `count` more integers on top of `current` stays within the limit.
///
/// Call this with the running total BEFORE expanding a range or a gap.
/// Returns an error message if the limit would be exceeded, None if safe to expand.
///
/// # Example
/// ```
/// use frameseq::utils::validation::check_frame_limit;
///
/// assert!(check_frame_limit(0, 10).is_none());
/// assert!(check_frame_limit(999_999, 2).is_some());
/// ```
#[must_use]
pub fn check_frame_limit(current: u64, count: u64) -> Option<String> {
    if current.saturating_add(count) > MAX_EXPANDED_FRAMES {
        Some(format!(
            "Too many frames: expanding would pass the maximum of {MAX_EXPANDED_FRAMES}"
        ))
    } else {
        None
    }
}

/// Split a path string into its directory part and its basename.
///
/// The directory keeps its trailing separator so that `directory + basename`
/// reproduces the input exactly. Separators are the platform's, as reported
/// by [`std::path::is_separator`].
///
/// # Examples
///
/// ```
/// use frameseq::utils::validation::split_path;
///
/// assert_eq!(split_path("renders/beauty.0001.exr"), ("renders/", "beauty.0001.exr"));
/// assert_eq!(split_path("beauty.0001.exr"), ("", "beauty.0001.exr"));
/// ```
#[must_use]
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind(std::path::is_separator) {
        // Separators are ASCII, so idx + 1 is a char boundary
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

/// Split a basename into its stem and its extension (including the dot).
///
/// The extension is the text from the last `.` onwards, unless that `.` is the
/// first character (hidden files such as `.0001` have no extension).
///
/// # Examples
///
/// ```
/// use frameseq::utils::validation::split_extension;
///
/// assert_eq!(split_extension("frame.0001.png"), ("frame.0001", ".png"));
/// assert_eq!(split_extension("render.0001"), ("render", ".0001"));
/// assert_eq!(split_extension(".0001"), (".0001", ""));
/// assert_eq!(split_extension("frame0001"), ("frame0001", ""));
/// ```
#[must_use]
pub fn split_extension(basename: &str) -> (&str, &str) {
    match basename.rfind('.') {
        Some(idx) if idx > 0 => basename.split_at(idx),
        _ => (basename, ""),
    }
}
