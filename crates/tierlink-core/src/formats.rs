//! Format-name list handling.
//!
//! Format names travel as comma-separated strings (`FORMAT_NAMES`, the `formats`
//! query parameter, custom-action URLs). Order matters: it is the submission order
//! of copy jobs, and the first entry is the one archived on remove.

/// Split a comma-separated format list, trimming whitespace and dropping blanks.
pub fn parse_format_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canonical comma-separated form of a format list: `" A , B "` becomes `"A,B"`.
pub fn normalize_formats(raw: &str) -> String {
    parse_format_names(raw).join(",")
}
