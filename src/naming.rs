//! Pure helpers for names, sizes and timestamps of stored files.

use std::sync::{LazyLock, OnceLock};

use regex::Regex;
use time::format_description::FormatItem;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/.]+$").expect("valid extension regex"));

static STAMP_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-(\d{4}-\d{2}-\d{2}T\d{2}-\d{2}-\d{2}-\d{3}Z)$").expect("valid stamp regex")
});

static SLUG_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s-]").expect("valid slug regex"));

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

fn iso_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z",
        )
        .expect("valid iso format")
    })
}

fn stamp_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month]-[day]T[hour]-[minute]-[second]-[subsecond digits:3]Z",
        )
        .expect("valid stamp format")
    })
}

/// Human-readable size using a base-1024 table, e.g. `"2.45 MB"`.
///
/// Zero is `"0 Bytes"`. The value is rounded half away from zero to two
/// decimals and printed without trailing zeros. Sizes beyond the table stay
/// in its largest unit.
pub fn size_label(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut magnitude = 0usize;
    while magnitude + 1 < SIZE_UNITS.len() && bytes >= 1u64 << (10 * (magnitude + 1)) {
        magnitude += 1;
    }

    let value = bytes as f64 / (1u64 << (10 * magnitude)) as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[magnitude])
}

/// Display title recovered from a stored file name.
///
/// `quarterly-report-2024-05-01T12-30-45-123Z.pdf` becomes `Quarterly Report`.
pub fn title_from_filename(name: &str) -> String {
    let stem = EXTENSION_RE.replace(name, "");
    let stem = STAMP_SUFFIX_RE.replace(&stem, "");
    title_case(&stem.replace('-', " "))
}

/// Upper-cases the first word character of every word. Word characters are
/// ASCII alphanumerics and `_`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_word = false;
    for c in s.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_word = is_word;
    }
    out
}

/// Lowercased text after the last `.` of a file name, if any.
pub fn extension_of(name: &str) -> Option<String> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains('/') => Some(ext.to_ascii_lowercase()),
        _ => None,
    }
}

/// Reduces a title to `[a-z0-9-]`. Characters outside `[A-Za-z0-9]`,
/// whitespace and `-` are dropped first, then each whitespace run becomes a
/// single `-`, then the result is lowercased. An empty result falls back to
/// `file`.
pub fn sanitize_slug(title: &str) -> String {
    let kept = SLUG_DISALLOWED_RE.replace_all(title, "");
    let dashed = WHITESPACE_RUN_RE.replace_all(kept.trim(), "-");
    let slug = dashed.to_ascii_lowercase();
    if slug.is_empty() {
        "file".to_string()
    } else {
        slug
    }
}

/// ISO-8601 UTC with millisecond precision: `2024-05-01T12:30:45.123Z`.
pub fn iso_timestamp(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(iso_format())
        .unwrap_or_else(|_| "<time>".to_string())
}

/// Path-safe form of [`iso_timestamp`] with `:` and `.` replaced by `-`.
pub fn path_stamp(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(stamp_format())
        .unwrap_or_else(|_| "<time>".to_string())
}

/// Upload time encoded in a stored file name, as an ISO-8601 string.
pub fn stamp_from_filename(name: &str) -> Option<String> {
    let stem = EXTENSION_RE.replace(name, "");
    let caps = STAMP_SUFFIX_RE.captures(&stem)?;
    let dt = PrimitiveDateTime::parse(caps.get(1)?.as_str(), stamp_format()).ok()?;
    Some(iso_timestamp(dt.assume_utc()))
}

/// `<upload_dir>/<slug>-<stamp>.<extension>`.
pub fn upload_path(upload_dir: &str, title: &str, extension: &str, at: OffsetDateTime) -> String {
    let file_name = format!("{}-{}.{}", sanitize_slug(title), path_stamp(at), extension);
    let dir = upload_dir.trim_matches('/');
    if dir.is_empty() {
        file_name
    } else {
        format!("{}/{}", dir, file_name)
    }
}

#[cfg(test)]
#[path = "tests/naming_tests.rs"]
mod tests;
