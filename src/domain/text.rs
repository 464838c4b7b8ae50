//! Body previews and timestamp formatting shared by the list views.

use chrono::NaiveDateTime;

/// Maximum characters of a post body shown in list views.
pub const PREVIEW_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";

/// Storage format of `posts.created_at`, identical to SQLite's `datetime('now')`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// First [`PREVIEW_CHARS`] characters of `body`, with [`ELLIPSIS`] appended
/// only when something was cut. Counts chars, not bytes.
pub fn preview(body: &str) -> String {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &body[..cut], ELLIPSIS),
        None => body.to_string(),
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}
