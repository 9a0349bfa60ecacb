//! Extraction of video identifiers and start offsets from free-form input.

use crate::video::VideoId;
use regex::Regex;
use std::sync::LazyLock;

/// Accepted link shapes, tried in order. Each captures the 11 character id.
static VIDEO_LINK_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // watch page: youtube.com/watch?v=<id>, possibly after other query params
        Regex::new(r"youtube.+[&?]v=([A-Za-z0-9_-]{11})").expect("valid watch-page pattern"),
        // link shortener
        Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").expect("valid short-link pattern"),
        // share widgets percent-encode the query string
        Regex::new(r"youtube.+%3Fv%3D([A-Za-z0-9_-]{11})").expect("valid encoded pattern"),
    ]
});

static START_TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d{2})$").expect("valid start time pattern"));

/// Extracts the canonical video id from a pasted link.
///
/// Returns `None` if the input does not contain any of the accepted link shapes.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_LINK_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .and_then(|id| VideoId::parse(id.as_str()).ok())
    })
}

/// Parses a `M:SS` start offset into seconds.
///
/// Empty input means "no offset" and yields `Some(0)`. Malformed input yields
/// `None`, which is distinct from zero. Whitespace alone is malformed.
pub fn parse_start_time(text: &str) -> Option<u32> {
    if text.is_empty() {
        return Some(0);
    }

    let caps = START_TIME_PATTERN.captures(text.trim())?;
    let minutes: u32 = caps[1].parse().ok()?;
    let seconds: u32 = caps[2].parse().ok()?;

    minutes.checked_mul(60)?.checked_add(seconds)
}
