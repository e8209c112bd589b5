// YouTube embed URL canonicalization
// Editors paste whatever the browser shows; the store only keeps URLs usable as an iframe src.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::embed::{EMBED_BASE_URL, VIDEO_ID_LENGTH};
use crate::config::regex::GROUP_1;
use crate::errors::{AppError, AppResult};

const EMBED_PATTERN: &str =
    r"(?i)^https://(?:www\.)?youtube\.com/embed/([A-Za-z0-9_-]{11})(?:[?&].*)?$";
const SHORT_PATTERN: &str = r"(?i)^https://youtu\.be/([A-Za-z0-9_-]{11})(?:\?.*)?$";
const WATCH_PATTERN: &str = r"(?i)^https://(?:www\.)?youtube\.com/(?:watch|shorts)\?([^#]+)$";
const V_PARAM_PATTERN: &str = r"[?&]v=([A-Za-z0-9_-]{11})";
const TRAILING_ID_PATTERN: &str = r"([A-Za-z0-9_-]{11})$";

struct Patterns {
    embed: Regex,
    short: Regex,
    watch: Regex,
    v_param: Regex,
    trailing_id: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        embed: Regex::new(EMBED_PATTERN).expect("embed pattern is valid"),
        short: Regex::new(SHORT_PATTERN).expect("short link pattern is valid"),
        watch: Regex::new(WATCH_PATTERN).expect("watch pattern is valid"),
        v_param: Regex::new(V_PARAM_PATTERN).expect("v parameter pattern is valid"),
        trailing_id: Regex::new(TRAILING_ID_PATTERN).expect("trailing id pattern is valid"),
    })
}

/// Recognized shape of a video reference
#[derive(Debug, Clone, PartialEq, Eq)]
enum VideoReference<'a> {
    /// Already an embed URL; kept verbatim
    Embed { url: &'a str, id: &'a str },
    /// Any other shape resolved to a bare id
    Id(String),
}

fn classify(trimmed: &str) -> Option<VideoReference<'_>> {
    let patterns = patterns();

    if let Some(captures) = patterns.embed.captures(trimmed) {
        let id = captures.get(GROUP_1)?.as_str();
        return Some(VideoReference::Embed { url: trimmed, id });
    }

    if let Some(captures) = patterns.short.captures(trimmed) {
        return captures
            .get(GROUP_1)
            .map(|m| VideoReference::Id(m.as_str().to_string()));
    }

    if let Some(captures) = patterns.watch.captures(trimmed) {
        let query = captures.get(GROUP_1).map(|m| m.as_str()).unwrap_or_default();
        let from_query = url::form_urlencoded::parse(query.as_bytes())
            .find_map(|(key, value)| (key == "v").then(|| value.into_owned()))
            .filter(|id| is_valid_video_id(id));
        if let Some(id) = from_query {
            return Some(VideoReference::Id(id));
        }

        if let Some(id) = patterns
            .v_param
            .captures(trimmed)
            .and_then(|c| c.get(GROUP_1))
        {
            return Some(VideoReference::Id(id.as_str().to_string()));
        }
    }

    // Bare ids and unusual URL variants ending in an id
    patterns
        .trailing_id
        .captures(trimmed)
        .and_then(|c| c.get(GROUP_1))
        .map(|m| VideoReference::Id(m.as_str().to_string()))
}

/// Canonicalize an editor-supplied video reference.
///
/// Returns `https://www.youtube.com/embed/<id>` (an embed URL that was
/// already canonical is returned as-is, query string included) or an
/// empty string when the input cannot be resolved to a video id.
pub fn canonicalize_embed_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match classify(trimmed) {
        Some(VideoReference::Embed { url, .. }) => url.to_string(),
        Some(VideoReference::Id(id)) => format!("{EMBED_BASE_URL}{id}"),
        None => String::new(),
    }
}

/// Video id the canonicalizer would embed for `input`
pub fn extract_video_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match classify(trimmed)? {
        VideoReference::Embed { id, .. } => Some(id.to_string()),
        VideoReference::Id(id) => Some(id),
    }
}

pub fn is_valid_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LENGTH
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

pub fn is_canonical_embed_url(input: &str) -> bool {
    patterns().embed.is_match(input.trim())
}

/// A canonicalized embed URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmbedUrl(String);

impl EmbedUrl {
    pub fn parse(input: &str) -> AppResult<Self> {
        let canonical = canonicalize_embed_url(input);
        if canonical.is_empty() {
            return Err(AppError::validation(
                "embedUrl",
                "Debes proporcionar un enlace embed válido de YouTube.",
            ));
        }
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn video_id(&self) -> Option<String> {
        extract_video_id(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for EmbedUrl {
    type Error = AppError;

    fn try_from(value: &str) -> AppResult<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for EmbedUrl {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Self::parse(&value)
    }
}

impl From<EmbedUrl> for String {
    fn from(url: EmbedUrl) -> Self {
        url.0
    }
}

impl fmt::Display for EmbedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_values::*;

    #[test]
    fn test_watch_url_is_rewritten() {
        assert_eq!(canonicalize_embed_url(TEST_WATCH_URL), TEST_EMBED_URL);
    }

    #[test]
    fn test_short_link_drops_query() {
        assert_eq!(canonicalize_embed_url(TEST_SHORT_URL), TEST_EMBED_URL);
        assert_eq!(
            canonicalize_embed_url("https://youtu.be/dQw4w9WgXcQ?si=abc123&t=42"),
            TEST_EMBED_URL
        );
    }

    #[test]
    fn test_canonical_embed_is_returned_unchanged() {
        assert_eq!(canonicalize_embed_url(TEST_EMBED_URL), TEST_EMBED_URL);
        let with_query = "https://www.youtube.com/embed/_jDeXfDVK10?autoplay=1&mute=1";
        assert_eq!(canonicalize_embed_url(with_query), with_query);
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(
            canonicalize_embed_url("   https://youtu.be/dQw4w9WgXcQ \n"),
            TEST_EMBED_URL
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(canonicalize_embed_url("not a url"), "");
        assert_eq!(canonicalize_embed_url(""), "");
        assert_eq!(canonicalize_embed_url("    "), "");
        assert_eq!(canonicalize_embed_url("https://vimeo.com/1234"), "");
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            canonicalize_embed_url("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=10s"),
            TEST_EMBED_URL
        );
        assert_eq!(
            canonicalize_embed_url("https://youtube.com/shorts?v=dQw4w9WgXcQ"),
            TEST_EMBED_URL
        );
    }

    #[test]
    fn test_watch_url_with_overlong_v_uses_scan() {
        // v is 12 chars: query lookup rejects it, the v= scan takes the first 11
        assert_eq!(
            canonicalize_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQZ"),
            TEST_EMBED_URL
        );
    }

    #[test]
    fn test_watch_url_never_embeds_unsafe_id() {
        let result = canonicalize_embed_url("https://www.youtube.com/watch?v=%3Cscript%3Ex");
        assert_eq!(result, "");
    }

    #[test]
    fn test_bare_id_fallback() {
        assert_eq!(canonicalize_embed_url(TEST_VIDEO_ID), TEST_EMBED_URL);
        assert_eq!(
            canonicalize_embed_url("https://m.youtube.com/v/dQw4w9WgXcQ"),
            TEST_EMBED_URL
        );
    }

    #[test]
    fn test_trailing_fallback_accepts_any_id_shaped_suffix() {
        // Preserved behavior: any string ending in 11 id characters resolves
        assert_eq!(
            canonicalize_embed_url("https://example.com/abcdefghijk"),
            "https://www.youtube.com/embed/abcdefghijk"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            TEST_WATCH_URL,
            TEST_SHORT_URL,
            TEST_EMBED_URL,
            TEST_VIDEO_ID,
            "https://www.youtube.com/embed/_jDeXfDVK10?autoplay=1",
            "not a url",
        ];
        for input in inputs {
            let once = canonicalize_embed_url(input);
            assert_eq!(canonicalize_embed_url(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_short_and_embed_forms_agree() {
        for id in ["dQw4w9WgXcQ", "_jDeXfDVK10", "a-b_c-d_e-f", "ABCDEFGHIJK"] {
            let expected = format!("https://www.youtube.com/embed/{id}");
            assert_eq!(canonicalize_embed_url(&format!("https://youtu.be/{id}")), expected);
            assert_eq!(canonicalize_embed_url(&expected), expected);
        }
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(extract_video_id(TEST_WATCH_URL).as_deref(), Some(TEST_VIDEO_ID));
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/_jDeXfDVK10?autoplay=1").as_deref(),
            Some("_jDeXfDVK10")
        );
        assert_eq!(extract_video_id("nope"), None);
    }

    #[test]
    fn test_is_valid_video_id() {
        assert!(is_valid_video_id(TEST_VIDEO_ID));
        assert!(!is_valid_video_id("short"));
        assert!(!is_valid_video_id("dQw4w9WgXc!"));
        assert!(!is_valid_video_id("dQw4w9WgXcQQ"));
    }

    #[test]
    fn test_is_canonical_embed_url() {
        assert!(is_canonical_embed_url(TEST_EMBED_URL));
        assert!(!is_canonical_embed_url(TEST_WATCH_URL));
    }

    #[test]
    fn test_embed_url_newtype() {
        let url = EmbedUrl::parse(TEST_SHORT_URL).unwrap();
        assert_eq!(url.as_str(), TEST_EMBED_URL);
        assert_eq!(url.video_id().as_deref(), Some(TEST_VIDEO_ID));
        assert_eq!(url.to_string(), TEST_EMBED_URL);

        let err = EmbedUrl::try_from("not a url").unwrap_err();
        assert_eq!(err.field(), Some("embedUrl"));
    }

    #[test]
    fn test_embed_url_deserialize_canonicalizes() {
        let url: EmbedUrl = serde_json::from_str(&format!("\"{TEST_WATCH_URL}\"")).unwrap();
        assert_eq!(url.as_str(), TEST_EMBED_URL);
        assert!(serde_json::from_str::<EmbedUrl>("\"garbage here\"").is_err());
    }
}
