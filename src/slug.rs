use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::config::content::FALLBACK_NEWS_SLUG;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("slug char pattern is valid"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Lowercase ASCII slug of a headline. Accented letters are dropped, not transliterated.
pub fn slugify_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let kept = disallowed_chars().replace_all(&lowered, "");
    let slug = whitespace_runs().replace_all(&kept, "-").into_owned();

    if slug.is_empty() {
        FALLBACK_NEWS_SLUG.to_string()
    } else {
        slug
    }
}

pub fn build_slug(title: &str, timestamp_millis: i64) -> String {
    let base = slugify_title(title);
    format!("{base}-{timestamp_millis}")
}

pub fn build_slug_now(title: &str) -> String {
    build_slug(title, Utc::now().timestamp_millis())
}
