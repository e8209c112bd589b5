use serde_json::Value;

use crate::api_types::{EmbedPreview, NavigationSection};
use crate::embed_url::{canonicalize_embed_url, extract_video_id};
use crate::navigation::NAVIGATION_TAGS;
use crate::tag_validator::normalize_tags_value;

// Stateless helpers the admin forms call while the editor types

pub async fn preview_embed_url(input: String) -> Result<EmbedPreview, String> {
    let embed_url = canonicalize_embed_url(&input);
    let video_id = if embed_url.is_empty() {
        None
    } else {
        extract_video_id(&embed_url)
    };

    Ok(EmbedPreview {
        is_valid: !embed_url.is_empty(),
        input,
        embed_url,
        video_id,
    })
}

pub async fn preview_tags(tags: Value) -> Result<Vec<String>, String> {
    Ok(normalize_tags_value(&tags))
}

pub async fn list_navigation_tags() -> Result<Vec<NavigationSection>, String> {
    Ok(NAVIGATION_TAGS
        .iter()
        .map(|(path, tag)| NavigationSection {
            path: path.to_string(),
            tag: tag.to_string(),
        })
        .collect())
}
