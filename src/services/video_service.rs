// Video gallery: create / update / delete / featured mirror / listing

use log::{debug, info};
use rusqlite::Connection;

use super::{new_document_id, require_id};
use crate::api_types::{ContentQuery, VideoInput, VideoRecord, VideoUpdate};
use crate::config::content::{DEFAULT_VIDEO_LIMIT, FEATURED_VIDEO_ID, MIN_VIDEO_TITLE_LENGTH};
use crate::embed_url::canonicalize_embed_url;
use crate::errors::{AppError, AppResult};
use crate::repositories::{SqliteVideoRepository, VideoRepository};
use crate::tag_validator::{normalize_tags, normalize_tags_value};
use crate::timestamps::now_timestamp;

const TITLE_TOO_SHORT: &str = "El título debe tener al menos 6 caracteres.";
const INVALID_EMBED: &str = "Debes proporcionar un enlace embed válido de YouTube.";
const MISSING_TAGS: &str = "Selecciona al menos una etiqueta para el video.";
const MISSING_ID: &str = "El identificador del video es obligatorio.";
const INCOMPLETE_FEATURED: &str =
    "El hero requiere título, video y al menos una etiqueta para sincronizarse.";

fn validate_title(title: &str) -> AppResult<String> {
    let trimmed = title.trim();
    // counted in UTF-16 units, as the web form measures it
    if trimmed.encode_utf16().count() < MIN_VIDEO_TITLE_LENGTH {
        return Err(AppError::validation("title", TITLE_TOO_SHORT));
    }
    Ok(trimmed.to_string())
}

fn validate_embed_url(embed_url: &str) -> AppResult<String> {
    let canonical = canonicalize_embed_url(embed_url);
    if canonical.is_empty() {
        return Err(AppError::validation("embedUrl", INVALID_EMBED));
    }
    Ok(canonical)
}

fn validate_tags(tags: Vec<String>) -> AppResult<Vec<String>> {
    if tags.is_empty() {
        return Err(AppError::validation("tags", MISSING_TAGS));
    }
    Ok(tags)
}

pub fn create_video(conn: &Connection, input: &VideoInput) -> AppResult<VideoRecord> {
    let title = validate_title(&input.title)?;
    let embed_url = validate_embed_url(&input.embed_url)?;
    let tags = validate_tags(normalize_tags_value(&input.tags))?;

    let now = now_timestamp();
    let video = VideoRecord {
        id: new_document_id(),
        title,
        embed_url,
        tags,
        is_featured: false,
        created_at: now.clone(),
        updated_at: now,
    };

    SqliteVideoRepository::new(conn).insert(&video)?;
    info!("Created video {} ({})", video.id, video.embed_url);
    Ok(video)
}

/// Applies the supplied fields; `Ok(None)` when the update carried nothing.
pub fn update_video(
    conn: &Connection,
    id: &str,
    update: &VideoUpdate,
) -> AppResult<Option<VideoRecord>> {
    let id = require_id(id, MISSING_ID)?;

    let title = update.title.as_deref().map(validate_title).transpose()?;
    let embed_url = update
        .embed_url
        .as_deref()
        .map(validate_embed_url)
        .transpose()?;
    let tags = update
        .tags
        .as_ref()
        .map(|value| validate_tags(normalize_tags_value(value)))
        .transpose()?;

    if title.is_none() && embed_url.is_none() && tags.is_none() {
        debug!("Empty update for video {id}, nothing to do");
        return Ok(None);
    }

    let repo = SqliteVideoRepository::new(conn);
    let mut video = repo
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found("videos", &id))?;

    if let Some(title) = title {
        video.title = title;
    }
    if let Some(embed_url) = embed_url {
        video.embed_url = embed_url;
    }
    if let Some(tags) = tags {
        video.tags = tags;
    }
    video.updated_at = now_timestamp();

    repo.update(&video)?;
    info!("Updated video {id}");
    Ok(Some(video))
}

pub fn delete_video(conn: &Connection, id: &str) -> AppResult<()> {
    let id = require_id(id, MISSING_ID)?;
    SqliteVideoRepository::new(conn).delete(&id)?;
    info!("Deleted video {id}");
    Ok(())
}

/// Mirror the hero video into the gallery under a fixed id.
pub fn upsert_featured_video(
    conn: &Connection,
    title: &str,
    embed_url: &str,
    tags: &[String],
) -> AppResult<VideoRecord> {
    let title = title.trim();
    let embed_url = canonicalize_embed_url(embed_url);
    let tags = normalize_tags(tags);

    if title.is_empty() || embed_url.is_empty() || tags.is_empty() {
        return Err(AppError::validation("hero", INCOMPLETE_FEATURED));
    }

    let now = now_timestamp();
    let video = VideoRecord {
        id: FEATURED_VIDEO_ID.to_string(),
        title: title.to_string(),
        embed_url,
        tags,
        is_featured: true,
        created_at: now.clone(),
        updated_at: now,
    };

    let repo = SqliteVideoRepository::new(conn);
    repo.upsert(&video)?;
    debug!("Featured video synced to {}", video.embed_url);

    repo.find_by_id(FEATURED_VIDEO_ID)?
        .ok_or_else(|| AppError::not_found("videos", FEATURED_VIDEO_ID))
}

pub fn list_videos(conn: &Connection, query: &ContentQuery) -> AppResult<Vec<VideoRecord>> {
    let tag = query.normalized_tag();
    let limit = query.effective_limit(DEFAULT_VIDEO_LIMIT);
    SqliteVideoRepository::new(conn).list(tag.as_deref(), limit)
}
