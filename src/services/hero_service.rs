// Home page hero: one document, mirrored into the video gallery on save

use log::{info, warn};
use rusqlite::Connection;

use super::require_text;
use super::video_service::upsert_featured_video;
use crate::api_types::{HeroContent, HeroInput, HeroStatus, HeroView};
use crate::config::content::{DEFAULT_HERO_TITLE, DEFAULT_HERO_VIDEO_URL, HERO_DOC_ID};
use crate::embed_url::canonicalize_embed_url;
use crate::errors::{AppError, AppResult};
use crate::repositories::{HeroRepository, SqliteHeroRepository};
use crate::tag_validator::normalize_tags_value;
use crate::timestamps::now_timestamp;

const MISSING_TITLE: &str = "El título del hero es obligatorio.";
const INVALID_VIDEO: &str = "Debes proporcionar un enlace embed válido de YouTube.";
const MISSING_TAGS: &str = "Selecciona al menos una etiqueta para el hero.";

pub fn default_hero() -> HeroContent {
    HeroContent {
        title: DEFAULT_HERO_TITLE.to_string(),
        video_url: DEFAULT_HERO_VIDEO_URL.to_string(),
        tag: None,
        tags: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

/// Store the hero and sync the featured gallery video in one transaction.
pub fn save_hero(conn: &Connection, input: &HeroInput) -> AppResult<HeroContent> {
    let title = require_text(&input.title, "title", MISSING_TITLE)?;
    let video_url = canonicalize_embed_url(&input.video_url);
    if video_url.is_empty() {
        return Err(AppError::validation("videoUrl", INVALID_VIDEO));
    }
    let tags = normalize_tags_value(&input.tags);
    if tags.is_empty() {
        return Err(AppError::validation("tags", MISSING_TAGS));
    }

    let now = now_timestamp();
    let hero = HeroContent {
        title,
        video_url,
        tag: tags.first().cloned(),
        tags,
        created_at: Some(now.clone()),
        updated_at: Some(now),
    };

    let tx = conn.unchecked_transaction()?;
    let repo = SqliteHeroRepository::new(&tx);
    repo.upsert(HERO_DOC_ID, &hero)?;
    upsert_featured_video(&tx, &hero.title, &hero.video_url, &hero.tags)?;
    let stored = repo
        .get(HERO_DOC_ID)?
        .ok_or_else(|| AppError::not_found("hero", HERO_DOC_ID))?;
    tx.commit()?;

    info!("Hero updated: {} ({})", stored.title, stored.video_url);
    Ok(stored)
}

/// What the home page shows: the stored hero, or the built-in defaults.
pub fn get_hero_view(conn: &Connection) -> AppResult<HeroView> {
    let stored = SqliteHeroRepository::new(conn).get(HERO_DOC_ID)?;

    let Some(mut content) = stored else {
        warn!("No hero stored, serving defaults");
        return Ok(HeroView {
            content: default_hero(),
            status: HeroStatus::Empty,
            is_fallback: true,
        });
    };

    let title = content.title.trim();
    content.title = if title.is_empty() {
        DEFAULT_HERO_TITLE.to_string()
    } else {
        title.to_string()
    };
    let video_url = content.video_url.trim();
    content.video_url = if video_url.is_empty() {
        DEFAULT_HERO_VIDEO_URL.to_string()
    } else {
        video_url.to_string()
    };

    Ok(HeroView {
        content,
        status: HeroStatus::Ready,
        is_fallback: false,
    })
}
