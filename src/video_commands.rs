use crate::api_types::{ContentQuery, HeroContent, HeroInput, HeroView, VideoInput, VideoRecord, VideoUpdate};
use crate::config::content::{FEATURED_VIDEO_ID, HERO_DOC_ID};
use crate::errors::{to_command_result, AppError};
use crate::feed::{ChangeKind, ContentChange, ContentCollection};
use crate::services::{hero_service, video_service};
use crate::AppState;

// Video gallery and hero commands used by the admin panel

pub async fn create_video(state: &AppState, input: VideoInput) -> Result<VideoRecord, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let video = to_command_result(video_service::create_video(db.connection(), &input))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::Videos,
        &video.id,
        ChangeKind::Created,
    ));
    Ok(video)
}

/// `None` when the update carried no fields
pub async fn update_video(
    state: &AppState,
    id: String,
    update: VideoUpdate,
) -> Result<Option<VideoRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let updated = to_command_result(video_service::update_video(db.connection(), &id, &update))?;
    if let Some(video) = &updated {
        state.feed.publish(ContentChange::new(
            ContentCollection::Videos,
            &video.id,
            ChangeKind::Updated,
        ));
    }
    Ok(updated)
}

pub async fn delete_video(state: &AppState, id: String) -> Result<(), String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(video_service::delete_video(db.connection(), &id))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::Videos,
        id.trim(),
        ChangeKind::Deleted,
    ));
    Ok(())
}

pub async fn list_videos(state: &AppState, query: ContentQuery) -> Result<Vec<VideoRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(video_service::list_videos(db.connection(), &query))
}

/// Saves the hero and re-syncs the featured gallery video
pub async fn save_hero(state: &AppState, input: HeroInput) -> Result<HeroContent, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let hero = to_command_result(hero_service::save_hero(db.connection(), &input))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::Hero,
        HERO_DOC_ID,
        ChangeKind::Updated,
    ));
    state.feed.publish(ContentChange::new(
        ContentCollection::Videos,
        FEATURED_VIDEO_ID,
        ChangeKind::Updated,
    ));
    Ok(hero)
}

pub async fn get_hero_view(state: &AppState) -> Result<HeroView, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(hero_service::get_hero_view(db.connection()))
}
