use crate::api_types::{ContentQuery, NewsInput, NewsRecord, NewsUpdate};
use crate::errors::{to_command_result, AppError};
use crate::feed::{ChangeKind, ContentChange, ContentCollection};
use crate::services::news_service;
use crate::uploads::ImageUpload;
use crate::AppState;

// News commands: article CRUD, section listing and cover image upload

pub async fn generate_news_id() -> Result<String, String> {
    Ok(news_service::generate_news_id())
}

pub async fn create_news(state: &AppState, input: NewsInput) -> Result<NewsRecord, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let news = to_command_result(news_service::create_news(db.connection(), &input))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::News,
        &news.id,
        ChangeKind::Created,
    ));
    Ok(news)
}

pub async fn update_news(
    state: &AppState,
    id: String,
    update: NewsUpdate,
) -> Result<Option<NewsRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    let updated = to_command_result(news_service::update_news(db.connection(), &id, &update))?;
    if let Some(news) = &updated {
        state.feed.publish(ContentChange::new(
            ContentCollection::News,
            &news.id,
            ChangeKind::Updated,
        ));
    }
    Ok(updated)
}

pub async fn delete_news(state: &AppState, id: String) -> Result<(), String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(news_service::delete_news(db.connection(), &id))?;
    state.feed.publish(ContentChange::new(
        ContentCollection::News,
        id.trim(),
        ChangeKind::Deleted,
    ));
    Ok(())
}

pub async fn list_news(state: &AppState, query: ContentQuery) -> Result<Vec<NewsRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(news_service::list_news(db.connection(), &query))
}

pub async fn get_news_by_slug(state: &AppState, slug: String) -> Result<Option<NewsRecord>, String> {
    let db = state
        .db
        .lock()
        .map_err(|e| AppError::database_lock(format!("Database lock error: {e}")).to_string())?;

    to_command_result(news_service::get_news_by_slug(db.connection(), &slug))
}

/// Uploads a cover image and returns its public URL
pub async fn upload_news_image(
    state: &AppState,
    image: ImageUpload,
    article_id: String,
) -> Result<String, String> {
    let uploader = state.uploader.clone().ok_or_else(|| {
        AppError::config("El endpoint de subida no está configurado.").to_string()
    })?;

    to_command_result(uploader.upload(image, &article_id).await)
}
