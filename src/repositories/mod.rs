// Repository pattern over the local SQLite store
// One trait per collection; SQLite implementations borrow the connection.

pub mod event_repository;
pub mod hero_repository;
pub mod news_repository;
pub mod opinion_repository;
pub mod video_repository;

pub use event_repository::{EventRepository, SqliteEventRepository};
pub use hero_repository::{HeroRepository, SqliteHeroRepository};
pub use news_repository::{NewsRepository, SqliteNewsRepository};
pub use opinion_repository::{OpinionRepository, SqliteOpinionRepository};
pub use video_repository::{SqliteVideoRepository, VideoRepository};

use rusqlite::types::Type;

use crate::errors::AppResult;

pub(crate) fn encode_tags(tags: &[String]) -> AppResult<String> {
    Ok(serde_json::to_string(tags)?)
}

pub(crate) fn decode_tags(raw: &str, column: usize) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
