use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub mod api_types;
mod config;
pub mod database;
pub mod embed_url;
pub mod errors;
pub mod event_commands;
pub mod feed;
pub mod navigation;
pub mod news_commands;
pub mod opinion_commands;
pub mod preview_commands;
mod repositories;
pub mod services;
pub mod slug;
pub mod tag_validator;
pub mod timestamps;
pub mod uploads;
pub mod video_commands;

use crate::config::app;
use database::Database;
use feed::ChangeFeed;
use uploads::NewsImageUploader;

pub use embed_url::{canonicalize_embed_url, EmbedUrl};
pub use errors::{AppError, AppResult};
pub use tag_validator::{normalize_tags, normalize_tags_value};

/// Shared state handed to every command
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub feed: ChangeFeed,
    /// `None` until the upload endpoint is configured
    pub uploader: Option<Arc<NewsImageUploader>>,
}

impl AppState {
    /// Opens the database in the user's data directory
    pub fn new() -> Result<Self> {
        let app_data_dir = default_data_dir();

        if !app_data_dir.exists() {
            std::fs::create_dir_all(&app_data_dir)?;
        }

        Self::open(&app_data_dir.join(app::DATABASE_FILENAME))
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        let db = Database::new(&db_path.to_string_lossy())?;
        info!("Content database opened at {}", db_path.display());
        Ok(Self::with_database(db, load_uploader()))
    }

    /// Throwaway state for tests and previews; uploads stay disabled
    pub fn in_memory() -> Result<Self> {
        Ok(Self::with_database(Database::open_in_memory()?, None))
    }

    pub fn with_database(db: Database, uploader: Option<NewsImageUploader>) -> Self {
        AppState {
            db: Arc::new(Mutex::new(db)),
            feed: ChangeFeed::default(),
            uploader: uploader.map(Arc::new),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app::DATA_DIR_NAME)
}

fn load_uploader() -> Option<NewsImageUploader> {
    match NewsImageUploader::from_env() {
        Ok(uploader) => {
            info!("Image uploads go to {}", uploader.endpoint());
            Some(uploader)
        }
        Err(e) => {
            warn!("Image uploads disabled: {e}");
            None
        }
    }
}

/// Installs the `env_logger` backend; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_schema_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(app::DATABASE_FILENAME);

        let state = AppState::open(&path).unwrap();
        assert!(path.exists());
        let db = state.db.lock().unwrap();
        assert_eq!(db.count("videos").unwrap(), 0);
    }

    #[test]
    fn test_default_data_dir_name() {
        assert!(default_data_dir().ends_with(app::DATA_DIR_NAME));
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
