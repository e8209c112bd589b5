// VideoRepository - persistence for the video gallery

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decode_tags, encode_tags};
use crate::api_types::VideoRecord;
use crate::config::database::VIDEOS_TABLE;
use crate::errors::{AppError, AppResult};

pub trait VideoRepository {
    fn insert(&self, video: &VideoRecord) -> AppResult<()>;
    /// Insert or overwrite by id, keeping the original `created_at`
    fn upsert(&self, video: &VideoRecord) -> AppResult<()>;
    fn find_by_id(&self, id: &str) -> AppResult<Option<VideoRecord>>;
    fn update(&self, video: &VideoRecord) -> AppResult<()>;
    fn delete(&self, id: &str) -> AppResult<()>;
    /// Newest first, optionally restricted to videos carrying `tag`
    fn list(&self, tag: Option<&str>, limit: u32) -> AppResult<Vec<VideoRecord>>;
}

pub struct SqliteVideoRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteVideoRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, embed_url, tags, is_featured, created_at, updated_at FROM videos";

fn row_to_video(row: &Row) -> rusqlite::Result<VideoRecord> {
    let raw_tags: String = row.get(3)?;
    Ok(VideoRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        embed_url: row.get(2)?,
        tags: decode_tags(&raw_tags, 3)?,
        is_featured: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl<'a> VideoRepository for SqliteVideoRepository<'a> {
    fn insert(&self, video: &VideoRecord) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO videos (id, title, embed_url, tags, is_featured, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                video.id,
                video.title,
                video.embed_url,
                encode_tags(&video.tags)?,
                video.is_featured,
                video.created_at,
                video.updated_at,
            ],
        )?;
        Ok(())
    }

    fn upsert(&self, video: &VideoRecord) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO videos (id, title, embed_url, tags, is_featured, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                embed_url = excluded.embed_url,
                tags = excluded.tags,
                is_featured = excluded.is_featured,
                updated_at = excluded.updated_at",
            params![
                video.id,
                video.title,
                video.embed_url,
                encode_tags(&video.tags)?,
                video.is_featured,
                video.created_at,
                video.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<VideoRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        let video = stmt.query_row([id], row_to_video).optional()?;
        Ok(video)
    }

    fn update(&self, video: &VideoRecord) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE videos SET title = ?1, embed_url = ?2, tags = ?3, is_featured = ?4, updated_at = ?5
             WHERE id = ?6",
            params![
                video.title,
                video.embed_url,
                encode_tags(&video.tags)?,
                video.is_featured,
                video.updated_at,
                video.id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::not_found(VIDEOS_TABLE, &video.id));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<()> {
        let changed = self.conn.execute("DELETE FROM videos WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(AppError::not_found(VIDEOS_TABLE, id));
        }
        Ok(())
    }

    fn list(&self, tag: Option<&str>, limit: u32) -> AppResult<Vec<VideoRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS}
             WHERE ?1 IS NULL OR EXISTS (
                SELECT 1 FROM json_each(videos.tags) WHERE json_each.value = ?1
             )
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2"
        ))?;

        let video_iter = stmt.query_map(params![tag, limit], row_to_video)?;

        let mut videos = Vec::new();
        for video in video_iter {
            videos.push(video?);
        }
        Ok(videos)
    }
}
