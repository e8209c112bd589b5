// NewsRepository - persistence for news articles

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decode_tags, encode_tags};
use crate::api_types::NewsRecord;
use crate::config::database::NEWS_TABLE;
use crate::errors::{AppError, AppResult};

pub trait NewsRepository {
    fn insert(&self, news: &NewsRecord) -> AppResult<()>;
    fn find_by_id(&self, id: &str) -> AppResult<Option<NewsRecord>>;
    fn find_by_slug(&self, slug: &str) -> AppResult<Option<NewsRecord>>;
    fn update(&self, news: &NewsRecord) -> AppResult<()>;
    fn delete(&self, id: &str) -> AppResult<()>;
    /// Latest articles first (by article date, then creation)
    fn list(&self, tag: Option<&str>, limit: u32) -> AppResult<Vec<NewsRecord>>;
}

pub struct SqliteNewsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNewsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, title, lead, body, image_url, tags, source, article_date,
        slug, created_at, updated_at FROM news";

fn row_to_news(row: &Row) -> rusqlite::Result<NewsRecord> {
    let raw_tags: String = row.get(5)?;
    Ok(NewsRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        lead: row.get(2)?,
        body: row.get(3)?,
        image_url: row.get(4)?,
        tags: decode_tags(&raw_tags, 5)?,
        source: row.get(6)?,
        article_date: row.get(7)?,
        slug: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

impl<'a> NewsRepository for SqliteNewsRepository<'a> {
    fn insert(&self, news: &NewsRecord) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO news (id, title, lead, body, image_url, tags, source, article_date,
                               slug, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                news.id,
                news.title,
                news.lead,
                news.body,
                news.image_url,
                encode_tags(&news.tags)?,
                news.source,
                news.article_date,
                news.slug,
                news.created_at,
                news.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<NewsRecord>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        Ok(stmt.query_row([id], row_to_news).optional()?)
    }

    fn find_by_slug(&self, slug: &str) -> AppResult<Option<NewsRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE slug = ?1 LIMIT 1"))?;
        Ok(stmt.query_row([slug], row_to_news).optional()?)
    }

    fn update(&self, news: &NewsRecord) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE news SET title = ?1, lead = ?2, body = ?3, image_url = ?4, tags = ?5,
                source = ?6, article_date = ?7, slug = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                news.title,
                news.lead,
                news.body,
                news.image_url,
                encode_tags(&news.tags)?,
                news.source,
                news.article_date,
                news.slug,
                news.updated_at,
                news.id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::not_found(NEWS_TABLE, &news.id));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<()> {
        let changed = self.conn.execute("DELETE FROM news WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(AppError::not_found(NEWS_TABLE, id));
        }
        Ok(())
    }

    fn list(&self, tag: Option<&str>, limit: u32) -> AppResult<Vec<NewsRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS}
             WHERE ?1 IS NULL OR EXISTS (
                SELECT 1 FROM json_each(news.tags) WHERE json_each.value = ?1
             )
             ORDER BY article_date DESC, created_at DESC, rowid DESC
             LIMIT ?2"
        ))?;

        let news_iter = stmt.query_map(params![tag, limit], row_to_news)?;

        let mut items = Vec::new();
        for news in news_iter {
            items.push(news?);
        }
        Ok(items)
    }
}
