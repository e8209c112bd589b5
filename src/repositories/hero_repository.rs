// HeroRepository - the single hero document shown on the home page

use rusqlite::{params, Connection, OptionalExtension};

use super::{decode_tags, encode_tags};
use crate::api_types::HeroContent;
use crate::errors::AppResult;

pub trait HeroRepository {
    fn get(&self, id: &str) -> AppResult<Option<HeroContent>>;
    /// Merge-write: `created_at` survives when the document already exists
    fn upsert(&self, id: &str, hero: &HeroContent) -> AppResult<()>;
}

pub struct SqliteHeroRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteHeroRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> HeroRepository for SqliteHeroRepository<'a> {
    fn get(&self, id: &str) -> AppResult<Option<HeroContent>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, video_url, tag, tags, created_at, updated_at FROM hero WHERE id = ?1",
        )?;

        let hero = stmt
            .query_row([id], |row| {
                let raw_tags: String = row.get(3)?;
                Ok(HeroContent {
                    title: row.get(0)?,
                    video_url: row.get(1)?,
                    tag: row.get(2)?,
                    tags: decode_tags(&raw_tags, 3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            })
            .optional()?;

        Ok(hero)
    }

    fn upsert(&self, id: &str, hero: &HeroContent) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO hero (id, title, video_url, tag, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                video_url = excluded.video_url,
                tag = excluded.tag,
                tags = excluded.tags,
                created_at = COALESCE(hero.created_at, excluded.created_at),
                updated_at = excluded.updated_at",
            params![
                id,
                hero.title,
                hero.video_url,
                hero.tag,
                encode_tags(&hero.tags)?,
                hero.created_at,
                hero.updated_at,
            ],
        )?;
        Ok(())
    }
}
