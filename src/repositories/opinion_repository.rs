// OpinionRepository - persistence for opinion columns

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::api_types::OpinionRecord;
use crate::config::database::OPINIONS_TABLE;
use crate::errors::{AppError, AppResult};

pub trait OpinionRepository {
    fn insert(&self, opinion: &OpinionRecord) -> AppResult<()>;
    fn find_by_id(&self, id: &str) -> AppResult<Option<OpinionRecord>>;
    fn update(&self, opinion: &OpinionRecord) -> AppResult<()>;
    fn delete(&self, id: &str) -> AppResult<()>;
    fn list(&self, limit: u32) -> AppResult<Vec<OpinionRecord>>;
}

pub struct SqliteOpinionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteOpinionRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, title, body, image_url, author_name, author_title,
        created_at, updated_at FROM opinions";

fn row_to_opinion(row: &Row) -> rusqlite::Result<OpinionRecord> {
    Ok(OpinionRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        image_url: row.get(3)?,
        author_name: row.get(4)?,
        author_title: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl<'a> OpinionRepository for SqliteOpinionRepository<'a> {
    fn insert(&self, opinion: &OpinionRecord) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO opinions (id, title, body, image_url, author_name, author_title,
                                   created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                opinion.id,
                opinion.title,
                opinion.body,
                opinion.image_url,
                opinion.author_name,
                opinion.author_title,
                opinion.created_at,
                opinion.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<OpinionRecord>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        Ok(stmt.query_row([id], row_to_opinion).optional()?)
    }

    fn update(&self, opinion: &OpinionRecord) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE opinions SET title = ?1, body = ?2, image_url = ?3, author_name = ?4,
                author_title = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                opinion.title,
                opinion.body,
                opinion.image_url,
                opinion.author_name,
                opinion.author_title,
                opinion.updated_at,
                opinion.id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::not_found(OPINIONS_TABLE, &opinion.id));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<()> {
        let changed = self.conn.execute("DELETE FROM opinions WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(AppError::not_found(OPINIONS_TABLE, id));
        }
        Ok(())
    }

    fn list(&self, limit: u32) -> AppResult<Vec<OpinionRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))?;

        let opinion_iter = stmt.query_map([limit], row_to_opinion)?;

        let mut opinions = Vec::new();
        for opinion in opinion_iter {
            opinions.push(opinion?);
        }
        Ok(opinions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn opinion(id: &str, created_at: &str) -> OpinionRecord {
        OpinionRecord {
            id: id.to_string(),
            title: format!("Columna {id}"),
            body: "Texto".to_string(),
            image_url: "https://www.markae.cl/uploads/opinion.jpg".to_string(),
            author_name: "Autora".to_string(),
            author_title: "Economista".to_string(),
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteOpinionRepository::new(db.connection());

        repo.insert(&opinion("a", "2024-01-01T00:00:00.000Z")).unwrap();
        repo.insert(&opinion("c", "2024-03-01T00:00:00.000Z")).unwrap();
        repo.insert(&opinion("b", "2024-02-01T00:00:00.000Z")).unwrap();

        let ids: Vec<_> = repo.list(2).unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_round_trip_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteOpinionRepository::new(db.connection());

        let stored = opinion("a", "2024-01-01T00:00:00.000Z");
        repo.insert(&stored).unwrap();
        assert_eq!(repo.find_by_id("a").unwrap(), Some(stored));

        repo.delete("a").unwrap();
        assert!(matches!(repo.delete("a"), Err(AppError::NotFound { .. })));
    }
}
