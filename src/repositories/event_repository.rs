// EventRepository - persistence for the events calendar

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::api_types::EventRecord;
use crate::config::database::EVENTS_TABLE;
use crate::errors::{AppError, AppResult};

pub trait EventRepository {
    fn insert(&self, event: &EventRecord) -> AppResult<()>;
    fn find_by_id(&self, id: &str) -> AppResult<Option<EventRecord>>;
    fn update(&self, event: &EventRecord) -> AppResult<()>;
    fn delete(&self, id: &str) -> AppResult<()>;
    /// Events starting at or after `now`, soonest first
    fn list_upcoming(&self, now: &str, limit: u32) -> AppResult<Vec<EventRecord>>;
}

pub struct SqliteEventRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteEventRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, title, location, description, cta_url, start_at,
        created_at, updated_at FROM events";

fn row_to_event(row: &Row) -> rusqlite::Result<EventRecord> {
    Ok(EventRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        location: row.get(2)?,
        description: row.get(3)?,
        cta_url: row.get(4)?,
        start_at: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl<'a> EventRepository for SqliteEventRepository<'a> {
    fn insert(&self, event: &EventRecord) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO events (id, title, location, description, cta_url, start_at,
                                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.id,
                event.title,
                event.location,
                event.description,
                event.cta_url,
                event.start_at,
                event.created_at,
                event.updated_at,
            ],
        )?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<EventRecord>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        Ok(stmt.query_row([id], row_to_event).optional()?)
    }

    fn update(&self, event: &EventRecord) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE events SET title = ?1, location = ?2, description = ?3, cta_url = ?4,
                start_at = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                event.title,
                event.location,
                event.description,
                event.cta_url,
                event.start_at,
                event.updated_at,
                event.id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::not_found(EVENTS_TABLE, &event.id));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> AppResult<()> {
        let changed = self.conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(AppError::not_found(EVENTS_TABLE, id));
        }
        Ok(())
    }

    fn list_upcoming(&self, now: &str, limit: u32) -> AppResult<Vec<EventRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE start_at >= ?1 ORDER BY start_at ASC LIMIT ?2"
        ))?;

        let event_iter = stmt.query_map(params![now, limit], row_to_event)?;

        let mut events = Vec::new();
        for event in event_iter {
            events.push(event?);
        }
        Ok(events)
    }
}
