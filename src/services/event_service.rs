// Events calendar: create / update / delete / upcoming listing

use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::Connection;

use super::{require_id, require_text, resolve_document_id};
use crate::api_types::{ContentQuery, EventInput, EventRecord, EventUpdate};
use crate::config::content::DEFAULT_EVENT_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::repositories::{EventRepository, SqliteEventRepository};
use crate::timestamps::{format_timestamp, now_timestamp, parse_date_and_time};

const MISSING_TITLE: &str = "El título es obligatorio.";
const MISSING_START: &str = "Debes definir fecha y hora válidas.";
const INVALID_START: &str = "Fecha u hora inválidas.";
const MISSING_ID: &str = "Falta ID del evento";
const DUPLICATE_ID: &str = "Ya existe un evento con ese identificador.";

/// `YYYY-MM-DD` plus optional `HH:MM` (midnight when blank), as a stored timestamp.
pub fn parse_start_at(date: &str, time: &str) -> Option<String> {
    if date.trim().is_empty() {
        return None;
    }
    parse_date_and_time(date, time).map(format_timestamp)
}

pub fn create_event(conn: &Connection, input: &EventInput) -> AppResult<EventRecord> {
    let title = require_text(&input.title, "title", MISSING_TITLE)?;
    let start_at = parse_start_at(&input.date, &input.time)
        .ok_or_else(|| AppError::validation("startAt", MISSING_START))?;

    let repo = SqliteEventRepository::new(conn);
    let id = resolve_document_id(input.id.as_deref());
    if repo.find_by_id(&id)?.is_some() {
        return Err(AppError::validation("id", DUPLICATE_ID));
    }
    let now = now_timestamp();
    let event = EventRecord {
        id,
        title,
        location: input.location.trim().to_string(),
        description: input.description.trim().to_string(),
        cta_url: input.cta_url.trim().to_string(),
        start_at,
        created_at: now.clone(),
        updated_at: now,
    };

    repo.insert(&event)?;
    info!("Created event {} at {}", event.id, event.start_at);
    Ok(event)
}

/// Date and time halves of a stored start, for partial updates
fn split_start_at(start_at: &str) -> Option<(String, String)> {
    let parsed = DateTime::parse_from_rfc3339(start_at).ok()?.with_timezone(&Utc);
    Some((
        parsed.format("%Y-%m-%d").to_string(),
        parsed.format("%H:%M").to_string(),
    ))
}

/// Applies the supplied fields; `Ok(None)` when the update carried nothing.
///
/// Supplying only the date or only the time keeps the other half of the
/// stored start.
pub fn update_event(
    conn: &Connection,
    id: &str,
    update: &EventUpdate,
) -> AppResult<Option<EventRecord>> {
    let id = require_id(id, MISSING_ID)?;

    let title = update
        .title
        .as_deref()
        .map(|v| require_text(v, "title", MISSING_TITLE))
        .transpose()?;
    let reschedules = update.date.is_some() || update.time.is_some();
    let touched = title.is_some()
        || update.location.is_some()
        || update.description.is_some()
        || update.cta_url.is_some()
        || reschedules;
    if !touched {
        debug!("Empty update for event {id}, nothing to do");
        return Ok(None);
    }

    let repo = SqliteEventRepository::new(conn);
    let mut event = repo
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found("events", &id))?;

    if reschedules {
        let (stored_date, stored_time) = split_start_at(&event.start_at).unwrap_or_default();
        let date = update.date.as_deref().unwrap_or(&stored_date);
        let time = update.time.as_deref().unwrap_or(&stored_time);
        event.start_at = parse_start_at(date, time)
            .ok_or_else(|| AppError::validation("startAt", INVALID_START))?;
    }
    if let Some(title) = title {
        event.title = title;
    }
    if let Some(location) = &update.location {
        event.location = location.trim().to_string();
    }
    if let Some(description) = &update.description {
        event.description = description.trim().to_string();
    }
    if let Some(cta_url) = &update.cta_url {
        event.cta_url = cta_url.trim().to_string();
    }
    event.updated_at = now_timestamp();

    repo.update(&event)?;
    info!("Updated event {id}");
    Ok(Some(event))
}

pub fn delete_event(conn: &Connection, id: &str) -> AppResult<()> {
    let id = require_id(id, MISSING_ID)?;
    SqliteEventRepository::new(conn).delete(&id)?;
    info!("Deleted event {id}");
    Ok(())
}

pub fn list_upcoming_events(conn: &Connection, limit: Option<i64>) -> AppResult<Vec<EventRecord>> {
    list_upcoming_events_at(conn, &now_timestamp(), limit)
}

pub fn list_upcoming_events_at(
    conn: &Connection,
    now: &str,
    limit: Option<i64>,
) -> AppResult<Vec<EventRecord>> {
    let limit = ContentQuery::new(None, limit).effective_limit(DEFAULT_EVENT_LIMIT);
    SqliteEventRepository::new(conn).list_upcoming(now, limit)
}
