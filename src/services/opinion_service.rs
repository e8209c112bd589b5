// Opinion columns: create / update / delete / listing

use log::{debug, info};
use rusqlite::Connection;

use super::{ensure_http_url, require_id, require_text, resolve_document_id};
use crate::api_types::{ContentQuery, OpinionInput, OpinionRecord, OpinionUpdate};
use crate::config::content::DEFAULT_OPINION_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::repositories::{OpinionRepository, SqliteOpinionRepository};
use crate::timestamps::now_timestamp;

const MISSING_TITLE: &str = "El título es obligatorio.";
const MISSING_BODY: &str = "El cuerpo es obligatorio.";
const MISSING_IMAGE: &str = "Debes subir una imagen válida.";
const INVALID_IMAGE: &str = "URL de imagen inválida.";
const MISSING_AUTHOR: &str = "El nombre del autor es obligatorio.";
const MISSING_ID: &str = "Falta ID de la opinión";
const DUPLICATE_ID: &str = "Ya existe una opinión con ese identificador.";

pub fn create_opinion(conn: &Connection, input: &OpinionInput) -> AppResult<OpinionRecord> {
    let title = require_text(&input.title, "title", MISSING_TITLE)?;
    let body = require_text(&input.body, "body", MISSING_BODY)?;
    let image_url = ensure_http_url(&input.image_url)
        .ok_or_else(|| AppError::validation("imageUrl", MISSING_IMAGE))?;
    let author_name = require_text(&input.author_name, "authorName", MISSING_AUTHOR)?;

    let repo = SqliteOpinionRepository::new(conn);
    let id = resolve_document_id(input.id.as_deref());
    if repo.find_by_id(&id)?.is_some() {
        return Err(AppError::validation("id", DUPLICATE_ID));
    }

    let now = now_timestamp();
    let opinion = OpinionRecord {
        id,
        title,
        body,
        image_url,
        author_name,
        author_title: input.author_title.trim().to_string(),
        created_at: now.clone(),
        updated_at: now,
    };

    repo.insert(&opinion)?;
    info!("Created opinion {} by {}", opinion.id, opinion.author_name);
    Ok(opinion)
}

/// Applies the supplied fields; `Ok(None)` when the update carried nothing.
pub fn update_opinion(
    conn: &Connection,
    id: &str,
    update: &OpinionUpdate,
) -> AppResult<Option<OpinionRecord>> {
    let id = require_id(id, MISSING_ID)?;

    let title = update
        .title
        .as_deref()
        .map(|v| require_text(v, "title", MISSING_TITLE))
        .transpose()?;
    let body = update
        .body
        .as_deref()
        .map(|v| require_text(v, "body", MISSING_BODY))
        .transpose()?;
    let image_url = update
        .image_url
        .as_deref()
        .map(|v| ensure_http_url(v).ok_or_else(|| AppError::validation("imageUrl", INVALID_IMAGE)))
        .transpose()?;
    let author_name = update
        .author_name
        .as_deref()
        .map(|v| require_text(v, "authorName", MISSING_AUTHOR))
        .transpose()?;
    let author_title = update.author_title.as_deref().map(|v| v.trim().to_string());

    if title.is_none()
        && body.is_none()
        && image_url.is_none()
        && author_name.is_none()
        && author_title.is_none()
    {
        debug!("Empty update for opinion {id}, nothing to do");
        return Ok(None);
    }

    let repo = SqliteOpinionRepository::new(conn);
    let mut opinion = repo
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found("opinions", &id))?;

    if let Some(title) = title {
        opinion.title = title;
    }
    if let Some(body) = body {
        opinion.body = body;
    }
    if let Some(image_url) = image_url {
        opinion.image_url = image_url;
    }
    if let Some(author_name) = author_name {
        opinion.author_name = author_name;
    }
    if let Some(author_title) = author_title {
        opinion.author_title = author_title;
    }
    opinion.updated_at = now_timestamp();

    repo.update(&opinion)?;
    info!("Updated opinion {id}");
    Ok(Some(opinion))
}

pub fn delete_opinion(conn: &Connection, id: &str) -> AppResult<()> {
    let id = require_id(id, MISSING_ID)?;
    SqliteOpinionRepository::new(conn).delete(&id)?;
    info!("Deleted opinion {id}");
    Ok(())
}

pub fn list_opinions(conn: &Connection, limit: Option<i64>) -> AppResult<Vec<OpinionRecord>> {
    let limit = ContentQuery::new(None, limit).effective_limit(DEFAULT_OPINION_LIMIT);
    SqliteOpinionRepository::new(conn).list(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_values::TEST_IMAGE_URL;
    use crate::database::Database;

    fn valid_input() -> OpinionInput {
        OpinionInput {
            title: "El futuro de la mitilicultura".to_string(),
            body: "Columna completa".to_string(),
            image_url: TEST_IMAGE_URL.to_string(),
            author_name: " María Pérez ".to_string(),
            author_title: " Ingeniera pesquera ".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_opinion() {
        let db = Database::open_in_memory().unwrap();
        let opinion = create_opinion(db.connection(), &valid_input()).unwrap();
        assert_eq!(opinion.author_name, "María Pérez");
        assert_eq!(opinion.author_title, "Ingeniera pesquera");
        assert_eq!(list_opinions(db.connection(), None).unwrap(), vec![opinion]);
    }

    #[test]
    fn test_create_opinion_validation() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();

        let err = create_opinion(conn, &OpinionInput { image_url: "imagen.jpg".into(), ..valid_input() }).unwrap_err();
        assert_eq!(err.to_string(), MISSING_IMAGE);

        let err = create_opinion(conn, &OpinionInput { author_name: "  ".into(), ..valid_input() }).unwrap_err();
        assert_eq!(err.field(), Some("authorName"));

        let err = create_opinion(conn, &OpinionInput { body: "".into(), ..valid_input() }).unwrap_err();
        assert_eq!(err.field(), Some("body"));
    }

    #[test]
    fn test_create_opinion_with_existing_id() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let with_id = OpinionInput {
            id: Some("opinion01".to_string()),
            ..valid_input()
        };

        create_opinion(conn, &with_id).unwrap();
        let err = create_opinion(conn, &with_id).unwrap_err();
        assert_eq!(err.field(), Some("id"));
        assert_eq!(err.to_string(), DUPLICATE_ID);
        assert_eq!(list_opinions(conn, None).unwrap().len(), 1);
    }

    #[test]
    fn test_update_opinion() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let created = create_opinion(conn, &valid_input()).unwrap();

        let updated = update_opinion(
            conn,
            &created.id,
            &OpinionUpdate {
                author_title: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
        assert_eq!(updated.author_title, "");
        assert_eq!(updated.title, created.title);

        let err = update_opinion(
            conn,
            &created.id,
            &OpinionUpdate {
                image_url: Some("ftp://x/y.jpg".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), INVALID_IMAGE);
    }

    #[test]
    fn test_delete_opinion() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let created = create_opinion(conn, &valid_input()).unwrap();

        delete_opinion(conn, &created.id).unwrap();
        assert!(list_opinions(conn, Some(5)).unwrap().is_empty());
        assert_eq!(delete_opinion(conn, "").unwrap_err().to_string(), MISSING_ID);
    }
}
