// News articles: create / update / delete / slug lookup / section listing

use log::{debug, info};
use rusqlite::Connection;

use super::{ensure_http_url, new_document_id, require_id, require_text, resolve_document_id};
use crate::api_types::{ContentQuery, NewsInput, NewsRecord, NewsUpdate};
use crate::config::content::DEFAULT_NEWS_LIMIT;
use crate::errors::{AppError, AppResult};
use crate::repositories::{NewsRepository, SqliteNewsRepository};
use crate::slug::build_slug_now;
use crate::tag_validator::normalize_tags_value;
use crate::timestamps::{format_timestamp, now_timestamp, parse_date_input};

const MISSING_TITLE: &str = "El título es obligatorio.";
const MISSING_LEAD: &str = "La bajada es obligatoria.";
const MISSING_BODY: &str = "El artículo necesita contenido.";
const INVALID_IMAGE: &str = "Debes proporcionar una URL válida para la fotografía.";
const MISSING_TAGS: &str = "Selecciona al menos una sección para la noticia.";
const INVALID_DATE: &str = "Debes proporcionar una fecha válida.";
const MISSING_ID: &str = "El identificador de la noticia es obligatorio.";
const DUPLICATE_ID: &str = "Ya existe una noticia con ese identificador.";

/// Id handed to the form before the article exists (used to name its cover image)
pub fn generate_news_id() -> String {
    new_document_id()
}

fn validate_image_url(value: &str) -> AppResult<String> {
    ensure_http_url(value).ok_or_else(|| AppError::validation("imageUrl", INVALID_IMAGE))
}

fn validate_tags(value: &serde_json::Value) -> AppResult<Vec<String>> {
    let tags = normalize_tags_value(value);
    if tags.is_empty() {
        return Err(AppError::validation("tags", MISSING_TAGS));
    }
    Ok(tags)
}

fn normalize_source(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|source| !source.is_empty())
        .map(str::to_string)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn create_news(conn: &Connection, input: &NewsInput) -> AppResult<NewsRecord> {
    let title = require_text(&input.title, "title", MISSING_TITLE)?;
    let lead = require_text(&input.lead, "lead", MISSING_LEAD)?;
    let body = require_text(&input.body, "body", MISSING_BODY)?;
    let image_url = validate_image_url(&input.image_url)?;
    let tags = validate_tags(&input.tags)?;

    let now = now_timestamp();
    // An unreadable date on create falls back to publication time
    let article_date = input
        .article_date
        .as_deref()
        .and_then(parse_date_input)
        .map(format_timestamp)
        .unwrap_or_else(|| now.clone());
    let slug = non_blank(input.slug.as_deref()).unwrap_or_else(|| build_slug_now(&title));

    let repo = SqliteNewsRepository::new(conn);
    let id = resolve_document_id(input.id.as_deref());
    if repo.find_by_id(&id)?.is_some() {
        return Err(AppError::validation("id", DUPLICATE_ID));
    }

    let news = NewsRecord {
        id,
        title,
        lead,
        body,
        image_url,
        tags,
        source: normalize_source(input.source.as_deref()),
        article_date,
        slug,
        created_at: now.clone(),
        updated_at: now,
    };

    repo.insert(&news)?;
    info!("Created news {} ({})", news.id, news.slug);
    Ok(news)
}

/// Applies the supplied fields; `Ok(None)` when the update carried nothing.
pub fn update_news(
    conn: &Connection,
    id: &str,
    update: &NewsUpdate,
) -> AppResult<Option<NewsRecord>> {
    let id = require_id(id, MISSING_ID)?;

    let title = update
        .title
        .as_deref()
        .map(|v| require_text(v, "title", MISSING_TITLE))
        .transpose()?;
    let lead = update
        .lead
        .as_deref()
        .map(|v| require_text(v, "lead", MISSING_LEAD))
        .transpose()?;
    let body = update
        .body
        .as_deref()
        .map(|v| require_text(v, "body", MISSING_BODY))
        .transpose()?;
    let image_url = update
        .image_url
        .as_deref()
        .map(validate_image_url)
        .transpose()?;
    let tags = update.tags.as_ref().map(validate_tags).transpose()?;
    let article_date = update
        .article_date
        .as_deref()
        .map(|v| {
            parse_date_input(v)
                .map(format_timestamp)
                .ok_or_else(|| AppError::validation("articleDate", INVALID_DATE))
        })
        .transpose()?;
    let source = update.source.as_deref().map(|v| normalize_source(Some(v)));
    let slug = non_blank(update.slug.as_deref());

    let touched = title.is_some()
        || lead.is_some()
        || body.is_some()
        || image_url.is_some()
        || tags.is_some()
        || article_date.is_some()
        || source.is_some()
        || slug.is_some();
    if !touched {
        debug!("Empty update for news {id}, nothing to do");
        return Ok(None);
    }

    let repo = SqliteNewsRepository::new(conn);
    let mut news = repo
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found("news", &id))?;

    if let Some(title) = title {
        news.title = title;
    }
    if let Some(lead) = lead {
        news.lead = lead;
    }
    if let Some(body) = body {
        news.body = body;
    }
    if let Some(image_url) = image_url {
        news.image_url = image_url;
    }
    if let Some(tags) = tags {
        news.tags = tags;
    }
    if let Some(article_date) = article_date {
        news.article_date = article_date;
    }
    if let Some(source) = source {
        news.source = source;
    }
    if let Some(slug) = slug {
        news.slug = slug;
    }
    news.updated_at = now_timestamp();

    repo.update(&news)?;
    info!("Updated news {id}");
    Ok(Some(news))
}

pub fn delete_news(conn: &Connection, id: &str) -> AppResult<()> {
    let id = require_id(id, MISSING_ID)?;
    SqliteNewsRepository::new(conn).delete(&id)?;
    info!("Deleted news {id}");
    Ok(())
}

/// Article detail lookup; blank slugs never hit the store.
pub fn get_news_by_slug(conn: &Connection, slug: &str) -> AppResult<Option<NewsRecord>> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Ok(None);
    }
    SqliteNewsRepository::new(conn).find_by_slug(slug)
}

pub fn list_news(conn: &Connection, query: &ContentQuery) -> AppResult<Vec<NewsRecord>> {
    let tag = query.normalized_tag();
    let limit = query.effective_limit(DEFAULT_NEWS_LIMIT);
    SqliteNewsRepository::new(conn).list(tag.as_deref(), limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_values::TEST_IMAGE_URL;
    use crate::database::Database;
    use serde_json::json;

    fn valid_input() -> NewsInput {
        NewsInput {
            title: "Nueva planta de proceso en Calbuco".to_string(),
            lead: "La inversión genera 200 empleos".to_string(),
            body: "Texto completo del artículo".to_string(),
            image_url: TEST_IMAGE_URL.to_string(),
            tags: json!(["Acuicultura", "Acuicultura "]),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_news_defaults() {
        let db = Database::open_in_memory().unwrap();
        let news = create_news(db.connection(), &valid_input()).unwrap();

        assert_eq!(news.tags, vec!["Acuicultura"]);
        assert_eq!(news.source, None);
        assert!(news.slug.starts_with("nueva-planta-de-proceso-en-calbuco-"));
        assert_eq!(news.article_date, news.created_at);
        assert_eq!(news.id.len(), 32);
    }

    #[test]
    fn test_create_news_with_explicit_fields() {
        let db = Database::open_in_memory().unwrap();
        let input = NewsInput {
            id: Some("preuploaded01".to_string()),
            source: Some("  Diario El Llanquihue ".to_string()),
            article_date: Some("2024-05-01".to_string()),
            slug: Some("  planta-calbuco ".to_string()),
            ..valid_input()
        };
        let news = create_news(db.connection(), &input).unwrap();

        assert_eq!(news.id, "preuploaded01");
        assert_eq!(news.source.as_deref(), Some("Diario El Llanquihue"));
        assert_eq!(news.article_date, "2024-05-01T00:00:00.000Z");
        assert_eq!(news.slug, "planta-calbuco");

        let err = create_news(db.connection(), &input).unwrap_err();
        assert_eq!(err.to_string(), DUPLICATE_ID);
    }

    #[test]
    fn test_create_news_unparseable_date_falls_back_to_now() {
        let db = Database::open_in_memory().unwrap();
        let input = NewsInput {
            article_date: Some("mañana".to_string()),
            ..valid_input()
        };
        let news = create_news(db.connection(), &input).unwrap();
        assert_eq!(news.article_date, news.created_at);
    }

    #[test]
    fn test_create_news_validation_order() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();

        let cases = [
            (NewsInput { title: " ".into(), ..valid_input() }, "title"),
            (NewsInput { lead: "".into(), ..valid_input() }, "lead"),
            (NewsInput { body: "\n".into(), ..valid_input() }, "body"),
            (NewsInput { image_url: "www.markae.cl/x.jpg".into(), ..valid_input() }, "imageUrl"),
            (NewsInput { tags: json!("Acuicultura"), ..valid_input() }, "tags"),
        ];
        for (input, field) in cases {
            let err = create_news(conn, &input).unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_update_news() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let input = NewsInput {
            source: Some("Fuente".to_string()),
            ..valid_input()
        };
        let created = create_news(conn, &input).unwrap();

        let updated = update_news(
            conn,
            &created.id,
            &NewsUpdate {
                title: Some(" Titular corregido ".to_string()),
                source: Some("   ".to_string()),
                slug: Some("  ".to_string()),
                article_date: Some("2024-02-10T12:00:00Z".to_string()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.title, "Titular corregido");
        assert_eq!(updated.source, None);
        assert_eq!(updated.slug, created.slug);
        assert_eq!(updated.article_date, "2024-02-10T12:00:00.000Z");
        assert_eq!(updated.lead, created.lead);
    }

    #[test]
    fn test_update_news_null_tags_leave_tags_untouched() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let created = create_news(conn, &valid_input()).unwrap();

        let update: NewsUpdate =
            serde_json::from_value(serde_json::json!({ "lead": "Nueva bajada", "tags": null })).unwrap();
        let updated = update_news(conn, &created.id, &update).unwrap().unwrap();
        assert_eq!(updated.lead, "Nueva bajada");
        assert_eq!(updated.tags, created.tags);
    }

    #[test]
    fn test_update_news_rejects_bad_date_and_image() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let created = create_news(conn, &valid_input()).unwrap();

        let err = update_news(
            conn,
            &created.id,
            &NewsUpdate {
                article_date: Some("32/13/2024".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), INVALID_DATE);

        let err = update_news(
            conn,
            &created.id,
            &NewsUpdate {
                image_url: Some("data:image/png;base64,AAAA".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("imageUrl"));

        let err = update_news(
            conn,
            &created.id,
            &NewsUpdate {
                tags: Some(json!([])),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), MISSING_TAGS);

        assert!(update_news(conn, &created.id, &NewsUpdate::default()).unwrap().is_none());
    }

    #[test]
    fn test_get_news_by_slug() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let input = NewsInput {
            slug: Some("planta-calbuco".to_string()),
            ..valid_input()
        };
        let created = create_news(conn, &input).unwrap();

        assert_eq!(get_news_by_slug(conn, " planta-calbuco ").unwrap(), Some(created));
        assert_eq!(get_news_by_slug(conn, "   ").unwrap(), None);
        assert_eq!(get_news_by_slug(conn, "otra").unwrap(), None);
    }

    #[test]
    fn test_list_news_default_limit() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        for day in 1..=7 {
            let input = NewsInput {
                article_date: Some(format!("2024-05-0{day}")),
                ..valid_input()
            };
            create_news(conn, &input).unwrap();
        }

        let latest = list_news(conn, &ContentQuery::default()).unwrap();
        assert_eq!(latest.len(), 5);
        assert_eq!(latest[0].article_date, "2024-05-07T00:00:00.000Z");

        let section = list_news(conn, &ContentQuery::new(Some("Acuicultura"), Some(2))).unwrap();
        assert_eq!(section.len(), 2);
        assert!(list_news(conn, &ContentQuery::new(Some("Turismo"), None)).unwrap().is_empty());
    }

    #[test]
    fn test_delete_news() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        let created = create_news(conn, &valid_input()).unwrap();
        delete_news(conn, &created.id).unwrap();
        assert!(matches!(delete_news(conn, &created.id), Err(AppError::NotFound { .. })));
        assert_eq!(generate_news_id().len(), 32);
    }
}
