// Service layer: the validation each admin form applies before writing

pub mod event_service;
pub mod hero_service;
pub mod news_service;
pub mod opinion_service;
pub mod video_service;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Fresh document id (32 lowercase hex chars)
pub fn new_document_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Trimmed value, or a validation error when nothing is left
pub(crate) fn require_text(value: &str, field: &str, message: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(field, message));
    }
    Ok(trimmed.to_string())
}

/// Rejects blank document ids before touching the store
pub(crate) fn require_id(id: &str, message: &str) -> AppResult<String> {
    require_text(id, "id", message)
}

/// Trimmed URL when it uses http(s), `None` otherwise
pub fn ensure_http_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Caller-supplied id when present, else a new one
pub(crate) fn resolve_document_id(id: Option<&str>) -> String {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_document_id)
}
