// News image upload client
// Validates the image locally, then posts it to the site's upload endpoint

use std::sync::OnceLock;
use std::time::Duration;

use log::{info, warn};
use regex::Regex;
use reqwest::{multipart, Client};
use serde::Deserialize;

use crate::config::uploads::{
    ALLOWED_MIME_TYPES, ENDPOINT_ENV, MAX_IMAGE_SIZE_BYTES, REQUEST_TIMEOUT_SECS, TOKEN_ENV,
    TOKEN_HEADER,
};
use crate::errors::{AppError, AppResult};

const MISSING_IMAGE: &str = "Debes adjuntar un archivo de imagen válido.";
const BAD_FORMAT: &str = "Formato de imagen no permitido. Solo se aceptan JPEG, PNG o WebP.";
const TOO_LARGE: &str = "La imagen supera los 5MB permitidos.";
const BAD_ARTICLE_ID: &str =
    "No pudimos determinar el identificador interno del artículo. Intenta guardar nuevamente.";
const UPLOAD_FAILED: &str = "No pudimos subir la imagen. Intenta nuevamente.";
const MISSING_URL: &str = "El servidor no retornó la URL de la imagen.";

fn article_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{6,}$").expect("article id pattern is valid"))
}

/// An image picked by the editor, held in memory until sent
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }
}

pub fn validate_image(image: &ImageUpload) -> AppResult<()> {
    if image.bytes.is_empty() {
        return Err(AppError::validation("image", MISSING_IMAGE));
    }
    if !ALLOWED_MIME_TYPES.contains(&image.mime_type.as_str()) {
        return Err(AppError::validation("image", BAD_FORMAT));
    }
    if image.bytes.len() > MAX_IMAGE_SIZE_BYTES {
        return Err(AppError::validation("image", TOO_LARGE));
    }
    Ok(())
}

pub fn validate_article_id(article_id: &str) -> AppResult<()> {
    if !article_id_pattern().is_match(article_id) {
        return Err(AppError::validation("articleId", BAD_ARTICLE_ID));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub endpoint: String,
    pub token: String,
}

impl UploadSettings {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::config(format!("{key} is not set")))
        };

        let endpoint = read(ENDPOINT_ENV)?;
        url::Url::parse(&endpoint)?;
        let token = read(TOKEN_ENV)?;

        Ok(Self { endpoint, token })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadFailure {
    #[serde(default)]
    error: Option<String>,
}

pub struct NewsImageUploader {
    client: Client,
    settings: UploadSettings,
}

impl NewsImageUploader {
    pub fn new(settings: UploadSettings) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(UploadSettings::from_env()?)
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    /// Upload the image for `article_id` and return its public URL.
    pub async fn upload(&self, image: ImageUpload, article_id: &str) -> AppResult<String> {
        validate_image(&image)?;
        validate_article_id(article_id)?;

        let size = image.bytes.len();
        let part = multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)?;
        let form = multipart::Form::new()
            .part("image", part)
            .text("articleId", article_id.to_string());

        let response = self
            .client
            .post(&self.settings.endpoint)
            .header(TOKEN_HEADER, &self.settings.token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<UploadFailure>(&body)
                .ok()
                .and_then(|failure| failure.error)
                .unwrap_or(body);
            warn!("Image upload for {article_id} rejected ({status}): {detail}");
            return Err(AppError::upload(Some(status.as_u16()), UPLOAD_FAILED));
        }

        let payload: UploadResponse = response
            .json()
            .await
            .map_err(|_| AppError::upload(Some(status.as_u16()), MISSING_URL))?;
        let url = payload
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::upload(Some(status.as_u16()), MISSING_URL))?;

        info!("Uploaded {size} bytes for article {article_id}: {url}");
        Ok(url)
    }
}
