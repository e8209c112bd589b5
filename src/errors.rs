use thiserror::Error;

/// Unified error type for the content back end
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),

    // Validation messages are shown to editors as-is
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("{message}")]
    Upload { status: Option<u16>, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    DatabaseLock(String),

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn upload(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upload {
            status,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn database_lock(message: impl Into<String>) -> Self {
        Self::DatabaseLock(message.into())
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Field name for validation errors, `None` otherwise
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Editor input problem (fixable in the form)
    UserError,
    /// Transient system problem (retryable)
    SystemError,
    /// Missing or broken configuration
    ConfigError,
    /// Unrecoverable
    FatalError,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation { .. } => ErrorCategory::UserError,
            AppError::UrlParse(_) => ErrorCategory::UserError,
            AppError::NotFound { .. } => ErrorCategory::UserError,
            AppError::Configuration(_) => ErrorCategory::ConfigError,
            AppError::Database(_) => ErrorCategory::SystemError,
            AppError::Network(_) => ErrorCategory::SystemError,
            AppError::Io(_) => ErrorCategory::SystemError,
            AppError::Upload { .. } => ErrorCategory::SystemError,
            AppError::Internal(_) => ErrorCategory::SystemError,
            AppError::DatabaseLock(_) => ErrorCategory::SystemError,
            AppError::Custom(_) => ErrorCategory::SystemError,
            AppError::Serialization(_) => ErrorCategory::FatalError,
        }
    }

    /// Message for the admin panel
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => {
                "Ocurrió un error en la base de datos. Intenta nuevamente.".to_string()
            }
            AppError::Network(_) => {
                "Error de red. Revisa tu conexión a internet.".to_string()
            }
            AppError::Io(_) => "Ocurrió un error de archivos.".to_string(),
            AppError::UrlParse(_) => "La URL ingresada no es válida.".to_string(),
            AppError::Internal(err) => format!("Error interno: {err}"),
            AppError::Validation { message, .. } => message.clone(),
            AppError::NotFound { .. } => "El contenido solicitado no existe.".to_string(),
            AppError::Upload { message, .. } => message.clone(),
            AppError::Configuration(msg) => format!("Error de configuración: {msg}"),
            AppError::Serialization(_) => "No pudimos procesar los datos.".to_string(),
            AppError::DatabaseLock(msg) => msg.clone(),
            AppError::Custom(msg) => msg.clone(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::SystemError)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Custom(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Custom(msg.to_string())
    }
}

impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}

/// Convert AppResult<T> to Result<T, String> for the command layer
pub fn to_command_result<T>(result: AppResult<T>) -> Result<T, String> {
    result.map_err(|e| e.to_string())
}
