// Configuration constants for the Marka-E content back end
// Centralizes magic numbers and hardcoded strings shared by the services

/// Application configuration constants
pub mod app {
    /// Name of the application data directory
    pub const DATA_DIR_NAME: &str = "Markae_Content";

    /// Database file name
    pub const DATABASE_FILENAME: &str = "markae_content.db";

    /// Capacity of the change feed ring buffer
    pub const CHANGE_FEED_CAPACITY: usize = 128;
}

/// YouTube embed constants
pub mod embed {
    /// Prefix of every canonical embed URL
    pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

    /// Length of a YouTube video id
    pub const VIDEO_ID_LENGTH: usize = 11;
}

/// Content validation and defaults
pub mod content {
    /// Minimum length of a video title after trimming
    pub const MIN_VIDEO_TITLE_LENGTH: usize = 6;

    /// Document id of the video mirrored from the hero
    pub const FEATURED_VIDEO_ID: &str = "hero-featured";

    /// Document id of the hero configuration
    pub const HERO_DOC_ID: &str = "featured";

    /// Title shown when no hero is stored
    pub const DEFAULT_HERO_TITLE: &str =
        "Plan piloto de lechería inteligente reduce 18% la huella hídrica en Llanquihue";

    /// Video shown when no hero is stored
    pub const DEFAULT_HERO_VIDEO_URL: &str =
        "https://www.youtube.com/embed/_jDeXfDVK10?autoplay=1&mute=1&rel=0&playsinline=1";

    /// Slug base used when a title has no usable characters
    pub const FALLBACK_NEWS_SLUG: &str = "noticia";

    /// Default page sizes
    pub const DEFAULT_VIDEO_LIMIT: u32 = 10;
    pub const DEFAULT_NEWS_LIMIT: u32 = 5;
    pub const DEFAULT_OPINION_LIMIT: u32 = 10;
    pub const DEFAULT_EVENT_LIMIT: u32 = 20;
}

/// News image upload constants
pub mod uploads {
    /// Maximum accepted image size (5 MiB)
    pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

    /// Accepted MIME types
    pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

    /// Header carrying the upload token
    pub const TOKEN_HEADER: &str = "X-Upload-Token";

    /// Environment variable holding the endpoint URL
    pub const ENDPOINT_ENV: &str = "MARKAE_UPLOAD_ENDPOINT";

    /// Environment variable holding the upload token
    pub const TOKEN_ENV: &str = "MARKAE_UPLOAD_TOKEN";

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Database schema constants
pub mod database {
    pub const VIDEOS_TABLE: &str = "videos";
    pub const NEWS_TABLE: &str = "news";
    pub const EVENTS_TABLE: &str = "events";
    pub const OPINIONS_TABLE: &str = "opinions";
    pub const HERO_TABLE: &str = "hero";
}


/// Regex group indices
pub mod regex {
    /// First capture group index
    pub const GROUP_1: usize = 1;
}
