// API types shared with the web client (TypeScript and JSON Schema export)
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

// =============================================================================
// Stored Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub embed_url: String,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    pub id: String,
    pub title: String,
    pub lead: String,
    pub body: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub source: Option<String>,
    pub article_date: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub video_url: String,
    /// First tag, kept for clients that read a single section
    pub tag: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum HeroStatus {
    Ready,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub content: HeroContent,
    pub status: HeroStatus,
    pub is_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub cta_url: String,
    pub start_at: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OpinionRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub author_name: String,
    pub author_title: String,
    pub created_at: String,
    pub updated_at: String,
}

// =============================================================================
// Form Inputs
// =============================================================================
// Tags arrive exactly as the form emitted them and are normalized server side.

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoInput {
    pub title: String,
    pub embed_url: String,
    #[ts(type = "unknown")]
    pub tags: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub embed_url: Option<String>,
    #[ts(type = "unknown")]
    pub tags: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsInput {
    /// Pre-generated id, so the cover image can be uploaded before saving
    pub id: Option<String>,
    pub title: String,
    pub lead: String,
    pub body: String,
    pub image_url: String,
    #[ts(type = "unknown")]
    pub tags: Value,
    pub source: Option<String>,
    pub article_date: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub lead: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    #[ts(type = "unknown")]
    pub tags: Option<Value>,
    /// A blank source clears it
    pub source: Option<String>,
    pub article_date: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroInput {
    pub title: String,
    pub video_url: String,
    #[ts(type = "unknown")]
    pub tags: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInput {
    pub id: Option<String>,
    pub title: String,
    pub location: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24h
    pub time: String,
    pub cta_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub cta_url: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct OpinionInput {
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub author_name: String,
    pub author_title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct OpinionUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub author_name: Option<String>,
    pub author_title: Option<String>,
}

// =============================================================================
// Queries and Previews
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentQuery {
    pub tag: Option<String>,
    pub limit: Option<i64>,
}

impl ContentQuery {
    pub fn new(tag: Option<&str>, limit: Option<i64>) -> Self {
        Self {
            tag: tag.map(str::to_string),
            limit,
        }
    }

    /// Trimmed tag filter, `None` when blank
    pub fn normalized_tag(&self) -> Option<String> {
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
    }

    /// Positive limit or the given default
    pub fn effective_limit(&self, default: u32) -> u32 {
        match self.limit {
            Some(limit) if limit > 0 => u32::try_from(limit).unwrap_or(u32::MAX),
            _ => default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EmbedPreview {
    pub input: String,
    /// Empty when the input was rejected
    pub embed_url: String,
    pub video_id: Option<String>,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSection {
    pub path: String,
    pub tag: String,
}

// =============================================================================
// Schema Generation Helper
// =============================================================================

/// JSON Schema of the record types, for the web client's form validation
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    use schemars::schema_for;

    let schemas = serde_json::json!({
        "VideoRecord": schema_for!(VideoRecord),
        "NewsRecord": schema_for!(NewsRecord),
        "HeroContent": schema_for!(HeroContent),
        "EventRecord": schema_for!(EventRecord),
        "OpinionRecord": schema_for!(OpinionRecord),
    });
    serde_json::to_string_pretty(&schemas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_input_accepts_arbitrary_tags() {
        let input: VideoInput = serde_json::from_value(json!({
            "title": "Salmonicultura en Chiloé",
            "embedUrl": "https://youtu.be/dQw4w9WgXcQ",
            "tags": "not-an-array"
        }))
        .unwrap();
        assert_eq!(input.tags, json!("not-an-array"));

        let missing: VideoInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.tags, Value::Null);
        assert_eq!(missing.title, "");
    }

    #[test]
    fn test_records_serialize_camel_case() {
        let record = VideoRecord {
            id: "v1".to_string(),
            title: "Lechería".to_string(),
            embed_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            tags: vec!["Lechería".to_string()],
            is_featured: false,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["embedUrl"], "https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(value["isFeatured"], false);
    }

    #[test]
    fn test_content_query_defaults() {
        let query = ContentQuery::new(Some("  Turismo "), Some(0));
        assert_eq!(query.normalized_tag().as_deref(), Some("Turismo"));
        assert_eq!(query.effective_limit(10), 10);

        let query = ContentQuery::new(Some("   "), Some(3));
        assert_eq!(query.normalized_tag(), None);
        assert_eq!(query.effective_limit(10), 3);

        assert_eq!(ContentQuery::default().effective_limit(5), 5);
        assert_eq!(ContentQuery::new(None, Some(-4)).effective_limit(5), 5);
    }

    #[test]
    fn test_hero_status_serialization() {
        assert_eq!(serde_json::to_value(HeroStatus::Ready).unwrap(), json!("ready"));
        assert_eq!(serde_json::to_value(HeroStatus::Empty).unwrap(), json!("empty"));
    }

    #[test]
    fn test_generate_json_schema() {
        let schema = generate_json_schema().unwrap();
        assert!(schema.contains("VideoRecord"));
        assert!(schema.contains("embedUrl"));
    }
}
