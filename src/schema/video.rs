use serde::Deserialize;
use serde_json::Value;

use super::SchemaNode;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoAuthor {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPublisher {
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSchemaProps {
    pub name: String,
    pub description: String,
    pub content_url: String,
    pub thumbnail_url: String,
    pub embed_url: Option<String>,
    /// `YYYY-MM-DD`
    pub upload_date: String,
    /// ISO 8601 duration, e.g. `PT5M30S`.
    pub duration: Option<String>,
    pub transcript: Option<String>,
    pub educational_use: Option<String>,
    /// Defaults to "ja".
    pub in_language: Option<String>,
    /// Defaults to true.
    pub is_accessible_for_free: Option<bool>,
    pub author: Option<VideoAuthor>,
    pub publisher: Option<VideoPublisher>,
}

pub fn video_schema(props: &VideoSchemaProps) -> Value {
    let author = props.author.as_ref().map(|a| {
        SchemaNode::typed("Person")
            .field("name", a.name.as_str())
            .opt_str("url", a.url.as_deref())
    });

    let publisher = props.publisher.as_ref().map(|p| {
        let logo = p
            .logo
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|url| SchemaNode::typed("ImageObject").field("url", url));
        SchemaNode::typed("Organization")
            .field("name", p.name.as_str())
            .opt_node("logo", logo)
    });

    SchemaNode::root("VideoObject")
        .field("name", props.name.as_str())
        .field("description", props.description.as_str())
        .field("contentUrl", props.content_url.as_str())
        .field("thumbnailUrl", props.thumbnail_url.as_str())
        .field("uploadDate", props.upload_date.as_str())
        .field("inLanguage", props.in_language.as_deref().unwrap_or("ja"))
        .opt_str("embedUrl", props.embed_url.as_deref())
        .opt_str("duration", props.duration.as_deref())
        .opt_str("transcript", props.transcript.as_deref())
        .opt_str("educationalUse", props.educational_use.as_deref())
        .field("isAccessibleForFree", props.is_accessible_for_free.unwrap_or(true))
        .opt_node("author", author)
        .opt_node("publisher", publisher)
        .into_value()
}

/// Several videos on one page, as a JSON array.
pub fn videos_schema(videos: &[VideoSchemaProps]) -> Value {
    Value::Array(videos.iter().map(video_schema).collect())
}
