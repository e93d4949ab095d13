//! schema.org structured data.
//!
//! Each generator maps a typed props struct to a JSON-LD tree. Required
//! fields are always written; optional ones only when the caller supplied
//! them, so an omitted prop never shows up as a key (not even as `null`).
//! Props come from internal callers and are not validated.

pub mod author;
pub mod breadcrumb;
pub mod faq;
pub mod howto;
pub mod learning_resource;
pub mod video;

use maud::{html, Markup, PreEscaped};
use serde_json::{Map, Value};

pub use author::{author_schema, simple_author_schema, AuthorSchemaProps};
pub use breadcrumb::{breadcrumb_schema, BreadcrumbItem};
pub use faq::{common_faqs, faq_schema, faq_script, hiragana_faqs, kanji_faqs, FaqItem};
pub use howto::{howto_schema, HowToSchemaProps, HowToStep, HowToVideo};
pub use learning_resource::{learning_resource_schema, LearningResourceProps, Provider};
pub use video::{video_schema, videos_schema, VideoAuthor, VideoPublisher, VideoSchemaProps};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Builder for one schema.org object.
#[derive(Debug, Clone, Default)]
pub struct SchemaNode(Map<String, Value>);

impl SchemaNode {
    /// Top-level node carrying `@context` and `@type`.
    pub fn root(kind: &str) -> Self {
        let mut map = Map::new();
        map.insert("@context".to_string(), Value::from(SCHEMA_CONTEXT));
        map.insert("@type".to_string(), Value::from(kind));
        SchemaNode(map)
    }

    /// Nested node: `@type` only.
    pub fn typed(kind: &str) -> Self {
        let mut map = Map::new();
        map.insert("@type".to_string(), Value::from(kind));
        SchemaNode(map)
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Optional string field; empty strings count as absent.
    pub fn opt_str(self, key: &str, value: Option<&str>) -> Self {
        self.opt(key, value.filter(|v| !v.is_empty()))
    }

    pub fn node(self, key: &str, node: SchemaNode) -> Self {
        self.field(key, node.into_value())
    }

    pub fn opt_node(self, key: &str, node: Option<SchemaNode>) -> Self {
        self.opt(key, node.map(SchemaNode::into_value))
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        node.into_value()
    }
}

/// Renders `schema` as an inert `application/ld+json` script element.
pub fn json_ld_script(id: &str, schema: &Value) -> Markup {
    // `</` would let the payload close the script element early.
    let payload = schema.to_string().replace("</", "<\\/");
    html! {
        script id=(id) type="application/ld+json" { (PreEscaped(payload)) }
    }
}
