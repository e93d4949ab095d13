use serde::Deserialize;
use serde_json::Value;

use super::SchemaNode;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Provider {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResourceProps {
    pub name: String,
    pub description: String,
    pub url: String,
    /// "Game", "Assessment", ...
    pub learning_resource_type: Option<String>,
    #[serde(default)]
    pub educational_level: Vec<String>,
    pub teaches: Option<String>,
    pub assesses: Option<String>,
    pub time_required: Option<String>,
    pub is_accessible_for_free: Option<bool>,
    pub in_language: Option<String>,
    pub provider: Option<Provider>,
}

pub fn learning_resource_schema(props: &LearningResourceProps) -> Value {
    let levels = (!props.educational_level.is_empty()).then(|| props.educational_level.clone());

    let provider = props.provider.as_ref().map(|p| {
        SchemaNode::typed("Organization")
            .field("name", p.name.as_str())
            .opt_str("url", p.url.as_deref())
    });

    SchemaNode::root("LearningResource")
        .field("name", props.name.as_str())
        .field("description", props.description.as_str())
        .field("url", props.url.as_str())
        .opt_str("learningResourceType", props.learning_resource_type.as_deref())
        .opt("educationalLevel", levels)
        .opt_str("teaches", props.teaches.as_deref())
        .opt_str("assesses", props.assesses.as_deref())
        .opt_str("timeRequired", props.time_required.as_deref())
        .opt("isAccessibleForFree", props.is_accessible_for_free)
        .opt_str("inLanguage", props.in_language.as_deref())
        .opt_node("provider", provider)
        .into_value()
}
