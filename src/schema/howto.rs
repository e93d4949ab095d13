use serde::Deserialize;
use serde_json::Value;

use super::SchemaNode;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HowToStep {
    pub name: String,
    pub text: String,
    /// Image illustrating the step.
    pub image: Option<String>,
    /// Video showing the step.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HowToVideo {
    pub name: String,
    pub description: String,
    pub thumbnail_url: String,
    pub content_url: String,
    pub upload_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HowToSchemaProps {
    pub name: String,
    pub description: String,
    /// ISO 8601 duration, e.g. `PT30M`.
    pub total_time: Option<String>,
    /// Defaults to "0" (free).
    pub estimated_cost: Option<String>,
    pub steps: Vec<HowToStep>,
    pub image: Option<String>,
    pub video: Option<HowToVideo>,
}

pub fn howto_schema(props: &HowToSchemaProps) -> Value {
    let cost = props.estimated_cost.as_deref().unwrap_or("0");

    let steps: Vec<Value> = props
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let direction = SchemaNode::typed("HowToDirection").field("text", step.text.as_str());
            SchemaNode::typed("HowToStep")
                .field("position", index + 1)
                .field("name", step.name.as_str())
                .field("itemListElement", vec![direction.into_value()])
                .opt_str("image", step.image.as_deref())
                .opt_str("url", step.url.as_deref())
                .into_value()
        })
        .collect();

    let video = props.video.as_ref().map(|v| {
        SchemaNode::typed("VideoObject")
            .field("name", v.name.as_str())
            .field("description", v.description.as_str())
            .field("thumbnailUrl", v.thumbnail_url.as_str())
            .field("contentUrl", v.content_url.as_str())
            .field("uploadDate", v.upload_date.as_str())
    });

    SchemaNode::root("HowTo")
        .field("name", props.name.as_str())
        .field("description", props.description.as_str())
        .node(
            "estimatedCost",
            SchemaNode::typed("MonetaryAmount")
                .field("currency", "USD")
                .field("value", cost),
        )
        .field("step", steps)
        .opt_str("totalTime", props.total_time.as_deref())
        .opt_str("image", props.image.as_deref())
        .opt_node("video", video)
        .into_value()
}
