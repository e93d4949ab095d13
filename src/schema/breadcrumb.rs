use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SchemaNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub name: String,
    pub url: String,
}

impl BreadcrumbItem {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

pub fn breadcrumb_schema(items: &[BreadcrumbItem]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            SchemaNode::typed("ListItem")
                .field("position", index + 1)
                .field("name", item.name.as_str())
                .field("item", item.url.as_str())
                .into_value()
        })
        .collect();

    SchemaNode::root("BreadcrumbList")
        .field("itemListElement", elements)
        .into_value()
}
