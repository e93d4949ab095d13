use serde::Deserialize;
use serde_json::Value;

use super::SchemaNode;

/// Author details for E-E-A-T markup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSchemaProps {
    pub name: String,
    pub url: Option<String>,
    pub image: Option<String>,
    pub job_title: Option<String>,
    pub affiliation: Option<String>,
    pub alumni_of: Option<String>,
    pub expertise: Option<String>,
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub credentials: Vec<String>,
    #[serde(default)]
    pub same_as: Vec<String>,
    pub email: Option<String>,
    /// Short biography.
    pub description: Option<String>,
}

pub fn author_schema(props: &AuthorSchemaProps) -> Value {
    let affiliation = props
        .affiliation
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(|name| SchemaNode::typed("Organization").field("name", name));

    let alumni_of = props
        .alumni_of
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(|name| SchemaNode::typed("EducationalOrganization").field("name", name));

    let occupation = props.years_of_experience.filter(|y| *y > 0).map(|years| {
        let role = props.job_title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Educator");
        SchemaNode::typed("Occupation")
            .field("name", role)
            .field("experienceRequirements", format!("{} years of experience", years))
    });

    let credentials = (!props.credentials.is_empty()).then(|| {
        props
            .credentials
            .iter()
            .map(|c| {
                SchemaNode::typed("EducationalOccupationalCredential")
                    .field("name", c.as_str())
                    .into_value()
            })
            .collect::<Vec<_>>()
    });

    let same_as = (!props.same_as.is_empty()).then(|| props.same_as.clone());

    SchemaNode::root("Person")
        .field("name", props.name.as_str())
        .opt_str("url", props.url.as_deref())
        .opt_str("image", props.image.as_deref())
        .opt_str("jobTitle", props.job_title.as_deref())
        .opt_str("description", props.description.as_deref())
        .opt_str("email", props.email.as_deref())
        .opt_node("affiliation", affiliation)
        .opt_node("alumniOf", alumni_of)
        .opt_str("knowsAbout", props.expertise.as_deref())
        .opt_node("hasOccupation", occupation)
        .opt("hasCredential", credentials)
        .opt("sameAs", same_as)
        .into_value()
}

/// Bare `Person` for embedding inside another schema (no `@context`).
pub fn simple_author_schema(name: &str, url: Option<&str>) -> Value {
    SchemaNode::typed("Person")
        .field("name", name)
        .opt_str("url", url)
        .into_value()
}
