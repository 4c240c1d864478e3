//! Catalog resources.
//!
//! Two resources are exposed: the catalog listing at [`CATALOG_URI`] and one
//! descriptor per component, addressed through [`COMPONENT_URI_TEMPLATE`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::docs::ComponentRegistry;

/// URI scheme prefix shared by every resource.
pub const URI_PREFIX: &str = "components://";

/// URI of the catalog listing.
pub const CATALOG_URI: &str = "components://list";

/// URI template of the per-component resource.
pub const COMPONENT_URI_TEMPLATE: &str = "components://{name}";

const JSON_MIME: &str = "application/json";

/// A concrete resource for resources/list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Resource URI.
    pub uri: String,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Content type of the resource body.
    pub mime_type: String,
}

/// A parameterised resource for resources/templates/list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    /// RFC 6570 URI template.
    pub uri_template: String,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Content type of the resource body.
    pub mime_type: String,
}

/// Parameters for resources/read request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReadParams {
    /// URI to read.
    pub uri: String,
}

/// Body of a read resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    /// URI that was read.
    pub uri: String,
    /// Content type of `text`.
    pub mime_type: String,
    /// The resource body.
    pub text: String,
}

/// Returns the concrete resources.
#[must_use]
pub fn resource_definitions() -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        uri: CATALOG_URI.to_string(),
        name: "Component catalog".to_string(),
        description: "Every documented component with its description and sub-components"
            .to_string(),
        mime_type: JSON_MIME.to_string(),
    }]
}

/// Returns the resource templates.
#[must_use]
pub fn resource_templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate {
        uri_template: COMPONENT_URI_TEMPLATE.to_string(),
        name: "Component documentation".to_string(),
        description: "Full documentation of one component, by name".to_string(),
        mime_type: JSON_MIME.to_string(),
    }]
}

/// Reads the resource at `uri`.
///
/// Returns `None` when the URI does not name a known resource.
#[must_use]
pub fn read_resource(registry: &ComponentRegistry, uri: &str) -> Option<ResourceContents> {
    let name = uri.strip_prefix(URI_PREFIX)?;
    // a component named `List` shadows the catalog listing
    let body = match registry.get_by_name(name) {
        Some(doc) => serde_json::to_value(doc).ok()?,
        None if uri == CATALOG_URI => catalog_listing(registry),
        None => return None,
    };

    let text = serde_json::to_string_pretty(&body).ok()?;
    Some(ResourceContents {
        uri: uri.to_string(),
        mime_type: JSON_MIME.to_string(),
        text,
    })
}

fn catalog_listing(registry: &ComponentRegistry) -> Value {
    let components: Vec<_> = registry
        .list()
        .iter()
        .map(|doc| {
            json!({
                "name": doc.name,
                "description": doc.description,
                "subComponents": doc.sub_components.iter().map(|s| &s.name).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({
        "metadata": registry.metadata(),
        "components": components,
    })
}
