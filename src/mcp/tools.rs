//! Tool definitions and handlers.
//!
//! Every tool answers from the [`ComponentRegistry`] and returns its payload
//! as pretty-printed JSON text. Lookups that find nothing are reported as
//! tool-level errors (`isError: true`), never as JSON-RPC errors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::docs::{ComponentDoc, ComponentRegistry};

/// Components rendered as self-closing elements by `generate_snippet`.
const VOID_COMPONENTS: &[&str] = &[
    "Input",
    "Textarea",
    "Separator",
    "Checkbox",
    "Switch",
    "Slider",
    "Progress",
    "Skeleton",
    "Calendar",
];

/// A tool definition for tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Parameters for tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Creates a successful result holding `value` as pretty JSON.
    #[must_use]
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(text) => Self::text(text),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialise tool output");
                Self::error("Internal error: failed to serialise result")
            }
        }
    }

    /// Returns the text of the first content item.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

/// Returns the list of available tools.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "list_components".to_string(),
            description: Some(
                "List every documented UI component with its description and the names \
                 of its sub-components."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: "get_component".to_string(),
            description: Some(
                "Get the full documentation for one component: props, variants, \
                 sub-components, examples and the import statement."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Component name (case-insensitive), e.g. 'Button'"
                    }
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "get_component_props".to_string(),
            description: Some(
                "Get the props, variant options and variant defaults of a component."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Component name (case-insensitive)"
                    }
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "get_component_examples".to_string(),
            description: Some(
                "Get the usage examples harvested from a component's demo page.".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Component name (case-insensitive)"
                    }
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "search_components".to_string(),
            description: Some(
                "Search components by name, description, prop or sub-component \
                 (case-insensitive substring match)."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Text to search for"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "generate_snippet".to_string(),
            description: Some(
                "Generate a ready-to-paste usage snippet for a component, with its \
                 import statement."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "componentName": {
                        "type": "string",
                        "description": "Component name (case-insensitive)"
                    },
                    "variant": {
                        "type": "string",
                        "description": "Value for the variant prop"
                    },
                    "size": {
                        "type": "string",
                        "description": "Value for the size prop"
                    },
                    "children": {
                        "type": "string",
                        "description": "Element content; defaults to the component name"
                    },
                    "props": {
                        "type": "object",
                        "description": "Additional props. \"true\" renders a bare attribute, \
                                        values starting with '{' are used verbatim, \
                                        values starting with '(' are wrapped in braces",
                        "additionalProperties": {
                            "type": ["string", "number", "boolean"]
                        }
                    }
                },
                "required": ["componentName"]
            }),
        },
    ]
}

/// Dispatches a tool call against the registry.
#[must_use]
pub fn call_tool(registry: &ComponentRegistry, params: &ToolCallParams) -> ToolCallResult {
    let arguments = &params.arguments;
    match params.name.as_str() {
        "list_components" => call_list_components(registry),
        "get_component" => call_get_component(registry, arguments),
        "get_component_props" => call_get_component_props(registry, arguments),
        "get_component_examples" => call_get_component_examples(registry, arguments),
        "search_components" => call_search_components(registry, arguments),
        "generate_snippet" => call_generate_snippet(registry, arguments),
        _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
    }
}

/// Brief listing entry.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentSummary<'a> {
    name: &'a str,
    description: &'a str,
    sub_components: Vec<&'a str>,
}

fn call_list_components(registry: &ComponentRegistry) -> ToolCallResult {
    let components: Vec<_> = registry
        .list()
        .iter()
        .map(|doc| ComponentSummary {
            name: &doc.name,
            description: &doc.description,
            sub_components: doc.sub_components.iter().map(|s| s.name.as_str()).collect(),
        })
        .collect();
    ToolCallResult::json(&components)
}

/// Resolves the `name` argument to a component, or the error to return.
fn lookup<'a>(
    registry: &'a ComponentRegistry,
    arguments: &Value,
    key: &str,
) -> Result<&'a ComponentDoc, ToolCallResult> {
    let Some(name) = arguments.get(key).and_then(Value::as_str) else {
        return Err(ToolCallResult::error(format!(
            "Missing required parameter: {key}"
        )));
    };
    registry
        .get_by_name(name)
        .ok_or_else(|| ToolCallResult::error(format!("Component '{name}' not found")))
}

fn call_get_component(registry: &ComponentRegistry, arguments: &Value) -> ToolCallResult {
    match lookup(registry, arguments, "name") {
        Ok(doc) => ToolCallResult::json(doc),
        Err(e) => e,
    }
}

fn call_get_component_props(registry: &ComponentRegistry, arguments: &Value) -> ToolCallResult {
    let doc = match lookup(registry, arguments, "name") {
        Ok(doc) => doc,
        Err(e) => return e,
    };
    ToolCallResult::json(&json!({
        "name": doc.name,
        "importStatement": doc.import_statement,
        "props": doc.props,
        "variants": doc.variants,
        "defaultVariants": doc.default_variants,
    }))
}

fn call_get_component_examples(registry: &ComponentRegistry, arguments: &Value) -> ToolCallResult {
    let doc = match lookup(registry, arguments, "name") {
        Ok(doc) => doc,
        Err(e) => return e,
    };
    if doc.examples.is_empty() {
        return ToolCallResult::text(format!(
            "No examples are available for '{}'. Use get_component for its props and \
             generate_snippet for a starting point.",
            doc.name
        ));
    }
    ToolCallResult::json(&json!({
        "name": doc.name,
        "examples": doc.examples,
    }))
}

fn call_search_components(registry: &ComponentRegistry, arguments: &Value) -> ToolCallResult {
    let Some(query) = arguments.get("query").and_then(Value::as_str) else {
        return ToolCallResult::error("Missing required parameter: query");
    };

    let results: Vec<_> = registry
        .search(query)
        .into_iter()
        .map(|doc| {
            json!({
                "name": doc.name,
                "description": doc.description,
                "hasSubComponents": !doc.sub_components.is_empty(),
            })
        })
        .collect();

    ToolCallResult::json(&json!({
        "query": query,
        "count": results.len(),
        "results": results,
    }))
}

/// Arguments accepted by `generate_snippet`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetRequest {
    /// Component to render.
    pub component_name: String,
    /// Value for the `variant` prop.
    #[serde(default)]
    pub variant: Option<String>,
    /// Value for the `size` prop.
    #[serde(default)]
    pub size: Option<String>,
    /// Element content.
    #[serde(default)]
    pub children: Option<String>,
    /// Extra props, rendered in the order given.
    #[serde(default)]
    pub props: IndexMap<String, Value>,
}

fn call_generate_snippet(registry: &ComponentRegistry, arguments: &Value) -> ToolCallResult {
    let request: SnippetRequest = match serde_json::from_value(arguments.clone()) {
        Ok(request) => request,
        Err(e) => return ToolCallResult::error(format!("Invalid arguments: {e}")),
    };

    let Some(doc) = registry.get_by_name(&request.component_name) else {
        return ToolCallResult::error(format!(
            "Component '{}' not found",
            request.component_name
        ));
    };

    ToolCallResult::json(&json!({
        "component": doc.name,
        "importStatement": doc.import_statement,
        "snippet": render_snippet(doc, &request),
    }))
}

/// Renders a JSX element for `doc` from the snippet arguments.
#[must_use]
pub fn render_snippet(doc: &ComponentDoc, request: &SnippetRequest) -> String {
    let mut attributes = String::new();
    if let Some(variant) = &request.variant {
        attributes.push_str(&attribute("variant", variant));
    }
    if let Some(size) = &request.size {
        attributes.push_str(&attribute("size", size));
    }
    for (name, value) in &request.props {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        attributes.push_str(&attribute(name, &value));
    }

    let tag = &doc.name;
    if VOID_COMPONENTS.contains(&tag.as_str()) {
        format!("<{tag}{attributes} />")
    } else {
        let children = request.children.as_deref().unwrap_or(tag);
        format!("<{tag}{attributes}>{children}</{tag}>")
    }
}

/// Formats one JSX attribute, leading space included.
fn attribute(name: &str, value: &str) -> String {
    match value {
        "true" => format!(" {name}"),
        "false" => format!(" {name}={{false}}"),
        v if v.starts_with('{') => format!(" {name}={v}"),
        v if v.starts_with('(') => format!(" {name}={{{v}}}"),
        v => format!(" {name}=\"{}\"", v.replace('"', "&quot;")),
    }
}
