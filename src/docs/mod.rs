//! Component documentation extraction and cataloguing.
//!
//! This module recovers structured documentation from React component
//! sources without a real JavaScript parser:
//!
//! - [`extract`]: small pattern-based extractors (annotation comments,
//!   variant configs, exported sub-components, demo pages)
//! - [`builder`]: composes the extractors into one [`ComponentDoc`]
//! - [`merge`]: folds demo-derived data into a built descriptor
//! - [`pipeline`]: walks every component directory and writes the [`Catalog`]
//! - [`registry`]: read-only, load-once view over the persisted catalog
//!
//! # Catalog Format
//!
//! The catalog is a pretty-printed JSON document:
//!
//! ```text
//! {
//!   "generatedAt": "2026-01-01T00:00:00+00:00",
//!   "totalComponents": 2,
//!   "components": [ { "name": "Button", "props": [...], ... }, ... ]
//! }
//! ```
//!
//! Extraction is best-effort: a miss is an empty value, never an error.

pub mod builder;
pub mod error;
pub mod extract;
pub mod merge;
pub mod pipeline;
pub mod registry;

pub use error::{DocsError, DocsResult};
pub use registry::ComponentRegistry;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Variant categories in source order, each with its ordered options.
pub type VariantMap = IndexMap<String, Vec<String>>;

/// Chosen default option per variant category.
pub type DefaultVariantMap = IndexMap<String, String>;

/// The persisted collection of component descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// RFC 3339 timestamp of the build that produced this catalog.
    #[serde(default)]
    pub generated_at: Option<String>,
    /// Number of entries in `components`.
    #[serde(default)]
    pub total_components: usize,
    /// One descriptor per component, in directory order.
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
}

impl Catalog {
    /// Creates a catalog stamped with the current time.
    #[must_use]
    pub fn new(components: Vec<ComponentDoc>) -> Self {
        Self {
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
            total_components: components.len(),
            components,
        }
    }

    /// Returns the catalog header without the component bodies.
    #[must_use]
    pub fn metadata(&self) -> CatalogMetadata {
        CatalogMetadata {
            generated_at: self.generated_at.clone(),
            total_components: self.total_components,
        }
    }
}

/// Catalog header exposed by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMetadata {
    /// When the catalog was generated, if known.
    pub generated_at: Option<String>,
    /// Number of components in the catalog.
    pub total_components: usize,
}

/// The canonical documentation record of one UI component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    /// Component name as exported (e.g. `Button`).
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Import line a consumer would write.
    #[serde(default)]
    pub import_statement: String,
    /// Props, unique by name.
    #[serde(default)]
    pub props: Vec<PropDoc>,
    /// Variant categories and their options.
    #[serde(default)]
    pub variants: VariantMap,
    /// Default option per variant category.
    #[serde(default)]
    pub default_variants: DefaultVariantMap,
    /// Secondary declarations exported alongside the component.
    #[serde(default)]
    pub sub_components: Vec<SubComponent>,
    /// Whether the component forwards a ref.
    #[serde(default)]
    pub has_forward_ref: bool,
    /// Usage examples taken from the demo page.
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Source file relative to the project root.
    #[serde(default)]
    pub file_path: String,
    /// Full descriptors of compound sub-components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_component_docs: Vec<ComponentDoc>,
}

impl ComponentDoc {
    /// Creates an empty descriptor for the named component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Looks up a prop by exact name.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&PropDoc> {
        self.props.iter().find(|p| p.name == name)
    }

    /// Looks up a prop by exact name for modification.
    pub fn prop_mut(&mut self, name: &str) -> Option<&mut PropDoc> {
        self.props.iter_mut().find(|p| p.name == name)
    }

    /// Returns `true` if a prop with this name exists.
    #[must_use]
    pub fn has_prop(&self, name: &str) -> bool {
        self.prop(name).is_some()
    }

    /// Appends a prop unless one with the same name is already present.
    ///
    /// Returns `true` if the prop was added.
    pub fn push_prop(&mut self, prop: PropDoc) -> bool {
        if self.has_prop(&prop.name) {
            return false;
        }
        self.props.push(prop);
        true
    }
}

/// A single documented prop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropDoc {
    /// Prop name.
    pub name: String,
    /// Type as written in the source (or a quoted-option union for variants).
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Default value as source text; `None` when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether callers must supply the prop.
    #[serde(default)]
    pub required: bool,
}

impl PropDoc {
    /// Creates an optional prop with no default.
    #[must_use]
    pub fn optional(
        name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: description.into(),
            default: None,
            required: false,
        }
    }
}

/// A secondary named declaration exported with a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubComponent {
    /// Exported name.
    pub name: String,
    /// Description from its annotation comment; may be empty.
    #[serde(default)]
    pub description: String,
}

/// A usage example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Section heading the example appeared under.
    pub title: String,
    /// Snippet source.
    pub code: String,
    /// Where the snippet came from.
    #[serde(rename = "type")]
    pub kind: ExampleKind,
}

/// Origin of an [`Example`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleKind {
    /// The import statement of the demo page.
    Import,
    /// A live example block.
    Example,
    /// A static code block.
    Codeblock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_prop_rejects_duplicates() {
        let mut doc = ComponentDoc::new("Button");
        assert!(doc.push_prop(PropDoc::optional("size", "string", "")));
        assert!(!doc.push_prop(PropDoc::optional("size", "number", "other")));
        assert_eq!(doc.props.len(), 1);
        assert_eq!(doc.props[0].type_name, "string");
    }

    #[test]
    fn catalog_serialises_camel_case() {
        let mut doc = ComponentDoc::new("Button");
        doc.has_forward_ref = true;
        doc.props.push(PropDoc::optional("variant", "'a' | 'b'", ""));
        let catalog = Catalog::new(vec![doc]);

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains(r#""totalComponents":1"#));
        assert!(json.contains(r#""generatedAt":"#));
        assert!(json.contains(r#""hasForwardRef":true"#));
        assert!(json.contains(r#""type":"'a' | 'b'""#));
        assert!(!json.contains("subComponentDocs"));
        assert!(!json.contains(r#""default""#));
    }

    #[test]
    fn example_kind_lowercase() {
        let example = Example {
            title: "Basic".to_string(),
            code: "<Button />".to_string(),
            kind: ExampleKind::Codeblock,
        };
        let json = serde_json::to_string(&example).unwrap();
        assert!(json.contains(r#""type":"codeblock""#));
    }

    #[test]
    fn catalog_tolerates_missing_fields() {
        let catalog: Catalog = serde_json::from_str(r#"{"components":[{"name":"Card"}]}"#).unwrap();
        assert_eq!(catalog.generated_at, None);
        assert_eq!(catalog.components[0].name, "Card");
        assert!(catalog.components[0].props.is_empty());
    }
}
