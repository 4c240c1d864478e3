//! Component descriptor construction.
//!
//! Combines the extractors into one [`ComponentDoc`]:
//!
//! 1. Detect `forwardRef` usage
//! 2. Annotation comment → description and props, with defaults filled
//!    from destructuring (`{ size = 'md' }`)
//! 3. Destructured parameters not covered by the comment → extra props
//! 4. `cva` variant config → variant props (quoted-option unions)
//! 5. Exported sub-components
//! 6. `className`/`children` always present; `ref` iff the component forwards a ref

use regex::Regex;

use super::extract::{
    bracket_body, extract_doc_block, extract_sub_components, extract_variant_config,
    split_top_level, static_regex, unquote,
};
use super::{ComponentDoc, PropDoc};

static_regex!(
    forward_ref_regex,
    r"(?:React\.)?forwardRef\s*(?:<[^>]*>)?\s*\("
);

/// Builds the descriptor for the primary component of a source file.
///
/// `package` is the module named in the generated import statement.
#[must_use]
pub fn build_component_doc(source: &str, name: &str, package: &str) -> ComponentDoc {
    let mut doc = ComponentDoc::new(name);
    doc.has_forward_ref = forward_ref_regex().is_match(source);

    apply_annotations(&mut doc, source);

    if let Some(config) = extract_variant_config(source) {
        for (category, options) in &config.variants {
            let union = options
                .iter()
                .map(|o| format!("'{o}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            let default = config.default_variants.get(category).map(|d| format!("'{d}'"));

            if !doc.has_prop(category) {
                doc.props.push(PropDoc::optional(category.as_str(), "", ""));
            }
            if let Some(prop) = doc.prop_mut(category) {
                prop.type_name = union;
                if default.is_some() {
                    prop.default = default;
                    prop.required = false;
                }
            }
        }
        doc.variants = config.variants;
        doc.default_variants = config.default_variants;
    }

    doc.sub_components = extract_sub_components(source, name);
    doc.import_statement = import_statement(
        std::iter::once(name).chain(doc.sub_components.iter().map(|s| s.name.as_str())),
        package,
    );

    ensure_standard_props(&mut doc);
    doc
}

/// Builds the primary descriptor plus one descriptor per sub-component.
///
/// Sub-component descriptors are attached as `sub_component_docs`.
#[must_use]
pub fn build_compound_doc(source: &str, name: &str, package: &str) -> ComponentDoc {
    let mut doc = build_component_doc(source, name, package);
    doc.sub_component_docs = doc
        .sub_components
        .iter()
        .map(|sub| build_sub_component_doc(source, &sub.name, package))
        .collect();
    doc
}

fn build_sub_component_doc(source: &str, name: &str, package: &str) -> ComponentDoc {
    let mut doc = ComponentDoc::new(name);
    doc.has_forward_ref = declaration_forwards_ref(source, name);
    doc.import_statement = import_statement(std::iter::once(name), package);
    apply_annotations(&mut doc, source);
    ensure_standard_props(&mut doc);
    doc
}

/// Fills description and props from the annotation comment and the
/// declaration's destructured parameters.
fn apply_annotations(doc: &mut ComponentDoc, source: &str) {
    if let Some(block) = extract_doc_block(source, &doc.name) {
        doc.description = block.description;
        let containers: Vec<String> = block
            .fields
            .iter()
            .filter_map(|f| f.container.clone())
            .collect();
        for field in block.fields {
            // `@param {Object} props` only groups the `props.*` fields
            if containers.contains(&field.name) {
                continue;
            }
            let default = field
                .default
                .or_else(|| destructured_default(source, &field.name));
            let required = !field.optional && default.is_none();
            doc.push_prop(PropDoc {
                name: field.name,
                type_name: field.type_name,
                description: field.description,
                default,
                required,
            });
        }
    }

    for (param, default) in destructured_params(source, &doc.name) {
        if is_standard_prop(&param) {
            continue;
        }
        let type_name = default.as_deref().map_or("unknown", infer_type);
        let mut prop = PropDoc::optional(param, type_name, "");
        prop.default = default;
        doc.push_prop(prop);
    }
}

fn is_standard_prop(name: &str) -> bool {
    matches!(name, "className" | "children" | "ref")
}

/// Appends `className` and `children` if missing, and makes `ref` present
/// exactly when the component forwards a ref.
fn ensure_standard_props(doc: &mut ComponentDoc) {
    doc.push_prop(PropDoc::optional(
        "className",
        "string",
        "Additional CSS classes to apply",
    ));
    doc.push_prop(PropDoc::optional(
        "children",
        "React.ReactNode",
        "Content rendered inside the component",
    ));
    if doc.has_forward_ref {
        doc.push_prop(PropDoc::optional(
            "ref",
            "React.Ref<HTMLElement>",
            "Ref forwarded to the underlying DOM element",
        ));
    } else {
        doc.props.retain(|p| p.name != "ref");
    }
}

fn import_statement<'a>(names: impl Iterator<Item = &'a str>, package: &str) -> String {
    let names: Vec<&str> = names.collect();
    format!("import {{ {} }} from '{package}';", names.join(", "))
}

fn declaration_forwards_ref(source: &str, name: &str) -> bool {
    let pattern = format!(
        r"(?:const|let|var)\s+{}\s*(?::[^=]*)?=\s*(?:React\.)?forwardRef\b",
        regex::escape(name)
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(source))
}

/// Looks up `param = value` inside a destructuring pattern.
///
/// Quoted values are returned single-quoted; other values verbatim.
#[must_use]
pub fn destructured_default(source: &str, param: &str) -> Option<String> {
    let pattern = String::from(r"[{,(]\s*")
        + &regex::escape(param)
        + r#"\s*=\s*('[^']*'|"[^"]*"|`[^`]*`|[^,{}\s()=>]+)"#;
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(source)?.get(1)?.as_str();
    Some(normalise_literal(value))
}

fn normalise_literal(value: &str) -> String {
    unquote(value).map_or_else(|| value.to_string(), |inner| format!("'{inner}'"))
}

/// Returns the names and defaults of the destructured first parameter of
/// the declaration of `name`.
fn destructured_params(source: &str, name: &str) -> Vec<(String, Option<String>)> {
    let name = regex::escape(name);
    let pattern = format!(
        r"(?:function\s+{name}\s*(?:<[^>]*>)?\s*\(|(?:const|let|var)\s+{name}\s*(?::[^=]*)?=\s*(?:React\.)?(?:(?:forwardRef|memo)\s*(?:<[^>]*>)?\s*\(\s*)?(?:function\s*[\w$]*\s*)?\()\s*\{{"
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let Some(open) = re.find(source).map(|m| m.end() - 1) else {
        return Vec::new();
    };
    let Some(body) = bracket_body(source, open) else {
        return Vec::new();
    };

    split_top_level(body, b',')
        .into_iter()
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.starts_with("...") {
                return None;
            }
            let (binding, default) = match entry.split_once('=') {
                Some((binding, default)) => (binding, Some(normalise_literal(default.trim()))),
                None => (entry, None),
            };
            // `{ as: Comp = 'div' }` documents the prop name, not the local
            let param = binding.split(':').next().unwrap_or_default().trim();
            (!param.is_empty()).then(|| (param.to_string(), default))
        })
        .collect()
}

fn infer_type(default: &str) -> &'static str {
    match default {
        "true" | "false" => "boolean",
        _ if unquote(default).is_some() => "string",
        _ if default.parse::<f64>().is_ok() => "number",
        _ => "unknown",
    }
}
