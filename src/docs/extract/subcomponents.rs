//! Compound-component discovery.
//!
//! A compound component's module exports several PascalCase declarations
//! used together (`Card`, `CardHeader`, `CardContent`). Everything exported
//! besides the primary name is a sub-component.

use super::{extract_doc_block, static_regex};
use crate::docs::SubComponent;

static_regex!(
    exported_function_regex,
    r"export\s+(?:default\s+)?(?:async\s+)?function\s+([A-Z][\w$]*)"
);
static_regex!(
    exported_forward_ref_regex,
    r"export\s+const\s+([A-Z][\w$]*)\s*(?::[^=]*)?=\s*(?:React\.)?forwardRef\b"
);
static_regex!(
    exported_function_expr_regex,
    r"export\s+const\s+([A-Z][\w$]*)\s*(?::[^=]*)?=\s*(?:function\b|\([^)]*\)\s*(?::[^=]*)?=>|[A-Za-z_$][\w$]*\s*=>)"
);
static_regex!(export_list_regex, r"export\s*\{([^}]*)\}");

/// Finds every exported sub-component of `primary` in source order.
///
/// Recognised forms are exported function declarations, exported `const`
/// bindings to `forwardRef(...)` or a function expression, and names listed
/// in `export { ... }` clauses. The first occurrence of a name wins.
#[must_use]
pub fn extract_sub_components(source: &str, primary: &str) -> Vec<SubComponent> {
    let mut found: Vec<(usize, &str)> = [
        exported_function_regex(),
        exported_forward_ref_regex(),
        exported_function_expr_regex(),
    ]
    .iter()
    .flat_map(|re| re.captures_iter(source))
    .filter_map(|caps| caps.get(1).map(|m| (m.start(), m.as_str())))
    .collect();

    for caps in export_list_regex().captures_iter(source) {
        let Some(list) = caps.get(1) else { continue };
        for item in list.as_str().split(',') {
            // `export { Foo as Bar }` exports `Bar`
            let exported = item.split_whitespace().last().unwrap_or_default();
            if exported.starts_with(|c: char| c.is_ascii_uppercase()) {
                found.push((list.start(), exported));
            }
        }
    }
    found.sort_by_key(|(pos, _)| *pos);

    let mut subs: Vec<SubComponent> = Vec::new();
    for (_, name) in found {
        if name == primary || subs.iter().any(|s| s.name == name) {
            continue;
        }
        let description = extract_doc_block(source, name)
            .map(|block| block.description)
            .unwrap_or_default();
        subs.push(SubComponent {
            name: name.to_string(),
            description,
        });
    }
    subs
}
