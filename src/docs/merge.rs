//! Folding demo-page data into a built descriptor.
//!
//! The source-derived descriptor is authoritative. Demo data only fills
//! gaps, with one exception: examples always come from the demo page.

use super::extract::DemoDocs;
use super::{ComponentDoc, PropDoc};

/// Placeholder used in props tables for "no default".
const NO_DEFAULT: &str = "-";

/// Merges demo-derived data into `doc`.
///
/// - `examples` is replaced by the demo's examples (emptied if `demo` is `None`)
/// - `description` is taken from the demo only if `doc` has none
/// - props-table rows add missing props, and fill empty prop descriptions;
///   existing types, defaults, and `required` flags are never touched
pub fn merge_demo(doc: &mut ComponentDoc, demo: Option<DemoDocs>) {
    let Some(demo) = demo else {
        doc.examples = Vec::new();
        return;
    };

    doc.examples = demo.examples;

    if doc.description.trim().is_empty() {
        if let Some(description) = demo.description {
            doc.description = description;
        }
    }

    for row in demo.props {
        if let Some(prop) = doc.prop_mut(&row.name) {
            if prop.description.trim().is_empty() {
                prop.description = row.description;
            }
            continue;
        }
        let default = (row.default.trim() != NO_DEFAULT && !row.default.trim().is_empty())
            .then_some(row.default);
        doc.props.push(PropDoc {
            name: row.name,
            type_name: row.type_name,
            description: row.description,
            default,
            required: false,
        });
    }
}
