//! Demo page extraction.
//!
//! Demo pages are JSX documents that show a component in use:
//!
//! ```text
//! import { Button } from '@/components/ui';
//!
//! <p className="lead">Displays a button.</p>
//! <Section title="Basic Usage">
//!   <Example code={`<Button>Click</Button>`}>...</Example>
//! </Section>
//! <Section title="Props">
//!   <table>... <tr><td>disabled</td><td>boolean</td><td>false</td><td>...</td></tr></table>
//! </Section>
//! ```
//!
//! Snippets are titled by the nearest preceding `<Section title=...>`.

use regex::Regex;

use super::{dedent, static_regex};
use crate::docs::{Example, ExampleKind};

static_regex!(
    import_regex,
    r#"(?m)^[ \t]*import\s+[^;]*?\s+from\s+['"]([^'"]+)['"];?"#
);
static_regex!(
    relative_components_regex,
    r"^(?:\.{1,2}/)+(?:[\w.@-]+/)*components(?:/|$)"
);
static_regex!(
    section_regex,
    r#"<Section\b[^>]*?\btitle=(?:"([^"]*)"|'([^']*)'|\{\s*["'`]([^"'`]*)["'`]\s*\})"#
);
static_regex!(
    example_regex,
    r"<(?:[A-Z]\w*)?Example\b[^>]*?\bcode=\{\s*`((?:[^`\\]|\\.)*)`\s*\}"
);
static_regex!(
    code_block_regex,
    r"<(?:[A-Z]\w*)?CodeBlock\b[^>]*?\bcode=\{\s*`((?:[^`\\]|\\.)*)`\s*\}"
);
static_regex!(table_row_regex, r"(?s)<tr\b[^>]*>(.*?)</tr>");
static_regex!(table_cell_regex, r"(?s)<td\b[^>]*>(.*?)</td>");
static_regex!(paragraph_regex, r"(?s)<p\b([^>]*)>(.*?)</p>");
static_regex!(class_attr_regex, r#"class(?:Name)?=\{?["'`]([^"'`]*)["'`]"#);
static_regex!(tag_regex, r"<[^>]+>");
static_regex!(jsx_string_regex, r#"\{\s*(?:"([^"]*)"|'([^']*)'|`([^`]*)`)\s*\}"#);

/// Class names that mark a paragraph as the page's lead description.
const LEAD_MARKERS: &[&str] = &["lead", "text-lg", "text-xl"];

/// Everything a demo page contributes to a component descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoDocs {
    /// Import, live examples, then code blocks.
    pub examples: Vec<Example>,
    /// Lead paragraph text, if any.
    pub description: Option<String>,
    /// Rows of the props table, if any.
    pub props: Vec<PropRow>,
}

/// One row of a demo page's props table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropRow {
    /// Prop name.
    pub name: String,
    /// Type column.
    pub type_name: String,
    /// Default column; `-` means no default.
    pub default: String,
    /// Description column.
    pub description: String,
}

/// Runs every demo extractor over `source`.
///
/// `package` is the component package name recognised in import statements.
#[must_use]
pub fn extract_demo(source: &str, package: &str) -> DemoDocs {
    DemoDocs {
        examples: extract_examples(source, package),
        description: extract_description(source),
        props: extract_props_table(source),
    }
}

/// Extracts the import example, live examples, and code blocks, in that order.
#[must_use]
pub fn extract_examples(source: &str, package: &str) -> Vec<Example> {
    let sections = section_titles(source);
    let mut examples: Vec<Example> = extract_import(source, package).into_iter().collect();
    let mut fallback = 0;

    for (re, kind) in [
        (example_regex(), ExampleKind::Example),
        (code_block_regex(), ExampleKind::Codeblock),
    ] {
        for caps in re.captures_iter(source) {
            let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let code = dedent(&unescape_template(body.as_str()));
            if code.is_empty() || examples.iter().any(|e| e.code == code) {
                continue;
            }
            if kind == ExampleKind::Codeblock && code.starts_with("import") {
                continue;
            }

            let title = nearest_title(&sections, whole.start()).map_or_else(
                || {
                    fallback += 1;
                    format!("Example {fallback}")
                },
                str::to_string,
            );
            examples.push(Example { title, code, kind });
        }
    }
    examples
}

/// Builds the import example from the first statement importing the
/// component package (by name or by a relative `components` path).
#[must_use]
pub fn extract_import(source: &str, package: &str) -> Option<Example> {
    import_regex().captures_iter(source).find_map(|caps| {
        let module = caps.get(1)?.as_str();
        let is_package = module == package
            || module
                .strip_prefix(package)
                .is_some_and(|rest| rest.starts_with('/'));
        if !is_package && !relative_components_regex().is_match(module) {
            return None;
        }
        Some(Example {
            title: "Import".to_string(),
            code: caps.get(0)?.as_str().trim().to_string(),
            kind: ExampleKind::Import,
        })
    })
}

/// Extracts the lead paragraph of the page as a single line.
#[must_use]
pub fn extract_description(source: &str) -> Option<String> {
    paragraph_regex().captures_iter(source).find_map(|caps| {
        let classes = class_attr_regex().captures(caps.get(1)?.as_str())?;
        let is_lead = classes
            .get(1)?
            .as_str()
            .split_whitespace()
            .any(|class| LEAD_MARKERS.contains(&class));
        if !is_lead {
            return None;
        }
        let text = clean_cell(caps.get(2)?.as_str());
        (!text.is_empty()).then_some(text)
    })
}

/// Extracts the rows of the table under the `Props` section.
///
/// Both HTML (`<tr><td>...`) and Markdown (`| a | b |`) tables are read;
/// rows without exactly four cells, or with an empty name, are skipped.
#[must_use]
pub fn extract_props_table(source: &str) -> Vec<PropRow> {
    let sections = section_titles(source);
    let Some(index) = sections
        .iter()
        .position(|(_, title)| title.trim().eq_ignore_ascii_case("props"))
    else {
        return Vec::new();
    };
    let start = sections[index].0;
    let end = sections.get(index + 1).map_or(source.len(), |(pos, _)| *pos);
    let region = &source[start..end];

    let mut rows: Vec<PropRow> = table_row_regex()
        .captures_iter(region)
        .filter_map(|row| {
            let cells = cells(table_cell_regex(), row.get(1)?.as_str());
            prop_row(&cells)
        })
        .collect();

    if rows.is_empty() {
        rows = markdown_rows(region);
    }
    rows
}

fn cells(re: &Regex, row: &str) -> Vec<String> {
    re.captures_iter(row)
        .filter_map(|c| c.get(1).map(|m| clean_cell(m.as_str())))
        .collect()
}

fn markdown_rows(region: &str) -> Vec<PropRow> {
    region
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('|'))
        .filter_map(|line| {
            let cells: Vec<String> = line
                .trim_matches('|')
                .split('|')
                .map(|c| clean_cell(c.trim().trim_matches('`')))
                .collect();
            if cells.iter().all(|c| c.chars().all(|ch| matches!(ch, '-' | ':'))) {
                return None;
            }
            if cells.first().is_some_and(|c| matches!(c.to_lowercase().as_str(), "prop" | "name")) {
                return None;
            }
            prop_row(&cells)
        })
        .collect()
}

fn prop_row(cells: &[String]) -> Option<PropRow> {
    let [name, type_name, default, description] = cells else {
        return None;
    };
    if name.is_empty() {
        return None;
    }
    Some(PropRow {
        name: name.clone(),
        type_name: type_name.clone(),
        default: default.clone(),
        description: description.clone(),
    })
}

/// Returns `(position, title)` for every `<Section title=...>`.
fn section_titles(source: &str) -> Vec<(usize, String)> {
    section_regex()
        .captures_iter(source)
        .filter_map(|caps| {
            let title = (1..=3).find_map(|i| caps.get(i))?;
            Some((caps.get(0)?.start(), title.as_str().to_string()))
        })
        .collect()
}

fn nearest_title(sections: &[(usize, String)], pos: usize) -> Option<&str> {
    sections
        .iter()
        .take_while(|(start, _)| *start < pos)
        .last()
        .map(|(_, title)| title.as_str())
}

fn unescape_template(text: &str) -> String {
    text.replace("\\`", "`")
        .replace("\\$", "$")
        .replace("\\\\", "\\")
}

/// Reduces a fragment of markup to plain text.
fn clean_cell(html: &str) -> String {
    let text = jsx_string_regex().replace_all(html, |caps: &regex::Captures<'_>| {
        (1..=3)
            .find_map(|i| caps.get(i))
            .map_or_else(String::new, |m| m.as_str().to_string())
    });
    let text = tag_regex().replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
