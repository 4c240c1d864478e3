//! Annotation comment (`/** ... */`) extraction.
//!
//! Finds the documentation comment directly attached to a named declaration
//! and splits it into a free-text description and `@param`-style fields:
//!
//! ```text
//! /**
//!  * A clickable button.
//!  * @param {string} [props.variant='default'] - Visual style
//!  * @param {boolean} disabled - Disables the button
//!  */
//! export const Button = React.forwardRef(...)
//! ```

use regex::Regex;

use super::static_regex;

/// Matches a doc comment, capturing its body. The body cannot contain `*/`,
/// so only a comment directly before the following text can match.
const DOC_COMMENT: &str = r"/\*\*((?:[^*]|\*+[^*/])*)\*+/";

/// A parsed annotation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    /// Non-tag lines joined with single spaces.
    pub description: String,
    /// Field tags in source order.
    pub fields: Vec<DocField>,
}

/// One `@param`/`@prop`/`@property` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocField {
    /// Field name with any container prefix (`props.`) removed.
    pub name: String,
    /// Container prefix, `props` for `props.variant`.
    pub container: Option<String>,
    /// Type text between the braces.
    pub type_name: String,
    /// Text after the name.
    pub description: String,
    /// Whether the name was wrapped in `[...]`.
    pub optional: bool,
    /// Default from `[name=default]`.
    pub default: Option<String>,
}

static_regex!(field_tag_regex, r"^@(?:param|prop|property)\s+\{([^}]*)\}\s+(\[[^\]]+\]|\S+)(.*)$");

/// Extracts the annotation comment attached to the declaration of `name`.
///
/// Recognised declarations are `function Name`, and `const Name =` bound to
/// `forwardRef(...)`, `memo(...)`, a `function` expression, or an arrow
/// function, each optionally exported.
///
/// Returns `None` if no comment is attached to such a declaration.
#[must_use]
pub fn extract_doc_block(source: &str, name: &str) -> Option<DocBlock> {
    let name = regex::escape(name);
    let pattern = format!(
        r"{DOC_COMMENT}\s*(?:export\s+)?(?:default\s+)?(?:(?:async\s+)?function\s+{name}\b|(?:const|let|var)\s+{name}\s*(?::[^=]*)?=\s*(?:(?:React\.)?(?:forwardRef|memo)\b|function\b|async\b|\(|[A-Za-z_$][\w$]*\s*=>))"
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(source)?;
    Some(parse_doc_comment(caps.get(1)?.as_str()))
}

/// Parses the body of a doc comment (without the `/**` and `*/` fences).
#[must_use]
pub fn parse_doc_comment(body: &str) -> DocBlock {
    let mut block = DocBlock::default();
    let mut description = Vec::new();

    for line in body.lines() {
        let line = line.trim_start();
        let line = line.strip_prefix('*').unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('@') {
            if let Some(field) = parse_field_tag(line) {
                block.fields.push(field);
            }
            continue;
        }
        description.push(line);
    }

    block.description = description.join(" ");
    block
}

/// Parses one field tag line such as `@param {string} [props.size='md'] - Size`.
///
/// Returns `None` for lines that do not have the `@tag {type} name` shape.
#[must_use]
pub fn parse_field_tag(line: &str) -> Option<DocField> {
    let caps = field_tag_regex().captures(line.trim())?;
    let type_name = caps.get(1)?.as_str().trim().to_string();
    let raw_name = caps.get(2)?.as_str();
    let description = caps.get(3).map_or("", |m| m.as_str()).trim();
    let description = description.strip_prefix('-').unwrap_or(description).trim();

    let (name, optional, default) = match raw_name
        .strip_prefix('[')
        .and_then(|n| n.strip_suffix(']'))
    {
        Some(inner) => match inner.split_once('=') {
            Some((name, default)) => {
                let default = default.trim();
                (name, true, (!default.is_empty()).then(|| default.to_string()))
            }
            None => (inner, true, None),
        },
        None => (raw_name, false, None),
    };

    let (container, name) = match name.trim().rsplit_once('.') {
        Some((container, field)) => (Some(container.to_string()), field),
        None => (None, name.trim()),
    };
    if name.is_empty() {
        return None;
    }

    Some(DocField {
        name: name.to_string(),
        container,
        type_name,
        description: description.to_string(),
        optional,
        default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: &str = r"
import * as React from 'react';

/**
 * Displays a button or a component that looks like a button.
 * Supports several visual variants.
 *
 * @param {Object} props - Component props
 * @param {'default' | 'outline'} [props.variant='default'] - Visual style
 * @param {boolean} [props.asChild] - Render as the child element
 * @param {string} label - Accessible label
 * @returns {JSX.Element}
 */
const Button = React.forwardRef(({ className, variant, ...props }, ref) => {
  return <button ref={ref} />;
});
";

    #[test]
    fn forward_ref_declaration() {
        let block = extract_doc_block(BUTTON, "Button").unwrap();
        assert_eq!(
            block.description,
            "Displays a button or a component that looks like a button. Supports several visual variants."
        );
        let names: Vec<_> = block.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["props", "variant", "asChild", "label"]);
    }

    #[test]
    fn optional_iff_bracketed() {
        let block = extract_doc_block(BUTTON, "Button").unwrap();
        let optional: Vec<_> = block.fields.iter().map(|f| f.optional).collect();
        assert_eq!(optional, [false, true, true, false]);

        let variant = &block.fields[1];
        assert_eq!(variant.type_name, "'default' | 'outline'");
        assert_eq!(variant.default.as_deref(), Some("'default'"));
        assert_eq!(variant.description, "Visual style");
        assert_eq!(variant.container.as_deref(), Some("props"));
        assert_eq!(block.fields[2].default, None);
        assert_eq!(block.fields[3].container, None);
    }

    #[test]
    fn plain_function_declaration() {
        let source = "/** A card. */\nexport function Card({ className }) {}\n";
        let block = extract_doc_block(source, "Card").unwrap();
        assert_eq!(block.description, "A card.");
        assert!(block.fields.is_empty());
    }

    #[test]
    fn arrow_function_declaration() {
        let source = "/**\n * Card header.\n */\nexport const CardHeader = ({ className }) => null;\n";
        let block = extract_doc_block(source, "CardHeader").unwrap();
        assert_eq!(block.description, "Card header.");
    }

    #[test]
    fn nearest_comment_wins() {
        let source = "/** First. */\nfunction A() {}\n/** Second. */\nfunction B() {}\n";
        assert_eq!(extract_doc_block(source, "B").unwrap().description, "Second.");
        assert_eq!(extract_doc_block(source, "A").unwrap().description, "First.");
    }

    #[test]
    fn name_must_match_exactly() {
        let source = "/** Header. */\nexport function CardHeader() {}\n";
        assert!(extract_doc_block(source, "Card").is_none());
    }

    #[test]
    fn missing_comment_is_none() {
        assert!(extract_doc_block("export function Foo() {}", "Foo").is_none());
        assert!(extract_doc_block("", "Foo").is_none());
    }

    #[test]
    fn unparseable_tags_dropped() {
        let block = parse_doc_comment(
            "\n * Text.\n * @param missingType - no braces\n * @param {number} count - How many\n * @deprecated\n",
        );
        assert_eq!(block.fields.len(), 1);
        assert_eq!(block.fields[0].name, "count");
        assert_eq!(block.description, "Text.");
    }

    #[test]
    fn field_without_description() {
        let field = parse_field_tag("@prop {string} [size=md]").unwrap();
        assert_eq!(field.name, "size");
        assert_eq!(field.default.as_deref(), Some("md"));
        assert_eq!(field.description, "");
    }
}
