//! Style-variant configuration (`cva(...)`) extraction.
//!
//! Recognises bindings of the form:
//!
//! ```text
//! const buttonVariants = cva('inline-flex items-center', {
//!   variants: {
//!     variant: { default: '...', outline: '...' },
//!     size: { sm: '...', lg: '...' },
//!   },
//!   defaultVariants: { variant: 'default' },
//! })
//! ```
//!
//! Object bodies are split with bracket matching, so option values may
//! themselves contain braces or colons (`'hover:bg-accent'`).

use super::{bracket_body, object_entries, split_top_level, static_regex, unquote};
use crate::docs::{DefaultVariantMap, VariantMap};

static_regex!(
    variant_binding_regex,
    r"(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*cva\s*\("
);

/// A variant group declared with `cva`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantConfig {
    /// Binding name (e.g. `buttonVariants`).
    pub name: String,
    /// Base class list passed as the first argument.
    pub base: String,
    /// Categories in source order, each with its options in source order.
    pub variants: VariantMap,
    /// Chosen default option per category.
    ///
    /// Keys are not checked against `variants`.
    pub default_variants: DefaultVariantMap,
}

/// Extracts the first variant configuration in `source`.
#[must_use]
pub fn extract_variant_config(source: &str) -> Option<VariantConfig> {
    extract_all_variant_configs(source).into_iter().next()
}

/// Extracts every variant configuration in `source`, in source order.
#[must_use]
pub fn extract_all_variant_configs(source: &str) -> Vec<VariantConfig> {
    variant_binding_regex()
        .captures_iter(source)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let open = caps.get(0)?.end() - 1;
            parse_call(name, bracket_body(source, open)?)
        })
        .collect()
}

/// Parses the argument list of a `cva(...)` call.
fn parse_call(name: &str, args: &str) -> Option<VariantConfig> {
    let args = split_top_level(args, b',');
    let config = args.get(1)?.trim();
    if !config.starts_with('{') {
        return None;
    }
    let config = bracket_body(config, 0)?;

    let mut result = VariantConfig {
        name: name.to_string(),
        base: args.first().map(|a| parse_base(a)).unwrap_or_default(),
        ..VariantConfig::default()
    };

    for (key, value) in object_entries(config) {
        match key.as_str() {
            "variants" => result.variants = parse_categories(value),
            "defaultVariants" => result.default_variants = parse_defaults(value),
            _ => {}
        }
    }

    Some(result)
}

/// Reads the base style argument: a string, or an array of strings.
fn parse_base(arg: &str) -> String {
    let arg = arg.trim();
    if let Some(text) = unquote(arg) {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    if arg.starts_with('[') {
        if let Some(items) = bracket_body(arg, 0) {
            return split_top_level(items, b',')
                .into_iter()
                .filter_map(unquote)
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }
    arg.to_string()
}

fn object_body(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.starts_with('{') {
        bracket_body(value, 0)
    } else {
        None
    }
}

fn parse_categories(value: &str) -> VariantMap {
    let mut categories = VariantMap::new();
    let Some(body) = object_body(value) else {
        return categories;
    };

    for (category, group) in object_entries(body) {
        let Some(group) = object_body(group) else {
            continue;
        };
        let mut options: Vec<String> = Vec::new();
        for (option, _) in object_entries(group) {
            if !options.contains(&option) {
                options.push(option);
            }
        }
        categories.insert(category, options);
    }
    categories
}

fn parse_defaults(value: &str) -> DefaultVariantMap {
    let mut defaults = DefaultVariantMap::new();
    let Some(body) = object_body(value) else {
        return defaults;
    };

    for (category, option) in object_entries(body) {
        let option = unquote(option).unwrap_or(option).trim();
        if !option.is_empty() {
            defaults.insert(category, option.to_string());
        }
    }
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON_VARIANTS: &str = r#"
import { cva } from "class-variance-authority";

const buttonVariants = cva(
  "inline-flex items-center justify-center
   rounded-md text-sm",
  {
    variants: {
      variant: {
        default: "bg-primary text-primary-foreground hover:bg-primary/90",
        destructive: 'bg-destructive',
        outline: `border border-input`,
      },
      size: {
        default: "h-10 px-4 py-2",
        sm: "h-9 rounded-md px-3",
        "icon-lg": "h-11 w-11",
      },
    },
    defaultVariants: {
      variant: "default",
      size: `sm`,
    },
  }
);
"#;

    #[test]
    fn categories_and_defaults() {
        let config = extract_variant_config(BUTTON_VARIANTS).unwrap();
        assert_eq!(config.name, "buttonVariants");
        assert_eq!(
            config.base,
            "inline-flex items-center justify-center rounded-md text-sm"
        );

        let categories: Vec<_> = config.variants.keys().collect();
        assert_eq!(categories, ["variant", "size"]);
        assert_eq!(config.variants["variant"], ["default", "destructive", "outline"]);
        assert_eq!(config.variants["size"], ["default", "sm", "icon-lg"]);

        assert_eq!(config.default_variants["variant"], "default");
        assert_eq!(config.default_variants["size"], "sm");
    }

    #[test]
    fn braces_inside_option_values() {
        let source = r"
const badgeVariants = cva('badge', {
  variants: {
    tone: { loud: '[&>svg]:{color:red}', quiet: 'opacity-50' },
    shape: { round: 'rounded-full' },
  },
});
";
        let config = extract_variant_config(source).unwrap();
        assert_eq!(config.variants["tone"], ["loud", "quiet"]);
        assert_eq!(config.variants["shape"], ["round"]);
        assert!(config.default_variants.is_empty());
    }

    #[test]
    fn array_base() {
        let source = "const x = cva(['a b', 'c'], { variants: { v: { one: '1' } } })";
        let config = extract_variant_config(source).unwrap();
        assert_eq!(config.base, "a b c");
    }

    #[test]
    fn multiple_groups() {
        let source = r"
const sidebarMenuButtonVariants = cva('peer', {
  variants: { variant: { default: 'a', outline: 'b' } },
  defaultVariants: { variant: 'default' },
});
const sidebarMenuSubButtonVariants = cva('sub', {
  variants: { size: { sm: 'x', md: 'y' } },
  defaultVariants: { size: 'md' },
});
";
        let configs = extract_all_variant_configs(source);
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[1].name, "sidebarMenuSubButtonVariants");
        assert_eq!(configs[1].default_variants["size"], "md");
    }

    #[test]
    fn defaults_not_checked_against_categories() {
        let source = "const v = cva('', { variants: {}, defaultVariants: { ghost: 'x' } })";
        let config = extract_variant_config(source).unwrap();
        assert!(config.variants.is_empty());
        assert_eq!(config.default_variants["ghost"], "x");
    }

    #[test]
    fn missing_config_is_none() {
        assert!(extract_variant_config("const a = 1;").is_none());
        assert!(extract_variant_config("const v = cva('base')").is_none());
    }
}
