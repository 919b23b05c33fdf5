//! Theme tokens consumed by utility generation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Theme tokens keyed by category
///
/// Map order is the declaration order in the config file, and each
/// font-family fallback list keeps its order (first match wins when the
/// browser renders).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeTokens {
    /// Font family stacks (`sans` -> [`Arial`, `sans-serif`])
    #[serde(default, rename = "fontFamily")]
    pub font_family: IndexMap<String, Vec<String>>,

    /// List style keywords (`disc` -> `disc`)
    #[serde(default, rename = "listStyleType")]
    pub list_style_type: IndexMap<String, String>,
}

impl ThemeTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font family stack
    pub fn with_font_family<I, S>(mut self, category: impl Into<String>, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.font_family
            .insert(category.into(), fallbacks.into_iter().map(Into::into).collect());
        self
    }

    /// Add a list style token
    pub fn with_list_style(mut self, token: impl Into<String>, keyword: impl Into<String>) -> Self {
        self.list_style_type.insert(token.into(), keyword.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.font_family.is_empty() && self.list_style_type.is_empty()
    }

    /// Every utility this theme can produce, in declaration order
    pub fn utilities(&self) -> Vec<Utility> {
        let fonts = self.font_family.iter().map(|(category, fallbacks)| Utility {
            class_name: format!("font-{}", category),
            property: "font-family",
            value: format_font_stack(fallbacks),
        });

        let lists = self.list_style_type.iter().map(|(token, keyword)| Utility {
            class_name: format!("list-{}", token),
            property: "list-style-type",
            value: keyword.clone(),
        });

        fonts.chain(lists).collect()
    }
}

/// A single-declaration utility class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utility {
    pub class_name: String,
    pub property: &'static str,
    pub value: String,
}

impl Utility {
    /// Render the utility as a CSS rule
    pub fn to_rule(&self) -> String {
        format!(".{} {{\n  {}: {};\n}}\n", self.class_name, self.property, self.value)
    }
}

/// Join a fallback list into a `font-family` value, quoting names that
/// are not plain identifiers
pub fn format_font_stack(fallbacks: &[String]) -> String {
    fallbacks
        .iter()
        .map(|name| {
            if is_plain_family_name(name) {
                name.clone()
            } else {
                format!("\"{}\"", name.replace('"', "\\\""))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_plain_family_name(name: &str) -> bool {
    let body = name.strip_prefix('-').unwrap_or(name);
    match body.chars().next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    body.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
