//! lightningcss plumbing shared by the CSS-aware stages

use crate::transform::TransformError;
use lightningcss::{
    printer::PrinterOptions,
    rules::{keyframes::KeyframesName, CssRule},
    selector::{Component, Selector},
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
    targets::{Browsers, Targets},
};
use std::collections::{BTreeSet, HashSet};

/// Browserslist query used when a stage doesn't configure `targets`
pub const DEFAULT_TARGETS: &str = "defaults";

/// One parse → (minify) → print round through lightningcss
#[derive(Debug, Clone, Default)]
pub struct CssPass {
    /// Run structural minification (merges rules, applies prefixes
    /// for `targets`, drops `unused_symbols`)
    pub minify: bool,

    /// Print without whitespace
    pub compact: bool,

    /// Browsers to generate prefixes for
    pub browsers: Option<Browsers>,

    /// Class names whose rules should be dropped
    pub unused_symbols: HashSet<String>,
}

impl CssPass {
    pub fn run(&self, css: &str) -> Result<String, TransformError> {
        self.finish(parse(css)?)
    }

    /// Minify and print an already parsed sheet
    pub fn finish(&self, mut stylesheet: StyleSheet<'_>) -> Result<String, TransformError> {
        let targets = match &self.browsers {
            Some(browsers) => Targets::from(browsers.clone()),
            None => Targets::default(),
        };

        if self.minify {
            stylesheet
                .minify(MinifyOptions {
                    targets: targets.clone(),
                    unused_symbols: self.unused_symbols.clone(),
                })
                .map_err(|e| TransformError::Minify(e.to_string()))?;
        }

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: self.compact,
                targets,
                ..Default::default()
            })
            .map_err(|e| TransformError::Print(e.to_string()))?;

        Ok(result.code)
    }
}

pub fn parse(css: &str) -> Result<StyleSheet<'_>, TransformError> {
    StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| TransformError::Parse(e.to_string()))
}

/// Resolve browserslist queries, e.g. `["> 0.5%", "not dead"]`
///
/// `Ok(None)` means the queries matched no browser lightningcss knows.
pub fn resolve_browsers<S: AsRef<str>>(queries: &[S]) -> Result<Option<Browsers>, String> {
    if queries.is_empty() {
        return Err("targets must contain at least one browserslist query".to_string());
    }
    Browsers::from_browserslist(queries.iter())
        .map_err(|e| format!("invalid browser targets: {}", e))
}

/// Class names referenced by the sheet's style rule selectors
///
/// Names are unescaped (`.md\:flex` yields `md:flex`). Classes nested in
/// `:is()`/`:where()` count, those in attribute selectors or strings don't.
pub fn defined_classes(stylesheet: &StyleSheet<'_>) -> BTreeSet<String> {
    let mut classes = BTreeSet::new();
    walk_rules(&stylesheet.rules.0, &mut |rule| match rule {
        CssRule::Style(style) => selector_classes(&style.selectors.0, &mut classes),
        CssRule::Nesting(nesting) => selector_classes(&nesting.style.selectors.0, &mut classes),
        _ => {}
    });
    classes
}

/// Names of every `@keyframes` block, at any depth
pub fn keyframes_names(stylesheet: &StyleSheet<'_>) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    walk_rules(&stylesheet.rules.0, &mut |rule| {
        if let CssRule::Keyframes(keyframes) = rule {
            let name: &str = match &keyframes.name {
                KeyframesName::Ident(ident) => ident.0.as_ref(),
                KeyframesName::Custom(custom) => custom.as_ref(),
            };
            names.insert(name.to_string());
        }
    });
    names
}

fn walk_rules<'a, 'i>(rules: &'a [CssRule<'i>], visit: &mut dyn FnMut(&'a CssRule<'i>)) {
    for rule in rules {
        visit(rule);
        match rule {
            CssRule::Style(style) => walk_rules(&style.rules.0, visit),
            CssRule::Nesting(nesting) => walk_rules(&nesting.style.rules.0, visit),
            CssRule::Media(media) => walk_rules(&media.rules.0, visit),
            CssRule::Supports(supports) => walk_rules(&supports.rules.0, visit),
            CssRule::LayerBlock(layer) => walk_rules(&layer.rules.0, visit),
            CssRule::Container(container) => walk_rules(&container.rules.0, visit),
            _ => {}
        }
    }
}

fn selector_classes(selectors: &[Selector<'_>], classes: &mut BTreeSet<String>) {
    for selector in selectors {
        for component in selector.iter_raw_match_order() {
            match component {
                Component::Class(name) => {
                    let name: &str = name.0.as_ref();
                    classes.insert(name.to_string());
                }
                Component::Is(inner) | Component::Where(inner) => selector_classes(inner, classes),
                _ => {}
            }
        }
    }
}
