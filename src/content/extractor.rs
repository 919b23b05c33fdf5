//! Class token extraction from rendered markup

use regex::Regex;
use std::collections::BTreeSet;

/// Default token pattern: words, dashes, slashes and variant colons
pub const DEFAULT_EXTRACTOR: &str = r"[A-Za-z0-9_\-/:]+";

/// Splits text into candidate class names
///
/// Extraction is greedy: every token that could be a class name counts
/// as used.
#[derive(Debug, Clone)]
pub struct Extractor {
    regex: Regex,
}

impl Extractor {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Add every token in `text` to `out`, trailing `:` trimmed
    pub fn extract_into(&self, text: &str, out: &mut BTreeSet<String>) {
        for found in self.regex.find_iter(text) {
            let token = found.as_str().trim_end_matches(':');
            if !token.is_empty() {
                out.insert(token.to_string());
            }
        }
    }

    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.extract_into(text, &mut out);
        out
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACTOR).expect("default extractor pattern is valid")
    }
}
