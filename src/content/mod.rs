//! Content scanning - discovers which class names rendered output uses

pub mod extractor;

pub use extractor::{Extractor, DEFAULT_EXTRACTOR};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Glob patterns plus the extractor used to tokenise matched files
#[derive(Debug, Clone)]
pub struct ContentSource {
    patterns: Vec<String>,
    extractor: Extractor,
}

impl ContentSource {
    /// Validate patterns and compile the extractor
    ///
    /// An empty pattern list is legal: nothing will be considered used.
    pub fn new(patterns: Vec<String>, extractor: Option<&str>) -> Result<Self, String> {
        for pattern in &patterns {
            glob::Pattern::new(pattern)
                .map_err(|e| format!("invalid content glob '{}': {}", pattern, e))?;
        }

        let extractor = match extractor {
            Some(regex) => Extractor::new(regex)
                .map_err(|e| format!("invalid extractor '{}': {}", regex, e))?,
            None => Extractor::default(),
        };

        Ok(Self {
            patterns,
            extractor,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Two sources with the same key produce the same scan
    pub fn cache_key(&self) -> (Vec<String>, String) {
        (self.patterns.clone(), self.extractor.as_str().to_string())
    }
}

/// Result of scanning one content source
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentScan {
    /// Every file read, deduplicated and sorted
    pub files: Vec<PathBuf>,

    /// Candidate class tokens found in those files
    pub classes: BTreeSet<String>,

    /// Patterns that matched no file
    pub unmatched: Vec<String>,
}

impl ContentScan {
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }
}

/// Content that matched a glob but could not be read
#[derive(Debug, Error)]
#[error("failed to read content matched by '{pattern}': {source}")]
pub struct ScanError {
    pub pattern: String,
    #[source]
    pub source: std::io::Error,
}

/// Expands content globs and reads the matched files
#[derive(Debug, Clone)]
pub struct ContentScanner {
    base_dir: PathBuf,
}

impl ContentScanner {
    /// Relative patterns are resolved against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Scan every file matched by the source's patterns
    pub async fn scan(&self, source: &ContentSource) -> Result<ContentScan, ScanError> {
        let mut files: BTreeMap<PathBuf, String> = BTreeMap::new();
        let mut unmatched = Vec::new();

        for pattern in source.patterns() {
            let matched = self.expand(pattern)?;
            debug!("Content pattern {} matched {} files", pattern, matched.len());
            if matched.is_empty() {
                unmatched.push(pattern.clone());
            }
            for path in matched {
                files.entry(path).or_insert_with(|| pattern.clone());
            }
        }

        let mut classes = BTreeSet::new();
        let mut read = Vec::with_capacity(files.len());
        for (path, pattern) in files {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| ScanError { pattern, source })?;
            source
                .extractor()
                .extract_into(&String::from_utf8_lossy(&bytes), &mut classes);
            read.push(path);
        }

        Ok(ContentScan {
            files: read,
            classes,
            unmatched,
        })
    }

    fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>, ScanError> {
        let full = self.resolve(pattern);
        let paths = glob::glob(&full).map_err(|e| ScanError {
            pattern: pattern.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
        })?;

        let mut matched = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| ScanError {
                pattern: pattern.to_string(),
                source: e.into(),
            })?;
            if path.is_file() {
                matched.push(path);
            }
        }
        Ok(matched)
    }

    fn resolve(&self, pattern: &str) -> String {
        if Path::new(pattern).is_absolute() {
            return pattern.to_string();
        }
        let base = glob::Pattern::escape(&self.base_dir.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), pattern)
    }
}
