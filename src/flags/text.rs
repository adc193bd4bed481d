//! Keyword flags raised from free-text answers
//!
//! Each entry pairs a flag label with a pattern. The pattern is a regular
//! expression fragment matched case-insensitively as a whole word, so
//! `emergency` matches "an emergency situation" but not "emergencyroom".

use regex::Regex;
use serde_yaml::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
struct TextPattern {
    label: String,
    pattern: String,
    regex: Regex,
}

/// Label → pattern mapping for one question
#[derive(Debug, Clone, Default)]
pub struct TextPatterns {
    entries: Vec<TextPattern>,
}

impl TextPatterns {
    /// Build from `(label, pattern)` pairs. A repeated label keeps the last pattern.
    pub fn new<I, L, P>(pairs: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        let mut patterns = Self::default();
        for (label, pattern) in pairs {
            patterns.insert(label, pattern)?;
        }
        Ok(patterns)
    }

    /// Add or replace the pattern for `label`
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<(), regex::Error> {
        let label = label.into();
        let pattern = pattern.into();
        let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", pattern))?;
        let entry = TextPattern {
            label,
            pattern,
            regex,
        };

        match self.entries.iter_mut().find(|e| e.label == entry.label) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    /// Normalize any of the accepted YAML encodings:
    ///
    /// ```yaml
    /// flags_from_text: {emergency: emergency}          # mapping
    /// flags_from_text: [{emergency: emergency}]        # list of single-key mappings
    /// flags_from_text: {keywords: [{emergency: emergency}]}
    /// ```
    pub fn from_yaml(value: &Value) -> Result<Self, String> {
        let mut patterns = Self::default();
        patterns.extend_from_yaml(value)?;
        Ok(patterns)
    }

    fn extend_from_yaml(&mut self, value: &Value) -> Result<(), String> {
        match value {
            Value::Mapping(map) => {
                if let Some(keywords) = map.get("keywords") {
                    if keywords.is_sequence() || keywords.is_mapping() {
                        if map.len() > 1 {
                            return Err("'keywords' cannot be combined with other entries".into());
                        }
                        return self.extend_from_yaml(keywords);
                    }
                }
                for (label, pattern) in map {
                    self.insert_yaml_pair(label, pattern)?;
                }
                Ok(())
            }
            Value::Sequence(items) => {
                for item in items {
                    match item.as_mapping() {
                        Some(entry) if entry.len() == 1 => {
                            for (label, pattern) in entry {
                                self.insert_yaml_pair(label, pattern)?;
                            }
                        }
                        _ => return Err("each keyword entry must be a single-key mapping".into()),
                    }
                }
                Ok(())
            }
            _ => Err("must be a mapping or a list of single-key mappings".into()),
        }
    }

    fn insert_yaml_pair(&mut self, label: &Value, pattern: &Value) -> Result<(), String> {
        let label = label
            .as_str()
            .ok_or_else(|| "flag labels must be strings".to_string())?;
        let pattern = pattern
            .as_str()
            .ok_or_else(|| format!("pattern for '{}' must be a string", label))?;
        self.insert(label, pattern)
            .map_err(|e| format!("invalid pattern for '{}': {}", label, e))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(label, pattern)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.label.as_str(), e.pattern.as_str()))
    }
}

impl PartialEq for TextPatterns {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

/// Labels whose pattern occurs in `text` as a whole word, ignoring case
pub fn evaluate_text_flags(patterns: &TextPatterns, text: &str) -> BTreeSet<String> {
    patterns
        .entries
        .iter()
        .filter(|entry| entry.regex.is_match(text))
        .map(|entry| entry.label.clone())
        .collect()
}
