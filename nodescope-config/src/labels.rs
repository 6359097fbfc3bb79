//! Label mapping rules.
//!
//! Raw runtime identifiers (queue names, message type names) are normalized into
//! display labels by an ordered list of `(regex, label)` cases. The first case
//! whose pattern matches wins. Patterns stay plain strings in the bound config
//! and are compiled only when a [`LabelMapper`] is built.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A single `(regex, label)` rule as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelMappingCase {
    pub regex: String,

    /// Replacement label. May reference capture groups (`$1`, `${name}`).
    pub label: String,
}

impl LabelMappingCase {
    pub fn new(regex: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            label: label.into(),
        }
    }
}

/// Compiled label mapping cases, evaluated in declaration order.
#[derive(Debug, Clone)]
pub struct LabelMapper {
    cases: Vec<(Regex, String)>,
}

impl LabelMapper {
    /// Compiles every case. Fails on the first pattern that does not compile.
    pub fn new(cases: &[LabelMappingCase]) -> Result<Self, ConfigError> {
        let cases = cases
            .iter()
            .map(|case| {
                Regex::new(&case.regex)
                    .map(|regex| (regex, case.label.clone()))
                    .map_err(|source| ConfigError::InvalidLabelPattern {
                        pattern: case.regex.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cases })
    }

    /// Label for `raw`, from the first matching case.
    pub fn map(&self, raw: &str) -> Option<String> {
        self.cases.iter().find_map(|(regex, label)| {
            regex.captures(raw).map(|captures| {
                let mut expanded = String::new();
                captures.expand(label, &mut expanded);
                expanded
            })
        })
    }

    /// Label for `raw`, or `raw` itself when nothing matches.
    pub fn map_or_raw(&self, raw: &str) -> String {
        self.map(raw).unwrap_or_else(|| raw.to_string())
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_case_wins() {
        let mapper = LabelMapper::new(&[
            LabelMappingCase::new("a.*", "A"),
            LabelMappingCase::new("ab.*", "AB"),
        ])
        .unwrap();

        assert_eq!(mapper.map("abc").as_deref(), Some("A"));
    }

    #[test]
    fn later_case_applies_when_earlier_ones_miss() {
        let mapper = LabelMapper::new(&[
            LabelMappingCase::new("^StorageReaderQueue", "Readers"),
            LabelMappingCase::new("^Worker", "Workers"),
        ])
        .unwrap();

        assert_eq!(mapper.map("Worker #3").as_deref(), Some("Workers"));
        assert_eq!(mapper.map("MainQueue"), None);
        assert_eq!(mapper.map_or_raw("MainQueue"), "MainQueue");
    }

    #[test]
    fn label_expands_capture_groups() {
        let mapper = LabelMapper::new(&[
            LabelMappingCase::new(r"^(?<name>[A-Za-z]+) #\d+$", "${name}"),
            LabelMappingCase::new(r"^.*\.(\w+)$", "$1"),
        ])
        .unwrap();

        assert_eq!(mapper.map("Worker #12").as_deref(), Some("Worker"));
        assert_eq!(
            mapper.map("Core.Messages.WriteEvents").as_deref(),
            Some("WriteEvents")
        );
    }

    #[test]
    fn malformed_pattern_fails_at_compile() {
        let err = LabelMapper::new(&[
            LabelMappingCase::new("ok", "fine"),
            LabelMappingCase::new("(unclosed", "broken"),
        ])
        .unwrap_err();

        match err {
            ConfigError::InvalidLabelPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_mapper_matches_nothing() {
        let mapper = LabelMapper::new(&[]).unwrap();
        assert!(mapper.is_empty());
        assert_eq!(mapper.map("anything"), None);
    }
}
