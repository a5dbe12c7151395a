// ABOUTME: Placeholder substitution for job template text
// ABOUTME: Finds whitespace-isolated %NAME% tokens and replaces them with caller values

use indexmap::IndexSet;
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_DELIMITER: char = '%';

/// Fills `%NAME%` placeholders in a template with caller-supplied values.
///
/// Placeholders are discovered once, at construction, by splitting the
/// source on whitespace: a token counts only if it starts and ends with the
/// delimiter and has something in between. Substitution itself is global, so
/// every occurrence of a discovered token is replaced, wherever it sits.
#[derive(Debug, Clone)]
pub struct YmlPreProcessor {
    source: String,
    delimiter: char,
    values: HashMap<String, String>,
    placeholders: IndexSet<String>,
}

impl YmlPreProcessor {
    pub fn new(source: impl Into<String>, values: HashMap<String, String>) -> Self {
        Self::with_delimiter(source, values, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(
        source: impl Into<String>,
        values: HashMap<String, String>,
        delimiter: char,
    ) -> Self {
        let source = source.into();
        let placeholders: IndexSet<String> = source
            .split_whitespace()
            .filter(|segment| is_placeholder(segment, delimiter))
            .map(str::to_string)
            .collect();

        debug!(
            "Discovered {} placeholder(s) in template: {:?}",
            placeholders.len(),
            placeholders
        );

        Self {
            source,
            delimiter,
            values,
            placeholders,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Placeholder tokens, delimiters included, in order of first appearance
    pub fn placeholders(&self) -> Vec<&str> {
        self.placeholders.iter().map(String::as_str).collect()
    }

    /// Lookup names of the placeholders, delimiters removed
    pub fn names(&self) -> Vec<String> {
        self.placeholders
            .iter()
            .map(|token| self.name_of(token))
            .collect()
    }

    /// Names that have no caller value and will render as empty
    pub fn unresolved(&self) -> Vec<String> {
        self.names()
            .into_iter()
            .filter(|name| !self.values.contains_key(name))
            .collect()
    }

    /// Render the template with every placeholder substituted
    pub fn output(&self) -> String {
        let mut text = self.source.clone();
        for token in &self.placeholders {
            let name = self.name_of(token);
            let value = match self.values.get(&name) {
                Some(value) => value.as_str(),
                None => {
                    debug!("No value supplied for placeholder '{}'", name);
                    ""
                }
            };
            text = text.replace(token.as_str(), value);
        }
        text
    }

    fn name_of(&self, token: &str) -> String {
        token.replace(self.delimiter, "")
    }
}

fn is_placeholder(segment: &str, delimiter: char) -> bool {
    segment.starts_with(delimiter)
        && segment.ends_with(delimiter)
        && segment.chars().any(|c| c != delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let source = "job:\n  name: push translations\n  type: pushtrans\n";
        let processor = YmlPreProcessor::new(source, vars(&[("PACKAGE_NAME", "anaconda")]));

        assert!(processor.placeholders().is_empty());
        assert_eq!(processor.output(), source);
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let source = "package: %PACKAGE_NAME%\ntags:\n- %PACKAGE_NAME%\n";
        let processor = YmlPreProcessor::new(source, vars(&[("PACKAGE_NAME", "anaconda")]));

        assert_eq!(processor.placeholders(), vec!["%PACKAGE_NAME%"]);
        assert_eq!(processor.output(), "package: anaconda\ntags:\n- anaconda\n");
    }

    #[test]
    fn test_missing_value_becomes_empty() {
        let source = "buildsys: %BUILD_SYSTEM% package: %PACKAGE_NAME%";
        let processor = YmlPreProcessor::new(source, vars(&[("PACKAGE_NAME", "ibus")]));

        assert_eq!(processor.output(), "buildsys:  package: ibus");
        assert_eq!(processor.unresolved(), vec!["BUILD_SYSTEM".to_string()]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let processor =
            YmlPreProcessor::new("package: %PACKAGE_NAME%", vars(&[("package_name", "ibus")]));
        assert_eq!(processor.output(), "package: ");
    }

    #[test]
    fn test_output_is_repeatable() {
        let processor = YmlPreProcessor::new(
            "release: %RELEASE% tag: %BUILD_TAG%",
            vars(&[("RELEASE", "fedora-39"), ("BUILD_TAG", "f39")]),
        );

        let first = processor.output();
        let second = processor.output();
        assert_eq!(first, second);
        assert_eq!(first, "release: fedora-39 tag: f39");
        assert_eq!(processor.source(), "release: %RELEASE% tag: %BUILD_TAG%");
    }

    #[test]
    fn test_placeholders_are_distinct_and_ordered() {
        let processor = YmlPreProcessor::new("%B% %A% %B% %C%", HashMap::new());
        assert_eq!(processor.placeholders(), vec!["%B%", "%A%", "%C%"]);
        assert_eq!(processor.names(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_adjacent_tokens_are_not_discovered() {
        let processor =
            YmlPreProcessor::new(r#"{"package": "%PACKAGE_NAME%"}"#, vars(&[("PACKAGE_NAME", "x")]));
        assert!(processor.placeholders().is_empty());
        assert_eq!(processor.output(), r#"{"package": "%PACKAGE_NAME%"}"#);
    }

    #[test]
    fn test_bare_delimiters_are_literal() {
        let processor = YmlPreProcessor::new("progress: 100 % done %%", HashMap::new());
        assert!(processor.placeholders().is_empty());
        assert_eq!(processor.output(), "progress: 100 % done %%");
    }

    #[test]
    fn test_custom_delimiter() {
        let processor = YmlPreProcessor::with_delimiter(
            "package: @PACKAGE@ ratio: %X%",
            vars(&[("PACKAGE", "gnome-shell"), ("X", "1")]),
            '@',
        );

        assert_eq!(processor.delimiter(), '@');
        assert_eq!(processor.output(), "package: gnome-shell ratio: %X%");
    }
}
