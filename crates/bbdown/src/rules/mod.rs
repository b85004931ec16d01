//! Rule system for BBCode to Markdown conversion.

mod bbcode;
mod rule;

pub use bbcode::bbcode_rules;
pub use rule::{ReplacementFn, Rule};

use indexmap::IndexMap;

use crate::service::ConverterOptions;
use crate::Result;

/// Ordered collection of named rules.
///
/// Insertion order is execution order. Re-adding an existing name replaces
/// the rule but keeps its original position.
pub struct Rules {
    rules: IndexMap<String, Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in BBCode rules
    pub fn new() -> Self {
        let mut rules = Self::empty();
        for (name, rule) in bbcode_rules() {
            rules.add(name, rule);
        }
        rules
    }

    /// Create a Rules instance without any rule
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Add or replace a rule
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.rules.insert(key.to_string(), rule);
    }

    /// Remove a rule, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> bool {
        self.rules.shift_remove(key).is_some()
    }

    /// Look up a rule by name
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.get(key)
    }

    /// Rule names in execution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Thread `text` through every rule in order
    pub fn apply(&self, text: &str, id: Option<&str>, options: &ConverterOptions) -> Result<String> {
        let mut text = text.to_string();

        for (name, rule) in &self.rules {
            text = rule.apply(&text, id, options)?;
            tracing::debug!(rule = %name, len = text.len(), "applied rule");
        }

        Ok(text)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let rules = Rules::new();
        let names: Vec<&str> = rules.names().collect();
        assert_eq!(
            names,
            vec![
                "removeColor",
                "removeSize",
                "removeCenter",
                "replaceBold",
                "replaceItalic",
                "replaceUnderline",
                "replaceStrikethrough",
                "replaceLists",
                "replaceUrls",
                "replaceImages",
                "replaceQuotes",
                "replaceSnippets",
            ]
        );
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut rules = Rules::new();
        rules.add("replaceBold", Rule::infallible(|t| t.to_uppercase()));
        assert_eq!(rules.names().nth(3), Some("replaceBold"));
        assert_eq!(rules.len(), 12);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut rules = Rules::new();
        assert!(rules.remove("replaceItalic"));
        assert!(!rules.remove("replaceItalic"));
        assert_eq!(rules.names().nth(4), Some("replaceUnderline"));
    }

    #[test]
    fn test_apply_threads_output() {
        let mut rules = Rules::empty();
        rules.add("a", Rule::infallible(|t| format!("{}a", t)));
        rules.add("b", Rule::infallible(|t| format!("{}b", t)));
        let result = rules.apply("x", None, &ConverterOptions::default());
        assert_eq!(result.unwrap(), "xab");
    }
}
