//! BBCodeConverter - the main entry point for BBCode to Markdown conversion.

use indexmap::IndexMap;

use crate::document::Document;
use crate::rules::{Rule, Rules};
use crate::Result;

/// Options for BBCodeConverter
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Delimiter for `[b]`
    pub strong_delimiter: String,

    /// Delimiter for `[i]`
    pub em_delimiter: String,

    /// Delimiter for `[u]`
    pub underline_delimiter: String,

    /// Delimiter for `[s]`
    pub strikethrough_delimiter: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Fence string for fenced code blocks
    pub fence: String,

    /// Extra code block language aliases, checked before the built-in table
    pub language_aliases: IndexMap<String, String>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            strong_delimiter: "**".to_string(),
            em_delimiter: "*".to_string(),
            underline_delimiter: "_".to_string(),
            strikethrough_delimiter: "~~".to_string(),
            bullet_list_marker: '-',
            fence: "```".to_string(),
            language_aliases: IndexMap::new(),
        }
    }
}

/// The main service for converting BBCode to Markdown
pub struct BBCodeConverter {
    options: ConverterOptions,
    rules: Rules,
    document: Document,
}

impl BBCodeConverter {
    /// Create a new BBCodeConverter with default options
    pub fn new() -> Self {
        Self::with_options(ConverterOptions::default())
    }

    /// Create a BBCodeConverter with custom options
    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
            document: Document::empty(),
        }
    }

    /// Create a BBCodeConverter bound to a stored document
    pub fn with_document(document: impl Into<Document>) -> Self {
        let mut converter = Self::new();
        converter.document = document.into();
        converter
    }

    /// Convert BBCode to Markdown.
    ///
    /// `text` falls back to the stored document text and `id` to the stored
    /// document id. Absent or empty text is returned as an empty string.
    pub fn to_markdown(&self, text: Option<&str>, id: Option<&str>) -> Result<String> {
        let text = match text.or_else(|| self.document.text()) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(String::new()),
        };
        let id = id.or_else(|| self.document.id());

        tracing::debug!(id = id.unwrap_or(crate::UNKNOWN_ID), len = text.len(), "converting BBCode");
        self.rules.apply(text, id, &self.options)
    }

    /// Convert BBCode text without an identifier
    pub fn convert(&self, text: &str) -> Result<String> {
        self.to_markdown(Some(text), None)
    }

    /// Register a cleaner callback under `name`.
    ///
    /// An existing rule with the same name is replaced in place.
    pub fn add_cleaner<F>(&mut self, name: &str, callback: F) -> &mut Self
    where
        F: Fn(&str, Option<&str>) -> Result<String> + Send + Sync + 'static,
    {
        self.add_rule(name, Rule::cleaner(callback))
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove a rule by name, returning whether it was registered
    pub fn remove_rule(&mut self, key: &str) -> bool {
        self.rules.remove(key)
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Registered rule names, in execution order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.names()
    }

    /// Get the stored document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the current options
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConverterOptions {
        &mut self.options
    }
}

impl Default for BBCodeConverter {
    fn default() -> Self {
        Self::new()
    }
}
