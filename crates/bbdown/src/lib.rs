//! # bbdown
//!
//! Convert BBCode formatted text to Markdown.
//!
//! ## Design
//!
//! There is no BBCode parser here. Conversion is an ordered list of named
//! rules, each one a targeted textual rewrite over the whole input:
//!
//! - **Ordered**: rules run in registration order, each receiving the output
//!   of the previous one
//! - **Extensible**: callers can add, replace or remove rules by name
//! - **Permissive**: unknown or unmatched tags are left untouched
//!
//! ## Example
//!
//! ```rust
//! use bbdown::BBCodeConverter;
//!
//! let converter = BBCodeConverter::new();
//! let markdown = converter.convert("[b]Hello[/b] [i]World[/i]").unwrap();
//! assert_eq!(markdown, "**Hello** *World*");
//! ```
//!
//! ## Example (stored document)
//!
//! ```rust
//! use bbdown::{BBCodeConverter, Document};
//!
//! let document = Document::new("[code=shell]ls -l[/code]").with_id("post-42");
//! let converter = BBCodeConverter::with_document(document);
//! let markdown = converter.to_markdown(None, None).unwrap();
//! assert_eq!(markdown, "\n```sh\nls -l\n```\n");
//! ```

pub mod document;
pub mod languages;
mod rules;
mod service;
mod utilities;

use std::fmt;

pub use document::Document;
pub use languages::{canonical_language, LANGUAGE_ALIASES};
pub use rules::{bbcode_rules, ReplacementFn, Rule, Rules};
pub use service::{BBCodeConverter, ConverterOptions};
pub use utilities::try_replace_all;

/// Placeholder used in error messages when the text carries no identifier
pub const UNKNOWN_ID: &str = "unknown";

/// Category of BBCode markup a rule could not rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    List,
    Url,
    Image,
    Snippet,
}

impl Construct {
    pub fn as_str(&self) -> &'static str {
        match self {
            Construct::List => "list",
            Construct::Url => "url",
            Construct::Image => "image",
            Construct::Snippet => "snippet",
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for bbdown operations
#[derive(Debug, thiserror::Error)]
pub enum BBCodeError {
    #[error("Text identified by '{id}' has malformed BBCode {construct}")]
    MalformedMarkup { construct: Construct, id: String },
}

impl BBCodeError {
    /// Build a malformed markup error, falling back to [`UNKNOWN_ID`]
    pub fn malformed(construct: Construct, id: Option<&str>) -> Self {
        let id = id.unwrap_or(UNKNOWN_ID).to_string();
        tracing::warn!(%construct, %id, "malformed BBCode");
        BBCodeError::MalformedMarkup { construct, id }
    }
}

pub type Result<T> = std::result::Result<T, BBCodeError>;
