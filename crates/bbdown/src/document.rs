//! The text being converted, plus an optional identifier for diagnostics.

/// BBCode text waiting to be converted.
///
/// The identifier is opaque: it is never interpreted, only echoed back in
/// error messages so callers can locate the offending text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// BBCode source text
    pub text: Option<String>,

    /// Identifier reported when the text contains malformed markup
    pub id: Option<String>,
}

impl Document {
    /// Create a document holding the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            id: None,
        }
    }

    /// Create a document with neither text nor identifier
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach an identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// True when there is nothing to convert
    pub fn is_blank(&self) -> bool {
        self.text().map_or(true, str::is_empty)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::new(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::new(text)
    }
}
