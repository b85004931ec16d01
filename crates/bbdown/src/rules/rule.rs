//! Rule type for BBCode conversion.

use crate::service::ConverterOptions;
use crate::Result;

/// Type alias for replacement functions
///
/// Receives the whole text, the document identifier (if any) and the
/// converter options, and returns the rewritten text.
pub type ReplacementFn =
    Box<dyn Fn(&str, Option<&str>, &ConverterOptions) -> Result<String> + Send + Sync>;

/// A rule is one rewrite step applied to the entire text
pub struct Rule {
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(replacement: F) -> Self
    where
        F: Fn(&str, Option<&str>, &ConverterOptions) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that ignores the options
    pub fn cleaner<F>(callback: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> Result<String> + Send + Sync + 'static,
    {
        Self::new(move |text, id, _| callback(text, id))
    }

    /// Create a rule that cannot fail
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(move |text, _, _| Ok(callback(text)))
    }

    /// Apply this rule's replacement
    pub fn apply(&self, text: &str, id: Option<&str>, options: &ConverterOptions) -> Result<String> {
        (self.replacement)(text, id, options)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}
