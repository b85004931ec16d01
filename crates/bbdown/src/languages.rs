//! Code block language aliases.
//!
//! Forum software tends to name languages after GeSHi identifiers
//! (`html4strict`, `cplusplus`, ...). Markdown fences want the names
//! highlighters know, so `[code=...]` languages are remapped through this table.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Built-in aliases, lowercased source language to fence language
pub static LANGUAGE_ALIASES: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("html4strict", "html"),
        ("div", "html"),
        ("shell", "sh"),
        ("dos", "sh"),
        ("batch", "sh"),
        ("xul", "xml"),
        ("wpf", "xml"),
        ("asm", "nasm"),
        ("vb", "vb.net"),
        ("visualbasic", "vb.net"),
        ("vba", "vb.net"),
        ("asp", "aspx-vb"),
        ("aspnet", "aspx-vb"),
        ("xaml", "xml"),
        ("cplusplus", "cpp"),
        ("txt", "text"),
        ("gettext", "text"),
        ("basic", "cbmbas"),
        ("lisp", "clojure"),
    ])
});

/// Lowercase `language` and map it to its fence name.
///
/// `custom` aliases take precedence over the built-in table. Unknown
/// languages, including the empty string, come back lowercased but otherwise
/// unchanged.
pub fn canonical_language(language: &str, custom: &IndexMap<String, String>) -> String {
    let lower = language.to_lowercase();

    if let Some(target) = custom
        .iter()
        .find(|(source, _)| source.to_lowercase() == lower)
        .map(|(_, target)| target)
    {
        tracing::trace!(from = %lower, to = %target, "custom language alias");
        return target.clone();
    }

    match LANGUAGE_ALIASES.get(lower.as_str()) {
        Some(target) => {
            tracing::trace!(from = %lower, to = %target, "language alias");
            (*target).to_string()
        }
        None => lower,
    }
}
