//! Built-in BBCode rules.
//!
//! Every pattern is case-insensitive and lets `.` cross newlines, so tags may
//! span several lines. Inner captures are lazy: the first closing tag ends the
//! match, which is why these rules do not handle nesting of the same tag.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Rule;
use crate::languages::canonical_language;
use crate::service::ConverterOptions;
use crate::utilities::{strip_line_indentation, trim_lines, trim_spaces, try_replace_all, unquote};
use crate::{BBCodeError, Construct};

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[color=#?\w+\](.*?)\[/color\]").unwrap());
static SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[size=\d*\](.*?)\[/size\]").unwrap());
static CENTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[center\](.*?)\[/center\]").unwrap());

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)\[b\](.*?)\[/b\]").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)\[i\](.*?)\[/i\]").unwrap());
static UNDERLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)\[u\](.*?)\[/u\]").unwrap());
static STRIKETHROUGH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[s\](.*?)\[/s\]").unwrap());

static LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[list(?P<type>=1)?\](?P<items>.*?)\[/list\]").unwrap()
});

// Destination: a double-quoted string or a bare token. Trailing attributes
// up to the closing bracket are dropped.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\[url\s*=\s*("[^"]*"|[^'">\]\s]+)\s*[^\]\s]*\](.*?)\[/url\]"#).unwrap()
});
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\[img\s*\]\s*("[^"]*"|[^'">\]\s]+)\s*[^\]\s]*\[/img\]"#).unwrap()
});

static QUOTE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[quote\b[^\]]*\]|\[/quote\]").unwrap());

static SNIPPET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[code\s*=?(?P<language>\w*)\](?P<snippet>.*?)\[/code\]").unwrap()
});

/// Create all built-in rules, in execution order
pub fn bbcode_rules() -> Vec<(&'static str, Rule)> {
    vec![
        ("removeColor", strip_rule(&COLOR_RE)),
        ("removeSize", strip_rule(&SIZE_RE)),
        ("removeCenter", strip_rule(&CENTER_RE)),
        ("replaceBold", delimit_rule(&BOLD_RE, strong_delimiter)),
        ("replaceItalic", delimit_rule(&ITALIC_RE, em_delimiter)),
        ("replaceUnderline", delimit_rule(&UNDERLINE_RE, underline_delimiter)),
        (
            "replaceStrikethrough",
            delimit_rule(&STRIKETHROUGH_RE, strikethrough_delimiter),
        ),
        ("replaceLists", list_rule()),
        ("replaceUrls", url_rule()),
        ("replaceImages", image_rule()),
        ("replaceQuotes", quote_rule()),
        ("replaceSnippets", snippet_rule()),
    ]
}

fn strong_delimiter(options: &ConverterOptions) -> &str {
    &options.strong_delimiter
}

fn em_delimiter(options: &ConverterOptions) -> &str {
    &options.em_delimiter
}

fn underline_delimiter(options: &ConverterOptions) -> &str {
    &options.underline_delimiter
}

fn strikethrough_delimiter(options: &ConverterOptions) -> &str {
    &options.strikethrough_delimiter
}

/// Drop the tag, keep what it wraps
fn strip_rule(pattern: &'static Lazy<Regex>) -> Rule {
    Rule::infallible(move |text| pattern.replace_all(text, "${1}").into_owned())
}

/// Surround the tag content with a Markdown delimiter
fn delimit_rule(
    pattern: &'static Lazy<Regex>,
    delimiter: fn(&ConverterOptions) -> &str,
) -> Rule {
    Rule::new(move |text, _, options| {
        let delimiter = delimiter(options);
        let result = pattern.replace_all(text, |caps: &Captures| {
            format!("{}{}{}", delimiter, trim_spaces(&caps[1]), delimiter)
        });
        Ok(result.into_owned())
    })
}

fn list_rule() -> Rule {
    Rule::new(|text, id, options| {
        try_replace_all(&LIST_RE, text, |caps| {
            let items = caps
                .name("items")
                .ok_or_else(|| BBCodeError::malformed(Construct::List, id))?;
            let ordered = caps.name("type").is_some();

            Ok(render_list(items.as_str(), ordered, options.bullet_list_marker))
        })
    })
}

/// Render the body of a `[list]` as Markdown list items.
///
/// Whatever precedes the first `[*]` is discarded. Ordered items are numbered
/// by their position among the `[*]` markers, so empty items still take a
/// number.
fn render_list(body: &str, ordered: bool, bullet: char) -> String {
    let body = trim_lines(body);
    let mut buffer = String::new();

    for (index, item) in body.split("[*]").enumerate().skip(1) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if ordered {
            buffer.push_str(&format!("{}. {}\n", index, item));
        } else {
            buffer.push_str(&format!("{} {}\n", bullet, item));
        }
    }

    // Blank line above and below the list
    if buffer.is_empty() {
        buffer
    } else {
        format!("\n{}\n", buffer)
    }
}

fn url_rule() -> Rule {
    Rule::cleaner(|text, id| {
        try_replace_all(&URL_RE, text, |caps| match (caps.get(1), caps.get(2)) {
            (Some(dest), Some(label)) => {
                Ok(format!("[{}]({})", label.as_str(), unquote(dest.as_str())))
            }
            _ => Err(BBCodeError::malformed(Construct::Url, id)),
        })
    })
}

fn image_rule() -> Rule {
    Rule::cleaner(|text, id| {
        try_replace_all(&IMAGE_RE, text, |caps| {
            let dest = caps
                .get(1)
                .ok_or_else(|| BBCodeError::malformed(Construct::Image, id))?;
            Ok(format!("\n![]({})\n", unquote(dest.as_str())))
        })
    })
}

/// An opening or closing quote tag, as a byte range into the text
#[derive(Debug, Clone, Copy)]
struct QuoteTag {
    start: usize,
    end: usize,
    closing: bool,
}

fn quote_tags(text: &str) -> Vec<QuoteTag> {
    QUOTE_TAG_RE
        .find_iter(text)
        .map(|m| QuoteTag {
            start: m.start(),
            end: m.end(),
            closing: m.as_str().starts_with("[/"),
        })
        .collect()
}

/// Index of the tag closing the quote opened at `open`
fn matching_close(tags: &[QuoteTag], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, tag) in tags[open..].iter().enumerate() {
        if tag.closing {
            depth -= 1;
            if depth == 0 {
                return Some(open + offset);
            }
        } else {
            depth += 1;
        }
    }
    None
}

/// Remove every complete quote block nested inside another quote.
///
/// Only the outermost level survives; nested blocks disappear along with
/// their content. A nested opening tag that is never closed is left alone.
fn flatten_quotes(text: &str) -> String {
    let tags = quote_tags(text);
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    let mut depth = 0usize;
    let mut i = 0;

    while i < tags.len() {
        let tag = tags[i];
        if tag.closing {
            depth = depth.saturating_sub(1);
            i += 1;
            continue;
        }
        if depth == 0 {
            depth = 1;
            i += 1;
            continue;
        }
        match matching_close(&tags, i) {
            Some(close) => {
                result.push_str(&text[last..tag.start]);
                last = tags[close].end;
                i = close + 1;
            }
            None => {
                depth += 1;
                i += 1;
            }
        }
    }

    result.push_str(&text[last..]);
    result
}

/// Turn each `[quote]...[/quote]` without quote tags inside into a blockquote
fn render_quotes(text: &str) -> String {
    let tags = quote_tags(text);
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    let mut i = 0;

    while i + 1 < tags.len() {
        let (open, close) = (tags[i], tags[i + 1]);
        if open.closing || !close.closing {
            i += 1;
            continue;
        }
        let content = strip_line_indentation(text[open.end..close.start].trim());
        result.push_str(&text[last..open.start]);
        result.push_str(&format!("> {}\n\n", content));
        last = close.end;
        i += 2;
    }

    result.push_str(&text[last..]);
    result
}

fn quote_rule() -> Rule {
    Rule::infallible(|text| render_quotes(&flatten_quotes(text)))
}

fn snippet_rule() -> Rule {
    Rule::new(|text, id, options| {
        try_replace_all(&SNIPPET_RE, text, |caps| {
            let snippet = caps
                .name("snippet")
                .ok_or_else(|| BBCodeError::malformed(Construct::Snippet, id))?;
            let language = caps.name("language").map_or("", |m| m.as_str());
            let language = canonical_language(language, &options.language_aliases);

            Ok(format!(
                "\n{}{}\n{}\n{}\n",
                options.fence,
                language,
                snippet.as_str().trim(),
                options.fence
            ))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(name: &str, text: &str) -> String {
        let (_, rule) = bbcode_rules()
            .into_iter()
            .find(|(n, _)| *n == name)
            .unwrap();
        rule.apply(text, None, &ConverterOptions::default()).unwrap()
    }

    #[test]
    fn test_remove_color() {
        assert_eq!(apply("removeColor", "[color=#FF0000]red[/color]"), "red");
        assert_eq!(apply("removeColor", "[COLOR=blue]a\nb[/COLOR]"), "a\nb");
    }

    #[test]
    fn test_remove_size_and_center() {
        assert_eq!(apply("removeSize", "[size=12]big[/size]"), "big");
        assert_eq!(apply("removeSize", "[size=]big[/size]"), "big");
        assert_eq!(apply("removeCenter", "[center]mid[/center]"), "mid");
    }

    #[test]
    fn test_emphasis_trims_spaces_only() {
        assert_eq!(apply("replaceBold", "[b] hi [/b]"), "**hi**");
        assert_eq!(apply("replaceItalic", "[I]hi[/I]"), "*hi*");
        assert_eq!(apply("replaceUnderline", "[u]hi[/u]"), "_hi_");
        assert_eq!(apply("replaceStrikethrough", "[s]hi[/s]"), "~~hi~~");
        assert_eq!(apply("replaceBold", "[b]\nhi\n[/b]"), "**\nhi\n**");
    }

    #[test]
    fn test_emphasis_lazy_matches() {
        assert_eq!(
            apply("replaceBold", "[b]a[/b] and [b]b[/b]"),
            "**a** and **b**"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(apply("replaceLists", "[list][*]a[*]b[/list]"), "\n- a\n- b\n\n");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            apply("replaceLists", "[list=1][*]a[*]b[/list]"),
            "\n1. a\n2. b\n\n"
        );
    }

    #[test]
    fn test_multiline_list() {
        let input = "[list]\n  [*] first  \n  [*] second\n[/list]";
        assert_eq!(apply("replaceLists", input), "\n- first\n- second\n\n");
    }

    #[test]
    fn test_list_numbering_counts_empty_items() {
        assert_eq!(
            apply("replaceLists", "[list=1][*][*]b[/list]"),
            "\n2. b\n\n"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(apply("replaceLists", "x[list]no items[/list]y"), "xy");
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            apply("replaceUrls", "[url=http://x.com]label[/url]"),
            "[label](http://x.com)"
        );
        assert_eq!(
            apply("replaceUrls", "[url = \"http://x.com/a b\"]label[/url]"),
            "[label](http://x.com/a b)"
        );
        assert_eq!(apply("replaceUrls", "[url]bare[/url]"), "[url]bare[/url]");
    }

    #[test]
    fn test_images() {
        assert_eq!(
            apply("replaceImages", "[img]http://x.com/a.png[/img]"),
            "\n![](http://x.com/a.png)\n"
        );
        assert_eq!(
            apply("replaceImages", "[IMG] http://x.com/a.png [/IMG]"),
            "\n![](http://x.com/a.png)\n"
        );
    }

    #[test]
    fn test_single_quote() {
        assert_eq!(
            apply("replaceQuotes", "[quote]  hello\n   world  [/quote]"),
            "> hello\nworld\n\n"
        );
    }

    #[test]
    fn test_quote_with_author() {
        assert_eq!(apply("replaceQuotes", "[quote=bob]hi[/quote]"), "> hi\n\n");
        assert_eq!(apply("replaceQuotes", "[quotes]hi[/quote]"), "[quotes]hi[/quote]");
    }

    #[test]
    fn test_nested_quotes_flatten() {
        let input = "[quote]outer [quote]inner[/quote] tail[/quote]";
        assert_eq!(apply("replaceQuotes", input), "> outer  tail\n\n");
    }

    #[test]
    fn test_deeply_nested_quotes() {
        let input = "[quote]a[quote]b[quote]c[/quote]d[/quote]e[/quote]";
        assert_eq!(flatten_quotes(input), "[quote]ae[/quote]");
    }

    #[test]
    fn test_sibling_quotes() {
        let input = "[quote]a[/quote]\n[quote]b[/quote]";
        assert_eq!(apply("replaceQuotes", input), "> a\n\n\n> b\n\n");
    }

    #[test]
    fn test_unclosed_quote_left_alone() {
        assert_eq!(apply("replaceQuotes", "[quote]open"), "[quote]open");
    }

    #[test]
    fn test_snippet_language_alias() {
        assert_eq!(
            apply("replaceSnippets", "[code=shell]ls -l[/code]"),
            "\n```sh\nls -l\n```\n"
        );
    }

    #[test]
    fn test_snippet_without_language() {
        assert_eq!(
            apply("replaceSnippets", "[code]\n  x = 1\n[/code]"),
            "\n```\nx = 1\n```\n"
        );
    }

    #[test]
    fn test_snippet_unknown_language() {
        assert_eq!(
            apply("replaceSnippets", "[code=UnknownLang]x[/code]"),
            "\n```unknownlang\nx\n```\n"
        );
    }
}
