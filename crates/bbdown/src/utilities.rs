//! Utility functions shared by the BBCode rules.

use regex::{Captures, Regex};

use crate::Result;

/// Replace every non-overlapping match of `re` in `text` with the result of
/// `replacement`, stopping at the first error.
///
/// This is `Regex::replace_all` for replacement closures that can fail.
pub fn try_replace_all<F>(re: &Regex, text: &str, mut replacement: F) -> Result<String>
where
    F: FnMut(&Captures) -> Result<String>,
{
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        // Group 0 always participates in a match
        let Some(whole) = caps.get(0) else {
            continue;
        };
        result.push_str(&text[last..whole.start()]);
        result.push_str(&replacement(&caps)?);
        last = whole.end();
    }

    result.push_str(&text[last..]);
    Ok(result)
}

/// Trim surrounding ASCII spaces only, keeping tabs and newlines
pub fn trim_spaces(s: &str) -> &str {
    s.trim_matches(' ')
}

/// Strip leading and trailing whitespace from every line
pub fn trim_lines(s: &str) -> String {
    s.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Strip leading whitespace from every line, dropping lines left empty
pub fn strip_line_indentation(s: &str) -> String {
    s.lines()
        .map(str::trim_start)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove one pair of surrounding double quotes, if present
pub fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
