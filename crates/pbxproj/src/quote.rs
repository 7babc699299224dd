use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static UNQUOTED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_$/:.\-]+$").expect("hardcoded regex must compile")
});

/// Render a string the way Xcode writes it: bare when it only holds safe characters,
/// otherwise double-quoted with escapes.
#[must_use]
pub fn quote_value(value: &str) -> Cow<'_, str> {
    if UNQUOTED_PATTERN.is_match(value) && !value.contains("//") && !value.contains("/*") {
        return Cow::Borrowed(value);
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}
