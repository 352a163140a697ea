//! HTML escaping for text and attribute values.

/// Escape the five HTML-significant characters.
///
/// Works in a single pass over the characters, so the `&` inside an entity
/// it emits is never escaped again. Call this exactly once per original
/// string.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape an optional string, treating `None` as empty.
pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape_html).unwrap_or_default()
}
