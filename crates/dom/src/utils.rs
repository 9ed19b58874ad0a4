//! Small text helpers shared by the DOM commands

/// Cap text length, cutting on a char boundary
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Pull the value out of an edited `name="value"` attribute string
///
/// Deliberately crude and not a parser: drops the first `name="`, then the
/// first remaining `"`. Anything else in `text` is kept as-is, which is
/// what existing clients expect from this command.
pub fn extract_attribute_value(name: &str, text: &str) -> String {
    let prefix = format!("{}=\"", name);
    text.replacen(&prefix, "", 1).replacen('"', "", 1)
}

/// Escape a value for use inside a double-quoted markup attribute
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
