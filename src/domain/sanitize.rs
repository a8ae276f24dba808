/// Substrings that are never accepted in user-supplied values
const FORBIDDEN: [&str; 3] = ["php", "<", ">"];

/// Check whether a value contains markup or code fragments
pub fn contains_forbidden(value: &str) -> bool {
    FORBIDDEN.iter().any(|f| value.contains(f))
}

/// Escape HTML special characters, leaving well-formed character references untouched
///
/// Escaping an already escaped value is a no-op, so values sanitized at insert time can be
/// escaped again when they are displayed.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        match c {
            '&' if starts_with_char_ref(&value[i..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Cut an escaped value to at most `max_chars` characters without splitting a character reference
///
/// Every `&` in an [`escape_html`] output opens a reference that runs up to the next `;`, and
/// the reference is either kept whole or dropped.
pub fn truncate_escaped(value: &str, max_chars: usize) -> String {
    let mut truncated = String::with_capacity(value.len().min(max_chars * 4));
    let mut count = 0;
    let mut rest = value;
    while let Some(c) = rest.chars().next() {
        let unit = match (c, rest.find(';')) {
            ('&', Some(end)) => &rest[..=end],
            _ => &rest[..c.len_utf8()],
        };
        let unit_chars = unit.chars().count();
        if count + unit_chars > max_chars {
            break;
        }
        truncated.push_str(unit);
        count += unit_chars;
        rest = &rest[unit.len()..];
    }
    truncated
}

/// Check whether `s` starts with a named, decimal, or hexadecimal character reference
fn starts_with_char_ref(s: &str) -> bool {
    let Some(end) = s.find(';') else {
        return false;
    };
    let body = &s[1..end];

    match body.strip_prefix('#') {
        Some(num) => match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => {
                !hex.is_empty() && hex.len() <= 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
            }
            None => !num.is_empty() && num.len() <= 7 && num.chars().all(|c| c.is_ascii_digit()),
        },
        None => {
            !body.is_empty() && body.len() <= 32 && body.chars().all(|c| c.is_ascii_alphanumeric())
        }
    }
}
