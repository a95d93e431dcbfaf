//! String sanitization and secret detection.

/// Key substrings that mark an environment variable as sensitive.
const SENSITIVE_KEYS: &[&str] = &["password", "secret", "key", "token", "credential"];

/// Value substrings that suggest a secret regardless of the key name.
const SENSITIVE_INDICATORS: &[&str] = &["secret", "password", "token", "key"];

/// Sanitize untrusted input.
///
/// Trims the input, drops ASCII control characters, removes
/// `<script>...</script>` blocks case-insensitively, optionally removes all
/// remaining HTML tags, and caps the result at `max_length` characters.
pub fn sanitize_input(input: &str, max_length: Option<usize>, strip_html: bool) -> String {
    let mut sanitized: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect();

    sanitized = strip_script_blocks(&sanitized);

    if strip_html {
        sanitized = strip_tags(&sanitized);
    }

    if let Some(max) = max_length {
        if sanitized.chars().count() > max {
            sanitized = sanitized.chars().take(max).collect();
        }
    }

    sanitized
}

/// Heuristic check for credential-looking configuration values.
///
/// Flags sensitive key names, base64-looking values of 20+ characters,
/// hex-hash-looking values of 32+ characters, and values containing common
/// secret indicator words.
pub fn is_sensitive_value(key: &str, value: &str) -> bool {
    let key_lower = key.to_lowercase();
    if SENSITIVE_KEYS.iter().any(|s| key_lower.contains(s)) {
        return true;
    }

    if looks_like_base64(value) || looks_like_hex_hash(value) {
        return true;
    }

    let value_lower = value.to_lowercase();
    SENSITIVE_INDICATORS.iter().any(|s| value_lower.contains(s))
}

/// Remove complete `<script ...>...</script>` blocks, case-insensitively.
/// An unterminated block is left alone for the tag stripper to handle.
fn strip_script_blocks(input: &str) -> String {
    const OPEN: &str = "<script";
    const CLOSE: &str = "</script>";

    let lower = input.to_ascii_lowercase();
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find(OPEN) {
        let start = pos + offset;
        match lower[start..].find(CLOSE) {
            Some(end) => {
                out.push_str(&input[pos..start]);
                pos = start + end + CLOSE.len();
            }
            None => break,
        }
    }

    out.push_str(&input[pos..]);
    out
}

/// Remove `<...>` tag spans. An unclosed `<` is kept as-is.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

fn looks_like_base64(value: &str) -> bool {
    value.len() >= 20
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
}

fn looks_like_hex_hash(value: &str) -> bool {
    value.len() >= 32 && value.bytes().all(|b| b.is_ascii_hexdigit())
}
