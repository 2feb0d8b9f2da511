//! Header text normalization.

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Normalize header text before it is compared against field labels.
///
/// In order: drop one leading byte-order mark, trim surrounding whitespace, then strip one pair
/// of double quotes if they wrap the whole remaining text. Inner quotes are left alone, so
/// `"Half"Quoted` comes back unchanged.
pub fn normalize(text: &str) -> &str {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text).trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
