//! Column letters and `A1`-style cell references.
//!
//! Columns use bijective base-26: `1 -> "A"`, `26 -> "Z"`, `27 -> "AA"`. There is no zero
//! digit, so column `0` has no name.

/// Number of columns in an xlsx worksheet (`A..=XFD`).
pub const MAX_COLUMNS: usize = 16_384;
/// Number of rows in an xlsx worksheet.
pub const MAX_ROWS: usize = 1_048_576;

/// Letters for a 1-based column number. Returns an empty string for `0`.
pub fn column_name(column: usize) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// 1-based column number for column letters (case-insensitive).
///
/// Returns `None` for empty input, non-letters, or a value that overflows `usize`.
pub fn column_number(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    name.bytes().try_fold(0usize, |acc, b| {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Cell reference for a 1-based column and row, e.g. `cell_ref(3, 12) == "C12"`.
pub fn cell_ref(column: usize, row: usize) -> String {
    format!("{}{row}", column_name(column))
}

/// Parse an `A1`-style reference into a 1-based `(column, row)` pair within sheet bounds.
pub fn parse_cell_ref(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let column = column_number(letters)?;
    if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row = digits.parse::<usize>().ok()?;
    if column > MAX_COLUMNS || row == 0 || row > MAX_ROWS {
        return None;
    }
    Some((column, row))
}
