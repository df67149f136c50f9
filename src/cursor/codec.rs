//! Base-62 offset codec
//!
//! `encode` and `decode` are exact inverses over `u64`.

use super::types::{CursorError, Offset};

/// Cursor alphabet: digits, then lowercase, then uppercase
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols in the alphabet
pub const BASE: u64 = 62;

/// Longest cursor accepted by [`decode`]
///
/// `u64::MAX` needs 11 base-62 symbols. Longer input is rejected even when
/// leading zeros would bring its value in range.
pub const MAX_CURSOR_LEN: usize = 11;

/// Encode an offset as a cursor string
pub fn encode(offset: Offset) -> String {
    // The division loop emits nothing for zero.
    if offset == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut digits = Vec::with_capacity(MAX_CURSOR_LEN);
    let mut remaining = offset;
    while remaining > 0 {
        digits.push(ALPHABET[(remaining % BASE) as usize]);
        remaining /= BASE;
    }

    digits.iter().rev().map(|&b| char::from(b)).collect()
}

/// Decode a cursor string back into an offset
///
/// Fails on empty input, characters outside [`ALPHABET`], input longer than
/// [`MAX_CURSOR_LEN`], and values that do not fit in a `u64`.
pub fn decode(cursor: &str) -> Result<Offset, CursorError> {
    if cursor.is_empty() {
        return Err(CursorError::Empty);
    }

    // Byte length bounds the work before any character is inspected.
    if cursor.len() > MAX_CURSOR_LEN {
        return Err(CursorError::TooLong {
            len: cursor.len(),
            max: MAX_CURSOR_LEN,
        });
    }

    let mut acc: Offset = 0;
    for (position, ch) in cursor.chars().enumerate() {
        let index = symbol_index(ch).ok_or(CursorError::InvalidCharacter { ch, position })?;
        acc = acc
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(index))
            .ok_or(CursorError::Overflow)?;
    }

    Ok(acc)
}

/// Position of `ch` in [`ALPHABET`]
fn symbol_index(ch: char) -> Option<u64> {
    let index = match ch {
        '0'..='9' => ch as u64 - '0' as u64,
        'a'..='z' => ch as u64 - 'a' as u64 + 10,
        'A'..='Z' => ch as u64 - 'A' as u64 + 36,
        _ => return None,
    };
    Some(index)
}
