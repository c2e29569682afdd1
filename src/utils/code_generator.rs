//! Short code synthesis and validation.
//!
//! Codes are base-62 strings over [`ALPHABET`]. Synthesized codes are a
//! deterministic rendering of a [`RecordId`]; caller-supplied codes are only
//! shape-checked here, uniqueness is enforced by the store on insert.

use crate::domain::RecordId;
use crate::error::AppError;
use serde_json::json;

/// Digits, then upper case, then lower case letters.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u128 = 62;

/// Accepted length range for caller-supplied codes.
pub const CUSTOM_CODE_MIN_LEN: usize = 4;
pub const CUSTOM_CODE_MAX_LEN: usize = 8;

/// Longest code any `u128` identifier can produce.
pub const MAX_CODE_LEN: usize = 22;

/// Codes that would shadow fixed routes.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Renders an identifier as a base-62 code by repeated division.
///
/// Zero has no remainders to emit, so it maps to the single symbol `"0"`.
///
/// # Examples
///
/// ```
/// use tinylink::domain::RecordId;
/// use tinylink::utils::code_generator::synthesize;
///
/// assert_eq!(synthesize(RecordId::new(0)), "0");
/// assert_eq!(synthesize(RecordId::new(61)), "z");
/// assert_eq!(synthesize(RecordId::new(62)), "10");
/// ```
pub fn synthesize(id: RecordId) -> String {
    let mut value = id.value();
    if value == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut symbols = Vec::with_capacity(MAX_CODE_LEN);
    while value > 0 {
        symbols.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    symbols.reverse();

    symbols.into_iter().map(char::from).collect()
}

/// Inverse of [`synthesize`].
///
/// Returns `None` for empty input, symbols outside the alphabet, or values
/// that overflow `u128`.
pub fn decode(code: &str) -> Option<u128> {
    if code.is_empty() {
        return None;
    }

    code.bytes().try_fold(0u128, |acc, symbol| {
        let digit = symbol_index(symbol)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

/// Returns true if every character belongs to the base-62 alphabet.
pub fn is_base62(code: &str) -> bool {
    code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if `code` could have been stored at all.
///
/// Used by the resolver to skip lookups for garbage input.
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LEN && is_base62(code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 4-8 characters
/// - Allowed characters: `0-9`, `A-Z`, `a-z`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < CUSTOM_CODE_MIN_LEN || code.len() > CUSTOM_CODE_MAX_LEN {
        return Err(AppError::bad_request(
            "Custom code must be 4-8 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !is_base62(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters and digits",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
    {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

fn symbol_index(symbol: u8) -> Option<u128> {
    let index = match symbol {
        b'0'..=b'9' => symbol - b'0',
        b'A'..=b'Z' => symbol - b'A' + 10,
        b'a'..=b'z' => symbol - b'a' + 36,
        _ => return None,
    };
    Some(u128::from(index))
}
