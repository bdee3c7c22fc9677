//! Tolerant numeric token parsing
//!
//! Malformed numbers never fail a load: a token that does not parse
//! reads as `0`. Callers check the returned arity instead.

/// Split `remainder` wherever `separator` matches a single character and
/// parse every token as a float.
///
/// The result always has one entry per token; unparsable tokens
/// (including empty ones between doubled separators) become `0.0`.
/// OBJ and MTL fields use [`field_separator`].
pub fn parse_numbers(remainder: &str, separator: fn(char) -> bool) -> Vec<f32> {
    remainder.split(separator).map(parse_number_or_zero).collect()
}

/// Numeric fields are separated by one space or tab
pub fn field_separator(c: char) -> bool {
    c.is_whitespace()
}

/// Parse a single float, defaulting to `0.0`
pub fn parse_number_or_zero(token: &str) -> f32 {
    parse_number(token).unwrap_or(0.0)
}

/// Parse a single float, `None` if it is not a number
pub fn parse_number(token: &str) -> Option<f32> {
    token.trim().parse().ok()
}

/// Parse a 1-based OBJ index. Empty and unparsable segments are absent.
pub fn parse_index(token: &str) -> Option<i64> {
    token.trim().parse().ok()
}
