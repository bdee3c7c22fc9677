//! Line directive splitting shared by the OBJ and MTL parsers

/// A line split into its leading keyword and the rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    /// Leading keyword, e.g. `v`, `f`, `newmtl`
    pub keyword: &'a str,
    /// Everything after the first run of whitespace, trailing whitespace removed
    pub remainder: &'a str,
}

/// Split a raw line into keyword and remainder.
///
/// Returns `None` for blank lines, `#` comments, and lines that have no
/// remainder after the keyword.
pub fn split_directive(line: &str) -> Option<DirectiveLine<'_>> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let split_at = line.find(char::is_whitespace)?;
    let (keyword, rest) = line.split_at(split_at);
    let remainder = rest.trim();
    if remainder.is_empty() {
        return None;
    }

    Some(DirectiveLine { keyword, remainder })
}
