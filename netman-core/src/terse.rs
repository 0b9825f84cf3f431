//! Decoder for `nmcli`'s terse (`-t`) output format.
//!
//! Terse mode emits one record per line, fields separated by `:`. A
//! literal `:` inside a field arrives as `\:` and a literal backslash as
//! `\\`. Any other backslash sequence is not part of the protocol and is
//! passed through unchanged rather than silently dropped.

use crate::{Error, Result};

const SEPARATOR: char = ':';

/// Splits `line` on unescaped separators, resolving `\:` and `\\`.
/// `limit` caps the number of fields produced; once reached, further
/// separators are kept literally. `limit == 0` means unlimited.
fn split_escaped(line: &str, limit: usize) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(SEPARATOR) => field.push(SEPARATOR),
                Some('\\') => field.push('\\'),
                Some(other) => {
                    field.push('\\');
                    field.push(other);
                }
                None => field.push('\\'),
            },
            SEPARATOR if limit == 0 || fields.len() + 1 < limit => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Decodes a list-query blob into field rows, one per non-blank line.
///
/// The sequence is lazy and one-shot; re-parse by calling again on the
/// same buffer. Arity is not checked here, the consuming normalizer owns
/// that contract.
pub fn parse_rows(raw: &str) -> impl Iterator<Item = Vec<String>> + '_ {
    raw.lines()
        .filter(|line| !line.is_empty())
        .map(|line| split_escaped(line, 0))
}

/// Decodes a `KEY:VALUE` property dump into pairs, splitting each line on
/// the FIRST unescaped separator only. Values commonly contain further
/// colons (IPv6 addresses, MAC addresses), which stay in the value.
pub fn parse_pairs(raw: &str) -> impl Iterator<Item = Result<(String, String)>> + '_ {
    raw.lines().filter(|line| !line.is_empty()).map(|line| {
        let fields = split_escaped(line, 2);
        match <[String; 2]>::try_from(fields) {
            Ok([key, value]) => Ok((key, value)),
            Err(fields) => Err(Error::FieldCount {
                expected: 2,
                got: fields.len(),
            }),
        }
    })
}

/// Trims leading/trailing whitespace from a raw output blob. Used both
/// for stderr on failure and for terse success acknowledgements.
pub fn sanitize(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}
