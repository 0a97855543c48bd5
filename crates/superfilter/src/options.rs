/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The `key=value, key=value` option mini-language used in image URIs and
 * table captions.
 */

use crate::errors::{FilterError, Result};
use hashlink::LinkedHashMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Option name to option value. Keys are case-sensitive; a repeated key
/// keeps its last value.
pub type OptionSet = LinkedHashMap<String, String>;

/// Unanchored float grammar shared by every regex that embeds a length:
/// `12`, `12.5`, `.5` and `12.` all match, a bare `.` does not.
pub const FLOAT_PATTERN: &str = r"(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)";

static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{FLOAT_PATTERN}$")).unwrap());

/// Whether `value` is a bare number (and so a fraction of some reference
/// length) rather than a literal LaTeX length such as `3cm`.
pub fn is_float(value: &str) -> bool {
    FLOAT.is_match(value)
}

/// Parse a flat `key=value, key=value` list.
///
/// Absent or empty input yields `None`, which callers treat differently
/// from an empty set. Whitespace around `,` and `=` is dropped; whitespace
/// inside a value is kept.
pub fn parse_options(input: Option<&str>) -> Result<Option<OptionSet>> {
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let mut options = OptionSet::new();
    for entry in input.split(',') {
        let entry = entry.trim();
        let Some((key, value)) = entry.split_once('=') else {
            return Err(FilterError::MalformedOptions {
                input: input.to_string(),
                entry: entry.to_string(),
            });
        };
        options.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(Some(options))
}

/// Parse a table caption option token such as `{from=chart.png}` or
/// `{longtable,place=h}`.
///
/// Entries are either `key=value` pairs or bare flags; a flag is stored
/// with an empty value. Returns `None` when `token` is not brace-delimited.
pub fn parse_table_options(token: &str) -> Option<OptionSet> {
    let inner = token.strip_prefix('{')?.strip_suffix('}')?;

    let mut options = OptionSet::new();
    for entry in inner.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((key, value)) => {
                options.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                options.insert(entry.to_string(), String::new());
            }
        }
    }
    Some(options)
}
