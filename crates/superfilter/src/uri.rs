/*
 * uri.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Splitting `path|key=value,...` image targets into a path and options.
//!
//! Pandoc may percent-encode the target before a filter sees it, so the
//! separator is accepted both as a raw `|` and as `%7C`, optionally flanked
//! by encoded spaces (`%20`).

use crate::errors::Result;
use crate::options::{OptionSet, parse_options};
use once_cell::sync::Lazy;
use regex::Regex;

static URI_WITH_OPTIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(?:%20)*(?:\||%7[Cc])(?:%20)*(.*)$").unwrap());

/// Split a raw image target into `(uri, options)`.
///
/// Without a separator the target is returned unchanged with no options.
pub fn split_uri_options(raw: &str) -> Result<(String, Option<OptionSet>)> {
    match URI_WITH_OPTIONS.captures(raw) {
        Some(caps) => {
            let uri = caps[1].to_string();
            let options = parse_options(Some(&caps[2]))?;
            Ok((uri, options))
        }
        None => Ok((raw.to_string(), None)),
    }
}
