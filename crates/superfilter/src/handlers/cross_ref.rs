/*
 * cross_ref.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `<anchor:#id>`, `<ref:#id>` and `<pageref:#id>` in running text.
//!
//! Pandoc's markdown reader keeps these as raw HTML inlines, which is the
//! only format looked at here.

use crate::dispatch::Rewrite;
use crate::raw::inlatex;
use once_cell::sync::Lazy;
use regex::Regex;
use superfilter_types::{Inline, RawInline};

/// Raw inline format that carries cross reference markers.
pub const MARKER_FORMAT: &str = "html";

static ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<anchor:#(.*?)>").unwrap());
static REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<ref:#(.*?)>").unwrap());
static PAGEREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<pageref:#(.*?)>").unwrap());

pub fn handle_raw_inline(raw: &RawInline) -> Rewrite<Inline> {
    if raw.format != MARKER_FORMAT {
        return Rewrite::Keep;
    }

    let markers: [(&Lazy<Regex>, &str); 3] =
        [(&ANCHOR, "label"), (&REF, "ref"), (&PAGEREF, "pageref")];
    for (pattern, command) in markers {
        if let Some(caps) = pattern.captures(&raw.text) {
            let id = &caps[1];
            tracing::debug!(command, id, "Cross reference");
            return Rewrite::Replace(inlatex(format!("\\{command}{{{id}}}")));
        }
    }
    Rewrite::Keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(text: &str) -> RawInline {
        RawInline {
            format: "html".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_anchor_becomes_label() {
        assert_eq!(
            handle_raw_inline(&html("<anchor:#fig:one>")),
            Rewrite::Replace(inlatex("\\label{fig:one}"))
        );
    }

    #[test]
    fn test_ref_and_pageref() {
        assert_eq!(
            handle_raw_inline(&html("<ref:#sec:intro>")),
            Rewrite::Replace(inlatex("\\ref{sec:intro}"))
        );
        assert_eq!(
            handle_raw_inline(&html("<pageref:#sec:intro>")),
            Rewrite::Replace(inlatex("\\pageref{sec:intro}"))
        );
    }

    #[test]
    fn test_id_stops_at_first_close_bracket() {
        assert_eq!(
            handle_raw_inline(&html("<ref:#a>b>")),
            Rewrite::Replace(inlatex("\\ref{a}"))
        );
    }

    #[test]
    fn test_other_html_declines() {
        assert_eq!(handle_raw_inline(&html("<br>")), Rewrite::Keep);
        assert_eq!(handle_raw_inline(&html(" <ref:#x>")), Rewrite::Keep);
    }

    #[test]
    fn test_other_formats_decline() {
        let raw = RawInline {
            format: "latex".to_string(),
            text: "<ref:#x>".to_string(),
        };
        assert_eq!(handle_raw_inline(&raw), Rewrite::Keep);
    }
}
