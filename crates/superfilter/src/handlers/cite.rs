/*
 * cite.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Citation variants chosen with a `#kind` suffix: `[@smith99#t]` becomes
//! `\citet{smith99}`.

use crate::dispatch::Rewrite;
use crate::raw::inlatex;
use superfilter_types::{Cite, Inline};

/// Strip `#kind` suffixes from every citation id in place. When any
/// citation named a kind, the last one named wins and the whole citation
/// becomes a single `\cite<kind>` command over all keys.
pub fn handle_cite(cite: &mut Cite) -> Rewrite<Inline> {
    let mut kind: Option<String> = None;
    for citation in &mut cite.citations {
        if let Some((key, suffix)) = citation.id.split_once('#') {
            if !suffix.is_empty() {
                kind = Some(suffix.to_string());
            }
            citation.id = key.to_string();
        }
    }

    let Some(kind) = kind else {
        return Rewrite::Keep;
    };
    let keys = cite
        .citations
        .iter()
        .map(|citation| citation.id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    tracing::debug!(kind = %kind, keys = %keys, "Citation");
    Rewrite::Replace(inlatex(format!("\\cite{kind}{{{keys}}}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use superfilter_types::Citation;

    fn cite(ids: &[&str]) -> Cite {
        Cite {
            citations: ids.iter().map(|id| Citation::new(*id)).collect(),
            content: vec![],
        }
    }

    fn ids(cite: &Cite) -> Vec<&str> {
        cite.citations.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_kind_selects_command_and_ids_are_corrected() {
        let mut node = cite(&["smith99#t", "jones01"]);
        assert_eq!(
            handle_cite(&mut node),
            Rewrite::Replace(inlatex("\\citet{smith99,jones01}"))
        );
        assert_eq!(ids(&node), vec!["smith99", "jones01"]);
    }

    #[test]
    fn test_last_kind_wins() {
        let mut node = cite(&["a#t", "b#p"]);
        assert_eq!(
            handle_cite(&mut node),
            Rewrite::Replace(inlatex("\\citep{a,b}"))
        );
    }

    #[test]
    fn test_empty_kind_does_not_override() {
        let mut node = cite(&["a#t", "b#"]);
        assert_eq!(
            handle_cite(&mut node),
            Rewrite::Replace(inlatex("\\citet{a,b}"))
        );
    }

    #[test]
    fn test_no_kind_declines_with_corrected_ids() {
        let mut node = cite(&["a#", "b"]);
        assert_eq!(handle_cite(&mut node), Rewrite::Keep);
        assert_eq!(ids(&node), vec!["a", "b"]);
    }

    #[test]
    fn test_splits_on_first_hash() {
        let mut node = cite(&["a#b#c"]);
        assert_eq!(
            handle_cite(&mut node),
            Rewrite::Replace(inlatex("\\citeb#c{a}"))
        );
    }
}
