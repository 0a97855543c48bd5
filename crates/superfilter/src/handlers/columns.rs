/*
 * columns.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Beamer column regions.
//!
//! ```markdown
//! <[columns]
//!
//! [[[ 0.4 ]]]
//!
//! Left column text
//!
//! [[[ 0.6 ]]]
//!
//! Right column text
//!
//! [columns]>
//! ```

use crate::dispatch::Rewrite;
use crate::raw::latex;
use crate::region::{Region, RegionState, Sentinel, column_break};
use superfilter_types::Block;

/// Rewrite a paragraph whose flattened text is `text` if it is a column
/// sentinel or, inside the region, a column break.
pub fn handle_columns(text: &str, regions: &mut RegionState) -> Rewrite<Block> {
    if let Some(sentinel) = Sentinel::parse(Region::Columns, text) {
        if !regions.apply(Region::Columns, sentinel) {
            tracing::warn!(sentinel = text, "Ignoring unmatched columns sentinel");
            return Rewrite::Keep;
        }
        tracing::debug!(sentinel = text, "Columns region");
        return Rewrite::Replace(match sentinel {
            Sentinel::Open => latex("\\begin{columns}"),
            Sentinel::Close => latex("\\end{columns}"),
        });
    }

    if regions.is_open(Region::Columns)
        && let Some(width) = column_break(text)
    {
        tracing::debug!(width, "Column break");
        return Rewrite::Replace(latex(format!("\\column{{{width}\\textwidth}}")));
    }

    Rewrite::Keep
}
