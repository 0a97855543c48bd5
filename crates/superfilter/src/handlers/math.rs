/*
 * math.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Labelled display math: `$$ E=mc^2 # eq:mass $$`.
//!
//! The first `#` separates the math body from the label, so display math
//! cannot contain a literal `#`.

use crate::dispatch::Rewrite;
use crate::raw::inlatex;
use superfilter_types::{Inline, Math, MathType};

pub fn handle_math(math: &Math) -> Rewrite<Inline> {
    if math.math_type != MathType::DisplayMath {
        return Rewrite::Keep;
    }
    let Some((body, anchor)) = math.text.split_once('#') else {
        return Rewrite::Keep;
    };
    let (body, anchor) = (body.trim(), anchor.trim());
    tracing::debug!(anchor, "Labelled equation");
    Rewrite::Replace(inlatex(format!(
        "\\begin{{equation}}\\label{{{anchor}}}\n{body}\n\\end{{equation}}"
    )))
}
