/*
 * emit.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Image and caption emitters shared by the figure and table handlers.

use crate::options::{OptionSet, is_float};
use crate::raw::{inlatex, latex};
use superfilter_types::{Block, Inlines};

/// Resolve a length option: bare numbers are fractions of `reference`,
/// anything else is already a LaTeX length and passes through.
pub fn scaled_length(value: &str, reference: &str) -> String {
    if is_float(value) {
        format!("{value}{reference}")
    } else {
        value.to_string()
    }
}

/// The `\includegraphics` key for the given options, preferring `width`
/// (relative to `\linewidth`) over `height` (relative to `\textheight`).
/// Other keys are ignored.
pub fn graphics_scale(options: Option<&OptionSet>) -> Option<String> {
    let options = options?;
    if let Some(width) = options.get("width") {
        return Some(format!("width={}", scaled_length(width, "\\linewidth")));
    }
    options
        .get("height")
        .map(|height| format!("height={}", scaled_length(height, "\\textheight")))
}

/// One raw block including the image at `uri`.
pub fn emit_image(uri: &str, options: Option<&OptionSet>) -> Block {
    match graphics_scale(options) {
        Some(scale) => latex(format!("\\includegraphics[{scale}]{{{uri}}}")),
        None => latex(format!("\\includegraphics{{{uri}}}")),
    }
}

/// Wrap `inlines` in `\caption{...}`. An empty caption becomes a `Null`
/// block so callers can always emit one.
pub fn emit_caption(inlines: Inlines) -> Block {
    if inlines.is_empty() {
        return Block::Null;
    }
    let mut content = Vec::with_capacity(inlines.len() + 2);
    content.push(inlatex("\\caption{"));
    content.extend(inlines);
    content.push(inlatex("}"));
    Block::para(content)
}
