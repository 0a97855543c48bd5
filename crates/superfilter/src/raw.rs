/*
 * raw.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Raw-fragment construction.
//!
//! Every rewrite ends up as raw `latex` markup that Pandoc's writer copies
//! verbatim into the output.

use superfilter_types::{Block, Inline};

/// Format tag of every fragment this filter emits.
pub const LATEX: &str = "latex";

/// A raw LaTeX block.
pub fn latex(text: impl Into<String>) -> Block {
    Block::raw(LATEX, text)
}

/// A raw LaTeX inline.
pub fn inlatex(text: impl Into<String>) -> Inline {
    Inline::raw(LATEX, text)
}

/// Fuse runs of adjacent raw blocks that share a format into a single raw
/// block, joining their text with newlines. Non-raw blocks are never fused
/// and keep their position.
pub fn merge_raw_blocks(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let (Some(Block::RawBlock(last)), Block::RawBlock(next)) = (merged.last_mut(), &block) {
            if last.format == next.format {
                last.text.push('\n');
                last.text.push_str(&next.text);
                continue;
            }
        }
        merged.push(block);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_latex_blocks_merge() {
        let merged = merge_raw_blocks(vec![latex("a"), latex("b"), latex("c")]);
        assert_eq!(merged, vec![latex("a\nb\nc")]);
    }

    #[test]
    fn test_non_raw_block_breaks_a_run() {
        let para = Block::para(vec![Inline::str("x")]);
        let merged = merge_raw_blocks(vec![latex("a"), latex("b"), para.clone(), latex("c")]);
        assert_eq!(merged, vec![latex("a\nb"), para, latex("c")]);
    }

    #[test]
    fn test_different_formats_do_not_merge() {
        let html = Block::raw("html", "<hr>");
        let merged = merge_raw_blocks(vec![latex("a"), html.clone(), latex("b")]);
        assert_eq!(merged, vec![latex("a"), html, latex("b")]);
    }

    #[test]
    fn test_null_blocks_are_not_raw() {
        let merged = merge_raw_blocks(vec![latex("a"), Block::Null, latex("b")]);
        assert_eq!(merged, vec![latex("a"), Block::Null, latex("b")]);
    }
}
