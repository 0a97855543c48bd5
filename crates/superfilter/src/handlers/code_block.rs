/*
 * code_block.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Captioned code listings:
//!
//! ````markdown
//! ```{.python caption="Main loop" label="lst:main"}
//! while True: ...
//! ```
//! ````

use crate::dispatch::Rewrite;
use crate::raw::latex;
use superfilter_types::{Block, CodeBlock, attr_value};

pub fn handle_code_block(code: &CodeBlock) -> Rewrite<Block> {
    let Some(caption) = attr_value(&code.attr, "caption") else {
        return Rewrite::Keep;
    };

    let mut close = format!("\\caption{{{caption}}}");
    if let Some(label) = attr_value(&code.attr, "label") {
        close.push_str(&format!("\n\\label{{{label}}}"));
    }
    close.push_str("\n\\end{code}");

    tracing::debug!(caption, "Code listing");
    Rewrite::Splice(vec![
        latex("\\begin{code}"),
        Block::CodeBlock(code.clone()),
        latex(close),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashlink::LinkedHashMap;

    fn code(pairs: &[(&str, &str)]) -> CodeBlock {
        let kvs: LinkedHashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CodeBlock {
            attr: (String::new(), vec!["python".to_string()], kvs),
            text: "print(1)".to_string(),
        }
    }

    #[test]
    fn test_uncaptioned_block_declines() {
        assert_eq!(handle_code_block(&code(&[("label", "x")])), Rewrite::Keep);
    }

    #[test]
    fn test_caption_and_label() {
        let block = code(&[("caption", "Main loop"), ("label", "lst:main")]);
        assert_eq!(
            handle_code_block(&block),
            Rewrite::Splice(vec![
                latex("\\begin{code}"),
                Block::CodeBlock(block.clone()),
                latex("\\caption{Main loop}\n\\label{lst:main}\n\\end{code}"),
            ])
        );
    }

    #[test]
    fn test_caption_without_label() {
        let block = code(&[("caption", "Main loop")]);
        let Rewrite::Splice(blocks) = handle_code_block(&block) else {
            panic!("Expected a listing");
        };
        assert_eq!(blocks[2], latex("\\caption{Main loop}\n\\end{code}"));
    }
}
