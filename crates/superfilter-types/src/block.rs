/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::Attr;
use crate::caption::Caption;
use crate::inline::Inlines;
use crate::list::ListAttributes;
use crate::table::Table;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Plain(Plain),
    Paragraph(Paragraph),
    LineBlock(LineBlock),
    CodeBlock(CodeBlock),
    RawBlock(RawBlock),
    BlockQuote(BlockQuote),
    OrderedList(OrderedList),
    BulletList(BulletList),
    DefinitionList(DefinitionList),
    Header(Header),
    HorizontalRule,
    Table(Table),
    Figure(Figure),
    Div(Div),
    /// Explicit "nothing here" block. Pandoc 3 dropped `Null` from its
    /// schema, so writers skip it rather than serialize it.
    Null,
}

pub type Blocks = Vec<Block>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plain {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBlock {
    pub content: Vec<Inlines>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub attr: Attr,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub format: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockQuote {
    pub content: Blocks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedList {
    pub attr: ListAttributes,
    pub content: Vec<Blocks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletList {
    pub content: Vec<Blocks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionList {
    pub content: Vec<(Inlines, Vec<Blocks>)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub level: usize,
    pub attr: Attr,
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub attr: Attr,
    pub caption: Caption,
    pub content: Blocks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Div {
    pub attr: Attr,
    pub content: Blocks,
}

impl Block {
    pub fn raw(format: impl Into<String>, text: impl Into<String>) -> Block {
        Block::RawBlock(RawBlock {
            format: format.into(),
            text: text.into(),
        })
    }

    pub fn para(content: Inlines) -> Block {
        Block::Paragraph(Paragraph { content })
    }

    /// Inline content of a `Plain` or `Para` block.
    pub fn inline_content(&self) -> Option<&Inlines> {
        match self {
            Block::Plain(plain) => Some(&plain.content),
            Block::Paragraph(para) => Some(&para.content),
            _ => None,
        }
    }

    pub fn inline_content_mut(&mut self) -> Option<&mut Inlines> {
        match self {
            Block::Plain(plain) => Some(&mut plain.content),
            Block::Paragraph(para) => Some(&mut para.content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::Inline;

    #[test]
    fn test_inline_content_of_plain_and_para() {
        let plain = Block::Plain(Plain {
            content: vec![Inline::str("a")],
        });
        let para = Block::para(vec![Inline::str("b")]);

        assert_eq!(plain.inline_content(), Some(&vec![Inline::str("a")]));
        assert_eq!(para.inline_content(), Some(&vec![Inline::str("b")]));
        assert_eq!(Block::HorizontalRule.inline_content(), None);
    }

    #[test]
    fn test_inline_content_mut_edits_in_place() {
        let mut para = Block::para(vec![Inline::str("a")]);
        if let Some(content) = para.inline_content_mut() {
            content.push(Inline::Space);
        }
        assert_eq!(
            para,
            Block::para(vec![Inline::str("a"), Inline::Space])
        );
    }
}
