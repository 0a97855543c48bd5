/*
 * filters.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Bottom-up, document-ordered traversal of a whole document.
//!
//! Every node's children are rewritten before the node itself is handed to
//! the dispatcher, and siblings are visited strictly left to right, so region
//! sentinels are seen exactly once each and in order. Nodes produced by a
//! rewrite are not walked again.

// traversals are destructive and take ownership of the input

use crate::dispatch::{Dispatcher, Rewrite};
use crate::errors::Result;
use serde_json::Value;
use superfilter_types::{
    Block, Blocks, Caption, Cell, Inline, Inlines, Pandoc, Row, Table, TableBody,
};

/// Walks a document, feeding each node to a [`Dispatcher`].
pub struct Walker<'a> {
    dispatcher: &'a mut Dispatcher,
    meta: &'a Value,
}

/// Filter a whole document in place. The first handler error aborts the walk
/// and leaves the document unchanged.
pub fn filter_document(doc: &mut Pandoc, dispatcher: &mut Dispatcher) -> Result<()> {
    let blocks = std::mem::take(&mut doc.blocks);
    let mut walker = Walker::new(dispatcher, &doc.meta);
    match walker.walk_blocks(blocks.clone()) {
        Ok(filtered) => {
            doc.blocks = filtered;
            Ok(())
        }
        Err(e) => {
            doc.blocks = blocks;
            Err(e)
        }
    }
}

fn splice<T>(out: &mut Vec<T>, node: T, rewrite: Rewrite<T>) {
    match rewrite {
        Rewrite::Keep => out.push(node),
        Rewrite::Replace(replacement) => out.push(replacement),
        Rewrite::Splice(replacements) => out.extend(replacements),
    }
}

impl<'a> Walker<'a> {
    pub fn new(dispatcher: &'a mut Dispatcher, meta: &'a Value) -> Self {
        Walker { dispatcher, meta }
    }

    pub fn walk_blocks(&mut self, blocks: Blocks) -> Result<Blocks> {
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks {
            let mut block = self.walk_block_children(block)?;
            let rewrite = self.dispatcher.dispatch_block(&mut block, self.meta)?;
            splice(&mut out, block, rewrite);
        }
        Ok(out)
    }

    pub fn walk_inlines(&mut self, inlines: Inlines) -> Result<Inlines> {
        let mut out = Vec::with_capacity(inlines.len());
        for inline in inlines {
            let mut inline = self.walk_inline_children(inline)?;
            let rewrite = self.dispatcher.dispatch_inline(&mut inline, self.meta)?;
            splice(&mut out, inline, rewrite);
        }
        Ok(out)
    }

    fn walk_blockss(&mut self, blockss: Vec<Blocks>) -> Result<Vec<Blocks>> {
        blockss
            .into_iter()
            .map(|blocks| self.walk_blocks(blocks))
            .collect()
    }

    fn walk_block_children(&mut self, block: Block) -> Result<Block> {
        Ok(match block {
            Block::Plain(mut plain) => {
                plain.content = self.walk_inlines(plain.content)?;
                Block::Plain(plain)
            }
            Block::Paragraph(mut para) => {
                para.content = self.walk_inlines(para.content)?;
                Block::Paragraph(para)
            }
            Block::LineBlock(mut line_block) => {
                line_block.content = line_block
                    .content
                    .into_iter()
                    .map(|line| self.walk_inlines(line))
                    .collect::<Result<Vec<Inlines>>>()?;
                Block::LineBlock(line_block)
            }
            Block::BlockQuote(mut quote) => {
                quote.content = self.walk_blocks(quote.content)?;
                Block::BlockQuote(quote)
            }
            Block::OrderedList(mut list) => {
                list.content = self.walk_blockss(list.content)?;
                Block::OrderedList(list)
            }
            Block::BulletList(mut list) => {
                list.content = self.walk_blockss(list.content)?;
                Block::BulletList(list)
            }
            Block::DefinitionList(mut list) => {
                let mut items = Vec::with_capacity(list.content.len());
                for (term, definitions) in list.content {
                    let term = self.walk_inlines(term)?;
                    let definitions = self.walk_blockss(definitions)?;
                    items.push((term, definitions));
                }
                list.content = items;
                Block::DefinitionList(list)
            }
            Block::Header(mut header) => {
                header.content = self.walk_inlines(header.content)?;
                Block::Header(header)
            }
            Block::Table(table) => Block::Table(self.walk_table(table)?),
            Block::Figure(mut figure) => {
                figure.caption = self.walk_caption(figure.caption)?;
                figure.content = self.walk_blocks(figure.content)?;
                Block::Figure(figure)
            }
            Block::Div(mut div) => {
                div.content = self.walk_blocks(div.content)?;
                Block::Div(div)
            }
            Block::CodeBlock(_) | Block::RawBlock(_) | Block::HorizontalRule | Block::Null => {
                block
            }
        })
    }

    fn walk_caption(&mut self, caption: Caption) -> Result<Caption> {
        let short = match caption.short {
            Some(short) => Some(self.walk_inlines(short)?),
            None => None,
        };
        Ok(Caption {
            short,
            long: self.walk_blocks(caption.long)?,
        })
    }

    fn walk_rows(&mut self, rows: Vec<Row>) -> Result<Vec<Row>> {
        rows.into_iter()
            .map(|row| {
                let cells = row
                    .cells
                    .into_iter()
                    .map(|cell| {
                        Ok(Cell {
                            content: self.walk_blocks(cell.content)?,
                            ..cell
                        })
                    })
                    .collect::<Result<Vec<Cell>>>()?;
                Ok(Row { cells, ..row })
            })
            .collect()
    }

    fn walk_table(&mut self, table: Table) -> Result<Table> {
        let caption = self.walk_caption(table.caption)?;
        let mut head = table.head;
        head.rows = self.walk_rows(head.rows)?;
        let bodies = table
            .bodies
            .into_iter()
            .map(|body| {
                Ok(TableBody {
                    head: self.walk_rows(body.head)?,
                    body: self.walk_rows(body.body)?,
                    ..body
                })
            })
            .collect::<Result<Vec<TableBody>>>()?;
        let mut foot = table.foot;
        foot.rows = self.walk_rows(foot.rows)?;
        Ok(Table {
            caption,
            head,
            bodies,
            foot,
            ..table
        })
    }

    fn walk_inline_children(&mut self, inline: Inline) -> Result<Inline> {
        Ok(match inline {
            Inline::Emph(mut e) => {
                e.content = self.walk_inlines(e.content)?;
                Inline::Emph(e)
            }
            Inline::Underline(mut u) => {
                u.content = self.walk_inlines(u.content)?;
                Inline::Underline(u)
            }
            Inline::Strong(mut s) => {
                s.content = self.walk_inlines(s.content)?;
                Inline::Strong(s)
            }
            Inline::Strikeout(mut s) => {
                s.content = self.walk_inlines(s.content)?;
                Inline::Strikeout(s)
            }
            Inline::Superscript(mut s) => {
                s.content = self.walk_inlines(s.content)?;
                Inline::Superscript(s)
            }
            Inline::Subscript(mut s) => {
                s.content = self.walk_inlines(s.content)?;
                Inline::Subscript(s)
            }
            Inline::SmallCaps(mut s) => {
                s.content = self.walk_inlines(s.content)?;
                Inline::SmallCaps(s)
            }
            Inline::Quoted(mut q) => {
                q.content = self.walk_inlines(q.content)?;
                Inline::Quoted(q)
            }
            Inline::Cite(mut cite) => {
                for citation in &mut cite.citations {
                    citation.prefix = self.walk_inlines(std::mem::take(&mut citation.prefix))?;
                    citation.suffix = self.walk_inlines(std::mem::take(&mut citation.suffix))?;
                }
                cite.content = self.walk_inlines(cite.content)?;
                Inline::Cite(cite)
            }
            Inline::Link(mut link) => {
                link.content = self.walk_inlines(link.content)?;
                Inline::Link(link)
            }
            Inline::Image(mut image) => {
                image.content = self.walk_inlines(image.content)?;
                Inline::Image(image)
            }
            Inline::Note(mut note) => {
                note.content = self.walk_blocks(note.content)?;
                Inline::Note(note)
            }
            Inline::Span(mut span) => {
                span.content = self.walk_inlines(span.content)?;
                Inline::Span(span)
            }
            Inline::Str(_)
            | Inline::Code(_)
            | Inline::Space
            | Inline::SoftBreak
            | Inline::LineBreak
            | Inline::Math(_)
            | Inline::RawInline(_) => inline,
        })
    }
}
