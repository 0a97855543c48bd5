/*
 * dispatch.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Routing a node to the handler for its kind.

use crate::config::FilterConfig;
use crate::errors::Result;
use crate::handlers::{cite, code_block, columns, cross_ref, figure, math, table};
use crate::region::{Region, RegionState};
use crate::utils::text::stringify_inlines;
use serde_json::Value;
use superfilter_types::{Block, Inline, Paragraph};

/// A handler's answer for one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite<T> {
    /// Leave the node where it is. Handlers may still have edited it in
    /// place (citation ids, table captions).
    Keep,
    /// Put this node in its place.
    Replace(T),
    /// Put these nodes in its place, in order.
    Splice(Vec<T>),
}

impl<T> Rewrite<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Rewrite::Keep)
    }
}

/// Owns the ambient configuration and the region state for one filter run.
#[derive(Debug)]
pub struct Dispatcher {
    config: FilterConfig,
    regions: RegionState,
}

impl Dispatcher {
    pub fn new(config: FilterConfig) -> Self {
        Dispatcher {
            config,
            regions: RegionState::new(),
        }
    }

    /// Metadata is accepted so every handler sees the same call shape as a
    /// Pandoc filter, but nothing reads it yet.
    pub fn dispatch_block(&mut self, block: &mut Block, _meta: &Value) -> Result<Rewrite<Block>> {
        match block {
            Block::Paragraph(para) => self.dispatch_paragraph(para),
            Block::Figure(fig) => figure::handle_figure_block(fig, &self.regions),
            Block::Table(t) => table::handle_table(t, &self.config),
            Block::CodeBlock(code) => Ok(code_block::handle_code_block(code)),
            _ => Ok(Rewrite::Keep),
        }
    }

    pub fn dispatch_inline(
        &mut self,
        inline: &mut Inline,
        _meta: &Value,
    ) -> Result<Rewrite<Inline>> {
        Ok(match inline {
            Inline::RawInline(raw) => cross_ref::handle_raw_inline(raw),
            Inline::Math(m) => math::handle_math(m),
            Inline::Cite(c) => cite::handle_cite(c),
            _ => Rewrite::Keep,
        })
    }

    /// Paragraph handlers form a chain; the first one that does not decline
    /// wins.
    fn dispatch_paragraph(&mut self, para: &Paragraph) -> Result<Rewrite<Block>> {
        let text = stringify_inlines(&para.content);

        if self.config.is_slides() {
            let rewrite = columns::handle_columns(&text, &mut self.regions);
            if !rewrite.is_keep() {
                return Ok(rewrite);
            }
        }

        let rewrite = figure::handle_figure_group(para, &text, &mut self.regions)?;
        if !rewrite.is_keep() || self.regions.is_open(Region::FigureGroup) {
            return Ok(rewrite);
        }

        figure::handle_single_figure(para)
    }
}
