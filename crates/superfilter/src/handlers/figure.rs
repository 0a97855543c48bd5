/*
 * figure.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Figures built from image paragraphs.
//!
//! A paragraph holding a single image, or the implicit `Figure` block Pandoc
//! makes of a captioned image, becomes a `figure` float when its target is
//! decorated (`*plot.png` for a full-width `figure*`, or
//! `plot.png|width=0.8` for options). Inside a `<[figures]` region every
//! image paragraph becomes a row of `subfigure`s instead.

use crate::dispatch::Rewrite;
use crate::emit::{emit_caption, emit_image, scaled_length};
use crate::errors::Result;
use crate::options::OptionSet;
use crate::raw::{latex, merge_raw_blocks};
use crate::region::{Region, RegionState, Sentinel};
use crate::uri::split_uri_options;
use superfilter_types::{Block, Figure, Image, Inline, Inlines, Paragraph};

/// Everything needed to emit one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureDescriptor {
    pub starred: bool,
    pub uri: String,
    pub options: Option<OptionSet>,
    pub caption: Inlines,
}

impl FigureDescriptor {
    pub fn from_image(image: &Image) -> Result<Self> {
        let raw = image.target.0.as_str();
        let (starred, rest) = match raw.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (uri, options) = split_uri_options(rest)?;
        Ok(FigureDescriptor {
            starred,
            uri,
            options,
            caption: image.content.clone(),
        })
    }

    /// An undecorated image is left to the default image rendering.
    pub fn is_plain(&self) -> bool {
        !self.starred && self.options.is_none()
    }

    fn environment(&self) -> &'static str {
        if self.starred { "figure*" } else { "figure" }
    }

    pub fn emit(self) -> Vec<Block> {
        let env = self.environment();
        vec![
            open_figure(env),
            emit_image(&self.uri, self.options.as_ref()),
            emit_caption(self.caption),
            latex(format!("\\end{{{env}}}")),
        ]
    }
}

fn open_figure(env: &str) -> Block {
    latex(format!("\\begin{{{env}}}[ht]\n\\centering"))
}

/// A paragraph consisting of exactly one image.
fn sole_image(para: &Paragraph) -> Option<&Image> {
    match para.content.as_slice() {
        [Inline::Image(image)] => Some(image),
        _ => None,
    }
}

/// The image of an implicit figure: a `Figure` block whose only content is
/// a `Plain` or `Para` holding a single image.
fn figure_image(figure: &Figure) -> Option<&Image> {
    match figure.content.as_slice() {
        [block] => match block.inline_content()?.as_slice() {
            [Inline::Image(image)] => Some(image),
            _ => None,
        },
        _ => None,
    }
}

fn emit_figure(figure: FigureDescriptor) -> Rewrite<Block> {
    if figure.is_plain() {
        tracing::trace!(uri = %figure.uri, "Leaving undecorated image alone");
        return Rewrite::Keep;
    }
    tracing::debug!(uri = %figure.uri, starred = figure.starred, "Figure");
    Rewrite::Splice(figure.emit())
}

pub fn handle_single_figure(para: &Paragraph) -> Result<Rewrite<Block>> {
    let Some(image) = sole_image(para) else {
        return Ok(Rewrite::Keep);
    };
    Ok(emit_figure(FigureDescriptor::from_image(image)?))
}

/// Pandoc wraps a captioned image standing alone in a `Figure` block. It
/// is rewritten like an image paragraph: a float of its own, or a single
/// subfigure while a figure group is open. The figure caption stands in
/// when the image has none.
pub fn handle_figure_block(figure: &Figure, regions: &RegionState) -> Result<Rewrite<Block>> {
    let Some(image) = figure_image(figure) else {
        return Ok(Rewrite::Keep);
    };
    if regions.is_open(Region::FigureGroup) {
        tracing::debug!("Subfigure from figure block");
        return Ok(Rewrite::Splice(subfigure_row(&[image])?));
    }
    let mut descriptor = FigureDescriptor::from_image(image)?;
    if descriptor.caption.is_empty() {
        descriptor.caption = figure.caption.inlines();
    }
    Ok(emit_figure(descriptor))
}

/// Region sentinels, group captions and subfigure rows. `text` is the
/// paragraph's flattened content.
pub fn handle_figure_group(
    para: &Paragraph,
    text: &str,
    regions: &mut RegionState,
) -> Result<Rewrite<Block>> {
    if let Some(sentinel) = Sentinel::parse(Region::FigureGroup, text) {
        if !regions.apply(Region::FigureGroup, sentinel) {
            tracing::warn!(sentinel = text, "Ignoring unmatched figures sentinel");
            return Ok(Rewrite::Keep);
        }
        tracing::debug!(sentinel = text, "Figure group region");
        return Ok(Rewrite::Replace(match sentinel {
            Sentinel::Open => open_figure("figure"),
            Sentinel::Close => latex("\\end{figure}"),
        }));
    }

    if !regions.is_open(Region::FigureGroup) {
        return Ok(Rewrite::Keep);
    }

    if let Some(caption) = group_caption(&para.content) {
        return Ok(Rewrite::Replace(emit_caption(caption.to_vec())));
    }

    let images: Vec<&Image> = para
        .content
        .iter()
        .filter_map(|inline| match inline {
            Inline::Image(image) => Some(image),
            _ => None,
        })
        .collect();
    if images.is_empty() {
        return Ok(Rewrite::Keep);
    }
    tracing::debug!(count = images.len(), "Subfigure row");
    Ok(Rewrite::Splice(subfigure_row(&images)?))
}

/// The inlines after a leading `Caption:` and space.
fn group_caption(content: &[Inline]) -> Option<&[Inline]> {
    match content {
        [Inline::Str(label), Inline::Space, rest @ ..] if label.text == "Caption:" => Some(rest),
        _ => None,
    }
}

/// One `subfigure` per image. Widths default to the full line width of the
/// enclosing figure; the image then fills its subfigure.
pub fn subfigure_row(images: &[&Image]) -> Result<Vec<Block>> {
    let mut full_width = OptionSet::new();
    full_width.insert("width".to_string(), "1".to_string());

    let mut blocks = Vec::new();
    for image in images {
        let (uri, options) = split_uri_options(&image.target.0)?;
        let width = options
            .as_ref()
            .and_then(|options| options.get("width"))
            .map_or("1", String::as_str);
        blocks.push(latex(format!(
            "\\begin{{subfigure}}{{{}}}\n\\centering",
            scaled_length(width, "\\linewidth")
        )));
        blocks.push(emit_image(&uri, Some(&full_width)));
        blocks.push(emit_caption(image.content.clone()));
        blocks.push(latex("\\end{subfigure}"));
    }
    blocks.retain(|block| !matches!(block, Block::Null));
    Ok(merge_raw_blocks(blocks))
}
