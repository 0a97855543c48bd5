/*
 * caption.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::block::{Block, Blocks};
use crate::inline::Inlines;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Caption {
    pub short: Option<Inlines>,
    pub long: Blocks,
}

impl Caption {
    /// The inline text of the caption: the contents of its first
    /// `Plain`/`Para` block.
    pub fn inlines(&self) -> Inlines {
        self.long
            .iter()
            .find_map(Block::inline_content)
            .cloned()
            .unwrap_or_default()
    }

    pub fn inlines_mut(&mut self) -> Option<&mut Inlines> {
        self.long.iter_mut().find_map(Block::inline_content_mut)
    }
}
