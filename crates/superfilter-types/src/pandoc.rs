/*
 * pandoc.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub use crate::block::Blocks;
use serde::{Deserialize, Serialize};

/// The pandoc-types API version this crate reads and writes.
pub const PANDOC_API_VERSION: [u32; 3] = [1, 23, 1];

/*
 * A data structure that mimics Pandoc's `data Pandoc` type.
 */

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pandoc {
    /// Document metadata, kept as the raw JSON object Pandoc sent.
    ///
    /// Filters receive it but never look inside it, so it is round-tripped
    /// without being converted to typed values.
    pub meta: serde_json::Value,
    pub blocks: Blocks,
}
