/*
 * errors.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for superfilter

use crate::readers::json::JsonReadError;
use thiserror::Error;

/// Every way a filter run can fail.
///
/// All of these abort the whole run: a document is either filtered
/// completely or not written at all.
#[derive(Error, Debug)]
pub enum FilterError {
    /// An option list entry has no `=`, e.g. `width` in `fig.png|width`.
    #[error("Malformed options {input:?}: entry {entry:?} is not of the form key=value")]
    MalformedOptions { input: String, entry: String },

    /// A node's content does not have the shape its kind requires.
    #[error("Shape mismatch in {node}: {detail}")]
    ShapeMismatch { node: &'static str, detail: String },

    #[error("Failed to read Pandoc JSON: {0}")]
    Read(#[from] JsonReadError),

    #[error("Failed to write Pandoc JSON: {0}")]
    Write(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    pub fn shape_mismatch(node: &'static str, detail: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            node,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
