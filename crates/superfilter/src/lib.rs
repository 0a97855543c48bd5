/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * A Pandoc JSON filter that turns lightly annotated markdown into LaTeX
 * floats: decorated images become figures, `<[figures]` regions become
 * subfigure grids, tables can be rebuilt as booktabs tabulars, and raw
 * cross reference markers, labelled equations and citation variants become
 * the matching LaTeX commands.
 */

pub mod config;
pub mod dispatch;
pub mod emit;
pub mod errors;
pub mod filters;
pub mod handlers;
pub mod options;
pub mod raw;
pub mod readers;
pub mod region;
pub mod uri;
pub mod utils;
pub mod writers;

pub use config::FilterConfig;
pub use dispatch::{Dispatcher, Rewrite};
pub use errors::{FilterError, Result};

use superfilter_types::Pandoc;

/// Run one filter pass over a parsed document.
pub fn filter(doc: &mut Pandoc, config: FilterConfig) -> Result<()> {
    let mut dispatcher = Dispatcher::new(config);
    filters::filter_document(doc, &mut dispatcher)
}

/// Read a Pandoc JSON document, filter it, and serialize the result.
pub fn filter_json(input: &str, config: FilterConfig) -> Result<String> {
    let mut doc = readers::json::read_str(input)?;
    filter(&mut doc, config)?;
    Ok(writers::json::write_string(&doc)?)
}
