/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc AST type definitions for superfilter.
 *
 * This crate provides pure data type definitions for the Pandoc AST,
 * mirroring the types from pandoc-types in Haskell. Every node kind gets its
 * own payload struct, so a handler holding a `Paragraph` can only ever see
 * paragraph-shaped content.
 */

pub mod attr;
pub mod block;
pub mod caption;
pub mod inline;
pub mod list;
pub mod pandoc;
pub mod table;

// Re-export commonly used types at the crate root
pub use attr::{Attr, attr_value, empty_attr};
pub use block::{
    Block, BlockQuote, Blocks, BulletList, CodeBlock, DefinitionList, Div, Figure, Header,
    LineBlock, OrderedList, Paragraph, Plain, RawBlock,
};
pub use caption::Caption;
pub use inline::{
    Citation, CitationMode, Cite, Code, Emph, Image, Inline, Inlines, Link, Math,
    MathType, Note, QuoteType, Quoted, RawInline, SmallCaps, Span, Str, Strikeout, Strong,
    Subscript, Superscript, Target, Underline,
};
pub use list::{ListAttributes, ListNumberDelim, ListNumberStyle};
pub use pandoc::{PANDOC_API_VERSION, Pandoc};
pub use table::{Alignment, Cell, ColSpec, ColWidth, Row, Table, TableBody, TableFoot, TableHead};
