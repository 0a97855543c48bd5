/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Plain-text views of inline content, used to match authored sentinels.

use superfilter_types::Inline;

/// Flatten inlines to the text a reader would see.
///
/// Breaks become a single space so that a sentinel wrapped across source
/// lines still matches. Raw fragments and notes contribute nothing.
pub fn stringify_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(stringify_inline).collect()
}

fn stringify_inline(inline: &Inline) -> String {
    match inline {
        Inline::Str(s) => s.text.clone(),
        Inline::Space | Inline::SoftBreak | Inline::LineBreak => " ".to_string(),
        Inline::Code(c) => c.text.clone(),
        Inline::Math(m) => m.text.clone(),
        Inline::Emph(e) => stringify_inlines(&e.content),
        Inline::Strong(s) => stringify_inlines(&s.content),
        Inline::Underline(u) => stringify_inlines(&u.content),
        Inline::Strikeout(s) => stringify_inlines(&s.content),
        Inline::Superscript(s) => stringify_inlines(&s.content),
        Inline::Subscript(s) => stringify_inlines(&s.content),
        Inline::SmallCaps(s) => stringify_inlines(&s.content),
        Inline::Quoted(q) => format!("\"{}\"", stringify_inlines(&q.content)),
        Inline::Link(l) => stringify_inlines(&l.content),
        Inline::Image(i) => stringify_inlines(&i.content),
        Inline::Span(s) => stringify_inlines(&s.content),
        Inline::Cite(c) => stringify_inlines(&c.content),
        Inline::RawInline(_) | Inline::Note(_) => String::new(),
    }
}

/// The text of `inline` if it is a `Str`.
pub fn as_str(inline: &Inline) -> Option<&str> {
    match inline {
        Inline::Str(s) => Some(&s.text),
        _ => None,
    }
}
