/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde_json::{Value, json};
use superfilter_types::{
    Alignment, Attr, Block, Caption, Cell, CitationMode, ColSpec, ColWidth, Inline, Inlines,
    ListAttributes, ListNumberDelim, ListNumberStyle, MathType, PANDOC_API_VERSION, Pandoc,
    QuoteType, Row, Table,
};

fn write_attr(attr: &Attr) -> Value {
    json!([
        attr.0, // id
        attr.1, // classes
        attr.2
            .iter()
            .map(|(k, v)| json!([k, v]))
            .collect::<Vec<_>>()  // key-value pairs
    ])
}

fn write_citation_mode(mode: &CitationMode) -> Value {
    match mode {
        CitationMode::NormalCitation => json!({"t": "NormalCitation"}),
        CitationMode::AuthorInText => json!({"t": "AuthorInText"}),
        CitationMode::SuppressAuthor => json!({"t": "SuppressAuthor"}),
    }
}

fn tagged(t: &str, c: Value) -> Value {
    json!({"t": t, "c": c})
}

fn write_inline(inline: &Inline) -> Value {
    match inline {
        Inline::Str(s) => tagged("Str", json!(s.text)),
        Inline::Space => json!({"t": "Space"}),
        Inline::SoftBreak => json!({"t": "SoftBreak"}),
        Inline::LineBreak => json!({"t": "LineBreak"}),
        Inline::Emph(e) => tagged("Emph", write_inlines(&e.content)),
        Inline::Underline(u) => tagged("Underline", write_inlines(&u.content)),
        Inline::Strong(s) => tagged("Strong", write_inlines(&s.content)),
        Inline::Strikeout(s) => tagged("Strikeout", write_inlines(&s.content)),
        Inline::Superscript(s) => tagged("Superscript", write_inlines(&s.content)),
        Inline::Subscript(s) => tagged("Subscript", write_inlines(&s.content)),
        Inline::SmallCaps(s) => tagged("SmallCaps", write_inlines(&s.content)),
        Inline::Quoted(q) => {
            let quote_type = match q.quote_type {
                QuoteType::SingleQuote => json!({"t": "SingleQuote"}),
                QuoteType::DoubleQuote => json!({"t": "DoubleQuote"}),
            };
            tagged("Quoted", json!([quote_type, write_inlines(&q.content)]))
        }
        Inline::Cite(cite) => tagged(
            "Cite",
            json!([
                cite.citations
                    .iter()
                    .map(|citation| {
                        json!({
                            "citationId": citation.id,
                            "citationPrefix": write_inlines(&citation.prefix),
                            "citationSuffix": write_inlines(&citation.suffix),
                            "citationMode": write_citation_mode(&citation.mode),
                            "citationNoteNum": citation.note_num,
                            "citationHash": citation.hash
                        })
                    })
                    .collect::<Vec<_>>(),
                write_inlines(&cite.content)
            ]),
        ),
        Inline::Code(c) => tagged("Code", json!([write_attr(&c.attr), c.text])),
        Inline::Math(m) => {
            let math_type = match m.math_type {
                MathType::InlineMath => json!({"t": "InlineMath"}),
                MathType::DisplayMath => json!({"t": "DisplayMath"}),
            };
            tagged("Math", json!([math_type, m.text]))
        }
        Inline::RawInline(raw) => tagged("RawInline", json!([raw.format, raw.text])),
        Inline::Link(link) => tagged(
            "Link",
            json!([
                write_attr(&link.attr),
                write_inlines(&link.content),
                [link.target.0, link.target.1]
            ]),
        ),
        Inline::Image(image) => tagged(
            "Image",
            json!([
                write_attr(&image.attr),
                write_inlines(&image.content),
                [image.target.0, image.target.1]
            ]),
        ),
        Inline::Note(note) => tagged("Note", write_blocks(&note.content)),
        Inline::Span(span) => tagged(
            "Span",
            json!([write_attr(&span.attr), write_inlines(&span.content)]),
        ),
    }
}

fn write_inlines(inlines: &Inlines) -> Value {
    json!(inlines.iter().map(write_inline).collect::<Vec<_>>())
}

fn write_list_attributes(attr: &ListAttributes) -> Value {
    let style = match attr.1 {
        ListNumberStyle::Default => "DefaultStyle",
        ListNumberStyle::Example => "Example",
        ListNumberStyle::Decimal => "Decimal",
        ListNumberStyle::LowerRoman => "LowerRoman",
        ListNumberStyle::UpperRoman => "UpperRoman",
        ListNumberStyle::LowerAlpha => "LowerAlpha",
        ListNumberStyle::UpperAlpha => "UpperAlpha",
    };
    let delim = match attr.2 {
        ListNumberDelim::Default => "DefaultDelim",
        ListNumberDelim::Period => "Period",
        ListNumberDelim::OneParen => "OneParen",
        ListNumberDelim::TwoParens => "TwoParens",
    };
    json!([attr.0, {"t": style}, {"t": delim}])
}

fn write_blockss(blockss: &[Vec<Block>]) -> Value {
    json!(blockss.iter().map(|blocks| write_blocks(blocks)).collect::<Vec<_>>())
}

fn write_caption(caption: &Caption) -> Value {
    json!([
        caption.short.as_ref().map(write_inlines),
        write_blocks(&caption.long)
    ])
}

fn write_alignment(alignment: Alignment) -> Value {
    match alignment {
        Alignment::Left => json!({"t": "AlignLeft"}),
        Alignment::Center => json!({"t": "AlignCenter"}),
        Alignment::Right => json!({"t": "AlignRight"}),
        Alignment::Default => json!({"t": "AlignDefault"}),
    }
}

fn write_colspec(colspec: &ColSpec) -> Value {
    let width = match colspec.1 {
        ColWidth::Default => json!({"t": "ColWidthDefault"}),
        ColWidth::Percentage(p) => json!({"t": "ColWidth", "c": p}),
    };
    json!([write_alignment(colspec.0), width])
}

fn write_cell(cell: &Cell) -> Value {
    json!([
        write_attr(&cell.attr),
        write_alignment(cell.alignment),
        cell.row_span,
        cell.col_span,
        write_blocks(&cell.content)
    ])
}

fn write_rows(rows: &[Row]) -> Value {
    json!(
        rows.iter()
            .map(|row| json!([
                write_attr(&row.attr),
                row.cells.iter().map(write_cell).collect::<Vec<_>>()
            ]))
            .collect::<Vec<_>>()
    )
}

fn write_table(table: &Table) -> Value {
    json!([
        write_attr(&table.attr),
        write_caption(&table.caption),
        table.colspec.iter().map(write_colspec).collect::<Vec<_>>(),
        [write_attr(&table.head.attr), write_rows(&table.head.rows)],
        table
            .bodies
            .iter()
            .map(|body| json!([
                write_attr(&body.attr),
                body.rowhead_columns,
                write_rows(&body.head),
                write_rows(&body.body)
            ]))
            .collect::<Vec<_>>(),
        [write_attr(&table.foot.attr), write_rows(&table.foot.rows)]
    ])
}

/// `None` for `Null`, which has no counterpart in the current Pandoc schema.
fn write_block(block: &Block) -> Option<Value> {
    Some(match block {
        Block::Plain(plain) => tagged("Plain", write_inlines(&plain.content)),
        Block::Paragraph(para) => tagged("Para", write_inlines(&para.content)),
        Block::LineBlock(lines) => tagged(
            "LineBlock",
            json!(lines.content.iter().map(write_inlines).collect::<Vec<_>>()),
        ),
        Block::CodeBlock(code) => tagged("CodeBlock", json!([write_attr(&code.attr), code.text])),
        Block::RawBlock(raw) => tagged("RawBlock", json!([raw.format, raw.text])),
        Block::BlockQuote(quote) => tagged("BlockQuote", write_blocks(&quote.content)),
        Block::OrderedList(list) => tagged(
            "OrderedList",
            json!([write_list_attributes(&list.attr), write_blockss(&list.content)]),
        ),
        Block::BulletList(list) => tagged("BulletList", write_blockss(&list.content)),
        Block::DefinitionList(list) => tagged(
            "DefinitionList",
            json!(
                list.content
                    .iter()
                    .map(|(term, definitions)| json!([
                        write_inlines(term),
                        write_blockss(definitions)
                    ]))
                    .collect::<Vec<_>>()
            ),
        ),
        Block::Header(header) => tagged(
            "Header",
            json!([
                header.level,
                write_attr(&header.attr),
                write_inlines(&header.content)
            ]),
        ),
        Block::HorizontalRule => json!({"t": "HorizontalRule"}),
        Block::Table(table) => tagged("Table", write_table(table)),
        Block::Figure(figure) => tagged(
            "Figure",
            json!([
                write_attr(&figure.attr),
                write_caption(&figure.caption),
                write_blocks(&figure.content)
            ]),
        ),
        Block::Div(div) => tagged(
            "Div",
            json!([write_attr(&div.attr), write_blocks(&div.content)]),
        ),
        Block::Null => return None,
    })
}

fn write_blocks(blocks: &[Block]) -> Value {
    json!(blocks.iter().filter_map(write_block).collect::<Vec<_>>())
}

fn write_pandoc(pandoc: &Pandoc) -> Value {
    json!({
        "pandoc-api-version": PANDOC_API_VERSION,
        "meta": pandoc.meta,
        "blocks": write_blocks(&pandoc.blocks),
    })
}

pub fn write_string(pandoc: &Pandoc) -> serde_json::Result<String> {
    serde_json::to_string(&write_pandoc(pandoc))
}
