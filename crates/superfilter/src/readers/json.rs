/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use hashlink::LinkedHashMap;
use serde_json::{Map, Value};
use superfilter_types::{
    Alignment, Attr, Block, BlockQuote, BulletList, Caption, Cell, Citation, CitationMode, Cite,
    Code, CodeBlock, ColSpec, ColWidth, DefinitionList, Div, Emph, Figure, Header, Image, Inline,
    Inlines, LineBlock, Link, ListAttributes, ListNumberDelim, ListNumberStyle, Math, MathType,
    Note, OrderedList, Pandoc, Paragraph, Plain, QuoteType, Quoted, RawBlock, RawInline, Row,
    SmallCaps, Span, Str, Strikeout, Strong, Subscript, Superscript, Table, TableBody, TableFoot,
    TableHead, Underline,
};

#[derive(Debug)]
pub enum JsonReadError {
    InvalidJson(serde_json::Error),
    MissingField(String),
    InvalidType(String),
    UnsupportedVariant(String),
}

impl std::fmt::Display for JsonReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonReadError::InvalidJson(e) => write!(f, "Invalid JSON: {}", e),
            JsonReadError::MissingField(field) => write!(f, "Missing required field: {}", field),
            JsonReadError::InvalidType(msg) => write!(f, "Invalid type: {}", msg),
            JsonReadError::UnsupportedVariant(variant) => {
                write!(f, "Unsupported variant: {}", variant)
            }
        }
    }
}

impl std::error::Error for JsonReadError {}

type Result<T> = std::result::Result<T, JsonReadError>;

fn invalid(msg: impl Into<String>) -> JsonReadError {
    JsonReadError::InvalidType(msg.into())
}

fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| invalid(format!("Expected object for {}", what)))
}

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| JsonReadError::MissingField(key.to_string()))
}

/// An array of exactly `len` elements.
fn tuple<'a>(value: &'a Value, len: usize, what: &str) -> Result<&'a [Value]> {
    let arr = value
        .as_array()
        .ok_or_else(|| invalid(format!("{} content must be array", what)))?;
    if arr.len() != len {
        return Err(invalid(format!(
            "{} array must have {} elements",
            what, len
        )));
    }
    Ok(arr.as_slice())
}

fn array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("Expected array for {}", what)))
}

fn string(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("{} must be string", what)))
}

fn number(value: &Value, what: &str) -> Result<usize> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| invalid(format!("{} must be number", what)))
}

/// The `t` tag of a `{"t": ...}` object.
fn tag<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    object(value, what)?
        .get("t")
        .and_then(Value::as_str)
        .ok_or_else(|| JsonReadError::MissingField(format!("t in {}", what)))
}

fn unsupported<T>(what: &str, tag: &str) -> Result<T> {
    Err(JsonReadError::UnsupportedVariant(format!(
        "{}: {}",
        what, tag
    )))
}

fn read_attr(value: &Value) -> Result<Attr> {
    let arr = tuple(value, 3, "Attr")?;
    let id = string(&arr[0], "Attr id")?;
    let classes = array(&arr[1], "Attr classes")?
        .iter()
        .map(|v| string(v, "Class"))
        .collect::<Result<Vec<_>>>()?;
    let mut kvs = LinkedHashMap::new();
    for kv in array(&arr[2], "Attr key-values")? {
        let pair = tuple(kv, 2, "Key-value pair")?;
        kvs.insert(string(&pair[0], "Key")?, string(&pair[1], "Value")?);
    }
    Ok((id, classes, kvs))
}

fn read_target(value: &Value) -> Result<(String, String)> {
    let arr = tuple(value, 2, "Target")?;
    Ok((string(&arr[0], "Target url")?, string(&arr[1], "Target title")?))
}

fn read_citation_mode(value: &Value) -> Result<CitationMode> {
    match tag(value, "CitationMode")? {
        "NormalCitation" => Ok(CitationMode::NormalCitation),
        "AuthorInText" => Ok(CitationMode::AuthorInText),
        "SuppressAuthor" => Ok(CitationMode::SuppressAuthor),
        t => unsupported("CitationMode", t),
    }
}

fn read_citation(value: &Value) -> Result<Citation> {
    let obj = object(value, "Citation")?;
    Ok(Citation {
        id: string(field(obj, "citationId")?, "citationId")?,
        prefix: read_inlines(field(obj, "citationPrefix")?)?,
        suffix: read_inlines(field(obj, "citationSuffix")?)?,
        mode: read_citation_mode(field(obj, "citationMode")?)?,
        note_num: number(field(obj, "citationNoteNum")?, "citationNoteNum")?,
        hash: number(field(obj, "citationHash")?, "citationHash")?,
    })
}

fn read_inline(value: &Value) -> Result<Inline> {
    let obj = object(value, "Inline")?;
    let t = field(obj, "t")?
        .as_str()
        .ok_or_else(|| invalid("Inline tag must be string"))?;
    let c = || field(obj, "c");

    Ok(match t {
        "Space" => Inline::Space,
        "SoftBreak" => Inline::SoftBreak,
        "LineBreak" => Inline::LineBreak,
        "Str" => Inline::Str(Str {
            text: string(c()?, "Str content")?,
        }),
        "Emph" => Inline::Emph(Emph {
            content: read_inlines(c()?)?,
        }),
        "Underline" => Inline::Underline(Underline {
            content: read_inlines(c()?)?,
        }),
        "Strong" => Inline::Strong(Strong {
            content: read_inlines(c()?)?,
        }),
        "Strikeout" => Inline::Strikeout(Strikeout {
            content: read_inlines(c()?)?,
        }),
        "Superscript" => Inline::Superscript(Superscript {
            content: read_inlines(c()?)?,
        }),
        "Subscript" => Inline::Subscript(Subscript {
            content: read_inlines(c()?)?,
        }),
        "SmallCaps" => Inline::SmallCaps(SmallCaps {
            content: read_inlines(c()?)?,
        }),
        "Quoted" => {
            let arr = tuple(c()?, 2, "Quoted")?;
            let quote_type = match tag(&arr[0], "QuoteType")? {
                "SingleQuote" => QuoteType::SingleQuote,
                "DoubleQuote" => QuoteType::DoubleQuote,
                t => return unsupported("QuoteType", t),
            };
            Inline::Quoted(Quoted {
                quote_type,
                content: read_inlines(&arr[1])?,
            })
        }
        "Cite" => {
            let arr = tuple(c()?, 2, "Cite")?;
            let citations = array(&arr[0], "Citations")?
                .iter()
                .map(read_citation)
                .collect::<Result<Vec<_>>>()?;
            Inline::Cite(Cite {
                citations,
                content: read_inlines(&arr[1])?,
            })
        }
        "Code" => {
            let arr = tuple(c()?, 2, "Code")?;
            Inline::Code(Code {
                attr: read_attr(&arr[0])?,
                text: string(&arr[1], "Code text")?,
            })
        }
        "Math" => {
            let arr = tuple(c()?, 2, "Math")?;
            let math_type = match tag(&arr[0], "MathType")? {
                "InlineMath" => MathType::InlineMath,
                "DisplayMath" => MathType::DisplayMath,
                t => return unsupported("MathType", t),
            };
            Inline::Math(Math {
                math_type,
                text: string(&arr[1], "Math text")?,
            })
        }
        "RawInline" => {
            let arr = tuple(c()?, 2, "RawInline")?;
            Inline::RawInline(RawInline {
                format: string(&arr[0], "RawInline format")?,
                text: string(&arr[1], "RawInline text")?,
            })
        }
        "Link" => {
            let arr = tuple(c()?, 3, "Link")?;
            Inline::Link(Link {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
                target: read_target(&arr[2])?,
            })
        }
        "Image" => {
            let arr = tuple(c()?, 3, "Image")?;
            Inline::Image(Image {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
                target: read_target(&arr[2])?,
            })
        }
        "Note" => Inline::Note(Note {
            content: read_blocks(c()?)?,
        }),
        "Span" => {
            let arr = tuple(c()?, 2, "Span")?;
            Inline::Span(Span {
                attr: read_attr(&arr[0])?,
                content: read_inlines(&arr[1])?,
            })
        }
        _ => return unsupported("Inline", t),
    })
}

fn read_inlines(value: &Value) -> Result<Inlines> {
    array(value, "Inlines")?.iter().map(read_inline).collect()
}

fn read_blocks(value: &Value) -> Result<Vec<Block>> {
    array(value, "blocks")?.iter().map(read_block).collect()
}

fn read_blockss(value: &Value) -> Result<Vec<Vec<Block>>> {
    array(value, "blockss")?.iter().map(read_blocks).collect()
}

fn read_list_attributes(value: &Value) -> Result<ListAttributes> {
    let arr = tuple(value, 3, "ListAttributes")?;
    let start = arr[0]
        .as_i64()
        .ok_or_else(|| invalid("ListAttributes start number must be integer"))?
        as usize;
    let style = match tag(&arr[1], "number style")? {
        "DefaultStyle" => ListNumberStyle::Default,
        "Example" => ListNumberStyle::Example,
        "Decimal" => ListNumberStyle::Decimal,
        "LowerRoman" => ListNumberStyle::LowerRoman,
        "UpperRoman" => ListNumberStyle::UpperRoman,
        "LowerAlpha" => ListNumberStyle::LowerAlpha,
        "UpperAlpha" => ListNumberStyle::UpperAlpha,
        t => return unsupported("ListNumberStyle", t),
    };
    let delim = match tag(&arr[2], "number delimiter")? {
        "DefaultDelim" => ListNumberDelim::Default,
        "Period" => ListNumberDelim::Period,
        "OneParen" => ListNumberDelim::OneParen,
        "TwoParens" => ListNumberDelim::TwoParens,
        t => return unsupported("ListNumberDelim", t),
    };
    Ok((start, style, delim))
}

fn read_caption(value: &Value) -> Result<Caption> {
    let arr = tuple(value, 2, "Caption")?;
    let short = if arr[0].is_null() {
        None
    } else {
        Some(read_inlines(&arr[0])?)
    };
    Ok(Caption {
        short,
        long: read_blocks(&arr[1])?,
    })
}

fn read_alignment(value: &Value) -> Result<Alignment> {
    match tag(value, "Alignment")? {
        "AlignLeft" => Ok(Alignment::Left),
        "AlignCenter" => Ok(Alignment::Center),
        "AlignRight" => Ok(Alignment::Right),
        "AlignDefault" => Ok(Alignment::Default),
        t => unsupported("Alignment", t),
    }
}

fn read_colspec(value: &Value) -> Result<ColSpec> {
    let arr = tuple(value, 2, "ColSpec")?;
    let alignment = read_alignment(&arr[0])?;
    let width = match tag(&arr[1], "ColWidth")? {
        "ColWidthDefault" => ColWidth::Default,
        "ColWidth" => {
            let c = field(object(&arr[1], "ColWidth")?, "c")?;
            ColWidth::Percentage(
                c.as_f64()
                    .ok_or_else(|| invalid("ColWidth percentage must be number"))?,
            )
        }
        t => return unsupported("ColWidth", t),
    };
    Ok((alignment, width))
}

fn read_cell(value: &Value) -> Result<Cell> {
    let arr = tuple(value, 5, "Cell")?;
    Ok(Cell {
        attr: read_attr(&arr[0])?,
        alignment: read_alignment(&arr[1])?,
        row_span: number(&arr[2], "Cell row_span")?,
        col_span: number(&arr[3], "Cell col_span")?,
        content: read_blocks(&arr[4])?,
    })
}

fn read_row(value: &Value) -> Result<Row> {
    let arr = tuple(value, 2, "Row")?;
    Ok(Row {
        attr: read_attr(&arr[0])?,
        cells: array(&arr[1], "Row cells")?
            .iter()
            .map(read_cell)
            .collect::<Result<Vec<_>>>()?,
    })
}

fn read_rows(value: &Value, what: &str) -> Result<Vec<Row>> {
    array(value, what)?.iter().map(read_row).collect()
}

fn read_table(value: &Value) -> Result<Table> {
    let arr = tuple(value, 6, "Table")?;

    let head = tuple(&arr[3], 2, "TableHead")?;
    let bodies = array(&arr[4], "TableBodies")?
        .iter()
        .map(|body| {
            let body = tuple(body, 4, "TableBody")?;
            Ok(TableBody {
                attr: read_attr(&body[0])?,
                rowhead_columns: number(&body[1], "TableBody rowhead_columns")?,
                head: read_rows(&body[2], "TableBody head")?,
                body: read_rows(&body[3], "TableBody body")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let foot = tuple(&arr[5], 2, "TableFoot")?;

    Ok(Table {
        attr: read_attr(&arr[0])?,
        caption: read_caption(&arr[1])?,
        colspec: array(&arr[2], "ColSpecs")?
            .iter()
            .map(read_colspec)
            .collect::<Result<Vec<_>>>()?,
        head: TableHead {
            attr: read_attr(&head[0])?,
            rows: read_rows(&head[1], "TableHead rows")?,
        },
        bodies,
        foot: TableFoot {
            attr: read_attr(&foot[0])?,
            rows: read_rows(&foot[1], "TableFoot rows")?,
        },
    })
}

fn read_block(value: &Value) -> Result<Block> {
    let obj = object(value, "Block")?;
    let t = field(obj, "t")?
        .as_str()
        .ok_or_else(|| invalid("Block tag must be string"))?;
    let c = || field(obj, "c");

    Ok(match t {
        "HorizontalRule" => Block::HorizontalRule,
        "Null" => Block::Null,
        "Para" => Block::Paragraph(Paragraph {
            content: read_inlines(c()?)?,
        }),
        "Plain" => Block::Plain(Plain {
            content: read_inlines(c()?)?,
        }),
        "LineBlock" => Block::LineBlock(LineBlock {
            content: array(c()?, "LineBlock")?
                .iter()
                .map(read_inlines)
                .collect::<Result<Vec<_>>>()?,
        }),
        "CodeBlock" => {
            let arr = tuple(c()?, 2, "CodeBlock")?;
            Block::CodeBlock(CodeBlock {
                attr: read_attr(&arr[0])?,
                text: string(&arr[1], "CodeBlock text")?,
            })
        }
        "RawBlock" => {
            let arr = tuple(c()?, 2, "RawBlock")?;
            Block::RawBlock(RawBlock {
                format: string(&arr[0], "RawBlock format")?,
                text: string(&arr[1], "RawBlock text")?,
            })
        }
        "BlockQuote" => Block::BlockQuote(BlockQuote {
            content: read_blocks(c()?)?,
        }),
        "OrderedList" => {
            let arr = tuple(c()?, 2, "OrderedList")?;
            Block::OrderedList(OrderedList {
                attr: read_list_attributes(&arr[0])?,
                content: read_blockss(&arr[1])?,
            })
        }
        "BulletList" => Block::BulletList(BulletList {
            content: read_blockss(c()?)?,
        }),
        "DefinitionList" => {
            let content = array(c()?, "DefinitionList")?
                .iter()
                .map(|item| {
                    let item = tuple(item, 2, "DefinitionList item")?;
                    Ok((read_inlines(&item[0])?, read_blockss(&item[1])?))
                })
                .collect::<Result<Vec<_>>>()?;
            Block::DefinitionList(DefinitionList { content })
        }
        "Header" => {
            let arr = tuple(c()?, 3, "Header")?;
            Block::Header(Header {
                level: number(&arr[0], "Header level")?,
                attr: read_attr(&arr[1])?,
                content: read_inlines(&arr[2])?,
            })
        }
        "Table" => Block::Table(read_table(c()?)?),
        "Figure" => {
            let arr = tuple(c()?, 3, "Figure")?;
            Block::Figure(Figure {
                attr: read_attr(&arr[0])?,
                caption: read_caption(&arr[1])?,
                content: read_blocks(&arr[2])?,
            })
        }
        "Div" => {
            let arr = tuple(c()?, 2, "Div")?;
            Block::Div(Div {
                attr: read_attr(&arr[0])?,
                content: read_blocks(&arr[1])?,
            })
        }
        _ => return unsupported("Block", t),
    })
}

fn read_pandoc(value: &Value) -> Result<Pandoc> {
    let obj = object(value, "Pandoc")?;
    // Metadata is passed through untouched.
    let meta = field(obj, "meta")?.clone();
    let blocks = read_blocks(field(obj, "blocks")?)?;
    Ok(Pandoc { meta, blocks })
}

pub fn read_str(input: &str) -> Result<Pandoc> {
    let json: Value = serde_json::from_str(input).map_err(JsonReadError::InvalidJson)?;
    read_pandoc(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(blocks: Value) -> Value {
        json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {"title": {"t": "MetaInlines", "c": [{"t": "Str", "c": "T"}]}},
            "blocks": blocks,
        })
    }

    #[test]
    fn test_read_paragraph_with_image() {
        let value = doc(json!([{
            "t": "Para",
            "c": [{"t": "Image", "c": [["", [], []], [{"t": "Str", "c": "Cap"}], ["*a.png", ""]]}]
        }]));
        let pandoc = read_pandoc(&value).unwrap();
        let Block::Paragraph(para) = &pandoc.blocks[0] else {
            panic!("Expected a paragraph");
        };
        let Inline::Image(image) = &para.content[0] else {
            panic!("Expected an image");
        };
        assert_eq!(image.target.0, "*a.png");
        assert_eq!(image.content, vec![Inline::str("Cap")]);
    }

    #[test]
    fn test_meta_is_kept_verbatim() {
        let value = doc(json!([]));
        let pandoc = read_pandoc(&value).unwrap();
        assert_eq!(pandoc.meta, value["meta"]);
    }

    #[test]
    fn test_read_citation() {
        let value = doc(json!([{"t": "Para", "c": [{"t": "Cite", "c": [[{
            "citationId": "smith99#t",
            "citationPrefix": [],
            "citationSuffix": [],
            "citationMode": {"t": "AuthorInText"},
            "citationNoteNum": 1,
            "citationHash": 0
        }], [{"t": "Str", "c": "@smith99#t"}]]}]}]));
        let pandoc = read_pandoc(&value).unwrap();
        let Block::Paragraph(para) = &pandoc.blocks[0] else {
            panic!("Expected a paragraph");
        };
        let Inline::Cite(cite) = &para.content[0] else {
            panic!("Expected a citation");
        };
        assert_eq!(cite.citations[0].id, "smith99#t");
        assert_eq!(cite.citations[0].mode, CitationMode::AuthorInText);
        assert_eq!(cite.citations[0].note_num, 1);
    }

    #[test]
    fn test_read_table_shape() {
        let cell = json!([["", [], []], {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": [{"t": "Str", "c": "x"}]}]]);
        let value = doc(json!([{"t": "Table", "c": [
            ["", [], []],
            [null, [{"t": "Plain", "c": [{"t": "Str", "c": "{longtable}"}]}]],
            [[{"t": "AlignRight"}, {"t": "ColWidth", "c": 0.5}]],
            [["", [], []], [[["", [], []], [cell.clone()]]]],
            [[["", [], []], 0, [], [[["", [], []], [cell]]]]],
            [["", [], []], []]
        ]}]));
        let pandoc = read_pandoc(&value).unwrap();
        let Block::Table(table) = &pandoc.blocks[0] else {
            panic!("Expected a table");
        };
        assert_eq!(
            table.colspec,
            vec![(Alignment::Right, ColWidth::Percentage(0.5))]
        );
        assert_eq!(table.head.rows.len(), 1);
        assert_eq!(table.body_rows().count(), 1);
        assert_eq!(table.caption.inlines(), vec![Inline::str("{longtable}")]);
    }

    #[test]
    fn test_unknown_block_is_unsupported() {
        let err = read_pandoc(&doc(json!([{"t": "Widget", "c": []}]))).unwrap_err();
        assert!(matches!(err, JsonReadError::UnsupportedVariant(v) if v == "Block: Widget"));
    }

    #[test]
    fn test_wrong_arity_is_invalid_type() {
        let err = read_pandoc(&doc(json!([{"t": "CodeBlock", "c": [["", [], []]]}]))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid type: CodeBlock array must have 2 elements"
        );
    }

    #[test]
    fn test_missing_blocks_field() {
        let err = read_str(r#"{"meta": {}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: blocks");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            read_str("{not json"),
            Err(JsonReadError::InvalidJson(_))
        ));
    }
}
