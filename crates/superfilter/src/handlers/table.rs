/*
 * table.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tables.
//!
//! A leading `{...}` token in the caption selects what happens:
//!
//! - `{from=chart.png}` swaps the whole table for a captioned image;
//! - `{longtable}` forces a page break before the default rendering;
//! - anything else (including `{place=h}`) only matters in table mode,
//!   where every table is rebuilt as a booktabs `tabular`.
//!
//! In table mode a header cell may end in `{0.3}` or `{3cm}` to give its
//! column a fixed-width paragraph layout.

use crate::config::FilterConfig;
use crate::dispatch::Rewrite;
use crate::emit::{emit_caption, emit_image, scaled_length};
use crate::errors::{FilterError, Result};
use crate::options::{OptionSet, parse_table_options};
use crate::raw::{inlatex, latex};
use crate::utils::text::as_str;
use once_cell::sync::Lazy;
use regex::Regex;
use superfilter_types::{Alignment, Block, Caption, Inline, Inlines, Row, Table};

/// Float placement used when the caption gives no `place`.
pub const DEFAULT_PLACEMENT: &str = "tbp";

static COLUMN_SPEC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{(.+)\}$").unwrap());

pub fn handle_table(table: &mut Table, config: &FilterConfig) -> Result<Rewrite<Block>> {
    let options = take_caption_options(&mut table.caption);

    if let Some(uri) = options.as_ref().and_then(|o| o.get("from")) {
        tracing::debug!(uri = %uri, "Table replaced by image");
        let options = options.as_ref();
        return Ok(Rewrite::Splice(vec![
            open_table(options),
            emit_caption(table.caption.inlines()),
            emit_image(uri, options),
            latex("\\end{table}"),
        ]));
    }

    if options.as_ref().is_some_and(|o| o.contains_key("longtable")) {
        tracing::debug!("Long table");
        return Ok(Rewrite::Splice(vec![
            latex("\\clearpage"),
            Block::Table(table.clone()),
        ]));
    }

    if config.table_mode {
        tracing::debug!(columns = table.colspec.len(), "Tabular table");
        return Ok(Rewrite::Splice(build_tabular(table, options.as_ref())?));
    }

    Ok(Rewrite::Keep)
}

/// Keys a caption option token must name at least one of. Any other
/// brace-wrapped first word (`{sic}`) is caption text.
const CAPTION_OPTION_KEYS: [&str; 5] = ["from", "longtable", "place", "width", "height"];

/// Remove a leading option token (and the space after it) from the
/// caption, returning its options.
fn take_caption_options(caption: &mut Caption) -> Option<OptionSet> {
    let inlines = caption.inlines_mut()?;
    let options = inlines
        .first()
        .and_then(as_str)
        .and_then(parse_table_options)
        .filter(|options| CAPTION_OPTION_KEYS.iter().any(|key| options.contains_key(*key)))?;
    tracing::debug!(?options, "Stripping table caption options");
    inlines.remove(0);
    if matches!(inlines.first(), Some(Inline::Space)) {
        inlines.remove(0);
    }
    Some(options)
}

fn open_table(options: Option<&OptionSet>) -> Block {
    let place = options
        .and_then(|o| o.get("place"))
        .map_or(DEFAULT_PLACEMENT, String::as_str);
    latex(format!("\\begin{{table}}[{place}]\n\\centering"))
}

fn alignment_letter(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Default | Alignment::Left => "l",
        Alignment::Center => "c",
        Alignment::Right => "r",
    }
}

/// Strip a trailing `{spec}` token (and the space before it) from a header
/// cell, returning the column specification it selects.
fn take_column_spec(inlines: &mut Inlines) -> Option<String> {
    let spec = inlines
        .last()
        .and_then(as_str)
        .and_then(|text| COLUMN_SPEC.captures(text))
        .map(|caps| caps[1].to_string())?;
    inlines.pop();
    if matches!(inlines.last(), Some(Inline::Space)) {
        inlines.pop();
    }
    Some(format!("p{{{}}}", scaled_length(&spec, "\\linewidth")))
}

fn check_width(row: &Row, columns: usize, what: &str) -> Result<()> {
    if row.cells.len() != columns {
        return Err(FilterError::shape_mismatch(
            "Table",
            format!(
                "{what} has {} cells, expected {columns}",
                row.cells.len()
            ),
        ));
    }
    Ok(())
}

/// Cells of one row joined by ` & `.
fn row_inlines(cells: Vec<Inlines>) -> Inlines {
    let mut out = Vec::new();
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            out.push(inlatex(" & "));
        }
        out.extend(cell);
    }
    out
}

fn build_tabular(table: &Table, options: Option<&OptionSet>) -> Result<Vec<Block>> {
    let columns = table.colspec.len();
    let mut align: Vec<String> = table
        .colspec
        .iter()
        .map(|(alignment, _)| alignment_letter(*alignment).to_string())
        .collect();

    let mut head_rows = table.head.rows.iter();
    let header = match head_rows.next() {
        Some(row) => {
            check_width(row, columns, "header row")?;
            let mut cells = Vec::with_capacity(columns);
            for (i, cell) in row.cells.iter().enumerate() {
                let mut inlines = cell.inlines();
                if let Some(spec) = take_column_spec(&mut inlines) {
                    align[i] = spec;
                }
                cells.push(inlines);
            }
            let mut inlines = row_inlines(cells);
            inlines.push(inlatex(" \\\\\\midrule"));
            Some(Block::para(inlines))
        }
        None => None,
    };

    let mut body = Vec::new();
    let rows = head_rows
        .chain(table.body_rows())
        .chain(table.foot.rows.iter());
    for (n, row) in rows.enumerate() {
        check_width(row, columns, &format!("body row {}", n + 1))?;
        body.extend(row_inlines(row.cells.iter().map(|c| c.inlines()).collect()));
        body.push(inlatex(" \\\\\n"));
    }

    let mut blocks = vec![
        open_table(options),
        emit_caption(table.caption.inlines()),
        latex(format!(
            "\\begin{{tabular}}{{@{{}}{}@{{}}}}\n\\toprule",
            align.concat()
        )),
    ];
    blocks.extend(header);
    if !body.is_empty() {
        blocks.push(Block::para(body));
    }
    blocks.push(latex("\\bottomrule\n\\end{tabular}"));
    blocks.push(latex("\\end{table}"));
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use superfilter_types::{
        Cell, ColWidth, Plain, TableBody, TableFoot, TableHead, empty_attr,
    };

    fn cell(inlines: Vec<Inline>) -> Cell {
        Cell {
            attr: empty_attr(),
            alignment: Alignment::Default,
            row_span: 1,
            col_span: 1,
            content: vec![Block::Plain(Plain { content: inlines })],
        }
    }

    fn row(texts: &[&str]) -> Row {
        Row {
            attr: empty_attr(),
            cells: texts.iter().map(|t| cell(vec![Inline::str(*t)])).collect(),
        }
    }

    fn table(caption: Vec<Inline>, aligns: &[Alignment], head: Option<Row>, body: Vec<Row>) -> Table {
        Table {
            attr: empty_attr(),
            caption: Caption {
                short: None,
                long: if caption.is_empty() {
                    vec![]
                } else {
                    vec![Block::Plain(Plain { content: caption })]
                },
            },
            colspec: aligns.iter().map(|a| (*a, ColWidth::Default)).collect(),
            head: TableHead {
                attr: empty_attr(),
                rows: head.into_iter().collect(),
            },
            bodies: vec![TableBody {
                attr: empty_attr(),
                rowhead_columns: 0,
                head: vec![],
                body,
            }],
            foot: TableFoot {
                attr: empty_attr(),
                rows: vec![],
            },
        }
    }

    fn sales_table(caption: Vec<Inline>) -> Table {
        table(
            caption,
            &[Alignment::Default, Alignment::Right],
            Some(row(&["Item", "Price"])),
            vec![row(&["Tea", "3"]), row(&["Cake", "5"])],
        )
    }

    fn replacement() -> FilterConfig {
        FilterConfig::default().with_table_mode(true)
    }

    #[test]
    fn test_plain_table_is_kept_outside_table_mode() {
        let mut t = sales_table(vec![Inline::str("Sales")]);
        let before = t.clone();
        assert_eq!(
            handle_table(&mut t, &FilterConfig::default()).unwrap(),
            Rewrite::Keep
        );
        assert_eq!(t, before);
    }

    #[test]
    fn test_from_option_replaces_table_with_image() {
        let mut t = sales_table(vec![
            Inline::str("{from=chart.png}"),
            Inline::Space,
            Inline::str("Sales"),
        ]);
        let rewrite = handle_table(&mut t, &FilterConfig::default()).unwrap();
        assert_eq!(
            rewrite,
            Rewrite::Splice(vec![
                latex("\\begin{table}[tbp]\n\\centering"),
                Block::para(vec![inlatex("\\caption{"), Inline::str("Sales"), inlatex("}")]),
                latex("\\includegraphics{chart.png}"),
                latex("\\end{table}"),
            ])
        );
    }

    #[test]
    fn test_from_option_honors_width_and_place() {
        let mut t = sales_table(vec![Inline::str("{from=chart.png,width=0.5,place=h}")]);
        let Rewrite::Splice(blocks) = handle_table(&mut t, &FilterConfig::default()).unwrap()
        else {
            panic!("Expected a replacement");
        };
        assert_eq!(blocks[0], latex("\\begin{table}[h]\n\\centering"));
        assert_eq!(blocks[1], Block::Null);
        assert_eq!(
            blocks[2],
            latex("\\includegraphics[width=0.5\\linewidth]{chart.png}")
        );
    }

    #[test]
    fn test_longtable_prepends_clearpage() {
        let mut t = sales_table(vec![
            Inline::str("{longtable}"),
            Inline::Space,
            Inline::str("Sales"),
        ]);
        let Rewrite::Splice(blocks) = handle_table(&mut t, &replacement()).unwrap() else {
            panic!("Expected a splice");
        };
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], latex("\\clearpage"));
        let Block::Table(kept) = &blocks[1] else {
            panic!("Expected the table to follow");
        };
        assert_eq!(kept.caption.inlines(), vec![Inline::str("Sales")]);
    }

    #[test]
    fn test_option_token_is_stripped_when_kept() {
        let mut t = sales_table(vec![
            Inline::str("{place=h}"),
            Inline::Space,
            Inline::str("Sales"),
        ]);
        assert_eq!(
            handle_table(&mut t, &FilterConfig::default()).unwrap(),
            Rewrite::Keep
        );
        assert_eq!(t.caption.inlines(), vec![Inline::str("Sales")]);
    }

    #[test]
    fn test_unbraced_first_token_is_caption_text() {
        let mut t = sales_table(vec![Inline::str("from=chart.png")]);
        handle_table(&mut t, &FilterConfig::default()).unwrap();
        assert_eq!(t.caption.inlines(), vec![Inline::str("from=chart.png")]);
    }

    #[test]
    fn test_braced_word_without_known_keys_is_caption_text() {
        let caption = vec![Inline::str("{sic}"), Inline::Space, Inline::str("Sales")];
        let mut t = sales_table(caption.clone());
        assert_eq!(
            handle_table(&mut t, &FilterConfig::default()).unwrap(),
            Rewrite::Keep
        );
        assert_eq!(t.caption.inlines(), caption);

        let mut t = sales_table(caption);
        let Rewrite::Splice(blocks) = handle_table(&mut t, &replacement()).unwrap() else {
            panic!("Expected a tabular");
        };
        assert_eq!(blocks[0], latex("\\begin{table}[tbp]\n\\centering"));
        assert_eq!(
            blocks[1],
            Block::para(vec![
                inlatex("\\caption{"),
                Inline::str("{sic}"),
                Inline::Space,
                Inline::str("Sales"),
                inlatex("}"),
            ])
        );
    }

    #[test]
    fn test_tabular_replacement() {
        let mut t = sales_table(vec![Inline::str("Sales")]);
        let Rewrite::Splice(blocks) = handle_table(&mut t, &replacement()).unwrap() else {
            panic!("Expected a tabular");
        };
        assert_eq!(
            blocks,
            vec![
                latex("\\begin{table}[tbp]\n\\centering"),
                Block::para(vec![inlatex("\\caption{"), Inline::str("Sales"), inlatex("}")]),
                latex("\\begin{tabular}{@{}lr@{}}\n\\toprule"),
                Block::para(vec![
                    Inline::str("Item"),
                    inlatex(" & "),
                    Inline::str("Price"),
                    inlatex(" \\\\\\midrule"),
                ]),
                Block::para(vec![
                    Inline::str("Tea"),
                    inlatex(" & "),
                    Inline::str("3"),
                    inlatex(" \\\\\n"),
                    Inline::str("Cake"),
                    inlatex(" & "),
                    Inline::str("5"),
                    inlatex(" \\\\\n"),
                ]),
                latex("\\bottomrule\n\\end{tabular}"),
                latex("\\end{table}"),
            ]
        );
    }

    #[test]
    fn test_header_column_spec_override() {
        let head = Row {
            attr: empty_attr(),
            cells: vec![
                cell(vec![Inline::str("Item"), Inline::Space, Inline::str("{0.3}")]),
                cell(vec![Inline::str("Notes"), Inline::Space, Inline::str("{4cm}")]),
                cell(vec![Inline::str("Price")]),
            ],
        };
        let mut t = table(
            vec![],
            &[Alignment::Left, Alignment::Center, Alignment::Right],
            Some(head),
            vec![],
        );
        let Rewrite::Splice(blocks) = handle_table(&mut t, &replacement()).unwrap() else {
            panic!("Expected a tabular");
        };
        assert_eq!(
            blocks[2],
            latex("\\begin{tabular}{@{}p{0.3\\linewidth}p{4cm}r@{}}\n\\toprule")
        );
        assert_eq!(
            blocks[3],
            Block::para(vec![
                Inline::str("Item"),
                inlatex(" & "),
                Inline::str("Notes"),
                inlatex(" & "),
                Inline::str("Price"),
                inlatex(" \\\\\\midrule"),
            ])
        );
    }

    #[test]
    fn test_headerless_table_has_no_header_line() {
        let mut t = table(
            vec![],
            &[Alignment::Center],
            None,
            vec![row(&["only"])],
        );
        let Rewrite::Splice(blocks) = handle_table(&mut t, &replacement()).unwrap() else {
            panic!("Expected a tabular");
        };
        assert_eq!(blocks[1], Block::Null);
        assert_eq!(blocks[2], latex("\\begin{tabular}{@{}c@{}}\n\\toprule"));
        assert_eq!(
            blocks[3],
            Block::para(vec![Inline::str("only"), inlatex(" \\\\\n")])
        );
        assert_eq!(blocks.len(), 6);
    }

    #[test]
    fn test_ragged_row_is_a_shape_mismatch() {
        let mut t = table(
            vec![],
            &[Alignment::Left, Alignment::Left],
            Some(row(&["a", "b"])),
            vec![row(&["1", "2"]), row(&["3"])],
        );
        let err = handle_table(&mut t, &replacement()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shape mismatch in Table: body row 2 has 1 cells, expected 2"
        );
    }
}
