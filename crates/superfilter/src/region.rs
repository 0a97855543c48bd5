/*
 * region.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Multi-paragraph regions opened and closed by sentinel paragraphs.
//!
//! ```markdown
//! <[figures]
//!
//! ![A](a.png) ![B](b.png)
//!
//! Caption: Two plots
//!
//! [figures]>
//! ```
//!
//! The state lives in the dispatcher for one filter run. Each flag moves
//! `false -> true` only on its open sentinel and `true -> false` only on its
//! close sentinel.

use crate::options::FLOAT_PATTERN;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Beamer `columns` environment.
    Columns,
    /// A `figure` holding a grid of subfigures.
    FigureGroup,
}

impl Region {
    pub fn open_sentinel(self) -> &'static str {
        match self {
            Region::Columns => "<[columns]",
            Region::FigureGroup => "<[figures]",
        }
    }

    pub fn close_sentinel(self) -> &'static str {
        match self {
            Region::Columns => "[columns]>",
            Region::FigureGroup => "[figures]>",
        }
    }
}

/// A paragraph's flattened text matched against one region's sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Open,
    Close,
}

impl Sentinel {
    pub fn parse(region: Region, text: &str) -> Option<Sentinel> {
        if text == region.open_sentinel() {
            Some(Sentinel::Open)
        } else if text == region.close_sentinel() {
            Some(Sentinel::Close)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionState {
    inside_columns: bool,
    inside_figure_group: bool,
}

impl RegionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, region: Region) -> bool {
        *self.flag(region)
    }

    /// Apply a sentinel. Returns `false` and leaves the state alone when the
    /// sentinel does not match the current state (opening an open region or
    /// closing a closed one).
    pub fn apply(&mut self, region: Region, sentinel: Sentinel) -> bool {
        let flag = self.flag_mut(region);
        match (sentinel, *flag) {
            (Sentinel::Open, false) => {
                *flag = true;
                true
            }
            (Sentinel::Close, true) => {
                *flag = false;
                true
            }
            _ => false,
        }
    }

    fn flag(&self, region: Region) -> &bool {
        match region {
            Region::Columns => &self.inside_columns,
            Region::FigureGroup => &self.inside_figure_group,
        }
    }

    fn flag_mut(&mut self, region: Region) -> &mut bool {
        match region {
            Region::Columns => &mut self.inside_columns,
            Region::FigureGroup => &mut self.inside_figure_group,
        }
    }
}

static COLUMN_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\[\[\[ *({FLOAT_PATTERN}) *\]\]\]$")).unwrap());

/// The width in `[[[ 0.5 ]]]`, if `text` is a column break marker.
pub fn column_break(text: &str) -> Option<&str> {
    COLUMN_BREAK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_start_closed() {
        let state = RegionState::new();
        assert!(!state.is_open(Region::Columns));
        assert!(!state.is_open(Region::FigureGroup));
    }

    #[test]
    fn test_open_then_close() {
        let mut state = RegionState::new();
        assert!(state.apply(Region::Columns, Sentinel::Open));
        assert!(state.is_open(Region::Columns));
        assert!(!state.is_open(Region::FigureGroup));
        assert!(state.apply(Region::Columns, Sentinel::Close));
        assert!(!state.is_open(Region::Columns));
    }

    #[test]
    fn test_unmatched_close_is_ignored() {
        let mut state = RegionState::new();
        assert!(!state.apply(Region::FigureGroup, Sentinel::Close));
        assert_eq!(state, RegionState::new());
    }

    #[test]
    fn test_reopen_is_ignored() {
        let mut state = RegionState::new();
        state.apply(Region::FigureGroup, Sentinel::Open);
        assert!(!state.apply(Region::FigureGroup, Sentinel::Open));
        assert!(state.is_open(Region::FigureGroup));
    }

    #[test]
    fn test_sentinel_parse_is_exact() {
        assert_eq!(
            Sentinel::parse(Region::Columns, "<[columns]"),
            Some(Sentinel::Open)
        );
        assert_eq!(
            Sentinel::parse(Region::FigureGroup, "[figures]>"),
            Some(Sentinel::Close)
        );
        assert_eq!(Sentinel::parse(Region::Columns, "<[figures]"), None);
        assert_eq!(Sentinel::parse(Region::Columns, " <[columns]"), None);
    }

    #[test]
    fn test_column_break_widths() {
        assert_eq!(column_break("[[[ 0.5 ]]]"), Some("0.5"));
        assert_eq!(column_break("[[[.3]]]"), Some(".3"));
        assert_eq!(column_break("[[[   12.  ]]]"), Some("12."));
        assert_eq!(column_break("[[[ . ]]]"), None);
        assert_eq!(column_break("[[[ 3cm ]]]"), None);
        assert_eq!(column_break("x [[[ 0.5 ]]]"), None);
    }
}
