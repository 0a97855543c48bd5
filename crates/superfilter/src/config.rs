/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Ambient parameters for one filter run.

/// Target format for slide decks. Only this backend enables column regions.
pub const SLIDES_FORMAT: &str = "beamer";

/// Target format assumed when the host does not name one.
pub const DEFAULT_FORMAT: &str = "latex";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// The output format Pandoc passes as the first filter argument.
    pub format: String,
    /// Replace plain tables with a hand-built `tabular` environment.
    pub table_mode: bool,
}

impl FilterConfig {
    pub fn new(format: impl Into<String>) -> Self {
        FilterConfig {
            format: format.into(),
            table_mode: false,
        }
    }

    pub fn with_table_mode(mut self, table_mode: bool) -> Self {
        self.table_mode = table_mode;
        self
    }

    pub fn is_slides(&self) -> bool {
        self.format == SLIDES_FORMAT
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig::new(DEFAULT_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_latex_without_tables() {
        let config = FilterConfig::default();
        assert_eq!(config.format, "latex");
        assert!(!config.table_mode);
        assert!(!config.is_slides());
    }

    #[test]
    fn test_beamer_is_slides() {
        let config = FilterConfig::new("beamer").with_table_mode(true);
        assert!(config.is_slides());
        assert!(config.table_mode);
    }
}
