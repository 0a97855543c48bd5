/*
 * attr.rs
 * Copyright (c) 2025 Posit, PBC
 */

use hashlink::LinkedHashMap;

pub fn empty_attr() -> Attr {
    (String::new(), vec![], LinkedHashMap::new())
}

/// Pandoc's `(identifier, classes, key-value pairs)` triple.
pub type Attr = (String, Vec<String>, LinkedHashMap<String, String>);

/// Look up a key-value attribute by name.
pub fn attr_value<'a>(attr: &'a Attr, key: &str) -> Option<&'a str> {
    attr.2.get(key).map(String::as_str)
}
