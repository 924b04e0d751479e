//! Style table: class-name allocation and collected CSS rules.
//!
//! Every element with styles gets an entry here regardless of dialect;
//! inline dialects ignore the table at render time while the
//! component-oriented dialects read it back as rule blocks.

use convert_case::{Case, Casing};
use indexmap::IndexMap;

/// One CSS declaration, property stored in kebab-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Shorthand constructor for a declaration.
pub fn decl(property: impl Into<String>, value: impl Into<String>) -> Declaration {
    Declaration {
        property: property.into(),
        value: value.into(),
    }
}

impl Declaration {
    /// `property: value` as written in stylesheets and style attributes.
    pub fn css(&self) -> String {
        format!("{}: {}", self.property, self.value)
    }

    /// `camelCaseProperty: 'value'` as written in JSX style objects.
    pub fn jsx(&self) -> String {
        format!(
            "{}: '{}'",
            self.property.to_case(Case::Camel),
            self.value.replace('\'', "\\'")
        )
    }
}

/// Join declarations into an inline `style` attribute body.
pub fn inline_css(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(Declaration::css)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Join declarations into a JSX style object body.
pub fn inline_jsx(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(Declaration::jsx)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A collected style rule for one generated class.
#[derive(Debug, Clone, Default)]
pub struct StyleEntry {
    pub styles: Vec<Declaration>,
    /// Declarations for an adjacent `::before` rule (gradient borders).
    pub pseudo_styles: Vec<Declaration>,
    pub node_name: String,
    pub node_kind: &'static str,
    /// Base element tag the class was attached to.
    pub element: String,
}

/// Per-run table of generated classes, in insertion order.
#[derive(Debug, Default)]
pub struct StyleTable {
    entries: IndexMap<String, StyleEntry>,
    counters: IndexMap<String, usize>,
}

/// Sanitize a class-name prefix to an identifier-safe token.
///
/// Strips everything outside `[A-Za-z0-9_-]`, rewrites a leading
/// digit/underscore/hyphen, and falls back to `node` when nothing
/// survives.
pub fn sanitize_class(prefix: &str) -> String {
    let mut cleaned: String = prefix
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_')
        .collect();
    if let Some(first) = cleaned.chars().next() {
        if first.is_ascii_digit() || first == '-' || first == '_' {
            cleaned.replace_range(0..1, "n");
        }
    }
    if cleaned.is_empty() {
        "node".to_string()
    } else {
        cleaned
    }
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a unique class name for the given prefix.
    ///
    /// The first use of a sanitized prefix returns it unchanged; later
    /// collisions get a zero-padded numeric suffix.
    pub fn class_name(&mut self, prefix: &str) -> String {
        let sanitized = sanitize_class(prefix);
        let count = self.counters.entry(sanitized.clone()).or_insert(0);
        let name = if *count == 0 {
            sanitized.clone()
        } else {
            format!("{sanitized}_{count:02}")
        };
        *count += 1;
        name
    }

    pub fn insert(&mut self, class_name: String, entry: StyleEntry) {
        self.entries.insert(class_name, entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &StyleEntry)> {
        self.entries.iter()
    }

    pub fn get(&self, class_name: &str) -> Option<&StyleEntry> {
        self.entries.get(class_name)
    }

    /// Render all entries as stylesheet rule blocks.
    pub fn render_css(&self) -> String {
        let mut blocks = Vec::new();
        for (class_name, entry) in &self.entries {
            if !entry.styles.is_empty() {
                blocks.push(format!(
                    ".{class_name} {{\n  {};\n}}",
                    entry
                        .styles
                        .iter()
                        .map(Declaration::css)
                        .collect::<Vec<_>>()
                        .join(";\n  ")
                ));
            }
            if !entry.pseudo_styles.is_empty() {
                blocks.push(format!(
                    ".{class_name}::before {{\n  {};\n}}",
                    entry
                        .pseudo_styles
                        .iter()
                        .map(Declaration::css)
                        .collect::<Vec<_>>()
                        .join(";\n  ")
                ));
            }
        }
        blocks.join("\n\n")
    }
}
