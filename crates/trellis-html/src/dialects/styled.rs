//! CSS-in-JS component dialect.
//!
//! Every style-table entry becomes a `styled.<tag>` block bound to a
//! PascalCase identifier synthesized from the originating node's name;
//! markup references those identifiers as element tags.

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use std::collections::HashSet;

use super::{font_imports_markup, indent, strip_leading_newline, DialectRenderer, Rendered};
use crate::context::GenerationContext;
use crate::ir::{Content, Element};
use crate::style_table::Declaration;

pub struct StyledComponentsRenderer;

impl DialectRenderer for StyledComponentsRenderer {
    fn dialect_name(&self) -> &'static str {
        "styled-components"
    }

    fn render(&self, roots: &[Element], ctx: &GenerationContext<'_>) -> Rendered {
        let names = component_names(ctx);

        let markup: String = roots.iter().map(|el| render_element(el, &names)).collect();
        let markup = strip_leading_newline(markup);

        let blocks = styled_blocks(ctx, &names);
        let component_name = roots
            .first()
            .map(|el| react_component_name(&el.node_name))
            .unwrap_or_else(|| "App".to_string());

        let font_imports = font_imports_markup(ctx);
        let body = if font_imports.trim().is_empty() {
            indent(&markup, 4)
        } else {
            format!(
                "    <>\n{}\n{}\n    </>",
                indent(font_imports.trim(), 6),
                indent(&markup, 6)
            )
        };

        let mut source = String::new();
        source.push_str("import React from \"react\";\n");
        source.push_str("import styled from \"styled-components\";\n");
        if !blocks.is_empty() {
            source.push('\n');
            source.push_str(&blocks);
            source.push('\n');
        }
        source.push_str(&format!(
            "\nexport const {component_name} = () => {{\n  return (\n{body}\n  );\n}};"
        ));

        Rendered {
            markup: source,
            stylesheet: None,
        }
    }
}

/// Synthesize one unique component identifier per style-table entry.
fn component_names(ctx: &GenerationContext<'_>) -> IndexMap<String, String> {
    let mut names = IndexMap::new();
    let mut used = HashSet::new();
    for (class_name, entry) in ctx.styles.entries() {
        if entry.styles.is_empty() && entry.pseudo_styles.is_empty() {
            continue;
        }
        let base = if entry.node_name.trim().is_empty() {
            entry.element.to_case(Case::Pascal)
        } else {
            entry.node_name.to_case(Case::Pascal)
        };
        let mut name = format!("Styled{base}");
        let mut counter = 2;
        while !used.insert(name.clone()) {
            name = format!("Styled{base}{counter}");
            counter += 1;
        }
        names.insert(class_name.clone(), name);
    }
    names
}

fn styled_blocks(ctx: &GenerationContext<'_>, names: &IndexMap<String, String>) -> String {
    let mut blocks = Vec::new();
    for (class_name, entry) in ctx.styles.entries() {
        let Some(name) = names.get(class_name) else {
            continue;
        };
        let mut block = format!(
            "const {name} = styled.{}`\n  {}{}",
            entry.element,
            join_css(&entry.styles, ";\n  "),
            if entry.styles.is_empty() { "" } else { ";" }
        );
        if !entry.pseudo_styles.is_empty() {
            block.push_str(&format!(
                "\n\n  &::before {{\n    {};\n  }}",
                join_css(&entry.pseudo_styles, ";\n    ")
            ));
        }
        block.push_str("\n`;");
        blocks.push(block);
    }
    blocks.join("\n\n")
}

fn join_css(declarations: &[Declaration], separator: &str) -> String {
    declarations
        .iter()
        .map(Declaration::css)
        .collect::<Vec<_>>()
        .join(separator)
}

/// A valid PascalCase component identifier from a layer name.
fn react_component_name(node_name: &str) -> String {
    let name = node_name.to_case(Case::Pascal);
    if name.is_empty() {
        return "App".to_string();
    }
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        return format!("Component{name}");
    }
    name
}

fn component_for(element: &Element, names: &IndexMap<String, String>) -> String {
    element
        .class_name
        .as_ref()
        .and_then(|class| names.get(class))
        .cloned()
        .unwrap_or_else(|| format!("Styled{}", element.tag.to_case(Case::Pascal)))
}

fn render_element(element: &Element, names: &IndexMap<String, String>) -> String {
    let component = component_for(element, names);

    match &element.content {
        Content::Empty => {
            if let Some(src) = &element.src {
                format!("\n<{component} src=\"{src}\" />")
            } else {
                format!("\n<{component} />")
            }
        }
        Content::Children(children) => {
            let inner: String = children
                .iter()
                .map(|child| render_element(child, names))
                .collect();
            format!("\n<{component}>{}\n</{component}>", indent(&inner, 2))
        }
        Content::Raw(raw) => {
            format!("\n<{component}>\n{}</{component}>", indent(raw, 2))
        }
        Content::Text(runs) => {
            let content: String = if runs.len() == 1 {
                let run = &runs[0];
                match run.tag {
                    Some(inline_tag) => format!("<{inline_tag}>{}</{inline_tag}>", run.text),
                    None => run.text.clone(),
                }
            } else {
                runs.iter()
                    .map(|run| {
                        if let Some(name) =
                            run.class_name.as_ref().and_then(|class| names.get(class))
                        {
                            format!("<{name}>{}</{name}>", run.text)
                        } else {
                            let inline_tag = run.tag.unwrap_or("span");
                            format!("<{inline_tag}>{}</{inline_tag}>", run.text)
                        }
                    })
                    .collect()
            };
            format!("\n<{component}>{content}</{component}>")
        }
    }
}
