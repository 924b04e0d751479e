//! Scoped-style component dialect.
//!
//! Markup references generated classes; all rules land in a trailing
//! `<style>` block. Semantic tags win over the generic container tag:
//! paragraphs for text, images for image-only nodes, button/anchor
//! heuristics from the layer name.

use super::{font_imports_css, indent, strip_leading_newline, DialectRenderer, Rendered};
use crate::context::GenerationContext;
use crate::ir::{Content, Element};

pub struct SvelteRenderer;

impl DialectRenderer for SvelteRenderer {
    fn dialect_name(&self) -> &'static str {
        "svelte"
    }

    fn render(&self, roots: &[Element], ctx: &GenerationContext<'_>) -> Rendered {
        let markup: String = roots.iter().map(render_element).collect();
        let markup = strip_leading_newline(markup);

        let rules = ctx.styles.render_css();
        let imports = font_imports_css(ctx);

        let component = format!("{markup}\n\n<style>\n{imports}{rules}\n</style>");

        Rendered {
            markup: component,
            stylesheet: None,
        }
    }
}

/// Semantic tag selection.
fn semantic_tag(element: &Element) -> &'static str {
    if element.node_kind == "TEXT" {
        return "p";
    }
    if element.tag == "img" {
        return "img";
    }
    let name = element.node_name.to_lowercase();
    if name.contains("button") || name.contains("btn") {
        "button"
    } else if name.contains("link") {
        "a"
    } else {
        "div"
    }
}

fn render_element(element: &Element) -> String {
    let tag = semantic_tag(element);

    let mut attrs = String::new();
    if let Some(class_name) = &element.class_name {
        attrs.push_str(&format!(" class=\"{class_name}\""));
    }
    if let Some(src) = &element.src {
        attrs.push_str(&format!(" src=\"{src}\""));
    }

    match &element.content {
        Content::Empty => {
            if tag == "img" {
                format!("\n<img{attrs} />")
            } else {
                format!("\n<{tag}{attrs}></{tag}>")
            }
        }
        Content::Children(children) => {
            let inner: String = children.iter().map(render_element).collect();
            format!("\n<{tag}{attrs}>{}\n</{tag}>", indent(&inner, 2))
        }
        Content::Raw(raw) => format!("\n<{tag}{attrs}>\n{}</{tag}>", indent(raw, 2)),
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
                        let inline_tag = run.tag.unwrap_or("span");
                        match &run.class_name {
                            Some(class) => format!(
                                "<{inline_tag} class=\"{class}\">{}</{inline_tag}>",
                                run.text
                            ),
                            None => format!("<{inline_tag}>{}</{inline_tag}>", run.text),
                        }
                    })
                    .collect()
            };
            format!("\n<{tag}{attrs}>{content}</{tag}>")
        }
    }
}
