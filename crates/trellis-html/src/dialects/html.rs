//! Plain markup dialect: inline styles plus a separate stylesheet.

use super::{font_imports_markup, indent, strip_leading_newline, DialectRenderer, Rendered};
use crate::context::GenerationContext;
use crate::ir::{Content, Element};
use crate::style_table::inline_css;

pub struct HtmlRenderer;

impl DialectRenderer for HtmlRenderer {
    fn dialect_name(&self) -> &'static str {
        "html"
    }

    fn render(&self, roots: &[Element], ctx: &GenerationContext<'_>) -> Rendered {
        let markup: String = roots.iter().map(render_element).collect();
        let markup = strip_leading_newline(markup);

        let stylesheet = if ctx.styles.is_empty() {
            None
        } else {
            Some(ctx.styles.render_css())
        };

        Rendered {
            markup: font_imports_markup(ctx) + &markup,
            stylesheet,
        }
    }
}

fn render_element(element: &Element) -> String {
    // Pseudo-element rules cannot live in a style attribute; they get
    // an adjacent style tag targeting the element's class.
    let mut prefix = String::new();
    let mut attrs = String::new();
    if !element.pseudo_styles.is_empty() {
        if let Some(class_name) = &element.class_name {
            prefix = format!(
                "\n<style>\n.{class_name}::before {{\n  {};\n}}\n</style>",
                element
                    .pseudo_styles
                    .iter()
                    .map(|d| d.css())
                    .collect::<Vec<_>>()
                    .join(";\n  ")
            );
            attrs.push_str(&format!(" class=\"{class_name}\""));
        }
    }
    if !element.styles.is_empty() {
        attrs.push_str(&format!(" style=\"{}\"", inline_css(&element.styles)));
    }
    if let Some(src) = &element.src {
        attrs.push_str(&format!(" src=\"{src}\""));
    }

    let tag = &element.tag;
    match &element.content {
        Content::Empty => {
            if tag == "img" {
                format!("{prefix}\n<img{attrs} />")
            } else {
                format!("{prefix}\n<{tag}{attrs}></{tag}>")
            }
        }
        Content::Children(children) => {
            let inner: String = children.iter().map(render_element).collect();
            format!("{prefix}\n<{tag}{attrs}>{}\n</{tag}>", indent(&inner, 2))
        }
        Content::Raw(raw) => {
            format!("{prefix}\n<{tag}{attrs}>\n{}</{tag}>", indent(raw, 2))
        }
        Content::Text(runs) => {
            let content = if runs.len() == 1 {
                let run = &runs[0];
                match run.tag {
                    Some(inline_tag) => format!("<{inline_tag}>{}</{inline_tag}>", run.text),
                    None => run.text.clone(),
                }
            } else {
                runs.iter()
                    .map(|run| {
                        let inline_tag = run.tag.unwrap_or("span");
                        format!(
                            "<{inline_tag} style=\"{}\">{}</{inline_tag}>",
                            inline_css(&run.styles),
                            run.text
                        )
                    })
                    .collect()
            };
            format!("{prefix}\n<{tag}{attrs}>{content}</{tag}>")
        }
    }
}
