//! Attribute-inline dialect: JSX markup with `style={{...}}` objects.

use super::{font_imports_markup, indent, strip_leading_newline, DialectRenderer, Rendered};
use crate::context::GenerationContext;
use crate::ir::{Content, Element};
use crate::style_table::inline_jsx;

pub struct JsxRenderer;

impl DialectRenderer for JsxRenderer {
    fn dialect_name(&self) -> &'static str {
        "jsx"
    }

    fn render(&self, roots: &[Element], ctx: &GenerationContext<'_>) -> Rendered {
        let markup: String = roots.iter().map(render_element).collect();
        let markup = strip_leading_newline(markup);

        // Declarations ride on the elements; the style table exists for
        // font bookkeeping only, so no stylesheet is produced.
        Rendered {
            markup: font_imports_markup(ctx) + &markup,
            stylesheet: None,
        }
    }
}

fn render_element(element: &Element) -> String {
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
            attrs.push_str(&format!(" className=\"{class_name}\""));
        }
    }
    if !element.styles.is_empty() {
        attrs.push_str(&format!(" style={{{{{}}}}}", inline_jsx(&element.styles)));
    }
    if let Some(src) = &element.src {
        attrs.push_str(&format!(" src=\"{src}\""));
    }

    let tag = &element.tag;
    match &element.content {
        Content::Empty => format!("{prefix}\n<{tag}{attrs} />"),
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
                            "<{inline_tag} style={{{{{}}}}}>{}</{inline_tag}>",
                            inline_jsx(&run.styles),
                            run.text
                        )
                    })
                    .collect()
            };
            format!("{prefix}\n<{tag}{attrs}>{content}</{tag}>")
        }
    }
}
