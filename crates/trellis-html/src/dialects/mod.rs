//! Dialect renderers.
//!
//! The walker produces one dialect-agnostic tree; each renderer here is
//! a strategy that serializes that tree plus the run's style table and
//! font manifest into one output dialect.

mod html;
mod jsx;
mod styled;
mod svelte;

pub use html::HtmlRenderer;
pub use jsx::JsxRenderer;
pub use styled::StyledComponentsRenderer;
pub use svelte::SvelteRenderer;

use crate::context::GenerationContext;
use crate::ir::Element;
use crate::settings::GenerationMode;

/// Markup plus the optional standalone stylesheet.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub markup: String,
    pub stylesheet: Option<String>,
}

/// A renderer turns the IR into one output dialect.
pub trait DialectRenderer {
    /// Dialect name, for diagnostics.
    fn dialect_name(&self) -> &'static str;

    fn render(&self, roots: &[Element], ctx: &GenerationContext<'_>) -> Rendered;
}

/// Pick the renderer for a generation mode.
pub fn renderer_for(mode: GenerationMode) -> Box<dyn DialectRenderer> {
    match mode {
        GenerationMode::Html => Box::new(HtmlRenderer),
        GenerationMode::Jsx => Box::new(JsxRenderer),
        GenerationMode::StyledComponents => Box::new(StyledComponentsRenderer),
        GenerationMode::Svelte => Box::new(SvelteRenderer),
    }
}

/// Baseline reset prepended to markup output so the generated absolute
/// geometry is not offset by user-agent defaults.
pub(crate) const RESET_STYLESHEET: &str = "/* Baseline reset */
* {
  box-sizing: border-box;
}

body, p, span, div {
  margin: 0;
  padding: 0;
  border: 0;
  font: inherit;
  vertical-align: baseline;
}

body {
  line-height: 1;
  -webkit-font-smoothing: antialiased;
  -moz-osx-font-smoothing: grayscale;
}";

/// Indent every non-empty line by `spaces`.
pub(crate) fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop the leading newline every element fragment starts with.
pub(crate) fn strip_leading_newline(mut markup: String) -> String {
    if markup.starts_with('\n') {
        markup.remove(0);
    }
    markup
}

/// Reset stylesheet plus font-import directives as markup tags.
///
/// Used by the markup-first dialects; ends with a blank line so node
/// markup follows cleanly.
pub(crate) fn font_imports_markup(ctx: &GenerationContext<'_>) -> String {
    let mut parts = vec![format!("<style>\n{RESET_STYLESHEET}\n</style>")];

    if ctx.fonts.has_fonts() {
        let manifest = ctx
            .fonts
            .manifest(ctx.font_provider, &ctx.settings.custom_font_base_url);
        if let Some(summary) = manifest.summary {
            parts.push(format!("<!-- {} -->", summary.replace('\n', "\n     ")));
        }
        if let Some(url) = manifest.web_fonts_url {
            parts.push("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">".to_string());
            parts.push(
                "<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin>"
                    .to_string(),
            );
            parts.push(format!("<link href=\"{url}\" rel=\"stylesheet\">"));
        }
        if let Some(faces) = manifest.font_faces {
            parts.push(format!("<style>\n{faces}\n</style>"));
        }
    }

    parts.join("\n") + "\n\n"
}

/// Font-import directives as CSS, for scoped style blocks.
pub(crate) fn font_imports_css(ctx: &GenerationContext<'_>) -> String {
    if !ctx.fonts.has_fonts() {
        return String::new();
    }
    let manifest = ctx
        .fonts
        .manifest(ctx.font_provider, &ctx.settings.custom_font_base_url);

    let mut parts = Vec::new();
    if let Some(summary) = manifest.summary {
        parts.push(format!("/* {} */", summary.replace('\n', "\n   ")));
    }
    if let Some(url) = manifest.web_fonts_url {
        parts.push(format!("@import url('{url}');"));
    }
    if let Some(faces) = manifest.font_faces {
        parts.push(faces);
    }

    if parts.is_empty() {
        String::new()
    } else {
        parts.join("\n\n") + "\n\n"
    }
}
