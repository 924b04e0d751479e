//! Scene-graph to HTML/CSS compiler.
//!
//! Walks a design-tool scene graph once and emits markup plus styles in
//! one of four dialects: plain HTML, JSX with inline styles, CSS-in-JS
//! component source, or component markup with a scoped style block.
//!
//! # Example
//!
//! ```
//! use trellis_html::{HtmlGenerator, NoEmbeddedFonts, NullAssetExporter, Settings};
//! use trellis_scene::parse_scene;
//!
//! let nodes = parse_scene(r#"{"type": "RECTANGLE", "name": "Box",
//!     "width": 100, "height": 50, "fills": [
//!         {"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}
//!     ]}"#).unwrap();
//!
//! let settings = Settings::default();
//! let generator = HtmlGenerator::new(&settings, &NullAssetExporter, &NoEmbeddedFonts);
//! let output = generator.generate(&nodes);
//! assert!(output.markup.contains("background: #ffffff"));
//! ```

pub mod assets;
pub mod builder;
pub mod context;
pub mod dialects;
pub mod fonts;
pub mod geometry;
pub mod gradient_border;
pub mod ir;
pub mod paint;
pub mod settings;
pub mod squircle;
pub mod style_table;
pub mod text;
pub mod walker;

pub use assets::{AssetExporter, FontProvider, NoEmbeddedFonts, NullAssetExporter};
pub use settings::{GenerationMode, Settings};

use log::debug;
use trellis_scene::Node;

use crate::builder::Placement;
use crate::context::GenerationContext;
use crate::dialects::renderer_for;
use crate::walker::walk;

/// Result of one generation run.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub markup: String,
    /// Populated for the plain dialect when class-based declarations
    /// exist; the other dialects carry their styles in the markup.
    pub stylesheet: Option<String>,
    /// Degraded-rendering notes; the only failure channel.
    pub warnings: Vec<String>,
}

/// Result of a preview run, sized for the host's preview pane.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    pub content: String,
    pub width: f64,
    pub height: f64,
}

/// The compiler entry point; borrows its collaborators per run.
pub struct HtmlGenerator<'a> {
    settings: &'a Settings,
    assets: &'a dyn AssetExporter,
    fonts: &'a dyn FontProvider,
}

impl<'a> HtmlGenerator<'a> {
    pub fn new(
        settings: &'a Settings,
        assets: &'a dyn AssetExporter,
        fonts: &'a dyn FontProvider,
    ) -> Self {
        Self {
            settings,
            assets,
            fonts,
        }
    }

    /// Compile the given roots with the configured dialect.
    pub fn generate(&self, nodes: &[Node]) -> Output {
        run(self.settings, self.assets, self.fonts, nodes, false)
    }

    /// Compile for the live preview pane.
    ///
    /// Always uses the plain dialect and stays silent on degraded
    /// nodes; multi-node selections are wrapped in one sizing container
    /// whose reported box is max-width by summed-height.
    pub fn generate_preview(&self, nodes: &[Node]) -> Preview {
        let mut settings = self.settings.clone();
        settings.html_generation_mode = GenerationMode::Html;

        let output = run(&settings, self.assets, self.fonts, nodes, true);

        let content = if nodes.len() > 1 {
            format!(
                "<div style=\"width: 100%; height: 100%\">{}</div>",
                output.markup
            )
        } else {
            output.markup
        };

        Preview {
            content,
            width: nodes.iter().map(|node| node.width).fold(0.0, f64::max),
            height: nodes.iter().map(|node| node.height).sum(),
        }
    }
}

fn run(
    settings: &Settings,
    assets: &dyn AssetExporter,
    fonts: &dyn FontProvider,
    nodes: &[Node],
    preview: bool,
) -> Output {
    let mut ctx = GenerationContext::new(settings, assets, fonts, preview);
    let renderer = renderer_for(settings.html_generation_mode);
    debug!(
        "generating {} output for {} root node(s)",
        renderer.dialect_name(),
        nodes.len()
    );

    let ir = walk(nodes, &mut ctx, Placement::Root);
    let rendered = renderer.render(&ir, &ctx);

    Output {
        markup: rendered.markup,
        stylesheet: rendered.stylesheet,
        warnings: ctx.take_warnings(),
    }
}
