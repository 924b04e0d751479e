//! Per-run generation context.
//!
//! One context exists per generation run and owns everything the
//! builders accumulate across the traversal: the style table, the font
//! registry, class-name counters and the warning list. Creating a fresh
//! context per run is what keeps unrelated runs from leaking state into
//! each other.

use indexmap::IndexSet;
use log::warn;
use trellis_scene::Node;

use crate::assets::{AssetExporter, FontProvider};
use crate::fonts::FontCollector;
use crate::settings::Settings;
use crate::style_table::StyleTable;

pub struct GenerationContext<'a> {
    pub settings: &'a Settings,
    pub assets: &'a dyn AssetExporter,
    pub font_provider: &'a dyn FontProvider,
    pub styles: StyleTable,
    pub fonts: FontCollector,
    warnings: IndexSet<String>,
    preview: bool,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        settings: &'a Settings,
        assets: &'a dyn AssetExporter,
        font_provider: &'a dyn FontProvider,
        preview: bool,
    ) -> Self {
        Self {
            settings,
            assets,
            font_provider,
            styles: StyleTable::new(),
            fonts: FontCollector::new(),
            warnings: IndexSet::new(),
            preview,
        }
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Record a degraded-rendering warning. Preview runs stay silent.
    pub fn warn(&mut self, message: impl Into<String>) {
        if self.preview {
            return;
        }
        let message = message.into();
        warn!("{message}");
        self.warnings.insert(message);
    }

    /// Allocate a class name derived from the node's own name.
    pub fn class_for(&mut self, node: &Node) -> String {
        self.styles.class_name(&node.name)
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        self.warnings.drain(..).collect()
    }
}
