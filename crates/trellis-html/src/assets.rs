//! Collaborator contracts for asset and font resolution.
//!
//! The compiler never talks to the host design tool directly; image
//! export and font byte lookup go through these traits. Every method
//! may fail by returning `None`, in which case the caller degrades to
//! a placeholder or a URL fallback and the run continues.

use trellis_scene::Node;

/// Exports image and vector assets for nodes.
pub trait AssetExporter {
    /// Rasterize a node to a data URI.
    ///
    /// `has_children` signals that the node is a container whose
    /// composite (not just its own fill) should be captured.
    fn export_image(&self, node: &Node, has_children: bool) -> Option<String>;

    /// Fetch the raw image behind a fill hash as a data URI.
    ///
    /// Preferred over [`AssetExporter::export_image`] when a direct
    /// hash is available: exporting the node would bake the node's
    /// background into the pixels.
    fn export_image_from_hash(&self, hash: &str) -> Option<String>;

    /// Flatten a vector-capable node to standalone SVG markup.
    fn flatten_to_svg(&self, node: &Node) -> Option<String>;
}

/// An exporter for hosts without export capability; every node falls
/// back to its placeholder rendering.
#[derive(Debug, Default)]
pub struct NullAssetExporter;

impl AssetExporter for NullAssetExporter {
    fn export_image(&self, _node: &Node, _has_children: bool) -> Option<String> {
        None
    }

    fn export_image_from_hash(&self, _hash: &str) -> Option<String> {
        None
    }

    fn flatten_to_svg(&self, _node: &Node) -> Option<String> {
        None
    }
}

/// Looks up embeddable font bytes.
pub trait FontProvider {
    /// Base64-encoded woff2 bytes for a family/weight pair, when the
    /// host has them. `None` falls back to a conventional URL.
    fn font_bytes(&self, family: &str, weight: u16) -> Option<String>;
}

/// Provider with no embedded fonts; all faces use URL sources.
#[derive(Debug, Default)]
pub struct NoEmbeddedFonts;

impl FontProvider for NoEmbeddedFonts {
    fn font_bytes(&self, _family: &str, _weight: u16) -> Option<String> {
        None
    }
}
