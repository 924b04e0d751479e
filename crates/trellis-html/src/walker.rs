//! Recursive scene traversal.
//!
//! Visits visible, non-mask nodes in document order (which is paint
//! z-order), dispatches on the node kind and lowers each into the
//! dialect-agnostic IR. All accumulation (classes, fonts, warnings)
//! happens through the per-run context; the scene itself is never
//! mutated.

use log::debug;
use trellis_scene::{LayoutMode, Node, NodeKind};

use crate::builder::{auto_layout_styles, Placement, StyleBuilder};
use crate::context::GenerationContext;
use crate::ir::{Content, Element};
use crate::style_table::{Declaration, StyleEntry};
use crate::text::{alignment_styles, text_runs};

/// Lower a list of sibling nodes.
pub fn walk(nodes: &[Node], ctx: &mut GenerationContext<'_>, placement: Placement) -> Vec<Element> {
    let mut elements = Vec::new();
    let renderable = nodes.iter().filter(|node| node.visible && !node.is_mask);
    for (index, node) in renderable.enumerate() {
        elements.extend(convert(node, ctx, placement, index));
    }
    elements
}

/// Lower one node. Groups may splice their children directly into the
/// parent, so the result is a list.
fn convert(
    node: &Node,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    if ctx.settings.embed_vectors && node.can_be_flattened {
        if let Some(svg) = ctx.assets.flatten_to_svg(node) {
            return svg_wrapper(node, svg, ctx, placement, z_index);
        }
    }

    match node.kind {
        NodeKind::Rectangle | NodeKind::Ellipse => {
            container(node, Vec::new(), Vec::new(), ctx, placement, z_index)
        }
        NodeKind::Group => group(node, ctx, placement, z_index),
        NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance => {
            frame(node, ctx, placement, z_index)
        }
        NodeKind::Section => section(node, ctx, placement, z_index),
        NodeKind::Text => text(node, ctx, placement, z_index),
        NodeKind::Line => line(node, ctx, placement, z_index),
        NodeKind::Vector => vector(node, ctx, placement, z_index),
        NodeKind::Unsupported => {
            ctx.warn(format!(
                "Node \"{}\" has an unsupported type and was skipped.",
                node.name
            ));
            Vec::new()
        }
    }
}

/// Generic container: position, shape, paint, optional image fill.
///
/// Nodes with a non-positive size render their children only; the
/// reference renderer hides zero-size boxes, so emitting a wrapper
/// would change output.
fn container(
    node: &Node,
    children: Vec<Element>,
    extra_styles: Vec<Declaration>,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    if node.width <= 0.0 || node.height <= 0.0 {
        return children;
    }

    let mut builder = StyleBuilder::new(node, placement)
        .size()
        .position()
        .opacity()
        .shape();

    let src = if node.has_image_fill() {
        builder.image_fill(ctx)
    } else {
        None
    };
    let tag = if src.is_some() { "img" } else { "div" };

    let (styles, pseudo_styles) = builder.extend(extra_styles).build();

    let class_name = ctx.class_for(node);
    ctx.styles.insert(
        class_name.clone(),
        StyleEntry {
            styles: styles.clone(),
            pseudo_styles: pseudo_styles.clone(),
            node_name: node.name.clone(),
            node_kind: node.kind.name(),
            element: tag.to_string(),
        },
    );

    let content = if children.is_empty() {
        Content::Empty
    } else {
        Content::Children(children)
    };

    vec![Element {
        tag: tag.to_string(),
        class_name: Some(class_name),
        styles,
        pseudo_styles,
        src,
        content,
        node_name: node.name.clone(),
        node_kind: node.kind.name(),
        z_index,
    }]
}

/// Groups vanish when degenerate, and even a live group only earns a
/// wrapper if it contributes declarations of its own.
fn group(
    node: &Node,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    if node.width <= 0.0 || node.height <= 0.0 || node.children.is_empty() {
        return walk(&node.children, ctx, placement);
    }

    let builder = StyleBuilder::new(node, placement)
        .size()
        .position()
        .opacity()
        .shape();
    let children = walk(&node.children, ctx, Placement::Absolute);
    if builder.is_empty() {
        return children;
    }

    let (styles, pseudo_styles) = builder.build();
    let class_name = ctx.class_for(node);
    ctx.styles.insert(
        class_name.clone(),
        StyleEntry {
            styles: styles.clone(),
            pseudo_styles: pseudo_styles.clone(),
            node_name: node.name.clone(),
            node_kind: node.kind.name(),
            element: "div".to_string(),
        },
    );

    vec![Element {
        tag: "div".to_string(),
        class_name: Some(class_name),
        styles,
        pseudo_styles,
        src: None,
        content: if children.is_empty() {
            Content::Empty
        } else {
            Content::Children(children)
        },
        node_name: node.name.clone(),
        node_kind: node.kind.name(),
        z_index,
    }]
}

/// Frames translate auto-layout into flex declarations, unless the
/// frame is rotated: flex layout is computed before CSS transforms, so
/// rotation plus flex would land children in the wrong place. Rotated
/// frames keep absolutely positioned children instead.
fn frame(
    node: &Node,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    let has_rotation = node.total_rotation().round() != 0.0;

    if node.layout_mode != LayoutMode::None && !has_rotation {
        let children = walk(&node.children, ctx, Placement::Flex);
        container(
            node,
            children,
            auto_layout_styles(node),
            ctx,
            placement,
            z_index,
        )
    } else {
        let children = walk(&node.children, ctx, Placement::Absolute);
        container(node, children, Vec::new(), ctx, placement, z_index)
    }
}

/// Sections always position absolutely and never join auto-layout.
fn section(
    node: &Node,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    let children = walk(&node.children, ctx, Placement::Absolute);

    let (styles, pseudo_styles) = StyleBuilder::new(node, placement)
        .size()
        .position()
        .background()
        .build();

    let class_name = ctx.class_for(node);
    ctx.styles.insert(
        class_name.clone(),
        StyleEntry {
            styles: styles.clone(),
            pseudo_styles: pseudo_styles.clone(),
            node_name: node.name.clone(),
            node_kind: node.kind.name(),
            element: "div".to_string(),
        },
    );

    vec![Element {
        tag: "div".to_string(),
        class_name: Some(class_name),
        styles,
        pseudo_styles,
        src: None,
        content: if children.is_empty() {
            Content::Empty
        } else {
            Content::Children(children)
        },
        node_name: node.name.clone(),
        node_kind: node.kind.name(),
        z_index,
    }]
}

/// Text nodes wrap their styled runs in one block container.
fn text(
    node: &Node,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    let (runs, merged_run_styles) = text_runs(node, ctx);

    let mut builder = StyleBuilder::new(node, placement)
        .size()
        .position()
        .opacity()
        .extend(alignment_styles(node));
    for declaration in merged_run_styles {
        builder.push(declaration);
    }
    let (styles, pseudo_styles) = builder.build();

    let class_name = ctx.class_for(node);
    ctx.styles.insert(
        class_name.clone(),
        StyleEntry {
            styles: styles.clone(),
            pseudo_styles: pseudo_styles.clone(),
            node_name: node.name.clone(),
            node_kind: node.kind.name(),
            // Component dialects promote text containers to paragraphs.
            element: "p".to_string(),
        },
    );

    vec![Element {
        tag: "div".to_string(),
        class_name: Some(class_name),
        styles,
        pseudo_styles,
        src: None,
        content: Content::Text(runs),
        node_name: node.name.clone(),
        node_kind: node.kind.name(),
        z_index,
    }]
}

/// Lines render as a zero-content positioned container, bypassing the
/// non-positive-size elision (a line's height is legitimately zero).
fn line(
    node: &Node,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    let (styles, pseudo_styles) = StyleBuilder::new(node, placement)
        .size()
        .position()
        .opacity()
        .shape()
        .build();

    let class_name = ctx.class_for(node);
    ctx.styles.insert(
        class_name.clone(),
        StyleEntry {
            styles: styles.clone(),
            pseudo_styles: pseudo_styles.clone(),
            node_name: node.name.clone(),
            node_kind: node.kind.name(),
            element: "div".to_string(),
        },
    );

    vec![Element {
        tag: "div".to_string(),
        class_name: Some(class_name),
        styles,
        pseudo_styles,
        src: None,
        content: Content::Empty,
        node_name: node.name.clone(),
        node_kind: node.kind.name(),
        z_index,
    }]
}

/// Vectors try the asset path first and degrade to a rectangular
/// placeholder that keeps the original geometry.
fn vector(
    node: &Node,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    if node.can_be_flattened {
        if let Some(svg) = ctx.assets.flatten_to_svg(node) {
            return svg_wrapper(node, svg, ctx, placement, z_index);
        }
    }

    if !ctx.settings.embed_vectors {
        ctx.warn(format!(
            "Vector \"{}\" could not be rendered as an asset; using rectangular fallback.",
            node.name
        ));
    }
    debug!("vector fallback for node \"{}\"", node.name);
    container(node, Vec::new(), Vec::new(), ctx, placement, z_index)
}

/// Positioned wrapper around flattened SVG markup.
fn svg_wrapper(
    node: &Node,
    svg: String,
    ctx: &mut GenerationContext<'_>,
    placement: Placement,
    z_index: usize,
) -> Vec<Element> {
    if svg.is_empty() {
        return Vec::new();
    }

    let (styles, pseudo_styles) = StyleBuilder::new(node, placement).position().build();
    let class_name = ctx.class_for(node);
    ctx.styles.insert(
        class_name.clone(),
        StyleEntry {
            styles: styles.clone(),
            pseudo_styles: pseudo_styles.clone(),
            node_name: node.name.clone(),
            node_kind: node.kind.name(),
            element: "div".to_string(),
        },
    );

    vec![Element {
        tag: "div".to_string(),
        class_name: Some(class_name),
        styles,
        pseudo_styles,
        src: None,
        content: Content::Raw(svg),
        node_name: node.name.clone(),
        node_kind: node.kind.name(),
        z_index,
    }]
}
