//! Per-node declaration assembly.
//!
//! A [`StyleBuilder`] collects the CSS declarations for one node:
//! position and size, shape (radius, squircle clip, overflow, masks),
//! paint (fills, borders, effects). The walker decides which of these
//! steps apply per node kind; the builder only knows how to emit them.

use trellis_scene::{AxisAlign, Effect, LayoutMode, Node, NodeKind, Paint, ScaleMode};

use crate::context::GenerationContext;
use crate::geometry::{fixed, resolve_corner_radius, should_use_squircle, CornerRadius};
use crate::gradient_border::{gradient_border, BorderSide};
use crate::paint::{
    css_color, fills_to_background, first_solid_color, is_gradient_stroke,
    scale_mode_to_background_repeat, scale_mode_to_background_size, scale_mode_to_object_fit,
};
use crate::squircle::squircle_path;
use crate::style_table::{decl, Declaration};

/// How the parent lays this node out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Top-level selection root: anchors its own children and overlays.
    Root,
    /// Absolutely positioned inside the parent's bounds.
    Absolute,
    /// Laid out by the parent's flex flow; no own position.
    Flex,
}

#[derive(Debug)]
pub struct StyleBuilder<'n> {
    node: &'n Node,
    placement: Placement,
    styles: Vec<Declaration>,
    pseudo_styles: Vec<Declaration>,
}

impl<'n> StyleBuilder<'n> {
    pub fn new(node: &'n Node, placement: Placement) -> Self {
        Self {
            node,
            placement,
            styles: Vec::new(),
            pseudo_styles: Vec::new(),
        }
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.styles.push(declaration);
    }

    pub fn extend(mut self, declarations: Vec<Declaration>) -> Self {
        self.styles.extend(declarations);
        self
    }

    fn has_property(&self, property: &str) -> bool {
        self.styles.iter().any(|d| d.property == property)
    }

    pub fn size(mut self) -> Self {
        self.styles
            .push(decl("width", format!("{}px", fixed(self.node.width))));
        self.styles
            .push(decl("height", format!("{}px", fixed(self.node.height))));
        self
    }

    /// Position within the parent plus rotation transform.
    pub fn position(mut self) -> Self {
        match self.placement {
            Placement::Root => {
                self.styles.push(decl("position", "relative"));
            }
            Placement::Absolute => {
                self.styles.push(decl("position", "absolute"));
                self.styles
                    .push(decl("left", format!("{}px", fixed(self.node.x))));
                self.styles
                    .push(decl("top", format!("{}px", fixed(self.node.y))));
            }
            Placement::Flex => {}
        }

        let rotation = -self.node.total_rotation().round();
        if rotation != 0.0 {
            self.styles
                .push(decl("transform", format!("rotate({}deg)", fixed(rotation))));
            self.styles.push(decl("transform-origin", "top left"));
        }
        self
    }

    pub fn opacity(mut self) -> Self {
        if self.node.opacity < 1.0 {
            self.styles
                .push(decl("opacity", fixed(self.node.opacity)));
        }
        self
    }

    /// Fills, corner shape, borders and effects, in paint order.
    pub fn shape(mut self) -> Self {
        if let Some(background) = fills_to_background(&self.node.fills) {
            self.styles.push(decl("background", background));
        }
        self.corner_shape();
        self.borders();
        self.effects();
        self
    }

    /// Background fill only; used by sections which keep their shape flat.
    pub fn background(mut self) -> Self {
        if let Some(background) = fills_to_background(&self.node.fills) {
            self.styles.push(decl("background", background));
        }
        self
    }

    /// Corner radius, squircle clip and mask-driven clipping.
    fn corner_shape(&mut self) {
        let node = self.node;

        // A mask child clips this container. Ellipse masks translate to
        // an exact clip shape; everything else only gets the overflow
        // fallback (partial support).
        if let Some(mask) = node.mask_child() {
            if mask.kind == NodeKind::Ellipse && node.width > 0.0 && node.height > 0.0 {
                let center_x = (mask.x + mask.width / 2.0) / node.width * 100.0;
                let center_y = (mask.y + mask.height / 2.0) / node.height * 100.0;
                let radius_x = mask.width / 2.0 / node.width * 100.0;
                let radius_y = mask.height / 2.0 / node.height * 100.0;
                self.styles.push(decl(
                    "clip-path",
                    format!(
                        "ellipse({radius_x:.2}% {radius_y:.2}% at {center_x:.2}% {center_y:.2}%)"
                    ),
                ));
            }
            self.styles.push(decl("overflow", "hidden"));
        }

        if !node.children.is_empty() && node.clips_content && !self.has_property("overflow") {
            self.styles.push(decl("overflow", "hidden"));
        }

        if node.kind == NodeKind::Ellipse {
            self.styles.push(decl("border-radius", "9999px"));
            if !self.has_property("overflow") {
                self.styles.push(decl("overflow", "hidden"));
            }
            return;
        }

        let radius = resolve_corner_radius(node);
        if should_use_squircle(&radius) && node.width > 0.0 && node.height > 0.0 {
            let path = squircle_path(node.width, node.height, &radius);
            if !path.is_empty() {
                self.styles.push(decl(
                    "clip-path",
                    format!("path('{}')", path.replace('\'', "\\'")),
                ));
                // Plain radius stays as a fallback for renderers without
                // path clipping.
                self.plain_radius(&radius);
                return;
            }
        }
        self.plain_radius(&radius);
    }

    fn plain_radius(&mut self, radius: &CornerRadius) {
        match *radius {
            CornerRadius::Uniform { radius, .. } => {
                if radius > 0.0 {
                    self.styles
                        .push(decl("border-radius", format!("{}px", fixed(radius))));
                }
            }
            CornerRadius::PerCorner { corners, .. } => {
                const PROPERTIES: [&str; 4] = [
                    "border-top-left-radius",
                    "border-top-right-radius",
                    "border-bottom-right-radius",
                    "border-bottom-left-radius",
                ];
                for (property, value) in PROPERTIES.iter().zip(corners) {
                    if value > 0.0 {
                        self.styles
                            .push(decl(*property, format!("{}px", fixed(value))));
                    }
                }
            }
        }
    }

    /// Solid borders, or the pseudo-element ring for gradient strokes.
    ///
    /// A gradient stroke fully replaces the plain border: the two paths
    /// never combine.
    fn borders(&mut self) {
        let node = self.node;
        let Some(width) = border_widths(node) else {
            return;
        };

        if is_gradient_stroke(&node.strokes) {
            let ring = gradient_border(&node.strokes, node.stroke_align, width);
            if ring.needs_pseudo_element {
                for declaration in ring.element_styles {
                    // An absolutely positioned element already anchors
                    // its overlay; don't fight the existing position.
                    if declaration.property == "position" && self.has_property("position") {
                        continue;
                    }
                    self.styles.push(declaration);
                }
                self.pseudo_styles = ring.pseudo_styles;
            }
            return;
        }

        let Some(color) = first_solid_color(&node.strokes) else {
            return;
        };
        match width {
            BorderSide::Uniform(width) if width > 0.0 => {
                self.styles
                    .push(decl("border", format!("{}px solid {color}", fixed(width))));
            }
            BorderSide::Uniform(_) => {}
            BorderSide::PerSide {
                top,
                right,
                bottom,
                left,
            } => {
                const SIDES: [&str; 4] =
                    ["border-top", "border-right", "border-bottom", "border-left"];
                for (property, value) in SIDES.iter().zip([top, right, bottom, left]) {
                    if value > 0.0 {
                        self.styles
                            .push(decl(*property, format!("{}px solid {color}", fixed(value))));
                    }
                }
            }
        }
    }

    fn effects(&mut self) {
        let node = self.node;
        let mut shadows = Vec::new();
        for effect in node.effects.iter().filter(|e| e.is_visible()) {
            match effect {
                Effect::DropShadow {
                    color,
                    offset,
                    radius,
                    spread,
                    ..
                } => shadows.push(shadow_css(*color, offset.x, offset.y, *radius, *spread, false)),
                Effect::InnerShadow {
                    color,
                    offset,
                    radius,
                    spread,
                    ..
                } => shadows.push(shadow_css(*color, offset.x, offset.y, *radius, *spread, true)),
                Effect::LayerBlur { radius, .. } => {
                    self.styles
                        .push(decl("filter", format!("blur({}px)", fixed(*radius))));
                }
                Effect::BackgroundBlur { radius, .. } => {
                    self.styles
                        .push(decl("backdrop-filter", format!("blur({}px)", fixed(*radius))));
                }
                Effect::Unsupported => {}
            }
        }
        if !shadows.is_empty() {
            self.styles.push(decl("box-shadow", shadows.join(", ")));
        }
    }

    /// Resolve the node's image fill into element styles.
    ///
    /// With children present the image becomes a background layer; a
    /// leaf node instead becomes an `<img>` element. Returns the image
    /// src when the element should render as an image tag.
    pub fn image_fill(&mut self, ctx: &mut GenerationContext<'_>) -> Option<String> {
        let node = self.node;
        let fill = node.top_image_fill()?;
        let Paint::Image {
            image_hash,
            scale_mode,
            scaling_factor,
            image_transform,
            rotation,
            ..
        } = fill
        else {
            return None;
        };

        let has_children = !node.children.is_empty();

        // Prefer the raw fill bytes for leaf nodes: exporting the node
        // would composite its background into the image.
        let url = image_hash
            .as_deref()
            .filter(|_| !has_children)
            .and_then(|hash| ctx.assets.export_image_from_hash(hash))
            .or_else(|| ctx.assets.export_image(node, has_children));
        let url = match url {
            Some(url) => url,
            None => {
                ctx.warn(format!(
                    "Image for \"{}\" could not be exported; rendering without image data.",
                    node.name
                ));
                String::new()
            }
        };

        if has_children {
            self.styles
                .push(decl("background-image", format!("url({url})")));

            let mut size = scale_mode_to_background_size(*scale_mode).to_string();
            if *scale_mode == ScaleMode::Tile {
                if let Some(factor) = scaling_factor {
                    size = format!("{}%", fixed(factor * 100.0));
                }
            }
            self.styles.push(decl("background-size", size));

            if matches!(scale_mode, ScaleMode::Fit | ScaleMode::Fill) {
                self.styles.push(decl("background-position", "center center"));
            }
            self.styles.push(decl("background-origin", "border-box"));
            self.styles.push(decl(
                "background-repeat",
                scale_mode_to_background_repeat(*scale_mode),
            ));

            let mut transforms = Vec::new();
            if let Some([[a, b, c], [d, e, f]]) = image_transform {
                transforms.push(format!("matrix({a}, {d}, {b}, {e}, {c}, {f})"));
            }
            if let Some(degrees) = rotation {
                if *degrees != 0.0 {
                    transforms.push(format!("rotate({}deg)", fixed(*degrees)));
                }
            }
            if !transforms.is_empty() {
                self.styles.push(decl("transform", transforms.join(" ")));
            }
            None
        } else {
            self.styles.push(decl(
                "object-fit",
                scale_mode_to_object_fit(*scale_mode),
            ));
            Some(url)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.pseudo_styles.is_empty()
    }

    pub fn build(self) -> (Vec<Declaration>, Vec<Declaration>) {
        (self.styles, self.pseudo_styles)
    }
}

fn shadow_css(
    color: trellis_scene::Color,
    x: f64,
    y: f64,
    blur: f64,
    spread: Option<f64>,
    inset: bool,
) -> String {
    let mut parts = Vec::new();
    if inset {
        parts.push("inset".to_string());
    }
    parts.push(format!("{}px", fixed(x)));
    parts.push(format!("{}px", fixed(y)));
    parts.push(format!("{}px", fixed(blur)));
    if let Some(spread) = spread {
        parts.push(format!("{}px", fixed(spread)));
    }
    parts.push(css_color(color, 1.0));
    parts.join(" ")
}

/// Border thickness from the node's stroke-weight fields.
pub fn border_widths(node: &Node) -> Option<BorderSide> {
    if let Some(weight) = node.stroke_weight {
        return (weight > 0.0).then_some(BorderSide::Uniform(weight));
    }
    let sides = [
        node.stroke_top_weight,
        node.stroke_right_weight,
        node.stroke_bottom_weight,
        node.stroke_left_weight,
    ];
    if sides.iter().any(Option::is_some) {
        let [top, right, bottom, left] = sides.map(|side| side.unwrap_or(0.0));
        return Some(BorderSide::PerSide {
            top,
            right,
            bottom,
            left,
        });
    }
    None
}

/// Flex declarations for an auto-layout frame.
pub fn auto_layout_styles(node: &Node) -> Vec<Declaration> {
    let mut styles = vec![decl("display", "flex")];
    if node.layout_mode == LayoutMode::Vertical {
        styles.push(decl("flex-direction", "column"));
    }

    let justify = match node.primary_axis_align_items {
        AxisAlign::Min | AxisAlign::Baseline => "flex-start",
        AxisAlign::Center => "center",
        AxisAlign::Max => "flex-end",
        AxisAlign::SpaceBetween => "space-between",
    };
    styles.push(decl("justify-content", justify));

    let align = match node.counter_axis_align_items {
        AxisAlign::Min | AxisAlign::SpaceBetween => "flex-start",
        AxisAlign::Center => "center",
        AxisAlign::Max => "flex-end",
        AxisAlign::Baseline => "baseline",
    };
    styles.push(decl("align-items", align));

    if node.item_spacing > 0.0 {
        styles.push(decl("gap", format!("{}px", fixed(node.item_spacing))));
    }

    let (top, right, bottom, left) = (
        node.padding_top,
        node.padding_right,
        node.padding_bottom,
        node.padding_left,
    );
    if top > 0.0 || right > 0.0 || bottom > 0.0 || left > 0.0 {
        let value = if top == right && top == bottom && top == left {
            format!("{}px", fixed(top))
        } else {
            format!(
                "{}px {}px {}px {}px",
                fixed(top),
                fixed(right),
                fixed(bottom),
                fixed(left)
            )
        };
        styles.push(decl("padding", value));
    }

    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_scene::{Color, GradientStop, StrokeAlign, Vec2};

    fn find<'a>(styles: &'a [Declaration], property: &str) -> Option<&'a str> {
        styles
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    fn gradient_stroke() -> Paint {
        Paint::LinearGradient {
            gradient_handle_positions: vec![Vec2 { x: 0.0, y: 0.0 }, Vec2 { x: 1.0, y: 1.0 }],
            gradient_stops: vec![
                GradientStop {
                    position: 0.0,
                    color: Color::WHITE,
                },
                GradientStop {
                    position: 1.0,
                    color: Color::BLACK,
                },
            ],
            opacity: None,
            visible: None,
        }
    }

    #[test]
    fn test_absolute_position_and_size() {
        let node = Node {
            x: 10.0,
            y: 20.5,
            width: 100.0,
            height: 50.0,
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Absolute)
            .size()
            .position()
            .build();
        assert_eq!(find(&styles, "position"), Some("absolute"));
        assert_eq!(find(&styles, "left"), Some("10px"));
        assert_eq!(find(&styles, "top"), Some("20.5px"));
        assert_eq!(find(&styles, "width"), Some("100px"));
    }

    #[test]
    fn test_rotation_transform() {
        let node = Node {
            rotation: 30.0,
            cumulative_rotation: 15.0,
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Flex).position().build();
        assert_eq!(find(&styles, "transform"), Some("rotate(-45deg)"));
        assert_eq!(find(&styles, "transform-origin"), Some("top left"));
    }

    #[test]
    fn test_ellipse_shape() {
        let node = Node {
            kind: NodeKind::Ellipse,
            width: 40.0,
            height: 40.0,
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Root).shape().build();
        assert_eq!(find(&styles, "border-radius"), Some("9999px"));
        assert_eq!(find(&styles, "overflow"), Some("hidden"));
    }

    #[test]
    fn test_squircle_emits_clip_path_and_fallback_radius() {
        let node = Node {
            width: 90.0,
            height: 108.0,
            corner_radius: Some(16.0),
            corner_smoothing: Some(1.0),
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Root).shape().build();
        let clip = find(&styles, "clip-path").unwrap();
        assert!(clip.starts_with("path('M "));
        assert_eq!(find(&styles, "border-radius"), Some("16px"));
    }

    #[test]
    fn test_zero_smoothing_has_no_clip_path() {
        let node = Node {
            width: 90.0,
            height: 108.0,
            corner_radius: Some(16.0),
            corner_smoothing: Some(0.0),
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Root).shape().build();
        assert_eq!(find(&styles, "clip-path"), None);
        assert_eq!(find(&styles, "border-radius"), Some("16px"));
    }

    #[test]
    fn test_ellipse_mask_child_clips_parent() {
        let node = Node {
            width: 200.0,
            height: 100.0,
            children: vec![Node {
                kind: NodeKind::Ellipse,
                is_mask: true,
                x: 50.0,
                y: 25.0,
                width: 100.0,
                height: 50.0,
                ..Node::default()
            }],
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Root).shape().build();
        assert_eq!(
            find(&styles, "clip-path"),
            Some("ellipse(25.00% 25.00% at 50.00% 50.00%)")
        );
        assert_eq!(find(&styles, "overflow"), Some("hidden"));
    }

    #[test]
    fn test_non_ellipse_mask_falls_back_to_overflow() {
        let node = Node {
            width: 200.0,
            height: 100.0,
            children: vec![Node {
                kind: NodeKind::Rectangle,
                is_mask: true,
                width: 100.0,
                height: 50.0,
                ..Node::default()
            }],
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Root).shape().build();
        assert_eq!(find(&styles, "clip-path"), None);
        assert_eq!(find(&styles, "overflow"), Some("hidden"));
    }

    #[test]
    fn test_gradient_stroke_replaces_solid_border() {
        let node = Node {
            width: 90.0,
            height: 108.0,
            strokes: vec![gradient_stroke()],
            stroke_weight: Some(1.0),
            stroke_align: StrokeAlign::Inside,
            ..Node::default()
        };
        let (styles, pseudo) = StyleBuilder::new(&node, Placement::Root)
            .position()
            .shape()
            .build();
        assert!(find(&styles, "border").is_none());
        assert!(!pseudo.is_empty());
        assert_eq!(find(&pseudo, "mask-composite"), Some("exclude"));
        // Root placement already set position: relative; the ring must
        // not duplicate it.
        assert_eq!(
            styles.iter().filter(|d| d.property == "position").count(),
            1
        );
    }

    #[test]
    fn test_solid_border() {
        let node = Node {
            strokes: vec![Paint::Solid {
                color: Color::BLACK,
                opacity: None,
                visible: None,
            }],
            stroke_weight: Some(2.0),
            ..Node::default()
        };
        let (styles, pseudo) = StyleBuilder::new(&node, Placement::Root).shape().build();
        assert_eq!(find(&styles, "border"), Some("2px solid #000000"));
        assert!(pseudo.is_empty());
    }

    #[test]
    fn test_blur_effects() {
        let node = Node {
            effects: vec![
                Effect::BackgroundBlur {
                    radius: 12.0,
                    visible: None,
                },
                Effect::LayerBlur {
                    radius: 4.0,
                    visible: Some(false),
                },
            ],
            ..Node::default()
        };
        let (styles, _) = StyleBuilder::new(&node, Placement::Root).shape().build();
        assert_eq!(find(&styles, "backdrop-filter"), Some("blur(12px)"));
        // Invisible effects are skipped.
        assert_eq!(find(&styles, "filter"), None);
    }

    #[test]
    fn test_auto_layout_row_with_gap_and_padding() {
        let node = Node {
            layout_mode: LayoutMode::Horizontal,
            item_spacing: 8.0,
            padding_top: 4.0,
            padding_right: 4.0,
            padding_bottom: 4.0,
            padding_left: 4.0,
            primary_axis_align_items: AxisAlign::SpaceBetween,
            counter_axis_align_items: AxisAlign::Center,
            ..Node::default()
        };
        let styles = auto_layout_styles(&node);
        assert_eq!(find(&styles, "display"), Some("flex"));
        assert_eq!(find(&styles, "flex-direction"), None);
        assert_eq!(find(&styles, "justify-content"), Some("space-between"));
        assert_eq!(find(&styles, "align-items"), Some("center"));
        assert_eq!(find(&styles, "gap"), Some("8px"));
        assert_eq!(find(&styles, "padding"), Some("4px"));
    }
}
