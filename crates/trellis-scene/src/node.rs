//! Visual node tree types.
//!
//! A [`Node`] mirrors one layer of a design-tool export: geometry and
//! paint fields shared by every layer, plus a [`NodeKind`] tag that
//! drives dispatch in the generators. Children are ordered in paint
//! z-order (later entries draw on top).

use serde::{Deserialize, Serialize};

use crate::paint::{Effect, Paint, StrokeAlign};

/// The shape/kind tag of a node.
///
/// Component-like kinds (`Component`, `ComponentSet`, `Instance`) render
/// exactly like frames; they stay distinct so callers can tell them
/// apart. Anything the generators do not understand deserializes to
/// `Unsupported` and is skipped with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    #[default]
    Rectangle,
    Ellipse,
    Group,
    Frame,
    Component,
    ComponentSet,
    Instance,
    Section,
    Text,
    Line,
    Vector,
    #[serde(other)]
    Unsupported,
}

impl NodeKind {
    /// Whether the kind behaves like a frame (auto-layout capable container).
    pub fn is_frame_like(&self) -> bool {
        matches!(
            self,
            NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    }

    /// Stable name used in style-table metadata and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Group => "GROUP",
            NodeKind::Frame => "FRAME",
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Section => "SECTION",
            NodeKind::Text => "TEXT",
            NodeKind::Line => "LINE",
            NodeKind::Vector => "VECTOR",
            NodeKind::Unsupported => "UNSUPPORTED",
        }
    }
}

/// Auto-layout direction of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Alignment of children along an auto-layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignVertical {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Line-height specification of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    #[default]
    Auto,
    Pixels {
        value: f64,
    },
    Percent {
        value: f64,
    },
}

/// Letter-spacing specification of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacing {
    Pixels { value: f64 },
    Percent { value: f64 },
}

impl Default for LetterSpacing {
    fn default() -> Self {
        LetterSpacing::Pixels { value: 0.0 }
    }
}

/// Text decoration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// Letter-case transform of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
}

/// OpenType feature flags that affect tag selection (sub/superscript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpenTypeFeatures {
    #[serde(rename = "SUBS", default)]
    pub subs: bool,
    #[serde(rename = "SUPS", default)]
    pub sups: bool,
}

/// One styled run of a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSegment {
    pub text: String,
    pub font_family: String,
    pub font_weight: u16,
    pub italic: bool,
    pub font_size: f64,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    pub fills: Vec<Paint>,
    pub text_decoration: TextDecoration,
    pub text_case: TextCase,
    pub open_type_features: OpenTypeFeatures,
}

impl Default for TextSegment {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: String::new(),
            font_weight: 400,
            italic: false,
            font_size: 16.0,
            line_height: LineHeight::default(),
            letter_spacing: LetterSpacing::default(),
            fills: Vec::new(),
            text_decoration: TextDecoration::default(),
            text_case: TextCase::default(),
            open_type_features: OpenTypeFeatures::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

/// One layer of the scene graph.
///
/// Every field is optional or defaulted: the generators defensively
/// no-op on whatever a partial export leaves out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, counter-clockwise positive.
    pub rotation: f64,
    /// Rotation inherited from elided group ancestors.
    pub cumulative_rotation: f64,

    #[serde(default = "default_true")]
    pub visible: bool,
    pub is_mask: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_align: StrokeAlign,
    pub stroke_weight: Option<f64>,
    pub stroke_top_weight: Option<f64>,
    pub stroke_right_weight: Option<f64>,
    pub stroke_bottom_weight: Option<f64>,
    pub stroke_left_weight: Option<f64>,

    pub corner_radius: Option<f64>,
    /// Per-corner radii `[top-left, top-right, bottom-right, bottom-left]`.
    pub rectangle_corner_radii: Option<[f64; 4]>,
    pub top_left_radius: Option<f64>,
    pub top_right_radius: Option<f64>,
    pub bottom_right_radius: Option<f64>,
    pub bottom_left_radius: Option<f64>,
    /// Corner smoothing coefficient in `0.0..=1.0`; values above zero
    /// switch rounded corners to squircle rendering.
    pub corner_smoothing: Option<f64>,

    pub clips_content: bool,

    pub layout_mode: LayoutMode,
    pub item_spacing: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub primary_axis_align_items: AxisAlign,
    pub counter_axis_align_items: AxisAlign,

    pub effects: Vec<Effect>,

    /// Whether the host can flatten this node to a standalone asset.
    pub can_be_flattened: bool,

    pub text_align_horizontal: TextAlignHorizontal,
    pub text_align_vertical: TextAlignVertical,
    /// Styled runs of a text node, in character order.
    pub segments: Vec<TextSegment>,

    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: NodeKind::default(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            cumulative_rotation: 0.0,
            visible: true,
            is_mask: false,
            opacity: 1.0,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_align: StrokeAlign::default(),
            stroke_weight: None,
            stroke_top_weight: None,
            stroke_right_weight: None,
            stroke_bottom_weight: None,
            stroke_left_weight: None,
            corner_radius: None,
            rectangle_corner_radii: None,
            top_left_radius: None,
            top_right_radius: None,
            bottom_right_radius: None,
            bottom_left_radius: None,
            corner_smoothing: None,
            clips_content: false,
            layout_mode: LayoutMode::default(),
            item_spacing: 0.0,
            padding_left: 0.0,
            padding_right: 0.0,
            padding_top: 0.0,
            padding_bottom: 0.0,
            primary_axis_align_items: AxisAlign::default(),
            counter_axis_align_items: AxisAlign::default(),
            effects: Vec::new(),
            can_be_flattened: false,
            text_align_horizontal: TextAlignHorizontal::default(),
            text_align_vertical: TextAlignVertical::default(),
            segments: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl Node {
    /// Net rotation including what elided ancestors contributed.
    pub fn total_rotation(&self) -> f64 {
        self.rotation + self.cumulative_rotation
    }

    /// First child, when it acts as a mask for this node's content.
    pub fn mask_child(&self) -> Option<&Node> {
        self.children.first().filter(|child| child.is_mask)
    }

    /// Top-most visible image fill, if any.
    pub fn top_image_fill(&self) -> Option<&Paint> {
        self.fills
            .iter()
            .rev()
            .find(|paint| matches!(paint, Paint::Image { .. }) && paint.is_visible())
    }

    pub fn has_image_fill(&self) -> bool {
        self.top_image_fill().is_some()
    }

    /// Children that take part in rendering: visible and not masks.
    pub fn renderable_children(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter(|child| child.visible && !child.is_mask)
    }
}
