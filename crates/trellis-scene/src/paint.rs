//! Paint, gradient and effect types.

use serde::{Deserialize, Serialize};

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "one")]
    pub a: f64,
}

fn one() -> f64 {
    1.0
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to 8-bit RGB components (alpha is kept separate).
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A 2D point used by gradient handles, normalized to the node's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// A color stop along a gradient axis, position in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

/// How an image fill maps onto its node's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
    Stretch,
}

/// A single entry of a fill or stroke paint list.
///
/// The list is ordered bottom-to-top; an absent `visible` flag means the
/// paint is visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Paint {
    #[serde(rename = "SOLID", rename_all = "camelCase")]
    Solid {
        color: Color,
        #[serde(default)]
        opacity: Option<f64>,
        #[serde(default)]
        visible: Option<bool>,
    },
    #[serde(rename = "GRADIENT_LINEAR", rename_all = "camelCase")]
    LinearGradient {
        #[serde(default)]
        gradient_handle_positions: Vec<Vec2>,
        #[serde(default)]
        gradient_stops: Vec<GradientStop>,
        #[serde(default)]
        opacity: Option<f64>,
        #[serde(default)]
        visible: Option<bool>,
    },
    #[serde(rename = "IMAGE", rename_all = "camelCase")]
    Image {
        #[serde(default)]
        image_hash: Option<String>,
        #[serde(default)]
        scale_mode: ScaleMode,
        #[serde(default)]
        scaling_factor: Option<f64>,
        /// 2x3 affine matrix `[[a, b, c], [d, e, f]]` applied to the image.
        #[serde(default)]
        image_transform: Option<[[f64; 3]; 2]>,
        /// Extra rotation in degrees, on top of the transform.
        #[serde(default)]
        rotation: Option<f64>,
        #[serde(default)]
        opacity: Option<f64>,
        #[serde(default)]
        visible: Option<bool>,
    },
    /// Paint kind this compiler does not render (radial gradients,
    /// videos, ...). Kept so one exotic paint cannot fail a whole
    /// scene import; it is treated as invisible.
    #[serde(other)]
    Unsupported,
}

impl Paint {
    /// A paint is visible unless its flag is explicitly `false`.
    pub fn is_visible(&self) -> bool {
        let flag = match self {
            Paint::Solid { visible, .. }
            | Paint::LinearGradient { visible, .. }
            | Paint::Image { visible, .. } => visible,
            Paint::Unsupported => return false,
        };
        *flag != Some(false)
    }

    /// Paint-level opacity multiplier, defaulting to fully opaque.
    pub fn opacity(&self) -> f64 {
        let value = match self {
            Paint::Solid { opacity, .. }
            | Paint::LinearGradient { opacity, .. }
            | Paint::Image { opacity, .. } => opacity,
            Paint::Unsupported => &None,
        };
        value.unwrap_or(1.0)
    }
}

/// Where a stroke is drawn relative to the shape boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    #[default]
    Inside,
    Center,
    Outside,
}

/// Shadow offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShadowOffset {
    pub x: f64,
    pub y: f64,
}

/// A visual effect attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    #[serde(rename = "DROP_SHADOW", rename_all = "camelCase")]
    DropShadow {
        color: Color,
        #[serde(default)]
        offset: ShadowOffset,
        #[serde(default)]
        radius: f64,
        #[serde(default)]
        spread: Option<f64>,
        #[serde(default)]
        visible: Option<bool>,
    },
    #[serde(rename = "INNER_SHADOW", rename_all = "camelCase")]
    InnerShadow {
        color: Color,
        #[serde(default)]
        offset: ShadowOffset,
        #[serde(default)]
        radius: f64,
        #[serde(default)]
        spread: Option<f64>,
        #[serde(default)]
        visible: Option<bool>,
    },
    #[serde(rename = "LAYER_BLUR", rename_all = "camelCase")]
    LayerBlur {
        #[serde(default)]
        radius: f64,
        #[serde(default)]
        visible: Option<bool>,
    },
    #[serde(rename = "BACKGROUND_BLUR", rename_all = "camelCase")]
    BackgroundBlur {
        #[serde(default)]
        radius: f64,
        #[serde(default)]
        visible: Option<bool>,
    },
    /// Effect kind this compiler does not render; treated as invisible.
    #[serde(other)]
    Unsupported,
}

impl Effect {
    pub fn is_visible(&self) -> bool {
        let flag = match self {
            Effect::DropShadow { visible, .. }
            | Effect::InnerShadow { visible, .. }
            | Effect::LayerBlur { visible, .. }
            | Effect::BackgroundBlur { visible, .. } => visible,
            Effect::Unsupported => return false,
        };
        *flag != Some(false)
    }
}
