//! Geometry and text-metric primitives.
//!
//! Pure functions translating node geometry fields into the values the
//! builders emit. All numeric output goes through [`fixed`] so generated
//! declarations never carry sub-pixel noise.

use trellis_scene::{LetterSpacing, LineHeight, Node};

/// Format a number for CSS output: at most two decimals, trailing
/// zeros stripped, negative zero normalized.
pub fn fixed(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Resolved corner radius of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerRadius {
    Uniform {
        radius: f64,
        smoothing: Option<f64>,
    },
    /// Radii in `[top-left, top-right, bottom-right, bottom-left]` order.
    PerCorner {
        corners: [f64; 4],
        smoothing: Option<f64>,
    },
}

impl CornerRadius {
    pub fn smoothing(&self) -> Option<f64> {
        match self {
            CornerRadius::Uniform { smoothing, .. }
            | CornerRadius::PerCorner { smoothing, .. } => *smoothing,
        }
    }

    /// Largest radius component.
    pub fn max_component(&self) -> f64 {
        match self {
            CornerRadius::Uniform { radius, .. } => *radius,
            CornerRadius::PerCorner { corners, .. } => {
                corners.iter().copied().fold(0.0, f64::max)
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.max_component() <= 0.0
    }
}

/// Resolve a node's corner-radius fields.
///
/// Precedence: per-corner radii array, then the uniform scalar (absent
/// when the host reports mixed corners), then the legacy per-corner
/// fields, then zero. The smoothing coefficient is copied through
/// unchanged wherever it exists.
pub fn resolve_corner_radius(node: &Node) -> CornerRadius {
    let smoothing = node.corner_smoothing;

    if let Some([tl, tr, br, bl]) = node.rectangle_corner_radii {
        if tl == tr && tl == br && tl == bl {
            return CornerRadius::Uniform {
                radius: tl,
                smoothing,
            };
        }
        return CornerRadius::PerCorner {
            corners: [tl, tr, br, bl],
            smoothing,
        };
    }

    if let Some(radius) = node.corner_radius {
        if radius != 0.0 {
            return CornerRadius::Uniform { radius, smoothing };
        }
    }

    if node.top_left_radius.is_some() {
        let tl = node.top_left_radius.unwrap_or(0.0);
        let tr = node.top_right_radius.unwrap_or(0.0);
        let br = node.bottom_right_radius.unwrap_or(0.0);
        let bl = node.bottom_left_radius.unwrap_or(0.0);
        if tl == tr && tl == br && tl == bl {
            return CornerRadius::Uniform {
                radius: tl,
                smoothing,
            };
        }
        return CornerRadius::PerCorner {
            corners: [tl, tr, br, bl],
            smoothing,
        };
    }

    CornerRadius::Uniform {
        radius: 0.0,
        smoothing,
    }
}

/// Whether a radius should render as a squircle clip-path instead of
/// the plain `border-radius` property.
pub fn should_use_squircle(radius: &CornerRadius) -> bool {
    radius.smoothing().is_some_and(|s| s > 0.0) && !radius.is_zero()
}

/// Resolve a line-height spec to pixels.
///
/// AUTO returns the font size unchanged: a tight line box that matches
/// the reference renderer, not the browser default of roughly 1.2x.
pub fn line_height(spec: LineHeight, font_size: f64) -> f64 {
    match spec {
        LineHeight::Auto => font_size,
        LineHeight::Pixels { value } => value,
        LineHeight::Percent { value } => font_size * value / 100.0,
    }
}

/// A resolved letter-spacing value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LetterSpacingValue {
    Pixels(f64),
    Em(f64),
}

/// Resolve a letter-spacing spec.
///
/// Pixel values are rounded to two decimals; negative and sub-0.5px
/// values collapse to zero because they render inconsistently across
/// platforms. Percent values become font-relative `em` values rounded
/// to three decimals.
pub fn letter_spacing(spec: LetterSpacing, _font_size: f64) -> LetterSpacingValue {
    match spec {
        LetterSpacing::Pixels { value } => {
            let px = (value * 100.0).round() / 100.0;
            if px < 0.0 || px.abs() < 0.5 {
                LetterSpacingValue::Pixels(0.0)
            } else {
                LetterSpacingValue::Pixels(px)
            }
        }
        LetterSpacing::Percent { value } => {
            let em = value / 100.0;
            LetterSpacingValue::Em((em * 1000.0).round() / 1000.0)
        }
    }
}
