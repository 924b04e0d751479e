//! Gradient borders via a pseudo-element overlay.
//!
//! CSS borders cannot carry a multi-stop gradient, so the border is
//! painted by a `::before` overlay: the gradient becomes its
//! background, padding reserves the border thickness, and a dual mask
//! composited with `exclude` erases everything but the ring. The
//! overlay inherits clip-path and border-radius, so squircle corners
//! keep working.

use trellis_scene::{Paint, StrokeAlign};

use crate::geometry::fixed;
use crate::paint::gradient_css;
use crate::style_table::{decl, Declaration};

/// Border thickness, uniform or per side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderSide {
    Uniform(f64),
    PerSide {
        top: f64,
        right: f64,
        bottom: f64,
        left: f64,
    },
}

/// Output of the gradient-border resolver.
#[derive(Debug, Clone, Default)]
pub struct GradientBorder {
    /// Declarations for the element itself.
    pub element_styles: Vec<Declaration>,
    /// Declarations for the `::before` overlay.
    pub pseudo_styles: Vec<Declaration>,
    pub needs_pseudo_element: bool,
}

/// Build the pseudo-element ring for a gradient stroke.
///
/// Returns an empty result when there is no stroke or the first stroke
/// resolves to no gradient CSS.
pub fn gradient_border(
    strokes: &[Paint],
    stroke_align: StrokeAlign,
    border_width: BorderSide,
) -> GradientBorder {
    if !crate::paint::is_gradient_stroke(strokes) {
        return GradientBorder::default();
    }
    let Some(gradient) = strokes.first().and_then(gradient_css) else {
        return GradientBorder::default();
    };

    // The overlay positions against the element, so the element must
    // establish a containing block.
    let element_styles = vec![decl("position", "relative")];

    let mut pseudo = vec![
        decl("content", "''"),
        decl("position", "absolute"),
        decl("pointer-events", "none"),
        decl("z-index", "1"),
    ];

    match border_width {
        BorderSide::Uniform(width) => {
            let inset = match stroke_align {
                StrokeAlign::Center => format!("{}px", fixed(-width / 2.0)),
                StrokeAlign::Outside => format!("{}px", fixed(-width)),
                StrokeAlign::Inside => "0".to_string(),
            };
            pseudo.push(decl("inset", inset));
            pseudo.push(decl("padding", format!("{}px", fixed(width))));
        }
        BorderSide::PerSide {
            top,
            right,
            bottom,
            left,
        } => {
            let offset = |width: f64| match stroke_align {
                StrokeAlign::Center => format!("{}px", fixed(-width / 2.0)),
                StrokeAlign::Outside => format!("{}px", fixed(-width)),
                StrokeAlign::Inside => "0px".to_string(),
            };
            pseudo.push(decl("top", offset(top)));
            pseudo.push(decl("right", offset(right)));
            pseudo.push(decl("bottom", offset(bottom)));
            pseudo.push(decl("left", offset(left)));
            pseudo.push(decl(
                "padding",
                format!(
                    "{}px {}px {}px {}px",
                    fixed(top),
                    fixed(right),
                    fixed(bottom),
                    fixed(left)
                ),
            ));
        }
    }

    pseudo.push(decl("background", gradient));

    // Outer mask covers the whole overlay, inner mask only the
    // content box; excluding one from the other leaves the ring.
    let mask = "linear-gradient(#fff 0 0) content-box, linear-gradient(#fff 0 0)";
    pseudo.push(decl("mask", mask));
    pseudo.push(decl("-webkit-mask", mask));
    pseudo.push(decl("mask-composite", "exclude"));
    pseudo.push(decl("-webkit-mask-composite", "xor"));

    pseudo.push(decl("clip-path", "inherit"));
    pseudo.push(decl("-webkit-clip-path", "inherit"));
    pseudo.push(decl("border-radius", "inherit"));

    GradientBorder {
        element_styles,
        pseudo_styles: pseudo,
        needs_pseudo_element: true,
    }
}
