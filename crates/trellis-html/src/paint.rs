//! Paint resolvers: solid colors, gradients, background layers.

use trellis_scene::{Color, Paint, ScaleMode, Vec2};

use crate::geometry::fixed;

/// Solid color to CSS: hex when fully opaque, `rgba()` otherwise.
pub fn css_color(color: Color, opacity: f64) -> String {
    let alpha = (color.a * opacity).clamp(0.0, 1.0);
    let (r, g, b) = color.to_rgb8();
    if alpha >= 1.0 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("rgba({r}, {g}, {b}, {})", fixed(alpha))
    }
}

/// CSS gradient angle in degrees derived from the start/end handles.
///
/// The handle axis is measured in screen space; CSS angles start at
/// twelve o'clock and run clockwise, hence the 90 degree shift.
fn gradient_angle(handles: &[Vec2]) -> f64 {
    let (Some(start), Some(end)) = (handles.first(), handles.get(1)) else {
        return 90.0;
    };
    (end.y - start.y).atan2(end.x - start.x).to_degrees() + 90.0
}

/// Render one gradient paint as a `linear-gradient(...)` expression.
///
/// Returns `None` for paints that are not linear gradients or carry no
/// stops.
pub fn gradient_css(paint: &Paint) -> Option<String> {
    let Paint::LinearGradient {
        gradient_handle_positions,
        gradient_stops,
        ..
    } = paint
    else {
        return None;
    };
    if gradient_stops.is_empty() {
        return None;
    }

    let opacity = paint.opacity();
    let angle = gradient_angle(gradient_handle_positions);
    let stops = gradient_stops
        .iter()
        .map(|stop| {
            format!(
                "{} {}%",
                css_color(stop.color, opacity),
                fixed(stop.position * 100.0)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!("linear-gradient({}deg, {stops})", fixed(angle)))
}

/// Whether the stroke list triggers the gradient-border rendering path.
///
/// Only the first stroke matters, and an absent visibility flag counts
/// as visible.
pub fn is_gradient_stroke(strokes: &[Paint]) -> bool {
    strokes
        .first()
        .is_some_and(|stroke| matches!(stroke, Paint::LinearGradient { .. }) && stroke.is_visible())
}

/// Compose the visible non-image fills into a `background` value.
///
/// Layers are emitted topmost paint first, as CSS expects. A solid
/// paint can only stand alone as the bottom layer; anywhere else it is
/// wrapped into a two-stop gradient so it stacks.
pub fn fills_to_background(fills: &[Paint]) -> Option<String> {
    let visible: Vec<&Paint> = fills
        .iter()
        .rev()
        .filter(|paint| paint.is_visible() && !matches!(paint, Paint::Image { .. }))
        .collect();
    if visible.is_empty() {
        return None;
    }

    let last = visible.len() - 1;
    let layers: Vec<String> = visible
        .iter()
        .enumerate()
        .filter_map(|(index, paint)| match paint {
            Paint::Solid { color, .. } => {
                let css = css_color(*color, paint.opacity());
                if index == last {
                    Some(css)
                } else {
                    Some(format!("linear-gradient(0deg, {css} 0%, {css} 100%)"))
                }
            }
            Paint::LinearGradient { .. } => gradient_css(paint),
            Paint::Image { .. } | Paint::Unsupported => None,
        })
        .collect();

    if layers.is_empty() {
        None
    } else {
        Some(layers.join(", "))
    }
}

/// First visible solid paint, resolved to CSS. Used for text color and
/// plain borders.
pub fn first_solid_color(paints: &[Paint]) -> Option<String> {
    paints.iter().find_map(|paint| match paint {
        Paint::Solid { color, .. } if paint.is_visible() => {
            Some(css_color(*color, paint.opacity()))
        }
        _ => None,
    })
}

/// `object-fit` value for an image-only node.
pub fn scale_mode_to_object_fit(mode: ScaleMode) -> &'static str {
    match mode {
        ScaleMode::Fill | ScaleMode::Crop => "cover",
        ScaleMode::Fit => "contain",
        ScaleMode::Tile => "none",
        ScaleMode::Stretch => "fill",
    }
}

/// `background-size` value for an image used as a background layer.
pub fn scale_mode_to_background_size(mode: ScaleMode) -> &'static str {
    match mode {
        ScaleMode::Fill | ScaleMode::Crop => "cover",
        ScaleMode::Fit => "contain",
        ScaleMode::Tile => "auto",
        ScaleMode::Stretch => "100% 100%",
    }
}

/// `background-repeat` value for an image used as a background layer.
pub fn scale_mode_to_background_repeat(mode: ScaleMode) -> &'static str {
    match mode {
        ScaleMode::Tile => "repeat",
        _ => "no-repeat",
    }
}
