//! Squircle path generation.
//!
//! Continuous-curvature rounded corners: each corner is a small arc
//! flanked by two three-segment bezier runs whose extent grows with the
//! smoothing coefficient. Corners share edge space through a per-corner
//! rounding budget so adjacent large radii cannot overlap.

use crate::geometry::CornerRadius;

#[derive(Debug, Clone, Copy)]
struct CornerPathParams {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    p: f64,
    corner_radius: f64,
    arc_section_length: f64,
}

/// Generate the SVG path for a squircle outline.
///
/// Returns an empty string when the radius carries no positive
/// smoothing or the dimensions are non-positive, in which case callers
/// fall back to the plain `border-radius` property.
pub fn squircle_path(width: f64, height: f64, radius: &CornerRadius) -> String {
    let Some(smoothing) = radius.smoothing() else {
        return String::new();
    };
    if smoothing <= 0.0 || width <= 0.0 || height <= 0.0 {
        return String::new();
    }

    match *radius {
        CornerRadius::Uniform {
            radius: corner_radius,
            ..
        } => {
            let budget = width.min(height) / 2.0;
            let corner_radius = corner_radius.min(budget);
            let params = corner_params(corner_radius, smoothing, budget);
            build_path(width, height, params, params, params, params)
        }
        CornerRadius::PerCorner { corners, .. } => {
            let distributed = distribute_budget(corners, width, height);
            let [tl, tr, br, bl] =
                distributed.map(|(radius, budget)| corner_params(radius, smoothing, budget));
            build_path(width, height, tl, tr, br, bl)
        }
    }
}

/// Compute the bezier/arc parameters of one corner.
fn corner_params(corner_radius: f64, corner_smoothing: f64, budget: f64) -> CornerPathParams {
    // Clamp the smoothing so the smoothed corner never outgrows its
    // share of the edge.
    let max_smoothing = budget / corner_radius - 1.0;
    let corner_smoothing = corner_smoothing.min(max_smoothing);
    let p = ((1.0 + corner_smoothing) * corner_radius).min(budget);

    let arc_measure = 90.0 * (1.0 - corner_smoothing);
    let arc_section_length =
        (arc_measure / 2.0).to_radians().sin() * corner_radius * 2.0_f64.sqrt();

    let angle_alpha = (90.0 - arc_measure) / 2.0;
    let p3_to_p4 = corner_radius * (angle_alpha / 2.0).to_radians().tan();
    let angle_beta = 45.0 * corner_smoothing;

    let c = p3_to_p4 * angle_beta.to_radians().cos();
    let d = c * angle_beta.to_radians().tan();
    let b = (p - arc_section_length - c - d) / 3.0;
    let a = 2.0 * b;

    CornerPathParams {
        a,
        b,
        c,
        d,
        p,
        corner_radius,
        arc_section_length,
    }
}

/// Distribute edge space between unequal corners.
///
/// Corners are processed largest-first; each takes the smaller of its
/// two adjacent-edge shares, where an already-assigned neighbor leaves
/// only its remainder and an unassigned one splits proportionally.
/// Returns `(clamped_radius, budget)` per corner in TL, TR, BR, BL order.
fn distribute_budget(corners: [f64; 4], width: f64, height: f64) -> [(f64, f64); 4] {
    const TL: usize = 0;
    const TR: usize = 1;
    const BR: usize = 2;
    const BL: usize = 3;
    // (neighbor index, shared edge length) pairs per corner.
    let adjacency = |corner: usize| -> [(usize, f64); 2] {
        match corner {
            TL => [(TR, width), (BL, height)],
            TR => [(TL, width), (BR, height)],
            BL => [(BR, width), (TL, height)],
            _ => [(BL, width), (TR, height)],
        }
    };

    let mut radii = corners;
    let mut budgets = [-1.0_f64; 4];

    let mut order = [TL, TR, BL, BR];
    order.sort_by(|&lhs, &rhs| {
        corners[rhs]
            .partial_cmp(&corners[lhs])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for corner in order {
        let radius = radii[corner];
        let mut budget = f64::INFINITY;
        for (neighbor, side_length) in adjacency(corner) {
            let neighbor_radius = corners[neighbor];
            let share = if radius == 0.0 && neighbor_radius == 0.0 {
                0.0
            } else if budgets[neighbor] >= 0.0 {
                side_length - budgets[neighbor]
            } else {
                radius / (radius + neighbor_radius) * side_length
            };
            budget = budget.min(share);
        }
        budgets[corner] = budget;
        radii[corner] = radius.min(budget);
    }

    [
        (radii[TL], budgets[TL]),
        (radii[TR], budgets[TR]),
        (radii[BR], budgets[BR]),
        (radii[BL], budgets[BL]),
    ]
}

fn round4(value: f64) -> String {
    format!("{value:.4}")
}

fn build_path(
    width: f64,
    height: f64,
    tl: CornerPathParams,
    tr: CornerPathParams,
    br: CornerPathParams,
    bl: CornerPathParams,
) -> String {
    format!(
        "M {} 0 {} L {} {} {} L {} {} {} L 0 {} {} Z",
        width - tr.p,
        draw_top_right(&tr),
        width,
        height - br.p,
        draw_bottom_right(&br),
        bl.p,
        height,
        draw_bottom_left(&bl),
        tl.p,
        draw_top_left(&tl),
    )
}

fn draw_top_right(p: &CornerPathParams) -> String {
    if p.corner_radius > 0.0 {
        format!(
            "c {} 0 {} 0 {} {} a {} {} 0 0 1 {} {} c {} {} {} {} {} {}",
            round4(p.a),
            round4(p.a + p.b),
            round4(p.a + p.b + p.c),
            round4(p.d),
            round4(p.corner_radius),
            round4(p.corner_radius),
            round4(p.arc_section_length),
            round4(p.arc_section_length),
            round4(p.d),
            round4(p.c),
            round4(p.d),
            round4(p.b + p.c),
            round4(p.d),
            round4(p.a + p.b + p.c),
        )
    } else {
        format!("l {} 0", round4(p.p))
    }
}

fn draw_bottom_right(p: &CornerPathParams) -> String {
    if p.corner_radius > 0.0 {
        format!(
            "c 0 {} 0 {} {} {} a {} {} 0 0 1 {} {} c {} {} {} {} {} {}",
            round4(p.a),
            round4(p.a + p.b),
            round4(-p.d),
            round4(p.a + p.b + p.c),
            round4(p.corner_radius),
            round4(p.corner_radius),
            round4(-p.arc_section_length),
            round4(p.arc_section_length),
            round4(-p.c),
            round4(p.d),
            round4(-(p.b + p.c)),
            round4(p.d),
            round4(-(p.a + p.b + p.c)),
            round4(p.d),
        )
    } else {
        format!("l 0 {}", round4(p.p))
    }
}

fn draw_bottom_left(p: &CornerPathParams) -> String {
    if p.corner_radius > 0.0 {
        format!(
            "c {} 0 {} 0 {} {} a {} {} 0 0 1 {} {} c {} {} {} {} {} {}",
            round4(-p.a),
            round4(-(p.a + p.b)),
            round4(-(p.a + p.b + p.c)),
            round4(-p.d),
            round4(p.corner_radius),
            round4(p.corner_radius),
            round4(-p.arc_section_length),
            round4(-p.arc_section_length),
            round4(-p.d),
            round4(-p.c),
            round4(-p.d),
            round4(-(p.b + p.c)),
            round4(-p.d),
            round4(-(p.a + p.b + p.c)),
        )
    } else {
        format!("l {} 0", round4(-p.p))
    }
}

fn draw_top_left(p: &CornerPathParams) -> String {
    if p.corner_radius > 0.0 {
        format!(
            "c 0 {} 0 {} {} {} a {} {} 0 0 1 {} {} c {} {} {} {} {} {}",
            round4(-p.a),
            round4(-(p.a + p.b)),
            round4(p.d),
            round4(-(p.a + p.b + p.c)),
            round4(p.corner_radius),
            round4(p.corner_radius),
            round4(p.arc_section_length),
            round4(-p.arc_section_length),
            round4(p.c),
            round4(-p.d),
            round4(p.b + p.c),
            round4(-p.d),
            round4(p.a + p.b + p.c),
            round4(-p.d),
        )
    } else {
        format!("l 0 {}", round4(-p.p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_smoothing_yields_empty_path() {
        let radius = CornerRadius::Uniform {
            radius: 16.0,
            smoothing: None,
        };
        assert_eq!(squircle_path(90.0, 108.0, &radius), "");

        let radius = CornerRadius::Uniform {
            radius: 16.0,
            smoothing: Some(0.0),
        };
        assert_eq!(squircle_path(90.0, 108.0, &radius), "");
    }

    #[test]
    fn test_non_positive_dimensions_yield_empty_path() {
        let radius = CornerRadius::Uniform {
            radius: 16.0,
            smoothing: Some(1.0),
        };
        assert_eq!(squircle_path(0.0, 108.0, &radius), "");
        assert_eq!(squircle_path(90.0, -1.0, &radius), "");
    }

    #[test]
    fn test_uniform_path_shape() {
        let radius = CornerRadius::Uniform {
            radius: 16.0,
            smoothing: Some(1.0),
        };
        let path = squircle_path(90.0, 108.0, &radius);

        assert!(path.starts_with("M "));
        assert!(path.ends_with(" Z"));
        // Four corners, each with two bezier runs and one arc.
        assert_eq!(path.matches("c ").count(), 8);
        assert_eq!(path.matches("a ").count(), 4);
    }

    #[test]
    fn test_uniform_path_is_deterministic() {
        let radius = CornerRadius::Uniform {
            radius: 16.0,
            smoothing: Some(0.6),
        };
        assert_eq!(
            squircle_path(90.0, 108.0, &radius),
            squircle_path(90.0, 108.0, &radius)
        );
    }

    #[test]
    fn test_per_corner_path_with_sharp_corners() {
        let radius = CornerRadius::PerCorner {
            corners: [16.0, 0.0, 16.0, 0.0],
            smoothing: Some(1.0),
        };
        let path = squircle_path(100.0, 100.0, &radius);

        // Sharp corners degrade to straight line segments.
        assert_eq!(path.matches("a ").count(), 2);
        assert!(path.contains("l "));
    }

    #[test]
    fn test_radius_clamped_to_half_min_dimension() {
        // Radius far larger than the box: the arc radius in the path
        // must not exceed min(width, height) / 2.
        let radius = CornerRadius::Uniform {
            radius: 500.0,
            smoothing: Some(0.5),
        };
        let path = squircle_path(40.0, 60.0, &radius);
        assert!(path.contains("a 20.0000 20.0000"));
    }
}
