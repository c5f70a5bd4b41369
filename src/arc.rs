//! Elliptical arc conversion.
//!
//! SVG specifies arcs by their endpoints plus radii and two flags; to emit
//! drawable geometry the arc is converted to a center parameterization and
//! then split into cubic Bézier segments of at most a quarter turn each.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DVec2, dvec2};

use crate::types::PathSink;

/// Convert one elliptical arc into cubic segments, emitted into `sink`.
///
/// `x_axis_rotation` is in degrees. Returns the number of segments emitted.
/// Degenerate radii collapse the arc to a straight line, matching renderer
/// behavior; numeric edge cases are clamped instead of erroring.
pub fn emit_arc(
    sink: &mut impl PathSink,
    from: DVec2,
    to: DVec2,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> usize {
    if rx == 0.0 || ry == 0.0 {
        sink.line_to(to);
        return 1;
    }

    let mut rx = rx.abs();
    let mut ry = ry.abs();
    let phi = x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Move the origin to the chord midpoint and rotate into the ellipse's
    // frame; primed coordinates live in that frame.
    let mid = (from - to) / 2.0;
    let x1p = cos_phi * mid.x + sin_phi * mid.y;
    let y1p = -sin_phi * mid.x + cos_phi * mid.y;

    // If the radii cannot span the chord, scale them up uniformly until
    // exactly one solution exists.
    let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let den = (rx * y1p).powi(2) + (ry * x1p).powi(2);
    if den == 0.0 {
        // from == to: the arc has no extent.
        sink.line_to(to);
        return 1;
    }
    let num = (rx * ry).powi(2) - den;
    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let k = sign * (num / den).max(0.0).sqrt();
    let cxp = k * rx * y1p / ry;
    let cyp = -k * ry * x1p / rx;

    let center = dvec2(
        cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0,
        sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0,
    );

    let u = dvec2((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = dvec2((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = angle_between(dvec2(1.0, 0.0), u);
    let mut delta_theta = angle_between(u, v);
    if !sweep && delta_theta > 0.0 {
        delta_theta -= 2.0 * PI;
    } else if sweep && delta_theta < 0.0 {
        delta_theta += 2.0 * PI;
    }

    // At most a quarter turn per cubic segment.
    let segments = (delta_theta.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let seg = delta_theta / segments as f64;
    let alpha = seg.sin() * ((4.0 + 3.0 * (seg / 2.0).tan().powi(2)).sqrt() - 1.0) / 3.0;

    let point_at = |theta: f64| -> DVec2 {
        let (sin_t, cos_t) = theta.sin_cos();
        center
            + dvec2(
                rx * cos_t * cos_phi - ry * sin_t * sin_phi,
                rx * cos_t * sin_phi + ry * sin_t * cos_phi,
            )
    };
    let tangent_at = |theta: f64| -> DVec2 {
        let (sin_t, cos_t) = theta.sin_cos();
        dvec2(
            -rx * sin_t * cos_phi - ry * cos_t * sin_phi,
            -rx * sin_t * sin_phi + ry * cos_t * cos_phi,
        )
    };

    for i in 0..segments {
        let t1 = theta1 + seg * i as f64;
        let t2 = t1 + seg;
        let p1 = point_at(t1);
        let p2 = point_at(t2);
        sink.cubic_to(p1 + alpha * tangent_at(t1), p2 - alpha * tangent_at(t2), p2);
    }
    segments
}

/// Signed angle from `u` to `v`. The cosine ratio is clamped to [-1, 1]
/// so floating-point overshoot cannot produce NaN from `acos`.
fn angle_between(u: DVec2, v: DVec2) -> f64 {
    let len = u.length() * v.length();
    let angle = (u.dot(v) / len).clamp(-1.0, 1.0).acos();
    if u.perp_dot(v) < 0.0 { -angle } else { angle }
}
