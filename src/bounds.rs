//! Bounding rectangle computation.
//!
//! A declared `viewBox` is authoritative; otherwise bounds are the union
//! of per-path boxes. Path boxes are control-point hulls: control points
//! of a Bézier bound the curve, so the hull always contains the geometry
//! (it can overshoot slightly for curves that do not touch their hull).

use crate::tokenize;
use crate::types::{Path, PathSegment, Rect};

/// Bounds reported when a document has neither a usable `viewBox` nor any
/// geometry to measure.
pub const FALLBACK_BOUNDS: Rect = Rect {
    min: glam::DVec2::ZERO,
    width: 100.0,
    height: 100.0,
};

impl Path {
    /// Control-point hull of all segments. `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::from_points(self.iter().flat_map(|segment| {
            let mut points = Vec::new();
            match *segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => points.push(p),
                PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                    points.extend([ctrl1, ctrl2, to]);
                }
                PathSegment::QuadTo { ctrl, to } => points.extend([ctrl, to]),
                PathSegment::Close => {}
            }
            points
        }))
    }
}

/// Parse a `viewBox` attribute value. Requires exactly four numbers and a
/// non-negative size; anything else is treated as no viewBox at all.
pub fn parse_view_box(value: &str) -> Option<Rect> {
    let numbers = tokenize::numbers(value);
    let [min_x, min_y, width, height] = numbers.as_slice() else {
        return None;
    };
    if *width < 0.0 || *height < 0.0 {
        return None;
    }
    Some(Rect::new(*min_x, *min_y, *width, *height))
}

/// Document bounds: the `viewBox` verbatim when declared, else the union
/// of all path boxes, else [`FALLBACK_BOUNDS`].
pub fn document_bounds(view_box: Option<Rect>, paths: &[Path]) -> Rect {
    if let Some(rect) = view_box {
        return rect;
    }
    paths
        .iter()
        .filter_map(Path::bounding_box)
        .reduce(|acc, rect| acc.union(&rect))
        .unwrap_or(FALLBACK_BOUNDS)
}
