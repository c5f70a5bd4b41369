//! Basic-shape elements, synthesized into path geometry.
//!
//! Each shape type resolves its attributes once (including the `rx`/`ry`
//! fallback dance for rounded rectangles) and then emits segments through
//! the same [`PathSink`] the path interpreter uses.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::log::debug;
use crate::scan::{self, Element};
use crate::tokenize;
use crate::types::{Path, PathBuilder, PathSink};

/// Tangent-length factor for approximating a quarter circle with one
/// cubic: 4/3 * (sqrt(2) - 1).
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Conversion of a resolved shape into path geometry.
#[enum_dispatch]
pub trait ToPath {
    fn to_path(&self) -> Path;
}

/// Any of the six supported basic shapes.
#[enum_dispatch(ToPath)]
#[derive(Debug, Clone, PartialEq)]
pub enum BasicShape {
    Rect(RectShape),
    Circle(CircleShape),
    Ellipse(EllipseShape),
    Line(LineShape),
    Polyline(PolylineShape),
    Polygon(PolygonShape),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: Option<f64>,
    pub ry: Option<f64>,
}

impl RectShape {
    /// Corner radii with the SVG fallback rules applied: either radius
    /// defaults to the other, both clamp to half the rect size, and
    /// non-positive values mean square corners.
    fn corner_radii(&self) -> Option<(f64, f64)> {
        let rx = self.rx.or(self.ry).unwrap_or(0.0);
        let ry = self.ry.or(self.rx).unwrap_or(0.0);
        if rx <= 0.0 || ry <= 0.0 {
            return None;
        }
        Some((rx.min(self.width / 2.0), ry.min(self.height / 2.0)))
    }
}

impl ToPath for RectShape {
    fn to_path(&self) -> Path {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        let mut b = PathBuilder::new();
        match self.corner_radii() {
            Some((rx, ry)) => {
                // Clockwise from the start of the top edge, one cubic
                // per corner.
                b.move_to(dvec2(x + rx, y));
                b.line_to(dvec2(x + w - rx, y));
                b.cubic_to(
                    dvec2(x + w - rx + KAPPA * rx, y),
                    dvec2(x + w, y + ry - KAPPA * ry),
                    dvec2(x + w, y + ry),
                );
                b.line_to(dvec2(x + w, y + h - ry));
                b.cubic_to(
                    dvec2(x + w, y + h - ry + KAPPA * ry),
                    dvec2(x + w - rx + KAPPA * rx, y + h),
                    dvec2(x + w - rx, y + h),
                );
                b.line_to(dvec2(x + rx, y + h));
                b.cubic_to(
                    dvec2(x + rx - KAPPA * rx, y + h),
                    dvec2(x, y + h - ry + KAPPA * ry),
                    dvec2(x, y + h - ry),
                );
                b.line_to(dvec2(x, y + ry));
                b.cubic_to(
                    dvec2(x, y + ry - KAPPA * ry),
                    dvec2(x + rx - KAPPA * rx, y),
                    dvec2(x + rx, y),
                );
            }
            None => {
                b.move_to(dvec2(x, y));
                b.line_to(dvec2(x + w, y));
                b.line_to(dvec2(x + w, y + h));
                b.line_to(dvec2(x, y + h));
            }
        }
        b.close();
        b.into_path()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl ToPath for CircleShape {
    fn to_path(&self) -> Path {
        EllipseShape {
            cx: self.cx,
            cy: self.cy,
            rx: self.r,
            ry: self.r,
        }
        .to_path()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseShape {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl ToPath for EllipseShape {
    fn to_path(&self) -> Path {
        let (cx, cy, rx, ry) = (self.cx, self.cy, self.rx, self.ry);
        let mut b = PathBuilder::new();
        // Four quadrant cubics, clockwise in y-down space from the
        // rightmost point.
        b.move_to(dvec2(cx + rx, cy));
        b.cubic_to(
            dvec2(cx + rx, cy + KAPPA * ry),
            dvec2(cx + KAPPA * rx, cy + ry),
            dvec2(cx, cy + ry),
        );
        b.cubic_to(
            dvec2(cx - KAPPA * rx, cy + ry),
            dvec2(cx - rx, cy + KAPPA * ry),
            dvec2(cx - rx, cy),
        );
        b.cubic_to(
            dvec2(cx - rx, cy - KAPPA * ry),
            dvec2(cx - KAPPA * rx, cy - ry),
            dvec2(cx, cy - ry),
        );
        b.cubic_to(
            dvec2(cx + KAPPA * rx, cy - ry),
            dvec2(cx + rx, cy - KAPPA * ry),
            dvec2(cx + rx, cy),
        );
        b.close();
        b.into_path()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ToPath for LineShape {
    fn to_path(&self) -> Path {
        let mut b = PathBuilder::new();
        b.move_to(dvec2(self.x1, self.y1));
        b.line_to(dvec2(self.x2, self.y2));
        b.into_path()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineShape {
    pub points: Vec<DVec2>,
}

impl ToPath for PolylineShape {
    fn to_path(&self) -> Path {
        poly_path(&self.points, false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub points: Vec<DVec2>,
}

impl ToPath for PolygonShape {
    fn to_path(&self) -> Path {
        poly_path(&self.points, true)
    }
}

fn poly_path(points: &[DVec2], closed: bool) -> Path {
    let mut b = PathBuilder::new();
    if let Some((first, rest)) = points.split_first() {
        b.move_to(*first);
        for p in rest {
            b.line_to(*p);
        }
        if closed {
            b.close();
        }
    }
    b.into_path()
}

/// Paths for every basic shape in the document, grouped by element kind.
pub fn extract_all(text: &str) -> Vec<Path> {
    let mut paths = Vec::new();
    paths.extend(extract_rects(text));
    paths.extend(extract_circles(text));
    paths.extend(extract_ellipses(text));
    paths.extend(extract_lines(text));
    paths.extend(extract_polylines(text));
    paths.extend(extract_polygons(text));
    debug!("extracted {} shape paths", paths.len());
    paths
}

pub fn extract_rects(text: &str) -> Vec<Path> {
    collect(text, "rect", |el| {
        let shape = RectShape {
            x: el.number_or_zero("x"),
            y: el.number_or_zero("y"),
            width: el.number_or_zero("width"),
            height: el.number_or_zero("height"),
            rx: el.number("rx"),
            ry: el.number("ry"),
        };
        (shape.width > 0.0 && shape.height > 0.0).then(|| BasicShape::from(shape))
    })
}

pub fn extract_circles(text: &str) -> Vec<Path> {
    collect(text, "circle", |el| {
        let shape = CircleShape {
            cx: el.number_or_zero("cx"),
            cy: el.number_or_zero("cy"),
            r: el.number_or_zero("r"),
        };
        (shape.r > 0.0).then(|| BasicShape::from(shape))
    })
}

pub fn extract_ellipses(text: &str) -> Vec<Path> {
    collect(text, "ellipse", |el| {
        let shape = EllipseShape {
            cx: el.number_or_zero("cx"),
            cy: el.number_or_zero("cy"),
            rx: el.number_or_zero("rx"),
            ry: el.number_or_zero("ry"),
        };
        (shape.rx > 0.0 && shape.ry > 0.0).then(|| BasicShape::from(shape))
    })
}

pub fn extract_lines(text: &str) -> Vec<Path> {
    collect(text, "line", |el| {
        Some(BasicShape::from(LineShape {
            x1: el.number_or_zero("x1"),
            y1: el.number_or_zero("y1"),
            x2: el.number_or_zero("x2"),
            y2: el.number_or_zero("y2"),
        }))
    })
}

pub fn extract_polylines(text: &str) -> Vec<Path> {
    collect(text, "polyline", |el| {
        point_list(el).map(|points| BasicShape::from(PolylineShape { points }))
    })
}

pub fn extract_polygons(text: &str) -> Vec<Path> {
    collect(text, "polygon", |el| {
        point_list(el).map(|points| BasicShape::from(PolygonShape { points }))
    })
}

fn collect(
    text: &str,
    tag: &str,
    resolve: impl Fn(&Element<'_>) -> Option<BasicShape>,
) -> Vec<Path> {
    scan::elements(text, tag)
        .iter()
        .filter_map(|el| resolve(el))
        .map(|shape| shape.to_path())
        .collect()
}

/// The `points` attribute as coordinate pairs; an odd trailing number is
/// dropped. Lists shorter than two full pairs are rejected.
fn point_list(el: &Element<'_>) -> Option<Vec<DVec2>> {
    let numbers = tokenize::numbers(el.attr("points")?);
    if numbers.len() < 4 {
        return None;
    }
    Some(
        numbers
            .chunks_exact(2)
            .map(|pair| dvec2(pair[0], pair[1]))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PathSegment, Rect};

    #[test]
    fn plain_rect_is_four_corners_and_close() {
        let paths = extract_rects(r#"<rect x="0" y="0" width="20" height="20"/>"#);
        assert_eq!(paths.len(), 1);
        assert_eq!(
            paths[0].segments(),
            &[
                PathSegment::MoveTo(dvec2(0.0, 0.0)),
                PathSegment::LineTo(dvec2(20.0, 0.0)),
                PathSegment::LineTo(dvec2(20.0, 20.0)),
                PathSegment::LineTo(dvec2(0.0, 20.0)),
                PathSegment::Close,
            ]
        );
    }

    #[test]
    fn rounded_rect_keeps_exact_bounds_but_differs_from_plain() {
        let rounded = extract_rects(r#"<rect x="0" y="0" width="100" height="50" rx="10"/>"#);
        let plain = extract_rects(r#"<rect x="0" y="0" width="100" height="50"/>"#);
        let bbox = rounded[0].bounding_box().unwrap();
        assert_eq!(bbox, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_ne!(rounded[0], plain[0]);
    }

    #[test]
    fn rect_ry_defaults_to_rx() {
        let only_rx = extract_rects(r#"<rect width="40" height="40" rx="8"/>"#);
        let both = extract_rects(r#"<rect width="40" height="40" rx="8" ry="8"/>"#);
        assert_eq!(only_rx, both);
    }

    #[test]
    fn rect_radii_clamp_to_half_size() {
        let oversized = extract_rects(r#"<rect width="10" height="10" rx="400"/>"#);
        let clamped = extract_rects(r#"<rect width="10" height="10" rx="5"/>"#);
        assert_eq!(oversized, clamped);
    }

    #[test]
    fn zero_size_rect_is_skipped() {
        assert!(extract_rects(r#"<rect width="0" height="10"/>"#).is_empty());
    }

    #[test]
    fn circle_is_inscribed_ellipse() {
        let circle = extract_circles(r#"<circle cx="5" cy="5" r="5"/>"#);
        let bbox = circle[0].bounding_box().unwrap();
        assert_eq!(bbox, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn ellipse_bounds_span_both_radii() {
        let ellipse = extract_ellipses(r#"<ellipse cx="0" cy="0" rx="4" ry="2"/>"#);
        let bbox = ellipse[0].bounding_box().unwrap();
        assert_eq!(bbox, Rect::new(-4.0, -2.0, 8.0, 4.0));
    }

    #[test]
    fn line_is_a_two_point_open_path() {
        let lines = extract_lines(r#"<line x1="1" y1="2" x2="3" y2="4"/>"#);
        assert_eq!(
            lines[0].segments(),
            &[
                PathSegment::MoveTo(dvec2(1.0, 2.0)),
                PathSegment::LineTo(dvec2(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn polyline_stays_open_polygon_closes() {
        let text = r#"<polyline points="0,0 10,0 10,10"/><polygon points="0,0 10,0 10,10"/>"#;
        let open = extract_polylines(text);
        let closed = extract_polygons(text);
        assert_eq!(open[0].len(), 3);
        assert_eq!(closed[0].len(), 4);
        assert_eq!(closed[0].segments().last(), Some(&PathSegment::Close));
        assert!(!open[0].segments().contains(&PathSegment::Close));
    }

    #[test]
    fn short_point_lists_are_skipped() {
        assert!(extract_polylines(r#"<polyline points="0,0 10"/>"#).is_empty());
        assert!(extract_polygons(r#"<polygon points="5,5"/>"#).is_empty());
    }

    #[test]
    fn odd_trailing_coordinate_is_dropped() {
        let paths = extract_polylines(r#"<polyline points="0 0 10 0 7"/>"#);
        assert_eq!(paths[0].len(), 2);
    }
}
