//! Core geometry types: path segments, paths, rectangles, parse results.

use glam::{DVec2, dvec2};

/// One step of a path outline. Coordinates are absolute, in the source
/// document's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath at the given point.
    MoveTo(DVec2),
    /// Straight line from the current point.
    LineTo(DVec2),
    /// Cubic Bézier with two control points.
    CubicTo {
        ctrl1: DVec2,
        ctrl2: DVec2,
        to: DVec2,
    },
    /// Quadratic Bézier with one control point.
    QuadTo { ctrl: DVec2, to: DVec2 },
    /// Close the current subpath back to its starting point.
    Close,
}

impl PathSegment {
    /// The point this segment ends at, if it has one (`Close` does not).
    pub fn endpoint(&self) -> Option<DVec2> {
        match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(p),
            PathSegment::CubicTo { to, .. } | PathSegment::QuadTo { to, .. } => Some(to),
            PathSegment::Close => None,
        }
    }
}

/// An ordered sequence of segments. May contain several subpaths, each
/// introduced by a `MoveTo`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Capability for receiving path construction operations.
///
/// The interpreter and the shape synthesizers emit through this trait so
/// callers can stream segments straight into their own representation.
pub trait PathSink {
    fn move_to(&mut self, p: DVec2);
    fn line_to(&mut self, p: DVec2);
    fn cubic_to(&mut self, ctrl1: DVec2, ctrl2: DVec2, to: DVec2);
    fn quad_to(&mut self, ctrl: DVec2, to: DVec2);
    fn close(&mut self);
}

/// The plain `PathSink`: collects segments into an owned `Path`.
#[derive(Debug, Default)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments collected so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_path(self) -> Path {
        Path::new(self.segments)
    }
}

impl PathSink for PathBuilder {
    fn move_to(&mut self, p: DVec2) {
        self.segments.push(PathSegment::MoveTo(p));
    }

    fn line_to(&mut self, p: DVec2) {
        self.segments.push(PathSegment::LineTo(p));
    }

    fn cubic_to(&mut self, ctrl1: DVec2, ctrl2: DVec2, to: DVec2) {
        self.segments.push(PathSegment::CubicTo { ctrl1, ctrl2, to });
    }

    fn quad_to(&mut self, ctrl: DVec2, to: DVec2) {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
    }

    fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }
}

/// Axis-aligned rectangle. `width` and `height` are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min: dvec2(min_x, min_y),
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.min.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min.y + self.height
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.min.x.min(other.min.x);
        let min_y = self.min.y.min(other.min.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Bounding rectangle of a point set. `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Rect> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min, mut max) = (first, first);
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

/// Result of compiling one SVG document.
///
/// `paths` is never empty: a document that produces nothing fails with
/// [`SvgError::NoPathsFound`](crate::SvgError::NoPathsFound) instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Parsed paths, in source order (path elements first, then shapes).
    pub paths: Vec<Path>,
    /// Declared `viewBox`, or the union of all path bounding boxes.
    pub bounds: Rect,
    /// Human-readable notes about elements that were skipped.
    pub warnings: Vec<String>,
}
