//! Path-data command interpreter.
//!
//! A state machine over the token stream: the current command letter
//! persists across coordinate groups, so `L 1 1 2 2 3 3` draws three line
//! segments. Construction state is the current point, the subpath start
//! (for `Z`), and the last curve control point (for `S`/`T` reflection).

use glam::{DVec2, dvec2};

use crate::arc;
use crate::tokenize::{Token, tokenize};
use crate::types::{Path, PathBuilder, PathSink};

/// Parse one `d` attribute into a [`Path`].
///
/// Returns `None` when the data yields no segments at all; the caller
/// decides whether that warrants a warning.
pub fn parse_path_data(d: &str) -> Option<Path> {
    let mut builder = PathBuilder::new();
    let emitted = interpret(&tokenize(d), &mut builder);
    if emitted == 0 {
        return None;
    }
    Some(builder.into_path())
}

/// Interpret a token stream, emitting operations into `sink`.
/// Returns the number of segments emitted.
pub fn interpret(tokens: &[Token], sink: &mut impl PathSink) -> usize {
    let mut interp = Interpreter {
        current: DVec2::ZERO,
        subpath_start: DVec2::ZERO,
        last_control: None,
        emitted: 0,
    };
    let mut command = None;
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            Token::Command('Z' | 'z') => {
                // Close takes no parameters and executes immediately.
                sink.close();
                interp.current = interp.subpath_start;
                interp.last_control = None;
                interp.emitted += 1;
                i += 1;
            }
            Token::Command(c) => {
                command = Some(c);
                i += 1;
            }
            Token::Number(_) => match command {
                Some(cmd) => {
                    i = interp.run(cmd, tokens, i, sink);
                    // A move-to repeats implicitly as line-to.
                    match cmd {
                        'M' => command = Some('L'),
                        'm' => command = Some('l'),
                        _ => {}
                    }
                }
                // Numbers before any command letter are meaningless.
                None => i += 1,
            },
        }
    }
    interp.emitted
}

struct Interpreter {
    current: DVec2,
    subpath_start: DVec2,
    /// Control point of the most recent curve command, for `S`/`T`
    /// reflection. Cleared by every non-curve command.
    last_control: Option<DVec2>,
    emitted: usize,
}

impl Interpreter {
    /// Execute one coordinate group of `cmd`, whose first number sits at
    /// `tokens[i]`. Returns the index to resume from.
    fn run(&mut self, cmd: char, tokens: &[Token], i: usize, sink: &mut impl PathSink) -> usize {
        let relative = cmd.is_ascii_lowercase();
        match cmd.to_ascii_uppercase() {
            'M' => {
                let Some(([x, y], next)) = take::<2>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let point = self.resolve(relative, dvec2(x, y));
                sink.move_to(point);
                self.current = point;
                self.subpath_start = point;
                self.last_control = None;
                self.emitted += 1;
                next
            }
            'L' => {
                let Some(([x, y], next)) = take::<2>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let point = self.resolve(relative, dvec2(x, y));
                self.line(point, sink);
                next
            }
            'H' => {
                let Some(([x], next)) = take::<1>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let x = if relative { self.current.x + x } else { x };
                self.line(dvec2(x, self.current.y), sink);
                next
            }
            'V' => {
                let Some(([y], next)) = take::<1>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let y = if relative { self.current.y + y } else { y };
                self.line(dvec2(self.current.x, y), sink);
                next
            }
            'C' => {
                let Some(([x1, y1, x2, y2, x, y], next)) = take::<6>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let ctrl1 = self.resolve(relative, dvec2(x1, y1));
                let ctrl2 = self.resolve(relative, dvec2(x2, y2));
                let to = self.resolve(relative, dvec2(x, y));
                self.cubic(ctrl1, ctrl2, to, sink);
                next
            }
            'S' => {
                let Some(([x2, y2, x, y], next)) = take::<4>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let ctrl1 = self.reflected_control();
                let ctrl2 = self.resolve(relative, dvec2(x2, y2));
                let to = self.resolve(relative, dvec2(x, y));
                self.cubic(ctrl1, ctrl2, to, sink);
                next
            }
            'Q' => {
                let Some(([x1, y1, x, y], next)) = take::<4>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let ctrl = self.resolve(relative, dvec2(x1, y1));
                let to = self.resolve(relative, dvec2(x, y));
                self.quad(ctrl, to, sink);
                next
            }
            'T' => {
                let Some(([x, y], next)) = take::<2>(tokens, i) else {
                    return skip_group(tokens, i);
                };
                let ctrl = self.reflected_control();
                let to = self.resolve(relative, dvec2(x, y));
                self.quad(ctrl, to, sink);
                next
            }
            'A' => {
                let Some(([rx, ry, rotation, large, sweep, x, y], next)) = take::<7>(tokens, i)
                else {
                    return skip_group(tokens, i);
                };
                let to = self.resolve(relative, dvec2(x, y));
                self.emitted += arc::emit_arc(
                    sink,
                    self.current,
                    to,
                    rx,
                    ry,
                    rotation,
                    large != 0.0,
                    sweep != 0.0,
                );
                self.current = to;
                self.last_control = None;
                next
            }
            // Unrecognized command letter: discard its numbers.
            _ => skip_group(tokens, i),
        }
    }

    fn resolve(&self, relative: bool, p: DVec2) -> DVec2 {
        if relative { self.current + p } else { p }
    }

    /// Reflection of the last control point across the current point.
    /// Without a preceding curve command the control point collapses onto
    /// the current point, degrading the curve toward a line.
    fn reflected_control(&self) -> DVec2 {
        match self.last_control {
            Some(ctrl) => 2.0 * self.current - ctrl,
            None => self.current,
        }
    }

    fn line(&mut self, to: DVec2, sink: &mut impl PathSink) {
        sink.line_to(to);
        self.current = to;
        self.last_control = None;
        self.emitted += 1;
    }

    fn cubic(&mut self, ctrl1: DVec2, ctrl2: DVec2, to: DVec2, sink: &mut impl PathSink) {
        sink.cubic_to(ctrl1, ctrl2, to);
        self.current = to;
        self.last_control = Some(ctrl2);
        self.emitted += 1;
    }

    fn quad(&mut self, ctrl: DVec2, to: DVec2, sink: &mut impl PathSink) {
        sink.quad_to(ctrl, to);
        self.current = to;
        self.last_control = Some(ctrl);
        self.emitted += 1;
    }
}

/// Read `N` consecutive numbers starting at `tokens[i]`. `None` when a
/// command letter or the end of input interrupts the group.
fn take<const N: usize>(tokens: &[Token], i: usize) -> Option<([f64; N], usize)> {
    let mut values = [0.0; N];
    for (offset, value) in values.iter_mut().enumerate() {
        match tokens.get(i + offset) {
            Some(Token::Number(n)) => *value = *n,
            _ => return None,
        }
    }
    Some((values, i + N))
}

/// Skip an incomplete or unusable coordinate group: consume numbers up to
/// the next command letter. The group produces no segment.
fn skip_group(tokens: &[Token], i: usize) -> usize {
    let mut j = i;
    while let Some(Token::Number(_)) = tokens.get(j) {
        j += 1;
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathSegment;

    const EPSILON: f64 = 1e-10;

    fn segments(d: &str) -> Vec<PathSegment> {
        parse_path_data(d)
            .map(|p| p.segments().to_vec())
            .unwrap_or_default()
    }

    fn assert_point_eq(actual: DVec2, expected: DVec2) {
        assert!(
            (actual - expected).length() < EPSILON,
            "point mismatch: {actual} != {expected}"
        );
    }

    #[test]
    fn move_then_lines() {
        let segs = segments("M0 0 L10 10 20 20");
        assert_eq!(
            segs,
            vec![
                PathSegment::MoveTo(dvec2(0.0, 0.0)),
                PathSegment::LineTo(dvec2(10.0, 10.0)),
                PathSegment::LineTo(dvec2(20.0, 20.0)),
            ]
        );
    }

    #[test]
    fn implicit_lineto_after_moveto() {
        // Extra coordinate pairs after M are line-tos, not move-tos.
        let segs = segments("M1 1 2 2 3 3");
        assert_eq!(
            segs,
            vec![
                PathSegment::MoveTo(dvec2(1.0, 1.0)),
                PathSegment::LineTo(dvec2(2.0, 2.0)),
                PathSegment::LineTo(dvec2(3.0, 3.0)),
            ]
        );
    }

    #[test]
    fn relative_moveto_demotes_to_relative_lineto() {
        let segs = segments("m1 1 2 2");
        assert_eq!(
            segs,
            vec![
                PathSegment::MoveTo(dvec2(1.0, 1.0)),
                PathSegment::LineTo(dvec2(3.0, 3.0)),
            ]
        );
    }

    #[test]
    fn close_resets_current_point_to_subpath_start() {
        // The relative line after Z starts from the subpath origin.
        let segs = segments("M0 0 L10 0 L10 10 Z l5 5");
        assert_eq!(segs[3], PathSegment::Close);
        assert_eq!(segs[4], PathSegment::LineTo(dvec2(5.0, 5.0)));
    }

    #[test]
    fn close_is_emitted_as_final_segment() {
        let segs = segments("M0 0 L10 0 L10 10 Z");
        assert_eq!(segs.last(), Some(&PathSegment::Close));
        assert_eq!(segs.len(), 4);
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        let segs = segments("M10 10 H50 v5 h-2 V0");
        assert_eq!(
            segs,
            vec![
                PathSegment::MoveTo(dvec2(10.0, 10.0)),
                PathSegment::LineTo(dvec2(50.0, 10.0)),
                PathSegment::LineTo(dvec2(50.0, 15.0)),
                PathSegment::LineTo(dvec2(48.0, 15.0)),
                PathSegment::LineTo(dvec2(48.0, 0.0)),
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let segs = segments("M0 0 C2 2 8 2 10 0 S12 2 14 0");
        let PathSegment::CubicTo { ctrl1, .. } = segs[2] else {
            panic!("expected cubic, got {:?}", segs[2]);
        };
        // Reflection of (8,2) across (10,0).
        assert_point_eq(ctrl1, dvec2(12.0, -2.0));
    }

    #[test]
    fn smooth_cubic_without_prior_curve_uses_current_point() {
        let segs = segments("M1 2 L3 4 S7 8 9 10");
        let PathSegment::CubicTo { ctrl1, .. } = segs[2] else {
            panic!("expected cubic");
        };
        assert_point_eq(ctrl1, dvec2(3.0, 4.0));
    }

    #[test]
    fn smooth_quad_reflects_previous_control() {
        let segs = segments("M0 0 Q5 5 10 0 T20 0");
        let PathSegment::QuadTo { ctrl, .. } = segs[2] else {
            panic!("expected quad");
        };
        // Reflection of (5,5) across (10,0).
        assert_point_eq(ctrl, dvec2(15.0, -5.0));
    }

    #[test]
    fn relative_cubic_resolves_all_points_against_current() {
        let segs = segments("M10 10 c1 1 2 2 3 3");
        assert_eq!(
            segs[1],
            PathSegment::CubicTo {
                ctrl1: dvec2(11.0, 11.0),
                ctrl2: dvec2(12.0, 12.0),
                to: dvec2(13.0, 13.0),
            }
        );
    }

    #[test]
    fn relative_arc_resolves_endpoint_before_conversion() {
        let segs = segments("M10 10 a10 10 0 0 1 10 10");
        let PathSegment::CubicTo { to, .. } = *segs.last().unwrap() else {
            panic!("expected cubic");
        };
        assert_point_eq(to, dvec2(20.0, 20.0));
    }

    #[test]
    fn arc_flags_accept_any_nonzero_number() {
        let one = segments("M0 0 A10 10 0 0 1 10 10");
        let also_one = segments("M0 0 A10 10 0 0 1.0 10 10");
        assert_eq!(one, also_one);
    }

    #[test]
    fn incomplete_group_is_dropped_without_segment() {
        // The dangling "30" cannot complete a line-to pair.
        let segs = segments("M0 0 L10 10 30");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1], PathSegment::LineTo(dvec2(10.0, 10.0)));
    }

    #[test]
    fn incomplete_group_resumes_at_next_command() {
        // "1 2 3" is one complete pair plus a leftover; M still runs.
        let segs = segments("L1 2 3 M5 6");
        assert_eq!(
            segs,
            vec![
                PathSegment::LineTo(dvec2(1.0, 2.0)),
                PathSegment::MoveTo(dvec2(5.0, 6.0)),
            ]
        );
    }

    #[test]
    fn unknown_commands_and_their_numbers_are_skipped() {
        let segs = segments("M0 0 U1 2 3 L5 5");
        assert_eq!(
            segs,
            vec![
                PathSegment::MoveTo(dvec2(0.0, 0.0)),
                PathSegment::LineTo(dvec2(5.0, 5.0)),
            ]
        );
    }

    #[test]
    fn garbage_yields_no_path() {
        assert!(parse_path_data("???not-a-path").is_none());
        assert!(parse_path_data("").is_none());
    }

    #[test]
    fn numbers_before_any_command_are_ignored() {
        let segs = segments("1 2 3 M4 5");
        assert_eq!(segs, vec![PathSegment::MoveTo(dvec2(4.0, 5.0))]);
    }

    #[test]
    fn multiple_subpaths() {
        let segs = segments("M0 0 L1 0 Z M5 5 L6 5");
        assert_eq!(segs.len(), 5);
        assert_eq!(segs[3], PathSegment::MoveTo(dvec2(5.0, 5.0)));
    }
}
