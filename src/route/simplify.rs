// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Point;

/// Drops interior points that sit on a straight run.
///
/// A point is dropped when the segment from the last kept point to it and the segment from it to
/// the next input point are both horizontal or both vertical. The first and last points are
/// always kept.
pub fn simplify(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for window in points.windows(2).skip(1) {
        let (cur, next) = (window[0], window[1]);
        let prev = out.last().copied().unwrap_or(cur);
        let horizontal_run = prev.y == cur.y && cur.y == next.y;
        let vertical_run = prev.x == cur.x && cur.x == next.x;
        if !(horizontal_run || vertical_run) {
            out.push(cur);
        }
    }
    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}

/// Inserts an elbow `(next.x, prev.y)` between consecutive points that differ on both axes.
pub fn join_orthogonal(points: &[Point]) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len() + 4);
    for &point in points {
        if let Some(&prev) = out.last() {
            if !point.is_axis_aligned_with(prev) {
                out.push(Point::new(point.x, prev.y));
            }
        }
        out.push(point);
    }
    out
}

/// The fixed pieces of an auto-routed wire around the searched middle section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skeleton {
    pub start: Point,
    pub start_stub: Point,
    pub start_anchor: Point,
    /// One grid step short of the destination connector, on the destination anchor's column.
    pub near: Point,
    /// `near` moved onto the destination connector's column.
    pub lead: Point,
    pub end: Point,
}

/// Joins the skeleton and the routed section into one orthogonal, simplified polyline.
pub fn assemble(skeleton: &Skeleton, routed: &[Point]) -> Vec<Point> {
    let mut raw = Vec::with_capacity(routed.len() + 6);
    raw.push(skeleton.start);
    raw.push(skeleton.start_stub);
    if skeleton.start_anchor != skeleton.start_stub {
        raw.push(skeleton.start_anchor);
    }
    raw.extend_from_slice(routed);
    raw.push(skeleton.near);
    raw.push(skeleton.lead);
    raw.push(skeleton.end);
    simplify(&join_orthogonal(&raw))
}

/// Whether every segment of `points` is horizontal or vertical.
pub fn is_orthogonal(points: &[Point]) -> bool {
    points.windows(2).all(|w| w[0].is_axis_aligned_with(w[1]))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{assemble, is_orthogonal, join_orthogonal, simplify, Skeleton};
    use crate::model::Point;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[rstest]
    #[case(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)], &[(0.0, 0.0), (20.0, 0.0)])]
    #[case(&[(0.0, 0.0), (0.0, 10.0), (0.0, 20.0), (10.0, 20.0)], &[(0.0, 0.0), (0.0, 20.0), (10.0, 20.0)])]
    #[case(&[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0)], &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])]
    #[case(&[(0.0, 0.0), (0.0, 30.0), (0.0, 20.0)], &[(0.0, 0.0), (0.0, 20.0)])]
    #[case(&[(0.0, 0.0), (5.0, 5.0)], &[(0.0, 0.0), (5.0, 5.0)])]
    fn simplify_drops_straight_runs(#[case] input: &[(f64, f64)], #[case] expected: &[(f64, f64)]) {
        assert_eq!(simplify(&pts(input)), pts(expected));
    }

    #[test]
    fn simplify_is_idempotent() {
        let input = pts(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (0.0, 10.0),
            (0.0, 20.0),
            (10.0, 20.0),
            (30.0, 20.0),
            (30.0, 40.0),
            (30.0, 30.0),
            (50.0, 30.0),
        ]);
        let once = simplify(&input);
        assert_eq!(simplify(&once), once);
    }

    #[test]
    fn join_inserts_elbow_on_diagonal_step() {
        let joined = join_orthogonal(&pts(&[(0.0, 0.0), (10.0, 20.0), (10.0, 30.0)]));
        assert_eq!(joined, pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 20.0), (10.0, 30.0)]));
        assert!(is_orthogonal(&joined));
    }

    #[test]
    fn assemble_straight_shot_collapses_to_one_segment() {
        let skeleton = Skeleton {
            start: Point::new(340.0, 220.0),
            start_stub: Point::new(340.0, 230.0),
            start_anchor: Point::new(340.0, 230.0),
            near: Point::new(340.0, 280.0),
            lead: Point::new(340.0, 280.0),
            end: Point::new(340.0, 290.0),
        };
        let routed = pts(&[(340.0, 250.0), (340.0, 260.0)]);
        assert_eq!(assemble(&skeleton, &routed), pts(&[(340.0, 220.0), (340.0, 290.0)]));
    }

    #[test]
    fn assemble_keeps_fanout_jog_orthogonal() {
        let skeleton = Skeleton {
            start: Point::new(100.0, 100.0),
            start_stub: Point::new(100.0, 110.0),
            start_anchor: Point::new(100.0, 110.0),
            near: Point::new(210.0, 280.0),
            lead: Point::new(200.0, 280.0),
            end: Point::new(200.0, 290.0),
        };
        let routed = pts(&[(100.0, 110.0), (100.0, 150.0), (210.0, 150.0), (210.0, 270.0)]);
        let path = assemble(&skeleton, &routed);
        assert!(is_orthogonal(&path));
        assert_eq!(path.first(), Some(&skeleton.start));
        assert_eq!(path.last(), Some(&skeleton.end));
        assert_eq!(
            path,
            pts(&[
                (100.0, 100.0),
                (100.0, 150.0),
                (210.0, 150.0),
                (210.0, 280.0),
                (200.0, 280.0),
                (200.0, 290.0),
            ])
        );
    }
}
