// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-edited wires: promotion, re-anchoring and whole-path drags.

use crate::model::{Connection, Point};

use super::simplify::join_orthogonal;

/// Returns `conn` switched to manual with `rendered` as its polyline.
///
/// `None` when `rendered` has fewer than two points.
pub fn promote_to_manual(conn: &Connection, rendered: &[Point]) -> Option<Connection> {
    if rendered.len() < 2 {
        return None;
    }
    let mut promoted = conn.clone();
    promoted.set_manual_points(rendered.to_vec());
    Some(promoted)
}

/// Re-anchors a stored manual polyline to the live connector positions.
///
/// The first and last stored points are replaced by `live_start` and `live_end`. The adjacent
/// interior points follow them along the stored segment orientation: a vertical first segment
/// keeps its X locked to `live_start.x`, a horizontal one its Y to `live_start.y`, and the same
/// at the far end. Feeding back the stored endpoints returns the stored polyline unchanged.
pub fn reconcile(stored: &[Point], live_start: Point, live_end: Point) -> Vec<Point> {
    let n = stored.len();
    if n < 2 {
        return join_orthogonal(&[live_start, live_end]);
    }

    let start_vertical = stored[1].x == stored[0].x;
    let end_vertical = stored[n - 1].x == stored[n - 2].x;

    let mut out = Vec::with_capacity(n + 2);
    out.push(live_start);
    if n == 2 {
        if !live_start.is_axis_aligned_with(live_end) {
            if start_vertical {
                let mid_y = (live_start.y + live_end.y) / 2.0;
                out.push(Point::new(live_start.x, mid_y));
                out.push(Point::new(live_end.x, mid_y));
            } else {
                let mid_x = (live_start.x + live_end.x) / 2.0;
                out.push(Point::new(mid_x, live_start.y));
                out.push(Point::new(mid_x, live_end.y));
            }
        }
        out.push(live_end);
        return out;
    }

    let interior_start = out.len();
    out.extend_from_slice(&stored[1..n - 1]);
    let interior_end = out.len() - 1;

    let first = &mut out[interior_start];
    if start_vertical {
        first.x = live_start.x;
    } else {
        first.y = live_start.y;
    }
    let last = &mut out[interior_end];
    if end_vertical {
        last.x = live_end.x;
    } else {
        last.y = live_end.y;
    }
    out.push(live_end);

    join_orthogonal(&out)
}

/// Shifts every point by `(dx, dy)`.
pub fn translate(points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    points.iter().map(|p| p.offset(dx, dy)).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{promote_to_manual, reconcile, translate};
    use crate::model::fixtures::wire;
    use crate::model::Point;
    use crate::route::simplify::is_orthogonal;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn u_shape() -> Vec<Point> {
        pts(&[(100.0, 120.0), (100.0, 60.0), (300.0, 60.0), (300.0, 120.0)])
    }

    #[rstest]
    #[case(u_shape())]
    #[case(pts(&[(0.0, 0.0), (0.0, 50.0), (80.0, 50.0)]))]
    #[case(pts(&[(0.0, 0.0), (40.0, 0.0), (40.0, 30.0), (90.0, 30.0), (90.0, 70.0)]))]
    #[case(pts(&[(0.0, 0.0), (0.0, 70.0)]))]
    fn unchanged_endpoints_reproduce_the_stored_path(#[case] stored: Vec<Point>) {
        let start = stored[0];
        let end = stored[stored.len() - 1];
        assert_eq!(reconcile(&stored, start, end), stored);
    }

    #[test]
    fn moved_start_drags_the_first_vertical_leg() {
        let live_start = Point::new(140.0, 130.0);
        let path = reconcile(&u_shape(), live_start, Point::new(300.0, 120.0));
        assert_eq!(
            path,
            pts(&[(140.0, 130.0), (140.0, 60.0), (300.0, 60.0), (300.0, 120.0)])
        );
        assert!(is_orthogonal(&path));
    }

    #[test]
    fn horizontal_end_leg_follows_live_y() {
        let stored = pts(&[(0.0, 0.0), (0.0, 50.0), (80.0, 50.0)]);
        let path = reconcile(&stored, Point::new(0.0, 0.0), Point::new(80.0, 65.0));
        assert_eq!(path, pts(&[(0.0, 0.0), (0.0, 65.0), (80.0, 65.0)]));
    }

    #[test]
    fn two_point_template_bridges_with_a_z() {
        let stored = pts(&[(0.0, 0.0), (0.0, 100.0)]);
        let path = reconcile(&stored, Point::new(0.0, 0.0), Point::new(40.0, 100.0));
        assert_eq!(path, pts(&[(0.0, 0.0), (0.0, 50.0), (40.0, 50.0), (40.0, 100.0)]));
        assert!(is_orthogonal(&path));
    }

    #[test]
    fn translate_shifts_every_point() {
        let moved = translate(&u_shape(), 10.0, -20.0);
        assert_eq!(moved, pts(&[(110.0, 100.0), (110.0, 40.0), (310.0, 40.0), (310.0, 100.0)]));
    }

    #[test]
    fn promotion_needs_a_rendered_path() {
        let conn = wire("w", "a:top", "b:top");
        assert_eq!(promote_to_manual(&conn, &[Point::new(0.0, 0.0)]), None);

        let promoted = promote_to_manual(&conn, &u_shape()).expect("promoted");
        assert!(promoted.is_manual());
        assert_eq!(promoted.manual_points(), u_shape().as_slice());
        assert_eq!(promoted.connection_id(), conn.connection_id());
    }
}
