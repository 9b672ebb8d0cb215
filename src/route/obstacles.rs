// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-wire search setup: anchors, classification and the obstacle set.

use smallvec::SmallVec;

use crate::config::RouterConfig;
use crate::model::{snap, Connection, Panel, Part, Point, Port, Rect, Size};

use super::fanout::lane_offset;
use super::simplify::Skeleton;

/// Which side of the rails a cross-rail wire is kept on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Both parts on one rail.
    SameRail,
    /// Stacked parts wired lower-top to upper-bottom; the rails between them are not obstacles.
    DirectVertical,
    /// Different rails; `side` is set when the source sits at a rail end.
    CrossRail { side: Option<Side> },
}

/// Everything the grid search needs for one wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub kind: RouteKind,
    /// Source connector center, snapped to the routing grid.
    pub start: Point,
    pub start_stub: Point,
    pub start_anchor: Point,
    pub end: Point,
    pub end_port: Port,
    pub end_stub: Point,
    /// Destination stub shifted onto the wire's fan-out lane.
    pub end_anchor: Point,
    pub obstacles: SmallVec<[Rect; 16]>,
    pub bounds: Size,
}

impl RoutePlan {
    pub fn skeleton(&self, step: f64) -> Skeleton {
        let near = Point::new(self.end_anchor.x, self.end.y + self.end_port.stub_dir() * step);
        Skeleton {
            start: self.start,
            start_stub: self.start_stub,
            start_anchor: self.start_anchor,
            near,
            lead: Point::new(self.end.x, near.y),
            end: self.end,
        }
    }

    /// Y range covered by the two stubs.
    pub fn stub_span(&self) -> (f64, f64) {
        let (a, b) = (self.start_stub.y, self.end_stub.y);
        (a.min(b), a.max(b))
    }
}

fn is_direct_vertical(panel: &Panel, conn: &Connection, from: &Part, to: &Part) -> bool {
    if !panel.vertically_aligned(from, to) {
        return false;
    }
    let from_is_upper = panel.rail_y(from.rail_index()) < panel.rail_y(to.rail_index());
    let (upper_port, lower_port) = if from_is_upper {
        (conn.from().port(), conn.to().port())
    } else {
        (conn.to().port(), conn.from().port())
    };
    upper_port == Port::Bottom && lower_port == Port::Top
}

fn classify(panel: &Panel, conn: &Connection, from: &Part, to: &Part) -> RouteKind {
    if from.rail_index() == to.rail_index() {
        return RouteKind::SameRail;
    }
    if is_direct_vertical(panel, conn, from, to) {
        return RouteKind::DirectVertical;
    }
    let side = if panel.is_leftmost_on_rail(from) {
        Some(Side::Left)
    } else if panel.is_rightmost_on_rail(from) {
        Some(Side::Right)
    } else {
        None
    };
    RouteKind::CrossRail { side }
}

/// Builds the search setup for `conn`, or `None` when either endpoint part is gone.
///
/// `other_wires` are already routed sibling paths; they only become obstacles when
/// [`RouterConfig::avoid_routed_wires`] is set.
pub fn plan_route(
    panel: &Panel,
    conn: &Connection,
    config: &RouterConfig,
    other_wires: &[&[Point]],
) -> Option<RoutePlan> {
    let step = config.step;
    let stub_len = config.effective_stub_len();

    let from_part = panel.part(conn.from().part_id())?;
    let to_part = panel.part(conn.to().part_id())?;
    let start = panel.connector_center(conn.from())?.snapped(step);
    let end = panel.connector_center(conn.to())?.snapped(step);

    let from_port = conn.from().port();
    let end_port = conn.to().port();
    let start_stub = Point::new(start.x, snap(start.y + from_port.stub_dir() * stub_len, step));
    let end_stub = Point::new(end.x, snap(end.y + end_port.stub_dir() * stub_len, step));

    let end_lane = lane_offset(panel, conn.to(), conn.connection_id(), config.fanout_gap, step);
    let end_anchor = Point::new(snap(end_stub.x + end_lane, step), end_stub.y);
    let start_anchor = if config.fanout_at_source {
        let start_lane =
            lane_offset(panel, conn.from(), conn.connection_id(), config.fanout_gap, step);
        Point::new(snap(start_stub.x + start_lane, step), start_stub.y)
    } else {
        start_stub
    };

    let kind = classify(panel, conn, from_part, to_part);
    let bounds = panel.routing_bounds();
    let mut plan = RoutePlan {
        kind,
        start,
        start_stub,
        start_anchor,
        end,
        end_port,
        end_stub,
        end_anchor,
        obstacles: SmallVec::new(),
        bounds,
    };
    let (min_y, max_y) = plan.stub_span();

    if let RouteKind::CrossRail { side: Some(side) } = kind {
        let wall = match side {
            Side::Left => Rect::new(
                panel.rail_right(),
                min_y,
                (bounds.w - panel.rail_right()).max(1.0),
                max_y - min_y,
            ),
            Side::Right => Rect::new(0.0, min_y, panel.rail_left().max(1.0), max_y - min_y),
        };
        plan.obstacles.push(wall);
    }

    plan.obstacles.extend(
        panel.parts().values().map(|part| panel.part_rect(part).inflate(config.obstacle_clearance)),
    );

    let geometry = panel.geometry();
    for rail_y in panel.rail_ys() {
        if kind == RouteKind::DirectVertical && (min_y..=max_y).contains(&rail_y) {
            continue;
        }
        plan.obstacles.push(Rect::new(
            panel.rail_left(),
            rail_y - config.rail_block_thickness / 2.0,
            geometry.rail_width,
            config.rail_block_thickness,
        ));
    }

    plan.obstacles.push(Rect::cell(
        end_anchor.x,
        end_anchor.y - end_port.stub_dir() * step,
        step,
    ));

    if config.avoid_routed_wires {
        for wire in other_wires {
            plan.obstacles.extend(
                wire.windows(2)
                    .map(|seg| Rect::spanning(seg[0], seg[1]).inflate(config.wire_clearance)),
            );
        }
    }

    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::{plan_route, RouteKind, Side};
    use crate::config::RouterConfig;
    use crate::model::fixtures::{breaker, cid, panel_with, part, wire};
    use crate::model::{Point, Rect};

    fn config() -> RouterConfig {
        RouterConfig::default()
    }

    #[test]
    fn anchors_snap_and_step_away_from_the_part() {
        let panel = panel_with(
            2,
            vec![breaker("a", 0, 100.0), breaker("b", 1, 100.0)],
            vec![wire("w", "a:bottom", "b:top")],
        );
        let conn = panel.connection(&cid("w")).unwrap();
        let plan = plan_route(&panel, conn, &config(), &[]).expect("plan");

        assert_eq!(plan.start, Point::new(340.0, 220.0));
        assert_eq!(plan.start_stub, Point::new(340.0, 230.0));
        assert_eq!(plan.end, Point::new(340.0, 290.0));
        assert_eq!(plan.end_stub, Point::new(340.0, 280.0));
        assert_eq!(plan.end_anchor, plan.end_stub);
        assert_eq!(plan.kind, RouteKind::DirectVertical);
    }

    #[test]
    fn direct_vertical_exempts_rails_inside_the_stub_span() {
        let panel = panel_with(
            3,
            vec![part("a", 0, 100.0, 70.0, 340.0), breaker("b", 2, 100.0)],
            vec![wire("w", "b:top", "a:bottom")],
        );
        let conn = panel.connection(&cid("w")).unwrap();
        let plan = plan_route(&panel, conn, &config(), &[]).expect("plan");
        assert_eq!(plan.kind, RouteKind::DirectVertical);
        assert_eq!(plan.stub_span(), (340.0, 450.0));

        let rail_block = |y: f64| Rect::new(200.0, y - 30.0, 700.0, 60.0);
        assert!(plan.obstacles.contains(&rail_block(170.0)));
        assert!(!plan.obstacles.contains(&rail_block(340.0)));
        assert!(plan.obstacles.contains(&rail_block(510.0)));
    }

    #[test]
    fn misaligned_cross_rail_blocks_every_rail_and_the_far_side() {
        let panel = panel_with(
            2,
            vec![breaker("a", 0, 0.0), breaker("x", 0, 300.0), breaker("b", 1, 400.0)],
            vec![wire("w", "a:bottom", "b:top")],
        );
        let conn = panel.connection(&cid("w")).unwrap();
        let plan = plan_route(&panel, conn, &config(), &[]).expect("plan");

        assert_eq!(plan.kind, RouteKind::CrossRail { side: Some(Side::Left) });
        assert!(plan.obstacles.contains(&Rect::new(900.0, 230.0, 200.0, 50.0)));
        assert!(plan.obstacles.contains(&Rect::new(200.0, 140.0, 700.0, 60.0)));
        assert!(plan.obstacles.contains(&Rect::new(200.0, 310.0, 700.0, 60.0)));
    }

    #[test]
    fn rightmost_source_keeps_wire_on_the_right() {
        let panel = panel_with(
            2,
            vec![breaker("x", 0, 0.0), breaker("a", 0, 300.0), breaker("b", 1, 0.0)],
            vec![wire("w", "a:bottom", "b:top")],
        );
        let conn = panel.connection(&cid("w")).unwrap();
        let plan = plan_route(&panel, conn, &config(), &[]).expect("plan");
        assert_eq!(plan.kind, RouteKind::CrossRail { side: Some(Side::Right) });
        assert!(plan.obstacles.contains(&Rect::new(0.0, 230.0, 200.0, 50.0)));
    }

    #[test]
    fn guard_cell_sits_between_anchor_and_connector() {
        let panel = panel_with(
            1,
            vec![breaker("a", 0, 0.0), breaker("b", 0, 300.0)],
            vec![wire("w", "a:top", "b:top")],
        );
        let conn = panel.connection(&cid("w")).unwrap();
        let plan = plan_route(&panel, conn, &config(), &[]).expect("plan");
        assert_eq!(plan.kind, RouteKind::SameRail);
        assert_eq!(plan.end_anchor, Point::new(540.0, 110.0));
        assert_eq!(plan.obstacles.last(), Some(&Rect::cell(540.0, 120.0, 10.0)));
    }

    #[test]
    fn parts_are_inflated_by_clearance() {
        let panel = panel_with(
            1,
            vec![breaker("a", 0, 0.0), breaker("b", 0, 300.0)],
            vec![wire("w", "a:top", "b:top")],
        );
        let conn = panel.connection(&cid("w")).unwrap();
        let plan = plan_route(&panel, conn, &config(), &[]).expect("plan");
        assert!(plan.obstacles.contains(&Rect::new(195.0, 105.0, 80.0, 130.0)));
    }

    #[test]
    fn routed_wires_only_block_when_enabled() {
        let panel = panel_with(
            1,
            vec![breaker("a", 0, 0.0), breaker("b", 0, 300.0)],
            vec![wire("w", "a:top", "b:top")],
        );
        let conn = panel.connection(&cid("w")).unwrap();
        let other = [Point::new(100.0, 50.0), Point::new(300.0, 50.0)];
        let wire_block = Rect::new(94.0, 44.0, 212.0, 12.0);

        let plan = plan_route(&panel, conn, &config(), &[&other[..]]).expect("plan");
        assert!(!plan.obstacles.contains(&wire_block));

        let mut avoiding = config();
        avoiding.avoid_routed_wires = true;
        let plan = plan_route(&panel, conn, &avoiding, &[&other[..]]).expect("plan");
        assert!(plan.obstacles.contains(&wire_block));
    }

    #[test]
    fn missing_part_yields_no_plan() {
        let panel = panel_with(1, vec![breaker("a", 0, 0.0)], vec![wire("w", "a:top", "gone:top")]);
        let conn = panel.connection(&cid("w")).unwrap();
        assert_eq!(plan_route(&panel, conn, &config(), &[]), None);
    }
}
