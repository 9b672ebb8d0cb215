// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Automatic orthogonal wire routing.
//!
//! For each auto wire the router builds a [`RoutePlan`] (anchors and obstacles), runs a
//! turn-penalised A* between the anchors on a coarse grid and stitches the connector stubs back
//! on. Manual wires skip the search and are re-anchored instead. Results are memoised until the
//! next [`Router::invalidate`].

pub mod cache;
pub mod fanout;
pub mod grid;
pub mod manual;
pub mod obstacles;
pub mod simplify;


use crate::config::RouterConfig;
use crate::model::{Connection, ConnectionId, Panel, Point};

pub use cache::RouteCache;
pub use fanout::{lane_offset, lane_slot, LaneSlot};
pub use grid::{fallback, find_path, route_orthogonal, SearchScratch};
pub use manual::{promote_to_manual, reconcile, translate};
pub use obstacles::{plan_route, RouteKind, RoutePlan, Side};
pub use simplify::{assemble, is_orthogonal, join_orthogonal, simplify};

fn route_planned(plan: &RoutePlan, config: &RouterConfig, scratch: &mut SearchScratch) -> Vec<Point> {
    let routed = route_orthogonal(
        plan.start_anchor,
        plan.end_anchor,
        &plan.obstacles,
        plan.bounds,
        config.step,
        config.turn_penalty,
        scratch,
    );
    assemble(&plan.skeleton(config.step), &routed)
}

/// Auto-routes one connection without any cache; ignores the manual flag.
///
/// `None` when either endpoint part is missing.
pub fn route_connection(panel: &Panel, conn: &Connection, config: &RouterConfig) -> Option<Vec<Point>> {
    let plan = plan_route(panel, conn, config, &[])?;
    let mut scratch = SearchScratch::new();
    Some(route_planned(&plan, config, &mut scratch))
}

/// Cache-aware path resolution for every wire of a panel.
#[derive(Debug, Default)]
pub struct Router {
    config: RouterConfig,
    cache: RouteCache,
    scratch: SearchScratch,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self { config, cache: RouteCache::new(), scratch: SearchScratch::new() }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// Forgets every memoised auto path.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
        tracing::debug!(epoch = self.cache.epoch(), "route cache invalidated");
    }

    /// The path to draw for `connection_id`: re-anchored manual polyline or auto route.
    pub fn path(&mut self, panel: &Panel, connection_id: &ConnectionId) -> Option<Vec<Point>> {
        let conn = panel.connection(connection_id)?;
        match conn.manual_template() {
            Some(template) => {
                let step = self.config.step;
                let start = panel.connector_center(conn.from())?.snapped(step);
                let end = panel.connector_center(conn.to())?.snapped(step);
                Some(reconcile(template, start, end))
            }
            None => self.auto_path(panel, connection_id),
        }
    }

    /// The auto route for `connection_id`, whether or not the wire is manual.
    pub fn auto_path(&mut self, panel: &Panel, connection_id: &ConnectionId) -> Option<Vec<Point>> {
        if let Some(hit) = self.cache.get(connection_id) {
            tracing::trace!(connection = %connection_id, "route cache hit");
            return Some(hit.to_vec());
        }

        let conn = panel.connection(connection_id)?;
        let preceding = if self.config.avoid_routed_wires {
            self.preceding_paths(panel, connection_id)
        } else {
            Vec::new()
        };
        let others = preceding.iter().map(Vec::as_slice).collect::<Vec<_>>();
        let plan = plan_route(panel, conn, &self.config, &others)?;

        let path = route_planned(&plan, &self.config, &mut self.scratch);
        self.cache.insert(connection_id.clone(), path.clone());
        Some(path)
    }

    /// Drawn paths of the wires ahead of `connection_id` in render order.
    ///
    /// Routing them first keeps each wire's obstacles independent of which siblings happen to be
    /// cached.
    fn preceding_paths(&mut self, panel: &Panel, connection_id: &ConnectionId) -> Vec<Vec<Point>> {
        let ahead = panel
            .ordered_connections()
            .into_iter()
            .map(|c| c.connection_id().clone())
            .take_while(|id| id != connection_id)
            .collect::<Vec<_>>();
        ahead.iter().filter_map(|id| self.path(panel, id)).collect()
    }

    /// Paths of every visible connection, in render order.
    pub fn render_all(&mut self, panel: &Panel) -> Vec<(ConnectionId, Vec<Point>)> {
        let ids = panel
            .ordered_connections()
            .into_iter()
            .map(|c| c.connection_id().clone())
            .collect::<Vec<_>>();
        ids.into_iter()
            .filter_map(|id| self.path(panel, &id).map(|path| (id, path)))
            .collect()
    }

    /// Snapshot of the currently rendered path as a manual copy of the connection.
    pub fn promote(&mut self, panel: &Panel, connection_id: &ConnectionId) -> Option<Connection> {
        let rendered = self.path(panel, connection_id)?;
        let conn = panel.connection(connection_id)?;
        promote_to_manual(conn, &rendered)
    }
}
