// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::config::PanelGeometry;

use super::connection::Connection;
use super::geometry::{Point, Rect, Size};
use super::ids::{ConnectionId, PartId};
use super::part::{ConnectorRef, Part, Port};

/// Layout state of one distribution board: rails, the parts on them and the wires between.
///
/// Owned by a session; the router only reads it. All mutation goes through
/// [`crate::ops::apply_ops`], which bumps `rev`.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    geometry: PanelGeometry,
    width: f64,
    rail_count: usize,
    parts: BTreeMap<PartId, Part>,
    connections: BTreeMap<ConnectionId, Connection>,
    rev: u64,
}

impl Panel {
    /// Creates an empty panel `width` pixels wide with a single rail.
    pub fn new(geometry: PanelGeometry, width: f64) -> Self {
        Self {
            geometry,
            width,
            rail_count: 1,
            parts: BTreeMap::new(),
            connections: BTreeMap::new(),
            rev: 0,
        }
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn rail_count(&self) -> usize {
        self.rail_count
    }

    pub fn parts(&self) -> &BTreeMap<PartId, Part> {
        &self.parts
    }

    pub fn connections(&self) -> &BTreeMap<ConnectionId, Connection> {
        &self.connections
    }

    pub fn part(&self, part_id: &PartId) -> Option<&Part> {
        self.parts.get(part_id)
    }

    pub fn connection(&self, connection_id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(connection_id)
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub(crate) fn parts_mut(&mut self) -> &mut BTreeMap<PartId, Part> {
        &mut self.parts
    }

    pub(crate) fn connections_mut(&mut self) -> &mut BTreeMap<ConnectionId, Connection> {
        &mut self.connections
    }

    pub(crate) fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub(crate) fn set_rail_count(&mut self, rail_count: usize) {
        self.rail_count = rail_count;
    }

    pub(crate) fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    /// X where the rails start; rails are centred horizontally.
    pub fn rail_left(&self) -> f64 {
        ((self.width - self.geometry.rail_width) / 2.0).floor().max(0.0)
    }

    pub fn rail_right(&self) -> f64 {
        self.rail_left() + self.geometry.rail_width
    }

    pub fn rail_y(&self, rail_index: usize) -> f64 {
        (rail_index + 1) as f64 * self.geometry.rail_spacing
    }

    pub fn rail_ys(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.rail_count).map(move |idx| self.rail_y(idx))
    }

    pub fn height(&self) -> f64 {
        match self.rail_count {
            0 => self.geometry.last_bottom_margin,
            n => self.rail_y(n - 1) + self.geometry.last_bottom_margin,
        }
    }

    /// Routing area. A panel without a measured width falls back to twice the rail width.
    pub fn routing_bounds(&self) -> Size {
        let w = if self.width > 0.0 {
            self.width
        } else {
            self.rail_left() + self.geometry.rail_width * 2.0
        };
        Size::new(w, self.height())
    }

    /// Absolute panel-space rectangle of a part.
    pub fn part_rect(&self, part: &Part) -> Rect {
        Rect::new(
            self.rail_left() + part.x(),
            self.rail_y(part.rail_index()) + part.y(),
            part.width(),
            part.height(),
        )
    }

    pub fn part_center_x(&self, part: &Part) -> f64 {
        self.rail_left() + part.x() + part.width() / 2.0
    }

    /// Center of a connector, inset half a connector size from the part edge.
    ///
    /// `None` when the part no longer exists.
    pub fn connector_center(&self, connector: &ConnectorRef) -> Option<Point> {
        let part = self.parts.get(connector.part_id())?;
        let rect = self.part_rect(part);
        let half = self.geometry.connector_size / 2.0;
        let y = match connector.port() {
            Port::Top => rect.y + half,
            Port::Bottom => rect.bottom() - half,
        };
        Some(Point::new(rect.center_x(), y))
    }

    fn parts_on_rail(&self, rail_index: usize) -> impl Iterator<Item = &Part> + '_ {
        self.parts.values().filter(move |p| p.rail_index() == rail_index)
    }

    pub fn is_leftmost_on_rail(&self, part: &Part) -> bool {
        let min_x = self.parts_on_rail(part.rail_index()).map(Part::x).fold(f64::INFINITY, f64::min);
        min_x.is_finite() && (part.x() - min_x).abs() <= self.geometry.placement_grid
    }

    pub fn is_rightmost_on_rail(&self, part: &Part) -> bool {
        let max_right =
            self.parts_on_rail(part.rail_index()).map(Part::right).fold(f64::NEG_INFINITY, f64::max);
        max_right.is_finite() && (part.right() - max_right).abs() <= self.geometry.placement_grid
    }

    /// Centers within one placement-grid step of each other.
    pub fn vertically_aligned(&self, a: &Part, b: &Part) -> bool {
        (self.part_center_x(a) - self.part_center_x(b)).abs() <= self.geometry.placement_grid
    }

    /// Every connection with either end on `connector`.
    pub fn connections_at(&self, connector: &ConnectorRef) -> impl Iterator<Item = &Connection> + '_ {
        let connector = connector.clone();
        self.connections.values().filter(move |c| c.touches_connector(&connector))
    }

    /// Connections whose both endpoint parts still exist, in render order
    /// (source part id, then connection id).
    pub fn ordered_connections(&self) -> Vec<&Connection> {
        let mut visible = self
            .connections
            .values()
            .filter(|c| {
                self.parts.contains_key(c.from().part_id()) && self.parts.contains_key(c.to().part_id())
            })
            .collect::<Vec<_>>();
        visible.sort_by(|a, b| {
            a.from()
                .part_id()
                .cmp(b.from().part_id())
                .then_with(|| a.connection_id().cmp(b.connection_id()))
        });
        visible
    }

    /// Whether a part `width` wide at `x` would overlap another part on `rail_index`.
    pub fn collides(&self, rail_index: usize, x: f64, width: f64, ignore: Option<&PartId>) -> bool {
        self.colliding_part(rail_index, x, width, ignore).is_some()
    }

    /// First part on `rail_index` (by id) that a part `width` wide at `x` would overlap.
    pub fn colliding_part(
        &self,
        rail_index: usize,
        x: f64,
        width: f64,
        ignore: Option<&PartId>,
    ) -> Option<&Part> {
        self.parts_on_rail(rail_index)
            .filter(|p| Some(p.part_id()) != ignore)
            .find(|p| p.overlaps_horizontally(x, width))
    }
}
