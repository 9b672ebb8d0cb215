// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geometry::Point;
use super::ids::{ConnectionId, PartId};
use super::part::ConnectorRef;

/// A wire between two connectors.
///
/// Auto wires are routed on demand. Once promoted, a wire is manual: `manual_points` is the
/// user's polyline and is re-anchored to the live connectors on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    connection_id: ConnectionId,
    from: ConnectorRef,
    to: ConnectorRef,
    color: String,
    manual: bool,
    manual_points: Vec<Point>,
}

impl Connection {
    pub fn new(
        connection_id: ConnectionId,
        from: ConnectorRef,
        to: ConnectorRef,
        color: impl Into<String>,
    ) -> Self {
        Self {
            connection_id,
            from,
            to,
            color: color.into(),
            manual: false,
            manual_points: Vec::new(),
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn from(&self) -> &ConnectorRef {
        &self.from
    }

    pub fn to(&self) -> &ConnectorRef {
        &self.to
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn manual_points(&self) -> &[Point] {
        &self.manual_points
    }

    /// The stored polyline, if this wire renders from it.
    pub fn manual_template(&self) -> Option<&[Point]> {
        (self.manual && self.manual_points.len() >= 2).then_some(self.manual_points.as_slice())
    }

    pub fn touches_part(&self, part_id: &PartId) -> bool {
        self.from.part_id() == part_id || self.to.part_id() == part_id
    }

    pub fn touches_connector(&self, connector: &ConnectorRef) -> bool {
        &self.from == connector || &self.to == connector
    }

    /// The endpoint at the other end from `connector`.
    pub fn other_end(&self, connector: &ConnectorRef) -> &ConnectorRef {
        if &self.from == connector {
            &self.to
        } else {
            &self.from
        }
    }

    pub(crate) fn set_manual_points(&mut self, points: Vec<Point>) {
        self.manual = true;
        self.manual_points = points;
    }
}
