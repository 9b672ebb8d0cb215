// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::PanelGeometry;

use super::connection::Connection;
use super::ids::{ConnectionId, PartId};
use super::panel::Panel;
use super::part::{ConnectorRef, Part};

/// Panel width used by fixtures; puts `rail_left` at 200.
pub(crate) const PANEL_WIDTH: f64 = 1100.0;

pub(crate) fn pid(value: &str) -> PartId {
    PartId::new(value).expect("part id")
}

pub(crate) fn cid(value: &str) -> ConnectionId {
    ConnectionId::new(value).expect("connection id")
}

pub(crate) fn cref(value: &str) -> ConnectorRef {
    value.parse().expect("connector ref")
}

pub(crate) fn part(id: &str, rail_index: usize, x: f64, width: f64, height: f64) -> Part {
    Part::new(pid(id), id.to_uppercase(), rail_index, x, width, height)
}

/// A standard 70x120 breaker.
pub(crate) fn breaker(id: &str, rail_index: usize, x: f64) -> Part {
    part(id, rail_index, x, 70.0, 120.0)
}

pub(crate) fn wire(id: &str, from: &str, to: &str) -> Connection {
    Connection::new(cid(id), cref(from), cref(to), "#D32F2F")
}

pub(crate) fn panel_with(rail_count: usize, parts: Vec<Part>, wires: Vec<Connection>) -> Panel {
    let mut panel = Panel::new(PanelGeometry::default(), PANEL_WIDTH);
    panel.set_rail_count(rail_count);
    for part in parts {
        panel.parts_mut().insert(part.part_id().clone(), part);
    }
    for conn in wires {
        panel.connections_mut().insert(conn.connection_id().clone(), conn);
    }
    panel
}

pub(crate) fn two_rail_panel(parts: Vec<Part>) -> Panel {
    panel_with(2, parts, Vec::new())
}
