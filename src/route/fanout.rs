// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;

use crate::model::{snap, Connection, ConnectionId, ConnectorRef, Panel};

/// Position of one wire among all wires sharing a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSlot {
    pub index: usize,
    pub total: usize,
}

impl LaneSlot {
    pub const SOLO: LaneSlot = LaneSlot { index: 0, total: 1 };

    /// Horizontal offset of this lane, centred on the connector and snapped to `step`.
    pub fn offset(self, gap: f64, step: f64) -> f64 {
        if self.total <= 1 {
            return 0.0;
        }
        let centred = self.index as f64 - (self.total as f64 - 1.0) / 2.0;
        snap(centred * gap, step)
    }
}

fn lane_order(port: &ConnectorRef, a: &Connection, b: &Connection) -> Ordering {
    let other_a = a.other_end(port);
    let other_b = b.other_end(port);
    other_a
        .part_id()
        .cmp(other_b.part_id())
        .then_with(|| other_a.port().cmp(&other_b.port()))
        .then_with(|| a.connection_id().cmp(b.connection_id()))
}

/// Lane of `connection_id` among every connection touching `port`.
///
/// Ordering depends only on the far endpoints and ids, so insertion order never matters.
/// A connection that does not touch `port` gets [`LaneSlot::SOLO`].
pub fn lane_slot(panel: &Panel, port: &ConnectorRef, connection_id: &ConnectionId) -> LaneSlot {
    let mut sharing = panel.connections_at(port).collect::<Vec<_>>();
    if sharing.len() <= 1 {
        return LaneSlot::SOLO;
    }
    sharing.sort_by(|a, b| lane_order(port, a, b));

    match sharing.iter().position(|c| c.connection_id() == connection_id) {
        Some(index) => LaneSlot { index, total: sharing.len() },
        None => LaneSlot::SOLO,
    }
}

pub fn lane_offset(
    panel: &Panel,
    port: &ConnectorRef,
    connection_id: &ConnectionId,
    gap: f64,
    step: f64,
) -> f64 {
    lane_slot(panel, port, connection_id).offset(gap, step)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{lane_offset, lane_slot, LaneSlot};
    use crate::model::fixtures::{breaker, cid, cref, panel_with, wire};

    #[rstest]
    #[case(LaneSlot { index: 0, total: 3 }, -10.0)]
    #[case(LaneSlot { index: 1, total: 3 }, 0.0)]
    #[case(LaneSlot { index: 2, total: 3 }, 10.0)]
    #[case(LaneSlot { index: 0, total: 2 }, -10.0)]
    #[case(LaneSlot { index: 1, total: 2 }, 10.0)]
    #[case(LaneSlot::SOLO, 0.0)]
    fn lane_offsets_are_centred_and_snapped(#[case] slot: LaneSlot, #[case] expected: f64) {
        assert_eq!(slot.offset(10.0, 10.0), expected);
    }

    #[test]
    fn lanes_are_independent_of_insertion_order() {
        let parts = vec![
            breaker("hub", 1, 300.0),
            breaker("a", 0, 100.0),
            breaker("b", 0, 300.0),
            breaker("c", 0, 500.0),
        ];
        let forward = panel_with(
            2,
            parts.clone(),
            vec![wire("w3", "c:bottom", "hub:top"), wire("w1", "a:bottom", "hub:top"), wire("w2", "b:bottom", "hub:top")],
        );
        let hub = cref("hub:top");
        let offsets = |panel: &crate::model::Panel| {
            ["w1", "w2", "w3"].map(|id| lane_offset(panel, &hub, &cid(id), 10.0, 10.0))
        };
        assert_eq!(offsets(&forward), [-10.0, 0.0, 10.0]);

        let reversed = panel_with(
            2,
            parts,
            vec![wire("w2", "b:bottom", "hub:top"), wire("w1", "a:bottom", "hub:top"), wire("w3", "c:bottom", "hub:top")],
        );
        assert_eq!(offsets(&reversed), offsets(&forward));
    }

    #[test]
    fn lane_sort_uses_far_endpoint_before_connection_id() {
        let panel = panel_with(
            2,
            vec![breaker("hub", 1, 300.0), breaker("a", 0, 100.0), breaker("z", 0, 500.0)],
            vec![wire("w-first", "z:bottom", "hub:top"), wire("w-second", "a:bottom", "hub:top")],
        );
        let hub = cref("hub:top");
        assert_eq!(lane_slot(&panel, &hub, &cid("w-second")), LaneSlot { index: 0, total: 2 });
        assert_eq!(lane_slot(&panel, &hub, &cid("w-first")), LaneSlot { index: 1, total: 2 });
    }

    #[test]
    fn same_far_part_orders_top_port_first() {
        let panel = panel_with(
            2,
            vec![breaker("hub", 1, 300.0), breaker("a", 0, 100.0)],
            vec![wire("w1", "a:bottom", "hub:top"), wire("w2", "hub:top", "a:top")],
        );
        let hub = cref("hub:top");
        assert_eq!(lane_slot(&panel, &hub, &cid("w2")).index, 0);
        assert_eq!(lane_slot(&panel, &hub, &cid("w1")).index, 1);
    }

    #[test]
    fn lone_wire_has_no_offset() {
        let panel = panel_with(
            2,
            vec![breaker("hub", 1, 300.0), breaker("a", 0, 100.0)],
            vec![wire("w1", "a:bottom", "hub:top")],
        );
        assert_eq!(lane_slot(&panel, &cref("hub:top"), &cid("w1")), LaneSlot::SOLO);
    }
}
