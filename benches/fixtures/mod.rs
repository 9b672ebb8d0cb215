// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use panelroute::model::{ConnectionId, ConnectorRef, Panel, PartId, Port};
use panelroute::ops::{apply_ops, PanelOp};
use panelroute::PanelGeometry;

pub const PANEL_WIDTH: f64 = 1100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// One rail, four parts, three wires.
    Small,
    /// Two rails, six parts each, 16 wires.
    Medium,
    /// Four full rails (nine parts each), 60 wires with heavy fan-out.
    LargeDense,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeDense => "large_dense",
        }
    }

    fn shape(self) -> (usize, usize, usize) {
        // (rails, parts per rail, wires)
        match self {
            Self::Small => (1, 4, 3),
            Self::Medium => (2, 6, 16),
            Self::LargeDense => (4, 9, 60),
        }
    }
}

pub fn part_id(rail: usize, slot: usize) -> PartId {
    PartId::new(format!("p{rail}_{slot}")).expect("part id")
}

pub fn connection_id(idx: usize) -> ConnectionId {
    ConnectionId::new(format!("w{idx:04}")).expect("connection id")
}

/// Ops that build the fixture on an empty panel.
pub fn build_ops(case: Case) -> Vec<PanelOp> {
    let (rails, per_rail, wires) = case.shape();
    let pitch = if per_rail > 1 { 600.0 / (per_rail - 1) as f64 } else { 0.0 };

    let mut ops = vec![PanelOp::SetRailCount { rail_count: rails }];
    let mut parts = Vec::with_capacity(rails * per_rail);
    for rail in 0..rails {
        for slot in 0..per_rail {
            let id = part_id(rail, slot);
            parts.push(id.clone());
            ops.push(PanelOp::PlacePart {
                part_id: id,
                label: format!("B{rail}{slot}"),
                rail_index: rail,
                x: slot as f64 * pitch,
                width: 70.0,
                height: 120.0,
            });
        }
    }

    for idx in 0..wires {
        let from_index = idx.wrapping_mul(7) % parts.len();
        let mut to_index = idx.wrapping_mul(7).wrapping_add(per_rail + 1) % parts.len();
        if to_index == from_index {
            to_index = (to_index + 1) % parts.len();
        }
        let from_port = if idx % 2 == 0 { Port::Bottom } else { Port::Top };
        let to_port = if idx % 3 == 0 { Port::Bottom } else { Port::Top };
        ops.push(PanelOp::AddConnection {
            connection_id: connection_id(idx),
            from: ConnectorRef::new(parts[from_index].clone(), from_port),
            to: ConnectorRef::new(parts[to_index].clone(), to_port),
            color: "#D32F2F".to_owned(),
        });
    }
    ops
}

pub fn panel(case: Case) -> Panel {
    let mut panel = Panel::new(PanelGeometry::default(), PANEL_WIDTH);
    apply_ops(&mut panel, 0, &build_ops(case)).expect("fixture ops");
    panel
}

pub fn checksum_paths<'a>(paths: impl IntoIterator<Item = &'a [panelroute::model::Point]>) -> u64 {
    let mut acc = 0u64;
    for points in paths {
        acc = acc.wrapping_mul(131).wrapping_add(points.len() as u64);
        for p in points {
            acc = acc.wrapping_mul(131).wrapping_add(p.x.to_bits());
            acc = acc.wrapping_mul(131).wrapping_add(p.y.to_bits());
        }
    }
    acc
}
