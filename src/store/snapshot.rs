// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::config::PanelGeometry;
use crate::model::{ConnectionId, ConnectorRef, Panel, PartId, Point, Port};
use crate::ops::{apply_ops, PanelOp};

use super::StoreError;

pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a panel: rails, parts and wires, with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub width: f64,
    #[serde(default = "default_rail_count")]
    pub rail_count: usize,
    #[serde(default)]
    pub parts: Vec<PartRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

fn default_rail_count() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRecord {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub rail_index: usize,
    pub x: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortRecord {
    Top,
    Bottom,
}

impl From<Port> for PortRecord {
    fn from(port: Port) -> Self {
        match port {
            Port::Top => Self::Top,
            Port::Bottom => Self::Bottom,
        }
    }
}

impl From<PortRecord> for Port {
    fn from(port: PortRecord) -> Self {
        match port {
            PortRecord::Top => Self::Top,
            PortRecord::Bottom => Self::Bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorRecord {
    pub part_id: String,
    pub port: PortRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: String,
    pub from: ConnectorRecord,
    pub to: ConnectorRecord,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub manual: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manual_points: Vec<PointRecord>,
}

fn connector_record(connector: &ConnectorRef) -> ConnectorRecord {
    ConnectorRecord {
        part_id: connector.part_id().to_string(),
        port: connector.port().into(),
    }
}

fn connector_ref(record: &ConnectorRecord) -> Result<ConnectorRef, StoreError> {
    let part_id = PartId::new(&record.part_id)
        .map_err(|source| StoreError::Id { value: record.part_id.clone(), source })?;
    Ok(ConnectorRef::new(part_id, record.port.into()))
}

impl PanelSnapshot {
    pub fn capture(panel: &Panel) -> Self {
        let parts = panel
            .parts()
            .values()
            .map(|p| PartRecord {
                id: p.part_id().to_string(),
                label: p.label().to_owned(),
                rail_index: p.rail_index(),
                x: p.x(),
                w: p.width(),
                h: p.height(),
            })
            .collect();
        let connections = panel
            .connections()
            .values()
            .map(|c| ConnectionRecord {
                id: c.connection_id().to_string(),
                from: connector_record(c.from()),
                to: connector_record(c.to()),
                color: c.color().to_owned(),
                manual: c.is_manual(),
                manual_points: c
                    .manual_points()
                    .iter()
                    .map(|p| PointRecord { x: p.x, y: p.y })
                    .collect(),
            })
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            width: panel.width(),
            rail_count: panel.rail_count(),
            parts,
            connections,
        }
    }

    /// The ops that rebuild this snapshot on an empty single-rail panel.
    pub fn to_ops(&self) -> Result<Vec<PanelOp>, StoreError> {
        let mut ops = Vec::with_capacity(2 + self.parts.len() + self.connections.len() * 2);
        ops.push(PanelOp::SetPanelWidth { width: self.width });
        ops.push(PanelOp::SetRailCount { rail_count: self.rail_count });

        for part in &self.parts {
            let part_id = PartId::new(&part.id)
                .map_err(|source| StoreError::Id { value: part.id.clone(), source })?;
            ops.push(PanelOp::PlacePart {
                part_id,
                label: part.label.clone(),
                rail_index: part.rail_index,
                x: part.x,
                width: part.w,
                height: part.h,
            });
        }

        for conn in &self.connections {
            let connection_id = ConnectionId::new(&conn.id)
                .map_err(|source| StoreError::Id { value: conn.id.clone(), source })?;
            ops.push(PanelOp::AddConnection {
                connection_id: connection_id.clone(),
                from: connector_ref(&conn.from)?,
                to: connector_ref(&conn.to)?,
                color: conn.color.clone(),
            });
            // A manual flag without a usable polyline renders as auto.
            if conn.manual && conn.manual_points.len() >= 2 {
                ops.push(PanelOp::SetManualPath {
                    connection_id,
                    points: conn.manual_points.iter().map(|p| Point::new(p.x, p.y)).collect(),
                });
            }
        }
        Ok(ops)
    }

    /// Rebuilds the panel, validating it through the regular mutation path.
    pub fn into_panel(self, geometry: PanelGeometry) -> Result<Panel, StoreError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion { version: self.version });
        }
        let ops = self.to_ops()?;
        let mut panel = Panel::new(geometry, self.width);
        let base_rev = panel.rev();
        apply_ops(&mut panel, base_rev, &ops).map_err(|source| StoreError::Invalid { source })?;
        Ok(panel)
    }
}
