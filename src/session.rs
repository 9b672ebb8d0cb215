// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A panel together with its router.
//!
//! Every mutation goes through [`PanelSession::apply`], which invalidates the route cache before
//! returning, so reads never observe paths computed for an older layout.

use crate::config::Config;
use crate::model::{ConnectionId, Panel, Point};
use crate::ops::{apply_ops, ApplyError, ApplyResult, Delta, ObjectRef, PanelOp};
use crate::render::{self, RenderedWire};
use crate::route::{translate, Router};

#[derive(Debug)]
pub struct PanelSession {
    panel: Panel,
    router: Router,
}

impl PanelSession {
    /// An empty single-rail panel `width` pixels wide.
    pub fn new(config: &Config, width: f64) -> Self {
        Self::from_panel(Panel::new(config.panel, width), config)
    }

    pub fn from_panel(panel: Panel, config: &Config) -> Self {
        Self { panel, router: Router::new(config.router) }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn into_panel(self) -> Panel {
        self.panel
    }

    /// Applies `ops` against the current revision.
    pub fn apply(&mut self, ops: &[PanelOp]) -> Result<ApplyResult, ApplyError> {
        self.apply_at(self.panel.rev(), ops)
    }

    /// Applies `ops` only if the panel is still at `base_rev`.
    pub fn apply_at(&mut self, base_rev: u64, ops: &[PanelOp]) -> Result<ApplyResult, ApplyError> {
        let result = apply_ops(&mut self.panel, base_rev, ops)?;
        if result.applied > 0 {
            self.router.invalidate();
        }
        tracing::debug!(rev = result.new_rev, applied = result.applied, "panel ops applied");
        Ok(result)
    }

    pub fn path(&mut self, connection_id: &ConnectionId) -> Option<Vec<Point>> {
        self.router.path(&self.panel, connection_id)
    }

    pub fn render_all(&mut self) -> Vec<(ConnectionId, Vec<Point>)> {
        self.router.render_all(&self.panel)
    }

    /// Every visible wire with its color, ready to draw.
    pub fn render_wires(&mut self) -> Vec<RenderedWire> {
        render::render_wires(&self.panel, &mut self.router)
    }

    /// Selecting a wire hands it to the user: an auto wire is frozen into a manual one with its
    /// current path. Already-manual wires are left alone.
    pub fn select_connection(
        &mut self,
        connection_id: &ConnectionId,
    ) -> Result<ApplyResult, ApplyError> {
        let Some(conn) = self.panel.connection(connection_id) else {
            return Err(ApplyError::NotFound { object: ObjectRef::Connection(connection_id.clone()) });
        };
        if conn.is_manual() {
            return Ok(ApplyResult { new_rev: self.panel.rev(), applied: 0, delta: Delta::default() });
        }

        let Some(promoted) = self.router.promote(&self.panel, connection_id) else {
            return Err(ApplyError::InvalidManualPath {
                connection_id: connection_id.clone(),
                reason: "wire has no rendered path",
            });
        };
        self.apply(&[PanelOp::SetManualPath {
            connection_id: connection_id.clone(),
            points: promoted.manual_points().to_vec(),
        }])
    }

    /// Starts dragging a whole wire; the wire is promoted to manual first if needed.
    pub fn begin_wire_drag(&mut self, connection_id: &ConnectionId) -> Result<WireDrag, ApplyError> {
        self.select_connection(connection_id)?;
        let origin = self
            .panel
            .connection(connection_id)
            .map(|c| c.manual_points().to_vec())
            .unwrap_or_default();
        Ok(WireDrag { connection_id: connection_id.clone(), origin })
    }
}

/// An in-progress whole-wire drag.
///
/// Offsets are cumulative from the drag start, so repeated updates never accumulate rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct WireDrag {
    connection_id: ConnectionId,
    origin: Vec<Point>,
}

impl WireDrag {
    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn origin(&self) -> &[Point] {
        &self.origin
    }

    /// The op that moves the wire to `origin + (dx, dy)`.
    pub fn update(&self, dx: f64, dy: f64) -> PanelOp {
        PanelOp::SetManualPath {
            connection_id: self.connection_id.clone(),
            points: translate(&self.origin, dx, dy),
        }
    }
}
