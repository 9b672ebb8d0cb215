// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Part/connection/layout mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(panel: &mut Panel, op: &PanelOp, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
    match op {
        PanelOp::PlacePart { part_id, label, rail_index, x, width, height } => {
            if panel.part(part_id).is_some() {
                return Err(ApplyError::AlreadyExists { object: ObjectRef::Part(part_id.clone()) });
            }
            check_part_size(panel, *width, *height)?;
            check_rail(panel, *rail_index)?;
            let x = placement_x(panel, *x, *width)?;
            ensure_free(panel, part_id, *rail_index, x, *width)?;

            let part = Part::new(part_id.clone(), label.clone(), *rail_index, x, *width, *height);
            panel.parts_mut().insert(part_id.clone(), part);
            delta.record_added(ObjectRef::Part(part_id.clone()));
            Ok(())
        }
        PanelOp::MovePart { part_id, rail_index, x } => {
            let Some(width) = panel.part(part_id).map(Part::width) else {
                return Err(part_not_found(part_id));
            };
            check_rail(panel, *rail_index)?;
            let x = placement_x(panel, *x, width)?;
            ensure_free(panel, part_id, *rail_index, x, width)?;

            if let Some(part) = panel.parts_mut().get_mut(part_id) {
                part.set_position(*rail_index, x);
            }
            delta.record_updated(ObjectRef::Part(part_id.clone()));
            Ok(())
        }
        PanelOp::RemovePart { part_id } => {
            if panel.parts_mut().remove(part_id).is_none() {
                return Err(part_not_found(part_id));
            }
            prune_orphaned_connections(panel, delta);
            delta.record_removed(ObjectRef::Part(part_id.clone()));
            Ok(())
        }
        PanelOp::AddConnection { connection_id, from, to, color } => {
            if panel.connection(connection_id).is_some() {
                return Err(ApplyError::AlreadyExists {
                    object: ObjectRef::Connection(connection_id.clone()),
                });
            }
            if from.part_id() == to.part_id() {
                return Err(ApplyError::SelfLoop { connection_id: connection_id.clone() });
            }
            for end in [from, to] {
                if panel.part(end.part_id()).is_none() {
                    return Err(part_not_found(end.part_id()));
                }
            }

            let conn = Connection::new(connection_id.clone(), from.clone(), to.clone(), color.clone());
            panel.connections_mut().insert(connection_id.clone(), conn);
            delta.record_added(ObjectRef::Connection(connection_id.clone()));
            Ok(())
        }
        PanelOp::RemoveConnection { connection_id } => {
            if panel.connections_mut().remove(connection_id).is_none() {
                return Err(connection_not_found(connection_id));
            }
            delta.record_removed(ObjectRef::Connection(connection_id.clone()));
            Ok(())
        }
        PanelOp::SetRailCount { rail_count } => {
            let rail_count = (*rail_count).clamp(1, panel.geometry().max_rails);
            if rail_count == panel.rail_count() {
                return Ok(());
            }
            panel.set_rail_count(rail_count);

            let dropped = panel
                .parts()
                .values()
                .filter(|p| p.rail_index() >= rail_count)
                .map(|p| p.part_id().clone())
                .collect::<Vec<_>>();
            for part_id in dropped {
                panel.parts_mut().remove(&part_id);
                delta.record_removed(ObjectRef::Part(part_id));
            }
            prune_orphaned_connections(panel, delta);
            delta.record_updated(ObjectRef::Layout);
            Ok(())
        }
        PanelOp::SetPanelWidth { width } => {
            if !(width.is_finite() && *width >= 0.0) {
                return Err(ApplyError::InvalidGeometry {
                    reason: "panel width must be a non-negative number",
                });
            }
            if *width > MAX_PANEL_EXTENT {
                return Err(ApplyError::InvalidGeometry {
                    reason: "panel width exceeds the maximum panel extent",
                });
            }
            panel.set_width(*width);
            delta.record_updated(ObjectRef::Layout);
            Ok(())
        }
        PanelOp::SetManualPath { connection_id, points } => {
            check_manual_path(connection_id, points)?;
            let Some(conn) = panel.connections_mut().get_mut(connection_id) else {
                return Err(connection_not_found(connection_id));
            };
            conn.set_manual_points(points.clone());
            delta.record_updated(ObjectRef::Connection(connection_id.clone()));
            Ok(())
        }
        PanelOp::TranslateWire { connection_id, dx, dy } => {
            if !(dx.is_finite() && dy.is_finite()) {
                return Err(ApplyError::InvalidGeometry { reason: "translation must be finite" });
            }
            let Some(conn) = panel.connections_mut().get_mut(connection_id) else {
                return Err(connection_not_found(connection_id));
            };
            if !conn.is_manual() {
                return Err(ApplyError::NotManual { connection_id: connection_id.clone() });
            }
            let moved = translate(conn.manual_points(), *dx, *dy);
            conn.set_manual_points(moved);
            delta.record_updated(ObjectRef::Connection(connection_id.clone()));
            Ok(())
        }
    }
}

fn part_not_found(part_id: &PartId) -> ApplyError {
    ApplyError::NotFound { object: ObjectRef::Part(part_id.clone()) }
}

fn connection_not_found(connection_id: &ConnectionId) -> ApplyError {
    ApplyError::NotFound { object: ObjectRef::Connection(connection_id.clone()) }
}

fn check_rail(panel: &Panel, rail_index: usize) -> Result<(), ApplyError> {
    if rail_index >= panel.rail_count() {
        return Err(ApplyError::UnknownRail { rail_index, rail_count: panel.rail_count() });
    }
    Ok(())
}

fn check_part_size(panel: &Panel, width: f64, height: f64) -> Result<(), ApplyError> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(ApplyError::InvalidGeometry { reason: "part size must be positive" });
    }
    if width > panel.geometry().rail_width {
        return Err(ApplyError::InvalidGeometry { reason: "part is wider than the rail" });
    }
    Ok(())
}

/// Clamps `x` so the part stays on the rail, then snaps it to the placement grid.
fn placement_x(panel: &Panel, x: f64, width: f64) -> Result<f64, ApplyError> {
    if !x.is_finite() {
        return Err(ApplyError::InvalidGeometry { reason: "part position must be finite" });
    }
    let geometry = panel.geometry();
    let max_x = (geometry.rail_width - width).max(0.0);
    Ok(snap(x.clamp(0.0, max_x), geometry.placement_grid))
}

fn ensure_free(
    panel: &Panel,
    part_id: &PartId,
    rail_index: usize,
    x: f64,
    width: f64,
) -> Result<(), ApplyError> {
    match panel.colliding_part(rail_index, x, width, Some(part_id)) {
        Some(other) => {
            Err(ApplyError::Collision { part_id: part_id.clone(), other: other.part_id().clone() })
        }
        None => Ok(()),
    }
}

fn check_manual_path(connection_id: &ConnectionId, points: &[Point]) -> Result<(), ApplyError> {
    let invalid = |reason| ApplyError::InvalidManualPath { connection_id: connection_id.clone(), reason };
    if points.len() < 2 {
        return Err(invalid("needs at least two points"));
    }
    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(invalid("coordinates must be finite"));
    }
    if !is_orthogonal(points) {
        return Err(invalid("segments must be horizontal or vertical"));
    }
    Ok(())
}

/// Drops every connection whose endpoint part no longer exists.
fn prune_orphaned_connections(panel: &mut Panel, delta: &mut DeltaBuilder) {
    let orphaned = panel
        .connections()
        .values()
        .filter(|c| panel.part(c.from().part_id()).is_none() || panel.part(c.to().part_id()).is_none())
        .map(|c| c.connection_id().clone())
        .collect::<Vec<_>>();
    for connection_id in orphaned {
        panel.connections_mut().remove(&connection_id);
        delta.record_removed(ObjectRef::Connection(connection_id));
    }
}
