// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for a panel.
//!
//! Operations are applied with optimistic concurrency (revision checks), all-or-nothing, and
//! produce a delta naming the objects that changed. Callers holding a router must invalidate it
//! after every successful apply.

use std::collections::HashSet;
use std::fmt;

use crate::config::MAX_PANEL_EXTENT;
use crate::model::{snap, Connection, ConnectionId, ConnectorRef, Panel, Part, PartId, Point};
use crate::route::{is_orthogonal, translate};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelOp {
    /// Mounts a new part; `x` is clamped into the rail and snapped to the placement grid.
    PlacePart {
        part_id: PartId,
        label: String,
        rail_index: usize,
        x: f64,
        width: f64,
        height: f64,
    },
    MovePart {
        part_id: PartId,
        rail_index: usize,
        x: f64,
    },
    /// Removes the part and every connection touching it.
    RemovePart {
        part_id: PartId,
    },
    AddConnection {
        connection_id: ConnectionId,
        from: ConnectorRef,
        to: ConnectorRef,
        color: String,
    },
    RemoveConnection {
        connection_id: ConnectionId,
    },
    /// Clamped to `1..=max_rails`; parts on dropped rails are removed with their wires.
    SetRailCount {
        rail_count: usize,
    },
    SetPanelWidth {
        width: f64,
    },
    /// Stores `points` as the wire's polyline and marks it manual.
    SetManualPath {
        connection_id: ConnectionId,
        points: Vec<Point>,
    },
    /// Shifts a manual wire's stored polyline.
    TranslateWire {
        connection_id: ConnectionId,
        dx: f64,
        dy: f64,
    },
}

/// Something a delta can name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    /// Panel-wide properties: rail count and width.
    Layout,
    Part(PartId),
    Connection(ConnectionId),
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout => f.write_str("layout"),
            Self::Part(part_id) => write!(f, "part/{part_id}"),
            Self::Connection(connection_id) => write!(f, "connection/{connection_id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Objects added, removed or updated by one `apply_ops` call, each list sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ObjectRef>,
    pub removed: Vec<ObjectRef>,
    pub updated: Vec<ObjectRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<ObjectRef>,
    removed: HashSet<ObjectRef>,
    updated: HashSet<ObjectRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, object_ref: ObjectRef) {
        self.removed.remove(&object_ref);
        self.updated.remove(&object_ref);
        self.added.insert(object_ref);
    }

    fn record_removed(&mut self, object_ref: ObjectRef) {
        // Added then removed within one batch leaves no trace.
        if self.added.remove(&object_ref) {
            return;
        }
        self.updated.remove(&object_ref);
        self.removed.insert(object_ref);
    }

    fn record_updated(&mut self, object_ref: ObjectRef) {
        if self.added.contains(&object_ref) || self.removed.contains(&object_ref) {
            return;
        }
        self.updated.insert(object_ref);
    }

    fn finish(self) -> Delta {
        let sorted = |set: HashSet<ObjectRef>| {
            let mut refs = set.into_iter().collect::<Vec<_>>();
            refs.sort();
            refs
        };
        Delta {
            added: sorted(self.added),
            removed: sorted(self.removed),
            updated: sorted(self.updated),
        }
    }
}

/// Applies `ops` in order against a copy of the panel and commits only if all succeed.
pub fn apply_ops(panel: &mut Panel, base_rev: u64, ops: &[PanelOp]) -> Result<ApplyResult, ApplyError> {
    let current_rev = panel.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict { base_rev, current_rev });
    }

    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: Delta::default() });
    }

    let mut next = panel.clone();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_op(&mut next, op, &mut delta)?;
    }

    next.bump_rev();
    *panel = next;
    Ok(ApplyResult { new_rev: panel.rev(), applied: ops.len(), delta: delta.finish() })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    AlreadyExists { object: ObjectRef },
    NotFound { object: ObjectRef },
    UnknownRail { rail_index: usize, rail_count: usize },
    SelfLoop { connection_id: ConnectionId },
    /// The part would overlap `other` on the same rail.
    Collision { part_id: PartId, other: PartId },
    InvalidGeometry { reason: &'static str },
    InvalidManualPath { connection_id: ConnectionId, reason: &'static str },
    NotManual { connection_id: ConnectionId },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { base_rev, current_rev } => {
                write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})")
            }
            Self::AlreadyExists { object } => write!(f, "object already exists ({object})"),
            Self::NotFound { object } => write!(f, "object not found ({object})"),
            Self::UnknownRail { rail_index, rail_count } => {
                write!(f, "rail {rail_index} does not exist (rail_count={rail_count})")
            }
            Self::SelfLoop { connection_id } => {
                write!(f, "connection {connection_id} joins a part to itself")
            }
            Self::Collision { part_id, other } => {
                write!(f, "part {part_id} would overlap part {other}")
            }
            Self::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Self::InvalidManualPath { connection_id, reason } => {
                write!(f, "invalid manual path for {connection_id}: {reason}")
            }
            Self::NotManual { connection_id } => {
                write!(f, "connection {connection_id} is auto-routed")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

// Per-op mutation helpers used by `apply_ops`.
include!("ops_impl.rs");
