// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{ConnectionId, Point};

/// Memo of auto-routed paths keyed by connection.
///
/// Not authoritative: any panel mutation must be followed by [`RouteCache::invalidate`].
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    entries: BTreeMap<ConnectionId, Vec<Point>>,
    epoch: u64,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&[Point]> {
        self.entries.get(connection_id).map(Vec::as_slice)
    }

    pub fn insert(&mut self, connection_id: ConnectionId, path: Vec<Point>) {
        self.entries.insert(connection_id, path);
    }

    /// Drops every entry and starts a new epoch.
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Number of invalidations so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
