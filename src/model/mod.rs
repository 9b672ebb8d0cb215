// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A panel holds rails, the parts mounted on them and the wires between part connectors.

pub mod connection;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod panel;
pub mod part;

pub use connection::Connection;
pub use geometry::{snap, Point, Rect, Size};
pub use ids::{ConnectionId, Id, IdError, PartId};
pub use panel::Panel;
pub use part::{ConnectorRef, ParseConnectorRefError, Part, Port};
