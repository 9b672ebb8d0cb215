// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Panelroute: automatic orthogonal wire routing for distribution-board panels.
//!
//! A [`model::Panel`] holds rails, parts and wires. [`ops`] mutates it atomically,
//! [`route::Router`] turns each wire into an axis-aligned polyline, and [`store`] reads and writes
//! JSON snapshots. [`session::PanelSession`] ties a panel to its router.

pub mod config;
pub mod model;
pub mod ops;
pub mod render;
pub mod route;
pub mod session;
pub mod store;

pub use config::{Config, ConfigError, PanelGeometry, RouterConfig, MAX_PANEL_EXTENT};
pub use session::{PanelSession, WireDrag};
