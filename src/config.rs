// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tunables for panel geometry and the wire router.
//!
//! Defaults match the production board layout (700px rails, 170px apart, 10px routing grid).
//! A JSON config file may override any subset of fields.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Largest panel width and geometry length accepted, in pixels.
pub const MAX_PANEL_EXTENT: f64 = 20_000.0;

/// Physical layout of rails, parts and connectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelGeometry {
    pub rail_width: f64,
    pub rail_spacing: f64,
    pub last_bottom_margin: f64,
    pub max_rails: usize,
    /// Parts snap to multiples of this along their rail; also the alignment tolerance.
    pub placement_grid: f64,
    pub connector_size: f64,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            rail_width: 700.0,
            rail_spacing: 170.0,
            last_bottom_margin: 150.0,
            max_rails: 4,
            placement_grid: 5.0,
            connector_size: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Routing grid pitch; every bend lands on a multiple of it.
    pub step: f64,
    pub obstacle_clearance: f64,
    pub stub_len: f64,
    pub rail_block_thickness: f64,
    pub fanout_gap: f64,
    pub turn_penalty: u32,
    pub wire_clearance: f64,
    /// Treat wires earlier in render order as obstacles.
    pub avoid_routed_wires: bool,
    /// Offset the source stub by its fan-out lane too, not only the destination.
    pub fanout_at_source: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            step: 10.0,
            obstacle_clearance: 5.0,
            stub_len: 10.0,
            rail_block_thickness: 60.0,
            fanout_gap: 10.0,
            turn_penalty: 4,
            wire_clearance: 6.0,
            avoid_routed_wires: false,
            fanout_at_source: false,
        }
    }
}

impl RouterConfig {
    /// Stub length rounded up to whole grid steps, at least one step.
    pub fn effective_stub_len(&self) -> f64 {
        self.step.max((self.stub_len / self.step).ceil() * self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub panel: PanelGeometry,
    pub router: RouterConfig,
}

impl Config {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Json { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::Json { path: Some(path.to_path_buf()), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("panel.rail_width", self.panel.rail_width),
            ("panel.rail_spacing", self.panel.rail_spacing),
            ("panel.placement_grid", self.panel.placement_grid),
            ("router.step", self.router.step),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, reason: "must be a positive number" });
            }
        }

        let non_negative = [
            ("panel.last_bottom_margin", self.panel.last_bottom_margin),
            ("panel.connector_size", self.panel.connector_size),
            ("router.obstacle_clearance", self.router.obstacle_clearance),
            ("router.stub_len", self.router.stub_len),
            ("router.rail_block_thickness", self.router.rail_block_thickness),
            ("router.fanout_gap", self.router.fanout_gap),
            ("router.wire_clearance", self.router.wire_clearance),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid { field, reason: "must be a non-negative number" });
            }
        }

        let bounded = [
            ("panel.rail_width", self.panel.rail_width),
            ("panel.rail_spacing", self.panel.rail_spacing),
            ("panel.last_bottom_margin", self.panel.last_bottom_margin),
        ];
        for (field, value) in bounded {
            if value > MAX_PANEL_EXTENT {
                return Err(ConfigError::Invalid { field, reason: "exceeds the maximum panel extent" });
            }
        }

        if self.panel.max_rails == 0 {
            return Err(ConfigError::Invalid { field: "panel.max_rails", reason: "must be >= 1" });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Json { path: Option<PathBuf>, source: serde_json::Error },
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config {path:?}: {source}"),
            Self::Json { path: Some(path), source } => {
                write!(f, "invalid config JSON in {path:?}: {source}")
            }
            Self::Json { path: None, source } => write!(f, "invalid config JSON: {source}"),
            Self::Invalid { field, reason } => write!(f, "invalid config: {field} {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}
