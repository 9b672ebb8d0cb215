// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::{IdError, PartId};

/// One of the two connectors every part carries.
///
/// `Top` orders before `Bottom`; fan-out lane sorting relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Port {
    Top,
    Bottom,
}

impl Port {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Vertical direction a wire leaves this port: `-1` upwards, `+1` downwards.
    pub fn stub_dir(self) -> f64 {
        match self {
            Self::Top => -1.0,
            Self::Bottom => 1.0,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Port {
    type Err = ParseConnectorRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(ParseConnectorRefError::UnknownPort(other.to_owned())),
        }
    }
}

/// Identifies a connector by owning part and port.
///
/// Not an entity of its own: it is resolved against the live part set on every use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectorRef {
    part_id: PartId,
    port: Port,
}

impl ConnectorRef {
    pub fn new(part_id: PartId, port: Port) -> Self {
        Self { part_id, port }
    }

    pub fn part_id(&self) -> &PartId {
        &self.part_id
    }

    pub fn port(&self) -> Port {
        self.port
    }
}

impl fmt::Display for ConnectorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.part_id, self.port)
    }
}

impl FromStr for ConnectorRef {
    type Err = ParseConnectorRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (part, port) = s.rsplit_once(':').ok_or(ParseConnectorRefError::MissingPort)?;
        let part_id = PartId::new(part).map_err(ParseConnectorRefError::InvalidPartId)?;
        Ok(Self { part_id, port: port.parse()? })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseConnectorRefError {
    MissingPort,
    UnknownPort(String),
    InvalidPartId(IdError),
}

impl fmt::Display for ParseConnectorRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPort => f.write_str("connector must look like '<part_id>:<port>'"),
            Self::UnknownPort(port) => write!(f, "unknown port '{port}' (expected top|bottom)"),
            Self::InvalidPartId(err) => write!(f, "invalid part id: {err}"),
        }
    }
}

impl std::error::Error for ParseConnectorRefError {}

/// A component placed on a rail.
///
/// `x` is the left edge measured from the rail's left end. The part is always vertically
/// centred on its rail, so there is no stored `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    part_id: PartId,
    label: String,
    rail_index: usize,
    x: f64,
    width: f64,
    height: f64,
}

impl Part {
    pub fn new(
        part_id: PartId,
        label: impl Into<String>,
        rail_index: usize,
        x: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self { part_id, label: label.into(), rail_index, x, width, height }
    }

    pub fn part_id(&self) -> &PartId {
        &self.part_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rail_index(&self) -> usize {
        self.rail_index
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Top edge relative to the rail line.
    pub fn y(&self) -> f64 {
        -self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub(crate) fn set_position(&mut self, rail_index: usize, x: f64) {
        self.rail_index = rail_index;
        self.x = x;
    }

    /// Whether the two parts' horizontal spans overlap (rail membership is not checked).
    pub fn overlaps_horizontally(&self, x: f64, width: f64) -> bool {
        x < self.right() && x + width > self.x
    }
}
