// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON snapshots of a panel on disk.
//!
//! Only the layout is persisted (rails, parts, wires and manual polylines). Auto-routed paths are
//! derived state and are recomputed after loading.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::PanelGeometry;
use crate::model::{IdError, Panel};
use crate::ops::ApplyError;

pub mod snapshot;

pub use snapshot::{
    ConnectionRecord, ConnectorRecord, PanelSnapshot, PartRecord, PointRecord, PortRecord,
    SNAPSHOT_VERSION,
};

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Id {
        value: String,
        source: IdError,
    },
    /// The snapshot parsed but describes an impossible panel.
    Invalid {
        source: ApplyError,
    },
    UnsupportedVersion {
        version: u32,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path: Some(path), source } => write!(f, "json error at {path:?}: {source}"),
            Self::Json { path: None, source } => write!(f, "json error: {source}"),
            Self::Id { value, source } => write!(f, "invalid id {value:?}: {source}"),
            Self::Invalid { source } => write!(f, "invalid snapshot: {source}"),
            Self::UnsupportedVersion { version } => write!(
                f,
                "unsupported snapshot version {version} (expected {SNAPSHOT_VERSION})"
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Id { source, .. } => Some(source),
            Self::Invalid { source } => Some(source),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

pub fn from_json_str(input: &str) -> Result<PanelSnapshot, StoreError> {
    serde_json::from_str(input).map_err(|source| StoreError::Json { path: None, source })
}

pub fn to_json_string(snapshot: &PanelSnapshot) -> Result<String, StoreError> {
    serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Json { path: None, source })
}

pub fn load_snapshot(path: &Path) -> Result<PanelSnapshot, StoreError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw)
        .map_err(|source| StoreError::Json { path: Some(path.to_path_buf()), source })
}

pub fn load_panel(path: &Path, geometry: PanelGeometry) -> Result<Panel, StoreError> {
    let panel = load_snapshot(path)?.into_panel(geometry)?;
    tracing::debug!(
        path = %path.display(),
        parts = panel.parts().len(),
        connections = panel.connections().len(),
        "panel loaded"
    );
    Ok(panel)
}

/// Writes `snapshot` next to `path` under a temp name, then renames it into place.
pub fn save_snapshot(path: &Path, snapshot: &PanelSnapshot) -> Result<(), StoreError> {
    let mut contents = serde_json::to_vec_pretty(snapshot)
        .map_err(|source| StoreError::Json { path: Some(path.to_path_buf()), source })?;
    contents.push(b'\n');
    write_atomic(path, &contents)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io { path: path.to_path_buf(), source };
    let Some(file_name) = path.file_name() else {
        return Err(io_err(io::Error::other("path has no file name")));
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = parent.join(format!(".panelroute.tmp.{}.{nanos}", file_name.to_string_lossy()));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: tmp_path, source });
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(source));
    }
    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
