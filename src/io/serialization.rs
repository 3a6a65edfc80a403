// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Engine snapshot serialization and deserialization.
//!
//! This module handles exporting and importing engine snapshots in
//! YAML and JSON formats for the persistence collaborator.

use crate::models::snapshot::EngineSnapshot;
use anyhow::Result;
use std::path::Path;

/// Export an engine snapshot to YAML format.
pub fn export_yaml(snapshot: &EngineSnapshot, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(snapshot)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export an engine snapshot to JSON format.
pub fn export_json(snapshot: &EngineSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import an engine snapshot from YAML format.
pub fn import_yaml(path: &Path) -> Result<EngineSnapshot> {
    let yaml = std::fs::read_to_string(path)?;
    let snapshot = serde_yaml::from_str(&yaml)?;
    Ok(snapshot)
}

/// Import an engine snapshot from JSON format.
pub fn import_json(path: &Path) -> Result<EngineSnapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&json)?;
    Ok(snapshot)
}
