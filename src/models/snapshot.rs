// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Serializable engine snapshot.
//!
//! This module defines the shape handed to the persistence collaborator:
//! the track registry, the per-track region lists, and the per-frame
//! region map. The same shape is accepted back on load to rehydrate the
//! engine.

use super::region::Region;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Complete engine state for serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub max_track_id: u32,
    pub active_track_ids: BTreeSet<u32>,
    /// Track id -> regions sorted by frame index.
    pub tracks: BTreeMap<u32, Vec<Region>>,
    /// Frame index -> regions active on that frame.
    pub frames: BTreeMap<u32, Vec<Region>>,
}

impl EngineSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }
}
