// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-frame region lookup.
//!
//! `FrameIndex` maps a frame number to the regions active on that frame
//! across all tracks, keyframe or interpolated. It is a derived cache
//! over `TrackStore`: the controller that owns both keeps them in
//! lockstep, and the rendering surface only ever reads from here.

use crate::models::region::Region;
use std::collections::BTreeMap;

/// Frame index -> regions visible at that frame.
///
/// Each track contributes at most one region per frame, so entries
/// within a frame are keyed by track id.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    frames: BTreeMap<u32, Vec<Region>>,
}

impl FrameIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The regions active at `frame_index`; empty if none.
    pub fn regions_at_frame(&self, frame_index: u32) -> &[Region] {
        self.frames
            .get(&frame_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total replacement of a frame's region list, used when the frame
    /// is recomputed from the track store (e.g. on frame navigation).
    pub fn set_regions_at_frame(&mut self, frame_index: u32, regions: Vec<Region>) {
        if regions.is_empty() {
            self.frames.remove(&frame_index);
        } else {
            self.frames.insert(frame_index, regions);
        }
    }

    /// Insert or replace the entry whose track id matches the region's,
    /// at the region's own frame.
    pub fn upsert_region(&mut self, region: Region) {
        let frame = self.frames.entry(region.frame_index).or_default();
        if let Some(existing) = frame.iter_mut().find(|r| r.track_id == region.track_id) {
            *existing = region;
        } else {
            frame.push(region);
        }
    }

    /// Remove the entry for the region's track at the region's frame.
    /// Unknown entries are ignored.
    pub fn remove_region(&mut self, region: &Region) {
        if let Some(frame) = self.frames.get_mut(&region.frame_index) {
            frame.retain(|r| r.track_id != region.track_id);
            if frame.is_empty() {
                self.frames.remove(&region.frame_index);
            }
        }
    }

    /// Remove every entry belonging to `track_id` across all frames.
    pub fn remove_track(&mut self, track_id: u32) {
        self.frames
            .retain(|_, regions| {
                regions.retain(|r| r.track_id != track_id);
                !regions.is_empty()
            });
    }

    /// The full frame -> regions map.
    pub fn frames(&self) -> &BTreeMap<u32, Vec<Region>> {
        &self.frames
    }

    /// Rebuild the index from a deserialized snapshot.
    pub fn restore(frames: BTreeMap<u32, Vec<Region>>) -> Self {
        let mut index = Self { frames };
        index.frames.retain(|_, regions| !regions.is_empty());
        index
    }
}
