// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canonical per-track region storage and track-id lifecycle.
//!
//! `TrackStore` owns the mapping from track id to that track's regions
//! (keyframe and interpolated), ordered by frame index, plus the
//! registry used to allocate new track ids. Tracks are created
//! implicitly when their first region is added and evicted implicitly
//! when their last region is removed.

use crate::models::region::Region;
use std::collections::{BTreeMap, BTreeSet};

/// Per-track region lists plus the "max track id" bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    /// Track id -> regions, sorted ascending by frame index.
    /// Invariant: frame indices are unique within one track.
    tracks: BTreeMap<u32, Vec<Region>>,
    /// Track ids that currently own at least one region.
    active_track_ids: BTreeSet<u32>,
    /// Highest active track id; kept at its prior value when the
    /// registry empties so allocation never hands out a colliding id.
    max_track_id: u32,
}

impl TrackStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a region into its track, replacing any existing region
    /// with the same id, or with the same frame index within that track
    /// (a new edit on an occupied frame overwrites it).
    pub fn add_region(&mut self, region: Region) {
        let track_id = region.track_id;
        let track = self.tracks.entry(track_id).or_default();
        track.retain(|r| r.id != region.id && r.frame_index != region.frame_index);

        let position = track
            .iter()
            .position(|r| r.frame_index > region.frame_index)
            .unwrap_or(track.len());
        track.insert(position, region);

        self.active_track_ids.insert(track_id);
        self.recompute_max_track_id();
    }

    /// Remove the region matching `region.id` from its track.
    ///
    /// Removal of an unknown region is a logged no-op, not an error;
    /// double-deletes can occur from overlapping UI events. Returns
    /// whether a region was removed.
    pub fn remove_region(&mut self, region: &Region) -> bool {
        let Some(track) = self.tracks.get_mut(&region.track_id) else {
            log::debug!(
                "remove_region: track {} not found for region {}",
                region.track_id,
                region.id
            );
            return false;
        };

        let Some(index) = track.iter().position(|r| r.id == region.id) else {
            log::debug!("remove_region: region {} not found", region.id);
            return false;
        };

        track.remove(index);
        if track.is_empty() {
            self.tracks.remove(&region.track_id);
            self.active_track_ids.remove(&region.track_id);
            self.recompute_max_track_id();
        }
        true
    }

    /// Move a region to another track, preserving its id, frame index,
    /// geometry, and tags. Returns the region as stored under the new
    /// track id.
    pub fn reassign_track(&mut self, region: &Region, new_track_id: u32) -> Region {
        // Prefer the stored record so edits made since the caller took
        // its copy are not lost.
        let stored = self
            .tracks
            .get(&region.track_id)
            .and_then(|track| track.iter().find(|r| r.id == region.id))
            .cloned()
            .unwrap_or_else(|| region.clone());

        self.remove_region(&stored);

        let mut reassigned = stored;
        reassigned.track_id = new_track_id;
        self.add_region(reassigned.clone());
        reassigned
    }

    /// Remove every region belonging to `track_id` and evict the track.
    /// Returns the removed regions so the caller can purge derived
    /// structures in the same action.
    pub fn delete_track(&mut self, track_id: u32) -> Vec<Region> {
        let removed = self.tracks.remove(&track_id).unwrap_or_default();
        if self.active_track_ids.remove(&track_id) {
            self.recompute_max_track_id();
        }
        log::info!("Deleted track {}, removed {} regions", track_id, removed.len());
        removed
    }

    /// The track's regions sorted ascending by frame index; empty if
    /// the track does not exist.
    pub fn regions_for_track(&self, track_id: u32) -> &[Region] {
        self.tracks
            .get(&track_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The next free track id. Pure: registration happens on `add_region`.
    pub fn allocate_next_track_id(&self) -> u32 {
        self.max_track_id + 1
    }

    /// Current highest active track id.
    pub fn max_track_id(&self) -> u32 {
        self.max_track_id
    }

    /// Track ids that currently own at least one region.
    pub fn active_track_ids(&self) -> &BTreeSet<u32> {
        &self.active_track_ids
    }

    /// All per-track region lists.
    pub fn tracks(&self) -> &BTreeMap<u32, Vec<Region>> {
        &self.tracks
    }

    /// Rebuild the store from a deserialized snapshot.
    pub fn restore(max_track_id: u32, tracks: BTreeMap<u32, Vec<Region>>) -> Self {
        let active_track_ids = tracks.keys().copied().collect();
        let mut store = Self {
            tracks,
            active_track_ids,
            max_track_id,
        };
        for track in store.tracks.values_mut() {
            track.sort_by_key(|r| r.frame_index);
        }
        store.recompute_max_track_id();
        store
    }

    /// Frame index of the track's first keyframe.
    pub fn first_keyframe(&self, track_id: u32) -> Option<u32> {
        self.regions_for_track(track_id)
            .iter()
            .find(|r| r.key_frame)
            .map(|r| r.frame_index)
    }

    /// Frame index of the track's last keyframe.
    pub fn last_keyframe(&self, track_id: u32) -> Option<u32> {
        self.regions_for_track(track_id)
            .iter()
            .rev()
            .find(|r| r.key_frame)
            .map(|r| r.frame_index)
    }

    /// Frame index of the nearest keyframe strictly before `frame_index`.
    pub fn prev_keyframe(&self, track_id: u32, frame_index: u32) -> Option<u32> {
        self.regions_for_track(track_id)
            .iter()
            .rev()
            .find(|r| r.key_frame && r.frame_index < frame_index)
            .map(|r| r.frame_index)
    }

    /// Frame index of the nearest keyframe strictly after `frame_index`.
    pub fn next_keyframe(&self, track_id: u32, frame_index: u32) -> Option<u32> {
        self.regions_for_track(track_id)
            .iter()
            .find(|r| r.key_frame && r.frame_index > frame_index)
            .map(|r| r.frame_index)
    }

    fn recompute_max_track_id(&mut self) {
        if let Some(&max) = self.active_track_ids.iter().next_back() {
            self.max_track_id = max;
        }
        // When the registry empties, keep the prior value: every id it
        // could collide with has been retired.
    }
}
