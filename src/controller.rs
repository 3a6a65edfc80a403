// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor-page-level orchestrator.
//!
//! This module contains the controller that exclusively owns the
//! track store and the frame index, consumes the rendering surface's
//! region events, and coordinates interpolation so the two structures
//! never diverge after a public operation completes. All mutations run
//! synchronously within one call; there is no concurrent writer.

use crate::models::region::{BoundingBox, Region, RegionType};
use crate::models::snapshot::EngineSnapshot;
use crate::tracking::frame_index::FrameIndex;
use crate::tracking::interpolate::interpolate_around;
use crate::tracking::store::TrackStore;
use crate::util::tags;
use anyhow::Result;

/// A saved copy of the engine's mutable state.
#[derive(Clone)]
struct EngineState {
    store: TrackStore,
    frames: FrameIndex,
}

/// History system for undo/redo functionality.
struct History {
    /// Undo stack (past states)
    undo_stack: Vec<EngineState>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<EngineState>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: 50, // Keep last 50 states
        }
    }

    /// Save current state before making a change
    fn push(&mut self, state: EngineState) {
        self.undo_stack.push(state);
        // Limit history size
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // Clear redo stack when new action is performed
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    fn undo(&mut self, current: EngineState) -> Option<EngineState> {
        if let Some(previous) = self.undo_stack.pop() {
            self.redo_stack.push(current);
            Some(previous)
        } else {
            None
        }
    }

    /// Redo: restore next state
    fn redo(&mut self, current: EngineState) -> Option<EngineState> {
        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(current);
            Some(next)
        } else {
            None
        }
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// The single controller that owns TrackStore and FrameIndex.
///
/// The rendering surface reads `regions_at_frame` for its current frame
/// and writes back only through the `on_*` operations below; it never
/// touches the per-track lists directly.
pub struct EditorController {
    /// Canonical per-track region storage
    store: TrackStore,
    /// Derived per-frame view, kept in lockstep with the store
    frames: FrameIndex,
    /// Frame the rendering surface is currently showing
    current_frame: u32,
    /// History for undo/redo
    history: History,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorController {
    /// Create a controller with no tracks. Frames start at 1.
    pub fn new() -> Self {
        Self {
            store: TrackStore::new(),
            frames: FrameIndex::new(),
            current_frame: 1,
            history: History::new(),
        }
    }

    /// Save current state before making a change.
    fn save_to_history(&mut self) {
        self.history.push(EngineState {
            store: self.store.clone(),
            frames: self.frames.clone(),
        });
    }

    /// A new region was drawn on the rendering surface.
    ///
    /// Zero-area boxes from degenerate draw gestures are dropped and
    /// `Ok(false)` is returned; the region is otherwise stored as a
    /// keyframe and the gaps to its keyframe neighbors are bridged.
    /// Malformed regions (empty id, frame index 0) are a hard error.
    pub fn on_region_created(&mut self, mut region: Region) -> Result<bool> {
        region.validate()?;

        if region.bounding_box.is_degenerate() {
            // Avoid adding a dot to the page as a region.
            log::warn!(
                "Rejected zero-area region at frame {} for track {}",
                region.frame_index,
                region.track_id
            );
            return Ok(false);
        }

        self.save_to_history();

        region.key_frame = true;
        if region.region_type == RegionType::Rectangle {
            region.points = region.bounding_box.corner_points();
        }

        self.store.add_region(region.clone());
        self.frames.upsert_region(region.clone());
        interpolate_around(
            &mut self.store,
            &mut self.frames,
            region.track_id,
            region.frame_index,
        );

        log::info!(
            "Added region {} to track {} at frame {}, total tracks: {}",
            region.id,
            region.track_id,
            region.frame_index,
            self.store.active_track_ids().len()
        );
        Ok(true)
    }

    /// A region on the current frame finished moving or resizing.
    ///
    /// The region is promoted to a keyframe and its neighbor gaps are
    /// re-bridged. An unknown id is a logged no-op.
    pub fn on_region_moved(&mut self, id: &str, new_bounding_box: BoundingBox) -> bool {
        let Some(existing) = self.region_on_current_frame(id) else {
            log::debug!("on_region_moved: region {} not on frame {}", id, self.current_frame);
            return false;
        };

        self.save_to_history();

        let mut moved = existing;
        moved.set_bounding_box(new_bounding_box);
        moved.key_frame = true;

        self.store.add_region(moved.clone());
        self.frames.upsert_region(moved.clone());
        interpolate_around(
            &mut self.store,
            &mut self.frames,
            moved.track_id,
            moved.frame_index,
        );

        log::info!("Moved region {} on frame {}", id, self.current_frame);
        true
    }

    /// A region on the current frame was deleted.
    ///
    /// Only that frame's region is removed. Interpolated neighbors that
    /// were anchored to it are intentionally left in place; the deletion
    /// path does not re-bridge the remaining keyframes.
    pub fn on_region_deleted(&mut self, id: &str) -> bool {
        let Some(region) = self.region_on_current_frame(id) else {
            log::debug!("on_region_deleted: region {} not on frame {}", id, self.current_frame);
            return false;
        };

        self.save_to_history();
        self.store.remove_region(&region);
        self.frames.remove_region(&region);

        log::info!(
            "Deleted region {} from track {} at frame {}",
            id,
            region.track_id,
            region.frame_index
        );
        true
    }

    /// A region's tag list was replaced.
    ///
    /// Retagging promotes the region to a keyframe and re-bridges, so
    /// the new tags propagate to the interpolated span.
    pub fn on_region_retagged(&mut self, id: &str, new_tags: Vec<String>) -> bool {
        let Some(existing) = self.region_on_current_frame(id) else {
            log::debug!("on_region_retagged: region {} not on frame {}", id, self.current_frame);
            return false;
        };

        self.save_to_history();

        let mut retagged = existing;
        retagged.tags = new_tags;
        retagged.key_frame = true;

        self.store.add_region(retagged.clone());
        self.frames.upsert_region(retagged.clone());
        interpolate_around(
            &mut self.store,
            &mut self.frames,
            retagged.track_id,
            retagged.frame_index,
        );
        true
    }

    /// Toggle a single tag on a region of the current frame.
    pub fn apply_tag(&mut self, id: &str, tag: &str) -> bool {
        let Some(existing) = self.region_on_current_frame(id) else {
            return false;
        };
        let toggled = tags::toggle_tag(&existing.tags, tag);
        self.on_region_retagged(id, toggled)
    }

    /// A region on the current frame was given a different track id.
    ///
    /// The region keeps its id, frame, geometry, and tags; both the old
    /// and the new track are re-interpolated around the affected frame
    /// (the old track's side is a natural no-op, matching the deletion
    /// policy of not re-bridging).
    pub fn on_track_reassigned(&mut self, id: &str, new_track_id: u32) -> bool {
        let Some(region) = self.region_on_current_frame(id) else {
            log::debug!(
                "on_track_reassigned: region {} not on frame {}",
                id,
                self.current_frame
            );
            return false;
        };

        self.save_to_history();

        let old_track_id = region.track_id;
        let reassigned = self.store.reassign_track(&region, new_track_id);
        self.frames.remove_region(&region);
        self.frames.upsert_region(reassigned.clone());

        interpolate_around(
            &mut self.store,
            &mut self.frames,
            old_track_id,
            reassigned.frame_index,
        );
        interpolate_around(
            &mut self.store,
            &mut self.frames,
            new_track_id,
            reassigned.frame_index,
        );

        log::info!(
            "Reassigned region {} from track {} to track {}",
            id,
            old_track_id,
            new_track_id
        );
        true
    }

    /// Remove every region of a track, from every frame it occupies.
    /// Both structures are updated within this one call. Returns the
    /// number of regions removed.
    pub fn delete_track(&mut self, track_id: u32) -> usize {
        self.save_to_history();
        let removed = self.store.delete_track(track_id);
        self.frames.remove_track(track_id);
        removed.len()
    }

    /// The rendering surface navigated to another frame.
    ///
    /// The frame's entry is rebuilt from the track store so the derived
    /// view cannot drift across navigation.
    pub fn on_frame_changed(&mut self, frame_index: u32) {
        if frame_index == 0 {
            log::warn!("Ignoring navigation to frame 0 (frames start at 1)");
            return;
        }
        self.current_frame = frame_index;

        let regions: Vec<Region> = self
            .store
            .tracks()
            .values()
            .filter_map(|track| track.iter().find(|r| r.frame_index == frame_index))
            .cloned()
            .collect();
        self.frames.set_regions_at_frame(frame_index, regions);
        log::debug!("Navigated to frame {}", frame_index);
    }

    /// Merge a batch of predicted regions through the normal creation
    /// path. Each region must already carry a track id (allocated per
    /// detected object via `allocate_next_track_id`). Returns the
    /// number accepted.
    pub fn merge_predicted_regions(&mut self, batch: Vec<Region>) -> Result<usize> {
        let mut accepted = 0;
        for region in batch {
            if self.on_region_created(region)? {
                accepted += 1;
            }
        }
        log::info!("Merged {} predicted regions", accepted);
        Ok(accepted)
    }

    /// The regions active at the given frame.
    pub fn regions_at_frame(&self, frame_index: u32) -> &[Region] {
        self.frames.regions_at_frame(frame_index)
    }

    /// The track's regions sorted by frame index.
    pub fn regions_for_track(&self, track_id: u32) -> &[Region] {
        self.store.regions_for_track(track_id)
    }

    /// The next free track id for a newly drawn or detected object.
    pub fn allocate_next_track_id(&self) -> u32 {
        self.store.allocate_next_track_id()
    }

    /// Frame the controller currently considers visible.
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Keyframe navigation for the playback surface: first keyframe of
    /// a track.
    pub fn first_keyframe(&self, track_id: u32) -> Option<u32> {
        self.store.first_keyframe(track_id)
    }

    /// Nearest keyframe before the given frame.
    pub fn prev_keyframe(&self, track_id: u32, frame_index: u32) -> Option<u32> {
        self.store.prev_keyframe(track_id, frame_index)
    }

    /// Nearest keyframe after the given frame.
    pub fn next_keyframe(&self, track_id: u32, frame_index: u32) -> Option<u32> {
        self.store.next_keyframe(track_id, frame_index)
    }

    /// Last keyframe of a track.
    pub fn last_keyframe(&self, track_id: u32) -> Option<u32> {
        self.store.last_keyframe(track_id)
    }

    /// Regions with an empty tag list, across all tracks.
    ///
    /// The engine stores them (so the user can tag them later), but the
    /// persistence collaborator must not commit while any exist.
    pub fn untagged_regions(&self) -> Vec<&Region> {
        self.store
            .tracks()
            .values()
            .flatten()
            .filter(|r| r.is_untagged())
            .collect()
    }

    /// Whether the persistence collaborator may commit the current state.
    pub fn can_commit(&self) -> bool {
        self.untagged_regions().is_empty()
    }

    /// Serializable copy of the full engine state.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            max_track_id: self.store.max_track_id(),
            active_track_ids: self.store.active_track_ids().clone(),
            tracks: self.store.tracks().clone(),
            frames: self.frames.frames().clone(),
        }
    }

    /// Rehydrate both structures from a snapshot. Replaces all current
    /// state and clears the undo history.
    pub fn restore(&mut self, snapshot: EngineSnapshot) {
        self.store = TrackStore::restore(snapshot.max_track_id, snapshot.tracks);
        self.frames = FrameIndex::restore(snapshot.frames);
        self.history.clear();
        log::info!(
            "Restored engine state: {} active tracks",
            self.store.active_track_ids().len()
        );
    }

    /// Undo: restore previous state.
    pub fn undo(&mut self) -> bool {
        let current = EngineState {
            store: self.store.clone(),
            frames: self.frames.clone(),
        };
        if let Some(previous) = self.history.undo(current) {
            self.store = previous.store;
            self.frames = previous.frames;
            log::info!("Undo");
            true
        } else {
            false
        }
    }

    /// Redo: restore next state.
    pub fn redo(&mut self) -> bool {
        let current = EngineState {
            store: self.store.clone(),
            frames: self.frames.clone(),
        };
        if let Some(next) = self.history.redo(current) {
            self.store = next.store;
            self.frames = next.frames;
            log::info!("Redo");
            true
        } else {
            false
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn region_on_current_frame(&self, id: &str) -> Option<Region> {
        self.frames
            .regions_at_frame(self.current_frame)
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }
}
