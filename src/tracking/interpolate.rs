// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyframe interpolation.
//!
//! Whenever a keyframe is added, moved, or retagged, the gap between it
//! and its nearest keyframe neighbors is re-bridged with synthetic
//! non-keyframe regions, one per intermediate frame, by linear
//! interpolation of the bounding box. Interpolated regions go through
//! the normal `TrackStore`/`FrameIndex` insertion path, so a stale
//! interpolation on an occupied frame is overwritten rather than
//! accumulated.

use crate::models::region::{generate_region_id, Region};
use crate::tracking::frame_index::FrameIndex;
use crate::tracking::store::TrackStore;
use crate::util::geometry::lerp_box;

/// Re-bridge the gaps around the keyframe at `(track_id, frame_index)`.
///
/// Neighbor search is a bounded scan over the track's sorted region
/// list; a missing previous or next keyframe is a normal terminal case
/// and that side is simply skipped. A track with a single keyframe
/// produces nothing. Returns the number of interpolated regions
/// written.
pub fn interpolate_around(
    store: &mut TrackStore,
    frames: &mut FrameIndex,
    track_id: u32,
    frame_index: u32,
) -> usize {
    let track = store.regions_for_track(track_id).to_vec();
    let Some(position) = track.iter().position(|r| r.frame_index == frame_index) else {
        log::debug!(
            "interpolate_around: no region at frame {} for track {}",
            frame_index,
            track_id
        );
        return 0;
    };

    let edited = track[position].clone();
    if !edited.key_frame {
        log::debug!(
            "interpolate_around: region {} at frame {} is not a keyframe",
            edited.id,
            frame_index
        );
        return 0;
    }

    let previous = track[..position].iter().rev().find(|r| r.key_frame);
    let next = track[position + 1..].iter().find(|r| r.key_frame);

    let mut produced = 0;
    if let Some(previous) = previous {
        produced += fill_gap(store, frames, previous, &edited, &edited);
    }
    if let Some(next) = next {
        produced += fill_gap(store, frames, &edited, next, &edited);
    }

    if produced > 0 {
        log::info!(
            "Interpolated {} regions around frame {} of track {}",
            produced,
            frame_index,
            track_id
        );
    }
    produced
}

/// Fill the frames strictly between two keyframes with interpolated
/// regions. Tags and shape are copied from the edited keyframe; each
/// synthetic region gets a fresh id and `key_frame = false`.
fn fill_gap(
    store: &mut TrackStore,
    frames: &mut FrameIndex,
    start: &Region,
    end: &Region,
    edited: &Region,
) -> usize {
    let distance = end.frame_index - start.frame_index - 1;
    if distance == 0 {
        // Adjacent keyframes, nothing to bridge.
        return 0;
    }

    let steps = distance + 1;
    for step in 1..=distance {
        let t = f64::from(step) / f64::from(steps);
        let bounding_box = lerp_box(&start.bounding_box, &end.bounding_box, t);
        let region = Region {
            id: generate_region_id(),
            track_id: edited.track_id,
            frame_index: start.frame_index + step,
            region_type: edited.region_type,
            bounding_box,
            points: bounding_box.corner_points(),
            tags: edited.tags.clone(),
            key_frame: false,
        };
        store.add_region(region.clone());
        frames.upsert_region(region);
    }
    distance as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::BoundingBox;

    fn keyframe(track_id: u32, frame_index: u32, bbox: BoundingBox) -> Region {
        Region::new_rectangle(track_id, frame_index, bbox)
            .with_tags(vec!["person".to_string()])
    }

    fn add_and_interpolate(store: &mut TrackStore, frames: &mut FrameIndex, region: Region) {
        store.add_region(region.clone());
        frames.upsert_region(region.clone());
        interpolate_around(store, frames, region.track_id, region.frame_index);
    }

    #[test]
    fn test_single_keyframe_interpolates_nothing() {
        let mut store = TrackStore::new();
        let mut frames = FrameIndex::new();
        let only = keyframe(1, 5, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        store.add_region(only.clone());
        frames.upsert_region(only);

        assert_eq!(interpolate_around(&mut store, &mut frames, 1, 5), 0);
        assert_eq!(store.regions_for_track(1).len(), 1);
    }

    #[test]
    fn test_adjacent_keyframes_leave_no_gap() {
        let mut store = TrackStore::new();
        let mut frames = FrameIndex::new();
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(1, 4, BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        );
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(1, 5, BoundingBox::new(5.0, 5.0, 10.0, 10.0)),
        );

        assert_eq!(store.regions_for_track(1).len(), 2);
    }

    #[test]
    fn test_bridges_exactly_at_linear_steps() {
        // Keyframes at frames 10 and 15: frame 12 sits at t = 2/5.
        let mut store = TrackStore::new();
        let mut frames = FrameIndex::new();
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 10.0, 20.0, 30.0);
        add_and_interpolate(&mut store, &mut frames, keyframe(3, 10, a));
        add_and_interpolate(&mut store, &mut frames, keyframe(3, 15, b));

        let at_12 = frames.regions_at_frame(12);
        assert_eq!(at_12.len(), 1);
        let region = &at_12[0];
        assert_eq!(region.track_id, 3);
        assert!(!region.key_frame);

        let expected = lerp_box(&a, &b, 2.0 / 5.0);
        assert!((region.bounding_box.left - expected.left).abs() < 1e-9);
        assert!((region.bounding_box.top - expected.top).abs() < 1e-9);
        assert!((region.bounding_box.width - expected.width).abs() < 1e-9);
        assert!((region.bounding_box.height - expected.height).abs() < 1e-9);
        assert_eq!(region.points, region.bounding_box.corner_points());
    }

    #[test]
    fn test_growing_box_midpoint() {
        // Track 3, keyframes at 1 ({0,0,10,10}) and 5 ({0,0,20,20}):
        // frame 3 holds one interpolated region at {0,0,15,15}.
        let mut store = TrackStore::new();
        let mut frames = FrameIndex::new();
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(3, 1, BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        );
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(3, 5, BoundingBox::new(0.0, 0.0, 20.0, 20.0)),
        );

        let at_3 = frames.regions_at_frame(3);
        assert_eq!(at_3.len(), 1);
        assert!(!at_3[0].key_frame);
        assert!((at_3[0].bounding_box.width - 15.0).abs() < 1e-9);
        assert!((at_3[0].bounding_box.height - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolated_regions_copy_tags_and_track() {
        let mut store = TrackStore::new();
        let mut frames = FrameIndex::new();
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(2, 1, BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        );
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(2, 4, BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        );

        for frame in 2..=3 {
            let at_frame = frames.regions_at_frame(frame);
            assert_eq!(at_frame.len(), 1);
            assert_eq!(at_frame[0].track_id, 2);
            assert_eq!(at_frame[0].tags, vec!["person".to_string()]);
        }
    }

    #[test]
    fn test_reinterpolation_overwrites_stale_regions() {
        let mut store = TrackStore::new();
        let mut frames = FrameIndex::new();
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(1, 1, BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        );
        let mut second = keyframe(1, 5, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        add_and_interpolate(&mut store, &mut frames, second.clone());

        // Move the second keyframe and re-bridge.
        second.set_bounding_box(BoundingBox::new(40.0, 40.0, 10.0, 10.0));
        add_and_interpolate(&mut store, &mut frames, second);

        // Still exactly one region per frame 1..=5 on this track.
        let track = store.regions_for_track(1);
        let frame_indices: Vec<u32> = track.iter().map(|r| r.frame_index).collect();
        assert_eq!(frame_indices, vec![1, 2, 3, 4, 5]);

        // And the bridge reflects the new geometry.
        let at_3 = frames.regions_at_frame(3);
        assert_eq!(at_3.len(), 1);
        assert!((at_3[0].bounding_box.left - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_middle_edit_bridges_both_sides() {
        let mut store = TrackStore::new();
        let mut frames = FrameIndex::new();
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(1, 1, BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        );
        add_and_interpolate(
            &mut store,
            &mut frames,
            keyframe(1, 9, BoundingBox::new(80.0, 0.0, 10.0, 10.0)),
        );
        let produced = {
            let middle = keyframe(1, 5, BoundingBox::new(40.0, 0.0, 10.0, 10.0));
            store.add_region(middle.clone());
            frames.upsert_region(middle.clone());
            interpolate_around(&mut store, &mut frames, 1, 5)
        };

        // Three frames on each side of the middle keyframe.
        assert_eq!(produced, 6);
        for frame in 2..=8 {
            assert_eq!(frames.regions_at_frame(frame).len(), 1);
        }
        // Linear through the middle anchor.
        assert!((frames.regions_at_frame(3)[0].bounding_box.left - 20.0).abs() < 1e-9);
        assert!((frames.regions_at_frame(7)[0].bounding_box.left - 60.0).abs() < 1e-9);
    }
}
