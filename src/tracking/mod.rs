// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Track/region consistency engine.
//!
//! Canonical per-track storage ([`store::TrackStore`]), the derived
//! per-frame view ([`frame_index::FrameIndex`]), and the keyframe
//! interpolation that keeps the two populated between user edits.

pub mod frame_index;
pub mod interpolate;
pub mod store;
