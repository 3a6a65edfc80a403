// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! TRACS - Track Region Annotation Consistency System
//!
//! The track/region bookkeeping core of a video-annotation tool: users
//! draw bounding-box regions on frames to follow objects across time,
//! and this crate keeps every track's keyframes, the linearly
//! interpolated in-between regions, and the per-frame lookup the
//! rendering surface reads, consistent through every edit.
//!
//! Rendering, video playback, and persistence are external
//! collaborators; they talk to [`controller::EditorController`] through
//! plain method calls and the serializable snapshot in
//! [`models::snapshot`].

pub mod controller;
pub mod io;
pub mod models;
pub mod tracking;
pub mod util;

pub use controller::EditorController;
pub use models::region::{BoundingBox, Point, Region, RegionType};
pub use models::snapshot::EngineSnapshot;
pub use tracking::frame_index::FrameIndex;
pub use tracking::store::TrackStore;
