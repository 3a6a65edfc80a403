// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Region data structures.
//!
//! This module defines the core data structures for representing
//! tracked regions: bounding boxes, polygon points, and the region
//! record itself.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 2D point in source-asset pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle in source-asset coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check whether the box has zero area (degenerate draw gesture).
    pub fn is_degenerate(&self) -> bool {
        self.width * self.height == 0.0
    }

    /// The four corner points in fixed winding order:
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn corner_points(&self) -> Vec<Point> {
        vec![
            Point {
                x: self.left,
                y: self.top,
            },
            Point {
                x: self.left + self.width,
                y: self.top,
            },
            Point {
                x: self.left + self.width,
                y: self.top + self.height,
            },
            Point {
                x: self.left,
                y: self.top + self.height,
            },
        ]
    }
}

/// Shape of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    Rectangle,
    Polygon,
    Point,
    Polyline,
}

/// A labeled shape attached to one video frame.
///
/// Many regions share a `track_id` (one per frame); `key_frame` marks
/// the user-authored ones, everything else is synthesized by
/// interpolation. Regions are plain values: mutation paths produce a
/// new record rather than aliasing a shared one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub track_id: u32,
    pub frame_index: u32,
    #[serde(rename = "type")]
    pub region_type: RegionType,
    pub bounding_box: BoundingBox,
    pub points: Vec<Point>,
    pub tags: Vec<String>,
    pub key_frame: bool,
}

impl Region {
    /// Create a new keyframe rectangle region with a generated id.
    pub fn new_rectangle(track_id: u32, frame_index: u32, bounding_box: BoundingBox) -> Self {
        Self {
            id: generate_region_id(),
            track_id,
            frame_index,
            region_type: RegionType::Rectangle,
            bounding_box,
            points: bounding_box.corner_points(),
            tags: Vec::new(),
            key_frame: true,
        }
    }

    /// Replace the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Whether the region has no tags and therefore blocks commit.
    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }

    /// Update geometry, keeping `points` consistent with the box.
    pub fn set_bounding_box(&mut self, bounding_box: BoundingBox) {
        self.bounding_box = bounding_box;
        self.points = bounding_box.corner_points();
    }

    /// Validate the required fields.
    ///
    /// Expected user-level conditions (zero-area boxes, missing tags)
    /// are handled elsewhere as no-ops; this only rejects records that
    /// indicate a programming error upstream.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            bail!("region is missing an id");
        }
        if self.frame_index == 0 {
            bail!("region {} has frame index 0 (frames start at 1)", self.id);
        }
        Ok(())
    }
}

/// Generate a unique id for a region instance.
pub fn generate_region_id() -> String {
    Uuid::new_v4().simple().to_string()
}
