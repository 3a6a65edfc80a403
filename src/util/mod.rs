// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shared utility functions.

pub mod geometry;
pub mod tags;
