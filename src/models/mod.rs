// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: regions and engine snapshots.

pub mod region;
pub mod snapshot;
