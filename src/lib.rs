// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tasklift: moves tagged "to talk about" todo lines between plain-text notes.
//!
//! Open tasks tagged `to-talk-<name>` are collected per person, copied into a chosen note and
//! checked off where they came from. Every move is recorded line by line so it can be undone
//! exactly.

pub mod config;
pub mod logging;
pub mod model;
pub mod mutate;
pub mod relocate;
pub mod scan;
pub mod store;
pub mod text;
pub mod tui;
pub mod workflow;
