// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components structured for MVU-style updates.

pub mod barcode_field;
pub mod label_preview;
pub mod toggle;

pub use toggle::toggle_switch;
