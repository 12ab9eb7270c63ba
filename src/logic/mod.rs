// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: barcode integrity, symbol encoding, and label export.

pub mod barcode;
pub mod encode;
pub mod pdf;
pub mod raster;
