// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Label domain model (UI-agnostic).

use serde::{Deserialize, Serialize};

use crate::logic::barcode::BarcodeSymbology;

/// Finished label record consumed by the preview and the exporters.
///
/// All user-facing fields are free text; the barcode is an opaque digit
/// string interpreted under `symbology`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub product_name: String,
    pub quantity: String,
    pub expiry: String,
    pub price: String,
    pub barcode: String,
    pub symbology: BarcodeSymbology,
}

impl Default for LabelRecord {
    fn default() -> Self {
        // First-run sample so the preview renders something scannable.
        Self {
            product_name: "UHT WHOLE MILK 1L".to_string(),
            quantity: "1".to_string(),
            expiry: "2026-11-04".to_string(),
            price: "$1.79".to_string(),
            barcode: "7891234567895".to_string(),
            symbology: BarcodeSymbology::Ean13,
        }
    }
}

/// Physical label sizes supported by the thermal printers we target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelSize {
    #[default]
    Size58x30,
    Size50x50,
}

impl LabelSize {
    pub fn width_mm(&self) -> f32 {
        match self {
            LabelSize::Size58x30 => 58.0,
            LabelSize::Size50x50 => 50.0,
        }
    }

    pub fn height_mm(&self) -> f32 {
        match self {
            LabelSize::Size58x30 => 30.0,
            LabelSize::Size50x50 => 50.0,
        }
    }

    /// Short tag used in UI controls.
    pub fn display_name(&self) -> &'static str {
        match self {
            LabelSize::Size58x30 => "58 × 30 mm",
            LabelSize::Size50x50 => "50 × 50 mm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::barcode::validate_barcode;

    #[test]
    fn default_record_carries_a_valid_barcode() {
        let record = LabelRecord::default();
        assert!(validate_barcode(&record.barcode, record.symbology));
    }

    #[test]
    fn sizes_expose_physical_dimensions() {
        assert_eq!(LabelSize::Size58x30.width_mm(), 58.0);
        assert_eq!(LabelSize::Size58x30.height_mm(), 30.0);
        assert_eq!(LabelSize::Size50x50.width_mm(), 50.0);
        assert_eq!(LabelSize::Size50x50.height_mm(), 50.0);
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = LabelRecord::default();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"EAN13\""));
        let back: LabelRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
