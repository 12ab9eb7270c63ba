// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Rasterize a bar pattern into a PNG for use outside the app.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};

use crate::logic::barcode::BarcodeSymbology;
use crate::logic::encode::encode_modules;

/// Quiet-zone width on each side, in modules.
const QUIET_MODULES: u32 = 9;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Render a validated code as an RGB image: black bars on white, with
/// `scale` pixels per module and quiet zones on both sides.
pub fn render_barcode_image(
    code: &str,
    symbology: BarcodeSymbology,
    scale: u32,
    height: u32,
) -> Result<RgbImage> {
    anyhow::ensure!(scale > 0 && height > 0, "Image dimensions must be non-zero");

    let modules = encode_modules(code, symbology).with_context(|| {
        format!(
            "Barcode {:?} is not a valid {} code",
            code,
            symbology.as_str()
        )
    })?;

    let width = (modules.len() as u32 + 2 * QUIET_MODULES) * scale;
    let mut img = RgbImage::from_pixel(width, height, WHITE);

    for (index, &bar) in modules.iter().enumerate() {
        if !bar {
            continue;
        }
        let x0 = (QUIET_MODULES + index as u32) * scale;
        for x in x0..x0 + scale {
            for y in 0..height {
                img.put_pixel(x, y, BLACK);
            }
        }
    }

    Ok(img)
}

/// Render and save a barcode PNG to `output`.
pub fn write_barcode_png(
    output: &Path,
    code: &str,
    symbology: BarcodeSymbology,
    scale: u32,
    height: u32,
) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let img = render_barcode_image(code, symbology, scale, height)?;
    img.save(output)
        .with_context(|| format!("Failed to write barcode image {:?}", output))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn rendered_image_has_expected_geometry() {
        let img = render_barcode_image("4006381333931", BarcodeSymbology::Ean13, 2, 60).unwrap();

        // 95 modules + 9 quiet modules per side, 2 px per module.
        assert_eq!(img.width(), (95 + 18) * 2);
        assert_eq!(img.height(), 60);

        // Quiet zone is white; the first guard bar is black.
        assert_eq!(*img.get_pixel(0, 30), WHITE);
        assert_eq!(*img.get_pixel(9 * 2, 30), BLACK);
        assert_eq!(*img.get_pixel(9 * 2 + 2, 30), WHITE);
    }

    #[test]
    fn render_rejects_invalid_codes_and_dimensions() {
        assert!(render_barcode_image("7891234567890", BarcodeSymbology::Ean13, 2, 60).is_err());
        assert!(render_barcode_image("4006381333931", BarcodeSymbology::Ean13, 0, 60).is_err());
    }

    #[test]
    fn write_barcode_png_round_trips_through_disk() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("codes").join("ean8.png");

        write_barcode_png(&out, "96385074", BarcodeSymbology::Ean8, 3, 90).unwrap();

        let img = image::open(&out).unwrap().to_rgb8();
        assert_eq!(img.width(), (67 + 18) * 3);
        assert_eq!(img.height(), 90);
    }
}
