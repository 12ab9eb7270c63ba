// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic for producing print-ready label PDFs.
//!
//! Responsibilities:
//! - Lay out a single PDF page with the label's exact physical size.
//! - Draw the border, product name, bar pattern, digits, and data row
//!   with vector primitives and built-in fonts (no font files needed).
//! - Provide filename helpers for the save dialog.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rect, Rgb};
use time::OffsetDateTime;

use crate::logic::encode::encode_modules;
use crate::models::label::{LabelRecord, LabelSize};
use crate::utils::sanitize_component;

/// Points-to-millimetres conversion for font baseline math.
const PT_TO_MM: f32 = 0.3528;

/// Approximate Helvetica advance as a fraction of the font size. The
/// built-in fonts expose no metrics through printpdf, so centering and
/// right-alignment work from this estimate.
const APPROX_ADVANCE: f32 = 0.54;

/// Suggest a safe PDF filename from the product name.
///
/// Uses [`crate::utils::sanitize_component()`] for the base name,
/// lowercased and truncated, with a timestamp so repeated exports do
/// not collide. Falls back to `label_<timestamp>.pdf` when the
/// sanitized name is empty.
pub fn suggested_pdf_name(product_name: &str, now: OffsetDateTime) -> String {
    let mut base = sanitize_component(product_name).to_ascii_lowercase();
    base.truncate(20);
    let base = base.trim_matches('_');
    let base = if base.is_empty() { "label" } else { base };

    format!("{}_{}.pdf", base, now.unix_timestamp())
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps an existing matching extension (case-insensitive); otherwise
/// replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Write a single-page PDF of exactly the label's physical size.
///
/// Parent directories for `output` are created if missing. The record's
/// barcode is re-validated against its symbology before anything is
/// written; a malformed code is rejected rather than printed.
pub fn build_and_write_pdf(output: &Path, record: &LabelRecord, size: LabelSize) -> Result<()> {
    // Ensure parent exists so the document can be written without IO errors.
    if let Some(parent) = output.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    // Reject malformed codes before producing an unscannable label.
    let modules = encode_modules(&record.barcode, record.symbology).with_context(|| {
        format!(
            "Barcode {:?} is not a valid {} code",
            record.barcode,
            record.symbology.as_str()
        )
    })?;

    let width = size.width_mm();
    let height = size.height_mm();

    let (doc, page, layer) = PdfDocument::new("Label", Mm(width), Mm(height), "label");
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("Failed to register label font")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("Failed to register bold label font")?;

    let black = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));
    layer.set_fill_color(black.clone());
    layer.set_outline_color(black);

    // Border, mirroring the preview.
    layer.set_outline_thickness(1.0);
    layer.add_rect(
        Rect::new(Mm(0.4), Mm(0.4), Mm(width - 0.4), Mm(height - 0.4))
            .with_mode(PaintMode::Stroke),
    );

    // Product name, centered near the top edge.
    let name = record.product_name.to_uppercase();
    let name_pt = 6.0;
    let name_baseline = height - 3.2;
    layer.use_text(
        name.clone(),
        name_pt,
        Mm(centered_x(&name, name_pt, width)),
        Mm(name_baseline),
        &bold,
    );

    // Data row along the bottom edge: quantity left, expiry centered,
    // price right.
    let row_pt = 6.0;
    let row_baseline = 1.6;
    let quantity = format!("QTY: {}", record.quantity);
    let expiry = format!("EXP: {}", record.expiry);
    layer.use_text(quantity, row_pt, Mm(1.6), Mm(row_baseline), &regular);
    layer.use_text(
        expiry.clone(),
        row_pt,
        Mm(centered_x(&expiry, row_pt, width)),
        Mm(row_baseline),
        &regular,
    );
    let price_pt = 8.0;
    let price_width = approx_text_width_mm(&record.price, price_pt);
    layer.use_text(
        record.price.clone(),
        price_pt,
        Mm(width - 1.6 - price_width),
        Mm(row_baseline),
        &bold,
    );

    // Bar pattern fills the space between name and data row, with a
    // quiet zone on both sides.
    let digits_pt = 6.0;
    let digits_baseline = row_baseline + 3.4;
    let bar_bottom = digits_baseline + 2.6;
    let bar_top = name_baseline - 2.6;
    let quiet = 3.5;
    let module_w = (width - 2.0 * quiet) / modules.len() as f32;
    let bars_x0 = quiet;

    let mut index = 0;
    while index < modules.len() {
        if modules[index] {
            let start = index;
            while index < modules.len() && modules[index] {
                index += 1;
            }
            layer.add_rect(
                Rect::new(
                    Mm(bars_x0 + start as f32 * module_w),
                    Mm(bar_bottom),
                    Mm(bars_x0 + index as f32 * module_w),
                    Mm(bar_top),
                )
                .with_mode(PaintMode::Fill),
            );
        } else {
            index += 1;
        }
    }

    // Human-readable digits beneath the bars.
    layer.use_text(
        record.barcode.clone(),
        digits_pt,
        Mm(centered_x(&record.barcode, digits_pt, width)),
        Mm(digits_baseline),
        &regular,
    );

    let file = File::create(output)
        .with_context(|| format!("Failed to write PDF file {:?}", output))?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .with_context(|| format!("Failed to finalize PDF document {:?}", output))?;

    Ok(())
}

fn approx_text_width_mm(text: &str, font_pt: f32) -> f32 {
    text.chars().count() as f32 * font_pt * APPROX_ADVANCE * PT_TO_MM
}

fn centered_x(text: &str, font_pt: f32, page_width_mm: f32) -> f32 {
    ((page_width_mm - approx_text_width_mm(text, font_pt)) / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;
    use time::OffsetDateTime;

    use super::{build_and_write_pdf, ensure_extension, suggested_pdf_name};
    use crate::models::label::{LabelRecord, LabelSize};

    fn epoch() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(0).unwrap()
    }

    #[test]
    fn suggested_pdf_name_sanitizes_and_stamps() {
        let result = suggested_pdf_name("Ångström Juice 1L", epoch());
        assert_eq!(result, "angstrom_juice_1l_0.pdf");
    }

    #[test]
    fn suggested_pdf_name_truncates_long_names() {
        let result = suggested_pdf_name("A very long product name indeed", epoch());
        assert_eq!(result, "a_very_long_product_0.pdf");
    }

    #[test]
    fn suggested_pdf_name_falls_back_when_empty() {
        let result = suggested_pdf_name("???", epoch());
        assert_eq!(result, "label_0.pdf");
    }

    // Should leave an existing matching extension untouched, ignoring case.
    #[test]
    fn ensure_extension_preserves_matching_extension_case_insensitive() {
        let path = PathBuf::from("/tmp/label.PDF");
        let result = ensure_extension(path.clone(), "pdf");

        assert_eq!(result, path);
    }

    // Should replace an unmatched extension with the requested one.
    #[test]
    fn ensure_extension_replaces_when_different() {
        let path = PathBuf::from("label.txt");
        let result = ensure_extension(path, "pdf");

        assert_eq!(result.extension().and_then(|e| e.to_str()), Some("pdf"));
    }

    #[test]
    fn build_and_write_pdf_writes_a_pdf_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("nested").join("label.pdf");

        build_and_write_pdf(&out, &LabelRecord::default(), LabelSize::Size58x30).unwrap();

        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output should be a PDF");
        assert!(bytes.len() > 500, "document should not be empty");
    }

    #[test]
    fn build_and_write_pdf_handles_both_sizes() {
        let tmp = TempDir::new().unwrap();

        for (name, size) in [
            ("a.pdf", LabelSize::Size58x30),
            ("b.pdf", LabelSize::Size50x50),
        ] {
            let out = tmp.path().join(name);
            build_and_write_pdf(&out, &LabelRecord::default(), size).unwrap();
            assert!(out.exists());
        }
    }

    #[test]
    fn build_and_write_pdf_rejects_invalid_barcode() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("bad.pdf");

        let record = LabelRecord {
            barcode: "7891234567890".into(), // wrong check digit
            ..LabelRecord::default()
        };

        let result = build_and_write_pdf(&out, &record, LabelSize::Size58x30);

        assert!(result.is_err(), "invalid codes must not be printed");
        assert!(!out.exists());
    }
}
