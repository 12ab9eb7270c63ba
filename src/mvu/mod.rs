// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and
//! export commands.

use std::path::PathBuf;

use crate::logic::barcode::{BarcodeSymbology, validate_barcode};
use crate::logic::pdf::build_and_write_pdf;
use crate::logic::raster::write_barcode_png;
use crate::models::label::{LabelRecord, LabelSize};
use crate::ui::components::barcode_field::{self, BarcodeFieldModel, BarcodeFieldMsg};

/// Pixels per module for exported barcode PNGs.
const PNG_SCALE: u32 = 4;
/// Bar height in pixels for exported barcode PNGs.
const PNG_HEIGHT: u32 = 240;

/// Top-level application state.
#[derive(Debug)]
pub struct AppModel {
    /// Product name printed across the top of the label.
    pub product_name: String,
    /// Quantity text, free-form.
    pub quantity: String,
    /// Expiry text, free-form.
    pub expiry: String,
    /// Price text, printed verbatim.
    pub price: String,
    /// Barcode field state (code, symbology, auto-generate).
    pub barcode: BarcodeFieldModel,
    /// Selected physical label size.
    pub label_size: LabelSize,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in the modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::from_record(LabelRecord::default(), LabelSize::default())
    }
}

impl AppModel {
    /// Build a model from a (possibly persisted) label record.
    pub fn from_record(record: LabelRecord, label_size: LabelSize) -> Self {
        Self {
            product_name: record.product_name,
            quantity: record.quantity,
            expiry: record.expiry,
            price: record.price,
            barcode: BarcodeFieldModel::from_record(record.barcode, record.symbology),
            label_size,
            status: None,
            error: None,
            pending_commands: 0,
        }
    }

    /// Assemble the current form state into a label record.
    pub fn record(&self) -> LabelRecord {
        LabelRecord {
            product_name: self.product_name.clone(),
            quantity: self.quantity.clone(),
            expiry: self.expiry.clone(),
            price: self.price.clone(),
            barcode: self.barcode.code().to_string(),
            symbology: self.barcode.symbology(),
        }
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    ProductNameChanged(String),
    QuantityChanged(String),
    ExpiryChanged(String),
    PriceChanged(String),
    SetLabelSize(LabelSize),
    Barcode(BarcodeFieldMsg),
    ExportPdfRequested(PathBuf),
    ExportPngRequested(PathBuf),
    ExportCancelled,
    ExportCompleted(Result<PathBuf, String>),
    DismissError,
}

/// Commands represent side effects executed between frames.
pub enum Command {
    ExportPdf(ExportPayload),
    ExportBarcodePng {
        output: PathBuf,
        code: String,
        symbology: BarcodeSymbology,
    },
}

/// Captured, validated data for a PDF export.
pub struct ExportPayload {
    /// Final document path on disk (with `.pdf` extension enforced).
    pub output: PathBuf,
    /// Label record with a validated barcode.
    pub record: LabelRecord,
    /// Physical page size.
    pub size: LabelSize,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::ProductNameChanged(text) => model.product_name = text,
        Msg::QuantityChanged(text) => model.quantity = text,
        Msg::ExpiryChanged(text) => model.expiry = text,
        Msg::PriceChanged(text) => model.price = text,
        Msg::SetLabelSize(size) => model.label_size = size,
        Msg::DismissError => model.error = None,
        Msg::Barcode(m) => {
            if let Some(event) = barcode_field::update(&mut model.barcode, m) {
                surface_event(model, event.message, event.is_error);
            }
        }
        Msg::ExportPdfRequested(output) => match validate_for_export(model, output) {
            Ok(payload) => cmds.push(Command::ExportPdf(payload)),
            Err(err) => surface_event(model, err, true),
        },
        Msg::ExportPngRequested(output) => {
            if model.barcode.is_valid() {
                cmds.push(Command::ExportBarcodePng {
                    output,
                    code: model.barcode.code().to_string(),
                    symbology: model.barcode.symbology(),
                });
            } else {
                surface_event(
                    model,
                    format!(
                        "Enter a valid {} code before exporting.",
                        model.barcode.symbology().display_name()
                    ),
                    true,
                );
            }
        }
        Msg::ExportCancelled => surface_event(model, "Export cancelled.".to_string(), false),
        Msg::ExportCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("Exported: {}", path.display()), false),
            Err(err) => surface_event(model, format!("Export failed:\n\n{err}"), true),
        },
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::ExportPdf(payload) => {
            let result = build_and_write_pdf(&payload.output, &payload.record, payload.size)
                .map(|_| payload.output.clone());
            Msg::ExportCompleted(result.map_err(|e| format!("{e:#}")))
        }
        Command::ExportBarcodePng {
            output,
            code,
            symbology,
        } => {
            let result = write_barcode_png(&output, &code, symbology, PNG_SCALE, PNG_HEIGHT)
                .map(|_| output.clone());
            Msg::ExportCompleted(result.map_err(|e| format!("{e:#}")))
        }
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

/// Validate model state and build the payload required for a PDF export.
fn validate_for_export(model: &AppModel, output: PathBuf) -> Result<ExportPayload, String> {
    let mut record = model.record();
    record.product_name = record.product_name.trim().to_string();
    if record.product_name.is_empty() {
        return Err("Please enter a product name.".into());
    }

    if !validate_barcode(&record.barcode, record.symbology) {
        return Err(format!(
            "{:?} is not a valid {} code.",
            record.barcode,
            record.symbology.display_name()
        ));
    }

    Ok(ExportPayload {
        output,
        record,
        size: model.label_size,
    })
}
