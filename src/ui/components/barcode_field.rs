// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Barcode form section in an MVU-friendly shape: symbology selector,
//! auto-generate toggle, code input, and regenerate control.

use eframe::egui;

use crate::logic::barcode::{BarcodeSymbology, generate_barcode, validate_barcode};
use crate::ui::components::toggle_switch;

/// UI model for the barcode field, kept free of side effects beyond
/// drawing randomness when a new code is requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarcodeFieldModel {
    code: String,
    symbology: BarcodeSymbology,
    auto_generate: bool,
}

impl Default for BarcodeFieldModel {
    fn default() -> Self {
        Self {
            code: String::new(),
            symbology: BarcodeSymbology::default(),
            auto_generate: false,
        }
    }
}

impl BarcodeFieldModel {
    /// Restore the field from a persisted label record.
    pub fn from_record(code: String, symbology: BarcodeSymbology) -> Self {
        Self {
            code,
            symbology,
            auto_generate: false,
        }
    }

    /// Current code text, valid or not.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn symbology(&self) -> BarcodeSymbology {
        self.symbology
    }

    /// Whether the current code passes shape and checksum validation.
    pub fn is_valid(&self) -> bool {
        validate_barcode(&self.code, self.symbology)
    }
}

/// Messages emitted by the barcode field view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BarcodeFieldMsg {
    SymbologySelected(BarcodeSymbology),
    CodeEdited(String),
    AutoGenerateToggled(bool),
    Regenerate,
}

/// User-facing feedback surfaced to the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarcodeFieldEvent {
    pub message: String,
    pub is_error: bool,
}

/// Apply a message to the model. Returns a feedback event when relevant.
///
/// Semantics match the form's contract: enabling auto-generate creates
/// a fresh code immediately; switching symbology regenerates only while
/// auto-generate is on, otherwise the typed code is left untouched.
pub fn update(model: &mut BarcodeFieldModel, msg: BarcodeFieldMsg) -> Option<BarcodeFieldEvent> {
    match msg {
        BarcodeFieldMsg::SymbologySelected(symbology) => {
            if symbology == model.symbology {
                return None;
            }
            model.symbology = symbology;
            if model.auto_generate {
                model.code = generate_barcode(symbology);
                return Some(status(format!(
                    "Generated a new {} code.",
                    symbology.display_name()
                )));
            }
            None
        }
        BarcodeFieldMsg::CodeEdited(text) => {
            // The input is read-only while auto-generate holds the code.
            if !model.auto_generate {
                model.code = text;
            }
            None
        }
        BarcodeFieldMsg::AutoGenerateToggled(on) => {
            model.auto_generate = on;
            if on {
                model.code = generate_barcode(model.symbology);
                return Some(status(format!(
                    "Generated a new {} code.",
                    model.symbology.display_name()
                )));
            }
            None
        }
        BarcodeFieldMsg::Regenerate => {
            if !model.auto_generate {
                return None;
            }
            model.code = generate_barcode(model.symbology);
            Some(status("Generated a new code.".to_string()))
        }
    }
}

fn status(message: String) -> BarcodeFieldEvent {
    BarcodeFieldEvent {
        message,
        is_error: false,
    }
}

/// Render the barcode section and return any messages triggered by
/// user interaction.
pub fn view(ui: &mut egui::Ui, model: &BarcodeFieldModel) -> Vec<BarcodeFieldMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Barcode");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut auto = model.auto_generate;
            if toggle_switch(ui, &mut auto).changed() {
                msgs.push(BarcodeFieldMsg::AutoGenerateToggled(auto));
            }
            ui.label(
                egui::RichText::new("Auto-generate")
                    .small()
                    .color(egui::Color32::from_gray(110)),
            );
        });
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        for symbology in [BarcodeSymbology::Ean13, BarcodeSymbology::Ean8] {
            let button = egui::Button::new(symbology.display_name())
                .selected(model.symbology == symbology);
            if ui.add(button).clicked() {
                msgs.push(BarcodeFieldMsg::SymbologySelected(symbology));
            }
        }
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let hint = match model.symbology {
            BarcodeSymbology::Ean13 => "e.g., 7891234567895",
            BarcodeSymbology::Ean8 => "e.g., 96385074",
        };
        let mut code = model.code.clone();
        let response = ui.add_enabled(
            !model.auto_generate,
            egui::TextEdit::singleline(&mut code)
                .hint_text(hint)
                .desired_width(180.0),
        );
        if response.changed() {
            msgs.push(BarcodeFieldMsg::CodeEdited(code));
        }

        if model.auto_generate
            && ui
                .button(egui_phosphor::regular::ARROWS_CLOCKWISE)
                .on_hover_text("Generate a new code")
                .clicked()
        {
            msgs.push(BarcodeFieldMsg::Regenerate);
        }
    });

    if !model.auto_generate && !model.is_valid() {
        ui.add_space(2.0);
        ui.label(
            egui::RichText::new(format!(
                "Not a valid {} code; export stays disabled until it checks out.",
                model.symbology.display_name()
            ))
            .small()
            .color(ui.visuals().error_fg_color),
        );
    }

    msgs
}
