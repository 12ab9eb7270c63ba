// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for composing and exporting
//! product labels. Handles layout, form controls, and wiring to the
//! export commands.

pub mod components;

use eframe::egui;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::logic::pdf::{ensure_extension, suggested_pdf_name};
use crate::models::label::{LabelRecord, LabelSize};
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::{barcode_field, label_preview};

/// Storage key for the persisted form state.
const STATE_KEY: &str = "labelpress_state";

/// Snapshot of the form persisted between sessions.
#[derive(Serialize, Deserialize)]
struct PersistedState {
    record: LabelRecord,
    size: LabelSize,
}

/// Stateful egui application for building and exporting labels.
pub struct LabelPressApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl LabelPressApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        let model = cc
            .storage
            .and_then(|storage| storage.get_string(STATE_KEY))
            .and_then(|json| serde_json::from_str::<PersistedState>(&json).ok())
            .map(|state| AppModel::from_record(state.record, state.size))
            .unwrap_or_default();

        Self {
            model,
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for LabelPressApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();
        let ctx = &ctx;
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
        self.inbox = msgs;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Label Generator");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    ui.separator();
                    self.render_export_pdf_button(ui);
                    self.render_export_png_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::SidePanel::right("preview_panel")
            .resizable(false)
            .default_width(self.model.label_size.width_mm() * 4.0 + 32.0)
            .show(ctx, |ui| {
                self.render_preview(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_size_selector(ui);
                ui.add_space(12.0);

                self.render_product_name_input(ui);
                ui.add_space(12.0);

                self.render_barcode_section(ui);
                ui.add_space(12.0);

                self.render_detail_fields(ui);
                ui.add_space(8.0);
            });
        });
    }

    /// Persist the current label so the next session starts from it.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedState {
            record: self.model.record(),
            size: self.model.label_size,
        };
        if let Ok(json) = serde_json::to_string(&state) {
            storage.set_string(STATE_KEY, json);
        }
    }
}

impl LabelPressApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Render the PDF export button and drive the save-file dialog.
    ///
    /// Enabled only when the product name is non-empty and the barcode
    /// validates; the exporter re-checks both before writing anything.
    fn render_export_pdf_button(&mut self, ui: &mut egui::Ui) {
        let export_enabled =
            !self.model.product_name.trim().is_empty() && self.model.barcode.is_valid();
        let button = egui::Button::new(format!(
            "{} Export PDF",
            egui_phosphor::regular::PRINTER
        ));

        if ui
            .add_enabled(export_enabled, button)
            .on_disabled_hover_text("Enter a product name and a valid barcode")
            .clicked()
        {
            let default_name =
                suggested_pdf_name(&self.model.product_name, OffsetDateTime::now_utc());
            let dialog = rfd::FileDialog::new()
                .set_title("Export label PDF")
                .add_filter("PDF", &["pdf"])
                .set_file_name(&default_name);

            if let Some(path) = dialog.save_file() {
                self.inbox
                    .push(Msg::ExportPdfRequested(ensure_extension(path, "pdf")));
            } else {
                self.inbox.push(Msg::ExportCancelled);
            }
        }
    }

    /// Render the barcode PNG export button for feeding other tooling.
    fn render_export_png_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Barcode PNG",
            egui_phosphor::regular::IMAGE
        ));

        if ui
            .add_enabled(self.model.barcode.is_valid(), button)
            .on_disabled_hover_text("Enter a valid barcode first")
            .clicked()
        {
            let default_name = format!("{}.png", self.model.barcode.code());
            let dialog = rfd::FileDialog::new()
                .set_title("Export barcode PNG")
                .add_filter("PNG image", &["png"])
                .set_file_name(&default_name);

            if let Some(path) = dialog.save_file() {
                self.inbox
                    .push(Msg::ExportPngRequested(ensure_extension(path, "png")));
            } else {
                self.inbox.push(Msg::ExportCancelled);
            }
        }
    }

    /// Segmented control for the physical label size.
    fn render_size_selector(&mut self, ui: &mut egui::Ui) {
        ui.label("Label size");
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            for size in [LabelSize::Size58x30, LabelSize::Size50x50] {
                let button =
                    egui::Button::new(size.display_name()).selected(self.model.label_size == size);
                if ui.add(button).clicked() {
                    self.inbox.push(Msg::SetLabelSize(size));
                }
            }
        });
    }

    /// Render the product name field.
    fn render_product_name_input(&mut self, ui: &mut egui::Ui) {
        ui.label("Product name");
        ui.add_space(4.0);
        let mut name = self.model.product_name.clone();
        if ui
            .add(egui::TextEdit::singleline(&mut name).hint_text("e.g., UHT WHOLE MILK 1L"))
            .changed()
        {
            self.inbox.push(Msg::ProductNameChanged(name));
        }
    }

    /// Grouped barcode controls backed by the barcode field component.
    fn render_barcode_section(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            let msgs = barcode_field::view(ui, &self.model.barcode);
            self.inbox.extend(msgs.into_iter().map(Msg::Barcode));
        });
    }

    /// Grouped quantity/expiry/price block.
    fn render_detail_fields(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::Grid::new("detail_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 10.0))
                .min_col_width(140.0)
                .show(ui, |ui| {
                    ui.label("Quantity");
                    let mut quantity = self.model.quantity.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut quantity).hint_text("e.g., 1"))
                        .changed()
                    {
                        self.inbox.push(Msg::QuantityChanged(quantity));
                    }
                    ui.end_row();

                    ui.label("Expiry");
                    let mut expiry = self.model.expiry.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut expiry).hint_text("e.g., 2026-11-04"))
                        .changed()
                    {
                        self.inbox.push(Msg::ExpiryChanged(expiry));
                    }
                    ui.end_row();

                    ui.label("Price");
                    let mut price = self.model.price.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut price).hint_text("e.g., $1.79"))
                        .changed()
                    {
                        self.inbox.push(Msg::PriceChanged(price));
                    }
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("All three are printed verbatim on the label.")
                    .small()
                    .color(egui::Color32::from_gray(110)),
            );
        });
    }

    /// Live preview of the label at the selected physical size.
    fn render_preview(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label("Preview");
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            label_preview::view(ui, &self.model.record(), self.model.label_size);
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(self.model.label_size.display_name())
                    .small()
                    .color(egui::Color32::from_gray(110)),
            );
        });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Validation error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status/error message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0))
                        .on_hover_text(format!(
                            "{} export(s) running in background",
                            self.model.pending_commands
                        ));
                }
            });
        }
    }
}
