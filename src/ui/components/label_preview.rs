// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Live label preview painted with the egui painter at a fixed
//! millimetre-to-pixel scale. Read-only; emits no messages.

use eframe::egui;

use crate::logic::encode::encode_modules;
use crate::models::label::{LabelRecord, LabelSize};

/// Preview scale in pixels per millimetre.
const PX_PER_MM: f32 = 4.0;

/// Paint the label as it will print: border, product name, bar
/// pattern with digits, and the quantity/expiry/price row. Invalid
/// codes render a placeholder instead of bars.
pub fn view(ui: &mut egui::Ui, record: &LabelRecord, size: LabelSize) {
    let desired = egui::vec2(
        size.width_mm() * PX_PER_MM,
        size.height_mm() * PX_PER_MM,
    );
    let (rect, _response) = ui.allocate_exact_size(desired, egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(2.0, egui::Color32::BLACK),
        egui::StrokeKind::Inside,
    );

    let mm = |v: f32| v * PX_PER_MM;

    painter.text(
        egui::pos2(rect.center().x, rect.top() + mm(1.2)),
        egui::Align2::CENTER_TOP,
        record.product_name.to_uppercase(),
        egui::FontId::proportional(mm(2.2)),
        egui::Color32::BLACK,
    );

    match encode_modules(&record.barcode, record.symbology) {
        Some(modules) => {
            let quiet = mm(3.5);
            let module_w = (rect.width() - 2.0 * quiet) / modules.len() as f32;
            let bar_top = rect.top() + mm(5.5);
            let bar_bottom = rect.bottom() - mm(7.5);

            let mut index = 0;
            while index < modules.len() {
                if modules[index] {
                    let start = index;
                    while index < modules.len() && modules[index] {
                        index += 1;
                    }
                    let x0 = rect.left() + quiet + start as f32 * module_w;
                    let x1 = rect.left() + quiet + index as f32 * module_w;
                    painter.rect_filled(
                        egui::Rect::from_min_max(
                            egui::pos2(x0, bar_top),
                            egui::pos2(x1, bar_bottom),
                        ),
                        0.0,
                        egui::Color32::BLACK,
                    );
                } else {
                    index += 1;
                }
            }

            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - mm(7.0)),
                egui::Align2::CENTER_TOP,
                &record.barcode,
                egui::FontId::monospace(mm(2.0)),
                egui::Color32::BLACK,
            );
        }
        None => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("Invalid {} code", record.symbology.display_name()),
                egui::FontId::proportional(mm(2.4)),
                egui::Color32::from_gray(110),
            );
        }
    }

    let row_y = rect.bottom() - mm(0.8);
    painter.text(
        egui::pos2(rect.left() + mm(1.6), row_y),
        egui::Align2::LEFT_BOTTOM,
        format!("QTY: {}", record.quantity),
        egui::FontId::proportional(mm(2.2)),
        egui::Color32::BLACK,
    );
    painter.text(
        egui::pos2(rect.center().x, row_y),
        egui::Align2::CENTER_BOTTOM,
        format!("EXP: {}", record.expiry),
        egui::FontId::proportional(mm(2.2)),
        egui::Color32::BLACK,
    );
    painter.text(
        egui::pos2(rect.right() - mm(1.6), row_y),
        egui::Align2::RIGHT_BOTTOM,
        &record.price,
        egui::FontId::proportional(mm(2.8)),
        egui::Color32::BLACK,
    );
}
