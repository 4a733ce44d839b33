use egui::{Response, Sense, Ui, Vec2};
use smolimg_common::OutputFormat;

/// File drop zone widget
pub fn drop_zone(ui: &mut Ui, hovered: bool) -> Response {
    let desired_size = Vec2::new(ui.available_width(), 120.0);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

    if ui.is_rect_visible(rect) {
        let bg_color = if response.hovered() || hovered {
            crate::theme::Theme::PRIMARY.linear_multiply(0.15)
        } else {
            crate::theme::Theme::BG_PANEL
        };

        let stroke_color = if response.hovered() || hovered {
            crate::theme::Theme::PRIMARY
        } else {
            crate::theme::Theme::BG_HOVER
        };

        ui.painter().rect_filled(rect, 8.0, bg_color);
        ui.painter()
            .rect_stroke(rect, 8.0, egui::Stroke::new(2.0, stroke_color));

        let text = if hovered || response.hovered() {
            "Drop images here"
        } else {
            "Drag & drop images or click to browse"
        };

        let text_color = if response.hovered() || hovered {
            crate::theme::Theme::PRIMARY
        } else {
            crate::theme::Theme::TEXT_SECONDARY
        };

        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(15.0),
            text_color,
        );

        if !hovered && !response.hovered() {
            let hint = "Supported: PNG, JPEG, WebP";
            ui.painter().text(
                rect.center() + Vec2::new(0.0, 25.0),
                egui::Align2::CENTER_CENTER,
                hint,
                egui::FontId::proportional(11.0),
                crate::theme::Theme::TEXT_SECONDARY.linear_multiply(0.7),
            );
        }
    }

    response
}

/// Output format combo box
pub fn format_selector(ui: &mut Ui, selected: &mut OutputFormat) -> bool {
    let formats = [OutputFormat::Webp, OutputFormat::Jpeg, OutputFormat::Png];

    let mut changed = false;

    egui::ComboBox::from_label("Format")
        .selected_text(selected.to_string())
        .show_ui(ui, |ui| {
            for format in formats {
                if ui
                    .selectable_value(selected, format, format.to_string())
                    .clicked()
                {
                    changed = true;
                }
            }
        });

    changed
}

/// Labeled percentage slider
pub fn percent_slider(ui: &mut Ui, label: &str, value: &mut u8, range: std::ops::RangeInclusive<u8>) -> bool {
    ui.label(label);
    ui.add_space(4.0);

    ui.add(
        egui::Slider::new(value, range)
            .suffix("%")
            .show_value(true),
    )
    .changed()
}

/// Progress bar with detailed status
pub fn progress_bar(ui: &mut Ui, current: usize, total: usize) {
    if total == 0 {
        return;
    }

    let progress = current as f32 / total as f32;
    let percentage = (progress * 100.0) as u32;

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("Processing: {} of {}", current, total))
                .size(13.0)
                .color(crate::theme::Theme::TEXT_PRIMARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("{}%", percentage))
                    .size(13.0)
                    .color(crate::theme::Theme::PRIMARY),
            );
        });
    });

    ui.add_space(6.0);

    let progress_bar = egui::ProgressBar::new(progress)
        .animate(true)
        .desired_width(ui.available_width())
        .desired_height(8.0);

    ui.add(progress_bar);
}

/// Human-readable byte size, matching the metric cards
pub fn format_kb(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(1024), "1.0 KB");
        assert_eq!(format_kb(1536), "1.5 KB");
        assert_eq!(format_kb(0), "0.0 KB");
    }
}
