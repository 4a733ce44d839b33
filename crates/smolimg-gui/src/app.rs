use crate::preview::preview_from_encoded;
use crate::state::{live_card_ids, AppState, FileStatus, InputFile, ProcessingState, ResultCard};
use crate::theme::Theme;
use crate::widgets;
use egui::{CentralPanel, ScrollArea, SidePanel, TextureHandle, TopBottomPanel};
use smolimg_common::download_file_name;
use smolimg_core::transform;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

const CARD_WIDTH: f32 = 300.0;

pub struct SmolimgApp {
    state: AppState,
    textures: HashMap<u64, TextureHandle>,
    processing_handle: Option<std::thread::JoinHandle<()>>,
}

impl SmolimgApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Theme::configure(&cc.egui_ctx);

        Self {
            state: AppState::new(),
            textures: HashMap::new(),
            processing_handle: None,
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.heading(egui::RichText::new("smolimg").size(20.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Privacy-first, local image compression")
                        .size(13.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });
        });

        ui.add_space(4.0);
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Settings").size(16.0).strong());
        ui.add_space(12.0);
        ui.separator();
        ui.add_space(16.0);

        // Output format
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Output Format")
                        .size(14.0)
                        .color(Theme::TEXT_PRIMARY),
                );
                ui.add_space(8.0);

                let mut format = self.state.format();
                if widgets::format_selector(ui, &mut format) {
                    self.state.set_format(format);
                }

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("WebP offers the best compression")
                        .size(11.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });

        ui.add_space(12.0);

        // Quality
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                let mut quality = self.state.quality();
                if widgets::percent_slider(ui, "Quality", &mut quality, 1..=100) {
                    self.state.set_quality(quality);
                }

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Higher quality = larger file size")
                        .size(11.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });

        ui.add_space(12.0);

        // Resize
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                let mut factor = self.state.resize_factor();
                if widgets::percent_slider(ui, "Resize", &mut factor, 10..=100) {
                    self.state.set_resize_factor(factor);
                }

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Reduce resolution to save more space")
                        .size(11.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let response = widgets::drop_zone(ui, false);

        if response.clicked() {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                .pick_files()
            {
                self.state.add_files(paths);
            }
        }

        // Handle drag-drop
        ui.ctx().input(|i| {
            if !i.raw.dropped_files.is_empty() {
                let paths: Vec<PathBuf> = i
                    .raw
                    .dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .collect();
                self.state.add_files(paths);
            }
        });
    }

    fn render_results_grid(&mut self, ui: &mut egui::Ui) {
        let files = self.state.input_files();

        if files.is_empty() {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("No images selected")
                        .size(14.0)
                        .color(Theme::TEXT_SECONDARY),
                );
            });
            return;
        }

        // Drop textures for cards no longer in the list (cleared, removed,
        // or replaced by a re-run)
        let live = live_card_ids(&files);
        self.textures.retain(|id, _| live.contains(id));

        // Wrapping grid: fixed-width cards, as many columns as fit
        let columns = ((ui.available_width() / (CARD_WIDTH + 16.0)) as usize).max(1);

        for (row_idx, row) in files.chunks(columns).enumerate() {
            ui.horizontal_top(|ui| {
                for (col_idx, file) in row.iter().enumerate() {
                    self.render_card(ui, row_idx * columns + col_idx, file);
                }
            });
            ui.add_space(8.0);
        }
    }

    fn render_card(&mut self, ui: &mut egui::Ui, index: usize, file: &InputFile) {
        egui::Frame::none()
            .fill(Theme::BG_PANEL)
            .rounding(egui::Rounding::same(6.0))
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH);

                // Header: status icon + file name, remove button on the right
                ui.horizontal(|ui| {
                    let icon = Theme::status_icon(&file.status);
                    let color = Theme::status_color(&file.status);
                    ui.colored_label(color, egui::RichText::new(icon).size(16.0));
                    ui.label(egui::RichText::new(file.display_name()).size(13.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let busy = matches!(
                            self.state.processing_state(),
                            ProcessingState::Running { .. }
                        );
                        let remove = egui::Button::new(egui::RichText::new("✕").size(12.0))
                            .small();
                        if ui.add_enabled(!busy, remove).clicked() {
                            self.state.remove_file(index);
                        }
                    });
                });

                ui.add_space(8.0);

                match &file.status {
                    FileStatus::Pending => {
                        ui.label(
                            egui::RichText::new("Waiting...")
                                .size(12.0)
                                .color(Theme::TEXT_SECONDARY),
                        );
                    }
                    FileStatus::Processing => {
                        ui.label(
                            egui::RichText::new("Compressing...")
                                .size(12.0)
                                .color(Theme::INFO),
                        );
                    }
                    FileStatus::Done(card) => {
                        self.render_card_body(ui, card);
                    }
                    FileStatus::Failed(error) => {
                        // Inline error naming the file and the underlying failure
                        ui.colored_label(
                            Theme::ERROR,
                            egui::RichText::new(format!(
                                "Error processing {}: {}",
                                file.display_name(),
                                error
                            ))
                            .size(12.0),
                        );
                    }
                }
            });
    }

    fn render_card_body(&mut self, ui: &mut egui::Ui, card: &Arc<ResultCard>) {
        // Preview of the actual compressed output
        if let Some(preview) = &card.preview {
            let texture = self.textures.entry(card.id).or_insert_with(|| {
                ui.ctx().load_texture(
                    format!("card-{}", card.id),
                    preview.clone(),
                    egui::TextureOptions::LINEAR,
                )
            });

            ui.add(
                egui::Image::new(&*texture)
                    .max_width(CARD_WIDTH - 24.0)
                    .rounding(egui::Rounding::same(4.0)),
            );
            ui.add_space(8.0);
        }

        // Size metrics with savings delta
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new("Original")
                        .size(11.0)
                        .color(Theme::TEXT_SECONDARY),
                );
                ui.label(egui::RichText::new(widgets::format_kb(card.original_size)).size(13.0));
            });

            ui.add_space(16.0);

            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new("Compressed")
                        .size(11.0)
                        .color(Theme::TEXT_SECONDARY),
                );
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(widgets::format_kb(card.compressed_size)).size(13.0),
                    );

                    let delta_color = if card.savings_pct >= 0.0 {
                        Theme::SUCCESS
                    } else {
                        Theme::ERROR
                    };
                    ui.colored_label(
                        delta_color,
                        egui::RichText::new(format!("-{:.1}%", card.savings_pct)).size(12.0),
                    );
                });
            });
        });

        ui.add_space(8.0);

        if ui.button("Save").clicked() {
            self.save_card(card);
        }
    }

    fn save_card(&self, card: &ResultCard) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&card.download_name)
            .save_file()
        {
            match std::fs::write(&path, &card.data) {
                Ok(()) => tracing::info!("Saved {} bytes to {:?}", card.data.len(), path),
                Err(e) => tracing::error!("Failed to save {:?}: {}", path, e),
            }
        }
    }

    fn render_action_buttons(&mut self, ui: &mut egui::Ui) {
        let files = self.state.input_files();
        let can_process =
            !files.is_empty() && !matches!(self.state.processing_state(), ProcessingState::Running { .. });

        ui.horizontal(|ui| {
            let button = egui::Button::new(egui::RichText::new("Compress Files").size(14.0))
                .fill(if can_process { Theme::PRIMARY } else { Theme::BG_HOVER })
                .min_size(egui::Vec2::new(140.0, 32.0));

            if ui.add_enabled(can_process, button).clicked() {
                self.start_processing();
            }

            ui.add_space(8.0);

            let clear_button = egui::Button::new(egui::RichText::new("Clear All").size(14.0))
                .min_size(egui::Vec2::new(100.0, 32.0));

            if ui.add_enabled(!files.is_empty(), clear_button).clicked() {
                self.state.clear_files();
                self.textures.clear();
            }
        });
    }

    fn render_progress(&mut self, ui: &mut egui::Ui) {
        match self.state.processing_state() {
            ProcessingState::Idle => {}

            ProcessingState::Running { current, total } => {
                widgets::progress_bar(ui, current, total);
            }

            ProcessingState::Complete { success, failed } => {
                ui.horizontal(|ui| {
                    if success > 0 {
                        ui.colored_label(
                            Theme::SUCCESS,
                            egui::RichText::new(format!("{} compressed", success)).size(13.0),
                        );
                    }

                    if failed > 0 {
                        ui.add_space(12.0);
                        ui.colored_label(
                            Theme::ERROR,
                            egui::RichText::new(format!("{} failed", failed)).size(13.0),
                        );
                    }
                });
            }
        }
    }

    fn start_processing(&mut self) {
        let state = self.state.clone();

        // Spawn background thread for processing (egui runs without tokio runtime)
        let handle = std::thread::spawn(move || {
            let files = state.input_files();
            let total = files.len();
            let request = state.transform_request();

            state.set_processing_state(ProcessingState::Running { current: 0, total });

            let mut success = 0;
            let mut failed = 0;

            for (idx, file) in files.iter().enumerate() {
                state.set_file_status(idx, FileStatus::Processing);

                let result = std::fs::read(&file.path)
                    .map_err(smolimg_common::Error::from)
                    .and_then(|bytes| transform(&bytes, &request));

                match result {
                    Ok(res) => {
                        let card = ResultCard {
                            id: state.next_card_id(),
                            original_size: res.original_size,
                            compressed_size: res.compressed_size,
                            savings_pct: res.savings_pct,
                            preview: preview_from_encoded(&res.data),
                            download_name: download_file_name(
                                &file.display_name(),
                                request.format,
                            ),
                            data: res.data,
                        };

                        state.set_file_status(idx, FileStatus::Done(Arc::new(card)));
                        success += 1;
                    }
                    Err(e) => {
                        state.set_file_status(idx, FileStatus::Failed(e.to_string()));
                        failed += 1;
                    }
                }

                state.set_processing_state(ProcessingState::Running {
                    current: idx + 1,
                    total,
                });
            }

            state.set_processing_state(ProcessingState::Complete { success, failed });
        });

        self.processing_handle = Some(handle);
    }
}

impl eframe::App for SmolimgApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("top_panel")
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_PANEL)
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0)),
            )
            .show(ctx, |ui| {
                self.render_top_bar(ui);
            });

        SidePanel::left("settings_panel")
            .default_width(280.0)
            .resizable(false)
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(16.0)),
            )
            .show(ctx, |ui| {
                self.render_sidebar(ui);
            });

        TopBottomPanel::bottom("bottom_panel")
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_DARK)
                    .inner_margin(egui::Margin::same(16.0)),
            )
            .show(ctx, |ui| {
                self.render_progress(ui);
                ui.add_space(8.0);
                self.render_action_buttons(ui);
            });

        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_DARK)
                    .inner_margin(egui::Margin::same(20.0)),
            )
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Results").size(18.0).strong());
                ui.add_space(12.0);

                self.render_drop_zone(ui);
                ui.add_space(16.0);

                ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        self.render_results_grid(ui);
                    });
            });

        // Request repaint during processing for smooth progress updates
        if matches!(
            self.state.processing_state(),
            ProcessingState::Running { .. }
        ) {
            ctx.request_repaint();
        }
    }
}
