#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // Hide console on Windows

use smolimg_gui::SmolimgApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("smolimg=debug")
        .with_target(false)
        .without_time()
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "smolimg - Image Compressor",
        options,
        Box::new(|cc| Ok(Box::new(SmolimgApp::new(cc)))),
    )
}
