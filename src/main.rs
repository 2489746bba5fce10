//! Encoding Inspector - a desktop tool for inspecting text encodings.
//!
//! This application allows you to:
//! - Detect or select the source encoding of pasted text
//! - See the bytes of each character in UTF-8, GBK/GB2312 or Shift_JIS
//! - Check which characters a target encoding cannot represent
//! - Load snippets from files and save output in the target encoding

// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use app::App;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Encoding Inspector")
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Encoding Inspector",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}
