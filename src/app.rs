//! eframe integration: startup setup and config persistence.

use crate::ui::main_window::MainWindow;
use crate::ui::theme;
use eframe::egui;
use encoding_inspector::config::ConfigManager;
use std::path::Path;
use tracing::{info, warn};

/// CJK fonts to try, first match wins. Noto CJK covers both Chinese and
/// Japanese; the platform fonts cover at least one of them.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\simsun.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
];

/// Top-level application: owns the config file and the main window.
pub struct App {
    config_manager: ConfigManager,
    main_window: MainWindow,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        setup_cjk_fonts(&cc.egui_ctx);
        theme::apply_dark_theme(&cc.egui_ctx);

        let config_manager = ConfigManager::new();
        let config = config_manager.load();
        info!("Config: {}", config_manager.get_config_file_path().display());

        Self {
            config_manager,
            main_window: MainWindow::new(config),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.main_window.render(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.config_manager.save(self.main_window.config()) {
            warn!("Failed to save config: {:#}", e);
        }
    }
}

fn setup_cjk_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    for candidate in CJK_FONT_CANDIDATES {
        let font_path = Path::new(candidate);
        if !font_path.exists() {
            continue;
        }
        let Ok(font_data) = std::fs::read(font_path) else {
            continue;
        };

        fonts
            .font_data
            .insert("cjk".to_owned(), egui::FontData::from_owned(font_data));

        // Fallback for both families
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            if let Some(list) = fonts.families.get_mut(&family) {
                list.push("cjk".to_owned());
            }
        }

        info!("Loaded CJK font: {}", candidate);
        break;
    }

    ctx.set_fonts(fonts);
}
