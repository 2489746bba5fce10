//! Main application window.
//!
//! Input card, convert buttons, output card and a status bar. Every user
//! interaction is turned into an `Action` on the shared `AppState`.

use crate::ui::theme;
use egui::{Button, Color32, RichText, TextEdit, TextStyle, Ui};
use encoding_inspector::config::Config;
use encoding_inspector::state::{Action, AppState, Notice};
use encoding_inspector::utils::clipboard;
use encoding_inspector::{Charset, EncodingLabel};
use std::path::Path;

/// Main window state.
pub struct MainWindow {
    config: Config,
    state: AppState,

    // Mirror of the input text; egui edits it in place
    input_buffer: String,
    other_target: Charset,
}

impl MainWindow {
    pub fn new(config: Config) -> Self {
        let state = AppState::new(&config);
        Self {
            config,
            state,
            input_buffer: String::new(),
            other_target: Charset::Gb2312,
        }
    }

    /// Current config, including the last used directory.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render the main window.
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.render_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_input_card(ui);
                ui.add_space(10.0);
                self.render_convert_buttons(ui);
                ui.add_space(10.0);
                self.render_output_card(ui);
                ui.add_space(10.0);
                self.render_function_buttons(ui);
            });
        });

        self.flush_clipboard();
    }

    fn render_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("🔄 Encoding Inspector").color(theme::accent_color()));
            ui.label(RichText::new("UTF-8 · GBK · Shift_JIS").color(theme::dim_text_color()));
            ui.separator();

            if ui.button("📂 Open file").clicked() {
                self.open_file();
            }
            if ui.button("💾 Save output").clicked() {
                self.save_output();
            }
        });
    }

    fn render_status_bar(&self, ui: &mut Ui) {
        ui.horizontal(|ui| match self.state.notice() {
            Some(Notice::Info(msg)) => {
                ui.colored_label(theme::success_color(), format!("✅ {}", msg));
            }
            Some(Notice::Warning(msg)) => {
                ui.colored_label(theme::warning_color(), format!("⚠ {}", msg));
            }
            Some(Notice::Error(msg)) => {
                ui.colored_label(theme::error_color(), format!("❌ {}", msg));
            }
            None => {
                ui.colored_label(theme::dim_text_color(), "Ready");
            }
        });
    }

    fn render_input_card(&mut self, ui: &mut Ui) {
        ui.group(|ui| {
            ui.heading("📝 Input");

            ui.horizontal(|ui| {
                ui.label(RichText::new("Source encoding:").strong());
                let current = self.state.source();
                let mut selected = current;
                egui::ComboBox::from_id_salt("source_encoding")
                    .selected_text(selected.to_string())
                    .show_ui(ui, |ui| {
                        for label in EncodingLabel::ALL {
                            ui.selectable_value(&mut selected, label, label.to_string());
                        }
                    });
                if selected != current {
                    self.state.dispatch(Action::SourceSelected(selected));
                }
            });

            ui.add_space(6.0);
            ui.label(RichText::new("Input text:").strong());
            let response = ui.add(
                TextEdit::multiline(&mut self.input_buffer)
                    .font(TextStyle::Monospace)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY)
                    .hint_text("Paste text here"),
            );
            if response.changed() {
                self.state.dispatch(Action::TextChanged(self.input_buffer.clone()));
            }

            ui.add_space(6.0);
            ui.label(RichText::new("Character encoding info:").strong());
            let mut info = self.state.input_info();
            ui.add(
                TextEdit::multiline(&mut info)
                    .font(TextStyle::Monospace)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .text_color(theme::dim_text_color()),
            );
        });
    }

    fn render_convert_buttons(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if convert_button(ui, "🔄 Convert to GBK", theme::gbk_color()) {
                self.state.dispatch(Action::Convert(Charset::Gbk));
            }
            if convert_button(ui, "🔄 Convert to Shift_JIS", theme::shift_jis_color()) {
                self.state.dispatch(Action::Convert(Charset::ShiftJis));
            }

            ui.separator();
            egui::ComboBox::from_id_salt("other_target")
                .selected_text(self.other_target.to_string())
                .show_ui(ui, |ui| {
                    for charset in Charset::TARGETS {
                        ui.selectable_value(&mut self.other_target, charset, charset.to_string());
                    }
                });
            if ui.button("Convert").clicked() {
                self.state.dispatch(Action::Convert(self.other_target));
            }
        });
    }

    fn render_output_card(&self, ui: &mut Ui) {
        ui.group(|ui| {
            ui.heading("📤 Output");

            let output = self.state.output();
            ui.horizontal(|ui| {
                ui.label(RichText::new("Output encoding:").strong());
                match output {
                    Some(output) => {
                        ui.colored_label(theme::success_color(), output.target.to_string());
                    }
                    None => {
                        ui.colored_label(theme::error_color(), "Not converted");
                    }
                }
            });

            ui.add_space(6.0);
            let mut text = output.map(|o| o.text.as_str()).unwrap_or("");
            ui.add(
                TextEdit::multiline(&mut text)
                    .font(TextStyle::Monospace)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(6.0);
            ui.label(RichText::new("Character encoding info:").strong());
            let mut info = output.map(|o| o.info.as_str()).unwrap_or("");
            ui.add(
                TextEdit::multiline(&mut info)
                    .font(TextStyle::Monospace)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .text_color(theme::dim_text_color()),
            );
        });
    }

    fn render_function_buttons(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("🗑 Clear").clicked() {
                self.input_buffer.clear();
                self.state.dispatch(Action::Clear);
            }
            if ui.button("📋 Copy output").clicked() {
                self.state.dispatch(Action::CopyOutput);
            }
        });
    }

    fn open_file(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Text files", &["txt", "csv", "log"])
            .add_filter("All files", &["*"]);
        if !self.config.last_directory.is_empty() {
            dialog = dialog.set_directory(&self.config.last_directory);
        }

        if let Some(path) = dialog.pick_file() {
            self.remember_directory(&path);
            self.state.dispatch(Action::LoadFile(path));
            self.input_buffer = self.state.input().to_string();
        }
    }

    fn save_output(&mut self) {
        let Some(output) = self.state.output() else {
            self.state.dispatch(Action::SaveUnavailable);
            return;
        };
        let file_name = format!("output_{}.txt", output.target.name());

        let mut dialog = rfd::FileDialog::new().set_file_name(file_name);
        if !self.config.last_directory.is_empty() {
            dialog = dialog.set_directory(&self.config.last_directory);
        }

        if let Some(path) = dialog.save_file() {
            self.remember_directory(&path);
            self.state.dispatch(Action::SaveOutput(path));
        }
    }

    fn remember_directory(&mut self, path: &Path) {
        if let Some(dir) = path.parent() {
            self.config.last_directory = dir.to_string_lossy().into_owned();
        }
    }

    fn flush_clipboard(&mut self) {
        if let Some(text) = self.state.take_clipboard_request() {
            let result = clipboard::copy_to_clipboard(&text).map_err(|e| e.to_string());
            self.state.dispatch(Action::ClipboardResult(result));
        }
    }
}

fn convert_button(ui: &mut Ui, text: &str, fill: Color32) -> bool {
    ui.add(Button::new(RichText::new(text).strong().color(Color32::WHITE)).fill(fill))
        .clicked()
}
