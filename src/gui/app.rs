use eframe::egui;
use image_resizer::{BatchHandle, TargetSize};
use std::time::Duration;

#[path = "app_processing.rs"]
mod app_processing;

/// Interval between progress polls while a batch runs
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Size requested by one of the start buttons
pub(crate) enum SizeChoice {
    Preset(TargetSize),
    Custom,
}

pub struct ResizerApp {
    // Input/Output paths
    input_path: String,
    output_path: String,

    // "width,height" typed by the user
    custom_size: String,

    // Processing state
    batch: Option<BatchHandle>,
    progress: f32,
    show_completion: bool,

    // Results
    results_message: String,
    error_message: String,
}

impl ResizerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            input_path: String::new(),
            output_path: String::new(),
            custom_size: String::new(),
            batch: None,
            progress: 0.0,
            show_completion: false,
            results_message: String::new(),
            error_message: String::new(),
        }
    }

    fn is_processing(&self) -> bool {
        self.batch.is_some()
    }

    fn render_file_selection(&mut self, ui: &mut egui::Ui) {
        ui.label("Input Directory:");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.input_path);
            if ui.button("Browse").clicked() {
                if let Some(path) = pick_folder() {
                    self.input_path = path;
                }
            }
        });

        ui.label("Output Directory for Resized Images:");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.output_path);
            if ui.button("Browse").clicked() {
                if let Some(path) = pick_folder() {
                    self.output_path = path;
                }
            }
        });

        ui.add_space(10.0);
    }

    fn render_size_buttons(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.is_processing();

        ui.label("Predefined sizes:");
        for preset in TargetSize::presets() {
            if ui
                .add_enabled(enabled, egui::Button::new(preset.to_string()))
                .clicked()
            {
                self.start_processing(SizeChoice::Preset(preset));
            }
        }

        ui.add_space(10.0);
        ui.label("Custom Size (width,height):");
        ui.text_edit_singleline(&mut self.custom_size);
        if ui
            .add_enabled(enabled, egui::Button::new("Use Custom Size"))
            .clicked()
        {
            self.start_processing(SizeChoice::Custom);
        }

        ui.add_space(10.0);
    }

    fn render_progress(&mut self, ui: &mut egui::Ui) {
        ui.add(egui::ProgressBar::new(self.progress).show_percentage());

        if !self.results_message.is_empty() {
            ui.label(&self.results_message);
        }

        if !self.error_message.is_empty() {
            ui.colored_label(egui::Color32::RED, &self.error_message);
        }
    }

    fn render_completion_notice(&mut self, ctx: &egui::Context) {
        if !self.show_completion {
            return;
        }

        let mut dismissed = false;
        egui::Window::new("Info")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Resizing completed.");
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.show_completion = false;
        }
    }
}

/// Folder dialog starting in the working directory
fn pick_folder() -> Option<String> {
    let mut dialog = rfd::FileDialog::new();
    if let Ok(root) = std::env::current_dir() {
        dialog = dialog.set_directory(root);
    }
    dialog.pick_folder().map(|path| path.display().to_string())
}

impl eframe::App for ResizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for progress updates from background thread
        self.check_progress();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Image Resizer");
            ui.add_space(10.0);

            self.render_file_selection(ui);
            self.render_size_buttons(ui);
            self.render_progress(ui);
        });

        self.render_completion_notice(ctx);

        if self.is_processing() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}
