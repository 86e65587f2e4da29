use eframe::egui;
use log::error;
use std::path::PathBuf;
use crate::app_config::AppConfig;
use crate::app_controller::{Controller, TranslationRequest};

// @module: Desktop window collecting run parameters and launching translations

const RUN_BUTTON_COLOR: egui::Color32 = egui::Color32::from_rgb(34, 139, 34);

/// Main application window
pub struct TranslatorApp {
    // @field: Controller executing translation runs
    controller: Controller,

    // @field: Presentation picked by the user, if any
    input_path: Option<PathBuf>,

    // @field: Destination folder picked by the user, if any
    output_dir: Option<PathBuf>,

    // @field: Editable source language name
    source_language: String,

    // @field: Editable target language name
    target_language: String,

    // @field: Editable model identifier
    model: String,
}

impl TranslatorApp {
    // @method: Create the window state seeded from the startup configuration
    pub fn new(config: &AppConfig, controller: Controller) -> Self {
        Self {
            controller,
            input_path: None,
            output_dir: None,
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            model: config.model.clone(),
        }
    }

    fn pick_input(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("PowerPoint", &["pptx"])
            .pick_file();
        if picked.is_some() {
            self.input_path = picked;
        }
    }

    fn pick_output(&mut self) {
        let picked = rfd::FileDialog::new().pick_folder();
        if picked.is_some() {
            self.output_dir = picked;
        }
    }

    /// Run one translation. Blocks the UI thread until the run finishes.
    fn run_translation(&self) {
        let (Some(input_path), Some(output_dir)) = (&self.input_path, &self.output_dir) else {
            show_error("Select an input file and an output folder first.");
            return;
        };

        let request = TranslationRequest {
            input_path: input_path.clone(),
            output_dir: output_dir.clone(),
            source_language: self.source_language.trim().to_string(),
            target_language: self.target_language.trim().to_string(),
            model: self.model.trim().to_string(),
        };

        match self.controller.run(&request) {
            Ok(summary) => {
                show_info(&format!(
                    "Translation finished.\n\nSaved to {}",
                    summary.output_path.display()
                ));
            }
            Err(e) => {
                error!("Translation run failed: {:#}", e);
                show_error(&format!("Translation failed.\n\n{:#}", e));
            }
        }
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(5.0);
            ui.heading("PowerPoint Translator");
            ui.add_space(10.0);

            ui.label(egui::RichText::new("Files").strong());
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("Choose file...").clicked() {
                    self.pick_input();
                }
                match &self.input_path {
                    Some(path) => {
                        ui.label(path.file_name().and_then(|n| n.to_str()).unwrap_or("?"));
                    }
                    None => {
                        ui.label(
                            egui::RichText::new("not selected")
                                .color(ui.visuals().weak_text_color()),
                        );
                    }
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Choose folder...").clicked() {
                    self.pick_output();
                }
                match &self.output_dir {
                    Some(dir) => {
                        ui.label(dir.display().to_string());
                    }
                    None => {
                        ui.label(
                            egui::RichText::new("not selected")
                                .color(ui.visuals().weak_text_color()),
                        );
                    }
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            ui.label(egui::RichText::new("Languages").strong());
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Source language:");
                ui.add(egui::TextEdit::singleline(&mut self.source_language).desired_width(180.0));
            });
            ui.horizontal(|ui| {
                ui.label("Target language:");
                ui.add(egui::TextEdit::singleline(&mut self.target_language).desired_width(180.0));
            });

            ui.add_space(10.0);
            ui.label(egui::RichText::new("Model").strong());
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Model:");
                ui.add(egui::TextEdit::singleline(&mut self.model).desired_width(180.0));
            });

            ui.add_space(15.0);
            let run_button = egui::Button::new(
                egui::RichText::new("Translate")
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(RUN_BUTTON_COLOR)
            .min_size(egui::vec2(140.0, 32.0));
            if ui.add(run_button).clicked() {
                self.run_translation();
            }

            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("The window stays busy until the whole presentation is done.")
                    .size(11.0)
                    .color(ui.visuals().weak_text_color()),
            );
        });
    }
}

// @function: Modal error dialog
pub fn show_error(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("PPT Translator")
        .set_description(message)
        .show();
}

// @function: Modal information dialog
fn show_info(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title("PPT Translator")
        .set_description(message)
        .show();
}
