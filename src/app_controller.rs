use anyhow::{anyhow, Result};
use log::info;
use std::path::PathBuf;
use crate::file_utils::FileManager;
use crate::presentation_processor::{translate_presentation, RunSummary};
use crate::translation::TranslationService;

// @module: Application controller wiring UI requests to the walker

/// One translation run, as requested from the UI
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    // @field: Presentation to translate
    pub input_path: PathBuf,

    // @field: Directory receiving the translated copy
    pub output_dir: PathBuf,

    // @field: Language the presentation is written in
    pub source_language: String,

    // @field: Language to translate into
    pub target_language: String,

    // @field: Model identifier passed to the provider
    pub model: String,
}

/// Main application controller for presentation translation
pub struct Controller {
    // @field: Translation service holding the injected provider client
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller around an existing translation service
    pub fn new(service: TranslationService) -> Self {
        Self { service }
    }

    /// Run one translation request to completion.
    ///
    /// Blocks until every paragraph is translated and the copy is saved.
    /// The output directory is not created or checked here; a missing
    /// directory fails the copy step.
    pub fn run(&self, request: &TranslationRequest) -> Result<RunSummary> {
        if !FileManager::file_exists(&request.input_path) {
            return Err(anyhow!(
                "Input file not found: {}",
                request.input_path.display()
            ));
        }

        let output_path =
            FileManager::translated_output_path(&request.input_path, &request.output_dir);
        info!(
            "Starting translation run {} ({} -> {}, model {})",
            request.input_path.display(),
            request.source_language,
            request.target_language,
            request.model
        );

        let mut translate = |text: &str| {
            self.service
                .translate(
                    text,
                    &request.source_language,
                    &request.target_language,
                    &request.model,
                )
                .map_err(anyhow::Error::from)
        };

        translate_presentation(&request.input_path, &output_path, &mut translate)
    }
}
