// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow};
use eframe::egui;
use log::{error, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;

use crate::app_config::AppConfig;
use app_controller::Controller;
use providers::openai::OpenAI;
use translation::TranslationService;

mod app_config;
mod translation;
mod presentation_processor;
mod pptx;
mod file_utils;
mod app_controller;
mod gui;
mod providers;
mod errors;

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color sequence for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level; the window has no verbosity switch
    CustomLogger::init(LevelFilter::Info)?;

    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        error!("Startup configuration rejected: {:#}", e);
        gui::show_error(&format!("Cannot start PPT Translator.\n\n{:#}", e));
        return Err(e);
    }

    // Build the provider client once; every run reuses the same connection pool
    let provider = OpenAI::new(config.api_key.clone(), config.endpoint.clone());
    let service = TranslationService::new(provider);
    let controller = Controller::new(service);

    info!("Starting PPT Translator (endpoint {})", config.endpoint);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([480.0, 380.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PPT Translator",
        options,
        Box::new(move |_cc| Box::new(gui::TranslatorApp::new(&config, controller))),
    )
    .map_err(|e| anyhow!("Failed to start the application window: {}", e))
}
