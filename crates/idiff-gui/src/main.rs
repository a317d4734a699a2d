mod app;
mod cli;
mod convert;
mod panels;
mod prompt;
mod textures;

use anyhow::{anyhow, Context};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use idiff_core::image_io::load_images;
use idiff_core::settings::Settings;
use idiff_core::window::Window;
use idiff_core::IdiffError;

use crate::prompt::{DialogPrompt, PromptOutcome};

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn load_settings() -> Settings {
    match Settings::default_path() {
        Some(path) => Settings::load_or_default(&path),
        None => {
            warn!("No configuration directory, using default settings");
            Settings::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let parsed = cli::parse(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_logging(parsed.options.verbose);
    if let Some(e) = &parsed.ignored {
        warn!(kind = %e.kind(), "Ignoring unparseable command line");
    }
    let options = parsed.options;
    debug!(files = ?options.files, view = ?options.view, flicker = ?options.flicker(), "Starting");

    let files = match prompt::complete_files(options.files.clone(), &mut DialogPrompt) {
        PromptOutcome::Ready(files) => files,
        outcome @ PromptOutcome::Cancelled => std::process::exit(outcome.exit_code().unwrap_or(0)),
    };

    let settings = load_settings();

    let images = match load_images(&files) {
        Ok(images) => images,
        Err(e) => {
            let (name, info) = match &e {
                IdiffError::ImageNotRecognized { path, info } => (
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string()),
                    info.clone(),
                ),
                other => (String::from("?"), other.to_string()),
            };
            error!(name = %name, error = %e, "Image not recognized");
            prompt::show_load_error(&name, &info);
            std::process::exit(1);
        }
    };

    let title = images
        .iter()
        .map(|image| image.display_name())
        .collect::<Vec<_>>()
        .join(" | ");
    let window = Window::new(images, &options.window_options(), &settings)
        .context("Failed to build comparison views")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title(format!("idiff: {title}")),
        ..Default::default()
    };

    eframe::run_native(
        "idiff",
        native_options,
        Box::new(|_cc| Ok(Box::new(app::IdiffApp::new(window)))),
    )
    .map_err(|e| anyhow!("Event loop failed: {e}"))
}
