mod classifier;
mod core;
mod gui;
mod video;

use crate::classifier::{ensure_model, fetch_labels, ActionClassifier, OnnxModel};
use crate::core::AppConfig;
use eframe::egui;
use gui::ActionLensApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load()?;

    // Both remote artifacts are fetched before the window opens; a failure
    // here is fatal to startup.
    let model_path = ensure_model(&config.model_url, &config.model_path())?;
    let model = OnnxModel::load(&model_path)?;
    let labels = fetch_labels(&config.labels_url)?;
    log::info!("Loaded {} action labels", labels.len());

    let classifier = ActionClassifier::new(Box::new(model), labels)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 320.0])
            .with_title("Action Lens - Video Action Recognition"),
        ..Default::default()
    };

    eframe::run_native(
        "Action Lens",
        options,
        Box::new(move |cc| Ok(Box::new(ActionLensApp::new(cc, config, classifier)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
