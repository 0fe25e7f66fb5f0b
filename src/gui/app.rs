use crate::classifier::ActionClassifier;
use crate::core::AppConfig;
use crate::video;
use eframe::egui;
use std::path::PathBuf;

pub struct ActionLensApp {
    pub config: AppConfig,
    pub classifier: ActionClassifier,
    pub selected_video: Option<PathBuf>,
    pub recognized_action: Option<String>,
    pub status_message: String,
}

impl ActionLensApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        classifier: ActionClassifier,
    ) -> Self {
        // Set global text color to white
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::WHITE);
        cc.egui_ctx.set_visuals(visuals);

        Self {
            config,
            classifier,
            selected_video: None,
            recognized_action: None,
            status_message: String::new(),
        }
    }

    pub fn select_video(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Video files", &["mp4", "avi"])
            .pick_file();
        self.apply_picked_file(picked);
    }

    /// Applies the result of the file picker. Cancellation keeps whatever
    /// was selected before.
    pub fn apply_picked_file(&mut self, picked: Option<PathBuf>) {
        match picked {
            Some(path) => {
                log::info!("Selected video: {}", path.display());
                self.selected_video = Some(path);
                self.status_message.clear();
            }
            None => {
                log::debug!("File picker cancelled, keeping current selection");
            }
        }
    }

    /// Runs the whole pipeline synchronously on the UI thread: load the
    /// selected video, run inference, show the top label. The window is
    /// unresponsive for the duration; that is the contract.
    pub fn start_recognition(&mut self) {
        let Some(path) = self.selected_video.clone() else {
            log::info!("Please select a video first.");
            self.status_message = "Please select a video first".to_string();
            return;
        };

        self.status_message = "Recognizing...".to_string();

        let frames = match video::load(&path, self.config.max_frames, self.config.target_size) {
            Ok(frames) => frames,
            Err(e) => {
                log::error!("Failed to load video {}: {}", path.display(), e);
                self.status_message = format!("Failed to load video: {}", e);
                return;
            }
        };

        match self.classifier.predict(&frames) {
            Ok(action) => {
                log::info!("Recognized action: {}", action);
                self.recognized_action = Some(action);
                self.status_message.clear();
            }
            Err(e) => {
                log::error!("Recognition failed for {}: {}", path.display(), e);
                self.status_message = format!("Recognition failed: {}", e);
            }
        }
    }
}

impl eframe::App for ActionLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading("Video Action Recognition");
                ui.add_space(16.0);

                if ui.button("Select Video").clicked() {
                    self.select_video();
                }

                ui.add_space(4.0);
                match &self.selected_video {
                    Some(path) => ui.label(format!("Selected Video: {}", path.display())),
                    None => ui.label("No video selected"),
                };

                ui.add_space(12.0);
                if ui.button("Start Recognition").clicked() {
                    self.start_recognition();
                }

                ui.add_space(12.0);
                ui.label(format!(
                    "Recognized Action: {}",
                    self.recognized_action.as_deref().unwrap_or("")
                ));
            });
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Status:");
                if self.status_message.is_empty() {
                    ui.label("Ready");
                } else {
                    ui.label(&self.status_message);
                }
            });
        });
    }
}
