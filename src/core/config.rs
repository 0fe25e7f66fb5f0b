use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kinetics-400 I3D model and its label map. The label file is
/// newline-delimited, one action label per line, line order defines the
/// index of each model output.
const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/onnx-community/i3d-kinetics-400/resolve/main/i3d-kinetics-400.onnx";
const DEFAULT_LABELS_URL: &str =
    "https://raw.githubusercontent.com/deepmind/kinetics-i3d/master/data/label_map.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub model_url: String,
    pub labels_url: String,
    /// Overrides the default model cache location under the user cache dir.
    pub model_cache_path: Option<PathBuf>,
    /// Spatial resolution frames are resized to before inference (width, height).
    pub target_size: (u32, u32),
    /// Maximum number of frames fed to the model; 0 means the whole video.
    pub max_frames: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_url: DEFAULT_MODEL_URL.to_string(),
            labels_url: DEFAULT_LABELS_URL.to_string(),
            model_cache_path: None,
            target_size: (224, 224),
            max_frames: 0,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file at {}: {}", config_path.display(), e))?;

            // Try to parse the config, but if it fails due to missing fields, create a new one
            match serde_json::from_str::<Self>(&content) {
                Ok(config) => {
                    log::info!("Loaded existing config from {}", config_path.display());
                    Ok(config)
                }
                Err(e) => {
                    log::warn!("Config file exists but has issues ({}), creating new one with defaults", e);
                    let new_config = Self::default();
                    new_config.save()
                        .map_err(|save_err| anyhow::anyhow!("Failed to save new config: {}", save_err))?;
                    log::info!("Created new config file at {}", config_path.display());
                    Ok(new_config)
                }
            }
        } else {
            log::info!("No config file found, creating default config");
            let config = Self::default();
            config.save()
                .map_err(|e| anyhow::anyhow!("Failed to save default config: {}", e))?;
            log::info!("Created new config file at {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("action-lens")
            .join("config.json")
    }

    /// Where the ONNX model lives on disk. Defaults to the user cache dir,
    /// mirroring the one-time download semantics of a model hub.
    pub fn model_path(&self) -> PathBuf {
        self.model_cache_path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("action-lens")
                .join("i3d-kinetics-400.onnx")
        })
    }
}
