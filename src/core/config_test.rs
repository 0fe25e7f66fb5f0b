#[cfg(test)]
mod tests {
    use crate::core::AppConfig;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();

        assert_eq!(config.target_size, (224, 224));
        assert_eq!(config.max_frames, 0);
        assert!(config.model_cache_path.is_none());
        assert!(config.model_url.ends_with(".onnx"));
        assert!(config.labels_url.ends_with("label_map.txt"));
    }

    #[test]
    fn test_model_path_uses_cache_dir_by_default() {
        let config = AppConfig::default();
        let path = config.model_path();

        assert!(path.ends_with(PathBuf::from("action-lens").join("i3d-kinetics-400.onnx")));
    }

    #[test]
    fn test_model_path_honors_override() {
        let config = AppConfig {
            model_cache_path: Some(PathBuf::from("/tmp/models/custom.onnx")),
            ..AppConfig::default()
        };

        assert_eq!(config.model_path(), PathBuf::from("/tmp/models/custom.onnx"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig {
            max_frames: 64,
            target_size: (112, 112),
            ..AppConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.max_frames, 64);
        assert_eq!(parsed.target_size, (112, 112));
        assert_eq!(parsed.model_url, config.model_url);
    }

    #[test]
    fn test_config_with_missing_fields_fails_parse() {
        // Older config files without the newer fields should not parse;
        // AppConfig::load falls back to defaults in that case.
        let json = r#"{ "model_url": "http://example.com/model.onnx" }"#;
        assert!(serde_json::from_str::<AppConfig>(json).is_err());
    }
}
