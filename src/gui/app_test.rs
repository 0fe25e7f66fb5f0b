#[cfg(test)]
mod tests {
    use crate::classifier::{ActionClassifier, InferenceModel};
    use crate::core::AppConfig;
    use crate::gui::app::ActionLensApp;
    use ndarray::Array5;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Model stub counting how often inference was invoked.
    struct CountingModel {
        calls: Arc<AtomicUsize>,
    }

    impl InferenceModel for CountingModel {
        fn infer(&mut self, _batch: &Array5<f32>) -> anyhow::Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![0.1, 5.0, 0.2])
        }

        fn output_len(&self) -> Option<usize> {
            Some(3)
        }
    }

    // Test helper to create a minimal app instance for testing
    fn create_test_app() -> (ActionLensApp, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = CountingModel {
            calls: calls.clone(),
        };
        let classifier = ActionClassifier::new(
            Box::new(model),
            vec!["run".to_string(), "jump".to_string(), "sit".to_string()],
        )
        .unwrap();

        let app = ActionLensApp {
            config: AppConfig::default(),
            classifier,
            selected_video: None,
            recognized_action: None,
            status_message: String::new(),
        };
        (app, calls)
    }

    #[test]
    fn test_app_starts_with_no_video_selected() {
        let (app, _) = create_test_app();

        assert!(app.selected_video.is_none());
        assert!(app.recognized_action.is_none());
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_recognition_without_selection_is_a_no_op() {
        let (mut app, calls) = create_test_app();

        app.start_recognition();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(app.recognized_action.is_none());
        assert!(app.selected_video.is_none());
    }

    #[test]
    fn test_picking_a_file_updates_selection() {
        let (mut app, _) = create_test_app();

        app.apply_picked_file(Some(PathBuf::from("/videos/jump.mp4")));

        assert_eq!(app.selected_video, Some(PathBuf::from("/videos/jump.mp4")));
    }

    #[test]
    fn test_cancelled_picker_keeps_previous_selection() {
        let (mut app, _) = create_test_app();

        app.apply_picked_file(Some(PathBuf::from("/videos/jump.mp4")));
        app.apply_picked_file(None);

        assert_eq!(app.selected_video, Some(PathBuf::from("/videos/jump.mp4")));
    }

    #[test]
    fn test_unreadable_video_reports_error_without_inference() {
        let (mut app, calls) = create_test_app();

        app.apply_picked_file(Some(PathBuf::from("/definitely/not/here.mp4")));
        app.start_recognition();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(app.recognized_action.is_none());
        assert!(app.status_message.contains("Failed to load video"));
        // Selection survives a failed recognition; the user may retry.
        assert!(app.selected_video.is_some());
    }
}
