use crate::classifier::model::InferenceModel;
use crate::video::FrameSequence;
use ndarray::Axis;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("label table is empty")]
    EmptyLabelTable,
    #[error("label table has {labels} entries but the model reports {outputs} outputs")]
    LabelCountMismatch { labels: usize, outputs: usize },
    #[error("cannot classify an empty frame sequence")]
    EmptyFrameSequence,
    #[error("model returned no output values")]
    EmptyModelOutput,
    #[error("predicted index {index} is outside the label table ({len} labels)")]
    LabelIndexOutOfRange { index: usize, len: usize },
    #[error("inference failed: {0}")]
    Inference(#[from] anyhow::Error),
}

/// Immutable recognition context: the model plus the label table, constructed
/// once at startup and shared by every recognition request.
pub struct ActionClassifier {
    model: Box<dyn InferenceModel>,
    labels: Vec<String>,
}

impl ActionClassifier {
    /// Pure construction; remote loading lives in `fetch_labels` and
    /// `ensure_model` so tests can inject stubs. Fails fast when the label
    /// table does not match a statically known model output width.
    pub fn new(model: Box<dyn InferenceModel>, labels: Vec<String>) -> Result<Self, ClassifierError> {
        if labels.is_empty() {
            return Err(ClassifierError::EmptyLabelTable);
        }
        if let Some(outputs) = model.output_len() {
            if outputs != labels.len() {
                return Err(ClassifierError::LabelCountMismatch {
                    labels: labels.len(),
                    outputs,
                });
            }
        }
        Ok(Self { model, labels })
    }

    /// Runs the model on one video and returns the top-predicted action
    /// label. Blocking for the duration of the inference call.
    pub fn predict(&mut self, frames: &FrameSequence) -> Result<String, ClassifierError> {
        if frames.shape()[0] == 0 {
            return Err(ClassifierError::EmptyFrameSequence);
        }

        // The model consumes a single batched video, not a true batch.
        let batch = frames.clone().insert_axis(Axis(0));
        let logits = self.model.infer(&batch)?;

        let probabilities = softmax(&logits);
        let index = argmax(&probabilities).ok_or(ClassifierError::EmptyModelOutput)?;

        let label = self
            .labels
            .get(index)
            .ok_or(ClassifierError::LabelIndexOutOfRange {
                index,
                len: self.labels.len(),
            })?;

        log::debug!("Top prediction: {} (p = {:.4})", label, probabilities[index]);
        Ok(label.clone())
    }
}

/// Softmax with max-logit subtraction for numerical stability.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&logit| (logit - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

/// Index of the largest value; ties go to the first occurrence.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best_index = None;
    let mut best_value = f32::NEG_INFINITY;
    for (index, &value) in values.iter().enumerate() {
        if value > best_value {
            best_value = value;
            best_index = Some(index);
        }
    }
    best_index
}
