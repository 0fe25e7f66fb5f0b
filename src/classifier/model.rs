use anyhow::{anyhow, Result};
use ndarray::Array5;
use ort::inputs;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::{Path, PathBuf};

/// Narrow inference interface: one batched video in, one logits vector out.
/// The real adapter wraps an ONNX Runtime session; tests use deterministic
/// stubs.
pub trait InferenceModel {
    /// Runs inference on a (1, F, H, W, 3) batch and returns the raw,
    /// unnormalized output scores, one per label.
    fn infer(&mut self, batch: &Array5<f32>) -> Result<Vec<f32>>;

    /// Output width of the model, when it is statically known.
    fn output_len(&self) -> Option<usize>;
}

pub struct OnnxModel {
    session: Session,
    input_name: String,
}

impl OnnxModel {
    pub fn load(model_path: &Path) -> Result<Self> {
        log::info!("Loading model from {}", model_path.display());
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(model_path)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| anyhow!("Model has no inputs"))?;

        Ok(Self {
            session,
            input_name,
        })
    }
}

impl InferenceModel for OnnxModel {
    fn infer(&mut self, batch: &Array5<f32>) -> Result<Vec<f32>> {
        let shape: Vec<usize> = batch.shape().to_vec();
        let (data, _offset) = batch.clone().into_raw_vec_and_offset();
        let input_tensor = Tensor::from_array((
            [shape[0], shape[1], shape[2], shape[3], shape[4]],
            data,
        ))?;

        let input_name = self.input_name.clone();
        let outputs = self.session.run(inputs![input_name.as_str() => input_tensor])?;

        let (_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
        Ok(logits.to_vec())
    }

    fn output_len(&self) -> Option<usize> {
        let output = self.session.outputs.first()?;
        let dims = output.output_type.tensor_shape()?;
        match dims.last() {
            // Dynamic dimensions are reported as negative
            Some(&last) if last > 0 => Some(last as usize),
            _ => None,
        }
    }
}

/// Returns the local path of the model, downloading it first if the cache
/// is empty. The download is blocking, unauthenticated and unretried.
pub fn ensure_model(url: &str, cache_path: &Path) -> Result<PathBuf> {
    if cache_path.exists() {
        log::info!("Using cached model at {}", cache_path.display());
        return Ok(cache_path.to_path_buf());
    }

    log::info!("Downloading model from {} (this may take a while)", url);
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;

    if let Some(parent) = cache_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(cache_path, &bytes)?;
    log::info!("Cached model at {} ({} bytes)", cache_path.display(), bytes.len());

    Ok(cache_path.to_path_buf())
}
