use std::path::{Path, PathBuf};

use log::info;
use ort::{
    execution_providers::CPUExecutionProvider,
    session::Session,
    value::Tensor,
};
use parking_lot::Mutex;

use crate::{
    error::{DetectorError, Result},
    model::LogitModel,
    preprocess::NormalizedTensor,
};

/// ONNX Runtime session over the frozen classifier, pinned to the CPU.
pub struct OnnxModel {
    // Session::run needs &mut, so only the forward pass is serialized.
    session: Mutex<Session>,
    path: PathBuf,
    name: String,
}

impl OnnxModel {
    pub fn load<P: AsRef<Path>>(path: P, intra_threads: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let load_error = |reason: String| DetectorError::ModelLoad {
            path: path.clone(),
            reason,
        };

        if !path.is_file() {
            return Err(load_error("model file not found".into()));
        }
        if intra_threads == 0 {
            return Err(DetectorError::InvalidParameter(
                "intra_threads must be at least 1".into(),
            ));
        }

        info!("Loading model from {} on CPU", path.display());

        let session = Session::builder()
            .map_err(|e| load_error(format!("failed to create session builder: {e}")))?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(|e| load_error(format!("failed to select CPU provider: {e}")))?
            .with_intra_threads(intra_threads)
            .map_err(|e| load_error(format!("failed to configure threads: {e}")))?
            .commit_from_file(&path)
            .map_err(|e| load_error(e.to_string()))?;

        if session.inputs.len() != 1 || session.outputs.is_empty() {
            return Err(load_error(format!(
                "expected a single input and at least one output, found {} inputs and {} outputs",
                session.inputs.len(),
                session.outputs.len()
            )));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "onnx".into());

        info!("Model {} ready", name);

        Ok(Self {
            session: Mutex::new(session),
            path,
            name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogitModel for OnnxModel {
    fn logit(&self, input: &NormalizedTensor) -> Result<f32> {
        let shape: [usize; 4] = [
            input.shape()[0],
            input.shape()[1],
            input.shape()[2],
            input.shape()[3],
        ];
        let data: Vec<f32> = input.as_array().iter().copied().collect();

        let value = Tensor::from_array((shape, data))
            .map_err(|e| DetectorError::Inference(format!("failed to build input tensor: {e}")))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![value])
            .map_err(|e| DetectorError::Inference(e.to_string()))?;

        let output = outputs
            .values()
            .next()
            .ok_or_else(|| DetectorError::Inference("model produced no output".into()))?;

        let (dims, logits) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| DetectorError::Inference(format!("unexpected output type: {e}")))?;

        match logits {
            [logit] => Ok(*logit),
            _ => Err(DetectorError::ShapeMismatch {
                expected: "a single logit".into(),
                actual: format!("output of shape {:?}", dims),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
