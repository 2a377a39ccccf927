//! Authentic-versus-manipulated classification of still images with a
//! frozen binary classifier.
//!
//! ```no_run
//! use forgery_detector::{DetectorConfig, ForgeryDetector};
//!
//! # fn main() -> forgery_detector::error::Result<()> {
//! let detector = ForgeryDetector::load(DetectorConfig::default())?;
//! let result = detector.classify_path("photo.jpg")?;
//! println!("{:?} ({}%)", result.verdict(), result.confidence_percent());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::{
    classifier::ClassifierRunner,
    error::Result,
    model::{LogitModel, OnnxModel},
    preprocess::{PreprocessConfig, Preprocessor},
};

pub mod classifier;
pub mod error;
pub mod model;
pub mod preprocess;
pub mod report;
pub mod verdict;

pub use verdict::{ConfidenceBand, InferenceResult, Verdict};

/// Where the frozen classifier is read from unless configured otherwise.
pub const DEFAULT_MODEL_PATH: &str = "model.onnx";

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub model_path: PathBuf,
    pub intra_threads: usize,
    pub preprocess: PreprocessConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            intra_threads: 1,
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl DetectorConfig {
    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = threads;
        self
    }

    pub fn with_preprocess(mut self, preprocess: PreprocessConfig) -> Self {
        self.preprocess = preprocess;
        self
    }
}

/// Preprocessor and classifier bundled behind a blocking API.
///
/// Built once at startup and shared by reference; all methods take `&self`.
pub struct ForgeryDetector<M = OnnxModel> {
    preprocessor: Preprocessor,
    runner: ClassifierRunner<M>,
}

impl ForgeryDetector<OnnxModel> {
    /// Loads the ONNX model named by `config`. A failure here leaves nothing
    /// to classify with and should end the process.
    pub fn load(config: DetectorConfig) -> Result<Self> {
        let model = OnnxModel::load(&config.model_path, config.intra_threads)?;
        Self::with_model(model, config.preprocess)
    }
}

impl<M: LogitModel> ForgeryDetector<M> {
    pub fn with_model(model: M, preprocess: PreprocessConfig) -> Result<Self> {
        Ok(Self {
            preprocessor: Preprocessor::with_config(preprocess)?,
            runner: ClassifierRunner::new(model),
        })
    }

    pub fn classify_path<P: AsRef<Path>>(&self, path: P) -> Result<InferenceResult> {
        let tensor = self.preprocessor.load(path)?;
        self.runner.run(&tensor)
    }

    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<InferenceResult> {
        let tensor = self.preprocessor.load_from_memory(bytes)?;
        self.runner.run(&tensor)
    }

    pub fn classify_image(&self, image: &DynamicImage) -> Result<InferenceResult> {
        let tensor = self.preprocessor.process(image);
        self.runner.run(&tensor)
    }

    pub fn model(&self) -> &M {
        self.runner.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::imageops::FilterType;

    #[test]
    fn test_config_builders() {
        let preprocess = PreprocessConfig {
            filter: FilterType::CatmullRom,
            ..PreprocessConfig::default()
        };
        let config = DetectorConfig::default()
            .with_model_path("weights/forgery.onnx")
            .with_intra_threads(4)
            .with_preprocess(preprocess);

        assert_eq!(config.model_path, PathBuf::from("weights/forgery.onnx"));
        assert_eq!(config.intra_threads, 4);
        assert_eq!(config.preprocess.filter, FilterType::CatmullRom);
        assert_eq!(config.preprocess.size, crate::preprocess::INPUT_SIZE);
    }

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();

        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.intra_threads, 1);
        assert_eq!(config.preprocess.filter, FilterType::Triangle);
    }
}
