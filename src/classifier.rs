use log::{debug, error};

use crate::{
    error::{DetectorError, Result},
    model::LogitModel,
    preprocess::{INPUT_SHAPE, NormalizedTensor},
    verdict::InferenceResult,
};

/// Runs a loaded model and turns its logit into a verdict.
///
/// A runner only exists once its model has loaded, so every call sees a
/// ready model.
pub struct ClassifierRunner<M> {
    model: M,
}

impl<M: LogitModel> ClassifierRunner<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn run(&self, input: &NormalizedTensor) -> Result<InferenceResult> {
        if input.shape() != INPUT_SHAPE {
            error!(
                "Rejecting tensor of shape {:?}, model expects {:?}",
                input.shape(),
                INPUT_SHAPE
            );
            return Err(DetectorError::ShapeMismatch {
                expected: format!("{:?}", INPUT_SHAPE),
                actual: format!("{:?}", input.shape()),
            });
        }

        let logit = self.model.logit(input)?;
        let result = InferenceResult::from_logit(logit as f64).map_err(|e| {
            DetectorError::Inference(format!("model {}: {e}", self.model.name()))
        })?;

        debug!(
            "{}: logit {:.4} -> p(authentic) {:.4}, {:?} ({:?})",
            self.model.name(),
            logit,
            result.raw_probability(),
            result.verdict(),
            result.confidence_band()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::{ConfidenceBand, Verdict};
    use ndarray::Array4;

    struct FixedLogit(f32);

    impl LogitModel for FixedLogit {
        fn logit(&self, _input: &NormalizedTensor) -> Result<f32> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct Failing;

    impl LogitModel for Failing {
        fn logit(&self, _input: &NormalizedTensor) -> Result<f32> {
            Err(DetectorError::Inference("out of memory".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn blank() -> NormalizedTensor {
        NormalizedTensor::from_array(Array4::zeros(INPUT_SHAPE)).unwrap()
    }

    #[test]
    fn test_positive_logit_is_authentic() {
        let runner = ClassifierRunner::new(FixedLogit(3.0));
        let result = runner.run(&blank()).unwrap();

        assert_eq!(result.verdict(), Verdict::Authentic);
        assert_eq!(result.confidence_band(), ConfidenceBand::High);
        assert_eq!(result.confidence_percent(), 95);
    }

    #[test]
    fn test_zero_logit_sits_on_authentic_side() {
        let result = ClassifierRunner::new(FixedLogit(0.0)).run(&blank()).unwrap();

        assert_eq!(result.verdict(), Verdict::Authentic);
        assert_eq!(result.confidence_band(), ConfidenceBand::Moderate);
        assert_eq!(result.confidence_percent(), 50);
    }

    #[test]
    fn test_negative_logit_is_manipulated() {
        let result = ClassifierRunner::new(FixedLogit(-1.0)).run(&blank()).unwrap();

        assert_eq!(result.verdict(), Verdict::Manipulated);
        assert_eq!(result.confidence_band(), ConfidenceBand::Moderate);
        assert_eq!(result.confidence_percent(), 73);
    }

    #[test]
    fn test_non_finite_logit_is_an_error() {
        for logit in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let result = ClassifierRunner::new(FixedLogit(logit)).run(&blank());
            assert!(matches!(result, Err(DetectorError::Inference(_))));
        }
    }

    #[test]
    fn test_model_failure_propagates() {
        let result = ClassifierRunner::new(Failing).run(&blank());
        assert!(matches!(result, Err(DetectorError::Inference(_))));
    }
}
