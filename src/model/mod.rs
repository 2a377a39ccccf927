pub mod onnx;

use std::sync::Arc;

use crate::{error::Result, preprocess::NormalizedTensor};

pub use onnx::OnnxModel;

/// A frozen binary classifier producing one logit per image.
///
/// Implementations must not mutate their parameters when called, so a
/// single instance can serve concurrent callers.
pub trait LogitModel: Send + Sync {
    fn logit(&self, input: &NormalizedTensor) -> Result<f32>;

    fn name(&self) -> &str;
}

impl<M: LogitModel + ?Sized> LogitModel for Arc<M> {
    fn logit(&self, input: &NormalizedTensor) -> Result<f32> {
        (**self).logit(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: LogitModel + ?Sized> LogitModel for Box<M> {
    fn logit(&self, input: &NormalizedTensor) -> Result<f32> {
        (**self).logit(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
