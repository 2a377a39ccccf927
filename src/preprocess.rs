use std::path::Path;

use image::{DynamicImage, RgbImage, imageops::FilterType};
use ndarray::Array4;

use crate::error::{DetectorError, Result};

/// Side length of the square model input.
pub const INPUT_SIZE: u32 = 256;

pub const INPUT_CHANNELS: usize = 3;

/// Shape of a single-image batch, channel first.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_CHANNELS, INPUT_SIZE as usize, INPUT_SIZE as usize];

/// Model input of shape `(1, 3, 256, 256)` with every value in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor {
    data: Array4<f32>,
}

impl NormalizedTensor {
    /// Wraps an existing array, rejecting anything that is not a single
    /// `(1, 3, 256, 256)` batch.
    pub fn from_array(data: Array4<f32>) -> Result<Self> {
        if data.shape() != INPUT_SHAPE {
            return Err(DetectorError::ShapeMismatch {
                expected: format!("{:?}", INPUT_SHAPE),
                actual: format!("{:?}", data.shape()),
            });
        }

        Ok(Self { data })
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn into_array(self) -> Array4<f32> {
        self.data
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PreprocessConfig {
    /// Output side length; the frozen model only accepts `INPUT_SIZE`.
    pub size: u32,
    pub filter: FilterType,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            size: INPUT_SIZE,
            filter: FilterType::Triangle,
        }
    }
}

pub struct Preprocessor {
    filter: FilterType,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            filter: PreprocessConfig::default().filter,
        }
    }

    pub fn with_config(config: PreprocessConfig) -> Result<Self> {
        if config.size != INPUT_SIZE {
            return Err(DetectorError::InvalidParameter(format!(
                "input size must be {INPUT_SIZE}, got {}",
                config.size
            )));
        }

        // Nearest-neighbour skews pixel statistics away from what the model saw in training.
        if config.filter == FilterType::Nearest {
            return Err(DetectorError::InvalidParameter(
                "nearest-neighbour resampling is not supported".into(),
            ));
        }

        Ok(Self {
            filter: config.filter,
        })
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<NormalizedTensor> {
        let image = image::open(path)?;
        Ok(self.process(&image))
    }

    pub fn load_from_memory(&self, bytes: &[u8]) -> Result<NormalizedTensor> {
        let image = image::load_from_memory(bytes)?;
        Ok(self.process(&image))
    }

    pub fn process(&self, image: &DynamicImage) -> NormalizedTensor {
        // to_rgb8 drops alpha without compositing and replicates luma across channels.
        let rgb = image.to_rgb8();
        let resized = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, self.filter);

        NormalizedTensor {
            data: rgb_to_tensor(&resized),
        }
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_to_tensor(image: &RgbImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let mut tensor = Array4::<f32>::zeros((1, INPUT_CHANNELS, height as usize, width as usize));

    for (x, y, pixel) in image.enumerate_pixels() {
        for c in 0..INPUT_CHANNELS {
            tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
        }
    }

    tensor
}
