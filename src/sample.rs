use serde::{Deserialize, Serialize};

use crate::network::Architecture;

/// One labelled training example as submitted by the drawing client.
///
/// The wire names follow the client payload: the pixel vector travels as
/// `y0`. The label is kept signed so that out-of-range values can be
/// filtered instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "y0")]
    pub pixels: Vec<f64>,
    pub label: i64,
}

impl Sample {
    pub fn new(pixels: Vec<f64>, label: i64) -> Sample {
        Sample { pixels, label }
    }

    /// The label as a class index, if it names one of the architecture's
    /// output classes and the pixel vector has the expected length.
    pub fn class_for(&self, arch: &Architecture) -> Option<usize> {
        if self.pixels.len() != arch.input_size {
            return None;
        }
        usize::try_from(self.label).ok().filter(|&c| c < arch.output_size)
    }
}
