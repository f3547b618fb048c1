use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{EngineError, Result};
use crate::layers::Layer;
use crate::math::Matrix;
use crate::network::Architecture;

/// On-disk form of the four parameter tensors, as nested JSON arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightFile {
    pub w1: Vec<Vec<f64>>,
    pub b1: Vec<f64>,
    pub w2: Vec<Vec<f64>>,
    pub b2: Vec<f64>,
}

impl WeightFile {
    pub fn from_layers(hidden: &Layer, output: &Layer) -> WeightFile {
        WeightFile {
            w1: hidden.weights.data.clone(),
            b1: hidden.biases.clone(),
            w2: output.weights.data.clone(),
            b2: output.biases.clone(),
        }
    }

    /// Converts back into `(hidden, output)` layers, failing with
    /// `EngineError::Configuration` unless every tensor matches `arch`.
    pub fn into_layers(self, arch: &Architecture) -> Result<(Layer, Layer)> {
        check_matrix("w1", &self.w1, arch.hidden_size, arch.input_size)?;
        check_vector("b1", &self.b1, arch.hidden_size)?;
        check_matrix("w2", &self.w2, arch.output_size, arch.hidden_size)?;
        check_vector("b2", &self.b2, arch.output_size)?;

        let hidden = build_layer("w1", self.w1, self.b1)?;
        let output = build_layer("w2", self.w2, self.b2)?;
        Ok((hidden, output))
    }

    /// Reads a weight file. A missing file is `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<WeightFile>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let weights = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(weights))
    }

    /// Writes the file next to `path` and renames it into place, so a
    /// concurrent reader sees either the previous file or the new one.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, self)
                .map_err(|e| EngineError::Storage(e.into()))?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| EngineError::Storage(e.error))?;
        Ok(())
    }
}

fn check_matrix(name: &str, data: &[Vec<f64>], rows: usize, cols: usize) -> Result<()> {
    if data.len() != rows {
        return Err(EngineError::Configuration(format!(
            "{name} has {} rows, expected {rows}", data.len()
        )));
    }
    if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
        return Err(EngineError::Configuration(format!(
            "{name} row {i} has {} columns, expected {cols}", row.len()
        )));
    }
    Ok(())
}

fn check_vector(name: &str, data: &[f64], len: usize) -> Result<()> {
    if data.len() != len {
        return Err(EngineError::Configuration(format!(
            "{name} has {} entries, expected {len}", data.len()
        )));
    }
    Ok(())
}

fn build_layer(name: &str, weights: Vec<Vec<f64>>, biases: Vec<f64>) -> Result<Layer> {
    Matrix::from_data(weights)
        .and_then(|w| Layer::from_parts(w, biases))
        .ok_or_else(|| EngineError::Configuration(format!("{name} is empty")))
}
