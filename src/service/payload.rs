use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::sample::Sample;

/// Problems with a request body, before the engine is involved.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("request body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request must set either \"train\" or \"predict\"")]
    UnknownRequest,

    #[error("predict request is missing \"image\"")]
    MissingImage,

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("could not read request body: {0}")]
    Io(#[from] std::io::Error),
}

/// The two request shapes the drawing client sends.
#[derive(Debug, Clone, PartialEq)]
pub enum OcrRequest {
    /// `{"train": true, "trainArray": [{"y0": [...], "label": d}, ...]}`
    ///
    /// Entries that do not decode as a `Sample` (string or fractional labels,
    /// labels beyond `i64`, missing fields) are counted in `undecodable`
    /// instead of failing the request.
    Train { samples: Vec<Sample>, undecodable: usize },
    /// `{"predict": true, "image": [...]}`
    Predict(Vec<f64>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(default)]
    train: bool,
    #[serde(default)]
    train_array: Vec<Value>,
    #[serde(default)]
    predict: bool,
    #[serde(default)]
    image: Option<Vec<f64>>,
}

impl OcrRequest {
    /// Parses a JSON body. `train` wins if both flags are set.
    pub fn parse(body: impl AsRef<[u8]>) -> Result<OcrRequest, RequestError> {
        let raw: RawPayload = serde_json::from_slice(body.as_ref())?;
        if raw.train {
            let total = raw.train_array.len();
            let samples: Vec<Sample> = raw.train_array.into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect();
            Ok(OcrRequest::Train { undecodable: total - samples.len(), samples })
        } else if raw.predict {
            raw.image.map(OcrRequest::Predict).ok_or(RequestError::MissingImage)
        } else {
            Err(RequestError::UnknownRequest)
        }
    }
}
