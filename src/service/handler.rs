use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::error::EngineError;
use crate::network::{Network, WeightFile};
use crate::sample::Sample;
use crate::service::payload::{OcrRequest, RequestError};
use crate::train::TrainReport;

/// Status code and JSON body produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    fn ok(body: Value) -> Reply {
        Reply { status: 200, body }
    }

    fn error(status: u16, message: impl std::fmt::Display) -> Reply {
        Reply { status, body: json!({ "ok": false, "error": message.to_string() }) }
    }

    pub fn from_request_error(err: &RequestError) -> Reply {
        let status = match err {
            RequestError::BodyTooLarge { .. } => 413,
            RequestError::Io(_) => 500,
            _ => 400,
        };
        warn!(status, error = %err, "rejected request");
        Reply::error(status, err)
    }

    pub fn from_engine_error(err: &EngineError) -> Reply {
        let status = status_for(err);
        if status >= 500 {
            error!(status, error = %err, "request failed");
        } else {
            warn!(status, error = %err, "rejected request");
        }
        Reply::error(status, err)
    }
}

/// HTTP status for an engine failure: 400 for bad client input, 500 otherwise.
pub fn status_for(err: &EngineError) -> u16 {
    if err.is_client_error() { 400 } else { 500 }
}

/// Owns the process-wide network and the path its weights persist to.
///
/// Every operation takes the network lock for its whole duration, so a
/// training call and its save never interleave with another request.
pub struct OcrService {
    network: Mutex<Network>,
    weights_path: PathBuf,
}

impl OcrService {
    pub fn new(network: Network, weights_path: impl Into<PathBuf>) -> OcrService {
        OcrService { network: Mutex::new(network), weights_path: weights_path.into() }
    }

    pub fn weights_path(&self) -> &Path {
        &self.weights_path
    }

    fn lock(&self) -> MutexGuard<'_, Network> {
        // Parameters are only ever replaced whole, so a poisoned guard still
        // holds a consistent network.
        self.network.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn predict(&self, image: &[f64]) -> Result<usize, EngineError> {
        self.lock().predict(image)
    }

    /// Trains on `samples` and persists the result if anything changed.
    pub fn train_and_save(&self, samples: &[Sample]) -> Result<TrainReport, EngineError> {
        let mut network = self.lock();
        let report = network.train(samples);
        if !report.is_noop() {
            network.save(&self.weights_path)?;
        }
        Ok(report)
    }

    /// Current parameters, for inspection.
    pub fn snapshot(&self) -> WeightFile {
        self.lock().snapshot()
    }

    /// Parses `body`, runs it against the network and builds the reply.
    pub fn handle(&self, body: impl AsRef<[u8]>) -> Reply {
        match OcrRequest::parse(body) {
            Ok(request) => self.dispatch(request),
            Err(e) => Reply::from_request_error(&e),
        }
    }

    pub fn dispatch(&self, request: OcrRequest) -> Reply {
        match request {
            OcrRequest::Predict(image) => match self.predict(&image) {
                Ok(class) => {
                    debug!(class, "prediction");
                    Reply::ok(json!({ "type": "test", "result": class }))
                }
                Err(e) => Reply::from_engine_error(&e),
            },
            OcrRequest::Train { samples, undecodable } => match self.train_and_save(&samples) {
                Ok(mut report) => {
                    report.samples_skipped += undecodable;
                    info!(
                        used = report.samples_used,
                        skipped = report.samples_skipped,
                        rejected_batches = report.batches_rejected,
                        "training request done"
                    );
                    Reply::ok(json!({
                        "type": "train",
                        "trained": report.samples_used,
                        "skipped": report.samples_skipped,
                    }))
                }
                Err(e) => Reply::from_engine_error(&e),
            },
        }
    }
}
