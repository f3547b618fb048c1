//! Transport-independent request handling for the OCR endpoint.
//!
//! The HTTP server only moves bytes; parsing, dispatch onto the shared
//! network, and the error → status mapping live here.

pub mod handler;
pub mod payload;

pub use handler::{status_for, OcrService, Reply};
pub use payload::{OcrRequest, RequestError};
