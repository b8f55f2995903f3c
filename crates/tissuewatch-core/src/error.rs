// ── Core error types ──
//
// The view pipeline itself cannot fail; these cover the edges around it:
// decoding snapshot text and looking up a single device.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot decode {source_name} snapshot: {message}")]
    Decode {
        source_name: String,
        message: String,
    },

    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },
}
