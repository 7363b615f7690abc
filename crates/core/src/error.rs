//! Errors raised by basket persistence.

use thiserror::Error;

/// Basket operation error.
///
/// Unknown product ids are not errors; operations on them are no-ops.
#[derive(Debug, Error)]
pub enum BasketError {
    /// A collection could not be serialized for storage.
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
