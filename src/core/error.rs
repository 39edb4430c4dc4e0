//! Failures the diagnostic core reports to its caller.
//!
//! An empty point set or a spectrum without energy is not a failure;
//! both have well defined (all zero) results.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewpointsError {
    /// The native sequence library (or its mandatory `genpoints`
    /// symbol) could not be loaded.
    #[error("sequence provider {library:?} unavailable: {reason}")]
    ProviderUnavailable { library: String, reason: String },
    /// The request can not be served: negative count, unknown family,
    /// unsupported dimension.
    #[error("invalid sequence request: {0}")]
    InvalidRequest(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl ViewpointsError {
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(self, ViewpointsError::ProviderUnavailable { .. })
    }
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, ViewpointsError::InvalidRequest(_))
    }
}
