use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebClientError {
    #[error("Web client general error")]
    ClientGeneralError(#[from] reqwest::Error),
    #[error("Web client failed to create header")]
    ClientInvalidHeader,
}

impl From<InvalidHeaderName> for WebClientError {
    fn from(_err: InvalidHeaderName) -> Self {
        Self::ClientInvalidHeader
    }
}

impl From<InvalidHeaderValue> for WebClientError {
    fn from(_err: InvalidHeaderValue) -> Self {
        Self::ClientInvalidHeader
    }
}
