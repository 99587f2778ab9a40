use admin::errors::AdminError;
use catalog::errors::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Catalog fetch failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Admin API call failed: {0}")]
    Admin(#[from] AdminError),
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}
