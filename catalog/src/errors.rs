use thiserror::Error;
use webclient::errors::WebClientError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to reach catalog endpoint")]
    Network(#[from] WebClientError),
    #[error("Catalog endpoint answered with status {0}")]
    BadStatus(u16),
    #[error("Catalog response carried errors: {0}")]
    GraphQl(String),
    #[error("Failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No product found for sku {0}")]
    NotFound(String),
}
