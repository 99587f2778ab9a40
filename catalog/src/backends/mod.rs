use async_trait::async_trait;
use common::product::{Product, ProductPage};
use webclient::request::Request;

use crate::errors::CatalogError;

mod commerce;
mod live_search;

pub use commerce::CommerceBackend;
pub use live_search::LiveSearchBackend;

/// One of the two commerce GraphQL services the seeder can read from.
///
/// Both produce the same `ProductPage` shape, so the orchestration
/// layer never learns which one is active.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn build_page_request(
        &self,
        page_size: u32,
        current_page: u32,
    ) -> Result<Request, CatalogError>;

    fn parse_page_response(&self, response: &str) -> Result<ProductPage, CatalogError>;

    async fn build_sku_request(&self, sku: &str) -> Result<Request, CatalogError>;

    fn parse_sku_response(&self, response: &str, sku: &str) -> Result<Product, CatalogError>;
}
