use common::product::{Product, ProductPage};
use serde_json::Value;
use tracing::debug;
use webclient::{client::WebClient, request::Request};

use crate::{backends::CatalogBackend, errors::CatalogError};

/// Paginated reader over whichever catalog backend is active.
pub struct CatalogClient {
    backend: Box<dyn CatalogBackend>,
    web: WebClient,
}

impl CatalogClient {
    pub fn new(backend: Box<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            web: WebClient::new(),
        }
    }

    /// Fetches one page of the catalog.
    ///
    /// Fails on non-2xx answers, on a 200 body carrying a GraphQL
    /// `errors` array, and on bodies that are not JSON at all.
    pub async fn fetch_product_page(
        &self,
        page_size: u32,
        current_page: u32,
    ) -> Result<ProductPage, CatalogError> {
        let request = self.backend.build_page_request(page_size, current_page).await?;
        let body = self.execute(request).await?;

        self.backend.parse_page_response(&body)
    }

    /// Looks a single product up by sku, used to validate existence
    /// before seeding it.
    pub async fn fetch_product_by_sku(&self, sku: &str) -> Result<Product, CatalogError> {
        let request = self.backend.build_sku_request(sku).await?;
        let body = self.execute(request).await?;

        self.backend.parse_sku_response(&body, sku)
    }

    /// Walks every page in order and accumulates all products. Page
    /// N+1 is only requested once page N's cursor state is known.
    pub async fn fetch_all_products(&self, page_size: u32) -> Result<Vec<Product>, CatalogError> {
        let mut products = Vec::new();
        let mut current_page = 1;

        loop {
            let page = self.fetch_product_page(page_size, current_page).await?;

            debug!(
                "Fetched page {}/{} ({} items)",
                page.page_info.current_page,
                page.page_info.total_pages,
                page.items.len()
            );

            products.extend(page.items);

            if !page.page_info.has_next_page() {
                break;
            }

            current_page = page.page_info.current_page + 1;
        }

        Ok(products)
    }

    async fn execute(&self, request: Request) -> Result<String, CatalogError> {
        let response = self.web.make_web_request(request).await?;

        if !response.is_success() {
            return Err(CatalogError::BadStatus(response.status));
        }

        // a 200 answer can still be a failure in GraphQL terms
        let value: Value = serde_json::from_str(&response.body)?;
        if let Some(errors) = value.get("errors") {
            return Err(CatalogError::GraphQl(errors.to_string()));
        }

        Ok(response.body)
    }
}
