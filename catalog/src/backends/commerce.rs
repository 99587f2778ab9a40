use async_trait::async_trait;
use common::product::{PageInfo, Product, ProductPage};
use serde::Deserialize;
use serde_json::json;
use webclient::request::{HttpMethod, Request};

use crate::{backends::CatalogBackend, config::CatalogConfig, errors::CatalogError};

const PRODUCTS_QUERY: &str = r#"
query products($phrase: String!, $pageSize: Int!, $currentPage: Int!) {
	products(search: $phrase, pageSize: $pageSize, currentPage: $currentPage) {
		items {
			sku
			name
			url_key
		}
		page_info {
			current_page
			page_size
			total_pages
		}
	}
}
"#;

#[derive(Deserialize, Debug)]
struct ApiResponse {
    data: ApiData,
}

#[derive(Deserialize, Debug)]
struct ApiData {
    products: ApiProducts,
}

#[derive(Deserialize, Debug)]
struct ApiProducts {
    items: Vec<ApiProduct>,
    #[serde(default)]
    page_info: Option<PageInfo>,
}

#[derive(Deserialize, Debug)]
struct ApiProduct {
    sku: String,
    name: String,
    #[serde(default)]
    url_key: Option<String>,
}

impl ApiProduct {
    fn into_product(self) -> Product {
        Product {
            sku: self.sku,
            name: self.name,
            url_key: self.url_key.unwrap_or_default(),
        }
    }
}

/// Direct catalog service backend, for environments without the
/// full-text search API.
pub struct CommerceBackend {
    config: CatalogConfig,
}

impl CommerceBackend {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    fn parse(response: &str) -> Result<ApiProducts, CatalogError> {
        let parsed: ApiResponse = serde_json::from_str(response)?;

        Ok(parsed.data.products)
    }
}

#[async_trait]
impl CatalogBackend for CommerceBackend {
    async fn build_page_request(
        &self,
        page_size: u32,
        current_page: u32,
    ) -> Result<Request, CatalogError> {
        let body = json!({
            "query": PRODUCTS_QUERY,
            "variables": {
                "phrase": "",
                "pageSize": page_size,
                "currentPage": current_page,
            },
        });

        Ok(Request::builder()
            .set_method(HttpMethod::POST)
            .set_url(&self.config.endpoint)
            .set_json_body(body)
            .set_headers(&self.config.headers())
            .build())
    }

    fn parse_page_response(&self, response: &str) -> Result<ProductPage, CatalogError> {
        let products = Self::parse(response)?;

        let page_info = products.page_info.unwrap_or(PageInfo {
            current_page: 1,
            total_pages: 1,
            page_size: products.items.len() as u32,
        });

        Ok(ProductPage {
            items: products
                .items
                .into_iter()
                .map(ApiProduct::into_product)
                .collect(),
            page_info,
        })
    }

    async fn build_sku_request(&self, sku: &str) -> Result<Request, CatalogError> {
        let query =
            format!(r#"{{products(filter: {{sku: {{eq: "{sku}"}}}}) {{items {{sku name url_key}}}}}}"#);
        let url = format!(
            "{}?query={}",
            self.config.endpoint,
            urlencoding::encode(&query)
        );

        Ok(Request::builder()
            .set_method(HttpMethod::GET)
            .set_url(url)
            .set_headers(&self.config.headers())
            .build())
    }

    fn parse_sku_response(&self, response: &str, sku: &str) -> Result<Product, CatalogError> {
        let products = Self::parse(response)?;

        products
            .items
            .into_iter()
            .map(ApiProduct::into_product)
            .find(|product| product.sku == sku)
            .ok_or_else(|| CatalogError::NotFound(sku.into()))
    }
}
