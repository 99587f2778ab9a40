use async_trait::async_trait;
use common::product::{PageInfo, Product, ProductPage};
use serde::Deserialize;
use serde_json::json;
use webclient::request::{HttpMethod, Request};

use crate::{backends::CatalogBackend, config::CatalogConfig, errors::CatalogError};

const PRODUCT_SEARCH_QUERY: &str = r#"
query productSearch($phrase: String!, $pageSize: Int!, $currentPage: Int!) {
	productSearch(
		phrase: $phrase
		page_size: $pageSize
		current_page: $currentPage
	) {
		items {
			productView {
				sku
				name
				urlKey
			}
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
#[serde(rename_all = "camelCase")]
struct ApiData {
    product_search: ApiProductSearch,
}

#[derive(Deserialize, Debug)]
struct ApiProductSearch {
    items: Vec<ApiItem>,
    #[serde(default)]
    page_info: Option<PageInfo>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiItem {
    product_view: ApiProductView,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiProductView {
    sku: String,
    name: String,
    #[serde(default)]
    url_key: Option<String>,
}

impl ApiProductView {
    fn into_product(self) -> Product {
        let url_key = self.url_key.unwrap_or_default();

        Product {
            sku: self.sku,
            name: self.name,
            url_key,
        }
    }
}

/// Full-text search service backend.
pub struct LiveSearchBackend {
    config: CatalogConfig,
}

impl LiveSearchBackend {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    fn parse(response: &str) -> Result<ApiProductSearch, CatalogError> {
        let parsed: ApiResponse = serde_json::from_str(response)?;

        Ok(parsed.data.product_search)
    }
}

#[async_trait]
impl CatalogBackend for LiveSearchBackend {
    async fn build_page_request(
        &self,
        page_size: u32,
        current_page: u32,
    ) -> Result<Request, CatalogError> {
        let body = json!({
            "query": PRODUCT_SEARCH_QUERY,
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
        let search = Self::parse(response)?;

        let page_info = search.page_info.unwrap_or(PageInfo {
            current_page: 1,
            total_pages: 1,
            page_size: search.items.len() as u32,
        });

        Ok(ProductPage {
            items: search
                .items
                .into_iter()
                .map(|item| item.product_view.into_product())
                .collect(),
            page_info,
        })
    }

    async fn build_sku_request(&self, sku: &str) -> Result<Request, CatalogError> {
        let query = format!(
            r#"{{productSearch(phrase: "{sku}", page_size: 1, filter: [{{attribute: "sku", eq: "{sku}"}}]) {{items {{productView {{sku name urlKey}}}}}}}}"#
        );
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
        let search = Self::parse(response)?;

        search
            .items
            .into_iter()
            .map(|item| item.product_view.into_product())
            .find(|product| product.sku == sku)
            .ok_or_else(|| CatalogError::NotFound(sku.into()))
    }
}
