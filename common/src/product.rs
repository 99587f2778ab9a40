use serde::{Deserialize, Serialize};

/// A single catalog entry. Identity is the sku; everything else is
/// display data carried along for the output files.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub sku: String,
    pub name: String,
    #[serde(rename = "urlKey")]
    pub url_key: String,
}

/// Pagination cursor state, recomputed from every catalog response.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl PageInfo {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of catalog results, the common output shape of every
/// catalog backend.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page_info: PageInfo,
}
