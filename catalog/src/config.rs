use std::env;

/// Connection settings for the commerce GraphQL endpoints, read from
/// the environment once at startup.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub api_key: String,
    pub environment_id: String,
    pub website_code: String,
    pub store_code: String,
    pub store_view_code: String,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: require("CATALOG_ENDPOINT"),
            api_key: require("CATALOG_API_KEY"),
            environment_id: require("MAGENTO_ENVIRONMENT_ID"),
            website_code: require("MAGENTO_WEBSITE_CODE"),
            store_code: require("MAGENTO_STORE_CODE"),
            store_view_code: require("MAGENTO_STORE_VIEW_CODE"),
        }
    }

    /// Headers every catalog request must carry.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("x-api-key".into(), self.api_key.clone()),
            ("Magento-Environment-Id".into(), self.environment_id.clone()),
            ("Magento-Website-Code".into(), self.website_code.clone()),
            ("Magento-Store-Code".into(), self.store_code.clone()),
            (
                "Magento-Store-View-Code".into(),
                self.store_view_code.clone(),
            ),
        ]
    }
}

fn require(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("Environment variable {name} must be set"))
}
