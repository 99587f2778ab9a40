use std::{str::FromStr, sync::OnceLock, time::Duration};

use reqwest::{
    Client, ClientBuilder,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tracing::debug;

use crate::{
    errors::WebClientError,
    request::{HttpMethod, Request, WebResponse},
};

const REQUEST_TIMEOUT_SECONDS: u64 = 30;

const USER_AGENT: &str = "catalog-seeder/1.0";

static REQWEST_CLIENT: OnceLock<Client> = OnceLock::new();

/// Shared HTTP substrate for the catalog client and the admin gateway.
///
/// Deliberately carries no retry middleware: the seeding process has no
/// automatic retry anywhere, rate limiting happens at the orchestration
/// layer instead.
#[derive(Copy, Clone)]
pub struct WebClient {}

impl Default for WebClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WebClient {
    pub fn new() -> Self {
        Self {}
    }

    fn create_client() -> &'static Client {
        REQWEST_CLIENT.get_or_init(|| {
            ClientBuilder::new()
                .gzip(true)
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
                .user_agent(USER_AGENT)
                .build()
                .expect("Valid base reqwest to be built")
        })
    }

    pub async fn make_web_request(&self, request: Request) -> Result<WebResponse, WebClientError> {
        let client = Self::create_client();

        let mut request_builder = match request.method {
            HttpMethod::GET => client.get(request.url.clone()),
            HttpMethod::POST => client.post(request.url.clone()),
        };

        if let Some(json) = request.json {
            request_builder = request_builder.json(&json);
        }

        if let Some(headers) = request.headers {
            let mut header_map = HeaderMap::new();

            for (key, value) in headers.iter() {
                header_map.append(HeaderName::from_str(key)?, HeaderValue::from_str(value)?);
            }

            request_builder = request_builder.headers(header_map);
        }

        debug!("Sending request to {}", request.url);

        let response = request_builder.send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(WebResponse { status, body })
    }
}
