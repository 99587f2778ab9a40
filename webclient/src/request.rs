use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
}

/// Response surface exposed to callers. The status is carried as data,
/// not converted into an error: the catalog client and the admin
/// gateway each apply their own policy to non-2xx answers.
#[derive(Debug)]
pub struct WebResponse {
    pub status: u16,
    pub body: String,
}

impl WebResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug)]
pub struct Request {
    pub(crate) method: HttpMethod,
    pub(crate) url: String,
    pub(crate) json: Option<Value>,
    pub(crate) headers: Option<Vec<(String, String)>>,
}

pub struct RequestBuilder {
    request: Request,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn default() -> Self {
        Request {
            method: HttpMethod::GET,
            url: Default::default(),
            json: None,
            headers: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            request: Request::default(),
        }
    }

    pub fn set_method(mut self, method: HttpMethod) -> Self {
        self.request.method = method;

        self
    }

    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.request.url = url.into();

        self
    }

    pub fn set_json_body(mut self, json: Value) -> Self {
        self.request.json = Some(json);

        self
    }

    pub fn set_headers(mut self, headers: &[(String, String)]) -> Self {
        self.request.headers = Some(headers.to_vec());

        self
    }

    pub fn add_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .headers
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));

        self
    }

    pub fn build(self) -> Request {
        self.request
    }
}
