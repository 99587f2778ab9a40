use std::time::Duration;

use common::{
    paths::compute_paths,
    publish::{Api, BulkJob, OperationOutcome, PathReport, PublishResult},
    site_config::{SiteConfig, StoreContext},
};
use futures::future::join_all;
use serde_json::{Value, json};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};
use webclient::{
    client::WebClient,
    request::{HttpMethod, Request, WebResponse},
};

use crate::{
    errors::AdminError,
    urls::{AdminContext, build_url},
};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Authenticated front to the content admin API.
pub struct AdminGateway {
    ctx: AdminContext,
    web: WebClient,
}

impl AdminGateway {
    pub fn new(ctx: AdminContext) -> Self {
        Self {
            ctx,
            web: WebClient::new(),
        }
    }

    /// Sends one request to the admin API. A JSON content-type rides
    /// along with any body unless the caller overrides it; the API key
    /// is attached whenever one is configured.
    pub async fn call(
        &self,
        api: Api,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
        headers: &[(String, String)],
    ) -> Result<WebResponse, AdminError> {
        let url = build_url(&self.ctx, api, path, &[]);

        let mut builder = Request::builder().set_method(method).set_url(&url);

        if let Some(key) = &self.ctx.api_key {
            builder = builder.add_header("authorization", format!("token {key}"));
        }

        for (key, value) in headers {
            builder = builder.add_header(key.as_str(), value.as_str());
        }

        if let Some(body) = body {
            builder = builder.set_json_body(body);
        }

        Ok(self.web.make_web_request(builder.build()).await?)
    }

    /// Triggers a bulk preview/publish over many paths and polls the
    /// resulting job to completion.
    pub async fn create_bulk_job(
        &self,
        api: Api,
        paths: &[String],
    ) -> Result<BulkJob, AdminError> {
        info!("Submitting bulk {api} job for {} paths", paths.len());

        let body = json!({ "forceUpdate": true, "paths": paths });

        let response = self
            .call(api, "/*", HttpMethod::POST, Some(body), &[])
            .await
            .map_err(|err| err.into_bulk(api))?;

        if !response.is_success() {
            return Err(AdminError::Status(response.status).into_bulk(api));
        }

        let job: BulkJob = serde_json::from_str(&response.body)
            .map_err(|err| AdminError::Parse(err).into_bulk(api))?;

        self.poll_job(api.job_kind(), &job.name)
            .await
            .map_err(|err| err.into_bulk(api))
    }

    /// Polls the job status endpoint once per second until the job
    /// reports `stopped`, or until the configured deadline passes.
    pub async fn poll_job(&self, job_kind: &str, job_name: &str) -> Result<BulkJob, AdminError> {
        let details_path = format!("/{job_kind}/{job_name}/details");
        let started = Instant::now();

        loop {
            let response = self
                .call(Api::Job, &details_path, HttpMethod::GET, None, &[])
                .await?;

            if !response.is_success() {
                return Err(AdminError::Status(response.status));
            }

            let job: BulkJob = serde_json::from_str(&response.body)?;

            if job.is_stopped() {
                return Ok(job);
            }

            if started.elapsed() >= self.ctx.poll_timeout {
                return Err(AdminError::JobTimeout {
                    job_kind: job_kind.into(),
                    job_name: job_name.into(),
                    timeout: self.ctx.poll_timeout,
                });
            }

            debug!("Job {job_kind}/{job_name} still {:?}", job.state);

            sleep(POLL_INTERVAL).await;
        }
    }

    /// Previews (and optionally publishes) one product across all of
    /// its resolved paths. Paths are operated on concurrently; within a
    /// path the live call follows the preview call but is issued even
    /// when the preview failed. Failures never propagate, they become
    /// outcome entries.
    pub async fn preview_publish_one(
        &self,
        site: &SiteConfig,
        store: &StoreContext,
        sku: &str,
        url_key: &str,
        publish: bool,
    ) -> PublishResult {
        let paths = compute_paths(site, store, sku, url_key);

        if paths.is_empty() {
            debug!("No matching path pattern for sku {sku}");
        }

        let reports = join_all(paths.into_iter().map(|path| async move {
            let preview = self.operate(Api::Preview, &path).await;

            let live = if publish {
                Some(self.operate(Api::Live, &path).await)
            } else {
                None
            };

            PathReport { path, preview, live }
        }))
        .await;

        PublishResult {
            sku: sku.into(),
            paths: reports,
        }
    }

    async fn operate(&self, api: Api, path: &str) -> OperationOutcome {
        let admin_url = build_url(&self.ctx, api, path, &[]);

        match self.call(api, path, HttpMethod::POST, None, &[]).await {
            Ok(response) => {
                let url = content_url(&response.body, api).unwrap_or(admin_url);

                let message = if response.is_success() {
                    None
                } else {
                    warn!("{api} of {path} answered {}", response.status);
                    Some(response.body)
                };

                OperationOutcome {
                    status: response.status,
                    url,
                    message,
                }
            }
            Err(err) => {
                warn!("{api} of {path} failed: {err}");

                OperationOutcome {
                    status: 0,
                    url: admin_url,
                    message: Some(err.to_string()),
                }
            }
        }
    }
}

/// The admin API echoes the content URL of the touched resource back
/// in its response body.
fn content_url(body: &str, api: Api) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    value
        .get(api.to_string())?
        .get("url")?
        .as_str()
        .map(String::from)
}
