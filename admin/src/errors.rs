use std::time::Duration;

use thiserror::Error;
use webclient::errors::WebClientError;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Failed to reach admin API")]
    Web(#[from] WebClientError),
    #[error("Admin API answered with status {0}")]
    Status(u16),
    #[error("Failed to parse admin response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Bulk {api} job failed: {source}")]
    BulkJob {
        api: String,
        #[source]
        source: Box<AdminError>,
    },
    #[error("Job {job_kind}/{job_name} did not stop within {}s", timeout.as_secs())]
    JobTimeout {
        job_kind: String,
        job_name: String,
        timeout: Duration,
    },
}

impl AdminError {
    pub(crate) fn into_bulk(self, api: impl ToString) -> Self {
        Self::BulkJob {
            api: api.to_string(),
            source: Box::new(self),
        }
    }
}
