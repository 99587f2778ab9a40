use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Admin API surface a call is addressed to. Renders as the first URL
/// path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Api {
    Preview,
    Live,
    Job,
}

impl Api {
    /// Job-kind segment used by the status endpoint. The `live` trigger
    /// endpoint reports its jobs under `publish`, an asymmetry in the
    /// admin API naming that has to be preserved.
    pub fn job_kind(&self) -> &'static str {
        match self {
            Api::Live => "publish",
            _ => "preview",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Running,
    Stopped,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct JobResource {
    pub path: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An asynchronous server-side bulk operation, created via POST and
/// polled until `stopped`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BulkJob {
    pub name: String,
    pub state: JobState,
    #[serde(default)]
    pub resources: Vec<JobResource>,
}

impl BulkJob {
    pub fn is_stopped(&self) -> bool {
        self.state == JobState::Stopped
    }

    /// Paths of the resources the job completed with HTTP 200.
    pub fn successful_paths(&self) -> Vec<String> {
        self.resources
            .iter()
            .filter(|resource| resource.status == 200)
            .map(|resource| resource.path.clone())
            .collect()
    }
}

/// Outcome of a single preview or live call against one path.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OperationOutcome {
    pub status: u16,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-path record of the preview call and, when publishing, the live
/// call that followed it.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PathReport {
    pub path: String,
    pub preview: OperationOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<OperationOutcome>,
}

/// Everything that happened while previewing/publishing one product.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PublishResult {
    pub sku: String,
    pub paths: Vec<PathReport>,
}
