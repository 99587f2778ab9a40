use std::{path::Path, sync::Arc};

use admin::gateway::AdminGateway;
use async_trait::async_trait;
use catalog::client::CatalogClient;
use common::{
    product::Product,
    publish::{Api, BulkJob, JobResource, PublishResult},
    site_config::{SiteConfig, StoreContext},
};
use serde::Serialize;
use tracing::info;

use crate::{errors::SeedError, output::write_timestamped_json};

mod bulk;
mod per_product;

pub use bulk::BulkSeeder;
pub use per_product::PerProductSeeder;

pub(crate) const PAGE_SIZE: u32 = 50;

/// A product the run could not seed, with enough context to say why.
#[derive(Serialize, Debug, Clone)]
pub struct SeedFailure {
    pub sku: String,
    pub stage: String,
    pub message: String,
}

/// Outcome of one bulk stage, successes and failures kept apart.
#[derive(Serialize, Debug, Clone)]
pub struct BulkStageOutcome {
    pub api: String,
    pub job_name: String,
    pub succeeded: Vec<JobResource>,
    pub failed: Vec<JobResource>,
}

impl BulkStageOutcome {
    pub fn from_job(api: Api, job: &BulkJob) -> Self {
        let (succeeded, failed) = job
            .resources
            .iter()
            .cloned()
            .partition(|resource| resource.status == 200);

        Self {
            api: api.to_string(),
            job_name: job.name.clone(),
            succeeded,
            failed,
        }
    }
}

/// Everything a seeding run produced, written to the output files at
/// the end of the run.
#[derive(Serialize, Debug, Default)]
pub struct SeedReport {
    pub publishes: Vec<PublishResult>,
    pub stages: Vec<BulkStageOutcome>,
    pub failures: Vec<SeedFailure>,
}

/// One of the two seeding policies. Selected at the orchestration
/// boundary; the policies share no control flow.
#[async_trait]
pub trait SeedStrategy {
    async fn seed(
        &self,
        catalog: Arc<CatalogClient>,
        admin: Arc<AdminGateway>,
        site: Arc<SiteConfig>,
        store: StoreContext,
    ) -> Result<SeedReport, SeedError>;
}

/// List mode: walk the whole catalog and dump it to a file. No admin
/// calls are made.
pub async fn run_list(catalog: &CatalogClient, out_dir: &Path) -> Result<Vec<Product>, SeedError> {
    let products = catalog.fetch_all_products(PAGE_SIZE).await?;

    info!("Listed {} products", products.len());

    write_timestamped_json(out_dir, "products", &products)?;

    Ok(products)
}
