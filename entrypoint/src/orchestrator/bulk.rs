use std::sync::Arc;

use admin::gateway::AdminGateway;
use async_trait::async_trait;
use catalog::client::CatalogClient;
use common::{
    paths::compute_paths,
    publish::Api,
    site_config::{SiteConfig, StoreContext},
};
use tracing::{debug, info, warn};

use crate::{
    errors::SeedError,
    orchestrator::{BulkStageOutcome, PAGE_SIZE, SeedReport, SeedStrategy},
};

/// Seeds the whole catalog through two bulk jobs: one preview job over
/// every resolved path, then one live job over exactly the paths the
/// preview stage completed with HTTP 200.
pub struct BulkSeeder;

#[async_trait]
impl SeedStrategy for BulkSeeder {
    async fn seed(
        &self,
        catalog: Arc<CatalogClient>,
        admin: Arc<AdminGateway>,
        site: Arc<SiteConfig>,
        store: StoreContext,
    ) -> Result<SeedReport, SeedError> {
        let products = catalog.fetch_all_products(PAGE_SIZE).await?;

        // one path per product, the first the resolver yields
        let mut paths = Vec::new();

        for product in &products {
            match compute_paths(&site, &store, &product.sku, &product.url_key)
                .into_iter()
                .next()
            {
                Some(path) => paths.push(path),
                None => debug!("No matching path pattern for sku {}", product.sku),
            }
        }

        let mut report = SeedReport::default();

        if paths.is_empty() {
            info!("No paths resolved, nothing to publish");
            return Ok(report);
        }

        let preview_job = admin.create_bulk_job(Api::Preview, &paths).await?;
        let live_paths = preview_job.successful_paths();

        report
            .stages
            .push(BulkStageOutcome::from_job(Api::Preview, &preview_job));

        info!(
            "Preview job {} finished: {}/{} paths succeeded",
            preview_job.name,
            live_paths.len(),
            paths.len()
        );

        if live_paths.is_empty() {
            warn!("No path previewed successfully, skipping the live job");
            return Ok(report);
        }

        let live_job = admin.create_bulk_job(Api::Live, &live_paths).await?;

        report
            .stages
            .push(BulkStageOutcome::from_job(Api::Live, &live_job));

        Ok(report)
    }
}
