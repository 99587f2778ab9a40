use std::{sync::Arc, time::Duration};

use admin::gateway::AdminGateway;
use async_trait::async_trait;
use catalog::{client::CatalogClient, errors::CatalogError};
use common::{
    publish::PublishResult,
    site_config::{SiteConfig, StoreContext},
};
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use crate::{
    errors::SeedError,
    orchestrator::{PAGE_SIZE, SeedFailure, SeedReport, SeedStrategy},
};

const SEED_BATCH_SIZE: usize = 5;
const BATCH_DELAY_MS: u64 = 2000;

type SeedHandle = JoinHandle<Result<PublishResult, CatalogError>>;

/// Seeds one product at a time: validate it still exists in the
/// catalog, then preview/publish each of its paths. Products are
/// dispatched in batches of five with an unconditional two second
/// pause between batches, the admin API's informal rate limit.
pub struct PerProductSeeder {
    pub publish: bool,
}

impl Default for PerProductSeeder {
    fn default() -> Self {
        Self { publish: true }
    }
}

#[async_trait]
impl SeedStrategy for PerProductSeeder {
    async fn seed(
        &self,
        catalog: Arc<CatalogClient>,
        admin: Arc<AdminGateway>,
        site: Arc<SiteConfig>,
        store: StoreContext,
    ) -> Result<SeedReport, SeedError> {
        // handles keep their sku so failures stay attributable to the
        // product that caused them, not to a position in some list
        let mut handles: Vec<(String, SeedHandle)> = Vec::new();
        let mut current_page = 1;

        loop {
            let page = catalog.fetch_product_page(PAGE_SIZE, current_page).await?;

            info!(
                "Dispatching page {}/{} ({} products)",
                page.page_info.current_page,
                page.page_info.total_pages,
                page.items.len()
            );

            for batch in page.items.chunks(SEED_BATCH_SIZE) {
                for product in batch {
                    let catalog = catalog.clone();
                    let admin = admin.clone();
                    let site = site.clone();
                    let store = store.clone();
                    let product = product.clone();
                    let publish = self.publish;

                    handles.push((
                        product.sku.clone(),
                        tokio::spawn(async move {
                            catalog.fetch_product_by_sku(&product.sku).await?;

                            Ok(admin
                                .preview_publish_one(
                                    &site,
                                    &store,
                                    &product.sku,
                                    &product.url_key,
                                    publish,
                                )
                                .await)
                        }),
                    ));
                }

                // next batch launches after the delay without waiting
                // for this batch's results
                sleep(Duration::from_millis(BATCH_DELAY_MS)).await;
            }

            if !page.page_info.has_next_page() {
                break;
            }

            current_page = page.page_info.current_page + 1;
        }

        debug!("All pages dispatched, collecting {} tasks", handles.len());

        let mut report = SeedReport::default();

        for (sku, handle) in handles {
            match handle.await {
                Ok(Ok(result)) => report.publishes.push(result),
                Ok(Err(err)) => {
                    warn!("Skipped {sku}: {err}");

                    report.failures.push(SeedFailure {
                        sku,
                        stage: "catalog-lookup".into(),
                        message: err.to_string(),
                    });
                }
                Err(err) => report.failures.push(SeedFailure {
                    sku,
                    stage: "task".into(),
                    message: err.to_string(),
                }),
            }
        }

        Ok(report)
    }
}
