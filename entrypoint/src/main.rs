use std::{env, fs, path::Path, sync::Arc};

use admin::{gateway::AdminGateway, urls::AdminContext};
use catalog::{
    backends::{CatalogBackend, CommerceBackend, LiveSearchBackend},
    client::CatalogClient,
    config::CatalogConfig,
};
use common::site_config::{SiteConfig, StoreContext};
use seeder::{
    errors::SeedError,
    logger::configure_logger,
    orchestrator::{BulkSeeder, PerProductSeeder, SeedStrategy, run_list},
    output::write_timestamped_json,
};
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() {
    configure_logger();

    // `list` dumps the catalog, anything else (or nothing) seeds it
    let mode = env::args().nth(1);

    if let Err(err) = run(mode.as_deref()).await {
        error!("Run failed: {err}");
        std::process::exit(1);
    }
}

async fn run(mode: Option<&str>) -> Result<(), SeedError> {
    let catalog_config = CatalogConfig::from_env();

    let store = StoreContext {
        store_code: catalog_config.store_code.clone(),
        store_view_code: catalog_config.store_view_code.clone(),
    };

    let catalog = build_catalog_client(catalog_config);
    let out_dir = Path::new(".");

    if mode == Some("list") {
        run_list(&catalog, out_dir).await?;
        return Ok(());
    }

    let site = load_site_config()?;
    let admin = AdminGateway::new(AdminContext::for_site(&site));
    let strategy = select_strategy();

    let report = strategy
        .seed(Arc::new(catalog), Arc::new(admin), Arc::new(site), store)
        .await?;

    info!(
        "Seeding done: {} products published, {} bulk stages, {} failures",
        report.publishes.len(),
        report.stages.len(),
        report.failures.len()
    );

    if !report.publishes.is_empty() {
        write_timestamped_json(out_dir, "publish-results", &report.publishes)?;
    }

    if !report.stages.is_empty() {
        write_timestamped_json(out_dir, "bulk-results", &report.stages)?;
    }

    if !report.failures.is_empty() {
        write_timestamped_json(out_dir, "failures", &report.failures)?;
    }

    Ok(())
}

fn build_catalog_client(config: CatalogConfig) -> CatalogClient {
    let backend: Box<dyn CatalogBackend> = match env::var("CATALOG_BACKEND").as_deref() {
        Ok("commerce") => Box::new(CommerceBackend::new(config)),
        _ => Box::new(LiveSearchBackend::new(config)),
    };

    CatalogClient::new(backend)
}

fn load_site_config() -> Result<SiteConfig, SeedError> {
    let path = env::var("SEED_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

    let raw = fs::read_to_string(&path)
        .map_err(|err| SeedError::Config(format!("cannot read {path}: {err}")))?;

    let mut site = SiteConfig::from_json(&raw)
        .map_err(|err| SeedError::Config(format!("cannot parse {path}: {err}")))?;

    site.helix_api_key = env::var("HELIX_ADMIN_API_KEY").ok();

    Ok(site)
}

fn select_strategy() -> Box<dyn SeedStrategy> {
    match env::var("SEED_STRATEGY").as_deref() {
        Ok("bulk") => Box::new(BulkSeeder),
        _ => Box::new(PerProductSeeder::default()),
    }
}
