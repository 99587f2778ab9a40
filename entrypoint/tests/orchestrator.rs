use std::{collections::BTreeMap, sync::Arc};

use admin::{gateway::AdminGateway, urls::AdminContext};
use catalog::{backends::LiveSearchBackend, client::CatalogClient, config::CatalogConfig};
use common::site_config::{PathMatch, SiteConfig, StoreContext};
use pretty_assertions::assert_eq;
use seeder::orchestrator::{BulkSeeder, PerProductSeeder, SeedStrategy, run_list};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param_contains},
};

fn catalog_client(server: &MockServer) -> CatalogClient {
    let config = CatalogConfig {
        endpoint: server.uri(),
        api_key: "test-key".into(),
        environment_id: "env-1".into(),
        website_code: "base".into(),
        store_code: "main".into(),
        store_view_code: "default".into(),
    };

    CatalogClient::new(Box::new(LiveSearchBackend::new(config)))
}

fn admin_gateway(server: &MockServer) -> AdminGateway {
    AdminGateway::new(AdminContext {
        origin: server.uri(),
        org: Some("acme".into()),
        site: Some("storefront".into()),
        site_ref: Some("main".into()),
        api_key: Some("secret".into()),
        ..AdminContext::new()
    })
}

fn site_config() -> SiteConfig {
    let mut conf_map = BTreeMap::new();
    conf_map.insert(
        "/us/p/{{urlkey}}".to_string(),
        PathMatch {
            store_code: "main".into(),
            store_view_code: "default".into(),
            page_type: Some("product".into()),
        },
    );

    SiteConfig {
        org: "acme".into(),
        site: "storefront".into(),
        site_ref: "main".into(),
        helix_api_key: Some("secret".into()),
        conf_map,
    }
}

fn store() -> StoreContext {
    StoreContext {
        store_code: "main".into(),
        store_view_code: "default".into(),
    }
}

fn search_page(skus: &[&str], current_page: u32, total_pages: u32) -> serde_json::Value {
    let items: Vec<_> = skus
        .iter()
        .map(|sku| {
            json!({
                "productView": {
                    "sku": sku,
                    "name": format!("Product {sku}"),
                    "urlKey": sku.to_lowercase(),
                }
            })
        })
        .collect();

    json!({
        "data": {
            "productSearch": {
                "items": items,
                "page_info": {
                    "current_page": current_page,
                    "page_size": skus.len(),
                    "total_pages": total_pages,
                }
            }
        }
    })
}

async fn mock_catalog_page(
    server: &MockServer,
    current_page: u32,
    total_pages: u32,
    skus: &[&str],
) {
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({ "variables": { "currentPage": current_page } }),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(skus, current_page, total_pages)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_mode_accumulates_every_page_in_order() {
    let server = MockServer::start().await;

    mock_catalog_page(&server, 1, 3, &["A", "B"]).await;
    mock_catalog_page(&server, 2, 3, &["C", "D"]).await;
    mock_catalog_page(&server, 3, 3, &["E"]).await;

    let catalog = catalog_client(&server);
    let dir = tempfile::tempdir().unwrap();

    let products = run_list(&catalog, dir.path()).await.unwrap();

    let skus: Vec<_> = products.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["A", "B", "C", "D", "E"]);

    // exactly one products file landed in the output directory
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("products-"));
}

#[tokio::test]
async fn bulk_strategy_publishes_only_previewed_paths() {
    let catalog_server = MockServer::start().await;
    let admin_server = MockServer::start().await;

    mock_catalog_page(&catalog_server, 1, 1, &["A", "B", "C", "D", "E"]).await;

    Mock::given(method("POST"))
        .and(path("/preview/acme/storefront/main/*"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({ "name": "job-p", "state": "pending" })),
        )
        .mount(&admin_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/job/acme/storefront/main/preview/job-p/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "job-p",
            "state": "stopped",
            "resources": [
                { "path": "/us/p/a", "status": 200 },
                { "path": "/us/p/b", "status": 404 },
                { "path": "/us/p/c", "status": 200 },
                { "path": "/us/p/d", "status": 502 },
                { "path": "/us/p/e", "status": 500 },
            ],
        })))
        .mount(&admin_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/live/acme/storefront/main/*"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({ "name": "job-l", "state": "pending" })),
        )
        .mount(&admin_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/job/acme/storefront/main/publish/job-l/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "job-l",
            "state": "stopped",
            "resources": [
                { "path": "/us/p/a", "status": 200 },
                { "path": "/us/p/c", "status": 200 },
            ],
        })))
        .mount(&admin_server)
        .await;

    let report = BulkSeeder
        .seed(
            Arc::new(catalog_client(&catalog_server)),
            Arc::new(admin_gateway(&admin_server)),
            Arc::new(site_config()),
            store(),
        )
        .await
        .unwrap();

    assert_eq!(report.stages.len(), 2);
    assert_eq!(report.stages[0].api, "preview");
    assert_eq!(report.stages[0].succeeded.len(), 2);
    assert_eq!(report.stages[0].failed.len(), 3);
    assert_eq!(report.stages[1].api, "live");

    // the live job was submitted with exactly the two previewed paths
    let live_post = admin_server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|request| request.url.path() == "/live/acme/storefront/main/*")
        .expect("live bulk job was never triggered");

    let body: serde_json::Value = serde_json::from_slice(&live_post.body).unwrap();
    assert_eq!(body["forceUpdate"], json!(true));
    assert_eq!(body["paths"], json!(["/us/p/a", "/us/p/c"]));
}

#[tokio::test]
async fn per_product_strategy_skips_missing_products() {
    let catalog_server = MockServer::start().await;
    let admin_server = MockServer::start().await;

    mock_catalog_page(&catalog_server, 1, 1, &["A", "GONE"]).await;

    Mock::given(method("GET"))
        .and(query_param_contains("query", "\"A\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&["A"], 1, 1)))
        .mount(&catalog_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param_contains("query", "GONE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "productSearch": { "items": [] } }
        })))
        .mount(&catalog_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/preview/acme/storefront/main/us/p/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "preview": { "url": "https://main--storefront--acme.aem.page/us/p/a" }
        })))
        .mount(&admin_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/live/acme/storefront/main/us/p/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "live": { "url": "https://main--storefront--acme.aem.live/us/p/a" }
        })))
        .mount(&admin_server)
        .await;

    let report = PerProductSeeder::default()
        .seed(
            Arc::new(catalog_client(&catalog_server)),
            Arc::new(admin_gateway(&admin_server)),
            Arc::new(site_config()),
            store(),
        )
        .await
        .unwrap();

    assert_eq!(report.publishes.len(), 1);
    assert_eq!(report.publishes[0].sku, "A");
    assert_eq!(report.publishes[0].paths.len(), 1);
    assert!(report.publishes[0].paths[0].preview.is_success());
    assert!(report.publishes[0].paths[0].live.as_ref().unwrap().is_success());

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].sku, "GONE");
    assert_eq!(report.failures[0].stage, "catalog-lookup");
    assert!(report.failures[0].message.contains("GONE"));
}
