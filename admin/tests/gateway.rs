use std::{collections::BTreeMap, time::Duration};

use admin::{errors::AdminError, gateway::AdminGateway, urls::AdminContext};
use common::{
    publish::Api,
    site_config::{PathMatch, SiteConfig, StoreContext},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn context(server: &MockServer) -> AdminContext {
    AdminContext {
        origin: server.uri(),
        org: Some("acme".into()),
        site: Some("storefront".into()),
        site_ref: Some("main".into()),
        api_key: Some("secret".into()),
        ..AdminContext::new()
    }
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

#[tokio::test]
async fn poll_job_returns_once_the_job_stops() {
    let server = MockServer::start().await;
    let details = "/job/acme/storefront/main/preview/job-42/details";

    Mock::given(method("GET"))
        .and(path(details))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "job-42", "state": "pending" })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(details))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "job-42", "state": "running" })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(details))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "job-42",
            "state": "stopped",
            "resources": [{ "path": "/us/p/widget", "status": 200 }],
        })))
        .mount(&server)
        .await;

    let gateway = AdminGateway::new(context(&server));

    let started = std::time::Instant::now();
    let job = gateway.poll_job("preview", "job-42").await.unwrap();

    assert!(job.is_stopped());
    assert_eq!(job.successful_paths(), vec!["/us/p/widget"]);

    // two non-terminal answers force two one-second waits
    assert!(started.elapsed() >= Duration::from_secs(2));
    let polls = server.received_requests().await.unwrap();
    assert_eq!(polls.len(), 3);
}

#[tokio::test]
async fn poll_job_gives_up_after_the_deadline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "job-9", "state": "running" })),
        )
        .mount(&server)
        .await;

    let mut ctx = context(&server);
    ctx.poll_timeout = Duration::from_millis(1500);

    let gateway = AdminGateway::new(ctx);
    let err = gateway.poll_job("preview", "job-9").await.unwrap_err();

    assert!(matches!(err, AdminError::JobTimeout { .. }));
}

#[tokio::test]
async fn live_bulk_job_polls_under_the_publish_kind() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/live/acme/storefront/main/*"))
        .and(header("authorization", "token secret"))
        .and(body_partial_json(json!({
            "forceUpdate": true,
            "paths": ["/us/p/widget"],
        })))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({ "name": "job-7", "state": "pending" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/job/acme/storefront/main/publish/job-7/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "job-7",
            "state": "stopped",
            "resources": [{ "path": "/us/p/widget", "status": 200 }],
        })))
        .mount(&server)
        .await;

    let gateway = AdminGateway::new(context(&server));
    let job = gateway
        .create_bulk_job(Api::Live, &["/us/p/widget".to_string()])
        .await
        .unwrap();

    assert!(job.is_stopped());
}

#[tokio::test]
async fn failed_bulk_job_creation_wraps_the_cause() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let gateway = AdminGateway::new(context(&server));
    let err = gateway
        .create_bulk_job(Api::Preview, &["/us/p/widget".to_string()])
        .await
        .unwrap_err();

    match err {
        AdminError::BulkJob { api, source } => {
            assert_eq!(api, "preview");
            assert!(matches!(*source, AdminError::Status(401)));
        }
        other => panic!("expected BulkJob error, got {other:?}"),
    }
}

#[tokio::test]
async fn preview_publish_one_issues_live_even_when_preview_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/preview/acme/storefront/main/us/p/widget"))
        .respond_with(ResponseTemplate::new(502).set_body_string("backend down"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/live/acme/storefront/main/us/p/widget"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "live": { "url": "https://main--storefront--acme.aem.live/us/p/widget" }
        })))
        .mount(&server)
        .await;

    let gateway = AdminGateway::new(context(&server));
    let result = gateway
        .preview_publish_one(&site_config(), &store(), "ABC", "widget", true)
        .await;

    assert_eq!(result.sku, "ABC");
    assert_eq!(result.paths.len(), 1);

    let report = &result.paths[0];
    assert_eq!(report.path, "/us/p/widget");
    assert_eq!(report.preview.status, 502);
    assert_eq!(report.preview.message.as_deref(), Some("backend down"));

    let live = report.live.as_ref().unwrap();
    assert_eq!(live.status, 200);
    assert_eq!(
        live.url,
        "https://main--storefront--acme.aem.live/us/p/widget"
    );
}

#[tokio::test]
async fn preview_publish_one_with_no_matching_pattern_is_empty() {
    let server = MockServer::start().await;
    let gateway = AdminGateway::new(context(&server));

    let other_store = StoreContext {
        store_code: "emea".into(),
        store_view_code: "default".into(),
    };

    let result = gateway
        .preview_publish_one(&site_config(), &other_store, "ABC", "widget", true)
        .await;

    assert!(result.paths.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
