use std::time::Duration;

use common::{publish::Api, site_config::SiteConfig};

pub const ADMIN_ORIGIN: &str = "https://admin.hlx.page";

// generous by default; bulk jobs over large catalogs are slow
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(600);

/// Everything needed to address the admin API for one site.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub origin: String,
    pub org: Option<String>,
    pub site: Option<String>,
    pub site_ref: Option<String>,
    pub api_key: Option<String>,
    pub admin_version: Option<String>,
    pub poll_timeout: Duration,
}

impl Default for AdminContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminContext {
    pub fn new() -> Self {
        Self {
            origin: ADMIN_ORIGIN.into(),
            org: None,
            site: None,
            site_ref: None,
            api_key: None,
            admin_version: None,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    pub fn for_site(config: &SiteConfig) -> Self {
        Self {
            org: Some(config.org.clone()),
            site: Some(config.site.clone()),
            site_ref: Some(config.site_ref.clone()),
            api_key: config.helix_api_key.clone(),
            ..Self::new()
        }
    }
}

/// Deterministic admin URL construction: origin, the api segment, the
/// `/{org}/{site}/{ref}` segment only when all three are configured,
/// the resource path, and finally the query string with the admin
/// version tag (when configured) ahead of every other parameter.
pub fn build_url(ctx: &AdminContext, api: Api, path: &str, query: &[(&str, &str)]) -> String {
    let mut url = format!("{}/{api}", ctx.origin);

    if let (Some(org), Some(site), Some(site_ref)) = (&ctx.org, &ctx.site, &ctx.site_ref) {
        url.push_str(&format!("/{org}/{site}/{site_ref}"));
    }

    url.push_str(path);

    let mut params: Vec<(&str, &str)> = Vec::new();

    if let Some(version) = &ctx.admin_version {
        params.push(("hlx-admin-version", version));
    }

    params.extend_from_slice(query);

    for (index, (key, value)) in params.iter().enumerate() {
        url.push(if index == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }

    url
}
