use std::collections::BTreeMap;

use serde::Deserialize;

fn default_ref() -> String {
    "main".into()
}

/// Match descriptor attached to a path pattern in the config file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathMatch {
    pub store_code: String,
    pub store_view_code: String,
    #[serde(default)]
    pub page_type: Option<String>,
}

/// Site configuration, loaded once at startup from a JSON file of the
/// shape `{org, site, confMap: {pattern: {storeCode, storeViewCode, pageType}}}`.
///
/// The admin API key never lives in the file; the entrypoint fills it
/// in from the environment after loading.
//
// BTreeMap is used over HashMap so that pattern enumeration (and with
// it "first resolved path") is deterministic across runs.
#[derive(Deserialize, Debug, Clone)]
pub struct SiteConfig {
    pub org: String,
    pub site: String,
    #[serde(rename = "ref", default = "default_ref")]
    pub site_ref: String,
    #[serde(skip)]
    pub helix_api_key: Option<String>,
    #[serde(rename = "confMap", default)]
    pub conf_map: BTreeMap<String, PathMatch>,
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// The active store/view the run operates on. Passed explicitly into
/// the path resolver instead of being read from process globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreContext {
    pub store_code: String,
    pub store_view_code: String,
}
