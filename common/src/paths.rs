use tracing::debug;

use crate::site_config::{SiteConfig, StoreContext};

const SKU_PLACEHOLDER: &str = "{{sku}}";
const URLKEY_PLACEHOLDER: &str = "{{urlkey}}";

// the base entry describes the site itself, not a publishable page
const BASE_KEY: &str = "base";

/// Computes the content paths to preview/publish for one product.
///
/// Patterns whose match descriptor does not name the active store/view
/// are skipped, as is the `base` entry. Placeholders are substituted
/// first-occurrence-only, and any path that still carries a placeholder
/// afterwards is dropped.
///
/// An empty result means "nothing to publish for this product" and is
/// not an error.
pub fn compute_paths(
    config: &SiteConfig,
    store: &StoreContext,
    sku: &str,
    url_key: &str,
) -> Vec<String> {
    let mut paths = Vec::new();

    for (pattern, matcher) in &config.conf_map {
        if pattern == BASE_KEY {
            continue;
        }

        if matcher.store_code != store.store_code
            || matcher.store_view_code != store.store_view_code
        {
            continue;
        }

        let path = pattern
            .replacen(SKU_PLACEHOLDER, sku, 1)
            .replacen(URLKEY_PLACEHOLDER, url_key, 1);

        if path.contains(SKU_PLACEHOLDER) || path.contains(URLKEY_PLACEHOLDER) {
            debug!("Dropping path with unresolved placeholder: {path}");
            continue;
        }

        paths.push(path);
    }

    paths
}
