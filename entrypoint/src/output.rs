use std::{fs, path::PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::errors::SeedError;

const STAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Writes `value` to `{prefix}-{timestamp}.json` in `dir` and returns
/// the path it landed at.
pub fn write_timestamped_json<T: Serialize>(
    dir: &std::path::Path,
    prefix: &str,
    value: &T,
) -> Result<PathBuf, SeedError> {
    let stamp = Local::now().format(STAMP_FORMAT);
    let path = dir.join(format!("{prefix}-{stamp}.json"));

    fs::write(&path, serde_json::to_string_pretty(value)?)?;

    info!("Wrote {}", path.display());

    Ok(path)
}
