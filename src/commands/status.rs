use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::CrawlRunManifest;
use crate::util::read_json;

use super::crawl::manifest_dir;

pub fn run(args: StatusArgs) -> Result<()> {
    let dir = manifest_dir(&args.output_dir);

    info!(output_dir = %args.output_dir.display(), "status requested");

    let Some(latest) = latest_run_manifest(&dir)? else {
        warn!(path = %dir.display(), "no crawl run manifests found");
        return Ok(());
    };

    let manifest: CrawlRunManifest = read_json(&latest)?;
    info!(
        run_id = %manifest.run_id,
        profile = %manifest.profile,
        status = %manifest.status,
        termination = %manifest.termination,
        failure_reason = %manifest.failure_reason.clone().unwrap_or_default(),
        started_at = %manifest.started_at,
        updated_at = %manifest.updated_at,
        "loaded crawl run manifest"
    );
    info!(
        pages = manifest.counts.pages_visited,
        records = manifest.counts.records,
        columns = manifest.counts.columns,
        "crawl counts"
    );

    let output_path = Path::new(&manifest.paths.output_path);
    if output_path.exists() {
        info!(
            path = %output_path.display(),
            sha256 = %manifest.output_sha256,
            "dataset present"
        );
    } else {
        warn!(path = %output_path.display(), "dataset missing");
    }

    Ok(())
}

/// Newest `crawl_run_<timestamp>.json` in `dir`, by the timestamp in its name.
pub(crate) fn latest_run_manifest(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.exists() {
        return Ok(None);
    }

    let pattern = Regex::new(r"^crawl_run_(\d{8}T\d{6}Z)\.json$")
        .context("failed to compile manifest filename regex")?;

    let mut candidates = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(captures) = pattern.captures(name) {
            candidates.push((captures[1].to_string(), path.clone()));
        }
    }

    candidates.sort();
    Ok(candidates.pop().map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::latest_run_manifest;

    #[test]
    fn latest_run_manifest_picks_newest_timestamp_and_ignores_other_files() {
        let dir = std::env::temp_dir().join(format!("crawl-status-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        for name in [
            "crawl_run_20240101T000000Z.json",
            "crawl_run_20240301T120000Z.json",
            "crawl_run_20240215T090000Z.json",
            "notes.json",
        ] {
            fs::write(dir.join(name), "{}").expect("write fixture");
        }

        let latest = latest_run_manifest(&dir).expect("scan should succeed");
        assert_eq!(
            latest.as_deref().and_then(|path| path.file_name()),
            Some(std::ffi::OsStr::new("crawl_run_20240301T120000Z.json"))
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn latest_run_manifest_is_none_for_missing_directory() {
        let dir = std::env::temp_dir().join("crawl-status-does-not-exist");
        assert!(latest_run_manifest(&dir).expect("scan").is_none());
    }
}
