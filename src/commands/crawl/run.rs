use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::CrawlArgs;
use crate::model::{CrawlCounts, CrawlPaths, CrawlRunManifest};
use crate::profile::CrawlProfile;
use crate::site::load_site_config;
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

use super::assemble::OutputSchema;
use super::chrome::ChromeDriver;
use super::driver::Session;
use super::export::write_dataset_csv;
use super::extract::FieldExtractor;
use super::navigator::{ListingNavigator, NavigationTiming};

pub const DEFAULT_OUTPUT_FILE: &str = "CCEI_crawl.csv";

pub fn run(args: CrawlArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("crawl-{}", utc_compact_string(started_ts));

    let output_dir = args.output_dir.clone();
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| output_dir.join(DEFAULT_OUTPUT_FILE));
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        manifest_dir(&output_dir).join(format!(
            "crawl_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    let site = load_site_config(args.site_config.as_deref())?;
    let profile = CrawlProfile::for_kind(args.profile);
    let extractor = FieldExtractor::new(&site.detail, profile.clone())?;
    let timing = NavigationTiming {
        settle: Duration::from_millis(args.settle_ms),
        page_settle: Duration::from_millis(args.page_settle_ms),
        list_wait: Duration::from_secs(args.list_wait_secs),
    };

    info!(
        run_id = %run_id,
        profile = profile.kind.as_str(),
        start_url = %site.start_url,
        output = %output_path.display(),
        "starting crawl"
    );

    let driver = ChromeDriver::launch(!args.show_browser, args.chrome_path.clone())?;
    let outcome = ListingNavigator::new(Session::new(driver), &site.listing, &extractor, timing)
        .with_page_limit(args.max_pages.map(|pages| pages as usize))
        .crawl(&site.start_url);

    let schema = OutputSchema::derive(profile.columns, &outcome.records);
    let rows_written = write_dataset_csv(&output_path, &schema, &outcome.records)?;
    let output_sha256 = sha256_file(&output_path)?;

    let failure_reason = outcome.termination.fault().map(ToString::to_string);
    let status = if failure_reason.is_some() {
        warn!(records = outcome.records.len(), "exported partial dataset after fault");
        "aborted"
    } else {
        "completed"
    };

    let manifest = CrawlRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        profile: profile.kind.as_str().to_string(),
        start_url: site.start_url.clone(),
        status: status.to_string(),
        termination: outcome.termination.as_str().to_string(),
        failure_reason,
        started_at,
        updated_at: now_utc_string(),
        paths: CrawlPaths {
            output_dir: output_dir.display().to_string(),
            output_path: output_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        counts: CrawlCounts {
            pages_visited: outcome.pages_visited,
            records: outcome.records.len(),
            columns: schema.len(),
            rows_written,
        },
        columns: schema.columns().to_vec(),
        output_sha256,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote crawl run manifest");
    info!(
        records = rows_written,
        columns = schema.len(),
        status,
        "crawl completed"
    );

    Ok(())
}

pub fn manifest_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("manifests")
}
