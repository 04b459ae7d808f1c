use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ExtractArgs;
use crate::model::Record;
use crate::profile::CrawlProfile;
use crate::site::load_site_config;

use super::crawl::{FieldExtractor, OutputSchema, write_dataset_csv};

/// Runs detail-page extraction over saved markup without a browser.
pub fn run(args: ExtractArgs) -> Result<()> {
    let site = load_site_config(args.site_config.as_deref())?;
    let profile = CrawlProfile::for_kind(args.profile);
    let extractor = FieldExtractor::new(&site.detail, profile.clone())?;

    let mut records = Vec::<Record>::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let html = fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        let record = extractor.extract(&html, args.url.as_deref());
        info!(
            path = %input.display(),
            fields = record.len(),
            "extracted detail page"
        );
        records.push(record);
    }

    match &args.output {
        Some(path) => {
            let schema = OutputSchema::derive(profile.columns, &records);
            let rows = write_dataset_csv(path, &schema, &records)?;
            info!(path = %path.display(), rows, columns = schema.len(), "wrote dataset");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &records)
                .context("failed to serialize extracted records")?;
            writeln!(out).context("failed to write to stdout")?;
        }
    }

    Ok(())
}
