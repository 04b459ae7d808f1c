use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Record;
use crate::util::ensure_parent;

use super::assemble::OutputSchema;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header plus one row per record, comma separated, prefixed with a UTF-8
/// byte-order mark so spreadsheet tools pick up the encoding.
pub fn write_dataset_csv(path: &Path, schema: &OutputSchema, records: &[Record]) -> Result<usize> {
    ensure_parent(path)?;

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM)
        .with_context(|| format!("failed to write {}", path.display()))?;

    let rows_written = write_rows(&mut out, schema, records)
        .with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    Ok(rows_written)
}

pub fn write_rows<W: Write>(out: W, schema: &OutputSchema, records: &[Record]) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(schema.columns())?;

    for record in records {
        writer.write_record(schema.row(record))?;
    }
    writer.flush()?;

    Ok(records.len())
}
