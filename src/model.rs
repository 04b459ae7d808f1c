use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One crawled item. Field order is the order fields were produced.
pub type Record = IndexMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlPaths {
    pub output_dir: String,
    pub output_path: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlCounts {
    pub pages_visited: usize,
    pub records: usize,
    pub columns: usize,
    pub rows_written: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub profile: String,
    pub start_url: String,
    pub status: String,
    pub termination: String,
    pub failure_reason: Option<String>,
    pub started_at: String,
    pub updated_at: String,
    pub paths: CrawlPaths,
    pub counts: CrawlCounts,
    pub columns: Vec<String>,
    pub output_sha256: String,
}
