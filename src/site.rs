use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::util::read_json;

pub const DEFAULT_START_URL: &str =
    "https://ccei.creativekorea.or.kr/service/business_list.do?&page=1";

/// Where to start and how to find things on the target site.
///
/// Every field has a default, so an override file only needs the keys it
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub start_url: String,
    pub listing: ListingSelectors,
    pub detail: DetailSelectors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    pub item_link: String,
    pub list_container: String,
    pub next_control: String,
    pub next_label_attribute: String,
    pub last_page_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    pub attribute_table: String,
    pub row: String,
    pub label_cell: String,
    pub value_cell: String,
    pub article_body: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            listing: ListingSelectors::default(),
            detail: DetailSelectors::default(),
        }
    }
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item_link: "tbody#list_body > tr > td.tb_title > a".to_string(),
            list_container: "tbody#list_body".to_string(),
            next_control: "li > a > img[src='/resources/images/common/btn-next.png']".to_string(),
            next_label_attribute: "alt".to_string(),
            last_page_label: "맨끝".to_string(),
        }
    }
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            attribute_table: "table.tb04".to_string(),
            row: "tr".to_string(),
            label_cell: "th".to_string(),
            value_cell: "td".to_string(),
            article_body: "div.vw_article".to_string(),
        }
    }
}

pub fn load_site_config(path: Option<&Path>) -> Result<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };

    let config: SiteConfig = read_json(path)?;
    info!(path = %path.display(), start_url = %config.start_url, "loaded site config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::SiteConfig;

    #[test]
    fn partial_site_config_keeps_defaults_for_missing_keys() {
        let raw = r#"
        {
          "start_url": "https://example.test/list?page=1",
          "listing": { "last_page_label": "last" }
        }
        "#;

        let config: SiteConfig = serde_json::from_str(raw).expect("partial config should parse");
        assert_eq!(config.start_url, "https://example.test/list?page=1");
        assert_eq!(config.listing.last_page_label, "last");
        assert_eq!(config.listing.list_container, "tbody#list_body");
        assert_eq!(config.detail.attribute_table, "table.tb04");
    }
}
