use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::model::Record;
use crate::profile::{
    AGENCY, CATEGORY, CONTENT, CrawlProfile, FieldRule, LINK, LOCATION, PERIOD_END,
    PERIOD_SEPARATOR, PERIOD_START,
};
use crate::site::DetailSelectors;

use super::region::resolve_region;

/// Turns one detail page into a [`Record`].
///
/// Selectors are compiled once up front; after that extraction cannot fail.
/// A page without the attribute table or article body simply yields fewer
/// fields.
pub struct FieldExtractor {
    profile: CrawlProfile,
    attribute_table: Selector,
    row: Selector,
    label_cell: Selector,
    value_cell: Selector,
    article_body: Selector,
}

impl FieldExtractor {
    pub fn new(selectors: &DetailSelectors, profile: CrawlProfile) -> Result<Self> {
        Ok(Self {
            profile,
            attribute_table: compile_selector(&selectors.attribute_table)?,
            row: compile_selector(&selectors.row)?,
            label_cell: compile_selector(&selectors.label_cell)?,
            value_cell: compile_selector(&selectors.value_cell)?,
            article_body: compile_selector(&selectors.article_body)?,
        })
    }

    pub fn profile(&self) -> &CrawlProfile {
        &self.profile
    }

    pub fn extract(&self, html: &str, url: Option<&str>) -> Record {
        let document = Html::parse_document(html);
        let mut mapped = Record::new();
        let mut unmapped = Record::new();

        if let Some(table) = document.select(&self.attribute_table).next() {
            for row in table.select(&self.row) {
                let Some(label) = self.first_text(row, &self.label_cell) else {
                    continue;
                };
                let value = self.first_text(row, &self.value_cell).unwrap_or_default();

                match self.profile.rule_for(&label) {
                    Some(FieldRule::Canonical(field)) => {
                        mapped.insert(field.to_string(), value);
                    }
                    Some(FieldRule::Period) => apply_period(&mut mapped, &value),
                    Some(FieldRule::PeriodTerminator) => {
                        apply_period(&mut mapped, &value);
                        debug!(label = %label, "period terminator reached; skipping remaining rows");
                        break;
                    }
                    None => {
                        unmapped.insert(label, value);
                    }
                }
            }
        }

        if self.profile.ensure_agency && mapped.contains_key(CATEGORY) {
            mapped.insert(AGENCY.to_string(), String::new());
        }

        match document.select(&self.article_body).next() {
            Some(article) => {
                mapped.insert(CONTENT.to_string(), stripped_text(article));
            }
            None => {
                mapped.entry(CONTENT.to_string()).or_default();
            }
        }

        let content = mapped.get(CONTENT).map(String::as_str).unwrap_or_default();
        let location = resolve_region(&self.profile, content);
        mapped.insert(LOCATION.to_string(), location);
        mapped.insert(LINK.to_string(), url.unwrap_or_default().to_string());

        mapped.extend(unmapped);
        mapped
    }

    fn first_text(&self, row: ElementRef<'_>, cell: &Selector) -> Option<String> {
        row.select(cell).next().map(stripped_text)
    }
}

/// Text of every descendant node, each trimmed, empty ones dropped, joined
/// without a separator.
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

pub(crate) fn split_period(value: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = value.split(PERIOD_SEPARATOR).collect();
    match parts.as_slice() {
        [start, end] => Some((*start, *end)),
        _ => None,
    }
}

fn apply_period(record: &mut Record, value: &str) {
    if let Some((start, end)) = split_period(value) {
        record.insert(PERIOD_START.to_string(), start.to_string());
        record.insert(PERIOD_END.to_string(), end.to_string());
    }
}

fn compile_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|err| anyhow!("invalid CSS selector `{raw}`: {err}"))
}
