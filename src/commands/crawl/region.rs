use crate::profile::CrawlProfile;

/// First alias in declared order that appears anywhere in `text`, mapped to
/// its full region name. Empty when nothing matches.
pub(crate) fn resolve_region(profile: &CrawlProfile, text: &str) -> String {
    profile
        .regions
        .iter()
        .find(|(alias, _)| text.contains(*alias))
        .map(|(_, region)| (*region).to_string())
        .unwrap_or_default()
}
