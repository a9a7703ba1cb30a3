use crate::core::grouping::count_by;
use crate::core::store::RecordStore;
use crate::domain::model::{SiteOption, ALL_SITES};

pub const ALL_SITES_LABEL: &str = "All Sites";

/// Distinct launch sites in alphabetical order.
pub fn distinct_sites(store: &RecordStore) -> Vec<String> {
    count_by(store.records(), |r| r.site.clone())
        .into_keys()
        .collect()
}

/// Selector options: the "All Sites" sentinel first, then one entry per site.
pub fn site_options(store: &RecordStore) -> Vec<SiteOption> {
    let mut options = vec![SiteOption {
        label: ALL_SITES_LABEL.to_string(),
        value: ALL_SITES.to_string(),
    }];
    options.extend(distinct_sites(store).into_iter().map(|site| SiteOption {
        label: site.clone(),
        value: site,
    }));
    options
}
