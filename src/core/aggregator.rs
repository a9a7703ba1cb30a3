use crate::core::grouping::{count_by, sum_by};
use crate::core::store::RecordStore;
use crate::domain::model::{OutcomeClass, PieChart, PieSlice, SiteSelection};
use std::collections::BTreeMap;

/// Success count per launch site, for every site in the store.
pub fn successes_by_site(store: &RecordStore) -> BTreeMap<String, u64> {
    sum_by(
        store.records(),
        |r| r.site.clone(),
        |r| u64::from(r.outcome.as_u8()),
    )
}

/// Failure/success counts for one site. Only classes that occur are present; an
/// unknown site gives an empty map.
pub fn outcomes_for_site(store: &RecordStore, site: &str) -> BTreeMap<OutcomeClass, u64> {
    count_by(
        store.records().iter().filter(|r| r.site == site),
        |r| r.outcome,
    )
}

pub fn pie_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "All Launch Sites Success Rate".to_string(),
        SiteSelection::Site(site) => format!("{} Success Rate", site),
    }
}

/// Pie chart data for the current selector value.
pub fn pie_chart(store: &RecordStore, selection: &SiteSelection) -> PieChart {
    let slices = match selection {
        SiteSelection::All => successes_by_site(store)
            .into_iter()
            .map(|(label, value)| PieSlice { label, value })
            .collect(),
        SiteSelection::Site(site) => outcomes_for_site(store, site)
            .into_iter()
            .map(|(class, value)| PieSlice {
                label: class.label().to_string(),
                value,
            })
            .collect(),
    };

    PieChart {
        title: pie_title(selection),
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LaunchRecord;

    fn scenario() -> RecordStore {
        RecordStore::from_records(vec![
            LaunchRecord::new("A", 500.0, "v1.0", OutcomeClass::Success),
            LaunchRecord::new("A", 1500.0, "v1.1", OutcomeClass::Failure),
            LaunchRecord::new("B", 800.0, "FT", OutcomeClass::Success),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_sites_mode() {
        let chart = pie_chart(&scenario(), &SiteSelection::All);

        assert_eq!(chart.title, "All Launch Sites Success Rate");
        assert_eq!(
            chart.slices,
            vec![
                PieSlice { label: "A".to_string(), value: 1 },
                PieSlice { label: "B".to_string(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_single_site_mode() {
        let chart = pie_chart(&scenario(), &SiteSelection::parse("A"));

        assert_eq!(chart.title, "A Success Rate");
        assert_eq!(
            chart.slices,
            vec![
                PieSlice { label: "Failure".to_string(), value: 1 },
                PieSlice { label: "Success".to_string(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_single_site_only_reports_present_classes() {
        let chart = pie_chart(&scenario(), &SiteSelection::parse("B"));
        assert_eq!(chart.slices, vec![PieSlice { label: "Success".to_string(), value: 1 }]);
    }

    #[test]
    fn test_site_without_successes_keeps_zero_slice() {
        let store = RecordStore::from_records(vec![
            LaunchRecord::new("A", 500.0, "v1.0", OutcomeClass::Failure),
            LaunchRecord::new("B", 800.0, "FT", OutcomeClass::Success),
        ])
        .unwrap();

        let sums = successes_by_site(&store);
        assert_eq!(sums.get("A"), Some(&0));
        assert_eq!(sums.get("B"), Some(&1));
    }

    #[test]
    fn test_unknown_site_is_empty() {
        let chart = pie_chart(&scenario(), &SiteSelection::parse("Nowhere"));
        assert!(chart.slices.is_empty());
        assert!(chart.is_empty());
    }

    #[test]
    fn test_empty_store() {
        assert!(pie_chart(&RecordStore::default(), &SiteSelection::All).slices.is_empty());
    }
}
