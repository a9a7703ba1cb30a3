use crate::core::store::RecordStore;
use crate::domain::model::{LaunchRecord, PayloadRange, ScatterChart, ScatterPoint, SiteSelection};

/// Records at the selected site (or any site) whose payload lies in `range`,
/// inclusive on both ends, in store order.
pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a LaunchRecord>,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    records
        .into_iter()
        .filter(|r| selection.matches(&r.site) && range.contains(r.payload_mass_kg))
        .collect()
}

pub fn scatter_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(site) => format!("Correlation between Payload and Success for {}", site),
    }
}

/// Scatter chart data: payload mass against outcome class.
pub fn scatter_chart(store: &RecordStore, selection: &SiteSelection, range: &PayloadRange) -> ScatterChart {
    let points = filter_records(store.records(), selection, range)
        .into_iter()
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            class: r.outcome.as_u8(),
            booster_version_category: r.booster_version_category.clone(),
        })
        .collect();

    ScatterChart {
        title: scatter_title(selection),
        range: *range,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OutcomeClass;

    fn scenario() -> RecordStore {
        RecordStore::from_records(vec![
            LaunchRecord::new("A", 500.0, "v1.0", OutcomeClass::Success),
            LaunchRecord::new("A", 1500.0, "v1.1", OutcomeClass::Failure),
            LaunchRecord::new("B", 800.0, "FT", OutcomeClass::Success),
        ])
        .unwrap()
    }

    fn range(min: f64, max: f64) -> PayloadRange {
        PayloadRange::new(min, max).unwrap()
    }

    #[test]
    fn test_all_sites_in_range() {
        let store = scenario();
        let hits = filter_records(store.records(), &SiteSelection::All, &range(0.0, 1000.0));

        let found: Vec<(&str, f64)> = hits.iter().map(|r| (r.site.as_str(), r.payload_mass_kg)).collect();
        assert_eq!(found, vec![("A", 500.0), ("B", 800.0)]);
    }

    #[test]
    fn test_single_site_in_range() {
        let store = scenario();
        let hits = filter_records(store.records(), &SiteSelection::parse("A"), &range(1000.0, 2000.0));

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload_mass_kg, 1500.0);
        assert_eq!(hits[0].outcome, OutcomeClass::Failure);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let store = scenario();
        let hits = filter_records(store.records(), &SiteSelection::All, &range(800.0, 800.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].site, "B");
    }

    #[test]
    fn test_no_match_is_empty_chart() {
        let chart = scatter_chart(&scenario(), &SiteSelection::All, &range(9000.0, 10000.0));
        assert!(chart.points.is_empty());
        assert!(chart.categories().is_empty());
    }

    #[test]
    fn test_unknown_site_is_empty() {
        let chart = scatter_chart(&scenario(), &SiteSelection::parse("Nowhere"), &range(0.0, 10000.0));
        assert!(chart.points.is_empty());
        assert_eq!(chart.title, "Correlation between Payload and Success for Nowhere");
    }

    #[test]
    fn test_scatter_points_carry_category() {
        let chart = scatter_chart(&scenario(), &SiteSelection::All, &range(0.0, 10000.0));

        assert_eq!(chart.title, "Correlation between Payload and Success for All Sites");
        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.points[1].class, 0);
        assert_eq!(chart.categories(), vec!["v1.0", "v1.1", "FT"]);
    }

    #[test]
    fn test_store_untouched() {
        let store = scenario();
        let before = store.records().to_vec();
        let _ = filter_records(store.records(), &SiteSelection::parse("B"), &range(0.0, 10.0));
        assert_eq!(store.records(), before.as_slice());
    }
}
