use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::EventRecord;

/// Type value meaning "do not filter by type".
pub const ALL_TYPES: &str = "all";

/// Lazily filter events by type and an inclusive date range.
///
/// A missing, blank or `"all"` type does not filter. Missing bounds are
/// unbounded. Order follows the source table, which is not
/// necessarily chronological.
pub fn filter<'a>(
    events: &'a [EventRecord],
    event_type: Option<&'a str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> impl Iterator<Item = &'a EventRecord> + 'a {
    let event_type = event_type
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != ALL_TYPES);

    events.iter().filter(move |e| {
        event_type.map_or(true, |t| e.event_type == t)
            && start.map_or(true, |s| e.date >= s)
            && end.map_or(true, |en| e.date <= en)
    })
}

/// Distinct event types present in the table.
pub fn list_types(events: &[EventRecord]) -> BTreeSet<String> {
    events.iter().map(|e| e.event_type.clone()).collect()
}

pub fn find_by_id(events: &[EventRecord], id: u32) -> Option<&EventRecord> {
    events.iter().find(|e| e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::loader::seed_events;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_all_returns_everything_in_order() {
        let events = seed_events();
        let ids: Vec<u32> = filter(&events, Some("all"), None, None).map(|e| e.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());

        let unfiltered = filter(&events, None, None, None).count();
        assert_eq!(unfiltered, 12);
    }

    #[test]
    fn test_blank_type_does_not_filter() {
        let events = seed_events();
        assert_eq!(filter(&events, Some(""), None, None).count(), 12);
        assert_eq!(filter(&events, Some("   "), None, None).count(), 12);
    }

    #[test]
    fn test_filter_by_type() {
        let events = seed_events();
        let ids: Vec<u32> = filter(&events, Some("Policy"), None, None).map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 10]);

        assert_eq!(filter(&events, Some("Volcanic"), None, None).count(), 0);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let events = seed_events();
        let ids: Vec<u32> = filter(
            &events,
            None,
            Some(date("2008-09-15")),
            Some(date("2014-06-01")),
        )
        .map(|e| e.id)
        .collect();
        assert_eq!(ids, vec![6, 7, 8]);
    }

    #[test]
    fn test_open_ended_bounds() {
        let events = seed_events();
        let after: Vec<u32> = filter(&events, None, Some(date("2020-01-01")), None)
            .map(|e| e.id)
            .collect();
        assert_eq!(after, vec![11, 12]);

        let before: Vec<u32> = filter(&events, Some("Geopolitical"), None, Some(date("2001-09-11")))
            .map(|e| e.id)
            .collect();
        assert_eq!(before, vec![1, 3]);
    }

    #[test]
    fn test_filter_preserves_unsorted_order() {
        let mut events = seed_events();
        events.reverse();
        let ids: Vec<u32> = filter(&events, Some("Financial"), None, None).map(|e| e.id).collect();
        assert_eq!(ids, vec![6, 2]);
    }

    #[test]
    fn test_list_types() {
        let types = list_types(&seed_events());
        let expected: BTreeSet<String> = [
            "Geopolitical",
            "Financial",
            "Natural Disaster",
            "Market",
            "Policy",
            "Health",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(types, expected);
    }
}
