//! Change detection between a stored snapshot and a fresh one.

use chrono::{DateTime, Utc};

use crate::model::{LedgerEntry, War};

/// True iff a field worth telling people about moved: ally openness,
/// retraction date or start date.
pub fn has_changed(previous: &War, current: &War) -> bool {
    previous.open_for_allies != current.open_for_allies
        || previous.retracted != current.retracted
        || previous.started != current.started
}

/// True iff the war is over at `now` but was not yet over when the stored
/// snapshot was written.
pub fn finished_transition(previous: &LedgerEntry, current: &War, now: DateTime<Utc>) -> bool {
    current.is_finished_at(now) && !previous.war.is_finished_at(previous.observed_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CorporationId;
    use crate::testing::{corp, ts, war};

    #[test]
    fn test_same_snapshot_is_unchanged() {
        let mut w = war(1, corp(10), corp(20));
        assert!(!has_changed(&w, &w));
        w.started = Some(ts("2026-10-02T00:00:00Z"));
        w.retracted = Some(ts("2026-10-03T00:00:00Z"));
        assert!(!has_changed(&w, &w.clone()));
    }

    #[test]
    fn test_each_watched_field_counts() {
        let before = war(1, corp(10), corp(20));

        let mut after = before.clone();
        after.open_for_allies = !before.open_for_allies;
        assert!(has_changed(&before, &after));

        let mut after = before.clone();
        after.retracted = Some(ts("2026-10-03T00:00:00Z"));
        assert!(has_changed(&before, &after));

        let mut after = before.clone();
        after.started = Some(ts("2026-10-02T00:00:00Z"));
        assert!(has_changed(&before, &after));
    }

    #[test]
    fn test_other_fields_are_ignored() {
        let before = war(1, corp(10), corp(20));
        let mut after = before.clone();
        after.finished = Some(ts("2026-10-05T00:00:00Z"));
        after.mutual = true;
        after.allies.push(corp(30));
        assert!(!has_changed(&before, &after));
    }

    #[test]
    fn test_finished_transition() {
        let snapshot = war(1, corp(10), corp(20));
        let entry = LedgerEntry {
            corporation_id: CorporationId(10),
            war: snapshot.clone(),
            observed_at: ts("2026-10-04T00:00:00Z"),
        };
        let mut current = snapshot.clone();
        current.finished = Some(ts("2026-10-05T00:00:00Z"));

        assert!(!finished_transition(&entry, &current, ts("2026-10-04T12:00:00Z")));
        assert!(finished_transition(&entry, &current, ts("2026-10-06T00:00:00Z")));

        let seen_finished = LedgerEntry {
            war: current.clone(),
            observed_at: ts("2026-10-06T00:00:00Z"),
            ..entry
        };
        assert!(!finished_transition(&seen_finished, &current, ts("2026-10-07T00:00:00Z")));
    }
}
