use crate::core::catalog::EruptionCatalog;
use crate::domain::model::{FeatureRow, Hypocenter};
use chrono::NaiveDateTime;

/// Signed hours from `earlier` to `later`, at whole-second precision.
pub fn hours_between(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    (later - earlier).num_seconds() as f64 / 3600.0
}

/// Hours since the latest onset strictly before `time`; unset before the
/// eruption record begins.
pub fn hours_since_eruption(catalog: &EruptionCatalog, time: NaiveDateTime) -> Option<f64> {
    catalog
        .latest_onset_before(time)
        .map(|e| hours_between(e.onset, time))
}

/// Hours until the first onset at or after `time` (zero on an onset);
/// unset past the final onset.
pub fn hours_to_eruption(catalog: &EruptionCatalog, time: NaiveDateTime) -> Option<f64> {
    catalog
        .first_onset_at_or_after(time)
        .map(|e| hours_between(time, e.onset))
}

/// For each event, the number of events (itself included) inside the
/// trailing window: `0 <= t_i - t_j < window_hours`. Plain O(N²) scan;
/// the catalogues this runs on are a few thousand rows at most.
pub fn trailing_counts(times: &[NaiveDateTime], window_hours: f64) -> Vec<usize> {
    times
        .iter()
        .map(|&t| {
            times
                .iter()
                .filter(|&&u| {
                    let dt = hours_between(u, t);
                    dt >= 0.0 && dt < window_hours
                })
                .count()
        })
        .collect()
}

/// `was_erupting` per event time.
pub fn eruption_flags(catalog: &EruptionCatalog, times: &[NaiveDateTime]) -> Vec<Option<bool>> {
    times.iter().map(|&t| catalog.was_erupting(t)).collect()
}

/// Drop events for which eruption status is unknowable, i.e. those that
/// precede the eruption record.
pub fn prune_pre_catalog(
    catalog: &EruptionCatalog,
    hypocenters: Vec<Hypocenter>,
) -> Vec<Hypocenter> {
    hypocenters
        .into_iter()
        .filter(|h| catalog.was_erupting(h.time).is_some())
        .collect()
}

/// The derived per-event feature table.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Assemble feature rows for `hypocenters` against `catalog`. Events
    /// outside the catalogue bounds keep their row with the temporal
    /// features unset; pruning is a separate, caller-driven step.
    pub fn derive(
        catalog: &EruptionCatalog,
        hypocenters: &[Hypocenter],
        window_hours: f64,
    ) -> Self {
        let times: Vec<NaiveDateTime> = hypocenters.iter().map(|h| h.time).collect();
        let counts = trailing_counts(&times, window_hours);

        let rows = hypocenters
            .iter()
            .zip(counts)
            .map(|(h, trailing_count)| FeatureRow {
                time: h.time,
                latitude: h.latitude,
                longitude: h.longitude,
                depth_km: h.depth_km,
                magnitude: h.magnitude,
                hours_since_eruption: hours_since_eruption(catalog, h.time),
                hours_to_eruption: hours_to_eruption(catalog, h.time),
                trailing_count,
                erupting: catalog.was_erupting(h.time),
            })
            .collect();

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Eruption;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn eruption(number: u32, onset: NaiveDateTime, length_hours: f64) -> Eruption {
        Eruption {
            number,
            onset,
            length_hours,
            repose_days: 0.0,
            flow_area_km2: 0.0,
            flow_volume_km3: 0.0,
            effusion_rate: 0.0,
            location: String::new(),
        }
    }

    fn hypocenter(time: NaiveDateTime) -> Hypocenter {
        Hypocenter {
            time,
            latitude: 19.4,
            longitude: -155.3,
            depth_km: 3.0,
            magnitude: 2.0,
        }
    }

    fn catalog() -> EruptionCatalog {
        EruptionCatalog::from_entries(vec![
            eruption(1, at(1983, 1, 3, 0), 190.0),
            eruption(2, at(1983, 2, 10, 0), 48.0),
        ])
    }

    #[test]
    fn test_hours_between_is_signed() {
        assert_eq!(hours_between(at(1983, 1, 3, 0), at(1983, 1, 4, 12)), 36.0);
        assert_eq!(hours_between(at(1983, 1, 4, 12), at(1983, 1, 3, 0)), -36.0);
    }

    #[test]
    fn test_hours_since_eruption() {
        let cat = catalog();
        assert_eq!(hours_since_eruption(&cat, at(1983, 1, 5, 12)), Some(60.0));
        assert_eq!(hours_since_eruption(&cat, at(1982, 12, 1, 0)), None);
        // an onset is not "since" itself
        assert_eq!(hours_since_eruption(&cat, at(1983, 1, 3, 0)), None);
    }

    #[test]
    fn test_hours_to_eruption() {
        let cat = catalog();
        // 1983-01-05 12:00 -> 1983-02-10 00:00 is 35 d 12 h
        assert_eq!(hours_to_eruption(&cat, at(1983, 1, 5, 12)), Some(852.0));
        assert_eq!(hours_to_eruption(&cat, at(1983, 2, 10, 0)), Some(0.0));
        assert_eq!(hours_to_eruption(&cat, at(1983, 3, 1, 0)), None);
    }

    #[test]
    fn test_trailing_counts_window_is_half_open() {
        let times = [at(1983, 1, 1, 0), at(1983, 1, 1, 1), at(1983, 1, 1, 5)];
        // 4 h window: the event 4 h back falls outside
        assert_eq!(trailing_counts(&times, 4.0), vec![1, 2, 1]);
    }

    #[test]
    fn test_trailing_counts_ignore_source_order() {
        let times = [at(1983, 1, 1, 1), at(1983, 1, 1, 0), at(1983, 1, 1, 5)];
        assert_eq!(trailing_counts(&times, 4.0), vec![2, 1, 1]);
    }

    #[test]
    fn test_eruption_flags() {
        let cat = catalog();
        let times = [at(1982, 12, 1, 0), at(1983, 1, 5, 12), at(1983, 2, 1, 0)];
        assert_eq!(
            eruption_flags(&cat, &times),
            vec![None, Some(true), Some(false)]
        );
    }

    #[test]
    fn test_prune_pre_catalog() {
        let cat = catalog();
        let hypos = vec![
            hypocenter(at(1982, 12, 1, 0)),
            hypocenter(at(1983, 1, 5, 12)),
            hypocenter(at(1983, 2, 1, 0)),
        ];
        let kept = prune_pre_catalog(&cat, hypos);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].time, at(1983, 1, 5, 12));
    }

    #[test]
    fn test_derive_feature_table() {
        let cat = catalog();
        let hypos = vec![
            hypocenter(at(1983, 1, 5, 12)),
            hypocenter(at(1983, 1, 5, 14)),
        ];
        let table = FeatureTable::derive(&cat, &hypos, 168.0);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].trailing_count, 1);
        assert_eq!(table.rows[1].trailing_count, 2);
        assert_eq!(table.rows[0].erupting, Some(true));
        assert_eq!(table.rows[0].hours_since_eruption, Some(60.0));
        assert_eq!(table.rows[1].hours_to_eruption, Some(850.0));
    }

    #[test]
    fn test_derive_keeps_pre_catalog_rows_unset() {
        let cat = catalog();
        let hypos = vec![hypocenter(at(1982, 12, 1, 0))];
        let table = FeatureTable::derive(&cat, &hypos, 168.0);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].erupting, None);
        assert_eq!(table.rows[0].hours_since_eruption, None);
        // the next onset is still well-defined before the record starts
        assert!(table.rows[0].hours_to_eruption.is_some());
    }
}
