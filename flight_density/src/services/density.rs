//! Air-traffic density queries.
//!
//! A query scans every leg of the schedule once, estimates its position and
//! counts the legs whose estimate lies within the configured radius of the
//! query point. There is no spatial index; cost is linear in the number of
//! legs.

use chrono::NaiveDateTime;
use qtty::Kilometers;
use serde::Serialize;

use super::geometry::distance;
use super::position::FlightPositionEstimator;
use crate::config::QuerySettings;
use crate::core::airports::AirportDirectory;
use crate::core::domain::Coordinate;
use crate::core::schedule::ScheduleTable;

/// A leg estimated to be airborne, with its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirbornePosition {
    pub leg_index: usize,
    pub position: Coordinate,
}

/// Summary of a single density query.
#[derive(Debug, Clone, Serialize)]
pub struct DensityReport {
    pub instant: NaiveDateTime,
    pub point: Coordinate,
    pub radius_km: f64,
    pub margin_minutes: f64,
    pub legs_scanned: usize,
    pub count: usize,
}

/// Counts aircraft near a point at an instant.
#[derive(Debug, Clone, Copy)]
pub struct DensityQuery<'a> {
    estimator: FlightPositionEstimator<'a>,
    settings: QuerySettings,
}

impl<'a> DensityQuery<'a> {
    pub fn new(
        schedule: &'a ScheduleTable,
        airports: &'a AirportDirectory,
        settings: QuerySettings,
    ) -> Self {
        Self {
            estimator: FlightPositionEstimator::new(schedule, airports, settings.margin()),
            settings,
        }
    }

    pub fn estimator(&self) -> &FlightPositionEstimator<'a> {
        &self.estimator
    }

    pub fn radius(&self) -> Kilometers {
        self.settings.radius_km
    }

    /// Number of legs airborne at `instant` within the radius of `point`.
    pub fn density(&self, instant: NaiveDateTime, point: &Coordinate) -> usize {
        let radius = self.radius().value();
        (0..self.estimator.schedule().len())
            .filter_map(|index| self.estimator.position(index, instant))
            .filter(|position| distance(position, point).value() <= radius)
            .count()
    }

    /// Every leg airborne at `instant`, regardless of location.
    pub fn airborne(&self, instant: NaiveDateTime) -> Vec<AirbornePosition> {
        (0..self.estimator.schedule().len())
            .filter_map(|leg_index| {
                self.estimator
                    .position(leg_index, instant)
                    .map(|position| AirbornePosition {
                        leg_index,
                        position,
                    })
            })
            .collect()
    }

    /// The legs counted by [`DensityQuery::density`].
    pub fn within(&self, instant: NaiveDateTime, point: &Coordinate) -> Vec<AirbornePosition> {
        let radius = self.radius().value();
        self.airborne(instant)
            .into_iter()
            .filter(|hit| distance(&hit.position, point).value() <= radius)
            .collect()
    }

    /// Run a density query and package the result.
    pub fn report(&self, instant: NaiveDateTime, point: Coordinate) -> DensityReport {
        let count = self.density(instant, &point);
        log::debug!(
            "Density at {} around ({}, {}): {}",
            instant,
            point.lat(),
            point.lon(),
            count
        );
        DensityReport {
            instant,
            point,
            radius_km: self.settings.radius_km.value(),
            margin_minutes: self.settings.margin_minutes.value(),
            legs_scanned: self.estimator.schedule().len(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{ScheduleLeg, TimeOfDay, ValidityWindow};
    use crate::services::geometry::EARTH_RADIUS_KM;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leg(dep: &str, arr: &str, dep_time: i64, arr_time: i64) -> ScheduleLeg {
        ScheduleLeg {
            departure_airport: dep.to_string(),
            arrival_airport: arr.to_string(),
            departure_time: TimeOfDay::from_hhmm(dep_time).unwrap(),
            arrival_time: TimeOfDay::from_hhmm(arr_time).unwrap(),
            validity: ValidityWindow::new(date(2024, 1, 1), date(2024, 1, 31)),
            flying_time: None,
        }
    }

    fn directory() -> AirportDirectory {
        AirportDirectory::from_entries([
            ("HND", Coordinate::new(35.5494, 139.7798)),
            ("OKA", Coordinate::new(26.1958, 127.6458)),
            ("CTS", Coordinate::new(42.7752, 141.6923)),
        ])
    }

    fn midpoint() -> Coordinate {
        Coordinate::new((35.5494 + 26.1958) / 2.0, (139.7798 + 127.6458) / 2.0)
    }

    /// Point `km` north of `p` under the flat distance.
    fn north_of(p: &Coordinate, km: f64) -> Coordinate {
        Coordinate::new(p.lat() + (km / EARTH_RADIUS_KM).to_degrees(), p.lon())
    }

    #[test]
    fn test_counts_leg_within_radius() {
        let schedule = ScheduleTable::new(vec![leg("HND", "OKA", 1000, 1200)]);
        let airports = directory();
        let query = DensityQuery::new(&schedule, &airports, QuerySettings::new(10.0, 10.0).unwrap());
        let instant = date(2024, 1, 10).and_hms_opt(11, 0, 0).unwrap();

        let center = north_of(&midpoint(), 5.0);
        assert_eq!(query.density(instant, &center), 1);

        let far = north_of(&midpoint(), 15.0);
        assert_eq!(query.density(instant, &far), 0);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let schedule = ScheduleTable::new(vec![leg("HND", "OKA", 1000, 1200)]);
        let airports = directory();
        let instant = date(2024, 1, 10).and_hms_opt(11, 0, 0).unwrap();
        let center = north_of(&midpoint(), 5.0);

        let query = DensityQuery::new(&schedule, &airports, QuerySettings::new(10.0, 10.0).unwrap());
        let exact = distance(&query.airborne(instant)[0].position, &center).value();

        let tight = DensityQuery::new(&schedule, &airports, QuerySettings::new(10.0, exact).unwrap());
        assert_eq!(tight.density(instant, &center), 1);
    }

    #[test]
    fn test_leg_outside_validity_contributes_nothing() {
        let mut out_of_season = leg("HND", "OKA", 1000, 1200);
        out_of_season.validity = ValidityWindow::new(date(2024, 3, 1), date(2024, 3, 31));
        let schedule = ScheduleTable::new(vec![out_of_season]);
        let airports = directory();
        let query = DensityQuery::new(&schedule, &airports, QuerySettings::default());
        let instant = date(2024, 1, 10).and_hms_opt(11, 0, 0).unwrap();

        assert_eq!(query.density(instant, &midpoint()), 0);
        assert!(query.airborne(instant).is_empty());
    }

    #[test]
    fn test_scan_skips_unresolvable_legs() {
        let schedule = ScheduleTable::new(vec![
            leg("HND", "KIX", 1000, 1200),
            leg("HND", "OKA", 1000, 1200),
            leg("OKA", "HND", 1000, 1200),
        ]);
        let airports = directory();
        let query = DensityQuery::new(&schedule, &airports, QuerySettings::default());
        let instant = date(2024, 1, 10).and_hms_opt(11, 0, 0).unwrap();

        // Both resolvable legs meet at the midpoint.
        assert_eq!(query.density(instant, &midpoint()), 2);
        let hits = query.within(instant, &midpoint());
        assert_eq!(
            hits.iter().map(|h| h.leg_index).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_airborne_lists_all_positions() {
        let schedule = ScheduleTable::new(vec![
            leg("HND", "OKA", 1000, 1200),
            leg("HND", "CTS", 1030, 1200),
            leg("CTS", "HND", 1500, 1630),
        ]);
        let airports = directory();
        let query = DensityQuery::new(&schedule, &airports, QuerySettings::default());
        let instant = date(2024, 1, 10).and_hms_opt(11, 0, 0).unwrap();

        let airborne = query.airborne(instant);
        assert_eq!(airborne.len(), 2);
        assert_eq!(airborne[0].leg_index, 0);
        assert_eq!(airborne[1].leg_index, 1);
        assert_eq!(query.density(instant, &midpoint()), 1);
    }

    #[test]
    fn test_report() {
        let schedule = ScheduleTable::new(vec![leg("HND", "OKA", 1000, 1200)]);
        let airports = directory();
        let query = DensityQuery::new(&schedule, &airports, QuerySettings::default());
        let instant = date(2024, 1, 10).and_hms_opt(11, 0, 0).unwrap();

        let report = query.report(instant, midpoint());
        assert_eq!(report.count, 1);
        assert_eq!(report.legs_scanned, 1);
        assert_eq!(report.radius_km, 10.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["instant"], "2024-01-10T11:00:00");
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = ScheduleTable::default();
        let airports = directory();
        let query = DensityQuery::new(&schedule, &airports, QuerySettings::default());
        let instant = date(2024, 1, 10).and_hms_opt(11, 0, 0).unwrap();

        assert_eq!(query.density(instant, &midpoint()), 0);
    }
}
