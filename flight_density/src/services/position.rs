//! Position estimation for a single schedule leg.
//!
//! A leg's aircraft is assumed to fly a straight line in (latitude,
//! longitude) space at constant speed between its departure and arrival
//! airports, airborne from `departure + margin` until `arrival - margin`.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use super::geometry::AirborneWindow;
use crate::core::airports::AirportDirectory;
use crate::core::domain::{Coordinate, ScheduleLeg};
use crate::core::schedule::ScheduleTable;

/// One sample of a leg's estimated track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackSample {
    pub instant: NaiveDateTime,
    pub position: Option<Coordinate>,
}

/// Estimates where a scheduled leg's aircraft is at a given local instant.
#[derive(Debug, Clone, Copy)]
pub struct FlightPositionEstimator<'a> {
    schedule: &'a ScheduleTable,
    airports: &'a AirportDirectory,
    margin: TimeDelta,
}

impl<'a> FlightPositionEstimator<'a> {
    pub fn new(
        schedule: &'a ScheduleTable,
        airports: &'a AirportDirectory,
        margin: TimeDelta,
    ) -> Self {
        Self {
            schedule,
            airports,
            margin,
        }
    }

    pub fn schedule(&self) -> &'a ScheduleTable {
        self.schedule
    }

    pub fn margin(&self) -> TimeDelta {
        self.margin
    }

    /// Estimated position of leg `index` at `instant`, or `None` when the
    /// aircraft is not airborne (or the leg cannot be resolved).
    pub fn position(&self, index: usize, instant: NaiveDateTime) -> Option<Coordinate> {
        let leg = self.schedule.get(index)?;
        self.position_of(leg, instant)
    }

    /// Estimated position of `leg` at `instant`.
    pub fn position_of(&self, leg: &ScheduleLeg, instant: NaiveDateTime) -> Option<Coordinate> {
        let window = self.airborne_window(leg, instant)?;
        if !window.contains(instant) {
            return None;
        }

        let (Some(from), Some(to)) = (
            self.airports.get(&leg.departure_airport),
            self.airports.get(&leg.arrival_airport),
        ) else {
            log::debug!(
                "Skipping leg {} -> {}: airport not in directory",
                leg.departure_airport,
                leg.arrival_airport
            );
            return None;
        };

        window.interpolate(&from, &to, instant)
    }

    /// Margin-adjusted airborne window of the occurrence of `leg` relevant to
    /// `instant`.
    ///
    /// Returns `None` if the leg does not operate on the instant's date, or
    /// if the margin leaves no airborne time. Timestamps are anchored to the
    /// instant's own date; when the instant precedes that day's departure
    /// and the previous day is also inside the validity window, the previous
    /// day's occurrence is used so that overnight legs are found in the
    /// early morning.
    pub fn airborne_window(
        &self,
        leg: &ScheduleLeg,
        instant: NaiveDateTime,
    ) -> Option<AirborneWindow> {
        let date = instant.date();
        if !leg.validity.contains(date) {
            return None;
        }

        let one_day = TimeDelta::days(1);
        let mut departure = leg.departure_time.on(date);
        let mut arrival = leg.arrival_time.on(date);
        if arrival <= departure {
            arrival = arrival.checked_add_signed(one_day)?;
        }

        if instant < departure && date > leg.validity.from {
            departure = departure.checked_sub_signed(one_day)?;
            arrival = arrival.checked_sub_signed(one_day)?;
        }

        let window = AirborneWindow {
            departure: departure.checked_add_signed(self.margin)?,
            arrival: arrival.checked_sub_signed(self.margin)?,
        };
        window.is_valid().then_some(window)
    }

    /// Sample leg `index` every `step` from `from` up to and including `to`.
    ///
    /// Returns an empty track for an unknown index, a non-positive step or
    /// `to < from`.
    pub fn track(
        &self,
        index: usize,
        from: NaiveDateTime,
        to: NaiveDateTime,
        step: TimeDelta,
    ) -> Vec<TrackSample> {
        let Some(leg) = self.schedule.get(index) else {
            return Vec::new();
        };
        if step <= TimeDelta::zero() {
            return Vec::new();
        }

        let mut samples = Vec::new();
        let mut instant = from;
        while instant <= to {
            samples.push(TrackSample {
                instant,
                position: self.position_of(leg, instant),
            });
            match instant.checked_add_signed(step) {
                Some(next) => instant = next,
                None => break,
            }
        }
        samples
    }
}
