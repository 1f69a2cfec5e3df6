//! Domain models for scheduled flight legs and airport coordinates.
//!
//! A [`ScheduleLeg`] is a recurring template rather than a dated flight: it
//! operates once per day on every date inside its [`ValidityWindow`], leaving
//! at [`ScheduleLeg::departure_time`] local time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// Date format used by the schedule's `Effective From` / `Effective To` columns.
pub const SCHEDULE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Accepted formats for query instants, tried in order.
const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A geographic position in degrees.
///
/// Used both for airport locations and for estimated aircraft positions.
///
/// # Examples
///
/// ```
/// use flight_density::core::domain::Coordinate;
///
/// let hnd = Coordinate::new(35.5494, 139.7798);
/// assert_eq!(hnd.lat(), 35.5494);
/// assert_eq!(hnd.lon(), 139.7798);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.latitude.value()
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.longitude.value()
    }

    pub fn is_finite(&self) -> bool {
        self.lat().is_finite() && self.lon().is_finite()
    }
}

/// Local time of day decoded from the schedule's HHMM integer encoding.
///
/// # Examples
///
/// ```
/// use flight_density::core::domain::TimeOfDay;
///
/// let t = TimeOfDay::from_hhmm(1345).unwrap();
/// assert_eq!(t.hhmm(), 1345);
///
/// assert!(TimeOfDay::from_hhmm(1360).is_none());
/// assert!(TimeOfDay::from_hhmm(2400).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Decode an HHMM value. Hours must be in `0..=23` and minutes in `0..=59`.
    pub fn from_hhmm(hhmm: i64) -> Option<Self> {
        if !(0..=2359).contains(&hhmm) {
            return None;
        }
        let (hours, minutes) = (hhmm / 100, hhmm % 100);
        NaiveTime::from_hms_opt(hours as u32, minutes as u32, 0).map(Self)
    }

    pub fn hhmm(&self) -> u32 {
        self.0.hour() * 100 + self.0.minute()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// Timestamp of this time of day on `date`.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

/// Inclusive calendar-date range during which a leg operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ValidityWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Returns true if the leg operates on `date`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use flight_density::core::domain::ValidityWindow;
    ///
    /// let window = ValidityWindow::new(
    ///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
    /// );
    /// assert!(window.contains(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()));
    /// assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// One scheduled flight leg, recurring daily within its validity window.
///
/// # Fields
///
/// * `departure_airport` / `arrival_airport` - IATA codes
/// * `departure_time` / `arrival_time` - local scheduled times of day
/// * `validity` - dates on which the leg operates
/// * `flying_time` - raw schedule block time; carried with the row but not
///   used by position estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleLeg {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: TimeOfDay,
    pub arrival_time: TimeOfDay,
    pub validity: ValidityWindow,
    pub flying_time: Option<String>,
}

/// Raw airport row as read from the airport source, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub iata_code: Option<String>,
    pub iso_country: Option<String>,
    pub airport_type: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Parse a `DD/MM/YYYY` schedule date.
pub fn parse_schedule_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), SCHEDULE_DATE_FORMAT).ok()
}

/// Parse a local query instant such as `2024-04-10 11:00` or `2024-04-10T11:00:30`.
pub fn parse_query_instant(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
