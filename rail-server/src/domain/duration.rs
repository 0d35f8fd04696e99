//! Trip duration computation.
//!
//! Derives elapsed travel time from a train's departure and arrival
//! timestamps. This is the strict counterpart to the permissive duration
//! handling in the search engine: here, absent or inverted timestamps
//! are reported errors.

use chrono::NaiveDateTime;

/// Error from trip duration computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// One or both timestamps are absent.
    #[error("departure and arrival times are not both set")]
    MissingTimestamps,

    /// Departure is not strictly before arrival.
    #[error("departure time must be before arrival time")]
    DepartureNotBeforeArrival,
}

/// Elapsed travel time of a train.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rail_server::domain::TripDuration;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let dep = date.and_hms_opt(8, 0, 0).unwrap();
/// let arr = date.and_hms_opt(10, 5, 0).unwrap();
///
/// let trip = TripDuration::between(Some(dep), Some(arr)).unwrap();
/// assert_eq!(trip.minutes, 125);
/// assert_eq!(trip.hours, 2);
/// assert_eq!(trip.format(), "2h 05m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripDuration {
    /// Total elapsed whole minutes (sub-minute remainder truncated).
    pub minutes: i64,

    /// Total elapsed whole hours.
    pub hours: i64,
}

impl TripDuration {
    /// Compute the duration between a departure and an arrival timestamp.
    ///
    /// Both timestamps must be present and the departure must be strictly
    /// before the arrival.
    pub fn between(
        departure: Option<NaiveDateTime>,
        arrival: Option<NaiveDateTime>,
    ) -> Result<Self, DurationError> {
        let (departure, arrival) = match (departure, arrival) {
            (Some(d), Some(a)) => (d, a),
            _ => return Err(DurationError::MissingTimestamps),
        };

        if departure >= arrival {
            return Err(DurationError::DepartureNotBeforeArrival);
        }

        let elapsed = arrival - departure;

        Ok(Self {
            minutes: elapsed.num_minutes(),
            hours: elapsed.num_hours(),
        })
    }

    /// Render the duration as `"<H>h <MM>m"`, with the minutes remainder
    /// zero-padded to two digits.
    pub fn format(&self) -> String {
        format!("{}h {:02}m", self.hours, self.minutes % 60)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{DateTime, NaiveDateTime};
    use proptest::prelude::*;

    /// Strategy for a timestamp within a few years of 2024.
    fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
        (1_700_000_000i64..1_800_000_000i64)
            .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap().naive_utc())
    }

    proptest! {
        /// Minutes decompose exactly into hours and a sub-hour remainder.
        #[test]
        fn minutes_decompose_into_hours((a, b) in (timestamp(), timestamp())) {
            let (dep, arr) = if a < b { (a, b) } else { (b, a) };
            prop_assume!(dep < arr);

            let trip = TripDuration::between(Some(dep), Some(arr)).unwrap();
            let remainder = trip.minutes % 60;

            prop_assert_eq!(trip.minutes, trip.hours * 60 + remainder);
            prop_assert!((0..60).contains(&remainder));
            prop_assert_eq!(trip.format(), format!("{}h {:02}m", trip.hours, remainder));
        }

        /// A departure at or after the arrival always errors.
        #[test]
        fn unordered_timestamps_always_rejected((a, b) in (timestamp(), timestamp())) {
            let (early, late) = if a <= b { (a, b) } else { (b, a) };

            prop_assert_eq!(
                TripDuration::between(Some(late), Some(early)),
                Err(DurationError::DepartureNotBeforeArrival)
            );
        }
    }
}
