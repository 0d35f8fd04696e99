//! Search criteria and their predicate forms.

use chrono::NaiveDateTime;

use crate::domain::{Station, Train};

/// One train together with its resolved endpoint stations.
///
/// Endpoints are resolved up front, so station-dependent criteria
/// (cities, open status) need no further store access.
pub(crate) struct Candidate<'a> {
    pub train: &'a Train,
    pub departure_station: &'a Station,
    pub arrival_station: &'a Station,
}

pub(crate) type Predicate<'c> = Box<dyn Fn(&Candidate<'_>) -> bool + 'c>;

/// Optional constraints for an advanced train search.
///
/// Every field is independently optional; an unset field is the
/// identity filter. A blank city string counts as unset.
#[derive(Debug, Clone, Default)]
pub struct TrainCriteria {
    /// Exact departure city, compared case-insensitively.
    pub departure_city: Option<String>,

    /// Exact arrival city, compared case-insensitively.
    pub arrival_city: Option<String>,

    /// Inclusive lower bound on the departure time.
    pub departing_from: Option<NaiveDateTime>,

    /// Inclusive upper bound on the departure time.
    pub departing_until: Option<NaiveDateTime>,

    /// Inclusive upper bound on trip duration, in minutes.
    /// Values below 1 deactivate the criterion.
    pub max_duration_mins: Option<i64>,

    /// Require both endpoint stations to be open.
    pub open_stations_only: bool,
}

impl TrainCriteria {
    /// Criteria with every constraint unset (matches every train).
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to trains departing from the given city.
    pub fn departing_city(mut self, city: impl Into<String>) -> Self {
        self.departure_city = Some(city.into());
        self
    }

    /// Restrict to trains arriving in the given city.
    pub fn arriving_city(mut self, city: impl Into<String>) -> Self {
        self.arrival_city = Some(city.into());
        self
    }

    /// Restrict to trains departing at or after the given time.
    pub fn departing_from(mut self, from: NaiveDateTime) -> Self {
        self.departing_from = Some(from);
        self
    }

    /// Restrict to trains departing at or before the given time.
    pub fn departing_until(mut self, until: NaiveDateTime) -> Self {
        self.departing_until = Some(until);
        self
    }

    /// Restrict to trips of at most the given number of minutes.
    pub fn max_duration(mut self, minutes: i64) -> Self {
        self.max_duration_mins = Some(minutes);
        self
    }

    /// Restrict to trains whose endpoint stations are both open.
    pub fn open_stations_only(mut self) -> Self {
        self.open_stations_only = true;
        self
    }

    /// Compile the supplied criteria into an ordered predicate list.
    ///
    /// One predicate per supplied criterion; an absent criterion
    /// contributes nothing, which keeps "unset means unconstrained"
    /// uniform across the board.
    pub(crate) fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates: Vec<Predicate<'_>> = Vec::new();

        if let Some(city) = supplied(self.departure_city.as_deref()) {
            predicates.push(Box::new(move |c: &Candidate<'_>| {
                c.departure_station.city.eq_ignore_ascii_case(city)
            }));
        }

        if let Some(city) = supplied(self.arrival_city.as_deref()) {
            predicates.push(Box::new(move |c: &Candidate<'_>| {
                c.arrival_station.city.eq_ignore_ascii_case(city)
            }));
        }

        if let Some(from) = self.departing_from {
            // A train with no departure time is not disqualified.
            predicates.push(Box::new(move |c: &Candidate<'_>| {
                c.train.departure.is_none_or(|d| d >= from)
            }));
        }

        if let Some(until) = self.departing_until {
            predicates.push(Box::new(move |c: &Candidate<'_>| {
                c.train.departure.is_none_or(|d| d <= until)
            }));
        }

        if let Some(max) = self.max_duration_mins.filter(|m| *m > 0) {
            // Partial timestamps never disqualify here; only the strict
            // duration calculator treats them as errors.
            predicates.push(Box::new(move |c: &Candidate<'_>| {
                match (c.train.departure, c.train.arrival) {
                    (Some(dep), Some(arr)) => (arr - dep).num_minutes() <= max,
                    _ => true,
                }
            }));
        }

        if self.open_stations_only {
            predicates.push(Box::new(|c: &Candidate<'_>| {
                c.departure_station.is_open && c.arrival_station.is_open
            }));
        }

        predicates
    }
}

/// Treat blank strings as unset; query layers pass them through.
fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
