//! The filtering pass over the train store.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Station, StationId, Train, TrainId};
use crate::store::{StationStore, StoreError, TrainStore};

use super::criteria::{Candidate, TrainCriteria};

/// Error from an advanced train search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A train references a station the store no longer has.
    #[error("train {train} references missing station {station}")]
    MissingEndpoint { train: TrainId, station: StationId },

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Run an advanced search over every train in the store.
///
/// Trains are returned in store enumeration order; the engine applies
/// no sort of its own. The result is exactly the set of trains
/// satisfying the conjunction of every supplied criterion.
pub fn search_trains<S>(store: &S, criteria: &TrainCriteria) -> Result<Vec<Train>, SearchError>
where
    S: TrainStore + StationStore,
{
    let predicates = criteria.predicates();
    let trains = store.all_trains()?;
    let candidate_count = trains.len();

    // Resolve each endpoint station once, however many trains share it.
    let mut stations: HashMap<StationId, Station> = HashMap::new();
    for train in &trains {
        for id in [train.departure_station, train.arrival_station] {
            if !stations.contains_key(&id) {
                let station = store.station(id)?.ok_or(SearchError::MissingEndpoint {
                    train: train.id,
                    station: id,
                })?;
                stations.insert(id, station);
            }
        }
    }

    let matches: Vec<Train> = trains
        .into_iter()
        .filter(|train| {
            let candidate = Candidate {
                train,
                departure_station: &stations[&train.departure_station],
                arrival_station: &stations[&train.arrival_station],
            };
            predicates.iter().all(|keep| keep(&candidate))
        })
        .collect();

    debug!(
        criteria = predicates.len(),
        matched = matches.len(),
        candidates = candidate_count,
        "train search complete"
    );

    Ok(matches)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{StationDraft, TrainDraft};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Minutes-after-midnight pairs with departure strictly first.
    fn schedule() -> impl Strategy<Value = (u32, u32)> {
        (0u32..1200, 1u32..240).prop_map(|(start, len)| (start, start + len))
    }

    fn populated_store(schedules: &[(u32, u32)]) -> MemoryStore {
        let store = MemoryStore::new();
        let paris = store
            .add_station(StationDraft::new("Nord", "Paris", None, None).unwrap())
            .unwrap()
            .id;
        let lyon = store
            .add_station(StationDraft::new("Part-Dieu", "Lyon", None, None).unwrap())
            .unwrap()
            .id;

        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        for (i, (dep, arr)) in schedules.iter().enumerate() {
            let dep = day.and_hms_opt(dep / 60, dep % 60, 0).unwrap();
            let arr = day.and_hms_opt(arr / 60, arr % 60, 0).unwrap();
            store
                .add_train(
                    TrainDraft::new(&format!("T-{i}"), Some(dep), Some(arr), paris, lyon)
                        .unwrap(),
                )
                .unwrap();
        }
        store
    }

    proptest! {
        /// No criteria: membership and order match the store enumeration.
        #[test]
        fn unconstrained_search_is_identity(schedules in prop::collection::vec(schedule(), 0..20)) {
            let store = populated_store(&schedules);
            let result = search_trains(&store, &TrainCriteria::any()).unwrap();
            prop_assert_eq!(result, store.all_trains().unwrap());
        }

        /// The duration criterion keeps exactly the trains within bound,
        /// preserving enumeration order.
        #[test]
        fn duration_bound_matches_manual_filter(
            schedules in prop::collection::vec(schedule(), 0..20),
            max in 1i64..240,
        ) {
            let store = populated_store(&schedules);
            let criteria = TrainCriteria::any().max_duration(max);
            let result = search_trains(&store, &criteria).unwrap();

            let expected: Vec<Train> = store
                .all_trains()
                .unwrap()
                .into_iter()
                .filter(|t| {
                    (t.arrival.unwrap() - t.departure.unwrap()).num_minutes() <= max
                })
                .collect();
            prop_assert_eq!(result, expected);
        }
    }
}
