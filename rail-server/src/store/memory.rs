//! In-memory store.
//!
//! Backs both store traits with id-ordered maps behind a single lock.
//! Ids are allocated monotonically, so ascending-id iteration is
//! creation order.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::domain::{Station, StationDraft, StationId, Train, TrainDraft, TrainId};

use super::{StationStore, StoreError, TrainStore};

#[derive(Debug, Default)]
struct Inner {
    stations: BTreeMap<u64, Station>,
    trains: BTreeMap<u64, Train>,
    next_station_id: u64,
    next_train_id: u64,
}

/// In-memory implementation of [`StationStore`] and [`TrainStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::poisoned())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::poisoned())
    }

    fn stations_where(
        &self,
        keep: impl Fn(&Station) -> bool,
    ) -> Result<Vec<Station>, StoreError> {
        let guard = self.read()?;
        Ok(guard.stations.values().filter(|s| keep(s)).cloned().collect())
    }

    fn trains_where(&self, keep: impl Fn(&Train) -> bool) -> Result<Vec<Train>, StoreError> {
        let guard = self.read()?;
        Ok(guard.trains.values().filter(|t| keep(t)).cloned().collect())
    }
}

impl StationStore for MemoryStore {
    fn station(&self, id: StationId) -> Result<Option<Station>, StoreError> {
        let guard = self.read()?;
        Ok(guard.stations.get(&id.value()).cloned())
    }

    fn all_stations(&self) -> Result<Vec<Station>, StoreError> {
        self.stations_where(|_| true)
    }

    fn stations_in_city(&self, city: &str) -> Result<Vec<Station>, StoreError> {
        self.stations_where(|s| s.city == city)
    }

    fn stations_named(&self, fragment: &str) -> Result<Vec<Station>, StoreError> {
        let fragment = fragment.to_lowercase();
        self.stations_where(|s| s.name.to_lowercase().contains(&fragment))
    }

    fn open_stations(&self) -> Result<Vec<Station>, StoreError> {
        self.stations_where(|s| s.is_open)
    }

    fn add_station(&self, draft: StationDraft) -> Result<Station, StoreError> {
        let mut guard = self.write()?;
        guard.next_station_id += 1;
        let id = StationId::new(guard.next_station_id);
        let station = Station::from_draft(id, draft);
        guard.stations.insert(id.value(), station.clone());
        Ok(station)
    }

    fn update_station(
        &self,
        id: StationId,
        draft: StationDraft,
    ) -> Result<Option<Station>, StoreError> {
        let mut guard = self.write()?;
        if !guard.stations.contains_key(&id.value()) {
            return Ok(None);
        }
        let station = Station::from_draft(id, draft);
        guard.stations.insert(id.value(), station.clone());
        Ok(Some(station))
    }

    fn delete_station(&self, id: StationId) -> Result<bool, StoreError> {
        let mut guard = self.write()?;
        if guard.stations.remove(&id.value()).is_none() {
            return Ok(false);
        }
        // Trains referencing the station go with it.
        guard.trains.retain(|_, t| !t.touches(id));
        Ok(true)
    }

    fn station_count(&self) -> Result<u64, StoreError> {
        let guard = self.read()?;
        Ok(guard.stations.len() as u64)
    }

    fn station_exists(&self, id: StationId) -> Result<bool, StoreError> {
        let guard = self.read()?;
        Ok(guard.stations.contains_key(&id.value()))
    }
}

impl TrainStore for MemoryStore {
    fn train(&self, id: TrainId) -> Result<Option<Train>, StoreError> {
        let guard = self.read()?;
        Ok(guard.trains.get(&id.value()).cloned())
    }

    fn all_trains(&self) -> Result<Vec<Train>, StoreError> {
        self.trains_where(|_| true)
    }

    fn trains_between_cities(
        &self,
        departure_city: &str,
        arrival_city: &str,
    ) -> Result<Vec<Train>, StoreError> {
        let guard = self.read()?;
        let city_of = |id: StationId| guard.stations.get(&id.value()).map(|s| s.city.as_str());
        Ok(guard
            .trains
            .values()
            .filter(|t| {
                city_of(t.departure_station) == Some(departure_city)
                    && city_of(t.arrival_station) == Some(arrival_city)
            })
            .cloned()
            .collect())
    }

    fn trains_numbered(&self, fragment: &str) -> Result<Vec<Train>, StoreError> {
        let fragment = fragment.to_lowercase();
        self.trains_where(|t| t.number.to_lowercase().contains(&fragment))
    }

    fn trains_departing_between(
        &self,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<Vec<Train>, StoreError> {
        self.trains_where(|t| t.departure.is_some_and(|d| d >= from && d <= until))
    }

    fn trains_touching(&self, station: StationId) -> Result<Vec<Train>, StoreError> {
        self.trains_where(|t| t.touches(station))
    }

    fn add_train(&self, draft: TrainDraft) -> Result<Train, StoreError> {
        let mut guard = self.write()?;
        guard.next_train_id += 1;
        let id = TrainId::new(guard.next_train_id);
        let train = Train::from_draft(id, draft);
        guard.trains.insert(id.value(), train.clone());
        Ok(train)
    }

    fn update_train(&self, id: TrainId, draft: TrainDraft) -> Result<Option<Train>, StoreError> {
        let mut guard = self.write()?;
        if !guard.trains.contains_key(&id.value()) {
            return Ok(None);
        }
        let train = Train::from_draft(id, draft);
        guard.trains.insert(id.value(), train.clone());
        Ok(Some(train))
    }

    fn delete_train(&self, id: TrainId) -> Result<bool, StoreError> {
        let mut guard = self.write()?;
        Ok(guard.trains.remove(&id.value()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn add_station(store: &MemoryStore, name: &str, city: &str) -> Station {
        store
            .add_station(StationDraft::new(name, city, None, None).unwrap())
            .unwrap()
    }

    fn add_train(
        store: &MemoryStore,
        number: &str,
        dep: Option<NaiveDateTime>,
        arr: Option<NaiveDateTime>,
        from: StationId,
        to: StationId,
    ) -> Train {
        store
            .add_train(TrainDraft::new(number, dep, arr, from, to).unwrap())
            .unwrap()
    }

    #[test]
    fn ids_allocated_sequentially() {
        let store = MemoryStore::new();
        let a = add_station(&store, "Nord", "Paris");
        let b = add_station(&store, "Est", "Paris");
        assert_eq!(a.id, StationId::new(1));
        assert_eq!(b.id, StationId::new(2));
    }

    #[test]
    fn enumeration_is_creation_order() {
        let store = MemoryStore::new();
        add_station(&store, "Nord", "Paris");
        add_station(&store, "Part-Dieu", "Lyon");
        add_station(&store, "Est", "Paris");

        let names: Vec<_> = store
            .all_stations()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Nord", "Part-Dieu", "Est"]);
    }

    #[test]
    fn city_lookup_is_exact() {
        let store = MemoryStore::new();
        add_station(&store, "Nord", "Paris");
        add_station(&store, "Part-Dieu", "Lyon");

        assert_eq!(store.stations_in_city("Paris").unwrap().len(), 1);
        // Exact match, like the original column equality.
        assert!(store.stations_in_city("paris").unwrap().is_empty());
    }

    #[test]
    fn name_lookup_is_substring_case_insensitive() {
        let store = MemoryStore::new();
        add_station(&store, "Gare du Nord", "Paris");
        add_station(&store, "Gare de l'Est", "Paris");

        let hits = store.stations_named("NORD").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Gare du Nord");

        assert_eq!(store.stations_named("gare").unwrap().len(), 2);
    }

    #[test]
    fn open_stations_filtered() {
        let store = MemoryStore::new();
        add_station(&store, "Nord", "Paris");
        store
            .add_station(StationDraft::new("Closed", "Paris", None, Some(false)).unwrap())
            .unwrap();

        let open = store.open_stations().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].name, "Nord");
    }

    #[test]
    fn update_missing_station_is_none() {
        let store = MemoryStore::new();
        let draft = StationDraft::new("Nord", "Paris", None, None).unwrap();
        assert_eq!(store.update_station(StationId::new(99), draft).unwrap(), None);
    }

    #[test]
    fn count_and_exists_agree_with_contents() {
        let store = MemoryStore::new();
        assert_eq!(store.station_count().unwrap(), 0);

        let a = add_station(&store, "Nord", "Paris");
        assert_eq!(store.station_count().unwrap(), 1);
        assert!(store.station_exists(a.id).unwrap());
        assert!(!store.station_exists(StationId::new(99)).unwrap());

        assert!(store.delete_station(a.id).unwrap());
        assert_eq!(store.station_count().unwrap(), 0);
        assert!(!store.delete_station(a.id).unwrap());
    }

    #[test]
    fn deleting_station_removes_dependent_trains() {
        let store = MemoryStore::new();
        let paris = add_station(&store, "Nord", "Paris");
        let lyon = add_station(&store, "Part-Dieu", "Lyon");
        let lille = add_station(&store, "Flandres", "Lille");

        add_train(&store, "A", None, None, paris.id, lyon.id);
        add_train(&store, "B", None, None, lyon.id, paris.id);
        let survivor = add_train(&store, "C", None, None, lyon.id, lille.id);

        assert!(store.delete_station(paris.id).unwrap());

        let remaining = store.all_trains().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);
    }

    #[test]
    fn trains_between_cities_matches_exact_pair() {
        let store = MemoryStore::new();
        let paris = add_station(&store, "Nord", "Paris");
        let lyon = add_station(&store, "Part-Dieu", "Lyon");

        let out = add_train(&store, "A", None, None, paris.id, lyon.id);
        add_train(&store, "B", None, None, lyon.id, paris.id);

        let hits = store.trains_between_cities("Paris", "Lyon").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, out.id);
    }

    #[test]
    fn departure_range_bounds_inclusive() {
        let store = MemoryStore::new();
        let paris = add_station(&store, "Nord", "Paris");
        let lyon = add_station(&store, "Part-Dieu", "Lyon");

        let at_start = add_train(
            &store,
            "A",
            Some(ts(15, 8, 0)),
            Some(ts(15, 10, 0)),
            paris.id,
            lyon.id,
        );
        let at_end = add_train(
            &store,
            "B",
            Some(ts(15, 12, 0)),
            Some(ts(15, 14, 0)),
            paris.id,
            lyon.id,
        );
        add_train(
            &store,
            "C",
            Some(ts(15, 12, 1)),
            Some(ts(15, 14, 0)),
            paris.id,
            lyon.id,
        );
        add_train(&store, "D", None, None, paris.id, lyon.id);

        let hits = store
            .trains_departing_between(ts(15, 8, 0), ts(15, 12, 0))
            .unwrap();
        let ids: Vec<_> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, [at_start.id, at_end.id]);
    }

    #[test]
    fn touching_counts_a_loop_train_once() {
        let store = MemoryStore::new();
        let paris = add_station(&store, "Nord", "Paris");
        let lyon = add_station(&store, "Part-Dieu", "Lyon");

        add_train(&store, "LOOP", None, None, paris.id, paris.id);
        add_train(&store, "OUT", None, None, paris.id, lyon.id);
        add_train(&store, "FAR", None, None, lyon.id, lyon.id);

        let touching = store.trains_touching(paris.id).unwrap();
        assert_eq!(touching.len(), 2);
    }

    #[test]
    fn train_number_lookup_case_insensitive() {
        let store = MemoryStore::new();
        let paris = add_station(&store, "Nord", "Paris");
        let lyon = add_station(&store, "Part-Dieu", "Lyon");
        add_train(&store, "TGV-6601", None, None, paris.id, lyon.id);
        add_train(&store, "IC-203", None, None, paris.id, lyon.id);

        assert_eq!(store.trains_numbered("tgv").unwrap().len(), 1);
        assert_eq!(store.trains_numbered("0").unwrap().len(), 2);
    }
}
