//! Fleet-wide station statistics.

use std::collections::HashMap;

use tracing::debug;

use crate::store::StationStore;

use super::StatsError;

/// The city hosting the most stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusiestCity {
    /// City name.
    pub city: String,

    /// Number of stations in that city.
    pub stations: u64,
}

/// Aggregates across every station in the network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStatistics {
    /// Total number of stations.
    pub total_stations: u64,

    /// Stations open for traffic.
    pub open_stations: u64,

    /// Stations closed for traffic.
    pub closed_stations: u64,

    /// Sum of track counts across all stations.
    pub total_tracks: u64,

    /// Mean track count, rounded to 2 decimal places; 0 with no stations.
    pub mean_tracks: f64,

    /// The city with the most stations, absent when there are none.
    ///
    /// Ties go to the first city to reach the maximum in station
    /// creation order.
    pub busiest_city: Option<BusiestCity>,

    /// Station count per city.
    pub stations_per_city: HashMap<String, u64>,
}

/// Compute fleet-wide statistics over all stations.
pub fn network_statistics<S: StationStore>(store: &S) -> Result<NetworkStatistics, StatsError> {
    let stations = store.all_stations()?;

    let total_stations = stations.len() as u64;
    let open_stations = stations.iter().filter(|s| s.is_open).count() as u64;
    let total_tracks: u64 = stations.iter().map(|s| u64::from(s.tracks)).sum();

    let mean_tracks = if stations.is_empty() {
        0.0
    } else {
        round2(total_tracks as f64 / stations.len() as f64)
    };

    // Group by city, remembering first-appearance order for the tie rule.
    let mut stations_per_city: HashMap<String, u64> = HashMap::new();
    let mut city_order: Vec<String> = Vec::new();
    for station in &stations {
        let count = stations_per_city.entry(station.city.clone()).or_insert(0);
        if *count == 0 {
            city_order.push(station.city.clone());
        }
        *count += 1;
    }

    let busiest_city = city_order
        .into_iter()
        .map(|city| {
            let stations = stations_per_city[&city];
            BusiestCity { city, stations }
        })
        // Strictly-greater keeps the earliest city on ties.
        .reduce(|best, next| if next.stations > best.stations { next } else { best });

    debug!(stations = total_stations, "computed network statistics");

    Ok(NetworkStatistics {
        total_stations,
        open_stations,
        closed_stations: total_stations - open_stations,
        total_tracks,
        mean_tracks,
        busiest_city,
        stations_per_city,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationDraft;
    use crate::store::MemoryStore;

    fn add(store: &MemoryStore, city: &str, tracks: u32, open: bool) {
        store
            .add_station(
                StationDraft::new("Station", city, Some(tracks), Some(open)).unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn empty_network_is_all_zeroes() {
        let store = MemoryStore::new();
        let stats = network_statistics(&store).unwrap();

        assert_eq!(stats.total_stations, 0);
        assert_eq!(stats.open_stations, 0);
        assert_eq!(stats.closed_stations, 0);
        assert_eq!(stats.total_tracks, 0);
        assert_eq!(stats.mean_tracks, 0.0);
        assert_eq!(stats.busiest_city, None);
        assert!(stats.stations_per_city.is_empty());
    }

    #[test]
    fn open_and_closed_sum_to_total() {
        let store = MemoryStore::new();
        add(&store, "Paris", 10, true);
        add(&store, "Lyon", 6, false);
        add(&store, "Lille", 4, true);

        let stats = network_statistics(&store).unwrap();
        assert_eq!(stats.total_stations, 3);
        assert_eq!(stats.open_stations, 2);
        assert_eq!(stats.closed_stations, 1);
        assert_eq!(stats.open_stations + stats.closed_stations, stats.total_stations);
    }

    #[test]
    fn mean_tracks_rounded_to_two_decimals() {
        let store = MemoryStore::new();
        add(&store, "Paris", 3, true);
        add(&store, "Lyon", 3, true);
        add(&store, "Lille", 4, true);

        // 10 / 3 = 3.333... -> 3.33
        let stats = network_statistics(&store).unwrap();
        assert_eq!(stats.total_tracks, 10);
        assert_eq!(stats.mean_tracks, 3.33);
    }

    #[test]
    fn busiest_city_by_station_count() {
        let store = MemoryStore::new();
        add(&store, "Lyon", 1, true);
        add(&store, "Paris", 1, true);
        add(&store, "Paris", 1, true);

        let stats = network_statistics(&store).unwrap();
        let busiest = stats.busiest_city.unwrap();
        assert_eq!(busiest.city, "Paris");
        assert_eq!(busiest.stations, 2);

        assert_eq!(stats.stations_per_city.get("Paris"), Some(&2));
        assert_eq!(stats.stations_per_city.get("Lyon"), Some(&1));
    }

    #[test]
    fn busiest_city_tie_goes_to_first_created() {
        let store = MemoryStore::new();
        add(&store, "Lyon", 1, true);
        add(&store, "Paris", 1, true);
        add(&store, "Paris", 1, true);
        add(&store, "Lyon", 1, true);

        let stats = network_statistics(&store).unwrap();
        assert_eq!(stats.busiest_city.unwrap().city, "Lyon");
    }
}
