use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;

use crate::models::{Availability, Fuel, Report, Station};
use crate::storage::Storage;

/// Storage keys are versioned by name: schema changes move to a new key
/// and abandon the old data instead of migrating it.
pub const STATIONS_KEY: &str = "carbustations_v2";
pub const REPORTS_KEY: &str = "carbureports_v1";

/// Authoritative access to the persisted station collection and the
/// append-only report log.
pub struct Store<S> {
    storage: S,
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Writes the fixed seed dataset, but only when the stations key has
    /// never been written. A persisted empty collection stays empty.
    pub async fn ensure_seeded(&self) -> anyhow::Result<()> {
        if self.storage.get(STATIONS_KEY).await?.is_none() {
            self.save(&seed()).await?;
        }

        Ok(())
    }

    /// Loads the station collection. Absent or unreadable data degrades to
    /// an empty collection; the persisted value is left untouched until
    /// the next explicit save.
    pub async fn load(&self) -> Vec<Station> {
        load_collection(&self.storage, STATIONS_KEY).await
    }

    /// Persists the full collection, replacing prior contents.
    pub async fn save(&self, stations: &[Station]) -> anyhow::Result<()> {
        let value = serde_json::to_string(stations)?;

        self.storage.put(STATIONS_KEY, value).await
    }

    pub async fn load_reports(&self) -> Vec<Report> {
        load_collection(&self.storage, REPORTS_KEY).await
    }

    /// Appends one audit record to the report log. Records are never
    /// rewritten; the log only grows.
    pub async fn append_report(&self, report: Report) -> anyhow::Result<()> {
        let mut reports = self.load_reports().await;
        reports.push(report);

        let value = serde_json::to_string(&reports)?;

        self.storage.put(REPORTS_KEY, value).await
    }
}

/// Next free station id: `max(existing) + 1`, starting at 1. Unique under
/// the single-writer model; no concurrent-writer protection is needed.
pub fn next_id(stations: &[Station]) -> i64 {
    stations.iter().map(|s| s.id).max().unwrap_or(0) + 1
}

async fn load_collection<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Vec<T> {
    match storage.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("unreadable collection under '{}': {}", key, e);
                vec![]
            }
        },
        Ok(None) => vec![],
        Err(e) => {
            log::warn!("load '{}' failed: {}", key, e);
            vec![]
        }
    }
}

fn seed() -> Vec<Station> {
    vec![
        Station {
            id: 1,
            name: "Station Bamako Nord".to_string(),
            city: "Bamako".to_string(),
            lat: 12.6561,
            lon: -8.0,
            fuel: vec![Fuel::Essence, Fuel::Gazole],
            available: Availability {
                essence: true,
                gazole: false,
                gpl: false,
            },
            updated: Utc.with_ymd_and_hms(2025, 11, 7, 8, 0, 0).unwrap(),
        },
        Station {
            id: 2,
            name: "Station Sikasso Centrale".to_string(),
            city: "Sikasso".to_string(),
            lat: 11.317,
            lon: -5.666,
            fuel: vec![Fuel::Essence],
            available: Availability::default(),
            updated: Utc.with_ymd_and_hms(2025, 11, 6, 14, 30, 0).unwrap(),
        },
        Station {
            id: 3,
            name: "Station Kayes".to_string(),
            city: "Kayes".to_string(),
            lat: 14.447,
            lon: -11.435,
            fuel: vec![Fuel::Gazole, Fuel::Essence],
            available: Availability {
                essence: true,
                gazole: true,
                gpl: false,
            },
            updated: Utc.with_ymd_and_hms(2025, 11, 7, 5, 10, 0).unwrap(),
        },
        Station {
            id: 4,
            name: "Station Mopti Ouest".to_string(),
            city: "Mopti".to_string(),
            lat: 14.491,
            lon: -4.176,
            fuel: vec![Fuel::Gazole],
            available: Availability {
                essence: false,
                gazole: true,
                gpl: false,
            },
            updated: Utc.with_ymd_and_hms(2025, 11, 5, 9, 0, 0).unwrap(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::models::{Availability, Report, Station};
    use crate::storage::Memory;

    use super::{next_id, seed, Store, REPORTS_KEY, STATIONS_KEY};

    fn station(id: i64) -> Station {
        Station {
            id,
            name: format!("station_{}", id),
            city: "Bamako".to_string(),
            lat: 12.0,
            lon: -8.0,
            fuel: vec![],
            available: Availability::default(),
            updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn seeds_on_first_run_only() {
        let store = Store::new(Memory::default());

        store.ensure_seeded().await.unwrap();
        assert_eq!(store.load().await.len(), 4);

        // An explicitly emptied collection must survive restarts.
        store.save(&[]).await.unwrap();
        store.ensure_seeded().await.unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_survives_corrupt_data() {
        let storage = Memory::default();
        storage.insert_raw(STATIONS_KEY, "{not json");

        let store = Store::new(storage.clone());

        assert!(store.load().await.is_empty());
        // Persisted value untouched until the next explicit save.
        assert_eq!(storage.raw(STATIONS_KEY).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let store = Store::new(Memory::default());
        let stations = vec![station(1), station(7)];

        store.save(&stations).await.unwrap();

        assert_eq!(store.load().await, stations);
    }

    #[tokio::test]
    async fn report_log_only_grows() {
        let store = Store::new(Memory::default());

        for id in [2, 2, 3] {
            let report = Report {
                station_id: id,
                avail: Availability::default(),
                at: Utc::now(),
            };

            store.append_report(report).await.unwrap();
        }

        let reports = store.load_reports().await;
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].station_id, 3);
    }

    #[tokio::test]
    async fn save_failure_leaves_memory_state_usable() {
        let store = Store::new(Memory::failing_writes());

        assert!(store.save(&[station(1)]).await.is_err());
        assert!(store.load().await.is_empty());
    }

    #[test]
    fn next_id_is_always_fresh() {
        assert_eq!(next_id(&[]), 1);
        assert_eq!(next_id(&seed()), 5);

        let stations = vec![station(7), station(2)];
        let id = next_id(&stations);
        assert!(stations.iter().all(|s| s.id != id));
        assert_eq!(id, 8);
    }

    #[tokio::test]
    async fn report_key_is_separate_from_stations() {
        let storage = Memory::default();
        let store = Store::new(storage.clone());

        store.ensure_seeded().await.unwrap();
        store
            .append_report(Report {
                station_id: 1,
                avail: Availability::default(),
                at: Utc::now(),
            })
            .await
            .unwrap();

        assert!(storage.raw(STATIONS_KEY).is_some());
        assert!(storage.raw(REPORTS_KEY).is_some());
    }
}
