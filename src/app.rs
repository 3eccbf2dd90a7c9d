use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Utc};

use crate::models::{Availability, Fuel, FuelFilter, Station};
use crate::storage::Storage;
use crate::store::{self, Store};
use crate::{import, report, view};

const TOAST_DURATION: Duration = Duration::from_millis(2200);

/// Owns the single mutable station collection. Every handler runs to
/// completion before the next one starts, so reads and writes never
/// interleave; the collection is persisted after each mutation. Failures
/// become toasts and log entries, never panics.
pub struct App<S: Storage> {
    store: Store<S>,

    stations: Vec<Station>,
    filter: FuelFilter,
    toast: Option<(String, Instant)>,
    last_refresh: DateTime<Local>,
}

impl<S: Storage> App<S> {
    pub async fn new(store: Store<S>) -> anyhow::Result<Self> {
        store.ensure_seeded().await?;

        let stations = store.load().await;

        Ok(Self {
            store,
            stations,
            filter: FuelFilter::default(),
            toast: None,
            last_refresh: Local::now(),
        })
    }

    /// The only legitimate source of the rendered subset; both the map and
    /// the table draw from this, never from their own filtering.
    pub fn filtered(&self) -> Vec<Station> {
        view::filtered(&self.stations, self.filter)
    }

    pub fn filter(&self) -> FuelFilter {
        self.filter
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
    }

    pub fn last_refresh(&self) -> DateTime<Local> {
        self.last_refresh
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|(_, shown)| shown.elapsed() < TOAST_DURATION)
            .map(|(msg, _)| msg.as_str())
    }

    /// Re-reads the persisted collection, discarding the in-memory copy.
    pub async fn refresh(&mut self) {
        self.stations = self.store.load().await;
        self.last_refresh = Local::now();
        self.toast("Liste rafraîchie");
    }

    /// Applies a free-text availability report to one station. The text is
    /// parsed at this boundary; the processor only sees the typed snapshot.
    pub async fn submit_report(&mut self, station_id: i64, text: &str) {
        let Some(avail) = report::parse_report(text) else {
            self.toast("Signalement abandonné");
            return;
        };

        match report::apply(&mut self.stations, station_id, avail, Utc::now()) {
            Ok(audit) => {
                if !self.persist().await {
                    return;
                }

                if let Err(e) = self.store.append_report(audit).await {
                    log::error!("append report failed: {}", e);
                    self.toast("Sauvegarde du signalement impossible");
                    return;
                }

                self.toast("Signalement enregistré (local)");
            }
            Err(e) => self.toast(e.to_string()),
        }
    }

    /// Operator-entered station at the given map coordinates. The initial
    /// snapshot marks each configured fuel as in stock.
    pub async fn add_station(&mut self, name: &str, city: &str, fuels: &str, lat: f64, lon: f64) {
        if name.trim().is_empty() {
            self.toast("Nom requis, station abandonnée");
            return;
        }

        let fuel = parse_fuels(fuels);

        let mut available = Availability::default();
        for f in &fuel {
            available.set(*f, true);
        }

        let city = city.trim();

        self.stations.push(Station {
            id: store::next_id(&self.stations),
            name: name.trim().to_string(),
            city: if city.is_empty() { "—" } else { city }.to_string(),
            lat,
            lon,
            fuel,
            available,
            updated: Utc::now(),
        });

        if self.persist().await {
            self.toast("Nouvelle station ajoutée");
        }
    }

    /// Bulk import entry point: JSON text in, merger semantics, re-render
    /// picked up by the next draw.
    pub async fn import(&mut self, text: &str) {
        let payload: serde_json::Value = match serde_json::from_str(text) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("import payload unparseable: {}", e);
                self.toast("Import invalide: JSON attendu");
                return;
            }
        };

        match import::merge(&mut self.stations, &payload) {
            Ok(count) => {
                if self.persist().await {
                    self.toast(format!("Import: {} enregistrement(s)", count));
                }
            }
            Err(e) => self.toast(format!("Import refusé: {}", e)),
        }
    }

    fn toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), Instant::now()));
    }

    /// Save failures are surfaced but leave the in-memory collection
    /// intact; the next successful mutation persists everything.
    async fn persist(&mut self) -> bool {
        match self.store.save(&self.stations).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("save stations failed: {}", e);
                self.toast("Sauvegarde impossible");
                false
            }
        }
    }
}

/// Comma-separated fuel tags, e.g. `essence,gazole`. Unknown tags are
/// dropped; an empty list falls back to essence.
fn parse_fuels(text: &str) -> Vec<Fuel> {
    let fuels: Vec<Fuel> = text.split(',').filter_map(Fuel::from_key).collect();

    if fuels.is_empty() {
        vec![Fuel::Essence]
    } else {
        fuels
    }
}
