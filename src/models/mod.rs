use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fuel types a station can be configured to sell. The recognized
/// vocabulary is closed; availability snapshots always cover all of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fuel {
    Essence,
    Gazole,
    Gpl,
}

impl Fuel {
    pub const ALL: [Fuel; 3] = [Fuel::Essence, Fuel::Gazole, Fuel::Gpl];

    pub fn label(&self) -> &'static str {
        match self {
            Fuel::Essence => "Essence",
            Fuel::Gazole => "Gazole",
            Fuel::Gpl => "GPL",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Fuel::Essence => "essence",
            Fuel::Gazole => "gazole",
            Fuel::Gpl => "gpl",
        }
    }

    pub fn from_key(key: &str) -> Option<Fuel> {
        match key.trim() {
            "essence" => Some(Fuel::Essence),
            "gazole" => Some(Fuel::Gazole),
            "gpl" => Some(Fuel::Gpl),
            _ => None,
        }
    }
}

/// Per-fuel stock snapshot. Every write carries exactly the three
/// recognized keys; unspecified types are false.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub essence: bool,
    #[serde(default)]
    pub gazole: bool,
    #[serde(default)]
    pub gpl: bool,
}

impl Availability {
    pub fn get(&self, fuel: Fuel) -> bool {
        match fuel {
            Fuel::Essence => self.essence,
            Fuel::Gazole => self.gazole,
            Fuel::Gpl => self.gpl,
        }
    }

    pub fn set(&mut self, fuel: Fuel, value: bool) {
        match fuel {
            Fuel::Essence => self.essence = value,
            Fuel::Gazole => self.gazole = value,
            Fuel::Gpl => self.gpl = value,
        }
    }
}

/// Derived stock status, never persisted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stock {
    Full,
    Partial,
    Empty,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    /// Types the station sells. Drives filter membership, independent of
    /// the current availability snapshot.
    #[serde(default)]
    pub fuel: Vec<Fuel>,
    #[serde(default)]
    pub available: Availability,
    #[serde(default = "Utc::now")]
    pub updated: DateTime<Utc>,
}

/// Append-only audit record of one applied availability change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "stationId")]
    pub station_id: i64,
    pub avail: Availability,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FuelFilter {
    #[default]
    All,
    Only(Fuel),
}

impl FuelFilter {
    /// Cycling order used by the filter key: tous -> essence -> gazole -> gpl.
    pub fn next(self) -> Self {
        match self {
            FuelFilter::All => FuelFilter::Only(Fuel::Essence),
            FuelFilter::Only(Fuel::Essence) => FuelFilter::Only(Fuel::Gazole),
            FuelFilter::Only(Fuel::Gazole) => FuelFilter::Only(Fuel::Gpl),
            FuelFilter::Only(Fuel::Gpl) => FuelFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FuelFilter::All => "tous",
            FuelFilter::Only(fuel) => fuel.key(),
        }
    }
}
