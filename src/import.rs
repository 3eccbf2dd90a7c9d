use serde_json::Value;

use crate::models::Station;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("le contenu n'est pas une liste d'enregistrements")]
    NotASequence,

    #[error("enregistrement {0}: objet attendu")]
    NotARecord(usize),

    #[error("enregistrement {0}: id numérique manquant")]
    MissingId(usize),

    #[error("enregistrement {index} invalide: {source}")]
    Invalid {
        index: usize,
        source: serde_json::Error,
    },
}

/// Bulk upsert of externally supplied records, keyed by `id`.
///
/// An existing station is patched field by field: only keys present in the
/// record overwrite, everything else keeps its prior value. Unknown ids
/// are appended verbatim as new stations. Records apply in order, so a
/// later record for the same id wins within one batch.
///
/// Validation is all-or-nothing: any malformed record aborts the merge and
/// leaves the collection exactly as it was.
pub fn merge(stations: &mut Vec<Station>, incoming: &Value) -> Result<usize, ImportError> {
    let records = incoming.as_array().ok_or(ImportError::NotASequence)?;

    // Build the merged collection aside; commit only once every record
    // has been accepted.
    let mut merged = stations.clone();

    for (index, record) in records.iter().enumerate() {
        let fields = record.as_object().ok_or(ImportError::NotARecord(index))?;

        let id = fields
            .get("id")
            .and_then(Value::as_i64)
            .ok_or(ImportError::MissingId(index))?;

        match merged.iter_mut().find(|s| s.id == id) {
            Some(existing) => {
                let mut patched = serde_json::to_value(&*existing)
                    .map_err(|source| ImportError::Invalid { index, source })?;

                if let Value::Object(ref mut base) = patched {
                    for (key, value) in fields {
                        base.insert(key.clone(), value.clone());
                    }
                }

                *existing = serde_json::from_value(patched)
                    .map_err(|source| ImportError::Invalid { index, source })?;
            }
            None => {
                let station = serde_json::from_value(record.clone())
                    .map_err(|source| ImportError::Invalid { index, source })?;

                merged.push(station);
            }
        }
    }

    let count = records.len();
    *stations = merged;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use crate::models::{Availability, Fuel, Station};

    use super::{merge, ImportError};

    fn station(id: i64, city: &str) -> Station {
        Station {
            id,
            name: format!("station_{}", id),
            city: city.to_string(),
            lat: 14.4,
            lon: -11.4,
            fuel: vec![Fuel::Essence],
            available: Availability {
                essence: true,
                gazole: false,
                gpl: false,
            },
            updated: Utc::now(),
        }
    }

    #[test]
    fn patches_only_fields_present_in_the_record() {
        let mut stations = vec![station(1, "Bamako"), station(2, "Kayes")];

        let count = merge(&mut stations, &json!([{"id": 2, "city": "NewCity"}])).unwrap();

        assert_eq!(count, 1);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].city, "NewCity");
        // Everything else on station 2 keeps its prior value.
        assert_eq!(stations[1].name, "station_2");
        assert_eq!(stations[1].fuel, vec![Fuel::Essence]);
        assert!(stations[1].available.essence);
    }

    #[test]
    fn appends_unknown_ids_as_new_stations() {
        let mut stations = vec![station(1, "Bamako")];

        let incoming = json!([{
            "id": 999,
            "name": "New",
            "city": "X",
            "fuel": ["essence"],
            "available": {"essence": true, "gazole": false, "gpl": false}
        }]);

        merge(&mut stations, &incoming).unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].id, 999);
        assert_eq!(stations[1].name, "New");
        assert!(stations[1].available.essence);
    }

    #[test]
    fn later_records_for_the_same_id_win() {
        let mut stations = vec![station(1, "Bamako")];

        let incoming = json!([
            {"id": 1, "city": "First"},
            {"id": 1, "city": "Second"}
        ]);

        merge(&mut stations, &incoming).unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].city, "Second");
    }

    #[test]
    fn remerging_the_same_batch_adds_no_duplicates() {
        let mut stations = vec![station(1, "Bamako")];

        let incoming = json!([
            {"id": 1, "city": "Patched"},
            {
                "id": 5,
                "name": "Nouvelle",
                "city": "Gao",
                "fuel": ["gazole"],
                "available": {"essence": false, "gazole": true, "gpl": false}
            }
        ]);

        merge(&mut stations, &incoming).unwrap();
        let once = stations.clone();

        merge(&mut stations, &incoming).unwrap();

        assert_eq!(stations, once);
        assert_eq!(stations.len(), 2);
    }

    #[test]
    fn rejects_payloads_that_are_not_sequences() {
        let mut stations = vec![station(1, "Bamako")];
        let snapshot = stations.clone();

        let result = merge(&mut stations, &json!({"id": 1}));

        assert!(matches!(result, Err(ImportError::NotASequence)));
        assert_eq!(stations, snapshot);
    }

    #[test]
    fn malformed_record_aborts_without_partial_merge() {
        let mut stations = vec![station(1, "Bamako")];
        let snapshot = stations.clone();

        // First record is fine, second lacks an id: nothing may apply.
        let incoming = json!([
            {"id": 1, "city": "Patched"},
            {"city": "NoId"}
        ]);

        let result = merge(&mut stations, &incoming);

        assert!(matches!(result, Err(ImportError::MissingId(1))));
        assert_eq!(stations, snapshot);
    }

    #[test]
    fn bad_field_value_aborts_without_partial_merge() {
        let mut stations = vec![station(1, "Bamako")];
        let snapshot = stations.clone();

        let incoming = json!([
            {"id": 1, "city": "Patched"},
            {"id": 1, "fuel": ["kerosene"]}
        ]);

        let result = merge(&mut stations, &incoming);

        assert!(matches!(result, Err(ImportError::Invalid { index: 1, .. })));
        assert_eq!(stations, snapshot);
    }
}
