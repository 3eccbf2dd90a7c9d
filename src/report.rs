use chrono::{DateTime, Utc};

use crate::models::{Availability, Report, Station};

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ReportError {
    /// The reported station id matches nothing in the collection.
    #[error("station {0} introuvable")]
    NotFound(i64),
}

/// Parses the captured free-text report format: comma-delimited
/// `fuel=value` pairs, e.g. `essence=oui,gazole=non,gpl=non`.
///
/// A value counts as affirmative iff, trimmed and lowercased, it starts
/// with `o` (oui/o); anything else is false. Unknown keys and keys without
/// a paired value are ignored. The result always carries exactly the three
/// recognized fuel types, omitted ones defaulting to false. Blank input is
/// an abandoned report and yields `None`.
///
/// This runs at the presentation boundary; the processor itself only
/// accepts the typed snapshot.
pub fn parse_report(text: &str) -> Option<Availability> {
    if text.trim().is_empty() {
        return None;
    }

    let mut avail = Availability::default();

    for pair in text.split(',') {
        let mut parts = pair.splitn(2, '=');

        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };

        let value = value.trim().to_lowercase().starts_with('o');

        match key.trim() {
            "essence" => avail.essence = value,
            "gazole" => avail.gazole = value,
            "gpl" => avail.gpl = value,
            _ => {}
        }
    }

    Some(avail)
}

/// Applies one availability report to the matching station: the snapshot
/// replaces the previous one wholesale and `updated` is stamped with `at`.
/// Returns the audit record; appending it to the log and persisting the
/// collection is the caller's responsibility.
pub fn apply(
    stations: &mut [Station],
    station_id: i64,
    avail: Availability,
    at: DateTime<Utc>,
) -> Result<Report, ReportError> {
    let station = stations
        .iter_mut()
        .find(|s| s.id == station_id)
        .ok_or(ReportError::NotFound(station_id))?;

    station.available = avail;
    station.updated = at;

    Ok(Report {
        station_id,
        avail,
        at,
    })
}
