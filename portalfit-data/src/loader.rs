//! Read one recruiting cycle's tables into a [`Snapshot`].

use std::io::BufReader;

use camino::Utf8Path;
use log::{info, warn};
use portalfit_core::{CandidateRecord, ExternalRating, RosterEntry, Snapshot, TeamSeasonRecord};
use serde_json::{Map, Value};

use crate::fs::open_if_present;
use crate::{DatasetError, DatasetLayout};

type Row = Map<String, Value>;

const CANDIDATES: &str = "candidates";
const TEAM_DATA: &str = "team data";
const ROSTER: &str = "roster";
const RATINGS: &str = "ratings";

/// Load every table described by `layout`.
///
/// Candidates, the program roster and the target season's team data are
/// required. Earlier team-data seasons and the reputation table are
/// optional; a missing optional table is logged and treated as empty.
///
/// # Errors
/// Returns [`DatasetError::OpenTable`] when a required table is missing or
/// unreadable and [`DatasetError::ParseTable`] when a table is not a JSON
/// array of objects.
pub fn load_snapshot(layout: &DatasetLayout) -> Result<Snapshot, DatasetError> {
    let season = layout.season();

    let candidates_path = layout.candidates_path();
    let candidates = required_rows(CANDIDATES, &candidates_path)?
        .into_iter()
        .map(|row| CandidateRecord::from_source(row, season))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| parse_error(CANDIDATES, &candidates_path, source))?;

    let mut team_seasons = Vec::new();
    for year in layout.history_years() {
        let path = layout.team_data_path(year);
        let rows = if year == season {
            required_rows(TEAM_DATA, &path)?
        } else {
            optional_rows(TEAM_DATA, &path)?
        };
        team_seasons.extend(
            rows.iter()
                .map(|row| TeamSeasonRecord::from_source(row, year)),
        );
    }

    let roster_path = layout.roster_path();
    let roster = required_rows(ROSTER, &roster_path)?
        .into_iter()
        .map(RosterEntry::from_source)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| parse_error(ROSTER, &roster_path, source))?;

    let ratings_path = layout.ratings_path();
    let ratings = optional_rows(RATINGS, &ratings_path)?
        .into_iter()
        .map(|row| serde_json::from_value::<ExternalRating>(Value::Object(row)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| parse_error(RATINGS, &ratings_path, source))?;

    info!(
        "loaded {} candidates, {} roster entries, {} team-seasons and {} ratings for {} {}",
        candidates.len(),
        roster.len(),
        team_seasons.len(),
        ratings.len(),
        layout.program(),
        season
    );
    Ok(Snapshot::new(layout.program(), season)
        .with_candidates(candidates)
        .with_roster(roster)
        .with_team_seasons(team_seasons)
        .with_ratings(ratings))
}

fn parse_error(table: &'static str, path: &Utf8Path, source: serde_json::Error) -> DatasetError {
    DatasetError::ParseTable {
        table,
        path: path.to_path_buf(),
        source,
    }
}

fn read_rows(table: &'static str, path: &Utf8Path) -> Result<Option<Vec<Row>>, DatasetError> {
    let file = open_if_present(path).map_err(|source| DatasetError::OpenTable {
        table,
        path: path.to_path_buf(),
        source,
    })?;
    let Some(handle) = file else {
        return Ok(None);
    };
    let rows = serde_json::from_reader(BufReader::new(handle))
        .map_err(|source| parse_error(table, path, source))?;
    Ok(Some(rows))
}

fn required_rows(table: &'static str, path: &Utf8Path) -> Result<Vec<Row>, DatasetError> {
    read_rows(table, path)?.ok_or_else(|| DatasetError::OpenTable {
        table,
        path: path.to_path_buf(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })
}

fn optional_rows(table: &'static str, path: &Utf8Path) -> Result<Vec<Row>, DatasetError> {
    Ok(read_rows(table, path)?.unwrap_or_else(|| {
        warn!("optional {table} table {path} is missing; treating it as empty");
        Vec::new()
    }))
}
