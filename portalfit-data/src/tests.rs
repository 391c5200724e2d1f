//! Unit coverage for dataset loading and snapshot persistence.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use portalfit_core::{CandidateRecord, CompositeRecord, FitScore, PositionBucket};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::{DatasetError, DatasetLayout, load_snapshot, write_snapshot};

struct DataDir {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl DataDir {
    fn write(&self, name: &str, value: &Value) {
        std::fs::write(self.root.join(name), value.to_string()).expect("write table");
    }

    fn layout(&self) -> DatasetLayout {
        DatasetLayout::new(self.root.clone(), "Illinois", 2025).with_history_seasons(2)
    }
}

#[fixture]
fn data_dir() -> DataDir {
    let temp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
    let dir = DataDir { _temp: temp, root };
    dir.write(
        "transfer-players-2026.json",
        &json!([
            {"player": "Kylan Boswell", "team": "Arizona", "role": "Combo G", "g": 31, "bpm": 3.4},
            {"player": "Tomislav Ivisic", "team": "Kentucky", "role": "C", "g": "n/a"}
        ]),
    );
    dir.write(
        "team-data-2025.json",
        &json!([
            {"team": "Illinois", "adjT": 70.1, "barthag": 0.93},
            {"team": "Arizona", "year": 2025, "adjT": 69.2, "barthag": 0.91}
        ]),
    );
    dir.write(
        "illinois-roster-2025.json",
        &json!([
            {"name": "Terrence Shannon", "role": "Wing G", "minPct": "78.1", "leftAfterSeason": true}
        ]),
    );
    dir
}

#[rstest]
fn loads_required_tables_and_skips_missing_optional_ones(data_dir: DataDir) {
    let snapshot = load_snapshot(&data_dir.layout()).expect("load snapshot");

    assert_eq!(snapshot.program, "Illinois");
    assert_eq!(snapshot.season, 2025);
    assert_eq!(snapshot.candidates.len(), 2);
    assert_eq!(snapshot.team_seasons.len(), 2);
    assert!(snapshot.team_seasons.iter().all(|row| row.season == 2025));
    assert_eq!(snapshot.roster.len(), 1);
    assert!(snapshot.ratings.is_empty());

    let center = snapshot.candidates.get(1).expect("second candidate");
    assert_eq!(center.position, PositionBucket::Center);
    assert_eq!(center.games, None);
}

#[rstest]
fn earlier_seasons_take_the_file_year(data_dir: DataDir) {
    data_dir.write("team-data-2024.json", &json!([{"team": "Illinois", "adjT": 66.0}]));
    data_dir.write(
        "transfers-247sports-2026.json",
        &json!([{"name": "Kylan Boswell", "rating": "0.91", "status": "Committed"}]),
    );

    let snapshot = load_snapshot(&data_dir.layout()).expect("load snapshot");

    let seasons: Vec<u16> = snapshot.team_seasons.iter().map(|row| row.season).collect();
    assert_eq!(seasons, vec![2024, 2025, 2025]);
    let rating = snapshot.ratings.first().expect("rating row");
    assert_eq!(rating.rating.value(), Some(0.91));
    assert_eq!(rating.status.as_deref(), Some("Committed"));
}

#[rstest]
fn missing_candidates_are_an_open_error(data_dir: DataDir) {
    std::fs::remove_file(data_dir.root.join("transfer-players-2026.json")).expect("remove table");

    let error = load_snapshot(&data_dir.layout()).expect_err("candidates are required");

    assert!(matches!(
        error,
        DatasetError::OpenTable { table: "candidates", .. }
    ));
}

#[rstest]
fn non_array_tables_are_parse_errors(data_dir: DataDir) {
    data_dir.write("illinois-roster-2025.json", &json!({"players": []}));

    let error = load_snapshot(&data_dir.layout()).expect_err("roster must be an array");

    assert!(matches!(error, DatasetError::ParseTable { table: "roster", .. }));
}

fn record(name: &str, fit: f64) -> CompositeRecord {
    CompositeRecord {
        candidate: CandidateRecord::new(name, "Iowa", "Wing F", 2025),
        quality: None,
        style: None,
        need: None,
        reputation: None,
        fit_score: FitScore::from_unit(fit),
    }
}

fn read_json(path: &Utf8Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read snapshot");
    serde_json::from_str(&text).expect("parse snapshot")
}

#[rstest]
fn writes_snapshot_into_new_directories(data_dir: DataDir) {
    let output = data_dir.root.join("out/merged.json");

    write_snapshot(&output, &[record("A", 1.0), record("B", 0.5)]).expect("write snapshot");

    let written = read_json(&output);
    let rows = written.as_array().expect("array output");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.first().and_then(|row| row.get("fitScore")), Some(&json!(99)));
}

#[rstest]
fn rewriting_replaces_the_previous_snapshot(data_dir: DataDir) {
    let output = data_dir.root.join("merged.json");
    write_snapshot(&output, &[record("A", 1.0), record("B", 0.5)]).expect("first write");

    write_snapshot(&output, &[record("C", 0.2)]).expect("second write");

    let written = read_json(&output);
    assert_eq!(written.as_array().map(Vec::len), Some(1));
}
