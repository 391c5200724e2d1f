//! Test helpers for composing a small recruiting-cycle data directory.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) struct DataDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl DataDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    /// A data directory holding every required table for Illinois 2025.
    pub(super) fn populated() -> Self {
        let data = Self::new();
        data.populate();
        data
    }

    pub(super) fn populate(&self) {
        self.write(
            "transfer-players-2026.json",
            r#"[
                {"player": "Ben Humrichous", "team": "Evansville", "role": "Stretch 4", "g": 32, "bpm": 4.1, "ortg": 118.0, "usg": 21.0, "rk": 40},
                {"player": "Kylan Boswell", "team": "Arizona", "role": "Combo G", "g": 31, "bpm": 3.4, "ortg": 109.0, "usg": 19.5, "rk": 12},
                {"player": "Tomislav Ivisic", "team": "Kentucky", "role": "C", "g": 29, "bpm": 6.2, "ortg": 121.0, "usg": 23.0, "rk": 3}
            ]"#,
        );
        self.write(
            "team-data-2025.json",
            r#"[
                {"team": "Illinois", "adjT": 70.1, "barthag": 0.93},
                {"team": "Arizona", "adjT": 69.2, "barthag": 0.91},
                {"team": "Evansville", "adjT": 66.4, "barthag": 0.31},
                {"team": "Kentucky", "adjT": 71.0, "barthag": 0.88}
            ]"#,
        );
        self.write(
            "illinois-roster-2025.json",
            r#"[
                {"name": "Terrence Shannon", "role": "Wing G", "minPct": "78.1", "bpm": "7.9", "leftAfterSeason": true},
                {"name": "Dain Dainja", "role": "C", "minPct": "21.0", "bpm": "1.2"}
            ]"#,
        );
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write(&self, name: &str, contents: &str) {
        write_utf8(&self.root.join(name), contents.as_bytes());
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}
