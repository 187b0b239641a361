//! Test helpers for writing datasets into temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory holding `dataset.json`.
pub(super) struct DatasetFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl DatasetFixture {
    /// Write the standard four-station dataset.
    pub(super) fn standard() -> Self {
        Self::with_contents(&standard_dataset())
    }

    pub(super) fn with_contents(value: &serde_json::Value) -> Self {
        let fixture = Self::empty();
        let payload = serde_json::to_vec_pretty(value).expect("encode dataset");
        write_utf8(&fixture.path, &payload);
        fixture
    }

    pub(super) fn with_raw(contents: &[u8]) -> Self {
        let fixture = Self::empty();
        write_utf8(&fixture.path, contents);
        fixture
    }

    /// A directory with no dataset written yet.
    pub(super) fn empty() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("dataset.json");
        Self {
            _dir: dir,
            root,
            path,
        }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Stations around Philadelphia at roughly 10, 50 and 138 miles from
/// `(40.0, -75.0)`, plus one stable station without coordinates.
pub(super) fn standard_dataset() -> serde_json::Value {
    json!({
        "stations": [
            { "id": "a", "name": "Alpha TV", "category": "TV", "risk_tier": "Critical" },
            { "id": "b", "name": "Bravo FM", "category": "Radio", "risk_tier": "High" },
            { "id": "c", "name": "Charlie TV", "category": "TV", "risk_tier": "High" },
            { "id": "calm", "category": "Radio", "risk_tier": "Stable" }
        ],
        "sites": [
            { "station_id": "a", "call_sign": "WAAA", "latitude": 40.1449, "longitude": -75.0 },
            { "station_id": "b", "call_sign": "WBBB", "latitude": 40.7238, "longitude": -75.0 },
            { "station_id": "b", "call_sign": "WBBB-1", "latitude": 42.0, "longitude": -75.0 },
            { "station_id": "c", "call_sign": "WCCC", "latitude": 42.0, "longitude": -75.0 },
            { "station_id": "calm", "call_sign": "WCLM" }
        ],
        "exposure": {
            "b": { "impressions": 100, "clicks": 50 }
        }
    })
}
