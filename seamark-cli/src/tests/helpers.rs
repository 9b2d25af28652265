//! Test helpers for writing datasets and stubbing the Overpass client.

use super::*;
use crate::osm::{OverpassSettings, RecordSourceBuilder};
use camino::{Utf8Path, Utf8PathBuf};
use seamark_data::RecordSource;
use seamark_data::source::test_support::StubRecordSource;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `document` as JSON to `name` and return its path.
    pub(super) fn write_json(&self, name: &str, document: &Value) -> Utf8PathBuf {
        let path = self.root.join(name);
        let payload = serde_json::to_vec_pretty(document).expect("serialise fixture");
        fs::write(&path, payload).expect("write fixture");
        path
    }
}

/// Hands out a clone of a prepared stub source.
pub(super) struct StubSourceBuilder(pub(super) StubRecordSource);

impl RecordSourceBuilder for StubSourceBuilder {
    fn build(&self, _settings: &OverpassSettings) -> Result<Box<dyn RecordSource>, CliError> {
        Ok(Box::new(self.0.clone()))
    }
}

/// Fails the test if the pipeline tries to reach Overpass.
pub(super) struct UnreachableBuilder;

impl RecordSourceBuilder for UnreachableBuilder {
    fn build(&self, settings: &OverpassSettings) -> Result<Box<dyn RecordSource>, CliError> {
        panic!("unexpected Overpass query to {}", settings.endpoint);
    }
}

/// Split captured output into its text summary and its JSON payload.
pub(super) fn split_output(output: &[u8]) -> (String, Value) {
    let text = String::from_utf8(output.to_vec()).expect("utf-8 output");
    let start = text
        .find("\n[")
        .map(|index| index + 1)
        .unwrap_or_else(|| panic!("no JSON array in output:\n{text}"));
    let (summary, payload) = text.split_at(start);
    let nodes = serde_json::from_str(payload).expect("JSON payload");
    (summary.to_owned(), nodes)
}
