//! Test helpers for writing search files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;
use tripweave_core::test_support::{sample_offers, sample_request};
use tripweave_core::OfferSet;

use crate::search_file::SearchFile;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A temporary directory holding one search file.
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

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write the sample trip with `offers` and return its path.
    pub(super) fn search_file(&self, offers: OfferSet) -> Utf8PathBuf {
        let path = self.path("search.json");
        let search = SearchFile {
            request: sample_request(),
            offers,
        };
        let payload = serde_json::to_string_pretty(&search).expect("serialize search file");
        write_utf8(&path, payload.as_bytes());
        path
    }

    pub(super) fn sample_search_file(&self) -> Utf8PathBuf {
        self.search_file(sample_offers())
    }
}

pub(super) fn decode_output(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("command output should be JSON")
}
