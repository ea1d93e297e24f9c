use std::fs;
use std::path::{Path, PathBuf};

/// Load a .sysl fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Get path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(format!("{}.sysl", name))
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Discover all .sysl files in tests/fixtures/, sorted by name
pub fn discover_fixtures() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("sysl"))
        .collect();
    paths.sort();
    paths
}
