use camino::Utf8PathBuf;
use seamark_core::Coordinate;

/// Reference position used by the pipelines: the harbour of Perros-Guirec.
pub const PERROS_GUIREC: (f64, f64) = (48.80773, -3.56122);

/// Directory containing the JSON fixtures.
pub fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// The reference position as a validated coordinate.
pub fn perros_guirec() -> Coordinate {
    let (lat, lon) = PERROS_GUIREC;
    Coordinate::new(lat, lon).unwrap_or_else(|err| panic!("reference position: {err}"))
}

/// Assert that the feature file lists exactly `expected` scenarios, in order.
pub fn assert_scenario_order(feature: &str, expected: &[&str]) {
    let path = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(feature);
    let contents = std::fs::read_to_string(&path).unwrap_or_else(|err| {
        panic!("failed to read feature file {path}: {err}");
    });
    let titles: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Scenario: "))
        .collect();
    assert_eq!(
        titles, expected,
        "scenario order changed in feature file {path}"
    );
}
