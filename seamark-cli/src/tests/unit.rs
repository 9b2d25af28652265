//! Focused unit tests covering CLI configuration resolution.

use super::helpers::Workspace;
use super::*;
use crate::osm::{OsmArgs, OsmConfig};
use crate::shom::{ShomArgs, ShomConfig};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::rstest;
use seamark_data::DEFAULT_OVERPASS_URL;
use serde_json::json;
use std::time::Duration;

#[rstest]
fn osm_defaults_target_perros_guirec() {
    let config = OsmConfig::try_from(OsmArgs::default()).expect("defaults should resolve");
    assert_eq!(config.file, None);
    assert_eq!(config.area.center.lat(), DEFAULT_LAT);
    assert_eq!(config.area.center.lon(), DEFAULT_LON);
    assert_eq!(config.area.radius_m, 1000.0);
    assert_eq!(config.overpass.endpoint, DEFAULT_OVERPASS_URL);
    assert_eq!(config.overpass.timeout, Duration::from_secs(30));
}

#[rstest]
fn shom_defaults_to_bundled_export() {
    let config = ShomConfig::try_from(ShomArgs::default()).expect("defaults should resolve");
    assert_eq!(config.file, Utf8PathBuf::from("json-db/beacon-cardinal.json"));
    assert_eq!(config.area.radius_m, 10_000.0);
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn non_positive_radius_is_rejected(#[case] radius: f64) {
    let args = ShomArgs {
        radius: Some(radius),
        ..ShomArgs::default()
    };
    let err = ShomConfig::try_from(args).expect_err("invalid radius");
    match err {
        CliError::InvalidRadius { .. } => {}
        other => panic!("expected InvalidRadius, found {other:?}"),
    }
}

#[rstest]
#[case(Some(95.0), None)]
#[case(None, Some(-181.0))]
fn out_of_range_position_is_rejected(#[case] lat: Option<f64>, #[case] lon: Option<f64>) {
    let args = OsmArgs {
        lat,
        lon,
        ..OsmArgs::default()
    };
    let err = OsmConfig::try_from(args).expect_err("invalid position");
    match err {
        CliError::InvalidPosition(_) => {}
        other => panic!("expected InvalidPosition, found {other:?}"),
    }
}

#[rstest]
fn timeout_override_is_applied() {
    let args = OsmArgs {
        timeout_secs: Some(5),
        endpoint: Some("http://localhost:12345/api/interpreter".to_owned()),
        ..OsmArgs::default()
    };
    let config = OsmConfig::try_from(args).expect("config should build");
    assert_eq!(config.overpass.timeout, Duration::from_secs(5));
    assert_eq!(
        config.overpass.endpoint,
        "http://localhost:12345/api/interpreter"
    );
}

#[rstest]
fn merge_layers_honour_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "lat": 47.0,
            "lon": -2.0,
            "endpoint": "http://from-file/api/interpreter",
        }),
        None,
    );
    composer.push_environment(json!({
        "lat": 48.5,
        "radius": 2500.0,
    }));
    composer.push_cli(json!({
        "endpoint": "http://from-cli/api/interpreter",
    }));

    let config = crate::osm::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.area.center.lat(), 48.5);
    assert_eq!(config.area.center.lon(), -2.0);
    assert_eq!(config.area.radius_m, 2500.0);
    assert_eq!(config.overpass.endpoint, "http://from-cli/api/interpreter");
}

#[rstest]
fn invalid_layer_maps_to_configuration_error() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "radius": "far" }));

    let err = crate::shom::config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn shom_file_layer_is_used() {
    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "file": "exports/beacons.json" }), None);

    let config = crate::shom::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.file, Utf8PathBuf::from("exports/beacons.json"));
}

#[rstest]
fn require_existing_reports_missing_files() {
    let workspace = Workspace::new();
    let err = require_existing(&workspace.root().join("absent.json"), ARG_FILE)
        .expect_err("missing file");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_FILE),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn require_existing_rejects_directories() {
    let workspace = Workspace::new();
    let err = require_existing(workspace.root(), ARG_FILE).expect_err("directory");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_FILE),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn parses_negative_longitude() {
    let cli = Cli::try_parse_from(["seamark", "shom", "--file", "beacons.json", "--lon", "-3.5"])
        .expect("arguments should parse");
    match cli.command {
        Command::Shom(args) => {
            assert_eq!(args.lon, Some(-3.5));
            assert_eq!(args.file, Some(Utf8PathBuf::from("beacons.json")));
        }
        other => panic!("expected the shom subcommand, found {other:?}"),
    }
}
