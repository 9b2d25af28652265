//! `osm` subcommand: crowd-sourced seamarks from a file or the Overpass API.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use seamark_data::{
    AreaQuery, IngestReport, OverpassSource, OverpassSourceConfig, RecordSource, fetch_osm,
    load_osm_file,
};
use serde::{Deserialize, Serialize};

use crate::output::{write_nodes, write_summary};
use crate::{
    ARG_ENDPOINT, ARG_FILE, ARG_LAT, ARG_LON, ARG_RADIUS, ARG_TIMEOUT, CliError, require_existing,
    resolve_area,
};

/// Default search radius around the reference position.
const DEFAULT_RADIUS_M: f64 = 1000.0;

/// CLI arguments for the `osm` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load OpenStreetMap seamark nodes from a JSON file, or query \
                 the Overpass API around a reference position when no file \
                 is given. Nodes are normalised, filtered by geodesic \
                 distance and exported as OSM tag dictionaries.",
    about = "Load and export crowd-sourced seamarks"
)]
#[ortho_config(prefix = "SEAMARK")]
pub(crate) struct OsmArgs {
    /// JSON array of OSM nodes; queries Overpass when absent.
    #[arg(long = ARG_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) file: Option<Utf8PathBuf>,
    /// Latitude of the reference position.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the reference position.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Search radius in metres.
    #[arg(long = ARG_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Overpass interpreter URL.
    #[arg(long = ARG_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// Overpass request timeout in seconds.
    #[arg(long = ARG_TIMEOUT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl OsmArgs {
    pub(crate) fn into_config(self) -> Result<OsmConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OsmConfig::try_from(merged)
    }
}

/// Resolved `osm` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OsmConfig {
    /// Input file, if loading from disk.
    pub(crate) file: Option<Utf8PathBuf>,
    /// Reference area.
    pub(crate) area: AreaQuery,
    /// Overpass settings used when no file is given.
    pub(crate) overpass: OverpassSettings,
}

/// Overpass endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OverpassSettings {
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
}

impl OsmConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.file {
            Some(path) => require_existing(path, ARG_FILE),
            None => Ok(()),
        }
    }
}

impl TryFrom<OsmArgs> for OsmConfig {
    type Error = CliError;

    fn try_from(args: OsmArgs) -> Result<Self, Self::Error> {
        let area = resolve_area(args.lat, args.lon, args.radius, DEFAULT_RADIUS_M)?;
        let defaults = OverpassSourceConfig::default();
        let overpass = OverpassSettings {
            endpoint: args.endpoint.unwrap_or(defaults.endpoint),
            timeout: args
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        };
        Ok(Self {
            file: args.file,
            area,
            overpass,
        })
    }
}

/// Builds the remote record source for an `osm` invocation.
pub(crate) trait RecordSourceBuilder {
    fn build(&self, settings: &OverpassSettings) -> Result<Box<dyn RecordSource>, CliError>;
}

pub(crate) struct DefaultRecordSourceBuilder;

impl RecordSourceBuilder for DefaultRecordSourceBuilder {
    fn build(&self, settings: &OverpassSettings) -> Result<Box<dyn RecordSource>, CliError> {
        let config =
            OverpassSourceConfig::new(settings.endpoint.clone()).with_timeout(settings.timeout);
        let source = OverpassSource::with_config(config).map_err(|source| {
            CliError::BuildSource {
                endpoint: settings.endpoint.clone(),
                source,
            }
        })?;
        Ok(Box::new(source))
    }
}

pub(crate) fn run_osm(args: OsmArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_osm(&config, &DefaultRecordSourceBuilder, writer)
}

pub(crate) fn execute_osm(
    config: &OsmConfig,
    builder: &dyn RecordSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let report = load(config, builder)?;

    let nearby = report
        .collection
        .within(config.area.center, config.area.radius_m);
    let nodes: Vec<_> = nearby
        .iter()
        .map(|record| record.export(record.id().parse().ok()))
        .collect();

    write_summary(writer, &report, &config.area, &nearby)?;
    write_nodes(writer, &nodes)
}

fn load(config: &OsmConfig, builder: &dyn RecordSourceBuilder) -> Result<IngestReport, CliError> {
    let report = match &config.file {
        Some(path) => {
            info!("loading OSM nodes from {path}");
            load_osm_file(path)?
        }
        None => {
            info!("querying {} for OSM nodes", config.overpass.endpoint);
            let source = builder.build(&config.overpass)?;
            fetch_osm(source.as_ref(), &config.area)?
        }
    };
    Ok(report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OsmConfig, CliError> {
    let merged = OsmArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OsmConfig::try_from(merged)
}
