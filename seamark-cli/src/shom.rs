//! `shom` subcommand: hydrographic beacons from a JSON export.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use seamark_data::{AreaQuery, load_shom_file, validate};
use serde::{Deserialize, Serialize};

use crate::output::{write_diagnostics, write_nodes, write_summary};
use crate::{ARG_FILE, ARG_LAT, ARG_LON, ARG_RADIUS, CliError, require_existing, resolve_area};

/// Export loaded when no file is configured.
const DEFAULT_FILE: &str = "json-db/beacon-cardinal.json";

/// Default search radius around the reference position.
const DEFAULT_RADIUS_M: f64 = 10_000.0;

/// CLI arguments for the `shom` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a SHOM beacon export, keep the records near a \
                 reference position, report incoherent cardinal marks and \
                 export the survivors as OSM tag dictionaries.",
    about = "Load, check and export hydrographic beacons"
)]
#[ortho_config(prefix = "SEAMARK")]
pub(crate) struct ShomArgs {
    /// JSON array of SHOM records.
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
}

impl ShomArgs {
    pub(crate) fn into_config(self) -> Result<ShomConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ShomConfig::try_from(merged)
    }
}

/// Resolved `shom` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShomConfig {
    /// Input export.
    pub(crate) file: Utf8PathBuf,
    /// Reference area.
    pub(crate) area: AreaQuery,
}

impl TryFrom<ShomArgs> for ShomConfig {
    type Error = CliError;

    fn try_from(args: ShomArgs) -> Result<Self, Self::Error> {
        let area = resolve_area(args.lat, args.lon, args.radius, DEFAULT_RADIUS_M)?;
        let file = args.file.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_FILE));
        Ok(Self { file, area })
    }
}

pub(crate) fn run_shom(args: ShomArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_shom(&config, writer)
}

pub(crate) fn execute_shom(config: &ShomConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    require_existing(&config.file, ARG_FILE)?;
    info!("loading SHOM records from {}", config.file);
    let report = load_shom_file(&config.file)?;

    let nearby = report
        .collection
        .within(config.area.center, config.area.radius_m);
    let findings: Vec<_> = nearby.iter().flat_map(validate).collect();
    let nodes: Vec<_> = nearby.iter().map(|record| record.export(None)).collect();

    write_summary(writer, &report, &config.area, &nearby)?;
    write_diagnostics(writer, &findings)?;
    write_nodes(writer, &nodes)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ShomConfig, CliError> {
    let merged = ShomArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ShomConfig::try_from(merged)
}
