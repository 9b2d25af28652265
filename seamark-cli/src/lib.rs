//! Command-line interface for the seamark synchronisation pipelines.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use clap::{Parser, Subcommand};
use seamark_core::Coordinate;
use seamark_data::AreaQuery;

mod error;
mod osm;
mod output;
mod shom;

pub use error::CliError;

const ARG_FILE: &str = "file";
const ARG_LAT: &str = "lat";
const ARG_LON: &str = "lon";
const ARG_RADIUS: &str = "radius";
const ARG_ENDPOINT: &str = "endpoint";
const ARG_TIMEOUT: &str = "timeout-secs";

/// Reference position: the harbour of Perros-Guirec.
const DEFAULT_LAT: f64 = 48.80773;
const DEFAULT_LON: f64 = -3.56122;

/// Run the seamark CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Osm(args) => osm::run_osm(args, &mut stdout),
        Command::Shom(args) => shom::run_shom(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "seamark",
    about = "Load, check and export seamarks from OpenStreetMap and SHOM data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Crowd-sourced seamarks from a JSON file or the Overpass API.
    Osm(osm::OsmArgs),
    /// Hydrographic beacons from a SHOM JSON export.
    Shom(shom::ShomArgs),
}

/// Resolve the reference area from merged options.
fn resolve_area(
    lat: Option<f64>,
    lon: Option<f64>,
    radius: Option<f64>,
    default_radius: f64,
) -> Result<AreaQuery, CliError> {
    let center = Coordinate::new(lat.unwrap_or(DEFAULT_LAT), lon.unwrap_or(DEFAULT_LON))
        .map_err(CliError::InvalidPosition)?;
    let radius_m = radius.unwrap_or(default_radius);
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(CliError::InvalidRadius { radius: radius_m });
    }
    Ok(AreaQuery::new(center, radius_m))
}

/// Check that `path` names an existing regular file.
fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn file_is_file(path: &Utf8Path) -> std::io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

#[cfg(test)]
mod tests;
