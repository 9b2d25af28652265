//! JSON file reader built on `cap-std` and `camino`.

use std::io::BufReader;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use seamark_core::RawRecord;
use serde_json::Value;

use super::records_from_array;
use crate::error::SourceError;

/// Read a JSON array of raw records from `path`.
///
/// The file handle lives only for the duration of the parse.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use seamark_data::read_records;
///
/// # fn main() -> Result<(), seamark_data::SourceError> {
/// let records = read_records(Utf8Path::new("json-db/beacon-cardinal.json"))?;
/// println!("{} raw records", records.len());
/// # Ok(())
/// # }
/// ```
pub fn read_records(path: &Utf8Path) -> Result<Vec<RawRecord>, SourceError> {
    let document: Value = {
        let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
            SourceError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SourceError::Json {
            origin: path.to_string(),
            source,
        })?
    };
    records_from_array(document, path.as_str())
}
