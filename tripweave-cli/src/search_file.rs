//! Reading search files and writing JSON output.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use serde::{Deserialize, Serialize};
use tripweave_core::{OfferSet, TripRequest};

use crate::CliError;

/// A trip request plus whatever offers have been gathered for it.
///
/// The request fields (`trip`, `stops`) sit at the top level. `offers` may be
/// omitted, which is enough for the `scenarios` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SearchFile {
    #[serde(flatten)]
    pub(crate) request: TripRequest,
    #[serde(default)]
    pub(crate) offers: OfferSet,
}

/// Loads a JSON-encoded [`SearchFile`] from disk.
pub(crate) fn load_search_file(path: &Utf8Path) -> Result<SearchFile, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenSearchFile {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    let search: SearchFile =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseSearchFile {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "loaded {} stops and {} offers from {path}",
        search.request.stops.len(),
        search.offers.flights.len() + search.offers.hotels.len() + search.offers.cars.len()
    );
    Ok(search)
}

/// Writes `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
