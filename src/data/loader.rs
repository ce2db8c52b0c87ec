use std::path::{Path, PathBuf};

use hdf5::types::TypeDescriptor;
use hdf5::{Dataset, Group};

use super::labels::read_string_column;
use super::model::SignalStream;
use crate::error::{NwbError, Result};

/// Where NWB keeps the per-electrode brain region labels.
pub const LOCATION_PATH: &str = "general/extracellular_ephys/electrodes/location";

/// Group holding the acquired time series.
pub const ACQUISITION_GROUP: &str = "acquisition";

// ---------------------------------------------------------------------------
// NwbFile – read-only handle on one container
// ---------------------------------------------------------------------------

/// An NWB file opened read-only. The underlying HDF5 handle is released when
/// this value is dropped.
pub struct NwbFile {
    path: PathBuf,
    file: hdf5::File,
}

impl std::fmt::Debug for NwbFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NwbFile").field("path", &self.path).finish()
    }
}

impl NwbFile {
    /// Open `path` read-only. A path that does not exist yields
    /// [`NwbError::NotFound`] rather than an HDF5 error.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NwbError::NotFound(path.to_path_buf()));
        }
        let file = hdf5::File::open(path)?;
        log::debug!("Opened {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether every component of the slash-separated `path` exists.
    pub fn contains(&self, path: &str) -> bool {
        let mut prefix = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if !self.file.link_exists(&prefix) {
                return false;
            }
        }
        !prefix.is_empty()
    }

    /// Raw bytes of every entry in the electrode location table.
    pub fn electrode_locations(&self) -> Result<Vec<Vec<u8>>> {
        if !self.contains(LOCATION_PATH) {
            return Err(NwbError::MissingMetadata {
                path: self.path.clone(),
                dataset: LOCATION_PATH.to_string(),
            });
        }
        let dataset = self.file.dataset(LOCATION_PATH)?;
        read_string_column(&dataset)
    }

    /// Names of all acquisitions, empty when the file has none.
    pub fn acquisition_names(&self) -> Result<Vec<String>> {
        if !self.contains(ACQUISITION_GROUP) {
            return Ok(Vec::new());
        }
        Ok(self.file.group(ACQUISITION_GROUP)?.member_names()?)
    }

    /// Whether `name` is one of the direct members of the acquisition group.
    /// Nested paths such as `LFP/data` are not acquisitions.
    pub fn has_acquisition(&self, name: &str) -> Result<bool> {
        Ok(self.acquisition_names()?.iter().any(|n| n == name))
    }

    /// Load the whole `data` dataset of an acquisition together with the
    /// `rate` attribute of its `starting_time`.
    ///
    /// A 2-D dataset is read as (time, channel) and `channel` selects the
    /// column; for 1-D data `channel` is ignored.
    pub fn load_signal(&self, name: &str, channel: usize) -> Result<SignalStream> {
        if !self.has_acquisition(name)? {
            if let Ok(names) = self.acquisition_names() {
                log::debug!("Available acquisitions in {}: {names:?}", self.path.display());
            }
            return Err(NwbError::MissingKey(name.to_string()));
        }

        // A dataset stored directly under the acquisition group is not a series.
        let series = self
            .file
            .group(&format!("{ACQUISITION_GROUP}/{name}"))
            .map_err(|_| NwbError::MissingKey(name.to_string()))?;
        let data = series.dataset("data")?;
        let samples = read_samples(&data, channel)?;
        let rate = read_rate(&series)?;

        log::debug!(
            "Loaded {} samples from '{name}' (rate: {rate:?})",
            samples.len()
        );

        Ok(SignalStream {
            name: name.to_string(),
            samples,
            rate,
        })
    }
}

// -- HDF5 helpers --

fn read_samples(data: &Dataset, channel: usize) -> Result<Vec<f64>> {
    let shape = data.shape();
    if data.size() == 0 {
        return Ok(Vec::new());
    }
    match shape.as_slice() {
        [_] => Ok(data.read_raw::<f64>()?),
        [_, columns] => {
            let columns = *columns;
            if channel >= columns {
                return Err(NwbError::Value(format!(
                    "channel {channel} out of range for signal with {columns} channels"
                )));
            }
            let flat = data.read_raw::<f64>()?;
            Ok(flat.into_iter().skip(channel).step_by(columns).collect())
        }
        other => Err(NwbError::Value(format!(
            "signal data has unsupported shape {other:?}"
        ))),
    }
}

/// `Ok(None)` when the rate is missing or not a number.
fn read_rate(series: &Group) -> Result<Option<f64>> {
    if !series.link_exists("starting_time") {
        return Ok(None);
    }
    let starting_time = series.dataset("starting_time")?;
    if !starting_time.attr_names()?.iter().any(|n| n == "rate") {
        return Ok(None);
    }
    let rate = starting_time.attr("rate")?;
    match rate.dtype()?.to_descriptor()? {
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_) => {
            Ok(Some(rate.read_scalar::<f64>()?))
        }
        _ => Ok(None),
    }
}
