use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading an NWB file or turning its
/// contents into a report or an image.
#[derive(Debug, Error)]
pub enum NwbError {
    /// The file itself does not exist on disk.
    #[error("NWB file not found at: {}", .0.display())]
    NotFound(PathBuf),

    /// A named signal stream is not present in the file's acquisitions.
    #[error("LFP acquisition named \"{0}\" not found in the NWB file")]
    MissingKey(String),

    /// A fixed metadata path is absent from the container.
    #[error("'{dataset}' not found in: {}", .path.display())]
    MissingMetadata { path: PathBuf, dataset: String },

    /// The data is present but unusable (empty signal, bad sampling rate, ...).
    #[error("{0}")]
    Value(String),

    #[error("label is not valid UTF-8: {0}")]
    Label(#[from] std::str::Utf8Error),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("rendering failed: {0}")]
    Render(String),
}

pub type Result<T, E = NwbError> = std::result::Result<T, E>;
