use std::path::{Path, PathBuf};

use crate::data::labels::decode_label;
use crate::data::loader::NwbFile;
use crate::data::model::{LocationRecord, REPORT_HEADER};
use crate::error::{NwbError, Result};

// ---------------------------------------------------------------------------
// Per-file extraction
// ---------------------------------------------------------------------------

/// Look up the location label of each requested channel in one file.
///
/// Channels past the end of the electrode table get `location: None`. Only the
/// labels actually requested are decoded.
pub fn extract_locations(path: &Path, channels: &[usize]) -> Result<Vec<LocationRecord>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let table = {
        let file = NwbFile::open(path)?;
        file.electrode_locations()?
    };

    channels
        .iter()
        .map(|&channel| {
            let location = table.get(channel).map(|raw| decode_label(raw)).transpose()?;
            Ok(LocationRecord {
                file: file_name.clone(),
                channel,
                location,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Directory scan → CSV report
// ---------------------------------------------------------------------------

/// Outcome of one directory scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Matching files that were attempted.
    pub files_scanned: usize,
    /// Files that produced no rows because they failed.
    pub files_skipped: usize,
    pub rows_written: usize,
}

/// Entries of `dir` whose file name ends with `extension`, sorted by name.
pub fn matching_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(extension) {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Scan `dir` and write one `(file, channel, location)` row per matching file
/// and requested channel to `report`, overwriting it.
///
/// A file that cannot be opened or lacks the location table is logged and
/// skipped; only an unreadable directory or an unwritable report is fatal.
pub fn write_location_report(
    dir: &Path,
    report: &Path,
    channels: &[usize],
    extension: &str,
) -> Result<ScanSummary> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(report)?;
    writer.write_record(REPORT_HEADER)?;

    let mut summary = ScanSummary::default();

    for path in matching_files(dir, extension)? {
        summary.files_scanned += 1;
        match extract_locations(&path, channels) {
            Ok(records) => {
                log::debug!("{}: {} channel(s)", path.display(), records.len());
                for record in &records {
                    writer.serialize(record)?;
                }
                summary.rows_written += records.len();
            }
            Err(e @ NwbError::MissingMetadata { .. }) => {
                log::warn!("{e}");
                summary.files_skipped += 1;
            }
            Err(e) => {
                log::error!("Failed to open {}: {e}", path.display());
                summary.files_skipped += 1;
            }
        }
    }

    writer.flush()?;

    log::info!(
        "Wrote {} row(s) from {} file(s) to {} ({} skipped)",
        summary.rows_written,
        summary.files_scanned,
        report.display(),
        summary.files_skipped
    );

    Ok(summary)
}
