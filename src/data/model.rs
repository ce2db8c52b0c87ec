use serde::Serialize;

// ---------------------------------------------------------------------------
// LocationRecord – one row of the location report
// ---------------------------------------------------------------------------

/// Column names of the location report, in order.
pub const REPORT_HEADER: [&str; 3] = ["NWB File", "Channel", "Location"];

/// Electrode location of one channel in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRecord {
    /// File name (not the full path) of the source NWB file.
    #[serde(rename = "NWB File")]
    pub file: String,
    #[serde(rename = "Channel")]
    pub channel: usize,
    /// `None` when the channel index lies outside the electrode table.
    #[serde(rename = "Location")]
    pub location: Option<String>,
}

// ---------------------------------------------------------------------------
// SignalStream – a loaded acquisition
// ---------------------------------------------------------------------------

/// A signal loaded in full from `acquisition/<name>/data`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStream {
    pub name: String,
    pub samples: Vec<f64>,
    /// Sampling rate in Hz, or `None` when the file carries no numeric rate.
    pub rate: Option<f64>,
}

impl SignalStream {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FrequencyRange – the band shown on the spectrogram's y axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    pub low: f64,
    pub high: f64,
}

impl FrequencyRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `freq` lies inside the range, bounds included.
    pub fn contains(&self, freq: f64) -> bool {
        freq >= self.low && freq <= self.high
    }
}
