use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::Dataset;

use crate::error::{NwbError, Result};

/// Fixed-length string datasets are read through a buffer of this many bytes
/// per element; longer labels are truncated by HDF5's string conversion.
const FIXED_LABEL_CAPACITY: usize = 256;

/// Decode a label from its stored byte form.
///
/// Fixed-length HDF5 strings are padded with NULs, which are stripped.
pub fn decode_label(bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let text = std::str::from_utf8(&bytes[..end])?;
    Ok(text.to_string())
}

/// Read a 1-D string dataset as raw per-element bytes, without decoding.
pub fn read_string_column(dataset: &Dataset) -> Result<Vec<Vec<u8>>> {
    let descriptor = dataset.dtype()?.to_descriptor()?;
    let column = match descriptor {
        TypeDescriptor::VarLenUnicode => dataset
            .read_raw::<VarLenUnicode>()?
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect(),
        TypeDescriptor::VarLenAscii => dataset
            .read_raw::<VarLenAscii>()?
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect(),
        TypeDescriptor::FixedAscii(_) => dataset
            .read_raw::<FixedAscii<FIXED_LABEL_CAPACITY>>()?
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect(),
        TypeDescriptor::FixedUnicode(_) => dataset
            .read_raw::<FixedUnicode<FIXED_LABEL_CAPACITY>>()?
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect(),
        other => {
            return Err(NwbError::Value(format!(
                "expected a string dataset, found {other:?}"
            )))
        }
    };
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_round_trips_utf8_labels() {
        for label in ["CA1", "dentate gyrus", "Área 3b", ""] {
            assert_eq!(decode_label(label.as_bytes()).unwrap(), label);
        }
    }

    #[test]
    fn decode_strips_nul_padding() {
        assert_eq!(decode_label(b"VPM\0\0\0\0").unwrap(), "VPM");
        assert_eq!(decode_label(b"\0\0").unwrap(), "");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode_label(&[0x43, 0xff, 0x41]).unwrap_err();
        assert!(matches!(err, NwbError::Label(_)));
    }
}
