//! Raw SRF library records
//!
//! The library is the boundary type handed to the set builder: an ordered
//! sequence of named profiles, typically decoded from the feature attributes
//! of a spectral-library vector layer. Record order is significant, it fixes
//! the output band order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One raw spectral profile: parallel x/y sample vectors plus the unit
/// of the x axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectralProfile {
    /// Wavelengths, in the unit named by `x_unit`
    pub x: Vec<f64>,
    /// Relative sensitivity weights
    pub y: Vec<f64>,
    /// Wavelength unit label, e.g. "Nanometers" or "Micrometers"
    #[serde(rename = "xUnit")]
    pub x_unit: String,
}

/// A named profile record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrfRecord {
    /// Display name; becomes the destination band name
    pub name: String,
    #[serde(flatten)]
    pub profile: SpectralProfile,
}

/// Ordered collection of SRF records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SrfLibrary {
    records: Vec<SrfRecord>,
}

impl SrfLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from records, checking x/y sample counts match
    pub fn from_records(records: Vec<SrfRecord>) -> Result<Self> {
        for record in &records {
            if record.profile.x.len() != record.profile.y.len() {
                return Err(Error::InvalidLibrary(format!(
                    "profile '{}' has {} x samples but {} y samples",
                    record.name,
                    record.profile.x.len(),
                    record.profile.y.len()
                )));
            }
        }
        Ok(Self { records })
    }

    /// Deserialize a library from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let library: SrfLibrary = serde_json::from_str(json)?;
        Self::from_records(library.records)
    }

    /// Read a library from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut text = String::new();
        std::fs::File::open(path)?.read_to_string(&mut text)?;
        Self::from_json_str(&text)
    }

    /// Append a record
    pub fn push(&mut self, record: SrfRecord) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the library has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in source order
    pub fn iter(&self) -> impl Iterator<Item = &SrfRecord> {
        self.records.iter()
    }
}

impl IntoIterator for SrfLibrary {
    type Item = SrfRecord;
    type IntoIter = std::vec::IntoIter<SrfRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let json = r#"[
            {"name": "blue", "x": [450.0, 460.0], "y": [0.8, 0.9], "xUnit": "Nanometers"},
            {"name": "green", "x": [0.55], "y": [1.0], "xUnit": "Micrometers"}
        ]"#;
        let library = SrfLibrary::from_json_str(json).unwrap();
        assert_eq!(library.len(), 2);

        let names: Vec<&str> = library.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["blue", "green"]);
        assert_eq!(library.iter().next().unwrap().profile.x_unit, "Nanometers");
    }

    #[test]
    fn mismatched_samples_rejected() {
        let json = r#"[{"name": "bad", "x": [1.0, 2.0], "y": [0.5], "xUnit": "nm"}]"#;
        assert!(matches!(
            SrfLibrary::from_json_str(json),
            Err(crate::Error::InvalidLibrary(_))
        ));
    }
}
