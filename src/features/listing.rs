//! Ordered `name,value` feature listings.

use crate::error::{ElaError, Result};
use std::fs::File;
use std::path::Path;

/// Features of one class for one sample, in computation order.
///
/// Values are kept as text so that listings read from disk can be copied
/// into aggregated tables without reformatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureListing {
    entries: Vec<(String, String)>,
}

impl FeatureListing {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a numeric feature.
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.entries.push((name.into(), value.to_string()));
    }

    /// Appends a feature with its raw value text.
    pub fn push_raw(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Feature names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, raw value)` pairs in order.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Raw value text of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Numeric value of `name`; `None` if absent or not a number.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    /// Writes one `name,value` line per feature, without header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for (name, value) in &self.entries {
            writer.write_record([name, value])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Reads a listing written by [`FeatureListing::write_csv`].
    ///
    /// # Errors
    ///
    /// Returns [`ElaError::MissingInput`] if the file does not exist and
    /// [`ElaError::Parse`] for lines that are not `name,value` pairs.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ElaError::from_io_at(e, path))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut listing = Self::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != 2 {
                return Err(ElaError::Parse {
                    path: path.to_path_buf(),
                    line: line + 1,
                    message: format!("expected 'name,value', found {} fields", record.len()),
                });
            }
            listing.push_raw(&record[0], record[1].trim());
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_preserves_order_and_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("listing.csv");

        let mut listing = FeatureListing::new();
        listing.push("ela_distr.skewness", -0.25);
        listing.push("ela_distr.kurtosis", f64::NAN);
        listing.push_raw("ela_distr.number_of_peaks", "3");
        listing.write_csv(&path).expect("written");

        let text = std::fs::read_to_string(&path).expect("readable");
        assert_eq!(
            text,
            "ela_distr.skewness,-0.25\nela_distr.kurtosis,NaN\nela_distr.number_of_peaks,3\n"
        );

        let back = FeatureListing::read_csv(&path).expect("parses");
        assert_eq!(back, listing);
        assert_eq!(back.value("ela_distr.skewness"), Some(-0.25));
        assert!(back.value("ela_distr.kurtosis").is_some_and(f64::is_nan));
    }

    #[test]
    fn test_read_missing() {
        let err = FeatureListing::read_csv("/nonexistent/listing.csv").unwrap_err();
        assert!(matches!(err, ElaError::MissingInput { .. }));
    }

    #[test]
    fn test_read_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "a,1\nb\n").expect("write");
        assert!(matches!(
            FeatureListing::read_csv(&path).unwrap_err(),
            ElaError::Parse { line: 2, .. }
        ));
    }
}
