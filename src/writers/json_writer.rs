use crate::error::Result;
use crate::models::CityRecord;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write city records as a pretty-printed JSON array, replacing any existing file.
    ///
    /// The array is written to a temporary file next to `path` and renamed over it,
    /// so a failed write never leaves a truncated output behind.
    pub fn write_records(&self, records: &[CityRecord], path: &Path) -> Result<usize> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp_file = staging_file(parent)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
        }
        // An existing output keeps its mode across the rename
        if let Ok(metadata) = std::fs::metadata(path) {
            temp_file.as_file().set_permissions(metadata.permissions())?;
        }
        temp_file.as_file().sync_all()?;

        debug!(temp = %temp_file.path().display(), output = %path.display(), "Replacing output file");
        temp_file.persist(path)?;

        Ok(records.len())
    }

    /// Read back a JSON array written by `write_records`
    pub fn read_records(&self, path: &Path) -> Result<Vec<CityRecord>> {
        let file = File::open(path)?;
        let records = serde_json::from_reader(BufReader::new(file))?;
        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<JsonFileInfo> {
        let records = self.read_records(path)?;
        let file_size = std::fs::metadata(path)?.len();

        Ok(JsonFileInfo::from_records(&records, file_size))
    }
}

/// Temporary file for the output, created with the mode `File::create` would use
#[cfg(unix)]
fn staging_file(dir: &Path) -> Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    let temp_file = tempfile::Builder::new()
        .prefix(".cities")
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)?;
    Ok(temp_file)
}

#[cfg(not(unix))]
fn staging_file(dir: &Path) -> Result<NamedTempFile> {
    Ok(NamedTempFile::new_in(dir)?)
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonFileInfo {
    pub total_records: usize,
    pub distinct_countries: usize,
    pub unknown_country: usize,
    pub largest_city: Option<CityRecord>,
    pub file_size: u64,
}

impl JsonFileInfo {
    pub fn from_records(records: &[CityRecord], file_size: u64) -> Self {
        let distinct_countries = records
            .iter()
            .filter(|r| r.has_known_country())
            .map(|r| r.country.as_str())
            .collect::<HashSet<_>>()
            .len();
        let unknown_country = records.iter().filter(|r| !r.has_known_country()).count();
        let largest_city = records.iter().max_by_key(|r| r.population).cloned();

        Self {
            total_records: records.len(),
            distinct_countries,
            unknown_country,
            largest_city,
            file_size,
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "JSON File Summary:\n\
            - Total cities: {}\n\
            - Countries: {}\n\
            - Unknown country: {}\n\
            - File size: {:.2} MB",
            self.total_records,
            self.distinct_countries,
            self.unknown_country,
            self.file_size as f64 / 1_048_576.0, // Convert to MB
        );

        if let Some(city) = &self.largest_city {
            summary.push_str(&format!(
                "\n- Largest city: {} ({}) with population {}",
                city.name, city.country, city.population
            ));
        }

        summary
    }
}
