use crate::error::{ConversionError, Result};
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

pub struct ArchiveInspector;

impl ArchiveInspector {
    /// Whether the path names a zip archive rather than a plain gazetteer file
    pub fn is_zip(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("zip"))
            .unwrap_or(false)
    }

    /// Find the gazetteer entry in a GeoNames archive (e.g. cities1000.zip -> cities1000.txt)
    pub fn find_gazetteer_entry<R: Read + Seek>(
        archive: &ZipArchive<R>,
        archive_path: &Path,
    ) -> Result<String> {
        let entries: Vec<&str> = archive.file_names().collect();

        if let Some(stem) = archive_path.file_stem().and_then(|s| s.to_str()) {
            let expected = format!("{}.txt", stem);
            if let Some(entry) = entries.iter().find(|name| entry_file_name(name) == expected) {
                return Ok(entry.to_string());
            }
        }

        let candidates: Vec<&str> = entries
            .iter()
            .copied()
            .filter(|name| {
                let file_name = entry_file_name(name).to_ascii_lowercase();
                file_name.ends_with(".txt") && !file_name.starts_with("readme")
            })
            .collect();

        match candidates.as_slice() {
            [entry] => Ok(entry.to_string()),
            [] => Err(ConversionError::InvalidFormat(format!(
                "No gazetteer .txt entry found in archive '{}'",
                archive_path.display()
            ))),
            _ => Err(ConversionError::InvalidFormat(format!(
                "Archive '{}' contains several .txt entries ({}), cannot pick a gazetteer",
                archive_path.display(),
                candidates.join(", ")
            ))),
        }
    }
}

fn entry_file_name(entry: &str) -> &str {
    entry.rsplit('/').next().unwrap_or(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn build_archive(entries: &[&str]) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for name in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(b"data").unwrap();
        }
        let cursor = writer.finish().unwrap();
        ZipArchive::new(cursor).unwrap()
    }

    #[test]
    fn test_is_zip() {
        assert!(ArchiveInspector::is_zip(Path::new("cities1000.zip")));
        assert!(ArchiveInspector::is_zip(Path::new("data/CITIES500.ZIP")));
        assert!(!ArchiveInspector::is_zip(Path::new("cities1000.txt")));
        assert!(!ArchiveInspector::is_zip(Path::new("cities1000")));
    }

    #[test]
    fn test_entry_matching_archive_stem_wins() {
        let archive = build_archive(&["readme.txt", "extra.txt", "cities1000.txt"]);
        let entry =
            ArchiveInspector::find_gazetteer_entry(&archive, Path::new("dl/cities1000.zip")).unwrap();

        assert_eq!(entry, "cities1000.txt");
    }

    #[test]
    fn test_single_txt_entry_is_used() {
        let archive = build_archive(&["readme.txt", "nested/places.txt"]);
        let entry =
            ArchiveInspector::find_gazetteer_entry(&archive, Path::new("download.zip")).unwrap();

        assert_eq!(entry, "nested/places.txt");
    }

    #[test]
    fn test_ambiguous_archive_is_rejected() {
        let archive = build_archive(&["a.txt", "b.txt"]);
        let result = ArchiveInspector::find_gazetteer_entry(&archive, Path::new("download.zip"));

        assert!(matches!(result, Err(ConversionError::InvalidFormat(_))));
    }

    #[test]
    fn test_archive_without_gazetteer_is_rejected() {
        let archive = build_archive(&["readme.txt", "cities.csv"]);
        let result = ArchiveInspector::find_gazetteer_entry(&archive, Path::new("cities.zip"));

        assert!(matches!(result, Err(ConversionError::InvalidFormat(_))));
    }
}
