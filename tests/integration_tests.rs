use gazetteer_converter::config::{ConfigOverrides, ConvertConfig, PopulationPolicy};
use gazetteer_converter::error::ConversionError;
use gazetteer_converter::processors::Converter;
use gazetteer_converter::writers::JsonWriter;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COUNTRY_TABLE: &str = "\
# GeoNames countryInfo.txt
#ISO\tISO3\tISO-Numeric\tfips\tCountry\tCapital
US\tUS\tUnited States\tNA\tUnited States of America
DE\tDEU\t276\tGM\tGermany\tBerlin
";

fn city_row(name: &str, lat: &str, lng: &str, iso_code: &str, population: &str) -> String {
    [
        "123", name, name, "", lat, lng, "P", "PPL", iso_code, "", "", "", "", "", population, "",
        "", "", "",
    ]
    .join("\t")
}

fn write_inputs(dir: &Path, rows: &[String]) -> ConvertConfig {
    let cities_file = dir.join("cities1000.txt");
    let country_file = dir.join("countryInfo.txt");
    fs::write(&cities_file, rows.join("\n") + "\n").expect("write cities");
    fs::write(&country_file, COUNTRY_TABLE).expect("write countries");

    ConvertConfig::default()
        .with_overrides(ConfigOverrides {
            cities_file: Some(cities_file),
            country_file: Some(country_file),
            output_file: Some(dir.join("out").join("cities.json")),
            ..Default::default()
        })
        .expect("valid config")
}

#[test]
fn test_springfield_end_to_end() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = write_inputs(dir.path(), &[city_row("Springfield", "39.1", "-89.6", "US", "7000")]);

    let summary = Converter::new(config.clone()).run(None).unwrap();

    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.countries_loaded, 2);
    assert_eq!(
        summary.count_line(),
        format!("Converted 1 cities to {}", config.output_file.display())
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.output_file).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "Springfield",
            "lat": 39.1,
            "lng": -89.6,
            "population": 7000,
            "country": "United States of America"
        }])
    );
}

#[test]
fn test_small_city_and_unknown_country() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = write_inputs(
        dir.path(),
        &[
            city_row("Hamlet", "40.0", "-90.0", "US", "3000"),
            city_row("Atlantis", "12.5", "-30.25", "XX", "9000"),
            city_row("Köln", "50.93333", "6.95", "DE", "963395"),
        ],
    );

    let summary = Converter::new(config.clone()).run(None).unwrap();
    assert_eq!(summary.records_written, 2);
    assert_eq!(summary.report.below_threshold, 1);
    assert_eq!(summary.report.unknown_country, 1);

    let records = JsonWriter::new().read_records(&config.output_file).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Atlantis", "Köln"]);
    assert_eq!(records[0].country, "Unknown");
    assert_eq!(records[1].country, "Germany");

    // Non-ASCII characters are written literally
    let raw = fs::read_to_string(&config.output_file).unwrap();
    assert!(raw.contains("\"name\": \"Köln\""));
}

#[test]
fn test_short_row_policies() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let rows = [
        city_row("Springfield", "39.1", "-89.6", "US", "7000"),
        "999\tTruncated\tTruncated\t\t1.0\t2.0".to_string(),
    ];

    let lenient = write_inputs(dir.path(), &rows);
    let summary = Converter::new(lenient.clone()).run(None).unwrap();
    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.report.short_rows, 1);

    let strict = ConvertConfig {
        population_policy: PopulationPolicy::Strict,
        output_file: dir.path().join("strict.json"),
        ..lenient
    };
    let result = Converter::new(strict.clone()).run(None);
    assert!(matches!(
        result,
        Err(ConversionError::MissingColumn { line: 2, index: 14 })
    ));
    // A failed run leaves no output behind
    assert!(!strict.output_file.exists());
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = write_inputs(dir.path(), &[]);
    fs::remove_file(&config.cities_file).unwrap();

    let result = Converter::new(config).run(None);
    assert!(matches!(result, Err(ConversionError::Io(_))));
}

#[test]
fn test_zip_archive_input() {
    use std::io::Write;

    let dir = TempDir::new().expect("Failed to create temp directory");
    let config = write_inputs(dir.path(), &[]);
    let zip_path = dir.path().join("cities1000.zip");

    let mut writer = zip::ZipWriter::new(fs::File::create(&zip_path).unwrap());
    writer
        .start_file("cities1000.txt", zip::write::FileOptions::default())
        .unwrap();
    writeln!(writer, "{}", city_row("Springfield", "39.1", "-89.6", "US", "7000")).unwrap();
    writer.finish().unwrap();

    let config = ConvertConfig {
        cities_file: zip_path,
        ..config
    };
    let summary = Converter::new(config).run(None).unwrap();

    assert_eq!(summary.records_written, 1);
}
