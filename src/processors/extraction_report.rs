use serde::{Deserialize, Serialize};

/// Why a gazetteer row did not become a city record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    BelowThreshold,
    ShortRow,
    Malformed,
}

/// Row-level tallies for one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub rows_read: u64,
    pub below_threshold: u64,
    pub short_rows: u64,
    pub malformed_rows: u64,
    pub unknown_country: u64,
    pub accepted: u64,
}

impl ExtractionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::BelowThreshold => self.below_threshold += 1,
            SkipReason::ShortRow => self.short_rows += 1,
            SkipReason::Malformed => self.malformed_rows += 1,
        }
    }

    pub fn record_accepted(&mut self, known_country: bool) {
        self.accepted += 1;
        if !known_country {
            self.unknown_country += 1;
        }
    }

    pub fn skipped(&self) -> u64 {
        self.below_threshold + self.short_rows + self.malformed_rows
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            self.accepted as f64 / self.rows_read as f64 * 100.0
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = String::from("Extraction Report:\n");
        summary.push_str(&format!("  Rows read: {}\n", self.rows_read));
        summary.push_str(&format!(
            "  Accepted: {} ({:.1}%)\n",
            self.accepted,
            self.acceptance_rate()
        ));
        summary.push_str(&format!("  Below population threshold: {}\n", self.below_threshold));
        summary.push_str(&format!("  Too few columns: {}\n", self.short_rows));
        summary.push_str(&format!("  Malformed: {}\n", self.malformed_rows));

        if self.unknown_country > 0 {
            summary.push_str(&format!(
                "  Unknown country code: {} accepted records\n",
                self.unknown_country
            ));
        }

        summary
    }
}
