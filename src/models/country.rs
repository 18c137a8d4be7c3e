use crate::utils::constants::UNKNOWN_COUNTRY;
use std::collections::HashMap;

/// ISO country code to English country name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryMap {
    names: HashMap<String, String>,
}

impl CountryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping; a later entry for the same code replaces the earlier one.
    pub fn insert(&mut self, iso_code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(iso_code.into(), name.into());
    }

    pub fn get(&self, iso_code: &str) -> Option<&str> {
        self.names.get(iso_code).map(String::as_str)
    }

    /// Country name for the code, or `"Unknown"` when the code is not in the table.
    pub fn resolve(&self, iso_code: &str) -> &str {
        self.get(iso_code).unwrap_or(UNKNOWN_COUNTRY)
    }

    pub fn contains(&self, iso_code: &str) -> bool {
        self.names.contains_key(iso_code)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CountryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = CountryMap::new();
        for (code, name) in iter {
            map.insert(code, name);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let map: CountryMap = [("US", "United States of America"), ("GB", "United Kingdom")]
            .into_iter()
            .collect();

        assert_eq!(map.resolve("US"), "United States of America");
        assert_eq!(map.resolve("GB"), "United Kingdom");
        assert_eq!(map.resolve("XX"), "Unknown");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_last_write_wins() {
        let mut map = CountryMap::new();
        map.insert("DE", "Germany (old)");
        map.insert("DE", "Germany");

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("DE"), Some("Germany"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let map: CountryMap = [("FR", "France")].into_iter().collect();

        assert!(map.contains("FR"));
        assert!(!map.contains("fr"));
        assert_eq!(map.resolve("fr"), "Unknown");
    }
}
