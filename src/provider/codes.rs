use serde::Deserialize;
use std::collections::HashMap;

use crate::error::QuizError;

const COUNTRIES_CSV: &str = include_str!("../../data/countries.csv");

#[derive(Debug, Clone, Deserialize)]
pub struct CountryCode {
    pub name: String,
    pub iso2: String,
}

/// Static name to ISO 3166-1 alpha-2 table. Its names double as the
/// candidate list for the by-name source.
#[derive(Debug, Clone)]
pub struct CountryCodes {
    entries: Vec<CountryCode>,
    by_name: HashMap<String, usize>,
}

impl CountryCodes {
    pub fn embedded() -> Result<Self, QuizError> {
        Self::from_csv(COUNTRIES_CSV)
    }

    pub fn from_csv(data: &str) -> Result<Self, QuizError> {
        let mut entries = Vec::new();
        let mut rdr = csv::Reader::from_reader(data.as_bytes());

        for result in rdr.deserialize() {
            let code: CountryCode = result?;
            entries.push(code);
        }

        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.to_lowercase(), i))
            .collect();
        Ok(Self { entries, by_name })
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.name.clone()).collect()
    }

    pub fn iso2(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|i| self.entries[*i].iso2.as_str())
    }

    /// `{base}/{iso}.png`, or empty when the country is not in the table.
    pub fn flag_url(&self, base: &str, name: &str) -> String {
        match self.iso2(name) {
            Some(iso) => format!("{}/{}.png", base.trim_end_matches('/'), iso.to_lowercase()),
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let codes = CountryCodes::embedded().unwrap();
        assert!(codes.len() > 100);
        assert_eq!(codes.iso2("France"), Some("FR"));
        assert_eq!(codes.iso2("united kingdom"), Some("GB"));
    }

    #[test]
    fn flag_url_uses_lowercase_code() {
        let codes = CountryCodes::embedded().unwrap();
        assert_eq!(
            codes.flag_url("https://flagcdn.com/w320/", "Japan"),
            "https://flagcdn.com/w320/jp.png"
        );
        assert_eq!(codes.flag_url("https://flagcdn.com/w320", "Atlantis"), "");
    }
}
