use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::DataSourceConfig;
use crate::error::QuizError;
use crate::provider::CountryCatalog;
use crate::types::CountryRecord;

/// Bulk source returning every country in one request. No credential.
pub struct RestCountriesClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RcCountry {
    name: RcName,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    population: Option<f64>,
    #[serde(default)]
    area: Option<f64>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    languages: BTreeMap<String, String>,
    #[serde(default)]
    currencies: BTreeMap<String, RcCurrency>,
    #[serde(default)]
    timezones: Vec<String>,
    #[serde(default)]
    flags: Option<RcFlags>,
}

#[derive(Debug, Deserialize)]
struct RcName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct RcCurrency {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RcFlags {
    #[serde(default)]
    png: Option<String>,
    #[serde(default)]
    svg: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

impl From<RcCountry> for CountryRecord {
    fn from(raw: RcCountry) -> Self {
        let population = raw
            .population
            .filter(|p| p.is_finite() && *p > 0.0)
            .map(|p| p.round() as u64)
            .unwrap_or(0);
        let (flag_image_url, flag_alt_text) = match raw.flags {
            Some(flags) => (flags.png.or(flags.svg).unwrap_or_default(), flags.alt),
            None => (String::new(), None),
        };

        CountryRecord::new(
            raw.name.common,
            raw.capital.into_iter().next(),
            population,
            raw.area,
            raw.region,
            raw.languages.into_values().collect(),
            raw.currencies.into_values().filter_map(|c| c.name).collect(),
            raw.timezones,
            flag_image_url,
            flag_alt_text,
        )
    }
}

impl RestCountriesClient {
    pub fn new(config: &DataSourceConfig) -> Result<Self, QuizError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            url: config.bulk_url.clone(),
        })
    }
}

#[async_trait]
impl CountryCatalog for RestCountriesClient {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_all(&self) -> Result<Vec<CountryRecord>, QuizError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuizError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let countries = response.json::<Vec<RcCountry>>().await?;
        Ok(countries.into_iter().map(CountryRecord::from).collect())
    }
}
