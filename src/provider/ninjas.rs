use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DataSourceConfig;
use crate::error::QuizError;
use crate::provider::codes::CountryCodes;
use crate::provider::normalize::{normalize_population, RawNumber};
use crate::provider::CountryLookup;
use crate::types::CountryRecord;

/// By-name country facts source. Needs an API key and is rate limited
/// upstream, so callers must query it one name at a time.
pub struct NinjasClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    flag_cdn_base: String,
    codes: Arc<CountryCodes>,
}

#[derive(Debug, Deserialize)]
struct NinjaCountry {
    name: String,
    #[serde(default)]
    capital: Option<String>,
    #[serde(default)]
    population: Option<RawNumber>,
    #[serde(default)]
    surface_area: Option<RawNumber>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    currency: Option<CurrencyField>,
    #[serde(default)]
    languages: Option<ListField>,
    #[serde(default)]
    timezone: Option<ListField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CurrencyField {
    Named { name: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListField {
    Many(Vec<String>),
    Delimited(String),
}

impl ListField {
    fn into_vec(self) -> Vec<String> {
        match self {
            ListField::Many(values) => values,
            ListField::Delimited(text) => text.split(',').map(|s| s.trim().to_string()).collect(),
        }
    }
}

impl NinjasClient {
    pub fn new(
        config: &DataSourceConfig,
        api_key: String,
        codes: Arc<CountryCodes>,
    ) -> Result<Self, QuizError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.primary_base_url.clone(),
            api_key,
            flag_cdn_base: config.flag_cdn_base.clone(),
            codes,
        })
    }

    fn into_record(&self, requested: &str, raw: NinjaCountry) -> CountryRecord {
        let population = raw.population.map(normalize_population).unwrap_or(0);
        let area = raw.surface_area.map(|a| a.as_f64());
        let currencies = match raw.currency {
            Some(CurrencyField::Named { name }) | Some(CurrencyField::Plain(name)) => vec![name],
            None => Vec::new(),
        };

        let mut flag_image_url = self.codes.flag_url(&self.flag_cdn_base, requested);
        if flag_image_url.is_empty() {
            flag_image_url = self.codes.flag_url(&self.flag_cdn_base, &raw.name);
        }
        let flag_alt_text = format!("Flag of {}", raw.name);

        CountryRecord::new(
            raw.name,
            raw.capital,
            population,
            area,
            raw.region,
            raw.languages.map(ListField::into_vec).unwrap_or_default(),
            currencies,
            raw.timezone.map(ListField::into_vec).unwrap_or_default(),
            flag_image_url,
            Some(flag_alt_text),
        )
    }
}

#[async_trait]
impl CountryLookup for NinjasClient {
    fn name(&self) -> &str {
        "api-ninjas"
    }

    async fn fetch_country(&self, name: &str) -> Result<Option<CountryRecord>, QuizError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", name)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuizError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let mut found = response.json::<Vec<NinjaCountry>>().await?;
        if found.is_empty() {
            return Ok(None);
        }
        let first = found.remove(0);
        Ok(Some(self.into_record(name, first)))
    }
}
