use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::DataSourceConfig;
use crate::error::QuizError;
use crate::types::CountryRecord;

mod codes;
mod ninjas;
mod normalize;
mod restcountries;

pub use codes::{CountryCode, CountryCodes};
pub use ninjas::NinjasClient;
pub use normalize::{normalize_population, RawNumber};
pub use restcountries::RestCountriesClient;

/// A source that answers one country per request.
#[async_trait]
pub trait CountryLookup: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` when the source knows no such country.
    async fn fetch_country(&self, name: &str) -> Result<Option<CountryRecord>, QuizError>;
}

/// A source that returns every country at once.
#[async_trait]
pub trait CountryCatalog: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_all(&self) -> Result<Vec<CountryRecord>, QuizError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub current: usize,
    pub total: usize,
}

pub struct CountryDataProvider {
    config: DataSourceConfig,
    candidates: Vec<String>,
    lookup: Option<Box<dyn CountryLookup>>,
    catalog: Box<dyn CountryCatalog>,
    progress: Option<UnboundedSender<LoadProgress>>,
}

impl CountryDataProvider {
    /// Wires the HTTP sources described by `config`. The by-name source is
    /// only built when it is enabled and a key is present.
    pub fn from_config(config: &DataSourceConfig) -> Result<Self, QuizError> {
        let codes = Arc::new(CountryCodes::embedded()?);
        let lookup: Option<Box<dyn CountryLookup>> = match &config.api_key {
            Some(key) if config.primary_usable() => Some(Box::new(NinjasClient::new(
                config,
                key.clone(),
                codes.clone(),
            )?)),
            _ => None,
        };
        let catalog = Box::new(RestCountriesClient::new(config)?);

        Ok(Self::with_sources(config.clone(), codes.names(), lookup, catalog))
    }

    pub fn with_sources(
        config: DataSourceConfig,
        candidates: Vec<String>,
        lookup: Option<Box<dyn CountryLookup>>,
        catalog: Box<dyn CountryCatalog>,
    ) -> Self {
        Self {
            config,
            candidates,
            lookup,
            catalog,
            progress: None,
        }
    }

    pub fn with_progress(mut self, sender: UnboundedSender<LoadProgress>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Loads, deduplicates and sorts the country set, most populous first.
    pub async fn load<R: Rng + Send>(&self, rng: &mut R) -> Result<Vec<CountryRecord>, QuizError> {
        let mut records = Vec::new();

        match &self.lookup {
            Some(lookup) if self.config.primary_usable() => {
                records = self.load_by_name(lookup.as_ref(), rng).await;
                if records.is_empty() {
                    log::warn!(
                        "{} returned no countries, falling back to {}",
                        lookup.name(),
                        self.catalog.name()
                    );
                }
            }
            _ => log::info!(
                "Primary source disabled or missing credential, using {}",
                self.catalog.name()
            ),
        }

        if records.is_empty() {
            records = match self.catalog.fetch_all().await {
                Ok(all) => all,
                Err(e) => {
                    log::error!("{} failed: {}", self.catalog.name(), e);
                    return Err(QuizError::NoCountries);
                }
            };
        }

        let records = finalize(records);
        if records.is_empty() {
            return Err(QuizError::NoCountries);
        }
        log::info!("Loaded {} countries", records.len());
        Ok(records)
    }

    async fn load_by_name<R: Rng + Send>(
        &self,
        lookup: &dyn CountryLookup,
        rng: &mut R,
    ) -> Vec<CountryRecord> {
        let subset: Vec<String> = self
            .candidates
            .choose_multiple(rng, self.config.max_initial_fetch)
            .cloned()
            .collect();
        let total = subset.len();
        let delay = Duration::from_millis(self.config.rate_limit_delay_ms);
        let mut records = Vec::with_capacity(total);

        log::info!("Fetching {} countries from {}", total, lookup.name());
        for (i, name) in subset.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match lookup.fetch_country(name).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => log::warn!("{} has no entry for {}", lookup.name(), name),
                Err(e) => log::warn!("Skipping {}: {}", name, e),
            }

            self.notify(LoadProgress { current: i + 1, total });
        }

        records
    }

    fn notify(&self, progress: LoadProgress) {
        if let Some(sender) = &self.progress {
            // A dropped receiver just means nobody is watching.
            let _ = sender.send(progress);
        }
    }
}

/// Drops nameless records, keeps the last record per name and orders by
/// popularity, highest first.
pub fn finalize(records: Vec<CountryRecord>) -> Vec<CountryRecord> {
    let mut unique: Vec<CountryRecord> = Vec::with_capacity(records.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for record in records {
        if record.name.trim().is_empty() {
            continue;
        }
        match seen.get(&record.name) {
            Some(&i) => unique[i] = record,
            None => {
                seen.insert(record.name.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique.sort_by(|a, b| b.popularity_rank.total_cmp(&a.popularity_rank));
    unique
}
