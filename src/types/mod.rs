use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

mod session;
pub use session::*;

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub capital: String,
    pub population: u64,
    pub area: f64,
    pub region: String,
    pub languages: Vec<String>,
    pub currencies: Vec<String>,
    pub timezones: Vec<String>,
    pub gdp: f64,
    pub flag_image_url: String,
    pub flag_alt_text: String,
    pub popularity_rank: f64,
}

impl CountryRecord {
    /// Builds a record, padding every optional field with its sentinel so
    /// that list-sampling never sees an empty sequence.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        capital: Option<String>,
        population: u64,
        area: Option<f64>,
        region: Option<String>,
        languages: Vec<String>,
        currencies: Vec<String>,
        timezones: Vec<String>,
        flag_image_url: String,
        flag_alt_text: Option<String>,
    ) -> Self {
        let capital = non_blank(capital).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let region = non_blank(region).unwrap_or_else(|| UNKNOWN.to_string());
        let area = area.filter(|a| a.is_finite() && *a > 0.0).unwrap_or(0.0);
        let flag_alt_text =
            non_blank(flag_alt_text).unwrap_or_else(|| format!("Flag of {}", name));

        Self {
            capital,
            population,
            area,
            region,
            languages: padded(languages, UNKNOWN),
            currencies: padded(currencies, UNKNOWN),
            timezones: padded(timezones, "UTC"),
            gdp: estimated_gdp(population),
            flag_image_url,
            flag_alt_text,
            popularity_rank: population as f64,
            name,
        }
    }

    pub fn primary_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or(UNKNOWN)
    }

    pub fn primary_currency(&self) -> &str {
        self.currencies.first().map(String::as_str).unwrap_or(UNKNOWN)
    }

    pub fn primary_timezone(&self) -> &str {
        self.timezones.first().map(String::as_str).unwrap_or("UTC")
    }

    pub fn has_capital(&self) -> bool {
        self.capital != NOT_AVAILABLE
    }
}

/// Rough economic size: population times a flat per-capita figure.
/// This is synthetic quiz data, not a real GDP series.
pub fn estimated_gdp(population: u64) -> f64 {
    population as f64 * 15_000.0
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn padded(values: Vec<String>, sentinel: &str) -> Vec<String> {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        vec![sentinel.to_string()]
    } else {
        values
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Population,
    Area,
    Gdp,
    Capital,
    Currency,
    Languages,
    Timezone,
    Flag,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Population,
        Category::Area,
        Category::Gdp,
        Category::Capital,
        Category::Currency,
        Category::Languages,
        Category::Timezone,
        Category::Flag,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Population => "population",
            Category::Area => "area",
            Category::Gdp => "gdp",
            Category::Capital => "capital",
            Category::Currency => "currency",
            Category::Languages => "languages",
            Category::Timezone => "timezone",
            Category::Flag => "flag",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuizError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Medium => f.write_str("medium"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

/// One image button of a flag question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagOption {
    pub image_url: String,
    pub alt_text: String,
    pub answer_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDescriptor {
    pub category: Category,
    pub prompt_text: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub explanation_text: String,
    pub media_payload: Option<Vec<FlagOption>>,
    pub subject_country_name: String,
}

impl QuestionDescriptor {
    pub fn get_options(&self) -> Vec<String> {
        self.options.clone()
    }

    pub fn is_correct(&self, submitted: &str) -> bool {
        submitted == self.correct_answer
    }
}
