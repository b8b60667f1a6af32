use rand::RngCore;

use crate::generator::format::{format_area, format_gdp, format_population};
use crate::generator::{push_unique, QuestionBuilder};
use crate::types::{estimated_gdp, Category, CountryRecord, Difficulty};

/// Population, area and GDP questions. Wrong answers are the true value
/// scaled by a per-difficulty set of multipliers, so harder levels sit
/// closer to the truth.
pub struct NumericQuestion {
    category: Category,
}

impl NumericQuestion {
    pub const fn new(category: Category) -> Self {
        Self { category }
    }

    pub fn value(&self, country: &CountryRecord) -> f64 {
        match self.category {
            Category::Area => country.area,
            Category::Gdp => estimated_gdp(country.population),
            _ => country.population as f64,
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self.category {
            Category::Area => format_area(value),
            Category::Gdp => format_gdp(value),
            _ => format_population(value),
        }
    }

    pub fn multipliers(&self, difficulty: Difficulty) -> [f64; 3] {
        match (self.category, difficulty) {
            (Category::Area, Difficulty::Easy) => [0.4, 2.5, 6.0],
            (Category::Area, Difficulty::Medium) => [0.6, 1.7, 3.5],
            (Category::Area, Difficulty::Hard) => [0.8, 1.2, 1.6],
            (Category::Gdp, Difficulty::Easy) => [0.3, 2.0, 7.0],
            (Category::Gdp, Difficulty::Medium) => [0.5, 1.8, 4.0],
            (Category::Gdp, Difficulty::Hard) => [0.75, 1.25, 1.9],
            (_, Difficulty::Easy) => [0.5, 2.0, 5.0],
            (_, Difficulty::Medium) => [0.7, 1.5, 3.0],
            (_, Difficulty::Hard) => [0.85, 1.15, 1.4],
        }
    }
}

impl QuestionBuilder for NumericQuestion {
    fn category(&self) -> Category {
        self.category
    }

    fn prompt(&self, subject: &CountryRecord) -> String {
        match self.category {
            Category::Area => format!("What is the total area of {}?", subject.name),
            Category::Gdp => format!("What is the estimated GDP of {}?", subject.name),
            _ => format!("What is the population of {}?", subject.name),
        }
    }

    fn correct_answer(&self, subject: &CountryRecord) -> String {
        self.format(self.value(subject))
    }

    fn distractors(
        &self,
        subject: &CountryRecord,
        correct: &str,
        _pool: &[CountryRecord],
        difficulty: Difficulty,
        _rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let value = self.value(subject);
        let mut chosen = vec![correct.to_string()];

        for m in self.multipliers(difficulty) {
            push_unique(&mut chosen, self.format(value * m));
        }

        // Tiny or zero values collapse to the same display string; walk
        // upwards until three distinct strings exist.
        let step = (value * 0.25).max(1.0);
        let mut k = 1.0;
        while chosen.len() < 4 {
            push_unique(&mut chosen, self.format(value + step * k));
            k += 1.0;
        }

        chosen.into_iter().skip(1).collect()
    }

    fn explanation(&self, subject: &CountryRecord, correct: &str) -> String {
        match self.category {
            Category::Area => format!("{} covers {}.", subject.name, correct),
            Category::Gdp => format!(
                "{}'s estimated GDP is {} (population × $15,000 per person).",
                subject.name, correct
            ),
            _ => format!("{} has a population of about {}.", subject.name, correct),
        }
    }
}
