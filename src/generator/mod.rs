use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::error::QuizError;
use crate::types::{Category, CountryRecord, Difficulty, FlagOption, QuestionDescriptor};

mod flag;
pub mod format;
mod lists;
mod numeric;

pub use flag::FlagQuestion;
pub use format::{format_area, format_gdp, format_population, group_thousands};
pub use lists::ListQuestion;
pub use numeric::NumericQuestion;

pub const OPTION_COUNT: usize = 4;

/// Per-category question rules: how to phrase the prompt, where the correct
/// answer comes from and how wrong answers are made up.
pub trait QuestionBuilder: Sync {
    fn category(&self) -> Category;

    /// Whether a sensible question of this kind exists for `subject`.
    fn applies_to(&self, _subject: &CountryRecord, _pool: &[CountryRecord]) -> bool {
        true
    }

    fn prompt(&self, subject: &CountryRecord) -> String;

    fn correct_answer(&self, subject: &CountryRecord) -> String;

    /// Exactly three distinct values, none equal to `correct`.
    fn distractors(
        &self,
        subject: &CountryRecord,
        correct: &str,
        pool: &[CountryRecord],
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Vec<String>;

    fn explanation(&self, subject: &CountryRecord, correct: &str) -> String;

    fn media(&self, _options: &[String], _pool: &[CountryRecord]) -> Option<Vec<FlagOption>> {
        None
    }
}

static POPULATION: NumericQuestion = NumericQuestion::new(Category::Population);
static AREA: NumericQuestion = NumericQuestion::new(Category::Area);
static GDP: NumericQuestion = NumericQuestion::new(Category::Gdp);
static CAPITAL: ListQuestion = ListQuestion::new(Category::Capital);
static CURRENCY: ListQuestion = ListQuestion::new(Category::Currency);
static LANGUAGES: ListQuestion = ListQuestion::new(Category::Languages);
static TIMEZONE: ListQuestion = ListQuestion::new(Category::Timezone);
static FLAG: FlagQuestion = FlagQuestion;

pub fn builder_for(category: Category) -> &'static dyn QuestionBuilder {
    match category {
        Category::Population => &POPULATION,
        Category::Area => &AREA,
        Category::Gdp => &GDP,
        Category::Capital => &CAPITAL,
        Category::Currency => &CURRENCY,
        Category::Languages => &LANGUAGES,
        Category::Timezone => &TIMEZONE,
        Category::Flag => &FLAG,
    }
}

/// Random category, random subject, four shuffled options.
pub fn generate<R: Rng>(
    difficulty: Difficulty,
    pool: &[CountryRecord],
    rng: &mut R,
) -> Result<QuestionDescriptor, QuizError> {
    let mut category = *Category::ALL.choose(rng).ok_or(QuizError::EmptyPool)?;
    let subject = pool.choose(rng).ok_or(QuizError::EmptyPool)?;

    if !builder_for(category).applies_to(subject, pool) {
        let applicable: Vec<Category> = Category::ALL
            .iter()
            .copied()
            .filter(|c| builder_for(*c).applies_to(subject, pool))
            .collect();
        let fallback = *applicable.choose(rng).ok_or(QuizError::EmptyPool)?;
        log::debug!(
            "{} question not possible for {}, using {}",
            category,
            subject.name,
            fallback
        );
        category = fallback;
    }

    Ok(build_question(category, subject, pool, difficulty, rng))
}

/// Builds one question of a fixed category about `subject`.
pub fn build_question<R: Rng>(
    category: Category,
    subject: &CountryRecord,
    pool: &[CountryRecord],
    difficulty: Difficulty,
    rng: &mut R,
) -> QuestionDescriptor {
    let builder = builder_for(category);
    let correct = builder.correct_answer(subject);

    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.clone());
    for wrong in builder.distractors(subject, &correct, pool, difficulty, &mut *rng) {
        push_unique(&mut options, wrong);
    }
    options.truncate(OPTION_COUNT);
    options.shuffle(rng);

    log::debug!(
        "{} question about {} ({} options)",
        category,
        subject.name,
        options.len()
    );

    QuestionDescriptor {
        category,
        prompt_text: builder.prompt(subject),
        media_payload: builder.media(&options, pool),
        explanation_text: builder.explanation(subject, &correct),
        correct_answer: correct,
        options,
        subject_country_name: subject.name.clone(),
    }
}

/// Appends `candidate` when it is not already present.
pub(crate) fn push_unique(chosen: &mut Vec<String>, candidate: String) -> bool {
    if candidate.is_empty() || chosen.contains(&candidate) {
        return false;
    }
    chosen.push(candidate);
    true
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::CountryRecord;

    pub fn country(name: &str, capital: &str, population: u64, area: f64) -> CountryRecord {
        CountryRecord::new(
            name.to_string(),
            Some(capital.to_string()),
            population,
            Some(area),
            Some("Europe".to_string()),
            vec![format!("{}ish", name)],
            vec![format!("{} dollar", name)],
            vec!["UTC+01:00".to_string()],
            format!("https://flags.test/{}.png", name.to_lowercase()),
            None,
        )
    }

    pub fn pool() -> Vec<CountryRecord> {
        vec![
            country("Alpha", "Alphaville", 120_000_000, 500_000.0),
            country("Bravo", "Bravopolis", 60_000_000, 300_000.0),
            country("Charlie", "Charleston", 30_000_000, 90_000.0),
            country("Delta", "Deltaburg", 8_000_000, 40_000.0),
            country("Echo", "Echoton", 2_000_000, 20_000.0),
            country("Foxtrot", "Foxhole", 500_000, 2_500.0),
        ]
    }
}
