use rand::seq::SliceRandom;
use rand::RngCore;

use crate::generator::{push_unique, QuestionBuilder};
use crate::types::{Category, CountryRecord, Difficulty, NOT_AVAILABLE, UNKNOWN};

const COMMON_CAPITALS: [&str; 12] = [
    "London", "Paris", "Berlin", "Madrid", "Rome", "Tokyo", "Beijing", "Moscow", "Cairo",
    "Ottawa", "Canberra", "Brasília",
];

const COMMON_CURRENCIES: [&str; 12] = [
    "Euro",
    "United States dollar",
    "Japanese yen",
    "British pound",
    "Swiss franc",
    "Chinese yuan",
    "Indian rupee",
    "Russian ruble",
    "Brazilian real",
    "Mexican peso",
    "South African rand",
    "Australian dollar",
];

const COMMON_LANGUAGES: [&str; 16] = [
    "English", "Spanish", "French", "Arabic", "Portuguese", "Russian", "German", "Mandarin",
    "Hindi", "Bengali", "Japanese", "Swahili", "Italian", "Turkish", "Korean", "Dutch",
];

const COMMON_TIMEZONES: [&str; 12] = [
    "UTC-08:00", "UTC-05:00", "UTC-03:00", "UTC+00:00", "UTC+01:00", "UTC+02:00", "UTC+03:00",
    "UTC+05:30", "UTC+07:00", "UTC+08:00", "UTC+09:00", "UTC+10:00",
];

/// Shown instead of the "Unknown" sentinel so the correct option is still a
/// real language. Display guard only, not a claim about the country.
const LANGUAGE_STAND_IN: &str = "English";

/// Capital, currency, language and time zone questions. Wrong answers are
/// sampled from the other countries in the pool, then from a fixed list of
/// well-known values.
pub struct ListQuestion {
    category: Category,
}

impl ListQuestion {
    pub const fn new(category: Category) -> Self {
        Self { category }
    }

    fn values_of<'a>(&self, country: &'a CountryRecord) -> Vec<&'a str> {
        match self.category {
            Category::Capital => vec![country.capital.as_str()],
            Category::Currency => country.currencies.iter().map(String::as_str).collect(),
            Category::Languages => country.languages.iter().map(String::as_str).collect(),
            _ => country.timezones.iter().map(String::as_str).collect(),
        }
    }

    fn fallback(&self) -> &'static [&'static str] {
        match self.category {
            Category::Capital => &COMMON_CAPITALS,
            Category::Currency => &COMMON_CURRENCIES,
            Category::Languages => &COMMON_LANGUAGES,
            _ => &COMMON_TIMEZONES,
        }
    }

    /// Languages and time zones mix pool values and the fixed list before
    /// sampling; capitals and currencies only fall back to it.
    fn merges_fallback(&self) -> bool {
        matches!(self.category, Category::Languages | Category::Timezone)
    }
}

fn usable(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != UNKNOWN && value != NOT_AVAILABLE
}

/// `UTC-12:00` through `UTC+14:00` in random order.
fn synthetic_offsets(rng: &mut dyn RngCore) -> Vec<String> {
    let mut offsets: Vec<String> = (-12i32..=14).map(|h| format!("UTC{:+03}:00", h)).collect();
    offsets.shuffle(rng);
    offsets
}

impl QuestionBuilder for ListQuestion {
    fn category(&self) -> Category {
        self.category
    }

    fn applies_to(&self, subject: &CountryRecord, _pool: &[CountryRecord]) -> bool {
        match self.category {
            Category::Capital => subject.has_capital(),
            Category::Currency => subject.primary_currency() != UNKNOWN,
            _ => true,
        }
    }

    fn prompt(&self, subject: &CountryRecord) -> String {
        match self.category {
            Category::Capital => format!("What is the capital of {}?", subject.name),
            Category::Currency => format!("Which currency is used in {}?", subject.name),
            Category::Languages => format!("Which language is spoken in {}?", subject.name),
            _ => format!("Which time zone does {} use?", subject.name),
        }
    }

    fn correct_answer(&self, subject: &CountryRecord) -> String {
        match self.category {
            Category::Capital => subject.capital.clone(),
            Category::Currency => subject.primary_currency().to_string(),
            Category::Languages => match subject.primary_language() {
                UNKNOWN => LANGUAGE_STAND_IN.to_string(),
                language => language.to_string(),
            },
            _ => subject.primary_timezone().to_string(),
        }
    }

    fn distractors(
        &self,
        subject: &CountryRecord,
        correct: &str,
        pool: &[CountryRecord],
        _difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let own: Vec<&str> = self.values_of(subject);
        let mut candidates: Vec<&str> = pool
            .iter()
            .filter(|c| c.name != subject.name)
            .flat_map(|c| self.values_of(c))
            .filter(|v| usable(v) && !own.contains(v))
            .collect();

        let mut fallback: Vec<&str> = self
            .fallback()
            .iter()
            .copied()
            .filter(|v| !own.contains(v))
            .collect();

        if self.merges_fallback() {
            candidates.append(&mut fallback);
        }
        candidates.shuffle(rng);
        fallback.shuffle(rng);

        let mut chosen = vec![correct.to_string()];
        for value in candidates.into_iter().chain(fallback) {
            if chosen.len() == 4 {
                break;
            }
            push_unique(&mut chosen, value.to_string());
        }

        if chosen.len() < 4 && self.category == Category::Timezone {
            for offset in synthetic_offsets(rng) {
                if chosen.len() == 4 {
                    break;
                }
                if !own.contains(&offset.as_str()) {
                    push_unique(&mut chosen, offset);
                }
            }
        }

        chosen.into_iter().skip(1).collect()
    }

    fn explanation(&self, subject: &CountryRecord, correct: &str) -> String {
        match self.category {
            Category::Capital => format!("The capital of {} is {}.", subject.name, correct),
            Category::Currency => format!("{} uses the {}.", subject.name, correct),
            Category::Languages if subject.primary_language() == UNKNOWN => {
                format!("No language data is available for {}.", subject.name)
            }
            Category::Languages => format!("{} is spoken in {}.", correct, subject.name),
            _ => format!("{} is in the {} time zone.", subject.name, correct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::test_support::{country, pool};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn distinct(values: &[String]) -> bool {
        let mut sorted = values.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted.len() == values.len()
    }

    #[test]
    fn capital_distractors_come_from_the_pool() {
        let pool = pool();
        let q = ListQuestion::new(Category::Capital);
        let mut rng = StdRng::seed_from_u64(4);

        let wrong = q.distractors(&pool[0], "Alphaville", &pool, Difficulty::Medium, &mut rng);
        assert_eq!(wrong.len(), 3);
        assert!(distinct(&wrong));
        let capitals: Vec<&str> = pool[1..].iter().map(|c| c.capital.as_str()).collect();
        assert!(wrong.iter().all(|w| capitals.contains(&w.as_str())));
    }

    #[test]
    fn capital_skips_unknown_and_pads_from_fallback() {
        let mut unknown = country("Ghost", "x", 1, 1.0);
        unknown.capital = NOT_AVAILABLE.to_string();
        let subject = country("Alpha", "Alphaville", 1, 1.0);
        let pool = vec![subject.clone(), unknown];

        let q = ListQuestion::new(Category::Capital);
        let wrong = q.distractors(&subject, "Alphaville", &pool, Difficulty::Easy, &mut StdRng::seed_from_u64(1));
        assert_eq!(wrong.len(), 3);
        assert!(!wrong.iter().any(|w| w == NOT_AVAILABLE));
        assert!(wrong.iter().all(|w| COMMON_CAPITALS.contains(&w.as_str())));
    }

    #[test]
    fn capital_question_needs_a_known_capital() {
        let mut subject = country("Ghost", "x", 1, 1.0);
        subject.capital = NOT_AVAILABLE.to_string();
        assert!(!ListQuestion::new(Category::Capital).applies_to(&subject, &[]));
        assert!(ListQuestion::new(Category::Currency).applies_to(&subject, &[]));
    }

    #[test]
    fn currency_distractors_prefer_the_pool() {
        let pool = pool();
        let q = ListQuestion::new(Category::Currency);
        let mut rng = StdRng::seed_from_u64(7);

        let correct = q.correct_answer(&pool[0]);
        assert_eq!(correct, "Alpha dollar");
        let wrong = q.distractors(&pool[0], &correct, &pool, Difficulty::Medium, &mut rng);
        assert_eq!(wrong.len(), 3);
        assert!(distinct(&wrong));
        let others: Vec<&str> = pool[1..].iter().map(|c| c.primary_currency()).collect();
        assert!(wrong.iter().all(|w| others.contains(&w.as_str())));
    }

    #[test]
    fn currency_falls_back_to_common_list_when_pool_is_exhausted() {
        let subject = country("Solo", "S", 1, 1.0);
        let mut unknown = country("Ghost", "G", 1, 1.0);
        unknown.currencies = vec![UNKNOWN.to_string()];
        let pool = vec![subject.clone(), unknown, country("Pair", "P", 1, 1.0)];
        let q = ListQuestion::new(Category::Currency);

        let wrong = q.distractors(&subject, "Solo dollar", &pool, Difficulty::Easy, &mut StdRng::seed_from_u64(3));
        assert_eq!(wrong.len(), 3);
        assert!(distinct(&wrong));
        assert_eq!(wrong[0], "Pair dollar");
        assert!(!wrong.iter().any(|w| w == UNKNOWN));
        assert!(wrong[1..].iter().all(|w| COMMON_CURRENCIES.contains(&w.as_str())));
    }

    #[test]
    fn currency_question_needs_a_known_currency() {
        let mut subject = country("Ghost", "Ghosttown", 1, 1.0);
        subject.currencies = vec![UNKNOWN.to_string()];
        assert!(!ListQuestion::new(Category::Currency).applies_to(&subject, &[]));
        assert!(ListQuestion::new(Category::Capital).applies_to(&subject, &[]));
    }

    #[test]
    fn unknown_language_uses_stand_in() {
        let mut subject = country("Mystery", "M", 1, 1.0);
        subject.languages = vec![UNKNOWN.to_string()];
        let q = ListQuestion::new(Category::Languages);

        let correct = q.correct_answer(&subject);
        assert_eq!(correct, LANGUAGE_STAND_IN);
        let wrong = q.distractors(&subject, &correct, &[subject.clone()], Difficulty::Hard, &mut StdRng::seed_from_u64(8));
        assert_eq!(wrong.len(), 3);
        assert!(!wrong.contains(&correct));
        assert!(distinct(&wrong));
    }

    #[test]
    fn language_distractors_never_include_other_official_languages() {
        let mut subject = country("Duo", "D", 1, 1.0);
        subject.languages = vec!["French".to_string(), "German".to_string()];
        let q = ListQuestion::new(Category::Languages);
        let mut rng = StdRng::seed_from_u64(12);

        for _ in 0..50 {
            let wrong = q.distractors(&subject, "French", &[subject.clone()], Difficulty::Easy, &mut rng);
            assert!(!wrong.iter().any(|w| w == "German" || w == "French"));
        }
    }

    #[test]
    fn timezone_synthesizes_offsets_when_everything_is_taken() {
        let mut subject = country("Wide", "W", 1, 1.0);
        subject.timezones = COMMON_TIMEZONES.iter().map(|s| s.to_string()).collect();
        let q = ListQuestion::new(Category::Timezone);

        let correct = q.correct_answer(&subject);
        let wrong = q.distractors(&subject, &correct, &[subject.clone()], Difficulty::Medium, &mut StdRng::seed_from_u64(6));
        assert_eq!(wrong.len(), 3);
        assert!(distinct(&wrong));
        assert!(wrong.iter().all(|w| w.starts_with("UTC") && !COMMON_TIMEZONES.contains(&w.as_str())));
    }
}
