use rand::seq::SliceRandom;
use rand::RngCore;

use crate::generator::{push_unique, QuestionBuilder};
use crate::types::{Category, CountryRecord, Difficulty, FlagOption};

/// "Which flag belongs to X?" Options are image URLs; the front-end renders
/// them from the media payload.
pub struct FlagQuestion;

fn other_flags<'a>(subject: &CountryRecord, pool: &'a [CountryRecord]) -> Vec<&'a str> {
    let mut flags: Vec<&str> = pool
        .iter()
        .filter(|c| c.name != subject.name)
        .map(|c| c.flag_image_url.as_str())
        .filter(|url| !url.is_empty() && *url != subject.flag_image_url)
        .collect();
    flags.sort_unstable();
    flags.dedup();
    flags
}

impl QuestionBuilder for FlagQuestion {
    fn category(&self) -> Category {
        Category::Flag
    }

    fn applies_to(&self, subject: &CountryRecord, pool: &[CountryRecord]) -> bool {
        !subject.flag_image_url.is_empty() && other_flags(subject, pool).len() >= 3
    }

    fn prompt(&self, subject: &CountryRecord) -> String {
        format!("Which flag belongs to {}?", subject.name)
    }

    fn correct_answer(&self, subject: &CountryRecord) -> String {
        subject.flag_image_url.clone()
    }

    fn distractors(
        &self,
        subject: &CountryRecord,
        correct: &str,
        pool: &[CountryRecord],
        _difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let mut flags = other_flags(subject, pool);
        flags.shuffle(rng);

        let mut chosen = vec![correct.to_string()];
        for url in flags {
            if chosen.len() == 4 {
                break;
            }
            push_unique(&mut chosen, url.to_string());
        }
        chosen.into_iter().skip(1).collect()
    }

    fn explanation(&self, subject: &CountryRecord, _correct: &str) -> String {
        format!("This is the flag of {}. {}", subject.name, subject.flag_alt_text)
    }

    fn media(&self, options: &[String], _pool: &[CountryRecord]) -> Option<Vec<FlagOption>> {
        // Alt text stays neutral so it cannot give the answer away.
        let payload = options
            .iter()
            .enumerate()
            .map(|(i, url)| FlagOption {
                image_url: url.clone(),
                alt_text: format!("Flag option {}", i + 1),
                answer_token: url.clone(),
            })
            .collect();
        Some(payload)
    }
}
