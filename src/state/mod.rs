use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::generator;
use crate::provider::{CountryDataProvider, LoadProgress};
use crate::types::{
    AnswerOutcome, CountryRecord, Difficulty, GameState, QuestionDescriptor, SessionStats,
    SessionSummary,
};

/// Counters for one quiz run.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub score: u32,
    pub wrong_count: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub question_index: u32,
    pub current_question: Option<QuestionDescriptor>,
    pub answered: bool,
    pub started_at: Option<DateTime<Utc>>,
}

/// Owns the loaded countries and the running session. Not internally
/// synchronized; share it behind a lock if more than one task needs it.
pub struct QuizEngine {
    countries: Vec<CountryRecord>,
    session: SessionState,
    total_questions: u32,
    difficulty: Difficulty,
    rng: StdRng,
}

impl QuizEngine {
    /// Loads country data using the configured sources and returns a ready
    /// engine. Fails only when no source produced any country.
    pub async fn initialize(
        config: &QuizConfig,
        progress: Option<UnboundedSender<LoadProgress>>,
    ) -> Result<Self, QuizError> {
        let mut provider = CountryDataProvider::from_config(&config.data)?;
        if let Some(sender) = progress {
            provider = provider.with_progress(sender);
        }
        Self::initialize_with(&provider, config, StdRng::from_entropy()).await
    }

    pub async fn initialize_with(
        provider: &CountryDataProvider,
        config: &QuizConfig,
        mut rng: StdRng,
    ) -> Result<Self, QuizError> {
        let countries = provider.load(&mut rng).await?;
        Ok(Self::from_countries(countries, config, rng))
    }

    pub fn from_countries(countries: Vec<CountryRecord>, config: &QuizConfig, rng: StdRng) -> Self {
        Self {
            countries: crate::provider::finalize(countries),
            session: SessionState::default(),
            total_questions: config.total_questions,
            difficulty: config.difficulty,
            rng,
        }
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_question(&self) -> Option<&QuestionDescriptor> {
        self.session.current_question.as_ref()
    }

    pub fn game_state(&self) -> GameState {
        if self.session.question_index == 0 {
            GameState::NotStarted
        } else if self.session.question_index >= self.total_questions && self.session.answered {
            GameState::Completed
        } else {
            GameState::InProgress {
                questions_asked: self.session.question_index,
                max_questions: self.total_questions,
            }
        }
    }

    /// `None` once every question of the session has been asked.
    pub fn next_question(&mut self) -> Result<Option<&QuestionDescriptor>, QuizError> {
        if self.session.question_index >= self.total_questions {
            return Ok(None);
        }

        let pool = select_pool(self.difficulty, &self.countries);
        let question = generator::generate(self.difficulty, pool, &mut self.rng)?;

        self.session.question_index += 1;
        self.session.answered = false;
        if self.session.started_at.is_none() {
            self.session.started_at = Some(Utc::now());
        }
        log::debug!(
            "Question {}/{}: {}",
            self.session.question_index,
            self.total_questions,
            question.prompt_text
        );
        self.session.current_question = Some(question);
        Ok(self.session.current_question.as_ref())
    }

    /// Scores `submitted` against the current question. Calling it twice for
    /// one question scores twice; the front-end is expected to prevent that.
    pub fn check_answer(&mut self, submitted: &str) -> Option<AnswerOutcome> {
        let question = self.session.current_question.as_ref()?;
        let is_correct = question.is_correct(submitted);
        let explanation = question.explanation_text.clone();
        let correct_answer = question.correct_answer.clone();

        let session = &mut self.session;
        let mut bonus_awarded = false;
        if is_correct {
            session.score += 1;
            session.streak += 1;
            session.best_streak = session.best_streak.max(session.streak);
            if session.streak % 3 == 0 {
                session.score += 1;
                bonus_awarded = true;
            }
        } else {
            session.wrong_count += 1;
            session.streak = 0;
        }
        session.answered = true;

        Some(AnswerOutcome {
            is_correct,
            streak: session.streak,
            explanation,
            correct_answer,
            bonus_awarded,
        })
    }

    pub fn get_stats(&self) -> SessionStats {
        let s = &self.session;
        SessionStats {
            score: s.score,
            wrong_count: s.wrong_count,
            streak: s.streak,
            question_index: s.question_index,
            total_questions: self.total_questions,
            percentage: SessionStats::percentage_of(s.score, s.question_index),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let stats = self.get_stats();
        let elapsed_seconds = self
            .session
            .started_at
            .map(|t| (Utc::now() - t).num_seconds())
            .unwrap_or(0);
        SessionSummary {
            stats,
            best_streak: self.session.best_streak,
            started_at: self.session.started_at,
            elapsed_seconds,
            rating: SessionSummary::rating_for(stats.percentage).to_string(),
        }
    }

    pub fn reset(&mut self) {
        log::info!("Resetting quiz session ({} difficulty)", self.difficulty);
        self.session = SessionState::default();
    }

    /// Unknown levels are ignored and leave the session untouched. Returns
    /// whether the level was applied.
    pub fn set_difficulty(&mut self, level: &str) -> bool {
        match level.parse::<Difficulty>() {
            Ok(difficulty) => {
                self.difficulty = difficulty;
                self.reset();
                true
            }
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }
}

/// The prefix of the popularity-sorted countries eligible at `difficulty`.
pub fn select_pool(difficulty: Difficulty, countries: &[CountryRecord]) -> &[CountryRecord] {
    let (window, cap) = match difficulty {
        Difficulty::Easy => (50, 30),
        Difficulty::Medium => (countries.len(), 100),
        Difficulty::Hard => (countries.len(), 200),
    };
    let len = countries.len().min(window).min(cap);
    &countries[..len]
}
