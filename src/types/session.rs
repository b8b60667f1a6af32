use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    InProgress { questions_asked: u32, max_questions: u32 },
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub streak: u32,
    pub explanation: String,
    pub correct_answer: String,
    pub bonus_awarded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub wrong_count: u32,
    pub streak: u32,
    pub question_index: u32,
    pub total_questions: u32,
    pub percentage: u32,
}

impl SessionStats {
    pub fn percentage_of(score: u32, question_index: u32) -> u32 {
        if question_index == 0 {
            return 0;
        }
        (score as f64 / question_index as f64 * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub stats: SessionStats,
    pub best_streak: u32,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: i64,
    pub rating: String,
}

impl SessionSummary {
    pub fn rating_for(percentage: u32) -> &'static str {
        if percentage >= 80 {
            "Excellent"
        } else if percentage >= 50 {
            "Good effort"
        } else {
            "Keep practicing"
        }
    }
}
