use crate::commands::Command;
use crate::handlers::{handle_answer, Reply};
use crate::keyboard::create_keyboard;
use crate::state::QuizEngine;
use crate::types::{GameState, QuestionDescriptor};

pub fn command_handler(engine: &mut QuizEngine, cmd: Command) -> Reply {
    match cmd {
        Command::Start => {
            if engine.game_state() != GameState::NotStarted {
                engine.reset();
            }
            let intro = format!(
                "🌍 Country trivia: {} questions, {} difficulty.",
                engine.get_stats().total_questions,
                engine.difficulty()
            );
            let question = ask_next(engine);
            Reply::text(format!("{}\n\n{}", intro, question.text))
        }
        Command::Next => {
            let awaiting_answer = engine.current_question().is_some() && !engine.session().answered;
            if awaiting_answer {
                return Reply::text("Answer the current question first (1-4).");
            }
            ask_next(engine)
        }
        Command::Answer(choice) => handle_answer(engine, choice),
        Command::Stats => {
            let stats = engine.get_stats();
            Reply::text(format!(
                "Score: {}\nWrong: {}\nStreak: {}\nQuestion: {}/{}\nAccuracy: {}%",
                stats.score,
                stats.wrong_count,
                stats.streak,
                stats.question_index,
                stats.total_questions,
                stats.percentage
            ))
        }
        Command::Difficulty(level) => {
            if engine.set_difficulty(&level) {
                Reply::text(format!(
                    "Difficulty set to {}. Use /start to begin a new quiz.",
                    engine.difficulty()
                ))
            } else {
                Reply::text(format!(
                    "Difficulty stays {}. Choose easy, medium or hard.",
                    engine.difficulty()
                ))
            }
        }
        Command::Restart => {
            engine.reset();
            Reply::text("Quiz restarted. Use /start to begin.")
        }
        Command::Help => Reply::text(Command::descriptions()),
        Command::Quit => Reply::quit("Goodbye!"),
    }
}

/// Generates and renders the next question, or the summary when done.
pub fn ask_next(engine: &mut QuizEngine) -> Reply {
    let total = engine.get_stats().total_questions;
    match engine.next_question() {
        Ok(Some(question)) => {
            let question = question.clone();
            let index = engine.get_stats().question_index;
            Reply::text(render_question(&question, index, total))
        }
        Ok(None) => Reply::text(render_summary(engine)),
        Err(e) => {
            log::error!("Failed to generate question: {}", e);
            Reply::text("Sorry, no question could be generated.")
        }
    }
}

pub fn render_question(question: &QuestionDescriptor, index: u32, total: u32) -> String {
    let buttons = create_keyboard(question, None, false)
        .into_iter()
        .enumerate()
        .map(|(i, b)| match b.image_url {
            Some(url) => format!("{}) 🏳 {}", i + 1, url),
            None => format!("{}) {}", i + 1, b.label),
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Question {}/{}\n\n{}\n{}", index, total, question.prompt_text, buttons)
}

pub fn render_summary(engine: &QuizEngine) -> String {
    let summary = engine.summary();
    format!(
        "🏁 Quiz completed!\nScore: {}\nCorrect streak record: {}\nWrong answers: {}\nAccuracy: {}%\nTime: {}s\n{}\n\nUse /start to play again.",
        summary.stats.score,
        summary.best_streak,
        summary.stats.wrong_count,
        summary.stats.percentage,
        summary.elapsed_seconds,
        summary.rating
    )
}
