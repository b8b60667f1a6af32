use crate::handlers::{ask_next, Reply};
use crate::keyboard::create_keyboard;
use crate::state::QuizEngine;

/// Handles a numbered answer, shows the marked options, then moves on.
pub fn handle_answer(engine: &mut QuizEngine, choice: usize) -> Reply {
    let question = match engine.current_question() {
        Some(q) if !engine.session().answered => q.clone(),
        _ => return Reply::text("There is no open question. Use /start or /next."),
    };

    let buttons = create_keyboard(&question, None, false);
    let token = match choice.checked_sub(1).and_then(|i| buttons.get(i)) {
        Some(button) => button.token.clone(),
        None => return Reply::text(format!("Pick a number from 1 to {}.", buttons.len())),
    };

    let outcome = match engine.check_answer(&token) {
        Some(outcome) => outcome,
        None => return Reply::text("There is no open question."),
    };

    let marked = create_keyboard(&question, Some(&token), true)
        .into_iter()
        .enumerate()
        .map(|(i, b)| format!("{}) {}", i + 1, b.label))
        .collect::<Vec<_>>()
        .join("\n");

    let mut text = if outcome.is_correct {
        format!("🎉 Correct! Streak: {}", outcome.streak)
    } else {
        "❌ Sorry, that's incorrect!".to_string()
    };
    if outcome.bonus_awarded {
        text.push_str("\n🔥 Streak bonus: +1 point!");
    }
    text.push_str(&format!("\n{}\n{}\n\n{}", marked, outcome.explanation, ask_next(engine).text));

    Reply::text(text)
}
