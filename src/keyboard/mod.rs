use crate::types::QuestionDescriptor;

/// One answer button as a front-end would draw it: a text label, or an
/// image for flag questions. `token` is what gets submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerButton {
    pub label: String,
    pub token: String,
    pub image_url: Option<String>,
}

pub fn create_keyboard(
    question: &QuestionDescriptor,
    selected_answer: Option<&str>,
    show_correct: bool,
) -> Vec<AnswerButton> {
    let base: Vec<AnswerButton> = match &question.media_payload {
        Some(media) => media
            .iter()
            .map(|m| AnswerButton {
                label: m.alt_text.clone(),
                token: m.answer_token.clone(),
                image_url: Some(m.image_url.clone()),
            })
            .collect(),
        None => question
            .options
            .iter()
            .map(|option| AnswerButton {
                label: option.clone(),
                token: option.clone(),
                image_url: None,
            })
            .collect(),
    };

    base.into_iter()
        .map(|mut button| {
            if show_correct {
                let is_answer = button.token == question.correct_answer;
                let is_selected = selected_answer == Some(button.token.as_str());
                if is_answer {
                    button.label = format!("✅ {}", button.label);
                } else if is_selected {
                    button.label = format!("❌ {}", button.label);
                }
            }
            button
        })
        .collect()
}
