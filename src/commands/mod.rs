/// Input understood by the console front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Next,
    Answer(usize),
    Stats,
    Difficulty(String),
    Restart,
    Help,
    Quit,
}

impl Command {
    /// `None` for input that is neither a command nor an option number.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if let Ok(n) = line.parse::<usize>() {
            return Some(Command::Answer(n));
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let name = parts.next()?.trim_start_matches('/').to_lowercase();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name.as_str() {
            "start" => Some(Command::Start),
            "next" | "question" => Some(Command::Next),
            "stats" => Some(Command::Stats),
            "difficulty" => Some(Command::Difficulty(arg.to_string())),
            "restart" => Some(Command::Restart),
            "help" => Some(Command::Help),
            "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn descriptions() -> &'static str {
        "Available commands:\n\
         /start - Start a quiz\n\
         /next - Show the next question\n\
         1-4 - Answer the current question\n\
         /stats - Show your score\n\
         /difficulty <easy|medium|hard> - Change difficulty and restart\n\
         /restart - Start over\n\
         /help - Show this message\n\
         /quit - Leave"
    }
}
