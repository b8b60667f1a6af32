use std::error::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use country_trivia_quiz::{
    command_handler, start_progress_reporter, Command, QuizConfig, QuizEngine,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    log::info!("Starting country trivia...");

    let config = QuizConfig::from_env()?;
    log::info!("Configuration: {:?}", config);

    let (tx, rx) = mpsc::unbounded_channel();
    let reporter = start_progress_reporter(rx);

    let mut engine = match QuizEngine::initialize(&config, Some(tx)).await {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Failed to load country data: {}", e);
            eprintln!("Could not load country data. Check your connection and try again.");
            return Err(e.into());
        }
    };
    // The provider's sender is gone once loading finishes.
    let _ = reporter.await;
    log::info!("Loaded {} countries", engine.countries().len());

    println!("{}", Command::descriptions());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let reply = match Command::parse(&line) {
            Some(cmd) => command_handler(&mut engine, cmd),
            None => {
                println!("Unknown command. Use /help.");
                continue;
            }
        };

        println!("{}", reply.text);
        if reply.quit {
            break;
        }
    }

    Ok(())
}
