#[cfg(test)]
mod tests {
    use country_trivia_quiz::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bulk_country(i: usize) -> serde_json::Value {
        serde_json::json!({
            "name": {"common": format!("Country {}", i)},
            "capital": [format!("Capital {}", i)],
            "population": (200 - i) as u64 * 1_000_000,
            "area": 10_000.0 * (i + 1) as f64,
            "region": "Test",
            "languages": {"l": format!("Language {}", i % 9)},
            "currencies": {"C": {"name": format!("Currency {}", i % 6)}},
            "timezones": [format!("UTC+{:02}:00", i % 12)],
            "flags": {"png": format!("https://flags.test/{}.png", i), "alt": format!("Flag {}", i)}
        })
    }

    async fn bulk_server(count: usize) -> MockServer {
        let server = MockServer::start().await;
        let body: Vec<serde_json::Value> = (0..count).map(bulk_country).collect();
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;
        server
    }

    fn config_for(server: &MockServer, total_questions: u32) -> QuizConfig {
        QuizConfig {
            data: DataSourceConfig {
                primary_source_enabled: false,
                bulk_url: format!("{}/all", server.uri()),
                rate_limit_delay_ms: 0,
                ..DataSourceConfig::default()
            },
            total_questions,
            difficulty: Difficulty::Medium,
        }
    }

    fn test_engine(total_questions: u32) -> QuizEngine {
        let countries = (0..120)
            .map(|i| {
                CountryRecord::new(
                    format!("Country {}", i),
                    Some(format!("Capital {}", i)),
                    (200 - i) as u64 * 1_000_000,
                    Some(5_000.0 * (i + 1) as f64),
                    None,
                    vec![format!("Language {}", i % 9)],
                    vec![format!("Currency {}", i % 6)],
                    vec![format!("UTC+{:02}:00", i % 12)],
                    format!("https://flags.test/{}.png", i),
                    None,
                )
            })
            .collect();
        let config = QuizConfig { total_questions, ..QuizConfig::default() };
        QuizEngine::from_countries(countries, &config, StdRng::seed_from_u64(99))
    }

    #[tokio::test]
    async fn test_initialize_from_bulk_source_and_play() {
        let server = bulk_server(60).await;
        let config = config_for(&server, 5);

        let mut engine = QuizEngine::initialize(&config, None).await.unwrap();
        assert_eq!(engine.countries().len(), 60);
        assert_eq!(engine.countries()[0].name, "Country 0");

        while let Some(question) = engine.next_question().unwrap() {
            assert_eq!(question.get_options().len(), 4);
            let answer = question.correct_answer.clone();
            let outcome = engine.check_answer(&answer).unwrap();
            assert!(outcome.is_correct);
        }

        let stats = engine.get_stats();
        assert_eq!(stats.question_index, 5);
        assert_eq!(stats.score, 6);
        assert_eq!(engine.game_state(), GameState::Completed);
    }

    #[tokio::test]
    async fn test_initialize_fails_when_all_sources_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = QuizEngine::initialize(&config_for(&server, 10), None).await;
        assert!(matches!(result, Err(QuizError::NoCountries)));
    }

    #[tokio::test]
    async fn test_primary_source_with_fallback_progress() {
        let primary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&primary)
            .await;
        let bulk = bulk_server(10).await;

        let mut config = config_for(&bulk, 10);
        config.data.primary_source_enabled = true;
        config.data.api_key = Some("key".to_string());
        config.data.primary_base_url = format!("{}/v1/country", primary.uri());
        config.data.max_initial_fetch = 4;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let engine = QuizEngine::initialize(&config, Some(tx)).await.unwrap();
        assert_eq!(engine.countries().len(), 10);

        let mut updates = Vec::new();
        while let Some(p) = rx.recv().await {
            updates.push(p);
        }
        assert_eq!(updates.len(), 4);
        assert_eq!(updates[3], LoadProgress { current: 4, total: 4 });
    }

    #[test]
    fn test_population_normalization() {
        assert_eq!(normalize_population(5.0), 5_000_000);
        assert_eq!(normalize_population("5,123"), 5_123_000);
        assert_eq!(normalize_population(1_500_000.0), 1_500_000);
        assert_eq!(normalize_population(-1.0), 0);
        assert_eq!(normalize_population("n/a"), 0);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_population(1_500_000_000.0), "1.50 billion");
        assert_eq!(format_population(25_000_000.0), "25.0 million");
        assert_eq!(format_gdp(2_000_000_000_000.0), "$2.00 trillion");
        assert_eq!(format_area(17_075_400.0), "17,075,400 km²");
    }

    #[test]
    fn test_options_are_always_distinct() {
        let mut engine = test_engine(1000);
        for level in ["easy", "medium", "hard"] {
            engine.set_difficulty(level);
            for _ in 0..200 {
                let question = engine.next_question().unwrap().unwrap();
                let unique: HashSet<&String> = question.options.iter().collect();
                assert_eq!(unique.len(), 4);
                assert_eq!(
                    question.options.iter().filter(|o| **o == question.correct_answer).count(),
                    1
                );
                if question.category == Category::Flag {
                    assert_eq!(question.media_payload.as_ref().map(Vec::len), Some(4));
                }
            }
        }
    }

    #[test]
    fn test_streak_bonus() {
        let mut engine = test_engine(10);
        for _ in 0..6 {
            let answer = engine.next_question().unwrap().unwrap().correct_answer.clone();
            engine.check_answer(&answer);
        }
        assert_eq!(engine.get_stats().score, 8);
    }

    #[test]
    fn test_pool_sizing() {
        let engine = test_engine(10);
        let all = engine.countries();
        let easy = select_pool(Difficulty::Easy, all);
        assert!(easy.len() <= 30);
        assert!(easy.iter().all(|c| all[..50].contains(c)));
        assert_eq!(select_pool(Difficulty::Hard, all).len(), 120);
    }

    #[test]
    fn test_restart_semantics() {
        let mut engine = test_engine(10);
        for _ in 0..4 {
            let wrong = {
                let q = engine.next_question().unwrap().unwrap();
                q.options.iter().find(|o| **o != q.correct_answer).unwrap().clone()
            };
            engine.check_answer(&wrong);
        }
        engine.reset();

        let stats = engine.get_stats();
        assert_eq!(stats.score, 0);
        assert_eq!(stats.wrong_count, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.question_index, 0);
        assert!(engine.current_question().is_none());
    }

    #[test]
    fn test_console_flow() {
        let mut engine = test_engine(2);

        let reply = command_handler(&mut engine, Command::Start);
        assert!(reply.text.contains("Question 1/2"));

        let reply = command_handler(&mut engine, Command::Next);
        assert!(reply.text.contains("Answer the current question first"));

        let reply = command_handler(&mut engine, Command::Answer(1));
        assert!(reply.text.contains("Question 2/2"));

        let reply = command_handler(&mut engine, Command::Answer(9));
        assert!(reply.text.contains("Pick a number"));

        let reply = command_handler(&mut engine, Command::Answer(2));
        assert!(reply.text.contains("Quiz completed"));

        let reply = command_handler(&mut engine, Command::Answer(1));
        assert!(reply.text.contains("no open question"));

        let reply = command_handler(&mut engine, Command::Difficulty("extreme".to_string()));
        assert!(reply.text.contains("stays medium"));
        assert_eq!(engine.get_stats().question_index, 2);

        let reply = command_handler(&mut engine, Command::Quit);
        assert!(reply.quit);
    }
}
