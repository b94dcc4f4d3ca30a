// Integration tests for code-buster
// These drive the engine through its public API and through the line-mode front end

use code_buster::cli::CliInterface;
use code_buster::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::mock::StepRng;
use std::io::Cursor;

const MISS: &str = "white pink cyan purple\nsubmit\n";

fn classic_session() -> Session<StdRng> {
    Session::with_secret(
        GameConfig::default(),
        Code::from_names(["red", "green", "blue", "yellow"]),
        StdRng::seed_from_u64(2024),
    )
    .unwrap()
}

/// Plays `input` through the line interface and returns everything printed.
fn play(session: &mut Session<StdRng>, input: &str) -> String {
    let mut interface = CliInterface::new(Cursor::new(input.to_string()), Vec::new());
    game_loop(session, &mut interface);
    String::from_utf8(interface.into_writer()).unwrap()
}

fn enter(session: &mut Session<StdRng>, names: [&str; 4]) -> Option<GuessRecord> {
    for name in names {
        session.add_symbol_to_guess(&Symbol::new(name));
    }
    session.submit_guess().cloned()
}

#[test]
fn test_exact_guess_wins_scenario() {
    let mut session = classic_session();
    let record = enter(&mut session, ["red", "green", "blue", "yellow"]).unwrap();
    assert_eq!(record.feedback().pegs(), &[Peg::Exact; 4]);
    assert_eq!(session.status(), GameStatus::Won);
}

#[test]
fn test_all_partial_scenario() {
    let mut session = classic_session();
    let record = enter(&mut session, ["green", "red", "yellow", "blue"]).unwrap();
    assert_eq!(record.feedback().pegs(), &[Peg::Partial; 4]);
    assert_eq!(session.status(), GameStatus::Playing);
}

#[test]
fn test_all_absent_scenario() {
    let mut session = classic_session();
    let record = enter(&mut session, ["white", "pink", "cyan", "purple"]).unwrap();
    assert_eq!(record.feedback().pegs(), &[Peg::Empty; 4]);
}

#[test]
fn test_tenth_miss_loses_and_reveals_secret() {
    let mut session = classic_session();
    for _ in 0..9 {
        enter(&mut session, ["white", "pink", "cyan", "purple"]).unwrap();
    }
    assert_eq!(session.status(), GameStatus::Playing);
    assert!(session.revealed_secret().is_none());

    enter(&mut session, ["green", "red", "yellow", "blue"]).unwrap();
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(
        session.revealed_secret(),
        Some(&Code::from_names(["red", "green", "blue", "yellow"]))
    );
}

#[test]
fn test_repeated_color_ignored_scenario() {
    let mut session = classic_session();
    let red = Symbol::new("red");
    assert!(session.add_symbol_to_guess(&red));
    assert!(!session.add_symbol_to_guess(&red));
    assert_eq!(session.current_guess().len(), 1);
}

#[test]
fn test_terminal_status_is_idempotent() {
    let mut session = classic_session();
    for _ in 0..10 {
        enter(&mut session, ["white", "pink", "cyan", "purple"]);
    }
    assert_eq!(session.status(), GameStatus::Lost);
    for _ in 0..3 {
        assert!(enter(&mut session, ["red", "green", "blue", "yellow"]).is_none());
        assert_eq!(session.history().len(), 10);
        assert_eq!(session.status(), GameStatus::Lost);
    }
}

#[test]
fn test_history_never_exceeds_max_attempts_for_any_seed() {
    for seed in 0..20 {
        let mut session = Session::seeded(GameConfig::default(), seed).unwrap();
        let mut rng = StdRng::seed_from_u64(seed + 1000);
        while !session.status().is_over() {
            let guess = generate_code(session.palette(), 4, &mut rng).unwrap();
            for symbol in guess.symbols() {
                session.add_symbol_to_guess(symbol);
            }
            session.submit_guess().unwrap();
            assert!(session.history().len() <= session.config().max_attempts);
        }
        let won = session.history().last().unwrap().feedback().is_win();
        assert_eq!(session.status() == GameStatus::Won, won);
        if !won {
            assert_eq!(session.history().len(), 10);
        }
        let secret = session.revealed_secret().unwrap();
        assert!(!secret.has_duplicates());
        assert!(secret.symbols().iter().all(|s| session.palette().contains(s)));
    }
}

#[test]
fn test_injected_source_controls_the_secret() {
    let mut session = Session::with_rng(GameConfig::default(), StepRng::new(0, 0)).unwrap();
    for name in ["red", "green", "blue", "yellow"] {
        session.add_symbol_to_guess(&Symbol::new(name));
    }
    assert!(session.submit_guess().unwrap().feedback().is_win());
}

#[test]
fn test_seeded_sessions_are_repeatable() {
    let reveal = |seed| {
        let mut session = Session::seeded(GameConfig::default(), seed).unwrap();
        for _ in 0..10 {
            for name in ["white", "pink", "cyan", "purple"] {
                session.add_symbol_to_guess(&Symbol::new(name));
            }
            session.submit_guess();
        }
        session.revealed_secret().cloned().unwrap()
    };
    assert_eq!(reveal(77), reveal(77));
}

#[test]
fn test_config_errors_surface_at_construction() {
    let tiny = GameConfig {
        palette: Palette::new(["red", "green", "blue"]).unwrap(),
        code_length: CODE_LENGTH,
        max_attempts: MAX_ATTEMPTS,
    };
    assert!(matches!(
        Session::seeded(tiny, 1),
        Err(ConfigError::PaletteTooSmall {
            palette: 3,
            length: 4
        })
    ));
    let no_tries = GameConfig {
        max_attempts: 0,
        ..GameConfig::default()
    };
    assert_eq!(Session::seeded(no_tries, 1).err(), Some(ConfigError::ZeroMaxAttempts));
}

#[test]
fn test_game_loop_win_in_one() {
    let mut session = classic_session();
    let output = play(&mut session, "red green blue yellow\n\n");
    assert_eq!(session.status(), GameStatus::Won);
    assert!(output.contains("Current guess (4/4): red green blue yellow"));
    assert!(output.contains("[XXXX]"));
    assert!(output.contains("You solved it in 1 try!"));
    assert!(output.ends_with("Exiting.\n"));
}

#[test]
fn test_game_loop_loss_reveals_secret() {
    let mut session = classic_session();
    let input = format!("{}red\nexit\n", MISS.repeat(10));
    let output = play(&mut session, &input);
    assert_eq!(session.status(), GameStatus::Lost);
    assert_eq!(session.history().len(), 10);
    assert!(output.contains("Attempt 10 of 10 - Last chance! You can do it!"));
    assert!(output.contains("Game Over!"));
    assert!(output.contains("The secret code was: red green blue yellow"));
    assert!(output.contains("The game is over. Start a new game to keep playing."));
}

#[test]
fn test_game_loop_rejects_repeated_color() {
    let mut session = classic_session();
    let output = play(&mut session, "red red\n");
    assert!(output.contains("red is already in your guess."));
    assert!(output.contains("Current guess (1/4): red _ _ _"));
    assert_eq!(session.current_guess(), &[Symbol::new("red")]);
}

#[test]
fn test_game_loop_undo_and_numbers() {
    let mut session = classic_session();
    let output = play(&mut session, "1 2\nundo\n3\n");
    assert!(output.contains("Current guess (2/4): red blue _ _"));
    assert_eq!(
        session.current_guess(),
        &[Symbol::new("red"), Symbol::new("blue")]
    );
}

#[test]
fn test_game_loop_incomplete_submit() {
    let mut session = classic_session();
    let output = play(&mut session, "red\nsubmit\nexit\n");
    assert!(output.contains("Pick 4 colors before submitting (1/4)."));
    assert!(session.history().is_empty());
}

#[test]
fn test_game_loop_unknown_input_is_reported() {
    let mut session = classic_session();
    let output = play(&mut session, "orange\nexit\n");
    assert!(output.contains("Unknown color or command: 'orange'"));
    assert!(session.current_guess().is_empty());
}

#[test]
fn test_game_loop_new_game_after_win() {
    let mut session = classic_session();
    let output = play(&mut session, "red green blue yellow\n\nnew\nexit\n");
    assert!(output.contains("You solved it in 1 try!"));
    assert!(output.contains("New game started."));
    assert_eq!(session.status(), GameStatus::Playing);
    assert!(session.history().is_empty());
    assert!(session.revealed_secret().is_none());
}

#[test]
fn test_game_loop_shows_partial_feedback_and_cheer() {
    let mut session = classic_session();
    let output = play(&mut session, "green red yellow blue\n\nexit\n");
    assert!(output.contains("[OOOO]"));
    assert!(output.contains("Attempt 2 of 10 - Great start!"));
}
