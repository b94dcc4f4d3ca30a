use code_buster::cli::{CliInterface, parse_cli};
use code_buster::logging::{default_log_path, init_logging};
use code_buster::tui::TuiInterface;
use code_buster::{GameConfig, Session, game_loop, info_log};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let log_path = cli.log_file.clone().or_else(default_log_path);
    if let Err(e) = init_logging(log_path.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        // Logging to stderr would scribble over the full-screen interface.
        if !cli.tui {
            let _ = init_logging(None);
        }
    }

    let config = GameConfig::default();
    let session = match cli.seed {
        Some(seed) => Session::seeded(config, seed),
        None => Session::new(config),
    };
    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Cannot start game: {e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("Starting {} mode", if cli.tui { "TUI" } else { "line" });

    if cli.tui {
        let mut tui = match TuiInterface::new() {
            Ok(tui) => tui,
            Err(e) => {
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut session, &mut tui);
    } else {
        let mut interface = CliInterface::new(io::stdin().lock(), io::stdout());
        game_loop(&mut session, &mut interface);
    }

    ExitCode::SUCCESS
}
