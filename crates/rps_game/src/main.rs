use flexi_logger::Logger;
use log::warn;
use rps_game::Game;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for more.
    let _logger = match Logger::try_with_env_or_str("warn").and_then(|logger| logger.start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("logging disabled: {err}");
            None
        }
    };

    let mut game = Game::new(io::stdin().lock(), io::stdout().lock(), rand::rng());
    match game.play() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("event=rps_session status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
