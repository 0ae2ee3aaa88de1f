//! Console loop for Rock-Paper-Scissors against a random opponent.

use crate::rules::{Choice, Outcome};
use log::debug;
use rand::Rng;
use std::io::{self, BufRead, Write};

/// Rounds played in one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Scoreboard {
    pub fn rounds(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Tie => self.ties += 1,
            Outcome::PlayerWins => self.wins += 1,
            Outcome::ComputerWins => self.losses += 1,
        }
    }
}

/// One interactive session; the RNG is injected so rounds can be replayed.
pub struct Game<R, W, G> {
    input: R,
    output: W,
    rng: G,
}

impl<R: BufRead, W: Write, G: Rng> Game<R, W, G> {
    pub fn new(input: R, output: W, rng: G) -> Self {
        Self { input, output, rng }
    }

    /// Plays until the player answers `no` or input ends.
    pub fn play(&mut self) -> io::Result<Scoreboard> {
        let mut score = Scoreboard::default();

        writeln!(self.output, "\t\t\tWelcome to Rock Paper Scissor Game ")?;
        writeln!(self.output, "\t\t\t-----------------------------------")?;
        writeln!(self.output)?;

        if !self.wants_to_play("Want to start the game ? (yes,no) : ")? {
            return Ok(score);
        }

        loop {
            let Some(player) = self.read_choice()? else {
                break;
            };
            score.record(self.play_round(player)?);

            if !self.wants_to_play("\nDo you want to play again ? (yes/no) : ")? {
                break;
            }
        }

        writeln!(self.output, "\nThank you for playing the game :) ")?;
        Ok(score)
    }

    fn play_round(&mut self, player: Choice) -> io::Result<Outcome> {
        let computer = self.rng.random::<Choice>();
        let outcome = Outcome::decide(player, computer);
        debug!("event=rps_round status=ok player={player} computer={computer} outcome={outcome:?}");

        writeln!(self.output, "\nYour choice : {player}")?;
        writeln!(self.output, "Computer choice : {computer}")?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", outcome.message())?;
        Ok(outcome)
    }

    fn read_choice(&mut self) -> io::Result<Option<Choice>> {
        loop {
            let Some(answer) = self.ask("\n\nEnter your choice (Rock, Paper, Scissor) : ")? else {
                return Ok(None);
            };
            match answer.parse::<Choice>() {
                Ok(choice) => return Ok(Some(choice)),
                Err(_) => writeln!(self.output, "Please choose a correct option")?,
            }
        }
    }

    fn wants_to_play(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|answer| !answer.eq_ignore_ascii_case("no")))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
