//! Rock-Paper-Scissors hands and round outcomes.

use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A hand either side can throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissor,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissor];

    /// The hand this one defeats.
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissor,
            Choice::Paper => Choice::Rock,
            Choice::Scissor => Choice::Paper,
        }
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissor => "scissor",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissor" | "scissors" => Ok(Choice::Scissor),
            other => Err(format!("not a hand: `{other}`")),
        }
    }
}

/// Uniform over the three hands.
impl Distribution<Choice> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        Choice::ALL[rng.random_range(0..Choice::ALL.len())]
    }
}

/// Result of one round, from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Tie,
    PlayerWins,
    ComputerWins,
}

impl Outcome {
    pub fn decide(player: Choice, computer: Choice) -> Outcome {
        if player == computer {
            Outcome::Tie
        } else if player.beats() == computer {
            Outcome::PlayerWins
        } else {
            Outcome::ComputerWins
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Tie => "It's a tie!!",
            Outcome::PlayerWins => "Congratulations You Won !!!!",
            Outcome::ComputerWins => "Oops you lost!!!\nComputer Won",
        }
    }
}
