//! Rock-Paper-Scissors against a randomized opponent.

pub mod game;
pub mod rules;

pub use game::{Game, Scoreboard};
pub use rules::{Choice, Outcome};
