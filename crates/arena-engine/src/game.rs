//! Payoff engine: legal moves, per-round validation and game history

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result, Seat};
use crate::strategy::Strategy;

/// A single move symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move(pub char);

impl Move {
    pub const COOPERATE: Move = Move('C');
    pub const DEFECT: Move = Move('D');

    pub fn symbol(self) -> char {
        self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One exchange of moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub first: Move,
    pub second: Move,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

/// Payoff rule: the two pending moves in, the pair of scores out
pub type PayoffFn = fn(Move, Move) -> (u32, u32);

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u32, u32) {
    match (a, b) {
        (Move::COOPERATE, Move::COOPERATE) => (3, 3),
        (Move::DEFECT, Move::DEFECT) => (1, 1),
        (Move::DEFECT, _) => (5, 0),
        _ => (0, 5),
    }
}

/// An iterated two-player game
///
/// The first legal move is the "cooperative" opener: tit-for-tat leads
/// with it and scripted machines branch on it with their first transition.
#[derive(Clone, Debug)]
pub struct Game {
    moves: Vec<Move>,
    payoff: PayoffFn,
    history: Vec<Round>,
}

impl Game {
    /// Create a game from its move alphabet and payoff rule.
    /// Repeated symbols are dropped; order is preserved.
    pub fn new(moves: impl IntoIterator<Item = Move>, payoff: PayoffFn) -> Self {
        let mut alphabet: Vec<Move> = Vec::new();
        for m in moves {
            if !alphabet.contains(&m) {
                alphabet.push(m);
            }
        }
        Self {
            moves: alphabet,
            payoff,
            history: Vec::new(),
        }
    }

    /// The classic 2×2 game over `CD`
    pub fn prisoners_dilemma() -> Self {
        Self::new([Move::COOPERATE, Move::DEFECT], payoff)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The legal moves as one string, e.g. `"CD"`
    pub fn alphabet(&self) -> String {
        self.moves.iter().map(|m| m.0).collect()
    }

    pub fn is_legal(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }

    pub fn move_index(&self, m: Move) -> Option<usize> {
        self.moves.iter().position(|x| *x == m)
    }

    /// The move tit-for-tat opens with
    pub fn opening_move(&self) -> Option<Move> {
        self.moves.first().copied()
    }

    pub fn payoff(&self, a: Move, b: Move) -> (u32, u32) {
        (self.payoff)(a, b)
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// Clear the history; scores live on the strategies
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Play one round with both strategies' pending moves.
    ///
    /// Both moves are validated before anything is recorded; on success the
    /// round is appended to the history and each side is credited with its
    /// payoff and told what the other side played.
    pub fn play(&mut self, one: &mut Strategy, two: &mut Strategy) -> Result<()> {
        let a = self.validate(Seat::One, one)?;
        let b = self.validate(Seat::Two, two)?;

        let (score_a, score_b) = (self.payoff)(a, b);
        self.history.push(Round { first: a, second: b });

        one.record(two.id(), b, score_a);
        two.record(one.id(), a, score_b);
        Ok(())
    }

    fn validate(&self, seat: Seat, strategy: &Strategy) -> Result<Move> {
        let m = strategy.pending().ok_or_else(|| ArenaError::MoveNotDecided {
            seat,
            player: strategy.name().to_string(),
        })?;
        if !self.is_legal(m) {
            return Err(ArenaError::IllegalMove {
                seat,
                player: strategy.name().to_string(),
                mv: m.0,
                alphabet: self.alphabet(),
            });
        }
        Ok(m)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::prisoners_dilemma()
    }
}
