//! Match execution engine
//!
//! A match is a fixed sequence of sub-games between two strategies. The
//! sub-game lengths are precomputed from a per-round exit probability of
//! 0.00346 and never redrawn, so the same pairing always plays the same
//! number of rounds.

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::game::{Game, Round};
use crate::strategy::Strategy;

/// Sub-game lengths of a full match
pub const FULL_LENGTHS: [u32; 5] = [168, 359, 306, 622, 319];

/// Sub-game length of a quick match
pub const QUICK_LENGTHS: [u32; 1] = [200];

/// Sub-game schedule for full and quick matches
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub full_lengths: Vec<u32>,
    pub quick_lengths: Vec<u32>,
}

impl MatchConfig {
    /// Five sub-games for full matches, one 200-round game for quick ones
    pub fn standard() -> Self {
        Self {
            full_lengths: FULL_LENGTHS.to_vec(),
            quick_lengths: QUICK_LENGTHS.to_vec(),
        }
    }

    /// Parse a config; missing fields fall back to [`MatchConfig::standard`]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ArenaError::Config)
    }

    pub fn lengths(&self, quick: bool) -> &[u32] {
        if quick {
            &self.quick_lengths
        } else {
            &self.full_lengths
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Who came out ahead in a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerOne,
    PlayerTwo,
    Tie,
}

/// Two strategies and the record of their last match
#[derive(Clone, Debug)]
pub struct Match {
    one: Strategy,
    two: Strategy,
    score_one: u64,
    score_two: u64,
    histories: Vec<Vec<Round>>,
}

impl Match {
    pub fn new(one: Strategy, two: Strategy) -> Self {
        Self {
            one,
            two,
            score_one: 0,
            score_two: 0,
            histories: Vec::new(),
        }
    }

    pub fn player_one(&self) -> &Strategy {
        &self.one
    }

    pub fn player_two(&self) -> &Strategy {
        &self.two
    }

    /// Total of player one's scores across all sub-games
    pub fn score_one(&self) -> u64 {
        self.score_one
    }

    /// Total of player two's scores across all sub-games
    pub fn score_two(&self) -> u64 {
        self.score_two
    }

    /// Round log of sub-game `index`
    pub fn history(&self, index: usize) -> Option<&[Round]> {
        self.histories.get(index).map(Vec::as_slice)
    }

    pub fn histories(&self) -> &[Vec<Round>] {
        &self.histories
    }

    pub fn num_games(&self) -> usize {
        self.histories.len()
    }

    pub fn outcome(&self) -> Outcome {
        match self.score_one.cmp(&self.score_two) {
            std::cmp::Ordering::Greater => Outcome::PlayerOne,
            std::cmp::Ordering::Less => Outcome::PlayerTwo,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// Play the standard schedule: five sub-games, or one when `quick`
    pub fn play(&mut self, game: &mut Game, quick: bool) -> Result<()> {
        let lengths: &[u32] = if quick { &QUICK_LENGTHS } else { &FULL_LENGTHS };
        self.play_with(game, lengths)
    }

    /// Play one sub-game per entry of `lengths`.
    ///
    /// Scores and histories from any previous run are discarded first. The
    /// first failing decision or round aborts the match; nothing from the
    /// aborted run is kept.
    pub fn play_with(&mut self, game: &mut Game, lengths: &[u32]) -> Result<()> {
        self.score_one = 0;
        self.score_two = 0;
        self.histories.clear();

        let (score_one, score_two, histories) = self.play_games(game, lengths).inspect_err(|e| {
            log::warn!("match {} vs {} aborted: {}", self.one.name(), self.two.name(), e)
        })?;

        log::debug!(
            "match {} vs {}: {}-{} over {} game(s)",
            self.one.name(),
            self.two.name(),
            score_one,
            score_two,
            histories.len()
        );

        self.score_one = score_one;
        self.score_two = score_two;
        self.histories = histories;
        Ok(())
    }

    fn play_games(&mut self, game: &mut Game, lengths: &[u32]) -> Result<(u64, u64, Vec<Vec<Round>>)> {
        let mut histories = Vec::with_capacity(lengths.len());
        let mut score_one = 0u64;
        let mut score_two = 0u64;

        for &rounds in lengths {
            game.reset();
            self.one.reset();
            self.two.reset();

            for _ in 0..rounds {
                self.one.decide(game, self.two.id())?;
                self.two.decide(game, self.one.id())?;
                game.play(&mut self.one, &mut self.two)?;
            }

            histories.push(game.history().to_vec());
            score_one += self.one.score();
            score_two += self.two.score();
        }

        Ok((score_one, score_two, histories))
    }
}
