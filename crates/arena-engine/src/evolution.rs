//! Replicator dynamics over a roster of strategies
//!
//! Each generation, every identity's population fraction is updated in
//! proportion to its exact expected payoff against the current mixture.
//! Opponents are never sampled, so the same roster and generation count
//! always produce the same series.
//!
//! The payoff of roster entry `i` against entry `j` is the score of a fresh
//! clone of `i` in one quick match against a fresh clone of `j`. It does not
//! depend on the fractions, so the n×n matrix is played once per run and
//! every generation reuses it.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::game::Game;
use crate::matchup::{Match, MatchConfig};
use crate::strategy::{PlayerId, Strategy};

/// Population fractions after one generation step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub index: usize,
    pub fractions: BTreeMap<PlayerId, f64>,
}

impl Generation {
    /// Entries sharing an identity are pooled into one fraction
    fn snapshot(index: usize, roster: &[Strategy], fractions: &[f64]) -> Self {
        let mut pooled = BTreeMap::new();
        for (player, fraction) in roster.iter().zip(fractions) {
            *pooled.entry(player.id()).or_insert(0.0) += *fraction;
        }
        Self {
            index,
            fractions: pooled,
        }
    }

    pub fn fraction(&self, id: PlayerId) -> Option<f64> {
        self.fractions.get(&id).copied()
    }

    pub fn total(&self) -> f64 {
        self.fractions.values().sum()
    }
}

#[derive(Clone, Debug)]
pub struct EvolutionaryRun {
    game: Game,
    config: MatchConfig,
    roster: Vec<Strategy>,
    generations: Vec<Generation>,
    played: bool,
}

impl EvolutionaryRun {
    pub fn new(game: Game) -> Self {
        Self::with_config(game, MatchConfig::default())
    }

    pub fn with_config(game: Game, config: MatchConfig) -> Self {
        Self {
            game,
            config,
            roster: Vec::new(),
            generations: Vec::new(),
            played: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Enter a copy of `player`. Discards any results.
    pub fn add_player(&mut self, player: &Strategy) {
        self.roster.push(player.clone());
        self.reset();
    }

    /// Remove the first entry with identity `id`
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        match self.roster.iter().position(|s| s.id() == id) {
            Some(index) => {
                self.roster.remove(index);
                self.reset();
                true
            }
            None => false,
        }
    }

    /// Iterate `generations` steps from a uniform start.
    ///
    /// Produces `generations + 1` snapshots; snapshot 0 is uniform. A run
    /// that has already been played is reset first. A failing match aborts
    /// the run and resets it.
    pub fn run(&mut self, generations: usize) -> Result<()> {
        if self.played {
            self.reset();
        }
        if self.roster.is_empty() {
            return Err(ArenaError::EmptyRoster);
        }

        let n = self.roster.len();
        info!("evolution: {} player(s), {} generation(s)", n, generations);

        let mut fractions = vec![1.0 / n as f64; n];
        let mut series = Vec::new();
        series.push(Generation::snapshot(0, &self.roster, &fractions));

        if generations > 0 {
            let payoffs = match payoff_matrix(&mut self.game, &self.roster, &self.config.quick_lengths) {
                Ok(payoffs) => payoffs,
                Err(e) => {
                    warn!("evolution aborted: {}", e);
                    self.reset();
                    return Err(e);
                }
            };

            for index in 1..=generations {
                fractions = step(&fractions, &payoffs).unwrap_or_else(|| {
                    warn!("generation {}: total payoff is zero, keeping fractions", index);
                    fractions.clone()
                });
                debug!("generation {}: {:?}", index, fractions);
                series.push(Generation::snapshot(index, &self.roster, &fractions));
            }
        }

        self.generations = series;
        self.played = true;
        info!("evolution finished");
        Ok(())
    }

    /// Drop all snapshots; the roster is kept
    pub fn reset(&mut self) {
        self.generations.clear();
        self.game.reset();
        self.played = false;
    }

    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    pub fn generation(&self, index: usize) -> Option<&Generation> {
        self.generations.get(index)
    }

    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    pub fn num_players(&self) -> usize {
        self.roster.len()
    }

    pub fn players(&self) -> &[Strategy] {
        &self.roster
    }

    pub fn is_played(&self) -> bool {
        self.played
    }
}

/// Row-major n×n matrix; entry `i * n + j` is i's score against j
fn payoff_matrix(game: &mut Game, roster: &[Strategy], lengths: &[u32]) -> Result<Vec<u64>> {
    let mut payoffs = Vec::with_capacity(roster.len() * roster.len());
    for one in roster {
        for two in roster {
            let mut m = Match::new(one.clone(), two.clone());
            m.play_with(game, lengths)?;
            payoffs.push(m.score_one());
        }
    }
    Ok(payoffs)
}

/// One replicator step. `None` when every expected payoff is zero.
fn step(fractions: &[f64], payoffs: &[u64]) -> Option<Vec<f64>> {
    let n = fractions.len();
    let totals: Vec<f64> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| fractions[i] * fractions[j] * payoffs[i * n + j] as f64)
                .sum()
        })
        .collect();

    let sum: f64 = totals.iter().sum();
    if sum <= 0.0 {
        return None;
    }
    Some(totals.into_iter().map(|t| t / sum).collect())
}
