//! Round-robin tournament
//!
//! Every player is cloned twice on entry, once per seat, so a player can be
//! matched against itself. Both clones share one [`PlayerId`] and report
//! into one score bucket.

use std::collections::BTreeMap;

use log::{info, warn};

use crate::error::{ArenaError, Result};
use crate::game::Game;
use crate::matchup::{Match, MatchConfig};
use crate::pairing;
use crate::strategy::{PlayerId, Strategy};

/// Round-robin tournament over a roster of strategies
#[derive(Clone, Debug)]
pub struct Tournament {
    game: Game,
    config: MatchConfig,
    role_one: Vec<Strategy>,
    role_two: Vec<Strategy>,
    matches: Vec<Match>,
    scores: BTreeMap<PlayerId, u64>,
    played: bool,
}

impl Tournament {
    pub fn new(game: Game) -> Self {
        Self::with_config(game, MatchConfig::default())
    }

    pub fn with_config(game: Game, config: MatchConfig) -> Self {
        Self {
            game,
            config,
            role_one: Vec::new(),
            role_two: Vec::new(),
            matches: Vec::new(),
            scores: BTreeMap::new(),
            played: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Enter a copy of `player` in each seat. Discards any results.
    pub fn add_player(&mut self, player: &Strategy) {
        self.role_one.push(player.clone());
        self.role_two.push(player.clone());
        self.reset();
    }

    /// Remove the first entry with identity `id` from each roster.
    /// Returns false if no entry matched.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let one = remove_first(&mut self.role_one, id);
        let two = remove_first(&mut self.role_two, id);
        if one || two {
            self.reset();
        }
        one || two
    }

    /// Rebuild the match list: one match per roster pair `i <= j`
    pub fn recalculate_matches(&mut self) {
        let n = self.role_one.len().min(self.role_two.len());
        self.matches = pairing::round_robin(n)
            .into_iter()
            .map(|(i, j)| Match::new(self.role_one[i].clone(), self.role_two[j].clone()))
            .collect();
    }

    /// Play every match and total the scores per identity.
    ///
    /// A tournament that has already been played is reset first. The first
    /// failing match aborts the run and resets the tournament.
    pub fn run(&mut self) -> Result<()> {
        if self.played {
            self.reset();
        }
        if self.role_one.is_empty() || self.role_two.is_empty() {
            return Err(ArenaError::EmptyRoster);
        }
        if self.matches.is_empty() {
            return Err(ArenaError::NoMatches);
        }

        info!(
            "tournament: {} player(s), {} match(es)",
            self.role_one.len(),
            self.matches.len()
        );

        let outcome = self
            .matches
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, m)| {
                m.play_with(&mut self.game, &self.config.full_lengths)
                    .map_err(|e| (index, e))
            });
        if let Err((index, e)) = outcome {
            warn!("tournament aborted at match {}: {}", index, e);
            self.reset();
            return Err(e);
        }

        for m in &self.matches {
            *self.scores.entry(m.player_one().id()).or_insert(0) += m.score_one();
            *self.scores.entry(m.player_two().id()).or_insert(0) += m.score_two();
        }
        self.played = true;

        info!("tournament finished: {} score bucket(s)", self.scores.len());
        Ok(())
    }

    /// Clear scores and rebuild matches from the current rosters
    pub fn reset(&mut self) {
        self.scores.clear();
        self.game.reset();
        self.recalculate_matches();
        self.played = false;
    }

    pub fn num_players(&self) -> usize {
        self.role_one.len()
    }

    pub fn players(&self) -> &[Strategy] {
        &self.role_one
    }

    pub fn num_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn match_at(&self, index: usize) -> Option<&Match> {
        self.matches.get(index)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn score_of(&self, id: PlayerId) -> Option<u64> {
        self.scores.get(&id).copied()
    }

    pub fn scores(&self) -> &BTreeMap<PlayerId, u64> {
        &self.scores
    }

    pub fn is_played(&self) -> bool {
        self.played
    }
}

fn remove_first(roster: &mut Vec<Strategy>, id: PlayerId) -> bool {
    match roster.iter().position(|s| s.id() == id) {
        Some(index) => {
            roster.remove(index);
            true
        }
        None => false,
    }
}
