//! Strategy definitions and execution
//!
//! A [`Strategy`] is one seat's worth of runtime state (pending move, score,
//! what each opponent has played against it) attached to a shared
//! [`Profile`] that carries the logical player's identity. Cloning a
//! strategy shares the profile, so every copy reports into the same
//! identity while keeping its own score and memory.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::game::{Game, Move};
use crate::machine::{Machine, Script};
use crate::random::SeededRng;

/// Stable identity of a logical player, shared by all of its copies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out player identities in sequence.
///
/// Passed to every strategy constructor so that identities depend only on
/// the caller's construction order. Once `u32::MAX` has been handed out the
/// allocator is exhausted; it never reuses an identity.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: Option<u32>,
}

impl IdAllocator {
    pub fn new(start: u32) -> Self {
        Self { next: Some(start) }
    }

    pub fn next_id(&mut self) -> Result<PlayerId> {
        let id = self.next.ok_or(ArenaError::IdsExhausted)?;
        self.next = id.checked_add(1);
        Ok(PlayerId(id))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Display metadata of a logical player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: PlayerId,
    pub name: String,
    pub author: String,
    /// Script source for scripted players
    pub source: Option<String>,
}

const BUILTIN_AUTHOR: &str = "Built-in";

/// Players available without a script
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltinKind {
    /// Open with the game's first move, then copy the opponent's last move.
    TitForTat,
    /// Pick uniformly among the game's moves.
    Random,
}

/// How a strategy picks its next move
#[derive(Clone, Debug)]
pub enum Behavior {
    Scripted(Machine),
    Random(SeededRng),
    TitForTat,
}

/// One seat's runtime state for a logical player
#[derive(Clone, Debug)]
pub struct Strategy {
    profile: Arc<Profile>,
    behavior: Behavior,
    pending: Option<Move>,
    score: u64,
    opponents: HashMap<PlayerId, Vec<Move>>,
}

impl Strategy {
    fn with_profile(profile: Profile, behavior: Behavior) -> Self {
        Self {
            profile: Arc::new(profile),
            behavior,
            pending: None,
            score: 0,
            opponents: HashMap::new(),
        }
    }

    fn builtin_profile(ids: &mut IdAllocator, name: &str) -> Result<Profile> {
        Ok(Profile {
            id: ids.next_id()?,
            name: name.to_string(),
            author: BUILTIN_AUTHOR.to_string(),
            source: None,
        })
    }

    pub fn tit_for_tat(ids: &mut IdAllocator) -> Result<Self> {
        let profile = Self::builtin_profile(ids, "Built-In Tit-For-Tat")?;
        Ok(Self::with_profile(profile, Behavior::TitForTat))
    }

    pub fn random(ids: &mut IdAllocator, seed: u32) -> Result<Self> {
        let profile = Self::builtin_profile(ids, "Built-In Random")?;
        Ok(Self::with_profile(profile, Behavior::Random(SeededRng::new(seed))))
    }

    /// Create a built-in player; `seed` only matters for [`BuiltinKind::Random`]
    pub fn builtin(kind: BuiltinKind, ids: &mut IdAllocator, seed: u32) -> Result<Self> {
        match kind {
            BuiltinKind::TitForTat => Self::tit_for_tat(ids),
            BuiltinKind::Random => Self::random(ids, seed),
        }
    }

    /// Build a scripted player from an already parsed script
    pub fn from_script(ids: &mut IdAllocator, script: Script) -> Result<Self> {
        let profile = Profile {
            id: ids.next_id()?,
            name: script.name,
            author: script.author,
            source: Some(script.source),
        };
        Ok(Self::with_profile(profile, Behavior::Scripted(Machine::new(script.states))))
    }

    /// Parse a machine script; no identity is used up when parsing fails
    pub fn scripted(ids: &mut IdAllocator, game: &Game, text: &str) -> Result<Self> {
        let script = Script::parse(game, text)?;
        Self::from_script(ids, script)
    }

    /// Load a machine script from disk
    pub fn load(ids: &mut IdAllocator, game: &Game, path: impl AsRef<Path>) -> Result<Self> {
        let script = Script::load(game, path)?;
        Self::from_script(ids, script)
    }

    pub fn id(&self) -> PlayerId {
        self.profile.id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn author(&self) -> &str {
        &self.profile.author
    }

    pub fn source(&self) -> Option<&str> {
        self.profile.source.as_deref()
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Number of machine states, for scripted players
    pub fn num_states(&self) -> Option<usize> {
        match &self.behavior {
            Behavior::Scripted(machine) => Some(machine.len()),
            _ => None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// The move chosen by the last successful [`Strategy::decide`]
    pub fn pending(&self) -> Option<Move> {
        self.pending
    }

    /// Moves `opponent` has played against this strategy, oldest first
    pub fn history_against(&self, opponent: PlayerId) -> &[Move] {
        self.opponents
            .get(&opponent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Choose the next move against `opponent`.
    ///
    /// Only this strategy's own record against `opponent` and the rules of
    /// `game` are consulted. On error the pending move is left untouched.
    pub fn decide(&mut self, game: &Game, opponent: PlayerId) -> Result<()> {
        let history = self
            .opponents
            .get(&opponent)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let next = match &mut self.behavior {
            Behavior::TitForTat => match history.last() {
                Some(last) => *last,
                None => game.opening_move().ok_or(ArenaError::EmptyAlphabet)?,
            },
            Behavior::Random(rng) => random_move(game, rng).ok_or(ArenaError::EmptyAlphabet)?,
            Behavior::Scripted(machine) => machine.step(game, history, &self.profile.name)?,
        };

        self.pending = Some(next);
        Ok(())
    }

    /// Credit `payoff` and remember what `opponent` played.
    pub fn record(&mut self, opponent: PlayerId, opponents_move: Move, payoff: u32) {
        self.score += u64::from(payoff);
        self.opponents.entry(opponent).or_default().push(opponents_move);
    }

    /// Forget every opponent and zero the score
    pub fn reset(&mut self) {
        self.score = 0;
        self.opponents.clear();
        if let Behavior::Scripted(machine) = &mut self.behavior {
            machine.reset();
        }
    }

    /// Get a human-readable description of a strategy
    pub fn describe(&self) -> String {
        match &self.behavior {
            Behavior::TitForTat => {
                "Opens with the game's first move, then copies the opponent's last move.".to_string()
            }
            Behavior::Random(_) => "Picks uniformly among the game's moves each round.".to_string(),
            Behavior::Scripted(machine) => format!(
                "Finite-state machine with {} state(s) by {}.",
                machine.len(),
                self.profile.author
            ),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_pending(&mut self, m: Move) {
        self.pending = Some(m);
    }
}

/// Map a [-1, 1] draw onto [0, 1) and pick the move at that position.
fn random_move(game: &Game, rng: &mut SeededRng) -> Option<Move> {
    let moves = game.moves();
    let last = moves.len().checked_sub(1)?;
    let unit = (rng.next_float_high() + 1.0) / 2.0;
    let index = ((unit * moves.len() as f64).floor() as usize).min(last);
    Some(moves[index])
}
