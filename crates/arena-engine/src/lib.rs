//! Iterated-game engine for Prisoner's Arena
//!
//! Plays iterated two-player games between pluggable strategies, schedules
//! them into round-robin tournaments, and iterates exact replicator dynamics
//! over a roster. Everything is deterministic: the same roster and settings
//! always reproduce the same scores and generation series.
//!
//! ```
//! use arena_engine::{Game, IdAllocator, Strategy, Tournament};
//!
//! let mut ids = IdAllocator::default();
//! let game = Game::prisoners_dilemma();
//! let grim = Strategy::scripted(&mut ids, &game, "Anon\nGrim\n2\nC, 0, 1\nD, 1, 1\n")?;
//!
//! let mut tournament = Tournament::new(game);
//! tournament.add_player(&grim);
//! tournament.add_player(&Strategy::tit_for_tat(&mut ids)?);
//! tournament.run()?;
//!
//! assert_eq!(tournament.num_matches(), 3);
//! # Ok::<(), arena_engine::ArenaError>(())
//! ```

mod error;
mod random;
mod game;
mod machine;
mod strategy;
mod matchup;
mod pairing;
mod tournament;
mod evolution;
mod report;

pub use error::{ArenaError, Branch, ErrorStack, Result, Seat, NO_ERROR};
pub use random::SeededRng;
pub use game::{payoff, Game, Move, PayoffFn, Round};
pub use machine::{Machine, Script, State};
pub use strategy::{Behavior, BuiltinKind, IdAllocator, PlayerId, Profile, Strategy};
pub use matchup::{Match, MatchConfig, Outcome, FULL_LENGTHS, QUICK_LENGTHS};
pub use pairing::{match_count, pair_for_match, round_robin};
pub use tournament::Tournament;
pub use evolution::{EvolutionaryRun, Generation};
pub use report::{EvolutionReport, MatchSummary, PlayerSummary, Standing, TournamentReport};
