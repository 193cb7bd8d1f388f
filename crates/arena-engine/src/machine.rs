//! Finite-state-machine players.
//!
//! A script names its author and player, declares a state count, then lists
//! one state per line:
//!
//! ```text
//! Charles Pence
//! TitForTat
//! 2
//! C, 0, 1
//! D, 0, 1
//! ```
//!
//! Each state plays its action and moves on according to the opponent's
//! last move: the first transition if they played the game's first move,
//! the second if they played its second move. State 0 is the opening move.
//! Scripts are validated completely before a [`Machine`] exists, so a
//! loaded machine only ever points at states it has.

use std::path::Path;

use crate::error::{ArenaError, Branch, Result};
use crate::game::{Game, Move};

/// Lines before the first state: author, name, state count.
const HEADER_LINES: usize = 3;

/// One machine state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State {
    pub action: Move,
    /// Next state after the opponent's first / second move
    pub transitions: [usize; 2],
}

/// A parsed, validated script
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script {
    pub author: String,
    pub name: String,
    /// The state lines, verbatim, each terminated by `\n`
    pub source: String,
    pub states: Vec<State>,
}

impl Script {
    /// Parse and validate `text` against the moves of `game`.
    pub fn parse(game: &Game, text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() <= HEADER_LINES {
            return Err(ArenaError::ScriptTooShort { lines: lines.len() });
        }

        let author = lines[0].trim().to_string();
        let name = lines[1].trim().to_string();

        let count_field = lines[2].trim();
        let declared: usize = count_field
            .parse()
            .map_err(|_| ArenaError::InvalidStateCount {
                line: HEADER_LINES,
                value: count_field.to_string(),
            })?;

        let body = &lines[HEADER_LINES..];
        if body.len() < declared {
            return Err(ArenaError::MissingStates {
                declared,
                found: body.len(),
            });
        }

        let mut states = Vec::with_capacity(declared);
        let mut source = String::new();
        for (index, raw) in body.iter().take(declared).enumerate() {
            source.push_str(raw);
            source.push('\n');
            states.push(parse_state(game, raw, index, declared)?);
        }

        Ok(Self {
            author,
            name,
            source,
            states,
        })
    }

    /// Read and parse a script file.
    pub fn load(game: &Game, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ArenaError::ScriptIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(game, &text)
    }
}

/// Parse `action, first, second` for state `index` of `declared`.
fn parse_state(game: &Game, raw: &str, index: usize, declared: usize) -> Result<State> {
    let line = index + HEADER_LINES + 1;
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(ArenaError::MalformedState {
            line,
            state: index,
            fields: fields.len(),
        });
    }

    let mut transitions = [0usize; 2];
    for (slot, (branch, field)) in [(Branch::First, fields[1]), (Branch::Second, fields[2])]
        .into_iter()
        .enumerate()
    {
        let target: i64 = field.parse().map_err(|_| ArenaError::TransitionNotANumber {
            line,
            state: index,
            branch,
            value: field.to_string(),
        })?;
        transitions[slot] = usize::try_from(target)
            .ok()
            .filter(|t| *t < declared)
            .ok_or(ArenaError::TransitionOutOfBounds {
                line,
                state: index,
                branch,
                target,
                count: declared,
            })?;
    }

    let action = single_symbol(fields[0])
        .filter(|m| game.is_legal(*m))
        .ok_or_else(|| ArenaError::IllegalAction {
            line,
            state: index,
            action: fields[0].to_string(),
            alphabet: game.alphabet(),
        })?;

    Ok(State {
        action,
        transitions,
    })
}

fn single_symbol(field: &str) -> Option<Move> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Move(c)),
        _ => None,
    }
}

/// A running machine: the states plus an instruction pointer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    states: Vec<State>,
    /// `None` until the first move against a fresh opponent
    ip: Option<usize>,
}

impl Machine {
    pub fn new(states: Vec<State>) -> Self {
        Self { states, ip: None }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn ip(&self) -> Option<usize> {
        self.ip
    }

    pub fn reset(&mut self) {
        self.ip = Some(0);
    }

    /// Advance on the opponent's moves so far and return the next action.
    ///
    /// `history` is what this opponent has played against us; an empty
    /// history restarts the machine at state 0. The instruction pointer only
    /// moves when a move is produced.
    pub fn step(&mut self, game: &Game, history: &[Move], player: &str) -> Result<Move> {
        let next = match history.last() {
            None => 0,
            Some(&last) => {
                let branch = match game.move_index(last) {
                    Some(b @ (0 | 1)) => b,
                    _ => {
                        return Err(ArenaError::InvalidPriorMove {
                            player: player.to_string(),
                            mv: last.0,
                        })
                    }
                };
                let ip = self.ip.ok_or_else(|| ArenaError::MachineNotStarted {
                    player: player.to_string(),
                })?;
                let current = self.state_at(ip, player)?;
                current.transitions[branch]
            }
        };

        let action = self.state_at(next, player)?.action;
        self.ip = Some(next);
        Ok(action)
    }

    fn state_at(&self, index: usize, player: &str) -> Result<&State> {
        self.states
            .get(index)
            .ok_or_else(|| ArenaError::InstructionOutOfBounds {
                player: player.to_string(),
                index,
                count: self.states.len(),
            })
    }
}
