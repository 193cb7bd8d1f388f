//! Error types shared by every stage of the engine
//!
//! Failures fall into three groups: malformed input (bad scripts), runtime
//! invariant violations (a move or instruction pointer left its valid range
//! mid-match) and precondition failures (nothing to schedule). Every
//! fallible operation returns [`Result`]; nothing is reported through
//! global state.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of a game an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    One,
    Two,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => write!(f, "player one"),
            Seat::Two => write!(f, "player two"),
        }
    }
}

/// The two transition fields of a machine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Taken when the opponent played the game's first move.
    First,
    /// Taken when the opponent played the game's second move.
    Second,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::First => write!(f, "first"),
            Branch::Second => write!(f, "second"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArenaError {
    // ── Malformed scripts ────────────────────────────────────────────
    #[error("script ended early: {lines} line(s), need author, name, state count and states")]
    ScriptTooShort { lines: usize },

    #[error("line {line}: state count {value:?} is not a non-negative integer")]
    InvalidStateCount { line: usize, value: String },

    #[error("script declares {declared} state(s) but only {found} state line(s) follow")]
    MissingStates { declared: usize, found: usize },

    #[error("line {line}, state {state}: expected `action, next, next` but found {fields} field(s)")]
    MalformedState { line: usize, state: usize, fields: usize },

    #[error("line {line}, state {state}: {branch} transition {value:?} is not a number")]
    TransitionNotANumber {
        line: usize,
        state: usize,
        branch: Branch,
        value: String,
    },

    #[error("line {line}, state {state}: {branch} transition {target} is out of bounds (0..{count})")]
    TransitionOutOfBounds {
        line: usize,
        state: usize,
        branch: Branch,
        target: i64,
        count: usize,
    },

    #[error("line {line}, state {state}: action {action:?} is not a legal move in {{{alphabet}}}")]
    IllegalAction {
        line: usize,
        state: usize,
        action: String,
        alphabet: String,
    },

    #[error("could not read script {path}: {source}")]
    ScriptIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Runtime invariants ───────────────────────────────────────────
    #[error("player {player} faced an opponent whose last move {mv:?} has no transition")]
    InvalidPriorMove { player: String, mv: char },

    #[error("player {player} stepped out of bounds (state {index} of {count})")]
    InstructionOutOfBounds {
        player: String,
        index: usize,
        count: usize,
    },

    #[error("player {player} has opponent history but its machine was never started")]
    MachineNotStarted { player: String },

    #[error("{seat} ({player}) made an invalid move {mv:?} (move not in {{{alphabet}}})")]
    IllegalMove {
        seat: Seat,
        player: String,
        mv: char,
        alphabet: String,
    },

    #[error("{seat} ({player}) has not decided on a move")]
    MoveNotDecided { seat: Seat, player: String },

    // ── Preconditions ────────────────────────────────────────────────
    #[error("game has no legal moves")]
    EmptyAlphabet,

    #[error("roster is empty")]
    EmptyRoster,

    #[error("no matches scheduled")]
    NoMatches,

    #[error("invalid match config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("player identities exhausted")]
    IdsExhausted,

    #[error("could not render report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;

/// Message returned by [`ErrorStack::pop`] when nothing has been reported.
pub const NO_ERROR: &str = "No error";

/// Last-in-first-out store of diagnostic messages.
///
/// For hosts that display failures after the fact: push the message of a
/// failed operation, pop it when the dialog is shown. Owned by the caller.
#[derive(Clone, Debug, Default)]
pub struct ErrorStack {
    messages: Vec<String>,
}

impl ErrorStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Push the rendered message of `err`.
    pub fn report(&mut self, err: &ArenaError) {
        self.push(err.to_string());
    }

    /// Most recently pushed message, or [`NO_ERROR`].
    pub fn pop(&mut self) -> String {
        self.messages.pop().unwrap_or_else(|| NO_ERROR.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
