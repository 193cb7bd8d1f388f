//! Serializable summaries of finished runs for a presentation layer

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evolution::{EvolutionaryRun, Generation};
use crate::matchup::Outcome;
use crate::strategy::{PlayerId, Strategy};
use crate::tournament::Tournament;

/// Display metadata for one logical player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub author: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PlayerSummary {
    pub fn of(player: &Strategy) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            author: player.author().to_string(),
            description: player.describe(),
            source: player.source().map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerSummary,
    pub score: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub player_one: PlayerId,
    pub player_two: PlayerId,
    pub score_one: u64,
    pub score_two: u64,
    pub games: usize,
    pub outcome: Outcome,
}

/// Final standings and per-match results of a tournament
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    pub played: bool,
    /// Highest score first; ties broken by id
    pub standings: Vec<Standing>,
    pub matches: Vec<MatchSummary>,
}

impl TournamentReport {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        let mut standings: Vec<Standing> = distinct(tournament.players())
            .map(|player| Standing {
                score: tournament.score_of(player.id()).unwrap_or(0),
                player: PlayerSummary::of(player),
            })
            .collect();
        standings.sort_by(|a, b| b.score.cmp(&a.score).then(a.player.id.cmp(&b.player.id)));

        let matches = tournament
            .matches()
            .iter()
            .map(|m| MatchSummary {
                player_one: m.player_one().id(),
                player_two: m.player_two().id(),
                score_one: m.score_one(),
                score_two: m.score_two(),
                games: m.num_games(),
                outcome: m.outcome(),
            })
            .collect();

        Self {
            played: tournament.is_played(),
            standings,
            matches,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Players and generation series of an evolutionary run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub played: bool,
    pub players: Vec<PlayerSummary>,
    pub generations: Vec<Generation>,
}

impl EvolutionReport {
    pub fn from_run(run: &EvolutionaryRun) -> Self {
        Self {
            played: run.is_played(),
            players: distinct(run.players()).map(PlayerSummary::of).collect(),
            generations: run.generations().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// First entry of each identity, in roster order
fn distinct(roster: &[Strategy]) -> impl Iterator<Item = &Strategy> {
    roster
        .iter()
        .enumerate()
        .filter(move |(i, s)| !roster[..*i].iter().any(|p| p.id() == s.id()))
        .map(|(_, s)| s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::machine::tests::{ALL_C, ALL_D, TFT};
    use crate::matchup::MatchConfig;
    use crate::strategy::IdAllocator;

    fn short_config() -> MatchConfig {
        MatchConfig {
            full_lengths: vec![10],
            quick_lengths: vec![10],
        }
    }

    fn scripted(ids: &mut IdAllocator, text: &str) -> Strategy {
        Strategy::scripted(ids, &Game::prisoners_dilemma(), text).unwrap()
    }

    #[test]
    fn test_standings_sorted() {
        let mut ids = IdAllocator::default();
        let all_c = scripted(&mut ids, ALL_C);
        let all_d = scripted(&mut ids, ALL_D);
        let mut t = Tournament::with_config(Game::prisoners_dilemma(), short_config());
        t.add_player(&all_c);
        t.add_player(&all_d);
        t.run().unwrap();

        let report = TournamentReport::from_tournament(&t);

        assert!(report.played);
        assert_eq!(report.standings.len(), 2);
        assert_eq!(report.standings[0].player.id, all_d.id());
        assert_eq!(report.standings[0].score, 5 * 10 + 2 * 10);
        assert_eq!(report.standings[1].score, 2 * 3 * 10);
        assert_eq!(report.matches.len(), 3);
        assert_eq!(report.matches[1].outcome, Outcome::PlayerTwo);
        assert_eq!(report.matches[0].outcome, Outcome::Tie);
    }

    #[test]
    fn test_ties_ordered_by_id() {
        let mut ids = IdAllocator::default();
        let mut t = Tournament::with_config(Game::prisoners_dilemma(), short_config());
        let b = Strategy::tit_for_tat(&mut ids).unwrap();
        let a = scripted(&mut ids, TFT);
        t.add_player(&a);
        t.add_player(&b);
        t.run().unwrap();

        let report = TournamentReport::from_tournament(&t);
        assert_eq!(report.standings[0].score, report.standings[1].score);
        assert_eq!(report.standings[0].player.id, b.id());
    }

    #[test]
    fn test_unplayed_tournament_reports_zero() {
        let mut ids = IdAllocator::default();
        let mut t = Tournament::new(Game::prisoners_dilemma());
        let tft = Strategy::tit_for_tat(&mut ids).unwrap();
        t.add_player(&tft);
        t.add_player(&tft);

        let report = TournamentReport::from_tournament(&t);
        assert!(!report.played);
        assert_eq!(report.standings.len(), 1);
        assert_eq!(report.standings[0].score, 0);
    }

    #[test]
    fn test_tournament_json() {
        let mut ids = IdAllocator::default();
        let mut t = Tournament::with_config(Game::prisoners_dilemma(), short_config());
        t.add_player(&scripted(&mut ids, TFT));
        t.add_player(&Strategy::random(&mut ids, 2).unwrap());
        t.run().unwrap();

        let json = TournamentReport::from_tournament(&t).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let standings = value["standings"].as_array().unwrap();
        assert_eq!(standings.len(), 2);
        let scripted_entry = standings
            .iter()
            .find(|s| s["player"]["name"] == "TitForTat")
            .unwrap();
        assert_eq!(scripted_entry["player"]["author"], "Charles Pence");
        assert!(scripted_entry["player"]["source"].as_str().unwrap().starts_with("C, 0, 1"));

        let builtin = standings
            .iter()
            .find(|s| s["player"]["name"] == "Built-In Random")
            .unwrap();
        assert!(builtin["player"].get("source").is_none());
    }

    #[test]
    fn test_evolution_report() {
        let mut ids = IdAllocator::default();
        let tft = Strategy::tit_for_tat(&mut ids).unwrap();
        let all_d = scripted(&mut ids, ALL_D);
        let mut run = EvolutionaryRun::with_config(Game::prisoners_dilemma(), short_config());
        run.add_player(&tft);
        run.add_player(&all_d);
        run.run(3).unwrap();

        let report = EvolutionReport::from_run(&run);
        assert_eq!(report.players.len(), 2);
        assert_eq!(report.generations.len(), 4);

        let json = report.to_json().unwrap();
        let parsed: EvolutionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.players, report.players);
        assert_eq!(parsed.generations.len(), 4);
        let key = tft.id().0.to_string();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["generations"][0]["fractions"][key.as_str()], 0.5);
    }
}
