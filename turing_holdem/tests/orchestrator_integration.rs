//! End-to-end hands driven through the orchestrator
//!
//! These tests seat the six preset personalities at the reference table and
//! script their decisions to exercise:
//! - Street progression and winner selection
//! - The fallback ladder against real table legality
//! - Fatal errors carrying the hand and seat
//! - Session report output

use std::{path::PathBuf, sync::Arc};

use turing_holdem::{
    decision::{DecisionError, Policy, RangePolicy, ScriptedPolicy},
    engine::{BettingEngine, EngineResult, Table, TableSettings},
    game::{
        Applied, GameError, Orchestrator, Player,
        entities::{Action, Card, Deck, SeatIndex, Street, Usd, parse_cards},
    },
    personality::Personality,
    report::{Reporter, SessionReport},
};

fn report_dir() -> PathBuf {
    std::env::temp_dir().join(format!("turing_holdem_{}", uuid::Uuid::new_v4()))
}

fn seat_players(policies: Vec<Policy>) -> Vec<Player> {
    Personality::presets()
        .iter()
        .zip(policies)
        .enumerate()
        .map(|(seat, (personality, policy))| {
            Player::new(format!("Player {seat}"), Arc::clone(personality), seat, policy)
        })
        .collect()
}

fn scripted(labels: [&str; 6]) -> Vec<Policy> {
    labels
        .into_iter()
        .map(|label| Policy::from(ScriptedPolicy::constant(label)))
        .collect()
}

fn seeded_tables(seed: u64) -> impl FnMut() -> EngineResult<Table> {
    let settings = TableSettings::default();
    let mut next = seed;
    move || {
        next += 1;
        Table::seeded(&settings, next)
    }
}

// === Street Progression Tests ===

#[test]
fn test_all_check_hand_ties_to_seat_zero() {
    let players = seat_players(scripted(["check"; 6]));
    let mut orchestrator =
        Orchestrator::new(players, seeded_tables(0), Reporter::new(report_dir())).unwrap();

    let summary = orchestrator.hand().unwrap();
    assert_eq!(summary.hand, 1);
    assert_eq!(summary.stacks, vec![1000; 6]);
    assert_eq!(summary.winner, 0);
    assert_eq!(summary.winner_name, "nine_percent");
    assert_eq!(summary.turns.len(), 24);
    for street in Street::ALL {
        let seats: Vec<SeatIndex> = summary
            .turns
            .iter()
            .filter(|turn| turn.street == street)
            .map(|turn| turn.seat)
            .collect();
        let expected = if street == Street::Preflop {
            vec![2, 3, 4, 5, 0, 1]
        } else {
            vec![0, 1, 2, 3, 4, 5]
        };
        assert_eq!(seats, expected, "{street}");
    }
    assert!(summary.turns.iter().all(|turn| !turn.resolution.downgraded()));
    assert_eq!(orchestrator.winners(), ["nine_percent"]);
}

#[test]
fn test_play_writes_one_winner_per_hand() {
    let dir = report_dir();
    let players = seat_players(scripted(["call"; 6]));
    let mut orchestrator =
        Orchestrator::new(players, seeded_tables(0), Reporter::new(&dir)).unwrap();

    let path = orchestrator.play(4).unwrap();
    assert_eq!(orchestrator.hands_played(), 4);
    assert!(path.starts_with(&dir));

    let report = SessionReport::load(&path).unwrap();
    assert_eq!(report.winners, vec!["nine_percent"; 4]);
    assert!(report.created_at.is_some());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_folds_to_big_blind() {
    let players = seat_players(scripted(["fold", "check", "fold", "fold", "fold", "fold"]));
    let mut orchestrator =
        Orchestrator::new(players, seeded_tables(3), Reporter::new(report_dir())).unwrap();

    let summary = orchestrator.hand().unwrap();
    assert_eq!(summary.winner, 1);
    assert_eq!(summary.winner_name, "fifteen_percent");
    assert_eq!(summary.stacks, vec![975, 1025, 1000, 1000, 1000, 1000]);
    assert_eq!(summary.turns.len(), 5);
}

// === Fallback Tests ===

#[test]
fn test_all_in_raises_to_full_stack() {
    let players = seat_players(scripted(["all_in"; 6]));
    let mut orchestrator =
        Orchestrator::new(players, seeded_tables(5), Reporter::new(report_dir())).unwrap();

    let summary = orchestrator.hand().unwrap();
    let first = summary.turns[0];
    assert_eq!(first.seat, 2);
    assert_eq!(first.resolution.requested, Action::AllIn);
    assert_eq!(first.resolution.applied, Applied::RaiseTo(1000));
    assert!(!first.resolution.downgraded());

    // nobody behind can raise over a full stack shove, so they call it off
    for turn in &summary.turns[1..] {
        assert!(matches!(turn.resolution.applied, Applied::CheckOrCall(_)));
        assert!(turn.resolution.downgraded());
    }
    assert_eq!(summary.turns.len(), 6);
    assert_eq!(summary.stacks, vec![1000; 6]);
    assert_eq!(summary.winner, 0);
}

#[test]
fn test_all_in_ignores_shorter_stacks() {
    let starting: Vec<Usd> = vec![300, 300, 1000, 300, 300, 300];
    let stacks = starting.clone();
    let tables = move || Table::with_deck(&TableSettings::default(), stacks.clone(), Deck::default());
    let players = seat_players(scripted(["fold", "fold", "all_in", "call", "fold", "fold"]));
    let mut orchestrator = Orchestrator::new(players, tables, Reporter::new(report_dir())).unwrap();

    let summary = orchestrator.hand().unwrap();
    let shove = summary.turns[0];
    assert_eq!(shove.seat, 2);
    assert_eq!(shove.resolution.applied, Applied::RaiseTo(1000));
    assert!(!shove.resolution.downgraded());

    let call = summary.turns[1];
    assert_eq!(call.seat, 3);
    assert_eq!(call.resolution.applied, Applied::CheckOrCall(300));

    // the 700 nobody could call goes back to the shover before the split
    assert_eq!(summary.stacks, vec![275, 250, 1038, 337, 300, 300]);
    assert_eq!(
        summary.stacks.iter().sum::<Usd>(),
        starting.iter().sum::<Usd>()
    );
    assert_eq!(summary.winner, 2);
    assert_eq!(summary.winner_name, "twenty_percent");
}

#[test]
fn test_illegal_raise_folds_instead_of_calling() {
    let players = seat_players(scripted(["fold", "fold", "all_in", "raise", "fold", "fold"]));
    let mut orchestrator =
        Orchestrator::new(players, seeded_tables(9), Reporter::new(report_dir())).unwrap();

    let summary = orchestrator.hand().unwrap();
    let raise = summary.turns[1];
    assert_eq!(raise.seat, 3);
    assert_eq!(raise.resolution.requested, Action::Raise);
    assert_eq!(raise.resolution.applied, Applied::Fold);

    // everyone folds to the shove
    assert_eq!(summary.winner, 2);
    assert_eq!(summary.stacks[2], 1075);
}

#[test]
fn test_fold_when_checking_is_free_becomes_check() {
    let players = seat_players(scripted(["call", "fold", "call", "call", "call", "call"]));
    let mut orchestrator =
        Orchestrator::new(players, seeded_tables(1), Reporter::new(report_dir())).unwrap();

    let summary = orchestrator.hand().unwrap();
    let big_blind: Vec<_> = summary.turns.iter().filter(|turn| turn.seat == 1).collect();
    assert_eq!(big_blind.len(), 4);
    for turn in big_blind {
        assert_eq!(turn.resolution.requested, Action::Fold);
        assert_eq!(turn.resolution.applied, Applied::CheckOrCall(0));
    }
    assert_eq!(summary.stacks, vec![1000; 6]);
}

#[test]
fn test_unknown_label_is_a_fold() {
    let players = seat_players(scripted(["check", "check", "bluff", "check", "check", "check"]));
    let mut orchestrator =
        Orchestrator::new(players, seeded_tables(2), Reporter::new(report_dir())).unwrap();

    let summary = orchestrator.hand().unwrap();
    let first = summary.turns[0];
    assert_eq!(first.seat, 2);
    assert_eq!(first.resolution.requested, Action::Fold);
    assert_eq!(first.resolution.applied, Applied::Fold);
    assert!(summary.turns.iter().skip(1).all(|turn| turn.seat != 2));
}

// === Range Policy Tests ===

#[test]
fn test_range_policies_are_reproducible() {
    let run = || {
        let policies = Personality::presets()
            .iter()
            .map(|personality| Policy::from(RangePolicy::chen(Arc::clone(personality))))
            .collect();
        let mut orchestrator = Orchestrator::new(
            seat_players(policies),
            seeded_tables(100),
            Reporter::new(report_dir()),
        )
        .unwrap();
        for _ in 0..20 {
            let summary = orchestrator.hand().unwrap();
            assert_eq!(summary.stacks.iter().sum::<Usd>(), 6000);
        }
        orchestrator.winners().to_vec()
    };
    let first = run();
    assert_eq!(first.len(), 20);
    assert_eq!(first, run());
}

// === Error Tests ===

#[test]
fn test_provider_failure_names_hand_and_seat() {
    let mut policies = scripted(["check"; 6]);
    let mut preflops = 0;
    policies[4] = Policy::from(ScriptedPolicy::new(move |request| {
        if request.street == Street::Preflop {
            preflops += 1;
        }
        if request.street == Street::Flop && preflops == 2 {
            Err(DecisionError::Unavailable("connection refused".to_string()))
        } else {
            Ok("check".to_string())
        }
    }));
    let mut orchestrator = Orchestrator::new(
        seat_players(policies),
        seeded_tables(0),
        Reporter::new(report_dir()),
    )
    .unwrap();

    orchestrator.hand().unwrap();
    let err = orchestrator.hand().unwrap_err();
    assert!(matches!(
        err,
        GameError::ProviderUnavailable { hand: 2, seat: 4, .. }
    ));
    assert_eq!(err.hand(), Some(2));
    assert_eq!(err.seat(), Some(4));
    assert_eq!(orchestrator.winners().len(), 1);
}

#[test]
fn test_seating_must_cover_every_seat() {
    let mut players = seat_players(scripted(["check"; 6]));
    players[5].seat = 0;
    let result = Orchestrator::new(players, seeded_tables(0), Reporter::new(report_dir()));
    assert!(matches!(result, Err(GameError::Seating(_))));

    let lonely = seat_players(scripted(["check"; 6])).into_iter().take(1).collect();
    let result = Orchestrator::new(lonely, seeded_tables(0), Reporter::new(report_dir()));
    assert!(matches!(result, Err(GameError::Seating(_))));
}

#[test]
fn test_players_are_sorted_by_seat() {
    let mut players = seat_players(scripted(["check"; 6]));
    players.reverse();
    let orchestrator =
        Orchestrator::new(players, seeded_tables(0), Reporter::new(report_dir())).unwrap();
    let seats: Vec<SeatIndex> = orchestrator.players().iter().map(|p| p.seat).collect();
    assert_eq!(seats, vec![0, 1, 2, 3, 4, 5]);
}

/// An engine that only answers with whatever street and actor it's given
struct FrozenEngine {
    street: Option<usize>,
    actor: Option<SeatIndex>,
}

impl BettingEngine for FrozenEngine {
    fn player_count(&self) -> usize {
        6
    }

    fn actor_index(&self) -> Option<SeatIndex> {
        self.actor
    }

    fn street_index(&self) -> Option<usize> {
        self.street
    }

    fn board(&self) -> Vec<Card> {
        Vec::new()
    }

    fn hole_cards(&self, _seat: SeatIndex) -> Vec<Card> {
        parse_cards("As Kd").unwrap()
    }

    fn can_check_or_call(&self) -> bool {
        true
    }

    fn min_raise_to(&self) -> Option<Usd> {
        None
    }

    fn can_raise_to(&self, _amount: Usd) -> bool {
        false
    }

    fn effective_stack(&self, _seat: SeatIndex) -> Usd {
        1000
    }

    fn fold(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn check_or_call(&mut self) -> EngineResult<Usd> {
        Ok(0)
    }

    fn raise_to(&mut self, _amount: Usd) -> EngineResult<()> {
        Ok(())
    }

    fn stacks(&self) -> Vec<Usd> {
        vec![1000; 6]
    }
}

#[test]
fn test_unknown_street_index_is_desync() {
    let tables = || -> EngineResult<FrozenEngine> {
        Ok(FrozenEngine {
            street: Some(7),
            actor: Some(3),
        })
    };
    let mut orchestrator = Orchestrator::new(
        seat_players(scripted(["check"; 6])),
        tables,
        Reporter::new(report_dir()),
    )
    .unwrap();
    let err = orchestrator.hand().unwrap_err();
    assert!(matches!(err, GameError::Desynchronized { hand: 1, .. }));
    assert!(err.to_string().contains("unknown street index 7"));
}

#[test]
fn test_engine_stuck_behind_is_desync() {
    let tables = || -> EngineResult<FrozenEngine> {
        Ok(FrozenEngine {
            street: Some(0),
            actor: None,
        })
    };
    let mut orchestrator = Orchestrator::new(
        seat_players(scripted(["check"; 6])),
        tables,
        Reporter::new(report_dir()),
    )
    .unwrap();
    let err = orchestrator.hand().unwrap_err();
    assert!(matches!(err, GameError::Desynchronized { hand: 1, .. }));
    assert!(orchestrator.winners().is_empty());
}

#[test]
fn test_street_that_never_closes_is_desync() {
    let tables = || -> EngineResult<FrozenEngine> {
        Ok(FrozenEngine {
            street: Some(0),
            actor: Some(2),
        })
    };
    let mut orchestrator = Orchestrator::new(
        seat_players(scripted(["check"; 6])),
        tables,
        Reporter::new(report_dir()),
    )
    .unwrap();
    let err = orchestrator.hand().unwrap_err();
    assert!(matches!(
        err,
        GameError::Desynchronized { hand: 1, seat: Some(2), .. }
    ));
}
