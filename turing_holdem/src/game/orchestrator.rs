use log::{debug, info, warn};
use std::path::PathBuf;

use super::{
    entities::{SeatIndex, Street, Usd},
    errors::{GameError, GameResult},
    fallback::apply_with_fallback,
    models::{HandSummary, Player, Turn},
    state_machine::HandPhase,
};
use crate::{
    decision::{DecisionRequest, decide},
    engine::{BettingEngine, EngineResult},
    report::Reporter,
};

/// Runs hands between a fixed set of seated players.
///
/// A fresh engine comes from `new_table` at the start of every hand. Seats
/// and their policies stay the same for the whole run, and each hand's
/// winner is recorded with the reporter.
pub struct Orchestrator<F> {
    players: Vec<Player>,
    new_table: F,
    reporter: Reporter,
    hands_played: usize,
}

impl<F, E> Orchestrator<F>
where
    F: FnMut() -> EngineResult<E>,
    E: BettingEngine,
{
    /// Seat `players`, which must cover seats `0..n` exactly once.
    pub fn new(mut players: Vec<Player>, new_table: F, reporter: Reporter) -> GameResult<Self> {
        if players.len() < 2 {
            return Err(GameError::Seating(format!(
                "need at least 2 players, got {}",
                players.len()
            )));
        }
        players.sort_by_key(|player| player.seat);
        for (idx, player) in players.iter().enumerate() {
            if player.seat != idx {
                return Err(GameError::Seating(format!(
                    "{} is in seat {} but seat {idx} is empty or taken twice",
                    player.name, player.seat
                )));
            }
        }
        Ok(Self {
            players,
            new_table,
            reporter,
            hands_played: 0,
        })
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn hands_played(&self) -> usize {
        self.hands_played
    }

    /// Winners recorded so far, one per completed hand.
    #[must_use]
    pub fn winners(&self) -> &[String] {
        self.reporter.winners()
    }

    #[must_use]
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Play `hands` hands in a row and write the session report.
    pub fn play(&mut self, hands: usize) -> GameResult<PathBuf> {
        for _ in 0..hands {
            let summary = self.hand()?;
            debug!("Hand {} stacks {:?}", summary.hand, summary.stacks);
        }
        Ok(self.reporter.flush()?)
    }

    /// Play a single hand to completion.
    pub fn hand(&mut self) -> GameResult<HandSummary> {
        let hand = self.hands_played + 1;
        info!("Hand {hand}");

        let mut engine = (self.new_table)().map_err(|err| GameError::engine(hand, None, err))?;
        if engine.player_count() != self.players.len() {
            return Err(GameError::desync(
                hand,
                None,
                format!(
                    "engine dealt {} seats for {} players",
                    engine.player_count(),
                    self.players.len()
                ),
            ));
        }

        let mut turns = Vec::new();
        let mut phase = HandPhase::default();
        while let Some(street) = phase.street() {
            self.play_street(hand, street, &mut engine, &mut turns)?;
            phase = phase.next();
        }

        let summary = self.settle(hand, &engine, turns)?;
        info!(
            "Hand {hand} won by {} ({}) in seat {}",
            self.players[summary.winner].name, summary.winner_name, summary.winner
        );
        self.reporter.record(summary.winner_name.clone());
        self.hands_played = hand;
        Ok(summary)
    }

    fn play_street(
        &mut self,
        hand: usize,
        street: Street,
        engine: &mut E,
        turns: &mut Vec<Turn>,
    ) -> GameResult<()> {
        let seats = self.players.len();
        if current_street(hand, None, engine)? == Some(street) {
            info!("{street}");
        }

        for _ in 0..seats {
            let Some(seat) = engine.actor_index() else {
                continue;
            };
            match current_street(hand, Some(seat), engine)? {
                Some(current) if current == street => {}
                Some(_) => break,
                None => {
                    return Err(GameError::desync(
                        hand,
                        Some(seat),
                        "seat on act in a settled hand",
                    ));
                }
            }
            turns.push(self.take_turn(hand, seat, street, engine)?);
        }

        for _ in 0..seats {
            let Some(seat) = engine.actor_index() else {
                break;
            };
            if current_street(hand, Some(seat), engine)? != Some(street) || !engine.can_check_or_call() {
                break;
            }
            warn!("Seat {seat} still to act on the {street}, checking/calling to close it");
            engine
                .check_or_call()
                .map_err(|err| GameError::engine(hand, Some(seat), err))?;
        }

        if let Some(current) = current_street(hand, None, engine)? {
            if current < street {
                return Err(GameError::desync(
                    hand,
                    engine.actor_index(),
                    format!("engine still on the {current} after the {street} closed"),
                ));
            }
            if current == street && engine.actor_index().is_some() {
                return Err(GameError::desync(
                    hand,
                    engine.actor_index(),
                    format!("the {street} did not close"),
                ));
            }
        }
        Ok(())
    }

    fn take_turn(&mut self, hand: usize, seat: SeatIndex, street: Street, engine: &mut E) -> GameResult<Turn> {
        let player = self.players.get_mut(seat).ok_or_else(|| {
            GameError::desync(hand, Some(seat), format!("no player in seat {seat}"))
        })?;

        let board = engine.board();
        let hole_cards = engine.hole_cards(seat);
        let request = DecisionRequest {
            personality: &player.personality.name,
            hole_cards: &hole_cards,
            board: &board,
            street,
        };
        let requested = decide(&mut player.policy, &request)
            .map_err(|source| GameError::ProviderUnavailable { hand, seat, source })?;
        let resolution = apply_with_fallback(engine, seat, requested)
            .map_err(|err| GameError::engine(hand, Some(seat), err))?;

        info!("{} {resolution}", player.name);
        Ok(Turn {
            street,
            seat,
            resolution,
        })
    }

    fn settle(&self, hand: usize, engine: &E, turns: Vec<Turn>) -> GameResult<HandSummary> {
        if let Some(seat) = engine.actor_index() {
            return Err(GameError::desync(
                hand,
                Some(seat),
                "hand not settled after the river",
            ));
        }
        let stacks = engine.stacks();
        if stacks.len() != self.players.len() {
            return Err(GameError::desync(
                hand,
                None,
                format!("{} stacks for {} players", stacks.len(), self.players.len()),
            ));
        }
        let winner = winning_seat(&stacks)
            .ok_or_else(|| GameError::desync(hand, None, "no stacks to settle"))?;
        let winner_name = self.players[winner].personality.name.clone();
        Ok(HandSummary {
            hand,
            winner,
            winner_name,
            stacks,
            turns,
        })
    }
}

/// Read the engine's street, failing on an index outside 0..=3.
fn current_street<E: BettingEngine + ?Sized>(
    hand: usize,
    seat: Option<SeatIndex>,
    engine: &E,
) -> GameResult<Option<Street>> {
    match engine.street_index() {
        None => Ok(None),
        Some(idx) => Street::from_index(idx)
            .map(Some)
            .ok_or_else(|| GameError::desync(hand, seat, format!("unknown street index {idx}"))),
    }
}

/// The seat with the biggest stack; the lowest seat wins ties.
#[must_use]
pub fn winning_seat(stacks: &[Usd]) -> Option<SeatIndex> {
    let max = stacks.iter().max()?;
    stacks.iter().position(|stack| stack == max)
}
