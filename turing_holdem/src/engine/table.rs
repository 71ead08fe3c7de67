use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    BettingEngine,
    config::TableSettings,
    errors::{ConfigError, EngineError, EngineResult},
};
use crate::game::entities::{Card, Deck, SeatIndex, Street, Usd};

#[derive(Clone, Debug)]
struct Seat {
    stack: Usd,
    bet: Usd,
    folded: bool,
    acted: bool,
    hole: [Card; 2],
}

impl Seat {
    fn can_act(&self) -> bool {
        !self.folded && self.stack > 0
    }

    fn commit(&mut self, amount: Usd) -> Usd {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.bet += paid;
        paid
    }
}

/// Reference engine for one hand of no-limit hold'em.
///
/// Seat 0 posts the small blind and seat 1 the big blind. Preflop action
/// starts with seat 2 (wrapping for heads-up), later streets with the first
/// live seat from 0. When at most one seat can still bet the board runs out
/// automatically.
///
/// Hands are never ranked: an uncontested pot goes to the last live seat,
/// and a pot that reaches showdown is split evenly between the live seats
/// with odd chips going to the lowest seats. A bet nobody matched is handed
/// back before the pot is collected.
#[derive(Clone, Debug)]
pub struct Table {
    settings: TableSettings,
    deck: Deck,
    seats: Vec<Seat>,
    board: Vec<Card>,
    pot: Usd,
    street: Option<Street>,
    actor: Option<SeatIndex>,
    current_bet: Usd,
    min_raise: Usd,
}

impl Table {
    /// Deal a hand from a freshly shuffled deck.
    pub fn new(settings: &TableSettings) -> EngineResult<Self> {
        Self::with_rng(settings, &mut rand::rng())
    }

    /// Deal a reproducible hand.
    pub fn seeded(settings: &TableSettings, seed: u64) -> EngineResult<Self> {
        Self::with_rng(settings, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(settings: &TableSettings, rng: &mut R) -> EngineResult<Self> {
        let mut deck = Deck::default();
        deck.shuffle(rng);
        let stacks = vec![settings.starting_stack; settings.player_count];
        Self::with_deck(settings, stacks, deck)
    }

    /// Deal from `deck` as-is with explicit per-seat stacks.
    pub fn with_deck(settings: &TableSettings, stacks: Vec<Usd>, mut deck: Deck) -> EngineResult<Self> {
        settings.validate()?;
        if stacks.len() != settings.player_count {
            return Err(ConfigError::Invalid(format!(
                "{} stacks for {} seats",
                stacks.len(),
                settings.player_count
            ))
            .into());
        }
        if stacks.contains(&0) {
            return Err(ConfigError::Invalid("Every seat needs chips".to_string()).into());
        }

        let first = deal_round(&mut deck, stacks.len())?;
        let second = deal_round(&mut deck, stacks.len())?;
        let seats = stacks
            .into_iter()
            .zip(first.into_iter().zip(second))
            .map(|(stack, (a, b))| Seat {
                stack,
                bet: 0,
                folded: false,
                acted: false,
                hole: [a, b],
            })
            .collect();

        let mut table = Self {
            settings: settings.clone(),
            deck,
            seats,
            board: Vec::with_capacity(5),
            pot: 0,
            street: Some(Street::Preflop),
            actor: None,
            current_bet: settings.big_blind,
            min_raise: settings.big_blind.max(settings.min_bet),
        };
        table.post_blind(0, settings.small_blind)?;
        table.post_blind(1, settings.big_blind)?;

        match table.next_to_act(2 % table.seats.len()) {
            Some(actor) => table.actor = Some(actor),
            None => table.close_street()?,
        }
        Ok(table)
    }

    #[must_use]
    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    /// Chips collected from completed streets.
    #[must_use]
    pub fn pot(&self) -> Usd {
        self.pot
    }

    /// Chips committed on the current street, per seat.
    #[must_use]
    pub fn bets(&self) -> Vec<Usd> {
        self.seats.iter().map(|seat| seat.bet).collect()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.street.is_none()
    }

    /// Whether the actor may fold. Folding is only allowed when facing a bet.
    #[must_use]
    pub fn can_fold(&self) -> bool {
        self.actor
            .and_then(|idx| self.seats.get(idx))
            .is_some_and(|seat| seat.bet < self.current_bet)
    }

    fn post_blind(&mut self, idx: SeatIndex, amount: Usd) -> EngineResult<()> {
        let seat = self.seat_mut(idx)?;
        seat.commit(amount);
        Ok(())
    }

    fn seat_mut(&mut self, idx: SeatIndex) -> EngineResult<&mut Seat> {
        self.seats
            .get_mut(idx)
            .ok_or_else(|| EngineError::Desynchronized(format!("no seat {idx}")))
    }

    fn current_actor(&self, action: &'static str) -> EngineResult<SeatIndex> {
        self.actor
            .ok_or_else(|| EngineError::illegal(action, "no seat is on act"))
    }

    fn live_count(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.folded).count()
    }

    fn needs_action(&self, idx: SeatIndex) -> bool {
        let Some(seat) = self.seats.get(idx) else {
            return false;
        };
        if !seat.can_act() {
            return false;
        }
        if seat.bet < self.current_bet {
            return true;
        }
        let others = self
            .seats
            .iter()
            .enumerate()
            .filter(|(other, seat)| *other != idx && seat.can_act())
            .count();
        !seat.acted && others > 0
    }

    fn next_to_act(&self, start: SeatIndex) -> Option<SeatIndex> {
        let n = self.seats.len();
        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&idx| self.needs_action(idx))
    }

    fn advance(&mut self, from: SeatIndex) -> EngineResult<()> {
        if self.live_count() <= 1 {
            return self.settle();
        }
        match self.next_to_act(from + 1) {
            Some(next) => {
                self.actor = Some(next);
                Ok(())
            }
            None => self.close_street(),
        }
    }

    /// Give the biggest bettor back whatever no other seat matched.
    fn return_uncalled(&mut self) {
        let Some((top, top_bet)) = self
            .seats
            .iter()
            .map(|seat| seat.bet)
            .enumerate()
            .max_by_key(|&(_, bet)| bet)
        else {
            return;
        };
        let matched = self
            .seats
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != top)
            .map(|(_, seat)| seat.bet)
            .max()
            .unwrap_or(0);
        let uncalled = top_bet.saturating_sub(matched);
        if uncalled == 0 {
            return;
        }
        if let Some(seat) = self.seats.get_mut(top) {
            seat.bet -= uncalled;
            seat.stack += uncalled;
            debug!("returned {uncalled} uncalled to seat {top}");
        }
    }

    fn collect_bets(&mut self) {
        self.return_uncalled();
        for seat in &mut self.seats {
            self.pot += seat.bet;
            seat.bet = 0;
        }
    }

    fn deal_board(&mut self, len: usize) -> EngineResult<()> {
        while self.board.len() < len {
            let card = self
                .deck
                .deal_card()
                .ok_or_else(|| EngineError::Desynchronized("deck exhausted".to_string()))?;
            self.board.push(card);
        }
        Ok(())
    }

    fn close_street(&mut self) -> EngineResult<()> {
        self.actor = None;
        loop {
            self.collect_bets();
            let Some(street) = self.street else {
                return Ok(());
            };
            let Some(next) = Street::from_index(street.index() + 1) else {
                return self.settle();
            };
            self.deal_board(next.board_len())?;
            self.street = Some(next);
            self.current_bet = 0;
            self.min_raise = self.settings.min_bet;
            for seat in &mut self.seats {
                seat.acted = false;
            }
            debug!("dealt the {next}, pot {}", self.pot);
            if let Some(actor) = self.next_to_act(0) {
                self.actor = Some(actor);
                return Ok(());
            }
        }
    }

    fn settle(&mut self) -> EngineResult<()> {
        self.collect_bets();
        self.actor = None;
        self.street = None;

        let live: Vec<SeatIndex> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, seat)| !seat.folded)
            .map(|(idx, _)| idx)
            .collect();
        if live.is_empty() {
            return Err(EngineError::Desynchronized("every seat folded".to_string()));
        }
        if live.len() > 1 {
            self.deal_board(Street::River.board_len())?;
        }

        let count = Usd::try_from(live.len())
            .map_err(|_| EngineError::Desynchronized("too many live seats".to_string()))?;
        let share = self.pot / count;
        let mut odd = self.pot % count;
        for idx in live {
            let extra = if odd > 0 {
                odd -= 1;
                1
            } else {
                0
            };
            self.seat_mut(idx)?.stack += share + extra;
        }
        debug!("settled pot {}", self.pot);
        self.pot = 0;
        Ok(())
    }
}

fn deal_round(deck: &mut Deck, seats: usize) -> EngineResult<Vec<Card>> {
    (0..seats)
        .map(|_| {
            deck.deal_card()
                .ok_or_else(|| EngineError::Desynchronized("deck exhausted".to_string()))
        })
        .collect()
}

impl BettingEngine for Table {
    fn player_count(&self) -> usize {
        self.seats.len()
    }

    fn actor_index(&self) -> Option<SeatIndex> {
        self.actor
    }

    fn street_index(&self) -> Option<usize> {
        self.street.map(Street::index)
    }

    fn board(&self) -> Vec<Card> {
        self.board.clone()
    }

    fn hole_cards(&self, seat: SeatIndex) -> Vec<Card> {
        self.seats
            .get(seat)
            .map(|seat| seat.hole.to_vec())
            .unwrap_or_default()
    }

    fn can_check_or_call(&self) -> bool {
        self.actor.is_some()
    }

    fn min_raise_to(&self) -> Option<Usd> {
        let actor = self.actor?;
        let ceiling = self.effective_stack(actor);
        if ceiling <= self.current_bet {
            return None;
        }
        let opponents = self
            .seats
            .iter()
            .enumerate()
            .any(|(idx, seat)| idx != actor && seat.can_act());
        if !opponents {
            return None;
        }
        Some((self.current_bet + self.min_raise).min(ceiling))
    }

    fn can_raise_to(&self, amount: Usd) -> bool {
        match (self.min_raise_to(), self.actor) {
            (Some(min), Some(actor)) => amount >= min && amount <= self.effective_stack(actor),
            _ => false,
        }
    }

    fn effective_stack(&self, seat: SeatIndex) -> Usd {
        self.seats
            .get(seat)
            .map_or(0, |seat| seat.stack + seat.bet)
    }

    fn fold(&mut self) -> EngineResult<()> {
        let idx = self.current_actor("fold")?;
        if !self.can_fold() {
            return Err(EngineError::illegal("fold", "nothing to call, checking is free"));
        }
        self.seat_mut(idx)?.folded = true;
        self.advance(idx)
    }

    fn check_or_call(&mut self) -> EngineResult<Usd> {
        let idx = self.current_actor("check/call")?;
        let current_bet = self.current_bet;
        let seat = self.seat_mut(idx)?;
        let paid = seat.commit(current_bet.saturating_sub(seat.bet));
        seat.acted = true;
        self.advance(idx)?;
        Ok(paid)
    }

    fn raise_to(&mut self, amount: Usd) -> EngineResult<()> {
        let idx = self.current_actor("raise")?;
        if !self.can_raise_to(amount) {
            let reason = match self.min_raise_to() {
                Some(min) => format!(
                    "raise to {amount} outside {min}..={}",
                    self.effective_stack(idx)
                ),
                None => "seat cannot raise".to_string(),
            };
            return Err(EngineError::illegal("raise", reason));
        }
        let increment = amount - self.current_bet;
        if increment >= self.min_raise {
            self.min_raise = increment;
        }
        self.current_bet = amount;
        let seat = self.seat_mut(idx)?;
        seat.commit(amount - seat.bet);
        seat.acted = true;
        self.advance(idx)
    }

    fn stacks(&self) -> Vec<Usd> {
        self.seats.iter().map(|seat| seat.stack).collect()
    }
}
