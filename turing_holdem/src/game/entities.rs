use log::warn;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::errors::CardError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Club => 'c',
            Self::Diamond => 'd',
            Self::Heart => 'h',
            Self::Spade => 's',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'c' | 'C' | '♣' => Some(Self::Club),
            'd' | 'D' | '♦' => Some(Self::Diamond),
            'h' | 'H' | '♥' => Some(Self::Heart),
            's' | 'S' | '♠' => Some(Self::Spade),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Spade => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Card values, deuce through ace. Aces are always high for range and
/// strength purposes.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum Value {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Value {
    /// All values in ascending order.
    pub const ALL: [Value; 13] = [
        Value::Two,
        Value::Three,
        Value::Four,
        Value::Five,
        Value::Six,
        Value::Seven,
        Value::Eight,
        Value::Nine,
        Value::Ten,
        Value::Jack,
        Value::Queen,
        Value::King,
        Value::Ace,
    ];

    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(usize::from(rank.checked_sub(2)?)).copied()
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Ten => 'T',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
            v => char::from(b'0' + v.rank()),
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'T' => Some(Self::Ten),
            'J' => Some(Self::Jack),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            'A' => Some(Self::Ace),
            d @ '2'..='9' => Self::from_rank(d as u8 - b'0'),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A card is a tuple of a value and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    #[must_use]
    pub fn value(self) -> Value {
        self.0
    }

    #[must_use]
    pub fn suit(self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.0.as_char(), self.1.as_char())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || CardError::InvalidCard(s.to_string());
        let suit_char = s.chars().last().ok_or_else(invalid)?;
        let value_str = &s[..s.len() - suit_char.len_utf8()];
        let value = match value_str {
            "10" => Value::Ten,
            v if v.chars().count() == 1 => v.chars().next().and_then(Value::from_char).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        let suit = Suit::from_char(suit_char).ok_or_else(invalid)?;
        Ok(Card(value, suit))
    }
}

/// Parse a whitespace or comma separated list of cards, e.g. `"As Kd 7c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Render cards the way they're shown to decision providers.
#[must_use]
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two distinct hole cards. The higher card is always stored first so that
/// equality and hashing don't depend on the order the cards were dealt in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Hand {
    high: Card,
    low: Card,
}

impl Hand {
    pub fn new(first: Card, second: Card) -> Result<Self, CardError> {
        if first == second {
            return Err(CardError::DuplicateCard(first));
        }
        let (high, low) = if first > second {
            (first, second)
        } else {
            (second, first)
        };
        Ok(Self { high, low })
    }

    #[must_use]
    pub fn high(&self) -> Card {
        self.high
    }

    #[must_use]
    pub fn low(&self) -> Card {
        self.low
    }

    #[must_use]
    pub fn cards(&self) -> [Card; 2] {
        [self.high, self.low]
    }

    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.high.0 == self.low.0
    }

    #[must_use]
    pub fn is_suited(&self) -> bool {
        self.high.1 == self.low.1
    }
}

impl TryFrom<&[Card]> for Hand {
    type Error = CardError;

    fn try_from(cards: &[Card]) -> Result<Self, Self::Error> {
        match cards {
            [first, second] => Self::new(*first, *second),
            _ => Err(CardError::WrongCount(cards.len())),
        }
    }
}

impl FromStr for Hand {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let cards = if compact.chars().count() == 4 {
            let split = compact
                .char_indices()
                .nth(2)
                .map_or(compact.len(), |(idx, _)| idx);
            vec![compact[..split].parse()?, compact[split..].parse()?]
        } else {
            parse_cards(s)?
        };
        Self::try_from(cards.as_slice())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)
    }
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    pub deck_idx: usize,
}

impl Deck {
    pub fn deal_card(&mut self) -> Option<Card> {
        let card = self.cards.get(self.deck_idx).copied()?;
        self.deck_idx += 1;
        Some(card)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.deck_idx = 0;
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Value::ALL
            .into_iter()
            .flat_map(|value| Suit::ALL.into_iter().map(move |suit| Card(value, suit)))
            .collect();
        Self { cards, deck_idx: 0 }
    }
}

/// Type alias for whole chips. All bets and player stacks are represented
/// as whole chips.
pub type Usd = u32;

/// Type alias for seat positions during the game.
pub type SeatIndex = usize;

/// The four public betting rounds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Map an engine street index (0 = preflop) onto a street.
    #[must_use]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of board cards visible once this street is dealt.
    #[must_use]
    pub fn board_len(self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "Preflop",
            Self::Flop => "Flop",
            Self::Turn => "Turn",
            Self::River => "River",
        };
        write!(f, "{repr}")
    }
}

/// The closed set of decisions a player can make. The derived ordering is
/// the aggression ordering, `Fold` weakest and `AllIn` strongest.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Fold,
        Action::Check,
        Action::Call,
        Action::Raise,
        Action::AllIn,
    ];

    /// Canonical label used on the decision-provider boundary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "all_in",
        }
    }

    /// Parse a free-text label. Only an exact, case-insensitive match of one
    /// of the five labels is accepted; anything else becomes a fold.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| {
                warn!("invalid action label {label:?}, defaulting to fold");
                Self::Fold
            })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "folds",
            Self::Check => "checks",
            Self::Call => "calls",
            Self::Raise => "raises",
            Self::AllIn => "goes all in",
        };
        write!(f, "{repr}")
    }
}
