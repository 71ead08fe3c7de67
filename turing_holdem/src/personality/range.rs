//! Starting-hand ranges built from compact range notation.

use std::{
    collections::{HashSet, hash_set},
    str::FromStr,
};

use super::errors::RangeError;
use crate::game::entities::{Card, Hand, Suit, Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Suitedness {
    Suited,
    Offsuit,
    Any,
}

/// One parsed notation term before expansion, e.g. `AJs`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Term {
    high: Value,
    low: Value,
    suitedness: Suitedness,
}

impl Term {
    fn is_pair(&self) -> bool {
        self.high == self.low
    }
}

/// A set of concrete two-card starting hands.
///
/// Ranges are expanded once from notation such as `"66+;AJs+;KQo"` and
/// then only queried, so membership is a single hash lookup.
///
/// Supported terms, separated by `;`:
///
/// - `QQ` a pocket pair, `66+` that pair and every higher pair
/// - `AKs` suited, `AKo` offsuit, `AK` both
/// - `AJs+` raises the kicker up to one below the high card
/// - `A2s-A5s` / `22-55` an explicit span
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Range(HashSet<Hand>);

impl Range {
    pub fn parse(notation: &str) -> Result<Self, RangeError> {
        let mut hands = HashSet::new();
        for raw in notation.split(';') {
            let term = raw.trim();
            if term.is_empty() {
                continue;
            }
            let expanded =
                expand_term(term).map_err(|_| RangeError::InvalidTerm(term.to_string()))?;
            for (high, low, suitedness) in expanded {
                hands.extend(combos(high, low, suitedness));
            }
        }
        Ok(Self(hands))
    }

    #[must_use]
    pub fn contains(&self, hand: &Hand) -> bool {
        self.0.contains(hand)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Hand> {
        self.0.iter()
    }

    #[must_use]
    pub fn union(&self, other: &Range) -> Range {
        Self(self.0.union(&other.0).copied().collect())
    }
}

impl FromStr for Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<Hand> for Range {
    fn from_iter<I: IntoIterator<Item = Hand>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = &'a Hand;
    type IntoIter = hash_set::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn parse_term(term: &str) -> Result<Term, RangeError> {
    let invalid = || RangeError::InvalidTerm(term.to_string());
    let chars: Vec<char> = term.chars().collect();
    let (first, second, suitedness) = match chars.as_slice() {
        [a, b] => (*a, *b, Suitedness::Any),
        [a, b, 's' | 'S'] => (*a, *b, Suitedness::Suited),
        [a, b, 'o' | 'O'] => (*a, *b, Suitedness::Offsuit),
        _ => return Err(invalid()),
    };
    let first = Value::from_char(first).ok_or_else(invalid)?;
    let second = Value::from_char(second).ok_or_else(invalid)?;
    let (high, low) = if first >= second {
        (first, second)
    } else {
        (second, first)
    };
    if high == low && suitedness != Suitedness::Any {
        return Err(invalid());
    }
    Ok(Term {
        high,
        low,
        suitedness,
    })
}

fn values_between(from: Value, to: Value) -> impl Iterator<Item = Value> {
    Value::ALL
        .into_iter()
        .filter(move |value| *value >= from && *value <= to)
}

fn expand_term(term: &str) -> Result<Vec<(Value, Value, Suitedness)>, RangeError> {
    let invalid = || RangeError::InvalidTerm(term.to_string());

    if let Some((start, end)) = term.split_once('-') {
        let start = parse_term(start.trim())?;
        let end = parse_term(end.trim())?;
        if start.is_pair() && end.is_pair() {
            let (from, to) = (start.high.min(end.high), start.high.max(end.high));
            return Ok(values_between(from, to)
                .map(|value| (value, value, Suitedness::Any))
                .collect());
        }
        if start.high != end.high || start.suitedness != end.suitedness || start.is_pair() || end.is_pair() {
            return Err(invalid());
        }
        let (from, to) = (start.low.min(end.low), start.low.max(end.low));
        return Ok(values_between(from, to)
            .map(|low| (start.high, low, start.suitedness))
            .collect());
    }

    if let Some(body) = term.strip_suffix('+') {
        let base = parse_term(body)?;
        if base.is_pair() {
            return Ok(values_between(base.high, Value::Ace)
                .map(|value| (value, value, Suitedness::Any))
                .collect());
        }
        return Ok(values_between(base.low, base.high)
            .filter(|low| *low < base.high)
            .map(|low| (base.high, low, base.suitedness))
            .collect());
    }

    let base = parse_term(term)?;
    Ok(vec![(base.high, base.low, base.suitedness)])
}

fn combos(high: Value, low: Value, suitedness: Suitedness) -> Vec<Hand> {
    let mut hands = Vec::with_capacity(16);
    for (i, first) in Suit::ALL.into_iter().enumerate() {
        for (j, second) in Suit::ALL.into_iter().enumerate() {
            let keep = if high == low {
                i < j
            } else {
                match suitedness {
                    Suitedness::Suited => i == j,
                    Suitedness::Offsuit => i != j,
                    Suitedness::Any => true,
                }
            };
            if keep {
                if let Ok(hand) = Hand::new(Card(high, first), Card(low, second)) {
                    hands.push(hand);
                }
            }
        }
    }
    hands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn test_pair_combos() {
        let range = Range::parse("QQ").unwrap();
        assert_eq!(range.len(), 6);
        assert!(range.contains(&hand("QsQh")));
        assert!(!range.contains(&hand("KsKh")));
    }

    #[test]
    fn test_suited_offsuit_and_any() {
        assert_eq!(Range::parse("AKs").unwrap().len(), 4);
        assert_eq!(Range::parse("AKo").unwrap().len(), 12);
        assert_eq!(Range::parse("AK").unwrap().len(), 16);
        assert_eq!(Range::parse("KAs").unwrap(), Range::parse("AKs").unwrap());
    }

    #[test]
    fn test_pair_plus() {
        let range = Range::parse("66+").unwrap();
        // 66, 77, 88, 99, TT, JJ, QQ, KK, AA
        assert_eq!(range.len(), 9 * 6);
        assert!(range.contains(&hand("6c6d")));
        assert!(range.contains(&hand("AcAd")));
        assert!(!range.contains(&hand("5c5d")));
    }

    #[test]
    fn test_kicker_plus() {
        let range = Range::parse("AJs+").unwrap();
        // AJs, AQs, AKs
        assert_eq!(range.len(), 3 * 4);
        assert!(range.contains(&hand("AhJh")));
        assert!(range.contains(&hand("AhKh")));
        assert!(!range.contains(&hand("AhTh")));
        assert!(!range.contains(&hand("AhKd")));

        // K2s+ covers every suited king
        assert_eq!(Range::parse("K2s+").unwrap().len(), 11 * 4);
    }

    #[test]
    fn test_spans() {
        assert_eq!(Range::parse("A2s-A5s").unwrap().len(), 4 * 4);
        assert_eq!(Range::parse("22-55").unwrap().len(), 4 * 6);
        assert!(Range::parse("A2s-K5s").is_err());
    }

    #[test]
    fn test_multiple_terms_and_whitespace() {
        let range = Range::parse(" AJs+ ; KQs ;; ").unwrap();
        assert_eq!(range.len(), 4 * 4);
    }

    #[test]
    fn test_invalid_terms() {
        for notation in ["AAs", "A", "XYs", "AKx", "AKs++", "AKQ"] {
            assert_eq!(
                Range::parse(notation),
                Err(RangeError::InvalidTerm(notation.to_string())),
                "{notation}"
            );
        }
    }

    #[test]
    fn test_union() {
        let pairs = Range::parse("22+").unwrap();
        let suited = Range::parse("AKs").unwrap();
        let both = pairs.union(&suited);
        assert_eq!(both.len(), pairs.len() + suited.len());
    }
}
