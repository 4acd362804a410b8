//! The hider's card hand. A card is drawn after answering a question; time
//! bonuses held at round end are added to the hider's score.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hide_and_seek::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "card", rename_all = "snake_case")]
pub enum HiderCard {
    /// Cancels the question just asked.
    Veto,
    TimeBonus { minutes: u32 },
    /// Lets the seekers re-ask a spent question kind.
    Duplicate,
}

/// Uniform draw deck, matching the physical card mix.
const DECK: &[HiderCard] = &[
    HiderCard::Veto,
    HiderCard::TimeBonus { minutes: 5 },
    HiderCard::TimeBonus { minutes: 10 },
    HiderCard::TimeBonus { minutes: 15 },
    HiderCard::TimeBonus { minutes: 20 },
    HiderCard::Duplicate,
];

#[derive(Clone, Debug, Default)]
pub struct HiderHand {
    cards: Vec<HiderCard>,
}

impl HiderHand {
    pub fn new() -> Self {
        HiderHand::default()
    }

    pub fn cards(&self) -> &[HiderCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw into the hand. Fails once the hand holds `limit` cards.
    pub fn draw(&mut self, rng: &mut impl Rng, limit: usize) -> Result<HiderCard, GameError> {
        if self.cards.len() >= limit {
            return Err(GameError::HandFull);
        }
        let card = DECK[rng.random_range(0..DECK.len())];
        tracing::debug!(?card, "drew hider card");
        self.cards.push(card);
        Ok(card)
    }

    /// Play a card; it leaves the hand.
    pub fn play(&mut self, index: usize) -> Option<HiderCard> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn discard(&mut self, index: usize) -> Option<HiderCard> {
        self.play(index)
    }

    /// Summed bonus minutes still held.
    pub fn time_bonus_minutes(&self) -> u32 {
        self.cards
            .iter()
            .map(|card| match card {
                HiderCard::TimeBonus { minutes } => *minutes,
                _ => 0,
            })
            .sum()
    }
}
