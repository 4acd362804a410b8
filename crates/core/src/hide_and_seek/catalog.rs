//! Question kinds, their input schemas and answer domains, and the per-kind
//! card pool.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::hide_and_seek::GameError;
use crate::shape::types::{CardinalSide, SplitAxis};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Matching,
    Measuring,
    Radar,
    Thermometer,
    Photo,
}

impl QuestionKind {
    /// How many of this card the seeker team starts with.
    pub fn starting_pool(self) -> u8 {
        match self {
            QuestionKind::Matching => 3,
            QuestionKind::Measuring => 3,
            QuestionKind::Radar => 2,
            QuestionKind::Thermometer => 2,
            QuestionKind::Photo => 1,
        }
    }

    /// Thermometer needs a start and an end fix; everything else one anchor.
    pub fn anchor_count(self) -> usize {
        match self {
            QuestionKind::Thermometer => 2,
            _ => 1,
        }
    }

    pub fn schema(self) -> QuestionSchema {
        match self {
            QuestionKind::Matching => QuestionSchema {
                detail: DetailSchema::Prompt,
                answers: &[Answer::Yes, Answer::No],
            },
            QuestionKind::Measuring => QuestionSchema {
                detail: DetailSchema::Landmark,
                answers: &[Answer::Closer, Answer::Farther],
            },
            QuestionKind::Radar => QuestionSchema {
                detail: DetailSchema::Distance,
                answers: &[Answer::Yes, Answer::No],
            },
            QuestionKind::Thermometer => QuestionSchema {
                detail: DetailSchema::None,
                answers: &[Answer::Closer, Answer::Farther],
            },
            QuestionKind::Photo => QuestionSchema {
                detail: DetailSchema::Landmark,
                answers: &[Answer::Received],
            },
        }
    }
}

/// Flat answer vocabulary across all kinds. Each kind (and, for matching,
/// each prompt) narrows this to its own domain.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    North,
    South,
    East,
    West,
    Closer,
    Farther,
    Received,
}

impl Answer {
    pub fn cardinal(self) -> Option<CardinalSide> {
        match self {
            Answer::North => Some(CardinalSide::North),
            Answer::South => Some(CardinalSide::South),
            Answer::East => Some(CardinalSide::East),
            Answer::West => Some(CardinalSide::West),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailSchema {
    /// A predefined matching prompt, or custom text.
    Prompt,
    /// Free-text landmark or photo subject.
    Landmark,
    /// Distance text like "3 mi".
    Distance,
    None,
}

#[derive(Clone, Copy, Debug)]
pub struct QuestionSchema {
    pub detail: DetailSchema,
    /// Base answer domain. Directional matching prompts narrow it further,
    /// see [`MatchingPrompt::answer_domain`].
    pub answers: &'static [Answer],
}

/// A matching question prompt. Directional prompts carry their split axis
/// explicitly rather than re-deriving it from the text at answer time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchingPrompt {
    pub text: String,
    pub axis: Option<SplitAxis>,
}

impl MatchingPrompt {
    pub fn predefined() -> Vec<MatchingPrompt> {
        vec![
            MatchingPrompt {
                text: "Are you north or south of us?".into(),
                axis: Some(SplitAxis::Latitude),
            },
            MatchingPrompt {
                text: "Are you east or west of us?".into(),
                axis: Some(SplitAxis::Longitude),
            },
            MatchingPrompt {
                text: "Is your nearest pub the same as ours?".into(),
                axis: None,
            },
            MatchingPrompt {
                text: "Is your nearest tram stop the same as ours?".into(),
                axis: None,
            },
        ]
    }

    /// Custom prompts never classify as directional; they take the yes/no
    /// advisory path. Documented fallback, not an oversight.
    pub fn custom(text: impl Into<String>) -> Self {
        MatchingPrompt {
            text: text.into(),
            axis: None,
        }
    }

    pub fn answer_domain(&self) -> &'static [Answer] {
        match self.axis {
            Some(SplitAxis::Latitude) => &[Answer::North, Answer::South],
            Some(SplitAxis::Longitude) => &[Answer::East, Answer::West],
            None => &[Answer::Yes, Answer::No],
        }
    }
}

/// Preset radar distances offered before the custom field.
pub const RADAR_DISTANCES: &[&str] = &["5 mi", "3 mi", "1 mi", "\u{00bd} mi", "\u{00bc} mi"];

/// Remaining-use counters for every question kind.
#[derive(Clone, Debug)]
pub struct QuestionCatalog {
    pool: Vec<(QuestionKind, u8)>,
}

impl QuestionCatalog {
    pub fn new() -> Self {
        QuestionCatalog {
            pool: QuestionKind::iter().map(|k| (k, k.starting_pool())).collect(),
        }
    }

    pub fn remaining(&self, kind: QuestionKind) -> u8 {
        self.pool
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn can_ask(&self, kind: QuestionKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Burn one use of `kind`. Only called on a fully resolved question.
    pub fn decrement(&mut self, kind: QuestionKind) -> Result<(), GameError> {
        for (k, n) in &mut self.pool {
            if *k == kind {
                if *n == 0 {
                    return Err(GameError::PoolExhausted(kind));
                }
                *n -= 1;
                return Ok(());
            }
        }
        Err(GameError::PoolExhausted(kind))
    }

    /// Restore every pool to its starting count.
    pub fn reset(&mut self) {
        for (k, n) in &mut self.pool {
            *n = k.starting_pool();
        }
    }

    /// Shown in the round header.
    pub fn total_remaining(&self) -> u32 {
        self.pool.iter().map(|(_, n)| *n as u32).sum()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        QuestionCatalog::new()
    }
}
