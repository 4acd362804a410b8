use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hide_and_seek::GameError;
use crate::hide_and_seek::catalog::{Answer, DetailSchema, MatchingPrompt, QuestionKind};
use crate::hide_and_seek::constraint::Constraint;
use crate::position::Position;

pub mod matching;
pub mod measuring;
pub mod photo;
pub mod radar;
pub mod thermometer;

/// Anchor points captured for a question, in capture order. Thermometer is
/// the only kind that needs two.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Anchors {
    Single(Position),
    Pair { start: Position, end: Position },
}

impl Anchors {
    pub fn primary(&self) -> &Position {
        match self {
            Anchors::Single(position) => position,
            Anchors::Pair { start, .. } => start,
        }
    }

    pub fn pair(&self) -> Option<(&Position, &Position)> {
        match self {
            Anchors::Pair { start, end } => Some((start, end)),
            Anchors::Single(_) => None,
        }
    }
}

/// Detail payload captured during a session, matching the kind's schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum QuestionDetail {
    Prompt(MatchingPrompt),
    Landmark(String),
    Distance(String),
    None,
}

impl QuestionDetail {
    pub fn display(&self) -> String {
        match self {
            QuestionDetail::Prompt(prompt) => prompt.text.clone(),
            QuestionDetail::Landmark(text) | QuestionDetail::Distance(text) => text.clone(),
            QuestionDetail::None => String::new(),
        }
    }

    pub fn satisfies(&self, schema: DetailSchema) -> bool {
        match (schema, self) {
            (DetailSchema::Prompt, QuestionDetail::Prompt(prompt)) => !prompt.text.trim().is_empty(),
            (DetailSchema::Landmark, QuestionDetail::Landmark(text)) => !text.trim().is_empty(),
            (DetailSchema::Distance, QuestionDetail::Distance(text)) => !text.trim().is_empty(),
            (DetailSchema::None, QuestionDetail::None) => true,
            _ => false,
        }
    }
}

/// The kind-specific answer domain, narrowed by the prompt for matching.
pub fn answer_domain(kind: QuestionKind, detail: &QuestionDetail) -> &'static [Answer] {
    if let (QuestionKind::Matching, QuestionDetail::Prompt(prompt)) = (kind, detail) {
        prompt.answer_domain()
    } else {
        kind.schema().answers
    }
}

/// Pure derivation: a fully captured question plus its answer becomes a
/// [`Constraint`]. No state is touched here; the aggregate decrements the
/// pool and appends only after this succeeds.
pub fn derive(
    kind: QuestionKind,
    anchors: &Anchors,
    detail: &QuestionDetail,
    answer: Answer,
    created_at: DateTime<Utc>,
) -> Result<Constraint, GameError> {
    if !answer_domain(kind, detail).contains(&answer) {
        return Err(GameError::UnsupportedAnswer { kind, answer });
    }

    let (region, label) = match kind {
        QuestionKind::Radar => {
            let QuestionDetail::Distance(text) = detail else {
                return Err(GameError::MissingDetail);
            };
            radar::RadarQuestion {
                center: *anchors.primary(),
                distance_text: text.clone(),
            }
            .derive(answer)
        }

        QuestionKind::Matching => {
            let QuestionDetail::Prompt(prompt) = detail else {
                return Err(GameError::MissingDetail);
            };
            matching::MatchingQuestion {
                anchor: *anchors.primary(),
                prompt: prompt.clone(),
            }
            .derive(answer)
        }

        QuestionKind::Measuring => {
            let QuestionDetail::Landmark(landmark) = detail else {
                return Err(GameError::MissingDetail);
            };
            measuring::MeasuringQuestion {
                anchor: *anchors.primary(),
                landmark: landmark.clone(),
            }
            .derive(answer)
        }

        QuestionKind::Thermometer => {
            let Some((start, end)) = anchors.pair() else {
                return Err(GameError::MissingAnchor);
            };
            thermometer::ThermometerQuestion {
                start: *start,
                end: *end,
            }
            .derive(answer)
        }

        QuestionKind::Photo => {
            let QuestionDetail::Landmark(subject) = detail else {
                return Err(GameError::MissingDetail);
            };
            photo::PhotoQuestion {
                anchor: *anchors.primary(),
                subject: subject.clone(),
            }
            .derive(answer)
        }
    };

    Ok(Constraint {
        kind,
        anchors: anchors.clone(),
        detail: detail.display(),
        answer,
        region,
        label,
        created_at,
    })
}
