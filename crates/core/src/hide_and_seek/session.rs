//! The per-question state machine: anchor capture, detail entry, answer.
//!
//! One session exists at a time. Cancellation from any state returns to
//! `Idle` and discards everything; the pool and the constraint set are only
//! touched by the aggregate once an answer actually resolves.

use crate::hide_and_seek::GameError;
use crate::hide_and_seek::catalog::{DetailSchema, QuestionKind};
use crate::hide_and_seek::question::{Anchors, QuestionDetail};
use crate::position::Position;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    /// Thermometer holds its first fix here until the second arrives.
    SelectingAnchor {
        kind: QuestionKind,
        start: Option<Position>,
    },
    AwaitingDetail {
        kind: QuestionKind,
        anchors: Anchors,
    },
    AwaitingAnswer {
        kind: QuestionKind,
        anchors: Anchors,
        detail: QuestionDetail,
    },
}

#[derive(Clone, Debug, Default)]
pub struct QuestionSession {
    state: SessionState,
}

impl QuestionSession {
    pub fn new() -> Self {
        QuestionSession::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SessionState::Idle
    }

    pub fn pending_kind(&self) -> Option<QuestionKind> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::SelectingAnchor { kind, .. }
            | SessionState::AwaitingDetail { kind, .. }
            | SessionState::AwaitingAnswer { kind, .. } => Some(*kind),
        }
    }

    /// Begin a session for `kind`. The aggregate checks the pool and handles
    /// toggle semantics before calling this.
    pub fn begin(&mut self, kind: QuestionKind) {
        self.state = SessionState::SelectingAnchor { kind, start: None };
    }

    /// Discard the in-flight question, whatever state it is in. Returns
    /// whether there was anything to discard.
    pub fn cancel(&mut self) -> bool {
        let active = !self.is_idle();
        self.state = SessionState::Idle;
        active
    }

    pub fn capture_anchor(&mut self, position: Position) -> Result<(), GameError> {
        match std::mem::take(&mut self.state) {
            SessionState::SelectingAnchor { kind, start: None } if kind.anchor_count() == 2 => {
                self.state = SessionState::SelectingAnchor {
                    kind,
                    start: Some(position),
                };
                Ok(())
            }
            SessionState::SelectingAnchor { kind, start: None } => {
                self.advance(kind, Anchors::Single(position));
                Ok(())
            }
            SessionState::SelectingAnchor {
                kind,
                start: Some(start),
            } => {
                self.advance(
                    kind,
                    Anchors::Pair {
                        start,
                        end: position,
                    },
                );
                Ok(())
            }
            other => {
                self.state = other;
                Err(GameError::NoActiveQuestion)
            }
        }
    }

    // Detail-free kinds go straight to the answer step.
    fn advance(&mut self, kind: QuestionKind, anchors: Anchors) {
        if kind.schema().detail == DetailSchema::None {
            self.state = SessionState::AwaitingAnswer {
                kind,
                anchors,
                detail: QuestionDetail::None,
            };
        } else {
            self.state = SessionState::AwaitingDetail { kind, anchors };
        }
    }

    /// A failed validation leaves the session in `AwaitingDetail` with
    /// nothing lost; the user is simply asked again.
    pub fn confirm_detail(&mut self, detail: QuestionDetail) -> Result<(), GameError> {
        match std::mem::take(&mut self.state) {
            SessionState::AwaitingDetail { kind, anchors } => {
                if !detail.satisfies(kind.schema().detail) {
                    self.state = SessionState::AwaitingDetail { kind, anchors };
                    return Err(GameError::MissingDetail);
                }
                self.state = SessionState::AwaitingAnswer {
                    kind,
                    anchors,
                    detail,
                };
                Ok(())
            }
            other => {
                self.state = other;
                Err(GameError::NoActiveQuestion)
            }
        }
    }

    /// Consume the session for resolution. The caller derives the constraint
    /// from the returned parts; the session is gone either way, matching the
    /// discard-on-bad-answer rule.
    pub fn take_resolved(&mut self) -> Result<(QuestionKind, Anchors, QuestionDetail), GameError> {
        match std::mem::take(&mut self.state) {
            SessionState::AwaitingAnswer {
                kind,
                anchors,
                detail,
            } => Ok((kind, anchors, detail)),
            other => {
                self.state = other;
                Err(GameError::NoActiveQuestion)
            }
        }
    }
}
